/// Knobs for a search. The defaults reproduce the puzzle's rules.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchConfig {
    pub start: String,
    /// Time budget when working alone.
    pub minutes: u32,
    /// Time budget for each of the two agents when working with a helper.
    pub helper_minutes: u32,
    /// A sequence is only extended if more than this many minutes are left after it.
    pub extend_margin: u32,
    /// Pair combining stops once a sequence's total is below this fraction of the best pair.
    pub pair_cutoff: f64,
    /// Stop searching rather than evaluate more than this many sequences.
    pub max_evaluations: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        SearchConfig {
            start: "AA".to_string(),
            minutes: 30,
            helper_minutes: 26,
            extend_margin: 2,
            pair_cutoff: 0.4,
            max_evaluations: None,
        }
    }
}

impl SearchConfig {
    pub fn with_start(mut self, start: &str) -> Self {
        self.start = start.to_string();
        self
    }

    pub fn with_minutes(mut self, minutes: u32) -> Self {
        self.minutes = minutes;
        self
    }

    pub fn with_helper_minutes(mut self, minutes: u32) -> Self {
        self.helper_minutes = minutes;
        self
    }

    pub fn with_extend_margin(mut self, margin: u32) -> Self {
        self.extend_margin = margin;
        self
    }

    pub fn with_pair_cutoff(mut self, ratio: f64) -> Self {
        self.pair_cutoff = ratio;
        self
    }

    pub fn with_max_evaluations(mut self, max: Option<usize>) -> Self {
        self.max_evaluations = max;
        self
    }
}
