use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::Error;

// eg: Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
static LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"^Valve ([A-Za-z]+) has flow rate=(\d+); tunnels? leads? to valves? (.*)$"#).unwrap()
});

/// The tunnel network. Valves are addressed by [`ValveHandle`]; the valves with positive flow
/// come first, so their handles are also their bit positions in a
/// [`ValveSet`](crate::ValveSet).
#[derive(Debug)]
pub struct Volcano {
    valves: Vec<Valve>,
    handle_for: HashMap<String, ValveHandle>,
    ninteresting: usize,
}

#[derive(Debug, Clone)]
pub struct Valve {
    pub name: String,
    pub flow: u32,
    pub tunnels: Vec<ValveHandle>,
}

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValveHandle(u16);

impl ValveHandle {
    pub fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ValveHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Volcano {
    /// Build a volcano from `(name, flow rate, tunnel targets)` definitions.
    pub fn new<I, S>(defs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (S, u32, Vec<S>)>,
        S: AsRef<str>,
    {
        let defs: Vec<(S, u32, Vec<S>)> = defs.into_iter().collect();
        if defs.len() > u16::MAX as usize {
            return Err(Error::NetworkTooLarge(defs.len()));
        }

        // Interesting valves first, then the rest, each in definition order.
        let order: Vec<usize> = (0..defs.len())
            .filter(|&i| defs[i].1 > 0)
            .chain((0..defs.len()).filter(|&i| defs[i].1 == 0))
            .collect();
        let ninteresting = defs.iter().filter(|(_, flow, _)| *flow > 0).count();
        if ninteresting > u64::BITS as usize {
            return Err(Error::TooManyValves(ninteresting));
        }

        let mut handle_for: HashMap<String, ValveHandle> = HashMap::new();
        for (h, &i) in order.iter().enumerate() {
            let name = defs[i].0.as_ref();
            if handle_for.insert(name.to_string(), ValveHandle(h as u16)).is_some() {
                return Err(Error::DuplicateValveIdentifier(name.to_string()));
            }
        }

        let mut valves = Vec::with_capacity(defs.len());
        for &i in &order {
            let (name, flow, adjacent) = &defs[i];
            let tunnels = adjacent.iter()
                .map(|dst| {
                    handle_for.get(dst.as_ref())
                        .copied()
                        .ok_or_else(|| Error::UnknownValve(dst.as_ref().to_string()))
                })
                .collect::<Result<Vec<_>, _>>()?;
            valves.push(Valve { name: name.as_ref().to_string(), flow: *flow, tunnels });
        }

        Ok(Volcano { valves, handle_for, ninteresting })
    }

    pub fn handle(&self, name: &str) -> Result<ValveHandle, Error> {
        self.handle_for.get(name)
            .copied()
            .ok_or_else(|| Error::UnknownValve(name.to_string()))
    }

    pub fn valve(&self, vh: ValveHandle) -> &Valve {
        &self.valves[vh.as_usize()]
    }

    pub fn name(&self, vh: ValveHandle) -> &str {
        &self.valve(vh).name
    }

    pub fn flow(&self, vh: ValveHandle) -> u32 {
        self.valve(vh).flow
    }

    pub fn tunnels(&self, vh: ValveHandle) -> &[ValveHandle] {
        &self.valve(vh).tunnels
    }

    pub fn len(&self) -> usize {
        self.valves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.valves.is_empty()
    }

    pub fn handles(&self) -> impl Iterator<Item = ValveHandle> {
        (0..self.valves.len()).map(|i| ValveHandle(i as u16))
    }

    /// Valves with positive flow rate, the only ones worth opening.
    pub fn interesting(&self) -> impl Iterator<Item = ValveHandle> {
        (0..self.ninteresting).map(|i| ValveHandle(i as u16))
    }

    pub fn is_interesting(&self, vh: ValveHandle) -> bool {
        vh.as_usize() < self.ninteresting
    }

    pub fn names<'a>(&'a self, handles: &'a [ValveHandle]) -> impl Iterator<Item = &'a str> + 'a {
        handles.iter().map(|&vh| self.name(vh))
    }
}

impl FromStr for Volcano {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut defs: Vec<(&str, u32, Vec<&str>)> = Vec::new();
        for (i, line) in s.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let malformed = || Error::MalformedInput { line: i + 1, text: line.to_string() };
            let caps = LINE_RE.captures(line).ok_or_else(malformed)?;
            let name = caps.get(1).ok_or_else(malformed)?.as_str();
            let flow: u32 = caps[2].parse().map_err(|_| malformed())?;
            let adjacent: Vec<&str> = caps.get(3).ok_or_else(malformed)?.as_str()
                .split(',')
                .map(str::trim)
                .collect();
            if adjacent.iter().any(|name| name.is_empty()) {
                return Err(malformed());
            }
            defs.push((name, flow, adjacent));
        }
        Volcano::new(defs)
    }
}

#[cfg(test)]
pub(crate) mod test {
    use super::*;

    pub(crate) const EXAMPLE: &str = "\
Valve AA has flow rate=0; tunnels lead to valves DD, II, BB
Valve BB has flow rate=13; tunnels lead to valves CC, AA
Valve CC has flow rate=2; tunnels lead to valves DD, BB
Valve DD has flow rate=20; tunnels lead to valves CC, AA, EE
Valve EE has flow rate=3; tunnels lead to valves FF, DD
Valve FF has flow rate=0; tunnels lead to valves EE, GG
Valve GG has flow rate=0; tunnels lead to valves FF, HH
Valve HH has flow rate=22; tunnel leads to valve GG
Valve II has flow rate=0; tunnels lead to valves AA, JJ
Valve JJ has flow rate=21; tunnel leads to valve II";

    fn child_names<'a>(v: &'a Volcano, name: &str) -> Vec<&'a str> {
        let vh = v.handle(name).unwrap();
        v.names(v.tunnels(vh)).collect()
    }

    #[test]
    fn test_volcano_from_str() {
        let volcano = Volcano::from_str(EXAMPLE).unwrap();
        assert_eq!(volcano.len(), 10);
        assert_eq!(volcano.flow(volcano.handle("BB").unwrap()), 13);
        assert_eq!(volcano.flow(volcano.handle("HH").unwrap()), 22);
        assert_eq!(child_names(&volcano, "GG"), vec!["FF", "HH"]);
        assert_eq!(child_names(&volcano, "JJ"), vec!["II"]);
        assert_eq!(child_names(&volcano, "AA"), vec!["DD", "II", "BB"]);
    }

    #[test]
    fn test_interesting_come_first() {
        let volcano = Volcano::from_str(EXAMPLE).unwrap();
        let names: Vec<&str> = volcano.interesting().map(|vh| volcano.name(vh)).collect();
        assert_eq!(names, vec!["BB", "CC", "DD", "EE", "HH", "JJ"]);
        assert_eq!(volcano.handle("BB").unwrap().as_usize(), 0);
        assert_eq!(volcano.handle("AA").unwrap().as_usize(), 6);
    }

    #[test]
    fn test_skips_blank_lines() {
        let input = format!("\n{EXAMPLE}\n\n");
        assert_eq!(Volcano::from_str(&input).unwrap().len(), 10);
    }

    #[test]
    fn test_malformed_line() {
        let input = "Valve AA has flow rate=0; tunnels lead to valves BB\nValve BB has flow 3";
        let err = Volcano::from_str(input).unwrap_err();
        assert_eq!(err, Error::MalformedInput { line: 2, text: "Valve BB has flow 3".to_string() });
    }

    #[test]
    fn test_flow_rate_overflow() {
        let input = "Valve AA has flow rate=99999999999; tunnel leads to valve AA";
        assert!(matches!(Volcano::from_str(input), Err(Error::MalformedInput { line: 1, .. })));
    }

    #[test]
    fn test_duplicate_valve() {
        let input = "\
Valve AA has flow rate=0; tunnels lead to valves BB
Valve BB has flow rate=1; tunnels lead to valves AA
Valve AA has flow rate=2; tunnels lead to valves BB";
        let err = Volcano::from_str(input).unwrap_err();
        assert_eq!(err, Error::DuplicateValveIdentifier("AA".to_string()));
    }

    #[test]
    fn test_unknown_tunnel_target() {
        let input = "Valve AA has flow rate=0; tunnels lead to valves BB, CC\n\
                     Valve BB has flow rate=1; tunnel leads to valve AA";
        let err = Volcano::from_str(input).unwrap_err();
        assert_eq!(err, Error::UnknownValve("CC".to_string()));
    }

    #[test]
    fn test_unknown_handle() {
        let volcano = Volcano::from_str(EXAMPLE).unwrap();
        assert_eq!(volcano.handle("ZZ").unwrap_err(), Error::UnknownValve("ZZ".to_string()));
    }

    #[test]
    fn test_network_too_large() {
        let names: Vec<String> = (0..=u16::MAX as usize).map(|i| format!("V{i}")).collect();
        let defs = names.iter().map(|name| (name.as_str(), 0, vec![names[0].as_str()]));
        assert_eq!(Volcano::new(defs).unwrap_err(), Error::NetworkTooLarge(u16::MAX as usize + 1));
    }

    #[test]
    fn test_too_many_interesting_valves() {
        let names: Vec<String> = (0..65).map(|i| format!("V{i}")).collect();
        let defs = names.iter().map(|name| (name.as_str(), 1, vec![names[0].as_str()]));
        assert_eq!(Volcano::new(defs).unwrap_err(), Error::TooManyValves(65));
    }
}
