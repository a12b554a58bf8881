use std::collections::VecDeque;

use crate::{Error, ValveHandle, Volcano};

/// Minimum hop counts from a fixed set of source valves to every valve.
///
/// Rows exist only for the sources the index was built with. Distances are never assumed to be
/// symmetric, so every valve that will be asked about as a starting point must be a source.
#[derive(Debug, Clone)]
pub struct DistanceIndex {
    cols: usize,
    // Maps a valve to its row in `data`, if it's a source.
    row_for: Vec<Option<usize>>,
    sources: Vec<ValveHandle>,
    names: Vec<String>,
    data: Vec<Option<u32>>,
}

impl DistanceIndex {
    pub fn build(volcano: &Volcano, sources: impl IntoIterator<Item = ValveHandle>) -> Self {
        let cols = volcano.len();
        let mut row_for = vec![None; cols];
        let mut unique: Vec<ValveHandle> = Vec::new();
        for src in sources {
            if row_for[src.as_usize()].is_none() {
                row_for[src.as_usize()] = Some(unique.len());
                unique.push(src);
            }
        }

        let mut data = vec![None; unique.len() * cols];
        let mut queue: VecDeque<ValveHandle> = VecDeque::new();
        for (row, &src) in unique.iter().enumerate() {
            let dist = &mut data[row * cols..(row + 1) * cols];
            bfs(volcano, src, dist, &mut queue);
        }

        let names = volcano.handles().map(|vh| volcano.name(vh).to_string()).collect();
        DistanceIndex { cols, row_for, sources: unique, names, data }
    }

    pub fn distance(&self, from: ValveHandle, to: ValveHandle) -> Result<u32, Error> {
        let row = self.row_for.get(from.as_usize())
            .copied()
            .flatten()
            .ok_or_else(|| Error::UnknownSource(self.name(from)))?;
        self.data[row * self.cols + to.as_usize()].ok_or_else(|| Error::NotReachable {
            from: self.name(from),
            to: self.name(to),
        })
    }

    pub fn sources(&self) -> &[ValveHandle] {
        &self.sources
    }

    fn name(&self, vh: ValveHandle) -> String {
        match self.names.get(vh.as_usize()) {
            Some(name) => name.clone(),
            None => format!("{vh:?}"),
        }
    }
}

// Breadth-first, so the first time a valve is reached is at its lowest level.
fn bfs(volcano: &Volcano, src: ValveHandle, dist: &mut [Option<u32>], queue: &mut VecDeque<ValveHandle>) {
    queue.clear();
    dist[src.as_usize()] = Some(0);
    queue.push_back(src);
    while let Some(cur) = queue.pop_front() {
        let Some(level) = dist[cur.as_usize()] else {
            continue;
        };
        for &next in volcano.tunnels(cur) {
            if dist[next.as_usize()].is_some() {
                continue;
            }
            dist[next.as_usize()] = Some(level + 1);
            queue.push_back(next);
        }
    }
}
