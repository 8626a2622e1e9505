//! Boundary sequencing: turns an unordered point set into a simple closed polygon.
//!
//! The walk is a greedy nearest-neighbour tour. Whenever a finished tour has two
//! crossing edges, both edges are banned and the tour is rebuilt from scratch.
//! A point the walk keeps getting stuck on is pruned once it reaches the failure
//! threshold. The whole loop runs under a restart budget; running out of budget
//! is reported as [`LandError::SequencingUnresolved`] instead of spinning forever.

use super::types::closed_edges;
use super::{LandError, LandResult};
use crate::config::SequencerConfig;
use crate::geometry::{Point, PointKey};
use indexmap::IndexSet;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Undirected edge, endpoints stored in key order.
type EdgeKey = (PointKey, PointKey);

fn edge_key(a: &Point, b: &Point) -> EdgeKey {
    let (ka, kb) = (a.key(), b.key());
    if ka <= kb {
        (ka, kb)
    } else {
        (kb, ka)
    }
}

/// A successful sequencing run.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequenced {
    /// Boundary order; closing edge runs from the last point back to the first.
    pub order: Vec<Point>,
    /// Points pruned because the walk kept dead-ending on them.
    pub dropped: Vec<Point>,
    /// Number of walk restarts it took.
    pub restarts: usize,
}

#[derive(Debug, Clone)]
pub struct Sequencer {
    failure_threshold: u32,
    max_restarts: usize,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self::new(&SequencerConfig::default())
    }
}

enum Walk {
    /// Indices into the candidate list, in visiting order.
    Complete(Vec<usize>),
    /// The walk could not continue from this candidate.
    Stuck(usize),
}

impl Sequencer {
    pub fn new(config: &SequencerConfig) -> Self {
        Self {
            failure_threshold: config.failure_threshold.max(1),
            max_restarts: config.max_restarts,
        }
    }

    /// Order `points` into a simple polygon.
    ///
    /// Fewer than three points are returned as given. Otherwise the result has
    /// no pair of crossing edges, closing edge included.
    pub fn sequence(&self, points: &IndexSet<Point>) -> LandResult<Sequenced> {
        self.run(points.iter().cloned().collect(), HashSet::new())
    }

    fn run(&self, mut candidates: Vec<Point>, mut banned: HashSet<EdgeKey>) -> LandResult<Sequenced> {
        if candidates.len() < 3 {
            return Ok(Sequenced { order: candidates, dropped: Vec::new(), restarts: 0 });
        }

        // Failure counters only live for this call.
        let mut failures: HashMap<PointKey, u32> = HashMap::new();
        let mut dropped = Vec::new();
        let mut start = 0;

        for restarts in 0..=self.max_restarts {
            if candidates.len() < 3 {
                return Err(LandError::SequencingUnresolved { restarts, remaining: candidates.len() });
            }
            start %= candidates.len();

            match walk(&candidates, start, &banned) {
                Walk::Stuck(at) => {
                    let key = candidates[at].key();
                    let count = failures.entry(key).or_insert(0);
                    *count += 1;
                    if *count >= self.failure_threshold {
                        failures.remove(&key);
                        let point = candidates.remove(at);
                        debug!("Pruned unreachable point ({}, {}) after {} restart(s)", point.x, point.y, restarts);
                        dropped.push(point);
                    } else {
                        start += 1;
                    }
                }
                Walk::Complete(path) => {
                    let order: Vec<Point> = path.into_iter().map(|i| candidates[i].clone()).collect();
                    match find_crossing(&order) {
                        None => {
                            if restarts > 0 {
                                debug!("Sequenced {} point(s) after {} restart(s)", order.len(), restarts);
                            }
                            return Ok(Sequenced { order, dropped, restarts });
                        }
                        Some((i, j)) => {
                            let n = order.len();
                            banned.insert(edge_key(&order[i], &order[(i + 1) % n]));
                            banned.insert(edge_key(&order[j], &order[(j + 1) % n]));
                        }
                    }
                }
            }
        }

        Err(LandError::SequencingUnresolved { restarts: self.max_restarts, remaining: candidates.len() })
    }
}

/// Greedy nearest-neighbour walk over every candidate, avoiding banned edges.
/// Ties go to the candidate listed first.
fn walk(candidates: &[Point], start: usize, banned: &HashSet<EdgeKey>) -> Walk {
    let n = candidates.len();
    let mut visited = vec![false; n];
    let mut path = Vec::with_capacity(n);

    let mut current = start;
    visited[current] = true;
    path.push(current);

    while path.len() < n {
        let from = &candidates[current];
        let next = (0..n)
            .filter(|&i| !visited[i] && !banned.contains(&edge_key(from, &candidates[i])))
            .min_by(|&a, &b| from.distance(&candidates[a]).total_cmp(&from.distance(&candidates[b])));

        match next {
            Some(i) => {
                visited[i] = true;
                path.push(i);
                current = i;
            }
            None => return Walk::Stuck(current),
        }
    }

    if banned.contains(&edge_key(&candidates[current], &candidates[start])) {
        return Walk::Stuck(current);
    }
    Walk::Complete(path)
}

/// First pair of crossing edges `(i, j)`, `i < j`, of the closed polygon, where
/// edge `k` runs from `order[k]` to `order[(k + 1) % n]`.
pub fn find_crossing(order: &[Point]) -> Option<(usize, usize)> {
    let edges = closed_edges(order, None);
    for i in 0..edges.len() {
        for j in (i + 1)..edges.len() {
            if edges[i].intersects(&edges[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

/// True if no two edges of the closed polygon cross.
pub fn is_simple(order: &[Point]) -> bool {
    find_crossing(order).is_none()
}
