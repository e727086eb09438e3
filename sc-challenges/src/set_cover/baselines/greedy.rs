use crate::set_cover::{CoverError, Instance, Solution};
use anyhow::Result;
use std::{
    cmp::Ordering,
    collections::BinaryHeap,
    fmt,
    time::{Duration, Instant},
};

/// Snapshot of a subset's uncovered count at the time it was queued.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
struct Entry {
    id: usize,
    cost: u64,
    uncovered: usize,
}

impl Ord for Entry {
    // Compares uncovered / cost ratios by cross multiplication. The u128
    // products cannot overflow. Queued entries never have a zero count, which
    // keeps the order transitive when zero costs are involved.
    fn cmp(&self, other: &Self) -> Ordering {
        let lhs = self.uncovered as u128 * other.cost as u128;
        let rhs = other.uncovered as u128 * self.cost as u128;
        lhs.cmp(&rhs)
            .then_with(|| other.id.cmp(&self.id))
            .then_with(|| self.uncovered.cmp(&other.uncovered))
            .then_with(|| self.cost.cmp(&other.cost))
    }
}

impl PartialOrd for Entry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolveStats {
    /// Subsets selected.
    pub iterations: usize,
    /// Entries pushed onto the queue, including the initial seeding.
    pub pushes: usize,
    /// Popped entries discarded because their snapshot was outdated.
    pub stale_skipped: usize,
}

impl fmt::Display for SolveStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "iterations: {}, pushes: {}, stale skipped: {}",
            self.iterations, self.pushes, self.stale_skipped
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cover {
    /// Selected subset ids in selection order.
    pub covering: Vec<usize>,
    pub total_cost: u64,
    pub elapsed: Duration,
    pub stats: SolveStats,
}

impl Cover {
    pub fn to_solution(&self) -> Solution {
        Solution {
            covering: self.covering.clone(),
        }
    }
}

struct GreedyState<'a> {
    instance: &'a Instance,
    // element -> ids of the subsets containing it
    containing: Vec<Vec<usize>>,
    uncovered: Vec<usize>,
    covered: Vec<bool>,
    remaining: usize,
    heap: BinaryHeap<Entry>,
    stats: SolveStats,
}

impl<'a> GreedyState<'a> {
    fn new(instance: &'a Instance) -> Result<Self, CoverError> {
        let num_elements = instance.num_elements();
        let mut containing = vec![Vec::new(); num_elements];
        for (id, subset) in instance.subsets().iter().enumerate() {
            for &element in subset {
                containing[element].push(id);
            }
        }
        if let Some(element) = containing.iter().position(|ids| ids.is_empty()) {
            return Err(CoverError::UnsolvableInstance { element });
        }

        let uncovered: Vec<usize> = instance.subsets().iter().map(|s| s.len()).collect();
        let heap: BinaryHeap<Entry> = uncovered
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(id, &count)| Entry {
                id,
                cost: instance.cost(id),
                uncovered: count,
            })
            .collect();
        let stats = SolveStats {
            pushes: heap.len(),
            ..Default::default()
        };

        Ok(Self {
            instance,
            containing,
            uncovered,
            covered: vec![false; num_elements],
            remaining: num_elements,
            heap,
            stats,
        })
    }

    /// Pops entries until one matches its subset's live uncovered count.
    fn pop_best(&mut self) -> Option<usize> {
        while let Some(entry) = self.heap.pop() {
            let live = self.uncovered[entry.id];
            if live != 0 && live == entry.uncovered {
                return Some(entry.id);
            }
            self.stats.stale_skipped += 1;
        }
        None
    }

    fn select(&mut self, id: usize) {
        let instance = self.instance;
        let mut requeue = Vec::new();
        for &element in instance.subset(id) {
            if self.covered[element] {
                continue;
            }
            self.covered[element] = true;
            self.remaining -= 1;
            for &other in &self.containing[element] {
                self.uncovered[other] -= 1;
                requeue.push(other);
            }
        }

        requeue.sort_unstable();
        requeue.dedup();
        for other in requeue {
            let count = self.uncovered[other];
            if count > 0 {
                self.heap.push(Entry {
                    id: other,
                    cost: instance.cost(other),
                    uncovered: count,
                });
                self.stats.pushes += 1;
            }
        }
        self.stats.iterations += 1;
    }

    fn first_uncovered(&self) -> usize {
        self.covered.iter().position(|&c| !c).unwrap_or(0)
    }
}

/// Greedy weighted set cover.
///
/// Repeatedly selects the subset covering the most uncovered elements per unit
/// of cost. Ties go to the lowest subset id. Outdated queue entries are skipped
/// when popped instead of being updated in place.
pub fn solve(instance: &Instance) -> Result<Cover, CoverError> {
    let start = Instant::now();
    let mut state = GreedyState::new(instance)?;
    let mut covering = Vec::new();
    let mut total_cost = 0u64;

    while state.remaining > 0 {
        let id = match state.pop_best() {
            Some(id) => id,
            None => {
                return Err(CoverError::UnsolvableInstance {
                    element: state.first_uncovered(),
                })
            }
        };
        covering.push(id);
        total_cost = total_cost
            .checked_add(instance.cost(id))
            .ok_or(CoverError::CostOverflow { subset: id })?;
        state.select(id);
    }

    let elapsed = start.elapsed();
    log::debug!(
        "Covered {} elements with {} subsets (cost {}) in {:?}; {}",
        instance.num_elements(),
        covering.len(),
        total_cost,
        elapsed,
        state.stats
    );
    Ok(Cover {
        covering,
        total_cost,
        elapsed,
        stats: state.stats,
    })
}

pub fn solve_challenge(
    instance: &Instance,
    save_solution: &dyn Fn(&Solution) -> Result<()>,
) -> Result<()> {
    let cover = solve(instance)?;
    save_solution(&cover.to_solution())
}
