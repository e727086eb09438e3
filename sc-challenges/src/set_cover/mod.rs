pub mod baselines;
mod loading;
pub use baselines::greedy::{Cover, SolveStats};
pub use loading::LoadError;

use anyhow::{anyhow, Result};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::{cell::RefCell, collections::HashSet};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoverError {
    #[error("Number of subsets ({subsets}) does not match number of costs ({costs})")]
    LengthMismatch { subsets: usize, costs: usize },
    #[error(
        "Subset {subset} contains element {element}, but the universe has {num_elements} elements"
    )]
    ElementOutOfRange {
        subset: usize,
        element: usize,
        num_elements: usize,
    },
    #[error("Instance is unsolvable: element {element} is not contained in any subset")]
    UnsolvableInstance { element: usize },
    #[error("Total cost overflowed when selecting subset {subset}")]
    CostOverflow { subset: usize },
}

#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq, Eq)]
pub struct Track {
    pub num_elements: usize,
    pub num_subsets: usize,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Solution {
    pub covering: Vec<usize>,
}

impl Solution {
    pub fn new() -> Self {
        Self {
            covering: Vec::new(),
        }
    }
}

/// A weighted set cover instance.
///
/// Subsets are stored sorted and without duplicate elements, and every element
/// lies in `0..num_elements`. Both properties are checked on construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(try_from = "InstanceData")]
pub struct Instance {
    num_elements: usize,
    subsets: Vec<Vec<usize>>,
    costs: Vec<u64>,
}

#[derive(Deserialize)]
struct InstanceData {
    num_elements: usize,
    subsets: Vec<Vec<usize>>,
    costs: Vec<u64>,
}

impl TryFrom<InstanceData> for Instance {
    type Error = CoverError;

    fn try_from(data: InstanceData) -> Result<Self, Self::Error> {
        Instance::new(data.num_elements, data.subsets, data.costs)
    }
}

impl Instance {
    pub fn new(
        num_elements: usize,
        mut subsets: Vec<Vec<usize>>,
        costs: Vec<u64>,
    ) -> Result<Self, CoverError> {
        if subsets.len() != costs.len() {
            return Err(CoverError::LengthMismatch {
                subsets: subsets.len(),
                costs: costs.len(),
            });
        }
        for (id, subset) in subsets.iter_mut().enumerate() {
            subset.sort_unstable();
            subset.dedup();
            if let Some(&element) = subset.last() {
                if element >= num_elements {
                    return Err(CoverError::ElementOutOfRange {
                        subset: id,
                        element,
                        num_elements,
                    });
                }
            }
        }
        Ok(Self {
            num_elements,
            subsets,
            costs,
        })
    }

    pub fn generate_instance(seed: &[u8; 32], track: &Track) -> Result<Self> {
        let num_elements = track.num_elements;
        let num_subsets = track.num_subsets;
        if num_elements > 0 && num_subsets == 0 {
            return Err(anyhow!("Number of subsets must be at least 1"));
        }
        let mut rng = SmallRng::from_seed(seed.clone());

        // Subsets average roughly two covers per element
        let max_cardinality = (2 * num_elements / num_subsets.max(1))
            .max(1)
            .min(num_elements.max(1));
        let mut subsets: Vec<Vec<usize>> = (0..num_subsets)
            .map(|_| {
                if num_elements == 0 {
                    return Vec::new();
                }
                let cardinality = rng.gen_range(1..=max_cardinality);
                (0..cardinality)
                    .map(|_| rng.gen_range(0..num_elements))
                    .collect()
            })
            .collect();

        // Every element must belong to at least one subset
        let mut covered = vec![false; num_elements];
        for subset in &subsets {
            for &element in subset {
                covered[element] = true;
            }
        }
        for element in 0..num_elements {
            if !covered[element] {
                let id = rng.gen_range(0..num_subsets);
                subsets[id].push(element);
            }
        }

        let costs: Vec<u64> = (0..num_subsets).map(|_| rng.gen_range(1..=100)).collect();

        Ok(Self::new(num_elements, subsets, costs)?)
    }

    pub fn num_elements(&self) -> usize {
        self.num_elements
    }

    pub fn num_subsets(&self) -> usize {
        self.subsets.len()
    }

    pub fn subsets(&self) -> &[Vec<usize>] {
        &self.subsets
    }

    pub fn subset(&self, id: usize) -> &[usize] {
        &self.subsets[id]
    }

    pub fn costs(&self) -> &[u64] {
        &self.costs
    }

    pub fn cost(&self, id: usize) -> u64 {
        self.costs[id]
    }

    pub fn evaluate_total_cost(&self, solution: &Solution) -> Result<u64> {
        let selected: HashSet<usize> = solution.covering.iter().cloned().collect();
        if selected.len() != solution.covering.len() {
            return Err(anyhow!("Duplicate subsets selected."));
        }

        let mut covered = vec![false; self.num_elements];
        let mut total_cost = 0u64;
        for &id in &solution.covering {
            if id >= self.subsets.len() {
                return Err(anyhow!("Subset ({}) is out of bounds", id));
            }
            for &element in &self.subsets[id] {
                covered[element] = true;
            }
            total_cost = total_cost
                .checked_add(self.costs[id])
                .ok_or_else(|| anyhow!("Total cost overflowed at subset ({})", id))?;
        }

        if let Some(element) = covered.iter().position(|&c| !c) {
            return Err(anyhow!("Element ({}) is not covered", element));
        }
        Ok(total_cost)
    }

    pub fn verify_solution(&self, solution: &Solution, max_cost: u64) -> Result<()> {
        let total_cost = self.evaluate_total_cost(solution)?;
        if total_cost > max_cost {
            return Err(anyhow!(
                "Total cost ({}) exceeded max cost ({})",
                total_cost,
                max_cost
            ));
        }
        log::info!(
            "Total cost ({}) is within max cost ({}) using {} subsets",
            total_cost,
            max_cost,
            solution.covering.len()
        );
        Ok(())
    }

    pub fn compute_greedy_baseline(&self) -> Result<Solution> {
        let solution = RefCell::new(Solution::new());
        let save_solution_fn = |s: &Solution| -> Result<()> {
            *solution.borrow_mut() = s.clone();
            Ok(())
        };
        baselines::greedy::solve_challenge(self, &save_solution_fn)?;
        Ok(solution.into_inner())
    }
}
