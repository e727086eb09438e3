use anyhow::{anyhow, Result};
use sc_challenges::set_cover::{baselines::greedy, Cover, Instance};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    path::{Path, PathBuf},
};

pub const BOUND0_SCORE: u32 = 0;
pub const BOUND1_SCORE: u32 = 3;
pub const BOUND2_SCORE: u32 = 5;

/// A named instance file with its cost bounds. `bound2` is the cost needed for
/// full credit, anything strictly below `bound1` earns partial credit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Test {
    pub filename: String,
    pub bound1: u64,
    pub bound2: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Score {
    pub points: u32,
    pub max_points: u32,
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.points, self.max_points)
    }
}

impl Test {
    pub fn new(filename: &str, bound1: u64, bound2: u64) -> Self {
        Self {
            filename: filename.to_string(),
            bound1,
            bound2,
        }
    }

    pub fn score(&self, total_cost: u64) -> Score {
        let points = if total_cost <= self.bound2 {
            BOUND2_SCORE
        } else if total_cost < self.bound1 {
            BOUND1_SCORE
        } else {
            BOUND0_SCORE
        };
        Score {
            points,
            max_points: BOUND2_SCORE,
        }
    }

    pub fn path(&self, data_dir: Option<&Path>) -> PathBuf {
        match data_dir {
            Some(dir) => dir.join(&self.filename),
            None => PathBuf::from(&self.filename),
        }
    }
}

pub fn default_suite() -> Vec<Test> {
    vec![
        Test::new("data/sc_157_0", 130000, 94402),
        Test::new("data/sc_330_0", 29, 24),
        Test::new("data/sc_1000_11", 240, 147),
        Test::new("data/sc_5000_1", 70, 31),
        Test::new("data/sc_10000_2", 280, 167),
        Test::new("data/sc_10000_5", 120, 64),
    ]
}

#[derive(Debug, Clone)]
pub struct TestReport {
    pub test: Test,
    pub cover: Cover,
    pub score: Score,
}

impl fmt::Display for TestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "running test {}\t{:.6}s\t{}",
            self.test.filename,
            self.cover.elapsed.as_secs_f64(),
            self.score
        )?;
        write!(f, "cost = {}", self.cover.total_cost)
    }
}

pub fn run_test(test: &Test, data_dir: Option<&Path>) -> Result<TestReport> {
    let path = test.path(data_dir);
    let instance = Instance::from_path(&path)
        .map_err(|e| anyhow!("Failed to load instance {}: {}", path.display(), e))?;
    let cover = greedy::solve(&instance)?;
    log::debug!("{}: {}", test.filename, cover.stats);
    let score = test.score(cover.total_cost);
    Ok(TestReport {
        test: test.clone(),
        cover,
        score,
    })
}

/// Sums the scores of all runs; a failed run scores zero.
pub fn total_score(reports: &[Result<TestReport>]) -> Score {
    Score {
        points: reports
            .iter()
            .filter_map(|r| r.as_ref().ok())
            .map(|r| r.score.points)
            .sum(),
        max_points: BOUND2_SCORE * reports.len() as u32,
    }
}
