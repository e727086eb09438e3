//! Reader and writer for the plain text instance format.
//!
//! ```raw
//! n m
//! cost_0 e e e ...
//! ...
//! cost_{m-1} e e ...
//! ```
//!
//! The header holds the universe size and the number of subsets. Each of the
//! following `m` lines starts with the subset's cost and lists the elements it
//! contains. Repeated elements on a line collapse into one. Anything after the
//! `m`-th subset line is ignored.

use super::{CoverError, Instance};
use std::{
    fmt::Write as FmtWrite,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected end of input at line {line}: expected {expected}")]
    UnexpectedEof { line: usize, expected: &'static str },
    #[error("Line {line}: could not parse '{token}' as a non-negative integer")]
    Parse { line: usize, token: String },
    #[error("Line {line}: element {element} is outside the universe of {num_elements} elements")]
    ElementOutOfRange {
        line: usize,
        element: usize,
        num_elements: usize,
    },
    #[error(transparent)]
    Instance(#[from] CoverError),
}

fn parse_token<T: FromStr>(token: &str, line: usize) -> Result<T, LoadError> {
    token.parse::<T>().map_err(|_| LoadError::Parse {
        line,
        token: token.to_string(),
    })
}

impl Instance {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, LoadError> {
        let mut lines = reader.lines();

        let header = match lines.next() {
            Some(line) => line?,
            None => {
                return Err(LoadError::UnexpectedEof {
                    line: 1,
                    expected: "header 'n m'",
                })
            }
        };
        let mut tokens = header.split_whitespace();
        let (num_elements, num_subsets) = match (tokens.next(), tokens.next()) {
            (Some(n), Some(m)) => (parse_token::<usize>(n, 1)?, parse_token::<usize>(m, 1)?),
            _ => {
                return Err(LoadError::UnexpectedEof {
                    line: 1,
                    expected: "header 'n m'",
                })
            }
        };

        // Grows with the lines actually read, not with the header count.
        let mut subsets = Vec::new();
        let mut costs = Vec::new();
        for id in 0..num_subsets {
            let line_no = id + 2;
            let line = match lines.next() {
                Some(line) => line?,
                None => {
                    return Err(LoadError::UnexpectedEof {
                        line: line_no,
                        expected: "subset line",
                    })
                }
            };
            let mut tokens = line.split_whitespace();
            let cost = match tokens.next() {
                Some(token) => parse_token::<u64>(token, line_no)?,
                None => {
                    return Err(LoadError::UnexpectedEof {
                        line: line_no,
                        expected: "subset cost",
                    })
                }
            };
            let mut subset = Vec::new();
            for token in tokens {
                let element = parse_token::<usize>(token, line_no)?;
                if element >= num_elements {
                    return Err(LoadError::ElementOutOfRange {
                        line: line_no,
                        element,
                        num_elements,
                    });
                }
                subset.push(element);
            }
            subsets.push(subset);
            costs.push(cost);
        }

        let instance = Instance::new(num_elements, subsets, costs)?;
        log::info!(
            "Loaded instance with {} elements and {} subsets",
            instance.num_elements(),
            instance.num_subsets()
        );
        Ok(instance)
    }

    pub fn to_text(&self) -> String {
        let mut text = String::new();
        let _ = writeln!(text, "{} {}", self.num_elements(), self.num_subsets());
        for (subset, cost) in self.subsets().iter().zip(self.costs()) {
            let _ = write!(text, "{}", cost);
            for element in subset {
                let _ = write!(text, " {}", element);
            }
            text.push('\n');
        }
        text
    }
}

impl FromStr for Instance {
    type Err = LoadError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_reader(s.as_bytes())
    }
}
