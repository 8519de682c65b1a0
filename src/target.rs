//! Search targets: best- or worst-correlating topic subsets.
//!
//! The evolutionary engine minimizes every objective. A [`Target`] turns a
//! (correlation, cardinality) pair into the two minimized objectives by
//! negating whichever quantity should be maximized, and
//! [`Target::restore`] undoes exactly that negation afterwards.

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Which end of the correlation range the search aims for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Target {
    /// Maximize correlation while minimizing cardinality.
    ///
    /// Objectives: `(-correlation, cardinality)`.
    #[default]
    Best,

    /// Minimize correlation while maximizing cardinality.
    ///
    /// Objectives: `(correlation, -cardinality)`.
    Worst,
}

impl Target {
    /// Resolves a target by name, falling back to [`Target::Best`] (logged
    /// at `warn` level) for anything unrecognized.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown target '{name}', using Best");
            Target::Best
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Target::Best => "Best",
            Target::Worst => "Worst",
        }
    }

    /// Maps a correlation and a subset cardinality to minimized objectives.
    ///
    /// ```
    /// use bestsub::target::Target;
    ///
    /// assert_eq!(Target::Best.shape(0.75, 3), [-0.75, 3.0]);
    /// assert_eq!(Target::Worst.shape(0.75, 3), [0.75, -3.0]);
    /// ```
    pub fn shape(self, correlation: f64, cardinality: usize) -> [f64; 2] {
        let cardinality = cardinality as f64;
        match self {
            Target::Best => [-correlation, cardinality],
            Target::Worst => [correlation, -cardinality],
        }
    }

    /// Inverse of [`shape`](Self::shape): returns `[correlation, cardinality]`.
    pub fn restore(self, objectives: [f64; 2]) -> [f64; 2] {
        let [o0, o1] = objectives;
        match self {
            Target::Best => [-o0, o1],
            Target::Worst => [o0, -o1],
        }
    }

    /// The correlation value that is least desirable for this target.
    pub fn worst_correlation(self) -> f64 {
        match self {
            Target::Best => -1.0,
            Target::Worst => 1.0,
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Target {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Best" => Ok(Target::Best),
            "Worst" => Ok(Target::Worst),
            other => Err(Error::Configuration(format!(
                "unknown target '{other}' (expected Best or Worst)"
            ))),
        }
    }
}
