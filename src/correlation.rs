//! Correlation coefficients between two system rankings.
//!
//! Both coefficients compare the full-topic MAP vector against the MAP
//! vector computed on a topic subset. They are undefined when either vector
//! has zero variance, which is reported as
//! [`Error::DegenerateCorrelation`] rather than as `NaN`.
//!
//! # References
//!
//! - Pearson (1895), "Notes on regression and inheritance in the case of two parents"
//! - Kendall (1945), "The treatment of ties in ranking problems" (τ-b)

use crate::error::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Correlation method used to compare two rankings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Correlation {
    /// Linear (product-moment) correlation coefficient.
    #[default]
    Pearson,

    /// Kendall's rank correlation τ-b (tie-corrected).
    Kendall,
}

impl Correlation {
    /// Resolves a method by name, falling back to [`Correlation::Pearson`]
    /// for anything unrecognized.
    ///
    /// The fallback is logged at `warn` level. Use [`str::parse`] for a
    /// strict lookup.
    pub fn from_name(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            log::warn!("unknown correlation method '{name}', using Pearson");
            Correlation::Pearson
        })
    }

    pub fn name(self) -> &'static str {
        match self {
            Correlation::Pearson => "Pearson",
            Correlation::Kendall => "Kendall",
        }
    }

    /// Computes the coefficient between `a` and `b`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidInput`] if the lengths differ or are below 2.
    /// - [`Error::DegenerateCorrelation`] if either vector is constant, up
    ///   to a few ulps of rounding relative to its magnitude.
    ///
    /// # Example
    ///
    /// ```
    /// use bestsub::correlation::Correlation;
    ///
    /// let r = Correlation::Pearson.correlate(&[1.0, 2.0, 3.0], &[3.0, 2.0, 1.0]).unwrap();
    /// assert_eq!(r, -1.0);
    /// ```
    pub fn correlate(self, a: &[f64], b: &[f64]) -> Result<f64> {
        if a.len() != b.len() {
            return Err(Error::InvalidInput(format!(
                "cannot correlate vectors of length {} and {}",
                a.len(),
                b.len()
            )));
        }
        if a.len() < 2 {
            return Err(Error::InvalidInput(
                "correlation needs at least two observations".into(),
            ));
        }
        if is_constant(a) || is_constant(b) {
            return Err(degenerate(self, "zero variance"));
        }
        match self {
            Correlation::Pearson => pearson(a, b),
            Correlation::Kendall => kendall_tau_b(a, b),
        }
    }
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Correlation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Pearson" => Ok(Correlation::Pearson),
            "Kendall" => Ok(Correlation::Kendall),
            other => Err(Error::Configuration(format!(
                "unknown correlation method '{other}' (expected Pearson or Kendall)"
            ))),
        }
    }
}

/// True when the spread of `v` is within rounding noise of its magnitude.
///
/// Subset means of equal AP values can differ in the last bits depending on
/// summation order, so exact comparison is not enough.
fn is_constant(v: &[f64]) -> bool {
    let (lo, hi) = v
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
            (lo.min(x), hi.max(x))
        });
    hi - lo <= 16.0 * f64::EPSILON * lo.abs().max(hi.abs())
}

fn pearson(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = a.len() as f64;
    let mean_a = a.iter().sum::<f64>() / n;
    let mean_b = b.iter().sum::<f64>() / n;

    let mut sab = 0.0;
    let mut saa = 0.0;
    let mut sbb = 0.0;
    for (&x, &y) in a.iter().zip(b) {
        let dx = x - mean_a;
        let dy = y - mean_b;
        sab += dx * dy;
        saa += dx * dx;
        sbb += dy * dy;
    }

    if saa == 0.0 || sbb == 0.0 {
        return Err(degenerate(Correlation::Pearson, "zero variance"));
    }
    // Rounding can push |r| marginally past 1.
    Ok((sab / (saa * sbb).sqrt()).clamp(-1.0, 1.0))
}

/// τ-b = (nc - nd) / sqrt((n0 - n1)(n0 - n2)), O(n²) pair scan.
fn kendall_tau_b(a: &[f64], b: &[f64]) -> Result<f64> {
    let n = a.len();
    let mut concordant = 0i64;
    let mut discordant = 0i64;
    let mut ties_a = 0i64;
    let mut ties_b = 0i64;

    for i in 0..n {
        for j in (i + 1)..n {
            let da = a[i] - a[j];
            let db = b[i] - b[j];
            if da == 0.0 {
                ties_a += 1;
            }
            if db == 0.0 {
                ties_b += 1;
            }
            if da != 0.0 && db != 0.0 {
                if (da > 0.0) == (db > 0.0) {
                    concordant += 1;
                } else {
                    discordant += 1;
                }
            }
        }
    }

    let pairs = (n * (n - 1) / 2) as i64;
    let denom = ((pairs - ties_a) as f64) * ((pairs - ties_b) as f64);
    if denom == 0.0 {
        return Err(degenerate(Correlation::Kendall, "all pairs tied"));
    }
    Ok(((concordant - discordant) as f64 / denom.sqrt()).clamp(-1.0, 1.0))
}

fn degenerate(method: Correlation, reason: &str) -> Error {
    Error::DegenerateCorrelation {
        method: method.name().to_string(),
        reason: reason.to_string(),
    }
}
