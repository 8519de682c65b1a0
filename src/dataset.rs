//! Systems × topics average-precision matrix.
//!
//! A [`Dataset`] is built once and is read-only afterwards. Rows are systems,
//! columns are topics, and the per-system mean average precision (MAP) over
//! all topics is derived at construction time.
//!
//! # Text format
//!
//! [`Dataset::from_reader`] accepts comma-separated text where the first
//! line holds a placeholder cell followed by the topic labels, and every
//! following line holds a system label followed by one AP value per topic:
//!
//! ```text
//! ,401,402,403
//! runA,0.31,0.12,0.55
//! runB,0.28,0.19,0.41
//! ```

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Average-precision matrix with its labels and full-topic MAP.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dataset {
    system_labels: Vec<String>,
    topic_labels: Vec<String>,
    /// Row-major, `system_labels.len() * topic_labels.len()` cells.
    ap: Vec<f64>,
    map: Vec<f64>,
}

impl Dataset {
    /// Builds a dataset from labels and one AP row per system.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if there are no topics, fewer than two
    /// systems, duplicate labels, a row whose length differs from the number
    /// of topics, or a non-finite cell.
    ///
    /// # Example
    ///
    /// ```
    /// use bestsub::dataset::Dataset;
    ///
    /// let ds = Dataset::new(
    ///     vec!["a".into(), "b".into()],
    ///     vec!["t1".into(), "t2".into()],
    ///     vec![vec![0.2, 0.4], vec![0.6, 0.8]],
    /// ).unwrap();
    ///
    /// assert_eq!(ds.number_of_topics(), 2);
    /// assert!((ds.map()[1] - 0.7).abs() < 1e-12);
    /// ```
    pub fn new(
        system_labels: Vec<String>,
        topic_labels: Vec<String>,
        rows: Vec<Vec<f64>>,
    ) -> Result<Self> {
        let n_topics = topic_labels.len();
        if n_topics == 0 {
            return Err(Error::InvalidInput("dataset has no topics".into()));
        }
        if system_labels.len() != rows.len() {
            return Err(Error::InvalidInput(format!(
                "{} system labels for {} AP rows",
                system_labels.len(),
                rows.len()
            )));
        }
        if rows.len() < 2 {
            return Err(Error::InvalidInput(
                "at least two systems are needed to correlate rankings".into(),
            ));
        }
        ensure_unique("system", &system_labels)?;
        ensure_unique("topic", &topic_labels)?;

        let mut ap = Vec::with_capacity(rows.len() * n_topics);
        for (label, row) in system_labels.iter().zip(&rows) {
            if row.len() != n_topics {
                return Err(Error::InvalidInput(format!(
                    "system '{label}' has {} AP values, expected {n_topics}",
                    row.len()
                )));
            }
            if let Some(bad) = row.iter().find(|v| !v.is_finite()) {
                return Err(Error::InvalidInput(format!(
                    "system '{label}' has non-finite AP value {bad}"
                )));
            }
            ap.extend_from_slice(row);
        }

        let map = ap
            .chunks_exact(n_topics)
            .map(|row| row.iter().sum::<f64>() / n_topics as f64)
            .collect();

        Ok(Self {
            system_labels,
            topic_labels,
            ap,
            map,
        })
    }

    /// Parses the comma-separated layout described in the module docs.
    ///
    /// Cells may be quoted and are trimmed; blank lines are skipped.
    ///
    /// # Errors
    ///
    /// [`Error::Io`] if reading fails, [`Error::InvalidInput`] for malformed
    /// CSV, a non-numeric AP cell, or any [`Dataset::new`] validation error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut records = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(reader)
            .into_records();

        let header = match records.next() {
            Some(record) => record.map_err(csv_error)?,
            None => return Err(Error::InvalidInput("dataset is empty".into())),
        };
        // The first header cell labels the system column and is discarded.
        let topic_labels: Vec<String> = header.iter().skip(1).map(str::to_string).collect();

        let mut system_labels = Vec::new();
        let mut rows = Vec::new();
        for record in records {
            let record = record.map_err(csv_error)?;
            let line = record.position().map_or(0, |p| p.line());
            let mut cells = record.iter();
            let label = cells.next().unwrap_or_default().to_string();
            let row = cells
                .map(|cell| {
                    cell.parse::<f64>().map_err(|_| {
                        Error::InvalidInput(format!("line {line}: '{cell}' is not a number"))
                    })
                })
                .collect::<Result<Vec<f64>>>()?;
            system_labels.push(label);
            rows.push(row);
        }

        let dataset = Self::new(system_labels, topic_labels, rows)?;
        log::info!(
            "loaded dataset: {} systems x {} topics",
            dataset.number_of_systems(),
            dataset.number_of_topics()
        );
        Ok(dataset)
    }

    /// Opens and parses a dataset file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    pub fn number_of_systems(&self) -> usize {
        self.system_labels.len()
    }

    pub fn number_of_topics(&self) -> usize {
        self.topic_labels.len()
    }

    pub fn system_labels(&self) -> &[String] {
        &self.system_labels
    }

    pub fn topic_labels(&self) -> &[String] {
        &self.topic_labels
    }

    /// AP values of one system, aligned with [`topic_labels`](Self::topic_labels).
    ///
    /// # Panics
    ///
    /// Panics if `system` is not below [`number_of_systems`](Self::number_of_systems).
    pub fn row(&self, system: usize) -> &[f64] {
        let n = self.number_of_topics();
        &self.ap[system * n..(system + 1) * n]
    }

    /// Full-topic MAP, one value per system.
    pub fn map(&self) -> &[f64] {
        &self.map
    }

    /// Per-system MAP restricted to the topics where `selected[i]` is true.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidInput`] if the mask length differs from the number of
    /// topics or selects no topic at all.
    pub fn reduced_map(&self, selected: &[bool]) -> Result<Vec<f64>> {
        if selected.len() != self.number_of_topics() {
            return Err(Error::InvalidInput(format!(
                "topic mask has {} entries, expected {}",
                selected.len(),
                self.number_of_topics()
            )));
        }
        let cardinality = selected.iter().filter(|&&s| s).count();
        if cardinality == 0 {
            return Err(Error::InvalidInput(
                "a topic subset must select at least one topic".into(),
            ));
        }

        Ok((0..self.number_of_systems())
            .map(|s| {
                let sum: f64 = self
                    .row(s)
                    .iter()
                    .zip(selected)
                    .filter(|(_, &on)| on)
                    .map(|(&ap, _)| ap)
                    .sum();
                sum / cardinality as f64
            })
            .collect())
    }
}

fn csv_error(err: csv::Error) -> Error {
    let message = err.to_string();
    match err.into_kind() {
        csv::ErrorKind::Io(io) => Error::Io(io),
        _ => Error::InvalidInput(format!("malformed CSV: {message}")),
    }
}

fn ensure_unique(kind: &str, labels: &[String]) -> Result<()> {
    let mut seen = HashSet::with_capacity(labels.len());
    for label in labels {
        if !seen.insert(label.as_str()) {
            return Err(Error::InvalidInput(format!(
                "duplicate {kind} label '{label}'"
            )));
        }
    }
    Ok(())
}
