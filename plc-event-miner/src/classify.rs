//! Column type classification
//!
//! The first pass over a readings table. Every column gets a [`Kind`]
//! computed from the set of distinct values it holds, ignoring the
//! not-sampled sentinel. The result only depends on that set, never on row
//! order.

use crate::config::MinerConfig;
use crate::formats::TabularSource;
use crate::types::Kind;
use serde::Serialize;
use std::collections::HashSet;

/// Name, position and kind of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnInfo {
    pub index: usize,
    pub name: String,
    pub kind: Kind,
}

/// Outcome of classifying every column of a table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Classification {
    columns: Vec<ColumnInfo>,
    /// Indices of Boolean and Scalar columns, in column order
    interesting: Vec<usize>,
}

impl Classification {
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    pub fn kind(&self, index: usize) -> Option<Kind> {
        self.columns.get(index).map(|c| c.kind)
    }

    /// Columns that take part in mining
    pub fn interesting(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.interesting.iter().filter_map(|&i| self.columns.get(i))
    }

    /// Columns whose type could not be resolved
    pub fn unresolved(&self) -> impl Iterator<Item = &ColumnInfo> {
        self.columns.iter().filter(|c| c.kind == Kind::Unresolved)
    }

    /// Number of columns of the given kind
    pub fn count(&self, kind: Kind) -> usize {
        self.columns.iter().filter(|c| c.kind == kind).count()
    }
}

/// Assigns a kind to each column of a table
pub struct TypeClassifier<'a> {
    config: &'a MinerConfig,
}

impl<'a> TypeClassifier<'a> {
    pub fn new(config: &'a MinerConfig) -> Self {
        Self { config }
    }

    /// Classify every column of `source`
    ///
    /// Unresolved columns are reported but never stop the pass. The
    /// timestamp column is never considered interesting.
    pub fn classify<S: TabularSource + ?Sized>(&self, source: &S) -> Classification {
        let names = source.column_names();
        let mut values: Vec<HashSet<&str>> = vec![HashSet::new(); names.len()];

        for record in source.records() {
            for (set, value) in values.iter_mut().zip(record.iter()) {
                if self.config.is_sampled(value) {
                    set.insert(value.as_str());
                }
            }
        }

        let columns: Vec<ColumnInfo> = names
            .iter()
            .zip(values.iter())
            .enumerate()
            .map(|(index, (name, set))| ColumnInfo {
                index,
                name: name.clone(),
                kind: resolve_kind(set),
            })
            .collect();

        let unresolved: Vec<&ColumnInfo> =
            columns.iter().filter(|c| c.kind == Kind::Unresolved).collect();
        if !unresolved.is_empty() {
            log::warn!("Columns whose type is not resolved:");
            for column in &unresolved {
                log::warn!("* {}: {}", column.index, column.name);
            }
        }

        let interesting: Vec<usize> = columns
            .iter()
            .filter(|c| c.kind.is_interesting() && c.name != self.config.timestamp_column)
            .map(|c| c.index)
            .collect();

        for column in &columns {
            log::debug!("Column {} '{}' is {}", column.index, column.name, column.kind);
        }
        log::info!(
            "Classified {} columns: {} interesting, {} unresolved",
            columns.len(),
            interesting.len(),
            unresolved.len()
        );

        Classification {
            columns,
            interesting,
        }
    }
}

/// Kind of a column from its set of distinct sampled values
pub fn resolve_kind(values: &HashSet<&str>) -> Kind {
    if values.len() == 1 {
        return Kind::Negligible;
    }
    if values.len() == 2
        && ((values.contains("1.0") && values.contains("0.0"))
            || (values.contains("1") && values.contains("0")))
    {
        return Kind::Boolean;
    }
    if values.iter().all(|v| is_number(v)) {
        Kind::Scalar
    } else {
        Kind::Unresolved
    }
}

/// Whether a raw value parses as a finite float
pub fn is_number(value: &str) -> bool {
    value
        .trim()
        .parse::<f64>()
        .map(f64::is_finite)
        .unwrap_or(false)
}
