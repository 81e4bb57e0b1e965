//! Variable bindings: an insertion-ordered snapshot of named financial values.
//!
//! The evaluator substitutes bindings in iteration order, so the order must
//! be deterministic. [`Bindings`] keeps entries in insertion order and
//! deserializes maps in document order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Known financial variable names.
///
/// Advisory only: evaluation uses whatever names the bindings carry.
pub const FINANCIAL_VARIABLES: &[&str] = &[
    "Revenue",
    "Operating_Cash_Flow",
    "Total_Debt",
    "Employee_Count",
    "EBITDA",
    "Net_Income",
    "Total_Assets",
    "Shareholders_Equity",
];

/// One subject's financial snapshot: variable name -> value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Bindings {
    entries: IndexMap<String, f64>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// The demo snapshot used when no bindings are supplied.
    pub fn sample() -> Self {
        Self::from_iter([
            ("Revenue", 240_893.0),
            ("Operating_Cash_Flow", 42_150.0),
            ("Total_Debt", 12_340.0),
            ("Employee_Count", 608_000.0),
            ("EBITDA", 68_450.0),
            ("Net_Income", 23_580.0),
            ("Total_Assets", 186_750.0),
            ("Shareholders_Equity", 68_950.0),
        ])
    }

    /// Inserts or replaces a value. A replaced entry keeps its position.
    ///
    /// Returns the previous value, if any.
    pub fn insert(&mut self, name: impl Into<String>, value: f64) -> Option<f64> {
        self.entries.insert(name.into(), value)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), *v))
    }

    /// Variable names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Keeps only the entries for which `keep` returns `true`, preserving order.
    pub fn filtered<F>(&self, mut keep: F) -> Self
    where
        F: FnMut(&str, f64) -> bool,
    {
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(n, v)| keep(n.as_str(), **v))
                .map(|(n, v)| (n.clone(), *v))
                .collect(),
        }
    }
}

impl<K: Into<String>> FromIterator<(K, f64)> for Bindings {
    fn from_iter<I: IntoIterator<Item = (K, f64)>>(iter: I) -> Self {
        let mut bindings = Self::new();
        bindings.extend(iter);
        bindings
    }
}

impl<K: Into<String>> Extend<(K, f64)> for Bindings {
    fn extend<I: IntoIterator<Item = (K, f64)>>(&mut self, iter: I) {
        self.entries
            .extend(iter.into_iter().map(|(k, v)| (k.into(), v)));
    }
}
