//! Result Collections
//!
//! [`RevisionResult`] holds the benchmarks of one revision and
//! [`CombinedResults`] lines up several revisions. Both keep insertion order,
//! because table rows and columns follow it.

use crate::stat::Stat;
use fxhash::FxHashMap;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors raised while reading a result set from JSON
#[derive(Debug, Error)]
pub enum StatError {
    /// The top-level value is not a JSON object
    #[error("Expected a JSON object of benchmark results, got {0}")]
    NotAnObject(&'static str),

    /// One benchmark entry has an unusable shape
    #[error("Invalid result for benchmark '{name}': {source}")]
    InvalidStat {
        /// Flattened benchmark name
        name: String,
        /// Underlying decode error
        #[source]
        source: serde_json::Error,
    },
}

/// Benchmarks of a single revision, in first-insertion order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevisionResult {
    entries: Vec<(String, Stat)>,
    index: FxHashMap<String, usize>,
}

impl RevisionResult {
    /// Empty result set
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a benchmark. A replaced benchmark keeps its position.
    pub fn insert(&mut self, name: impl Into<String>, stat: impl Into<Stat>) {
        let name = name.into();
        let stat = stat.into();
        match self.index.get(&name) {
            Some(&i) => self.entries[i].1 = stat,
            None => {
                self.index.insert(name.clone(), self.entries.len());
                self.entries.push((name, stat));
            }
        }
    }

    /// Builder form of [`insert`](Self::insert)
    pub fn with(mut self, name: impl Into<String>, stat: impl Into<Stat>) -> Self {
        self.insert(name, stat);
        self
    }

    /// Look up a benchmark by name
    pub fn get(&self, name: &str) -> Option<&Stat> {
        self.index.get(name).map(|&i| &self.entries[i].1)
    }

    /// Whether a benchmark is present
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Benchmark names in order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, stat)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stat)> {
        self.entries.iter().map(|(name, stat)| (name.as_str(), stat))
    }

    /// Number of benchmarks
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no benchmarks
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Build from a JSON object of benchmark results.
    ///
    /// Objects without a `"median"` key are benchmark groups; their members
    /// are flattened into `group/name` entries.
    pub fn from_json(value: Value) -> Result<Self, StatError> {
        let map = match value {
            Value::Object(map) => map,
            other => return Err(StatError::NotAnObject(json_kind(&other))),
        };

        let mut result = Self::new();
        result.flatten_group(None, map)?;
        Ok(result)
    }

    fn flatten_group(&mut self, prefix: Option<&str>, map: Map<String, Value>) -> Result<(), StatError> {
        for (key, value) in map {
            let name = match prefix {
                Some(prefix) => format!("{prefix}/{key}"),
                None => key,
            };

            match value {
                Value::Object(group) if !group.contains_key("median") => {
                    self.flatten_group(Some(&name), group)?;
                }
                value => {
                    let stat = serde_json::from_value::<Stat>(value).map_err(|source| {
                        StatError::InvalidStat {
                            name: name.clone(),
                            source,
                        }
                    })?;
                    self.insert(name, stat);
                }
            }
        }
        Ok(())
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<K: Into<String>, S: Into<Stat>> FromIterator<(K, S)> for RevisionResult {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let mut result = Self::new();
        for (name, stat) in iter {
            result.insert(name, stat);
        }
        result
    }
}

impl Serialize for RevisionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}

impl<'de> Deserialize<'de> for RevisionResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(value).map_err(D::Error::custom)
    }
}

/// Results of several revisions, in caller order.
///
/// The first revision is the baseline (numerator) of a ratio column.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CombinedResults {
    revisions: Vec<(String, RevisionResult)>,
}

impl CombinedResults {
    /// No revisions yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a revision, or replace the results of an existing label in place
    pub fn push(&mut self, label: impl Into<String>, result: RevisionResult) {
        let label = label.into();
        match self.revisions.iter_mut().find(|(l, _)| *l == label) {
            Some((_, existing)) => *existing = result,
            None => self.revisions.push((label, result)),
        }
    }

    /// Builder form of [`push`](Self::push)
    pub fn with(mut self, label: impl Into<String>, result: RevisionResult) -> Self {
        self.push(label, result);
        self
    }

    /// Results for one revision
    pub fn get(&self, label: &str) -> Option<&RevisionResult> {
        self.revisions
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, result)| result)
    }

    /// Revision labels in order
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.revisions.iter().map(|(label, _)| label.as_str())
    }

    /// `(label, results)` pairs in order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &RevisionResult)> {
        self.revisions
            .iter()
            .map(|(label, result)| (label.as_str(), result))
    }

    /// Number of revisions
    pub fn len(&self) -> usize {
        self.revisions.len()
    }

    /// Whether no revision has been added
    pub fn is_empty(&self) -> bool {
        self.revisions.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, RevisionResult)> for CombinedResults {
    fn from_iter<I: IntoIterator<Item = (K, RevisionResult)>>(iter: I) -> Self {
        let mut combined = Self::new();
        for (label, result) in iter {
            combined.push(label, result);
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stat::Distribution;
    use serde_json::json;

    #[test]
    fn test_insert_keeps_first_position() {
        let mut result = RevisionResult::new();
        result.insert("b", 1.0);
        result.insert("a", 2.0);
        result.insert("b", 3.0);

        assert_eq!(result.names().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(result.get("b"), Some(&Stat::Scalar(3.0)));
        assert_eq!(result.len(), 2);
    }

    #[test]
    fn test_from_json_preserves_order() {
        let result = RevisionResult::from_json(json!({
            "zeta": {"median": 1.0},
            "alpha": 2.0,
            "time_to_load": {"median": 0.5, "25": 0.4, "75": 0.6},
            "broken": null
        }))
        .unwrap();

        assert_eq!(
            result.names().collect::<Vec<_>>(),
            vec!["zeta", "alpha", "time_to_load", "broken"]
        );
        assert_eq!(result.get("broken"), Some(&Stat::Missing));
        assert_eq!(
            result.get("time_to_load"),
            Some(&Stat::Distribution(Distribution::new(0.5).with_quartiles(0.4, 0.6)))
        );
    }

    #[test]
    fn test_from_json_flattens_groups() {
        let result = RevisionResult::from_json(json!({
            "io": {
                "read": {"median": 1.0},
                "write": {"small": 2.0, "large": {"median": 3.0}}
            }
        }))
        .unwrap();

        assert_eq!(
            result.names().collect::<Vec<_>>(),
            vec!["io/read", "io/write/small", "io/write/large"]
        );
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            RevisionResult::from_json(json!([1, 2])),
            Err(StatError::NotAnObject("an array"))
        ));

        match RevisionResult::from_json(json!({"group": {"bad": "text"}})) {
            Err(StatError::InvalidStat { name, .. }) => assert_eq!(name, "group/bad"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_serde_round_trip_through_value() {
        let result = RevisionResult::new()
            .with("a", Distribution::new(1.0))
            .with("b", Stat::Missing);
        let value = serde_json::to_value(&result).unwrap();
        assert_eq!(value, json!({"a": {"median": 1.0}, "b": null}));

        let back: RevisionResult = serde_json::from_value(value).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn test_combined_order_and_replace() {
        let mut combined = CombinedResults::new();
        combined.push("main", RevisionResult::new().with("a", 1.0));
        combined.push("dirty", RevisionResult::new());
        combined.push("main", RevisionResult::new().with("a", 2.0));

        assert_eq!(combined.labels().collect::<Vec<_>>(), vec!["main", "dirty"]);
        assert_eq!(
            combined.get("main").and_then(|r| r.get("a")),
            Some(&Stat::Scalar(2.0))
        );
        assert_eq!(combined.len(), 2);
    }
}
