//! Ordered frequency counts

use std::collections::{HashMap, HashSet};
use std::fmt;

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::Value;

use crate::table::{cell_key, cell_text};

/// Value-to-count tally, ordered by count descending. Ties keep the order in
/// which values were first seen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frequencies {
    entries: Vec<(String, usize)>,
}

impl Frequencies {
    /// Tally plain labels
    pub fn tally<I>(values: I) -> Self
    where
        I: IntoIterator<Item = String>,
    {
        Self::tally_keyed(values.into_iter().map(|v| (v.clone(), v)))
    }

    /// Tally JSON cells, skipping nulls.
    ///
    /// Cells group by type-aware key, so `true` and `"true"` stay apart. Labels
    /// are the plain cell text unless two groups would print the same, in
    /// which case both fall back to their JSON form.
    pub fn tally_values<'a, I>(values: I) -> Self
    where
        I: IntoIterator<Item = &'a Value>,
    {
        Self::tally_keyed(
            values
                .into_iter()
                .filter_map(|v| Some((cell_key(v), cell_text(v)?))),
        )
    }

    fn tally_keyed<I>(values: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut positions: HashMap<String, usize> = HashMap::new();
        // (key, label, count)
        let mut groups: Vec<(String, String, usize)> = Vec::new();

        for (key, label) in values {
            match positions.get(&key) {
                Some(&pos) => groups[pos].2 += 1,
                None => {
                    positions.insert(key.clone(), groups.len());
                    groups.push((key, label, 1));
                }
            }
        }

        let mut label_uses: HashMap<&str, usize> = HashMap::new();
        for (_, label, _) in &groups {
            *label_uses.entry(label.as_str()).or_default() += 1;
        }
        let ambiguous: HashSet<String> = label_uses
            .into_iter()
            .filter(|(_, uses)| *uses > 1)
            .map(|(label, _)| label.to_string())
            .collect();

        let mut entries: Vec<(String, usize)> = groups
            .into_iter()
            .map(|(key, label, count)| {
                if ambiguous.contains(&label) {
                    (key, count)
                } else {
                    (label, count)
                }
            })
            .collect();

        // Stable sort keeps first-seen order among equal counts
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        Self { entries }
    }

    pub fn entries(&self) -> &[(String, usize)] {
        &self.entries
    }

    pub fn get(&self, value: &str) -> Option<usize> {
        self.entries
            .iter()
            .find(|(v, _)| v == value)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, count)| count).sum()
    }
}

impl fmt::Display for Frequencies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (value, count)) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}: {}", value, count)?;
        }
        write!(f, "}}")
    }
}

impl Serialize for Frequencies {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (value, count) in &self.entries {
            map.serialize_entry(value, count)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tally(values: &[&str]) -> Frequencies {
        Frequencies::tally(values.iter().map(|v| v.to_string()))
    }

    #[test]
    fn test_tally_orders_by_count_then_first_seen() {
        let freq = tally(&["b", "a", "c", "a", "c", "a"]);
        assert_eq!(
            freq.entries(),
            &[
                ("a".to_string(), 3),
                ("c".to_string(), 2),
                ("b".to_string(), 1)
            ]
        );
        assert_eq!(freq.total(), 6);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let freq = tally(&["x", "y", "z"]);
        let order: Vec<_> = freq.entries().iter().map(|(v, _)| v.as_str()).collect();
        assert_eq!(order, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_tally_values_keeps_json_types_apart() {
        let values = [json!(true), json!("true"), json!(1), json!("1"), json!(true), Value::Null];
        let freq = Frequencies::tally_values(values.iter());

        assert_eq!(freq.len(), 4);
        assert_eq!(freq.total(), 5);
        assert_eq!(freq.get("true"), Some(2));
        assert_eq!(freq.get("\"true\""), Some(1));
        assert_eq!(freq.get("1"), Some(1));
        assert_eq!(freq.get("\"1\""), Some(1));
    }

    #[test]
    fn test_tally_values_uses_plain_labels_when_unambiguous() {
        let values = [json!("WI"), json!("IL"), json!("WI"), json!(false)];
        let freq = Frequencies::tally_values(values.iter());
        assert_eq!(freq.to_string(), "{WI: 2, IL: 1, false: 1}");
    }

    #[test]
    fn test_display() {
        assert_eq!(tally(&["WI", "WI", "IL"]).to_string(), "{WI: 2, IL: 1}");
        assert_eq!(Frequencies::default().to_string(), "{}");
    }

    #[test]
    fn test_serializes_as_ordered_map() {
        let json = serde_json::to_string(&tally(&["b", "a", "a"])).unwrap();
        assert_eq!(json, r#"{"a":2,"b":1}"#);
    }
}
