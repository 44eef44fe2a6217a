//! In-memory record storage, keyed by form type.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a stored record. Generated once on insertion and preserved
/// across edits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecordId(Uuid);

impl RecordId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A submitted draft snapshot. Field order follows the schema the record was
/// captured under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub values: IndexMap<String, String>,
}

impl Record {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    /// Field names in capture order (the identifier is not among them).
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(|s| s.as_str())
    }
}

/// Records grouped by form type. Type keys keep first-insertion order, record
/// lists keep submission order. Lives for the session only.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordStore {
    records: IndexMap<String, Vec<Record>>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new record under `form_type` and return its generated id.
    pub fn insert(&mut self, form_type: &str, values: IndexMap<String, String>) -> RecordId {
        let record = Record {
            id: RecordId::new(),
            values,
        };
        let id = record.id;
        self.records
            .entry(form_type.to_string())
            .or_default()
            .push(record);
        id
    }

    /// Replace the values of the record with `id` under `form_type`, keeping
    /// its identifier and position. Returns false when no such record exists.
    pub fn replace(
        &mut self,
        form_type: &str,
        id: RecordId,
        values: IndexMap<String, String>,
    ) -> bool {
        let Some(list) = self.records.get_mut(form_type) else {
            return false;
        };
        match list.iter_mut().find(|r| r.id == id) {
            Some(record) => {
                record.values = values;
                true
            }
            None => false,
        }
    }

    /// Remove the record with `id` from `form_type`'s list. Removing an
    /// absent record (or an unknown type) is a no-op.
    pub fn remove(&mut self, form_type: &str, id: RecordId) {
        if let Some(list) = self.records.get_mut(form_type) {
            list.retain(|r| r.id != id);
        }
    }

    pub fn get(&self, form_type: &str, id: RecordId) -> Option<&Record> {
        self.records
            .get(form_type)?
            .iter()
            .find(|r| r.id == id)
    }

    /// Records submitted under `form_type`, in insertion order.
    pub fn records_for(&self, form_type: &str) -> &[Record] {
        self.records
            .get(form_type)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Form types that have received at least one submission, in the order
    /// the first submission of each type arrived. Types whose records were
    /// all deleted still appear with an empty list.
    pub fn form_types(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(|s| s.as_str())
    }

    /// Total number of stored records across all types.
    pub fn len(&self) -> usize {
        self.records.values().map(|v| v.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn values(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn insert_appends_in_submission_order() {
        let mut store = RecordStore::new();
        let first = store.insert("People", values(&[("name", "Ada")]));
        let second = store.insert("People", values(&[("name", "Grace")]));

        let records = store.records_for("People");
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first);
        assert_eq!(records[1].id, second);
        assert_ne!(first, second);
    }

    #[test]
    fn replace_keeps_id_and_position() {
        let mut store = RecordStore::new();
        store.insert("People", values(&[("name", "Ada")]));
        let target = store.insert("People", values(&[("name", "Grace")]));
        store.insert("People", values(&[("name", "Edsger")]));

        assert!(store.replace("People", target, values(&[("name", "Grace Hopper")])));

        let records = store.records_for("People");
        assert_eq!(records[1].id, target);
        assert_eq!(records[1].get("name"), Some("Grace Hopper"));
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn replace_of_absent_record_reports_false() {
        let mut store = RecordStore::new();
        store.insert("People", values(&[("name", "Ada")]));
        assert!(!store.replace("People", RecordId::new(), values(&[])));
        assert!(!store.replace("Nowhere", RecordId::new(), values(&[])));
    }

    #[test]
    fn remove_of_absent_record_is_a_noop() {
        let mut store = RecordStore::new();
        let id = store.insert("People", values(&[("name", "Ada")]));
        let before = store.clone();

        store.remove("People", RecordId::new());
        store.remove("Nowhere", id);
        assert_eq!(store, before);

        store.remove("People", id);
        assert!(store.records_for("People").is_empty());
    }

    #[test]
    fn form_types_keep_first_insertion_order() {
        let mut store = RecordStore::new();
        store.insert("Payment", values(&[]));
        store.insert("People", values(&[]));
        store.insert("Payment", values(&[]));

        let types: Vec<_> = store.form_types().collect();
        assert_eq!(types, vec!["Payment", "People"]);
        assert_eq!(store.len(), 3);
    }
}
