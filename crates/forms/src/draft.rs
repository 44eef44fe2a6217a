//! Mutable values captured while composing a record, plus the derived
//! completion progress.

use std::collections::HashMap;

use indexmap::IndexMap;

use crate::schema::FormSchema;

/// Values captured for the currently selected form type.
///
/// Keys are field names; all values are kept as entered (strings). The draft
/// is cleared when the form type changes and after a successful submission.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Draft {
    values: HashMap<String, String>,
}

impl Draft {
    /// Set (or replace) the value for a field.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
    }

    /// Get the value for a field (if any was captured).
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(|s| s.as_str())
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Replace the captured values wholesale (used when loading a record
    /// back into the draft for editing).
    pub fn load<I, K, V>(&mut self, values: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.values = values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
    }

    /// Completion percentage against `schema`: the share of fields with a
    /// non-empty value, over the schema's total field count, rounded to the
    /// nearest integer. Every field counts, not only required ones. An empty
    /// schema yields 0.
    pub fn progress(&self, schema: &FormSchema) -> u8 {
        let total = schema.field_count();
        if total == 0 {
            return 0;
        }
        let filled = schema
            .fields
            .iter()
            .filter(|f| self.get_value(&f.name).is_some_and(|v| !v.is_empty()))
            .count();
        ((filled as f64 / total as f64) * 100.0).round() as u8
    }

    /// Materialize the draft against `schema`: every schema field present in
    /// schema order, untouched fields as empty strings. Values for names
    /// outside the schema are dropped here, which keeps stored records
    /// rectangular per form type.
    pub fn snapshot(&self, schema: &FormSchema) -> IndexMap<String, String> {
        schema
            .fields
            .iter()
            .map(|f| {
                let value = self.get_value(&f.name).unwrap_or("").to_string();
                (f.name.clone(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::schema::{FieldDef, FieldKind};

    fn three_fields() -> FormSchema {
        FormSchema::new(
            "Person",
            vec![
                FieldDef::new("firstName", "First Name", FieldKind::Text).required(),
                FieldDef::new("lastName", "Last Name", FieldKind::Text).required(),
                FieldDef::new("age", "Age", FieldKind::Number),
            ],
        )
    }

    #[test]
    fn fresh_draft_has_zero_progress() {
        let draft = Draft::default();
        assert_eq!(draft.progress(&three_fields()), 0);
    }

    #[test]
    fn two_of_three_rounds_to_67() {
        let schema = three_fields();
        let mut draft = Draft::default();
        draft.set_value("firstName", "Ada");
        draft.set_value("lastName", "Lovelace");
        assert_eq!(draft.progress(&schema), 67);
    }

    #[test]
    fn one_of_three_rounds_to_33() {
        let schema = three_fields();
        let mut draft = Draft::default();
        draft.set_value("firstName", "Ada");
        assert_eq!(draft.progress(&schema), 33);
    }

    #[test]
    fn all_fields_filled_reach_exactly_100() {
        let schema = three_fields();
        let mut draft = Draft::default();
        draft.set_value("firstName", "Ada");
        draft.set_value("lastName", "Lovelace");
        draft.set_value("age", "36");
        assert_eq!(draft.progress(&schema), 100);
    }

    #[test]
    fn progress_is_monotonic_in_any_fill_order() {
        let schema = three_fields();
        for order in [
            ["age", "firstName", "lastName"],
            ["lastName", "age", "firstName"],
            ["firstName", "lastName", "age"],
        ] {
            let mut draft = Draft::default();
            let mut last = draft.progress(&schema);
            for name in order {
                draft.set_value(name, "x");
                let next = draft.progress(&schema);
                assert!(next >= last, "progress regressed: {next} < {last}");
                last = next;
            }
            assert_eq!(last, 100);
        }
    }

    #[test]
    fn empty_values_do_not_count_as_filled() {
        let schema = three_fields();
        let mut draft = Draft::default();
        draft.set_value("firstName", "");
        assert_eq!(draft.progress(&schema), 0);
    }

    #[test]
    fn empty_schema_clamps_to_zero() {
        let schema = FormSchema::new("Empty", vec![]);
        let mut draft = Draft::default();
        draft.set_value("stray", "value");
        assert_eq!(draft.progress(&schema), 0);
    }

    #[test]
    fn unknown_names_do_not_affect_progress() {
        let schema = three_fields();
        let mut draft = Draft::default();
        draft.set_value("nickname", "countess");
        assert_eq!(draft.progress(&schema), 0);
    }

    #[test]
    fn snapshot_materializes_all_fields_in_schema_order() {
        let schema = three_fields();
        let mut draft = Draft::default();
        draft.set_value("lastName", "Lovelace");
        draft.set_value("firstName", "Ada");

        let snapshot = draft.snapshot(&schema);
        let pairs: Vec<_> = snapshot
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("firstName", "Ada"), ("lastName", "Lovelace"), ("age", "")]
        );
    }
}
