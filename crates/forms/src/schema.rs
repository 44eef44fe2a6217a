//! Field and schema definitions.
//!
//! A [`FormSchema`] is a named, ordered collection of [`FieldDef`]s. Schemas
//! are declarative and immutable once built; runtime values live in
//! [`crate::draft::Draft`].

use serde::{Deserialize, Serialize};
use strum::Display;

/// A single input kind supported by the form renderer.
///
/// Notes:
/// - Text / Number / Secret / Date render as single-line editors
/// - Secret is only obfuscated visually; the value is kept plain in the draft
/// - Date carries no parsing rules here; the editor merely hints the format
/// - Select offers a closed choice ring with a leading "unselected" entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum FieldKind {
    Text,
    Number,
    Secret,
    Date,
    Select { options: Vec<String> },
}

impl FieldKind {
    /// Returns true if this kind uses a free-text editor when focused.
    pub fn is_textual(&self) -> bool {
        matches!(
            self,
            FieldKind::Text | FieldKind::Number | FieldKind::Secret | FieldKind::Date
        )
    }

    /// Returns true if this kind is a closed choice control.
    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::Select { .. })
    }
}

/// Declarative description of a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDef {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDef {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
        }
    }

    /// Mark the field as mandatory for submission.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Declarative schema for a multi-field form.
///
/// Invariant: field names are unique within a schema. Schemas are built from
/// static catalog data, so a duplicate name is a programming error and panics
/// at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormSchema {
    pub title: String,
    pub fields: Vec<FieldDef>,
}

impl FormSchema {
    pub fn new(title: impl Into<String>, fields: Vec<FieldDef>) -> Self {
        let schema = Self {
            title: title.into(),
            fields,
        };
        for (i, field) in schema.fields.iter().enumerate() {
            let dup = schema.fields[..i].iter().any(|f| f.name == field.name);
            assert!(
                !dup,
                "duplicate field name {:?} in schema {:?}",
                field.name, schema.title
            );
        }
        schema
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Find a field by its name.
    pub fn field(&self, name: &str) -> Option<&FieldDef> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Names of all fields marked required, in schema order.
    pub fn required_names(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FormSchema {
        FormSchema::new(
            "Sample",
            vec![
                FieldDef::new("alpha", "Alpha", FieldKind::Text).required(),
                FieldDef::new("beta", "Beta", FieldKind::Number),
            ],
        )
    }

    #[test]
    fn field_lookup_by_name() {
        let schema = sample();
        assert_eq!(schema.field("alpha").unwrap().label, "Alpha");
        assert!(schema.field("gamma").is_none());
    }

    #[test]
    fn required_names_keep_schema_order() {
        let schema = FormSchema::new(
            "Sample",
            vec![
                FieldDef::new("a", "A", FieldKind::Text).required(),
                FieldDef::new("b", "B", FieldKind::Text),
                FieldDef::new("c", "C", FieldKind::Text).required(),
            ],
        );
        let required: Vec<_> = schema.required_names().collect();
        assert_eq!(required, vec!["a", "c"]);
    }

    #[test]
    #[should_panic(expected = "duplicate field name")]
    fn duplicate_field_names_panic() {
        FormSchema::new(
            "Broken",
            vec![
                FieldDef::new("alpha", "Alpha", FieldKind::Text),
                FieldDef::new("alpha", "Alpha again", FieldKind::Text),
            ],
        );
    }

    #[test]
    fn textual_and_choice_predicates() {
        assert!(FieldKind::Text.is_textual());
        assert!(FieldKind::Secret.is_textual());
        assert!(FieldKind::Date.is_textual());
        assert!(!FieldKind::Select { options: vec![] }.is_textual());
        assert!(FieldKind::Select { options: vec![] }.is_choice());
    }
}
