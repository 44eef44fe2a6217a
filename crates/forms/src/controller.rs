//! Central owner of all mutable form state.
//!
//! The controller holds the selected form type with its schema, the draft,
//! the editing marker and the record store. The UI reads through accessors
//! and mutates exclusively through the operations below; nothing else in the
//! workspace touches this state.

use tracing::debug;

use crate::catalog::SchemaCatalog;
use crate::draft::Draft;
use crate::errors::FormError;
use crate::schema::FormSchema;
use crate::store::{RecordId, RecordStore};

/// State scoped to the currently selected form type. Dropped wholesale when
/// the selection changes.
#[derive(Debug, Clone)]
struct ActiveForm {
    form_type: String,
    schema: FormSchema,
    draft: Draft,
    editing: Option<RecordId>,
    progress: u8,
}

pub struct FormController {
    catalog: SchemaCatalog,
    active: Option<ActiveForm>,
    store: RecordStore,
}

impl FormController {
    pub fn new(catalog: SchemaCatalog) -> Self {
        Self {
            catalog,
            active: None,
            store: RecordStore::new(),
        }
    }

    pub fn catalog(&self) -> &SchemaCatalog {
        &self.catalog
    }

    pub fn type_names(&self) -> Vec<String> {
        self.catalog.type_names()
    }

    pub fn form_type(&self) -> Option<&str> {
        self.active.as_ref().map(|a| a.form_type.as_str())
    }

    pub fn schema(&self) -> Option<&FormSchema> {
        self.active.as_ref().map(|a| &a.schema)
    }

    /// Draft value for `name`, if one was captured.
    pub fn value_of(&self, name: &str) -> Option<&str> {
        self.active.as_ref().and_then(|a| a.draft.get_value(name))
    }

    /// Completion percentage of the current draft; 0 without a selection.
    pub fn progress(&self) -> u8 {
        self.active.as_ref().map(|a| a.progress).unwrap_or(0)
    }

    pub fn editing(&self) -> Option<RecordId> {
        self.active.as_ref().and_then(|a| a.editing)
    }

    pub fn is_editing(&self) -> bool {
        self.editing().is_some()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// Switch to the form type `name`. Fails for unknown names and leaves the
    /// current selection untouched in that case. On success the draft, the
    /// editing marker and the progress all reset.
    pub async fn select_form_type(&mut self, name: &str) -> Result<(), FormError> {
        let schema = self.catalog.fetch(name).await?;
        debug!(form_type = name, "form type selected");
        self.active = Some(ActiveForm {
            form_type: name.to_string(),
            schema,
            draft: Draft::default(),
            editing: None,
            progress: 0,
        });
        Ok(())
    }

    /// Merge a single field value into the draft and recompute progress.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) -> Result<(), FormError> {
        let active = self.active.as_mut().ok_or(FormError::NoFormSelected)?;
        active.draft.set_value(name, value);
        active.progress = active.draft.progress(&active.schema);
        Ok(())
    }

    /// Store the draft. Every required field must carry a non-empty value;
    /// the error lists the offenders in schema order. While editing, the
    /// matching record is replaced in place (identifier and position kept);
    /// otherwise a new record is appended under the current type. On success
    /// the draft, editing marker and progress reset, and the id of the
    /// stored record is returned.
    pub fn submit(&mut self) -> Result<RecordId, FormError> {
        let active = self.active.as_mut().ok_or(FormError::NoFormSelected)?;

        let missing: Vec<String> = active
            .schema
            .required_names()
            .filter(|name| {
                active
                    .draft
                    .get_value(name)
                    .map_or(true, |v| v.is_empty())
            })
            .map(str::to_string)
            .collect();
        if !missing.is_empty() {
            return Err(FormError::MissingRequired(missing));
        }

        let values = active.draft.snapshot(&active.schema);
        let id = match active.editing {
            Some(id) => {
                // The edited record can have been deleted in the meantime;
                // surface that instead of silently dropping the update.
                if !self.store.replace(&active.form_type, id, values) {
                    return Err(FormError::RecordNotFound(id));
                }
                debug!(form_type = %active.form_type, record = %id, "record updated");
                id
            }
            None => {
                let id = self.store.insert(&active.form_type, values);
                debug!(form_type = %active.form_type, record = %id, "record stored");
                id
            }
        };

        active.draft.clear();
        active.editing = None;
        active.progress = 0;
        Ok(id)
    }

    /// Load the record with `id` from the current type's list into the draft
    /// and mark it as being edited. Progress reflects the loaded values.
    pub fn edit(&mut self, id: RecordId) -> Result<(), FormError> {
        let active = self.active.as_mut().ok_or(FormError::NoFormSelected)?;
        let record = self
            .store
            .get(&active.form_type, id)
            .ok_or(FormError::RecordNotFound(id))?;

        active
            .draft
            .load(record.values.iter().map(|(k, v)| (k.clone(), v.clone())));
        active.editing = Some(id);
        active.progress = active.draft.progress(&active.schema);
        debug!(form_type = %active.form_type, record = %id, "editing record");
        Ok(())
    }

    /// Remove the record with `id` from `form_type`'s list. Absent records
    /// and unknown types are a no-op, not an error. The draft and editing
    /// marker stay as they are; a submit whose edited record was deleted
    /// reports `RecordNotFound`.
    pub fn delete(&mut self, form_type: &str, id: RecordId) {
        debug!(form_type, record = %id, "deleting record");
        self.store.remove(form_type, id);
    }
}

impl Default for FormController {
    fn default() -> Self {
        Self::new(SchemaCatalog::builtin())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{ADDRESS_INFORMATION, USER_INFORMATION};

    async fn user_form() -> FormController {
        let mut controller = FormController::default();
        controller.select_form_type(USER_INFORMATION).await.unwrap();
        controller
    }

    #[tokio::test]
    async fn untouched_submit_fails_for_every_builtin_type() {
        let mut controller = FormController::default();
        for name in controller.type_names() {
            controller.select_form_type(&name).await.unwrap();
            match controller.submit() {
                Err(FormError::MissingRequired(missing)) => {
                    assert!(!missing.is_empty(), "{name} reported no missing fields")
                }
                other => panic!("{name}: expected missing-required, got {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn missing_required_lists_offenders_in_schema_order() {
        let mut controller = user_form().await;
        controller.update_field("lastName", "Lovelace").unwrap();
        let err = controller.submit().unwrap_err();
        assert_eq!(err, FormError::MissingRequired(vec!["firstName".into()]));
    }

    #[tokio::test]
    async fn optional_fields_may_stay_blank() {
        let mut controller = user_form().await;
        controller.update_field("firstName", "Ada").unwrap();
        controller.update_field("lastName", "Lovelace").unwrap();
        assert_eq!(controller.progress(), 67);

        let id = controller.submit().unwrap();

        let records = controller.store().records_for(USER_INFORMATION);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, id);
        let pairs: Vec<_> = records[0]
            .values
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![("firstName", "Ada"), ("lastName", "Lovelace"), ("age", "")]
        );

        // Submission resets the composition state.
        assert_eq!(controller.progress(), 0);
        assert_eq!(controller.value_of("firstName"), None);
        assert!(!controller.is_editing());
    }

    #[tokio::test]
    async fn repeated_submissions_get_distinct_ids_in_order() {
        let mut controller = user_form().await;
        controller.update_field("firstName", "Ada").unwrap();
        controller.update_field("lastName", "Lovelace").unwrap();
        let first = controller.submit().unwrap();

        controller.update_field("firstName", "Grace").unwrap();
        controller.update_field("lastName", "Hopper").unwrap();
        let second = controller.submit().unwrap();

        assert_ne!(first, second);
        let records = controller.store().records_for(USER_INFORMATION);
        assert_eq!(records[0].id, first);
        assert_eq!(records[1].id, second);
    }

    #[tokio::test]
    async fn edit_then_submit_replaces_in_place() {
        let mut controller = user_form().await;
        controller.update_field("firstName", "Ada").unwrap();
        controller.update_field("lastName", "Lovelace").unwrap();
        let first = controller.submit().unwrap();

        controller.update_field("firstName", "Grace").unwrap();
        controller.update_field("lastName", "Hopper").unwrap();
        controller.submit().unwrap();

        controller.edit(first).unwrap();
        assert!(controller.is_editing());
        assert_eq!(controller.value_of("firstName"), Some("Ada"));
        assert_eq!(controller.progress(), 67);

        controller.update_field("age", "36").unwrap();
        let resubmitted = controller.submit().unwrap();
        assert_eq!(resubmitted, first);

        let records = controller.store().records_for(USER_INFORMATION);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, first);
        assert_eq!(records[0].get("age"), Some("36"));
        assert_eq!(records[1].get("firstName"), Some("Grace"));
        assert!(!controller.is_editing());
    }

    #[tokio::test]
    async fn edit_of_unknown_record_fails() {
        let mut controller = user_form().await;
        let id = RecordId::new();
        assert_eq!(controller.edit(id), Err(FormError::RecordNotFound(id)));
        assert!(!controller.is_editing());
    }

    #[tokio::test]
    async fn delete_of_absent_record_changes_nothing() {
        let mut controller = user_form().await;
        controller.update_field("firstName", "Ada").unwrap();
        controller.update_field("lastName", "Lovelace").unwrap();
        controller.submit().unwrap();

        let before = controller.store().clone();
        controller.delete(USER_INFORMATION, RecordId::new());
        controller.delete("Shipping Information", RecordId::new());
        assert_eq!(controller.store(), &before);
    }

    #[tokio::test]
    async fn deleting_the_record_under_edit_surfaces_on_submit() {
        let mut controller = user_form().await;
        controller.update_field("firstName", "Ada").unwrap();
        controller.update_field("lastName", "Lovelace").unwrap();
        let id = controller.submit().unwrap();

        controller.edit(id).unwrap();
        controller.delete(USER_INFORMATION, id);

        assert_eq!(controller.submit(), Err(FormError::RecordNotFound(id)));
        // The draft survives so nothing typed is lost.
        assert_eq!(controller.value_of("firstName"), Some("Ada"));
        assert!(controller.is_editing());
    }

    #[tokio::test]
    async fn switching_type_resets_composition_state() {
        let mut controller = user_form().await;
        controller.update_field("firstName", "Ada").unwrap();
        controller.update_field("lastName", "Lovelace").unwrap();
        let id = controller.submit().unwrap();
        controller.edit(id).unwrap();
        assert!(controller.progress() > 0);

        controller
            .select_form_type(ADDRESS_INFORMATION)
            .await
            .unwrap();
        assert_eq!(controller.form_type(), Some(ADDRESS_INFORMATION));
        assert_eq!(controller.progress(), 0);
        assert!(!controller.is_editing());
        assert_eq!(controller.value_of("firstName"), None);

        // Stored records are unaffected by the switch.
        assert_eq!(controller.store().records_for(USER_INFORMATION).len(), 1);
    }

    #[tokio::test]
    async fn unknown_type_leaves_selection_untouched() {
        let mut controller = user_form().await;
        controller.update_field("firstName", "Ada").unwrap();

        let err = controller
            .select_form_type("Shipping Information")
            .await
            .unwrap_err();
        assert_eq!(
            err,
            FormError::UnknownFormType("Shipping Information".into())
        );
        assert_eq!(controller.form_type(), Some(USER_INFORMATION));
        assert_eq!(controller.value_of("firstName"), Some("Ada"));
    }

    #[test]
    fn operations_without_a_selection_are_rejected() {
        let mut controller = FormController::default();
        assert_eq!(
            controller.update_field("firstName", "Ada"),
            Err(FormError::NoFormSelected)
        );
        assert_eq!(controller.submit(), Err(FormError::NoFormSelected));
        assert_eq!(
            controller.edit(RecordId::new()),
            Err(FormError::NoFormSelected)
        );
        assert_eq!(controller.progress(), 0);
    }
}
