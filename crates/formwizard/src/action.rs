use forms::RecordId;
use serde::{Deserialize, Serialize};
use strum::Display;

#[derive(Debug, Clone, PartialEq, Serialize, Display, Deserialize)]
pub enum Action {
    Tick,
    Render,
    Resize(u16, u16),
    Suspend,
    Resume,
    Quit,
    Error(String),
    FocusNext,
    FocusPrev,
    Update,
    /// Open the modal picker listing the catalog's form types.
    OpenTypePicker,
    ClosePopup,
    SelectFormType(String),
    FieldChanged { name: String, value: String },
    Submit,
    EditRecord(RecordId),
    DeleteRecord { form_type: String, id: RecordId },
    StatusInfo(String),
}
