use color_eyre::eyre::Result;
use forms::FormController;

/// Which region of the screen receives navigation keys.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    #[default]
    Form,
    Records,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Form => Focus::Records,
            Focus::Records => Focus::Form,
        }
    }
}

#[derive(Default, PartialEq)]
pub enum InputMode {
    #[default]
    Normal,
    Insert,
}

/// Severity of the footer status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Error,
}

pub struct State {
    pub controller: FormController,
    pub input_mode: InputMode,
    pub focus: Focus,
    pub status: Option<(StatusLevel, String)>,
}

impl State {
    pub fn new() -> Result<Self> {
        Ok(Self {
            controller: FormController::default(),
            input_mode: InputMode::Normal,
            focus: Focus::Form,
            status: None,
        })
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.status = Some((StatusLevel::Info, message.into()));
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.status = Some((StatusLevel::Error, message.into()));
    }
}
