use std::fmt;

use crate::error::{FormError, Rejection};
use crate::model::record::Record;
use crate::model::upload::SelectedFile;

/// Where the form stands in the extract → edit → save cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Nothing accepted yet, or the last extraction failed. Buffer locked.
    #[default]
    Idle,
    Extracting,
    /// An extraction was accepted; the buffer is editable.
    Editable,
    Saving,
    /// Every record was stored. Buffer locked until `return_to_start`.
    Success,
}

/// The message shown in the inline message area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Error(FormError),
    Reminder(Rejection),
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Error(err) => err.fmt(f),
            Notice::Reminder(rejection) => rejection.fmt(f),
        }
    }
}

/// Complete state of the intake form.
///
/// Fields are private so that every change goes through a transition in
/// `workflow::transitions`; the accessors expose what the view renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormState {
    pub(crate) phase: Phase,
    pub(crate) records: Vec<Record>,
    pub(crate) selected_file: Option<SelectedFile>,
    /// A picked file is still being read into memory.
    pub(crate) reading_file: bool,
    pub(crate) notice: Option<Notice>,
}

impl Default for FormState {
    fn default() -> Self {
        Self::new()
    }
}

impl FormState {
    /// Initial state: one blank placeholder record, editing locked.
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            records: placeholder(),
            selected_file: None,
            reading_file: false,
            notice: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        self.selected_file.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The last operation error, if the notice is one.
    pub fn last_error(&self) -> Option<&FormError> {
        match &self.notice {
            Some(Notice::Error(err)) => Some(err),
            _ => None,
        }
    }

    pub fn is_extracting(&self) -> bool {
        self.phase == Phase::Extracting
    }

    pub fn is_reading_file(&self) -> bool {
        self.reading_file
    }

    pub fn is_saving(&self) -> bool {
        self.phase == Phase::Saving
    }

    pub fn editing_enabled(&self) -> bool {
        self.phase == Phase::Editable
    }

    pub fn succeeded(&self) -> bool {
        self.phase == Phase::Success
    }

    pub(crate) fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Extracting | Phase::Saving)
    }
}

pub(crate) fn placeholder() -> Vec<Record> {
    vec![Record::default()]
}
