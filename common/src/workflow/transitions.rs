//! Transitions of the intake form.
//!
//! Each transition consumes the current `FormState` and returns the next one.
//! Guarded commands return a [`Transition`] whose `result` says whether the
//! command was applied; a rejected command never touches the edit buffer.
//!
//! Extraction and saving are split around their I/O: `begin_*` moves into the
//! in-flight phase and hands out what must be sent, `finish_*` folds the
//! outcome back in.

use log::debug;

use super::batch::BatchReport;
use super::state::{placeholder, FormState, Notice, Phase};
use crate::error::{FormError, Rejection};
use crate::model::record::Record;
use crate::model::upload::SelectedFile;

/// Next state plus the verdict of a guarded command.
#[derive(Debug)]
#[must_use]
pub struct Transition<T = ()> {
    pub state: FormState,
    pub result: Result<T, Rejection>,
}

impl<T> Transition<T> {
    fn accepted(state: FormState, value: T) -> Self {
        Self {
            state,
            result: Ok(value),
        }
    }

    fn rejected(state: FormState, rejection: Rejection) -> Self {
        Self {
            state,
            result: Err(rejection),
        }
    }

    pub fn into_parts(self) -> (FormState, Result<T, Rejection>) {
        (self.state, self.result)
    }
}

impl FormState {
    /// Marks a picked file as being read. The previous file is dropped and
    /// the buffer locks right away; `select_file` completes the pick.
    pub fn begin_file_read(mut self) -> Transition {
        if self.phase == Phase::Saving {
            return Transition::rejected(self, Rejection::Busy);
        }
        self.selected_file = None;
        self.reading_file = true;
        self.notice = None;
        self.lock_unless_extracting();
        Transition::accepted(self, ())
    }

    /// Stores the picked file, or forgets the previous one when the picker
    /// was emptied, and locks the buffer until a new extraction completes.
    /// An extraction already in flight keeps running.
    pub fn select_file(mut self, file: Option<SelectedFile>) -> Transition {
        if self.phase == Phase::Saving {
            return Transition::rejected(self, Rejection::Busy);
        }
        debug!("selected {:?}", file);
        self.selected_file = file;
        self.reading_file = false;
        self.notice = None;
        self.lock_unless_extracting();
        Transition::accepted(self, ())
    }

    /// The picked file could not be read: nothing is selected and the error
    /// is shown.
    pub fn fail_file_read(mut self, err: FormError) -> Self {
        self.selected_file = None;
        self.reading_file = false;
        self.notice = Some(Notice::Error(err));
        self
    }

    /// Starts an extraction and returns the file to upload.
    pub fn begin_extract(mut self) -> Transition<SelectedFile> {
        if self.is_busy() || self.reading_file {
            return Transition::rejected(self, Rejection::Busy);
        }
        let file = match self.selected_file.clone() {
            None => return self.refuse(FormError::NoFileSelected),
            Some(file) if file.is_empty() => return self.refuse(FormError::EmptyFile(file.name)),
            Some(file) => file,
        };
        self.phase = Phase::Extracting;
        self.notice = None;
        Transition::accepted(self, file)
    }

    /// Folds the extraction outcome back in. On success the buffer is
    /// replaced and unlocked; on failure it is left as it was, locked.
    pub fn finish_extract(mut self, outcome: Result<Vec<Record>, FormError>) -> Self {
        if self.phase != Phase::Extracting {
            debug!("dropping extraction outcome received in {:?}", self.phase);
            return self;
        }
        match outcome {
            Ok(records) => {
                debug!("extraction accepted, {} record(s)", records.len());
                self.records = records;
                self.phase = Phase::Editable;
                self.notice = None;
            }
            Err(err) => {
                self.phase = Phase::Idle;
                self.notice = Some(Notice::Error(err));
            }
        }
        self
    }

    /// Writes `value` into field `key` of record `index`. No format check.
    pub fn set_field(mut self, index: usize, key: &str, value: String) -> Transition {
        match self.phase {
            Phase::Editable => {}
            Phase::Saving => return Transition::rejected(self, Rejection::Busy),
            _ => {
                self.notice = Some(Notice::Reminder(Rejection::Locked));
                return Transition::rejected(self, Rejection::Locked);
            }
        }
        let Some(record) = self.records.get_mut(index) else {
            return Transition::rejected(self, Rejection::NoSuchRecord(index));
        };
        if !record.set(key, value) {
            return Transition::rejected(self, Rejection::UnknownField(key.to_string()));
        }
        Transition::accepted(self, ())
    }

    /// Surfaces the "submit first" reminder when the user reaches for a field
    /// that cannot be edited yet.
    pub fn remind_if_locked(mut self) -> Self {
        if matches!(self.phase, Phase::Idle | Phase::Extracting) {
            self.notice = Some(Notice::Reminder(Rejection::Locked));
        }
        self
    }

    /// Starts a save and returns a snapshot of the buffer to persist.
    pub fn begin_save(mut self) -> Transition<Vec<Record>> {
        match self.phase {
            Phase::Editable => {
                self.phase = Phase::Saving;
                self.notice = None;
                let snapshot = self.records.clone();
                Transition::accepted(self, snapshot)
            }
            Phase::Saving | Phase::Extracting => Transition::rejected(self, Rejection::Busy),
            Phase::Idle | Phase::Success => Transition::rejected(self, Rejection::Locked),
        }
    }

    /// Folds a save pass back in. A complete pass locks the form on the
    /// success screen; a partial one returns to editing with the error shown.
    pub fn finish_save(mut self, report: &BatchReport) -> Self {
        if self.phase != Phase::Saving {
            debug!("dropping save report received in {:?}", self.phase);
            return self;
        }
        match &report.failure {
            None => {
                self.phase = Phase::Success;
                self.notice = None;
            }
            Some(failure) => {
                self.phase = Phase::Editable;
                self.notice = Some(Notice::Error(failure.error.clone()));
            }
        }
        self
    }

    /// Back to the initial empty form.
    pub fn return_to_start(self) -> Transition {
        if self.is_busy() {
            return Transition::rejected(self, Rejection::Busy);
        }
        Transition::accepted(FormState::new(), ())
    }

    fn lock_unless_extracting(&mut self) {
        if self.phase != Phase::Extracting {
            self.phase = Phase::Idle;
        }
    }

    fn refuse<T>(mut self, err: FormError) -> Transition<T> {
        self.notice = Some(Notice::Error(err.clone()));
        Transition::rejected(self, Rejection::Invalid(err))
    }

    /// True when the buffer still holds only the blank placeholder.
    pub fn is_placeholder(&self) -> bool {
        self.records == placeholder()
    }
}
