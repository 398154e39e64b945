//! Component state for the CIN intake form.
//!
//! The workflow itself (phase, edit buffer, selected file, inline notice)
//! lives in `common::workflow::FormState`; this struct adds what only the
//! browser needs: the collaborator configuration and DOM references.

use common::error::Rejection;
use common::model::client_config::ClientConfig;
use common::workflow::{FormState, Transition};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use super::helpers::compiled_config;

pub struct CinFormComponent {
    /// Extract → edit → save state. Replaced wholesale by each transition.
    pub form: FormState,

    /// Extraction webhook and store settings.
    pub config: ClientConfig,

    /// Reference to the `<input type="file">`, cleared on return.
    pub file_input_ref: NodeRef,

    /// Guard to avoid running first-render initialization more than once.
    pub loaded: bool,
}

impl CinFormComponent {
    pub fn new() -> Self {
        Self {
            form: FormState::new(),
            config: compiled_config(),
            file_input_ref: NodeRef::default(),
            loaded: false,
        }
    }

    /// Runs a guarded command against the form and keeps the next state.
    pub fn step<T>(
        &mut self,
        command: impl FnOnce(FormState) -> Transition<T>,
    ) -> Result<T, Rejection> {
        let (next, result) = command(std::mem::take(&mut self.form)).into_parts();
        self.form = next;
        result
    }

    /// Runs an unguarded transition.
    pub fn apply(&mut self, transition: impl FnOnce(FormState) -> FormState) {
        self.form = transition(std::mem::take(&mut self.form));
    }

    pub fn clear_file_input(&self) {
        if let Some(input) = self.file_input_ref.cast::<HtmlInputElement>() {
            input.set_value("");
        }
    }
}
