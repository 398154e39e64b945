//! The extract → edit → save state machine of the intake form.

mod batch;
mod state;
mod transitions;

pub use batch::{save_batch, BatchFailure, BatchReport};
pub use state::{FormState, Notice, Phase};
pub use transitions::Transition;
