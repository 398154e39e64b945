//! Shared core of the CIN intake form.
//!
//! Holds everything the browser component and the backend agree on: the
//! record model, the client configuration, error kinds, and the form's state
//! machine with its collaborator traits. Nothing here touches the DOM or a
//! socket; transports live in the `frontend` and `backend` crates.

pub mod error;
pub mod extraction;
pub mod model;
pub mod store;
pub mod workflow;
