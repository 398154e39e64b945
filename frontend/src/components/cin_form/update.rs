//! Update function for the CIN intake form.
//!
//! Elm-style: receives the component, the `Context`, and a `Msg`, moves the
//! form to its next state, and returns whether the view should re-render.
//!
//! Key behaviors
//! - File selection: the picked `File` is read to bytes off the event loop,
//!   then handed to `FormState::select_file`. Extraction waits for the read.
//! - Extraction: `begin_extract` → webhook upload → `finish_extract`.
//! - Editing: every keystroke goes through the guarded `set_field`.
//! - Saving: `begin_save` → sequential check-then-insert → `finish_save`.

use common::error::FormError;
use common::extraction::fetch_records;
use common::workflow::{save_batch, FormState};
use yew::platform::spawn_local;
use yew::prelude::*;

use crate::remote::{RemoteStore, WebhookExtractor};

use super::helpers::{read_selected_file, show_toast};
use super::messages::Msg;
use super::state::CinFormComponent;

/// Central update function for the component.
///
/// Contract
/// - Mutates `component` based on `msg`.
/// - May dispatch further messages via `ctx.link()` once async I/O completes.
/// - Returns `true` to re-render the view, `false` when only side effects occur.
pub fn update(component: &mut CinFormComponent, ctx: &Context<CinFormComponent>, msg: Msg) -> bool {
    match msg {
        Msg::SetConfig(config) => {
            component.config = config;
            false
        }
        Msg::FileChosen(None) => {
            if let Err(rejection) = component.step(|form| form.select_file(None)) {
                show_toast(&rejection.to_string());
                return false;
            }
            true
        }
        Msg::FileChosen(Some(file)) => {
            if let Err(rejection) = component.step(FormState::begin_file_read) {
                show_toast(&rejection.to_string());
                return false;
            }
            let link = ctx.link().clone();
            spawn_local(async move {
                match read_selected_file(file).await {
                    Ok(selected) => link.send_message(Msg::FileLoaded(selected)),
                    Err(cause) => link.send_message(Msg::FileUnreadable(cause)),
                }
            });
            true
        }
        Msg::FileLoaded(file) => {
            if let Err(rejection) = component.step(|form| form.select_file(Some(file))) {
                show_toast(&rejection.to_string());
                return false;
            }
            true
        }
        Msg::FileUnreadable(cause) => {
            gloo_console::error!(format!("lecture du fichier impossible: {cause}"));
            component.apply(|form| form.fail_file_read(FormError::UnreadableFile(cause)));
            true
        }
        Msg::Extract => {
            match component.step(FormState::begin_extract) {
                Ok(file) => {
                    let extractor = WebhookExtractor::new(&component.config.extraction_url);
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let outcome = fetch_records(&extractor, &file).await;
                        if let Err(err) = &outcome {
                            gloo_console::error!(format!("extraction de {} : {err}", file.name));
                        }
                        link.send_message(Msg::Extracted(outcome));
                    });
                }
                Err(rejection) => {
                    gloo_console::log!(format!("extraction refusée : {rejection}"));
                }
            }
            true
        }
        Msg::Extracted(outcome) => {
            component.apply(|form| form.finish_extract(outcome));
            true
        }
        Msg::EditField { index, key, value } => {
            // A refused edit still re-renders: the input snaps back and the
            // reminder may have been set.
            let _ = component.step(|form| form.set_field(index, &key, value));
            true
        }
        Msg::FocusField => {
            if component.form.editing_enabled() {
                return false;
            }
            component.apply(FormState::remind_if_locked);
            true
        }
        Msg::Save => {
            match component.step(FormState::begin_save) {
                Ok(records) => {
                    let store = RemoteStore::from(&component.config.store);
                    let link = ctx.link().clone();
                    spawn_local(async move {
                        let report = save_batch(&store, &records).await;
                        if let Some(failure) = &report.failure {
                            gloo_console::error!(format!(
                                "enregistrement arrêté à la fiche {} ({} déjà insérée(s)) : {}",
                                failure.index,
                                report.inserted.len(),
                                failure.error
                            ));
                        }
                        link.send_message(Msg::Saved(report));
                    });
                }
                Err(rejection) => {
                    gloo_console::log!(format!("enregistrement refusé : {rejection}"));
                }
            }
            true
        }
        Msg::Saved(report) => {
            component.apply(|form| form.finish_save(&report));
            if report.is_complete() {
                show_toast(&format!("{} fiche(s) enregistrée(s).", report.inserted.len()));
            }
            true
        }
        Msg::Return => {
            if component.step(FormState::return_to_start).is_ok() {
                component.clear_file_input();
            }
            true
        }
    }
}
