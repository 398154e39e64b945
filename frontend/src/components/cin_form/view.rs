//! View rendering for the CIN intake form.
//!
//! Two screens: the form (file picker, progress flag, inline message area,
//! one card of labeled inputs per record, save button) and the success block
//! with its single "Retour" action. User-facing text is in French, field
//! captions are bilingual.

use common::model::record::{label_for, Record};
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

use super::messages::Msg;
use super::state::CinFormComponent;

/// Main view function: title, then the success block or the form.
pub fn view(component: &CinFormComponent, ctx: &Context<CinFormComponent>) -> Html {
    let link = ctx.link();

    html! {
        <div class="main-box fade-in">
            <h1 class="title">{"Soumission du CIN"}</h1>
            {
                if component.form.succeeded() {
                    build_success_block(link)
                } else {
                    build_form(component, link)
                }
            }
        </div>
    }
}

fn build_success_block(link: &Scope<CinFormComponent>) -> Html {
    html! {
        <div class="success-block">
            <div class="big-check">{"✓"}</div>
            <div class="big-text">{"Succès"}</div>
            <button class="return-btn" onclick={link.callback(|_| Msg::Return)}>
                {"Retour"}
            </button>
        </div>
    }
}

fn build_form(component: &CinFormComponent, link: &Scope<CinFormComponent>) -> Html {
    let form = &component.form;
    let editing = form.editing_enabled();

    html! {
        <>
            { build_upload(component, link) }
            {
                // Progress flag only while a call is in flight
                if form.is_extracting() || form.is_saving() {
                    html! {
                        <div class="progress-bar">
                            <div class="progress-flag moving-flag"></div>
                        </div>
                    }
                } else {
                    html! {}
                }
            }
            {
                match form.notice() {
                    Some(notice) => html! { <p class="error">{ notice.to_string() }</p> },
                    None => html! {},
                }
            }
            <h2 class="subtitle">{"Informations extraites"}</h2>
            {
                for form
                    .records()
                    .iter()
                    .enumerate()
                    .map(|(index, record)| build_card(index, record, editing, link))
            }
            {
                if editing {
                    html! {
                        <button class="button save" onclick={link.callback(|_| Msg::Save)}>
                            {"Envoyer"}
                        </button>
                    }
                } else {
                    html! {}
                }
            }
        </>
    }
}

/// File picker and the "Extraire" trigger, disabled while the picked file
/// is read or extracted.
fn build_upload(component: &CinFormComponent, link: &Scope<CinFormComponent>) -> Html {
    let extracting = component.form.is_extracting();
    let reading = component.form.is_reading_file();

    html! {
        <form
            class="upload"
            onsubmit={link.callback(|e: SubmitEvent| {
                e.prevent_default();
                Msg::Extract
            })}
        >
            <input
                type="file"
                accept="application/pdf"
                class="input"
                ref={component.file_input_ref.clone()}
                onchange={link.callback(|e: Event| {
                    let input: HtmlInputElement = e.target_unchecked_into();
                    Msg::FileChosen(input.files().and_then(|files| files.get(0)))
                })}
            />
            <button type="submit" class="button" disabled={extracting || reading}>
                {
                    if extracting {
                        "En cours..."
                    } else if reading {
                        "Lecture..."
                    } else {
                        "Extraire"
                    }
                }
            </button>
        </form>
    }
}

/// One card per record. Locked inputs are `readonly` rather than `disabled`
/// so that focusing them can still surface the "submit first" reminder.
fn build_card(
    index: usize,
    record: &Record,
    editing: bool,
    link: &Scope<CinFormComponent>,
) -> Html {
    let rows = record
        .entries()
        .map(|(key, value)| {
            let field = key.to_string();
            html! {
                <div class="row" key={key.to_string()}>
                    <label>{ label_for(key).to_string() }</label>
                    <input
                        type="text"
                        value={value.to_string()}
                        readonly={!editing}
                        class={classes!((!editing).then_some("locked"))}
                        oninput={link.callback(move |e: InputEvent| {
                            let input: HtmlInputElement = e.target_unchecked_into();
                            Msg::EditField {
                                index,
                                key: field.clone(),
                                value: input.value(),
                            }
                        })}
                        onfocus={link.callback(|_: FocusEvent| Msg::FocusField)}
                    />
                </div>
            }
        })
        .collect::<Html>();

    html! {
        <div class="card" key={index.to_string()}>
            { rows }
        </div>
    }
}
