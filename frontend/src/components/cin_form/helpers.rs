//! Utility functions for the CIN intake form.
//!
//! - **Configuration**: the `ClientConfig` compiled in from the build
//!   environment, used until (or instead of) the one served by the backend.
//! - **File reading**: turning the picker's `File` into a `SelectedFile`.
//! - **User feedback**: short-lived "toast" notifications.

use common::model::client_config::{
    ClientConfig, StoreBackend, DEFAULT_EXTRACTION_URL, DEFAULT_TABLE,
};
use common::model::upload::SelectedFile;
use gloo_file::futures::read_as_bytes;
use wasm_bindgen::JsCast;
use web_sys::HtmlElement;

/// Configuration baked in at build time (`trunk build` inherits the shell's
/// environment). Supabase is used when both its URL and key were provided.
pub fn compiled_config() -> ClientConfig {
    let extraction_url = option_env!("EXTRACTION_URL")
        .unwrap_or(DEFAULT_EXTRACTION_URL)
        .to_string();

    let store = match (option_env!("SUPABASE_URL"), option_env!("SUPABASE_ANON_KEY")) {
        (Some(url), Some(anon_key)) if !url.is_empty() && !anon_key.is_empty() => {
            StoreBackend::Supabase {
                url: url.trim_end_matches('/').to_string(),
                anon_key: anon_key.to_string(),
                table: option_env!("SUPABASE_TABLE")
                    .unwrap_or(DEFAULT_TABLE)
                    .to_string(),
            }
        }
        _ => ClientConfig::default().store,
    };

    ClientConfig {
        extraction_url,
        store,
    }
}

/// Reads the whole picked file into memory.
pub async fn read_selected_file(file: web_sys::File) -> Result<SelectedFile, String> {
    let file = gloo_file::File::from(file);
    let bytes = read_as_bytes(&file).await.map_err(|e| e.to_string())?;
    let (name, mime) = (file.name(), file.raw_mime_type());
    Ok(SelectedFile::new(name, mime, bytes))
}

/// Displays a temporary notification message at the bottom of the screen.
///
/// The toast removes itself after three seconds. The inline message area
/// stays the place for errors; toasts only confirm.
pub fn show_toast(message: &str) {
    if let Some(window) = web_sys::window() {
        if let Some(document) = window.document() {
            if let (Ok(toast), Some(body)) = (document.create_element("div"), document.body()) {
                toast.set_text_content(Some(message));
                let html_toast: HtmlElement = toast.unchecked_into();
                let style = html_toast.style();
                style.set_property("position", "fixed").ok();
                style.set_property("bottom", "20px").ok();
                style.set_property("left", "50%").ok();
                style.set_property("transform", "translateX(-50%)").ok();
                style.set_property("background", "rgba(0, 0, 0, 0.8)").ok();
                style.set_property("color", "#fff").ok();
                style.set_property("padding", "10px 20px").ok();
                style.set_property("border-radius", "4px").ok();
                style.set_property("z-index", "10000").ok();
                style.set_property("font-family", "Arial, sans-serif").ok();

                if body.append_child(&html_toast).is_ok() {
                    wasm_bindgen_futures::spawn_local(async move {
                        gloo_timers::future::TimeoutFuture::new(3000).await;
                        if let Some(parent) = html_toast.parent_node() {
                            parent.remove_child(&html_toast).ok();
                        }
                    });
                }
            }
        }
    }
}
