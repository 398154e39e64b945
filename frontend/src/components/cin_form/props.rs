//! Defines the properties for the `CinFormComponent`.

use yew::prelude::*;

/// Properties for the `CinFormComponent`.
#[derive(Properties, PartialEq, Clone)]
pub struct CinFormProps {
    /// Where the runtime `ClientConfig` is fetched from on first render.
    ///
    /// When the request fails the form keeps the configuration compiled in
    /// from `EXTRACTION_URL` / `SUPABASE_*` at build time.
    #[prop_or(AttrValue::Static("/api/config"))]
    pub config_endpoint: AttrValue,
}
