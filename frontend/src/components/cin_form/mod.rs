//! CIN intake form: root module wiring the Yew `Component` implementation
//! with submodules for state, update logic, view rendering, and helpers.
//!
//! Responsibilities
//! - Re-export selected types (`Msg`, `CinFormProps`, `CinFormComponent`).
//! - Provide the `Component` implementation that delegates to `update::update` and `view::view`.
//! - On first render, load the runtime configuration from the backend and keep
//!   the compiled-in defaults when it cannot be fetched.

use common::model::client_config::ClientConfig;
use gloo_net::http::Request;
use yew::platform::spawn_local;
use yew::prelude::*;

mod helpers;
mod messages;
mod props;
mod state;
mod update;
mod view;

pub use messages::Msg;
pub use props::CinFormProps;
pub use state::CinFormComponent;

impl Component for CinFormComponent {
    type Message = Msg;
    type Properties = CinFormProps;

    fn create(_ctx: &Context<Self>) -> Self {
        CinFormComponent::new()
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        update::update(self, ctx, msg)
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        view::view(self, ctx)
    }

    fn rendered(&mut self, ctx: &Context<Self>, first_render: bool) {
        if first_render && !self.loaded {
            self.loaded = true;

            let link = ctx.link().clone();
            let endpoint = ctx.props().config_endpoint.to_string();
            spawn_local(async move {
                match Request::get(&endpoint).send().await {
                    Ok(resp) if resp.ok() => match resp.json::<ClientConfig>().await {
                        Ok(config) => link.send_message(Msg::SetConfig(config)),
                        Err(err) => gloo_console::warn!(format!(
                            "Configuration illisible ({err}), valeurs par défaut conservées."
                        )),
                    },
                    Ok(resp) => gloo_console::warn!(format!(
                        "Configuration indisponible ({}), valeurs par défaut conservées.",
                        resp.status()
                    )),
                    Err(err) => gloo_console::warn!(format!(
                        "Configuration injoignable ({err}), valeurs par défaut conservées."
                    )),
                }
            });
        }
    }
}
