use yew::prelude::*;

mod components;
pub mod api_client;
pub mod chart;
pub mod controller;
pub mod form_state;
pub mod settings;
pub mod shared;

use components::layout::layout::Layout;
use components::pricing::PricingPage;
use shared::toast::ToastProvider;

#[function_component(App)]
pub fn app() -> Html {
    html! {
        <ToastProvider>
            <Layout title="Dynamic Pricing Engine">
                <PricingPage />
            </Layout>
        </ToastProvider>
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn run_app() {
    // Initialize settings first
    settings::init_settings();

    // Initialize logger with settings
    let settings = settings::get_settings();
    wasm_logger::init(wasm_logger::Config::new(settings.log_level));

    log::info!("=== Pricing Console Frontend Starting ===");
    log::info!("Application settings: {:?}", settings);
    log::debug!("API origin: {:?}", settings.api_origin);

    yew::Renderer::<App>::new().render();
    log::info!("Application initialized successfully");
}
