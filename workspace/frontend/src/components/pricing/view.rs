use common::CustomerField;
use yew::prelude::*;

use super::form::CustomerForm;
use super::results::ResultsPanel;
use crate::api_client::HttpPricingService;
use crate::chart::{PlotlySurface, PriceChart, PRICE_CHART_ID};
use crate::controller::{load_self_test, submit_for_pricing};
use crate::form_state::{FormAction, PricingForm};
use crate::shared::error::ErrorDisplay;
use crate::shared::loading::LoadingIndicator;
use crate::shared::toast::ToastContext;

const SELF_TEST_CONFIRMATION: &str = "Model test successful! Model is working correctly.";

#[function_component(PricingPage)]
pub fn pricing_page() -> Html {
    let form = use_reducer(PricingForm::default);
    let toast_ctx = use_context::<ToastContext>();
    let chart = use_mut_ref(|| PriceChart::new(PlotlySurface, PRICE_CHART_ID));

    // Redraw or tear down the chart whenever a result is rendered or the form is reset.
    {
        let chart = chart.clone();
        let toast_ctx = toast_ctx.clone();
        use_effect_with(form.chart().clone(), move |state| {
            if let Err(e) = chart.borrow_mut().sync(state) {
                log::error!("Failed to render price chart: {}", e);
                if let Some(toast_ctx) = &toast_ctx {
                    toast_ctx.show_error(e);
                }
            }
            || ()
        });
    }

    let on_input = {
        let dispatcher = form.dispatcher();
        Callback::from(move |(field, text): (CustomerField, String)| {
            dispatcher.dispatch(FormAction::SetField(field, text));
        })
    };

    let on_submit = {
        let form = form.clone();
        Callback::from(move |_: ()| {
            let input = form.customer_input();
            let dispatcher = form.dispatcher();
            wasm_bindgen_futures::spawn_local(async move {
                let dispatch = move |action: FormAction| dispatcher.dispatch(action);
                if submit_for_pricing(&HttpPricingService, input, &dispatch).await.is_ok() {
                    log::debug!("Price calculation rendered");
                }
            });
        })
    };

    let on_self_test = {
        let dispatcher = form.dispatcher();
        let toast_ctx = toast_ctx.clone();
        Callback::from(move |_: ()| {
            let dispatcher = dispatcher.clone();
            let toast_ctx = toast_ctx.clone();
            wasm_bindgen_futures::spawn_local(async move {
                let dispatch = move |action: FormAction| dispatcher.dispatch(action);
                if load_self_test(&HttpPricingService, &dispatch).await.is_ok() {
                    if let Some(toast_ctx) = toast_ctx {
                        toast_ctx.show_success(SELF_TEST_CONFIRMATION.to_string());
                    }
                }
            });
        })
    };

    let on_sample = {
        let dispatcher = form.dispatcher();
        Callback::from(move |_: ()| {
            log::debug!("Loading sample customer profile");
            dispatcher.dispatch(FormAction::LoadSample);
        })
    };

    let on_reset = {
        let dispatcher = form.dispatcher();
        Callback::from(move |_: ()| {
            log::debug!("Resetting pricing form");
            dispatcher.dispatch(FormAction::Reset);
        })
    };

    let view = form.view();

    html! {
        <div class="grid grid-cols-1 xl:grid-cols-2 gap-6">
            <CustomerForm
                form={(*form).clone()}
                on_input={on_input}
                on_submit={on_submit}
                on_self_test={on_self_test}
                on_sample={on_sample}
                on_reset={on_reset}
            />
            <div class="flex flex-col gap-4">
                <LoadingIndicator visible={view.shows_loading()} text={Some("Calculating price...".to_string())} />
                <ErrorDisplay
                    visible={view.shows_error()}
                    message={view.error().unwrap_or_default().to_string()}
                />
                <ResultsPanel visible={view.shows_results()} result={form.chart().result} />
            </div>
        </div>
    }
}
