use common::{PriceField, PriceResult};
use yew::prelude::*;

use crate::chart::PRICE_CHART_ID;

#[derive(Properties, PartialEq)]
pub struct ResultsPanelProps {
    pub visible: bool,
    /// Last rendered result; kept while the panel is hidden.
    pub result: Option<PriceResult>,
}

/// Price breakdown and the chart target. The panel stays mounted while hidden
/// so the chart element exists for the chart handle.
#[function_component(ResultsPanel)]
pub fn results_panel(props: &ResultsPanelProps) -> Html {
    let values: Vec<(PriceField, String)> = match &props.result {
        Some(result) => result.formatted(),
        None => PriceField::ALL.into_iter().map(|field| (field, String::new())).collect(),
    };

    html! {
        <div id="resultsContainer" class={classes!("card", "bg-base-100", "shadow", (!props.visible).then_some("hidden"))}>
            <div class="card-body">
                <h3 class="card-title text-lg">{"Pricing Results"}</h3>

                <div class="stats stats-vertical md:stats-horizontal shadow flex-wrap">
                    { for values.into_iter().map(|(field, text)| html! {
                        <div class="stat" key={field.element_id()}>
                            <div class="stat-title">{field.label()}</div>
                            <div class="stat-value text-2xl" id={field.element_id()}>{text}</div>
                        </div>
                    }) }
                </div>

                <div class="mt-6">
                    <h4 class="font-semibold mb-2">{"Price Comparison"}</h4>
                    <div id={PRICE_CHART_ID} class="chart-container" style="width: 100%; height: 320px;"></div>
                </div>
            </div>
        </div>
    }
}
