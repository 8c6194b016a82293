//! The price comparison bar chart and the handle that owns its one live instance.

use common::PriceResult;
use serde::Serialize;
use serde_json::{json, Value};
use wasm_bindgen::prelude::*;

use crate::form_state::ChartState;

/// Id of the element the chart is drawn into.
pub const PRICE_CHART_ID: &str = "priceChart";

const LABELS: [&str; 3] = ["Base Price", "Dynamic Price", "Minimum Price"];
const FILL_COLORS: [&str; 3] = [
    "rgba(52, 152, 219, 0.7)",
    "rgba(46, 204, 113, 0.7)",
    "rgba(231, 76, 60, 0.7)",
];
const BORDER_COLORS: [&str; 3] = [
    "rgba(52, 152, 219, 1)",
    "rgba(46, 204, 113, 1)",
    "rgba(231, 76, 60, 1)",
];
/// Hover label: the bar value with two decimals and no trace name box.
const TOOLTIP_TEMPLATE: &str = "%{y:.2f}<extra></extra>";

/// Declarative description of the bar chart for one price result.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceChartSpec {
    pub values: [f64; 3],
}

impl PriceChartSpec {
    pub fn from_result(result: &PriceResult) -> Self {
        Self {
            values: [result.base_price, result.dynamic_price, result.min_price],
        }
    }

    pub fn data(&self) -> Value {
        json!([{
            "type": "bar",
            "name": "Price Comparison",
            "x": LABELS,
            "y": self.values,
            "marker": {
                "color": FILL_COLORS,
                "line": {"color": BORDER_COLORS, "width": 1}
            },
            "hovertemplate": TOOLTIP_TEMPLATE
        }])
    }

    pub fn layout(&self) -> Value {
        json!({
            "margin": {"t": 10, "r": 10, "l": 60, "b": 40},
            "paper_bgcolor": "rgba(0,0,0,0)",
            "plot_bgcolor": "rgba(0,0,0,0)",
            "showlegend": false,
            "xaxis": {"showgrid": false},
            "yaxis": {
                "rangemode": "tozero",
                "title": {"text": "Price ($)"},
                "showgrid": true,
                "gridcolor": "#eee"
            }
        })
    }

    pub fn config(&self) -> Value {
        json!({"responsive": true, "displayModeBar": false})
    }
}

/// A drawing backend able to create and tear down a chart in a target element.
pub trait ChartSurface {
    fn draw(&mut self, target: &str, spec: &PriceChartSpec) -> Result<(), String>;

    fn destroy(&mut self, target: &str);
}

/// Owned handle of the single price chart.
///
/// Drawing always destroys the previous instance first, so at most one chart
/// is alive at a time. Dropping the handle destroys the live chart.
pub struct PriceChart<S: ChartSurface> {
    surface: S,
    target: String,
    live: bool,
}

impl<S: ChartSurface> PriceChart<S> {
    pub fn new(surface: S, target: impl Into<String>) -> Self {
        Self {
            surface,
            target: target.into(),
            live: false,
        }
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn render(&mut self, result: &PriceResult) -> Result<(), String> {
        self.clear();
        let spec = PriceChartSpec::from_result(result);
        self.surface.draw(&self.target, &spec)?;
        self.live = true;
        Ok(())
    }

    pub fn clear(&mut self) {
        if self.live {
            self.surface.destroy(&self.target);
            self.live = false;
        }
    }

    /// Bring the live chart in line with the page state.
    pub fn sync(&mut self, state: &ChartState) -> Result<(), String> {
        match &state.result {
            Some(result) => self.render(result),
            None => {
                self.clear();
                Ok(())
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn surface(&self) -> &S {
        &self.surface
    }
}

impl<S: ChartSurface> Drop for PriceChart<S> {
    fn drop(&mut self) {
        self.clear();
    }
}

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(catch, js_namespace = Plotly, js_name = newPlot)]
    fn new_plot(div_id: &str, data: JsValue, layout: JsValue, config: JsValue) -> Result<JsValue, JsValue>;

    #[wasm_bindgen(catch, js_namespace = Plotly)]
    fn purge(div_id: &str) -> Result<(), JsValue>;
}

/// [`ChartSurface`] backed by the page's Plotly.js.
#[derive(Debug, Default)]
pub struct PlotlySurface;

fn to_js(value: &Value) -> Result<JsValue, String> {
    value
        .serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .map_err(|e| format!("Failed to convert chart config: {}", e))
}

impl ChartSurface for PlotlySurface {
    fn draw(&mut self, target: &str, spec: &PriceChartSpec) -> Result<(), String> {
        log::debug!("Drawing price chart into #{}", target);
        new_plot(
            target,
            to_js(&spec.data())?,
            to_js(&spec.layout())?,
            to_js(&spec.config())?,
        )
        .map(|_| ())
        .map_err(|e| format!("Plotly failed to draw chart: {:?}", e))
    }

    fn destroy(&mut self, target: &str) {
        log::trace!("Purging price chart in #{}", target);
        if let Err(e) = purge(target) {
            // The element may already be gone when the page unmounts.
            log::debug!("Chart purge skipped: {:?}", e);
        }
    }
}
