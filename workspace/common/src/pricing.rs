use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::customer::CustomerInput;

/// Price breakdown returned by the pricing service.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PriceResult {
    /// Catalogue price before adjustment
    pub base_price: f64,
    /// Price after the CLV-driven adjustment
    pub dynamic_price: f64,
    /// Floor derived from the product cost
    pub min_price: f64,
    /// Margin of the dynamic price over cost, in percent
    pub profit_margin: f64,
    /// Predicted customer lifetime value
    pub clv: f64,
    /// Multiplier applied to the base price
    pub price_adjustment_factor: f64,
}

/// Request body of the batch pricing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BatchCustomerInput {
    pub customers: Vec<CustomerInput>,
}

/// One output field of the results panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceField {
    BasePrice,
    DynamicPrice,
    MinPrice,
    ProfitMargin,
    Clv,
    AdjustmentFactor,
}

impl PriceField {
    pub const ALL: [PriceField; 6] = [
        PriceField::BasePrice,
        PriceField::DynamicPrice,
        PriceField::MinPrice,
        PriceField::ProfitMargin,
        PriceField::Clv,
        PriceField::AdjustmentFactor,
    ];

    /// Id of the display element showing this value.
    pub fn element_id(self) -> &'static str {
        match self {
            PriceField::BasePrice => "basePrice",
            PriceField::DynamicPrice => "dynamicPrice",
            PriceField::MinPrice => "minPrice",
            PriceField::ProfitMargin => "profitMargin",
            PriceField::Clv => "clvValue",
            PriceField::AdjustmentFactor => "adjustmentFactor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PriceField::BasePrice => "Base Price ($)",
            PriceField::DynamicPrice => "Dynamic Price ($)",
            PriceField::MinPrice => "Minimum Price ($)",
            PriceField::ProfitMargin => "Profit Margin (%)",
            PriceField::Clv => "Customer Lifetime Value ($)",
            PriceField::AdjustmentFactor => "Price Adjustment Factor",
        }
    }

    pub fn value_in(self, result: &PriceResult) -> f64 {
        match self {
            PriceField::BasePrice => result.base_price,
            PriceField::DynamicPrice => result.dynamic_price,
            PriceField::MinPrice => result.min_price,
            PriceField::ProfitMargin => result.profit_margin,
            PriceField::Clv => result.clv,
            PriceField::AdjustmentFactor => result.price_adjustment_factor,
        }
    }
}

impl PriceResult {
    /// Display text of every field, two decimals each, in panel order.
    pub fn formatted(&self) -> Vec<(PriceField, String)> {
        PriceField::ALL
            .into_iter()
            .map(|field| (field, format_amount(field.value_in(self))))
            .collect()
    }
}

/// Format a value with exactly two decimal places.
pub fn format_amount(value: f64) -> String {
    // Negative zero prints as "0.00", not "-0.00".
    let value = if value == 0.0 { 0.0 } else { value };
    format!("{:.2}", value)
}
