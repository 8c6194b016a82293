use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// Customer attributes sent to the pricing service.
///
/// Field names on the wire follow the service's feature names. Values are
/// forwarded as entered: a field that could not be coerced holds NaN, which
/// serializes as JSON `null`, and a `null` read back becomes NaN again.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CustomerInput {
    /// Days since the last purchase
    #[serde(rename = "Recency", deserialize_with = "nan_if_null")]
    pub recency: f64,
    /// Number of purchases
    #[serde(rename = "Frequency", deserialize_with = "nan_if_null")]
    pub frequency: f64,
    /// Total spend
    #[serde(rename = "MonetaryValue", deserialize_with = "nan_if_null")]
    pub monetary_value: f64,
    /// Days since the first purchase
    #[serde(rename = "Tenure", deserialize_with = "nan_if_null")]
    pub tenure: f64,
    /// Mean gap between purchases in days
    #[serde(rename = "AvgDaysBetweenPurchases", deserialize_with = "nan_if_null")]
    pub avg_days_between_purchases: f64,
    /// Customer age in years
    #[serde(rename = "Age", deserialize_with = "nan_if_null")]
    pub age: f64,
    /// Distinct products bought
    #[serde(rename = "UniqueProductsCount", deserialize_with = "nan_if_null")]
    pub unique_products_count: f64,
    /// Unit cost of the product being priced
    #[serde(rename = "product_cost", deserialize_with = "nan_if_null")]
    pub product_cost: f64,
}

fn nan_if_null<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(f64::NAN))
}

/// One input field of the pricing form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CustomerField {
    Recency,
    Frequency,
    MonetaryValue,
    Tenure,
    AvgDaysBetweenPurchases,
    Age,
    UniqueProductsCount,
    ProductCost,
}

impl CustomerField {
    /// All fields in form order.
    pub const ALL: [CustomerField; 8] = [
        CustomerField::Recency,
        CustomerField::Frequency,
        CustomerField::MonetaryValue,
        CustomerField::Tenure,
        CustomerField::AvgDaysBetweenPurchases,
        CustomerField::Age,
        CustomerField::UniqueProductsCount,
        CustomerField::ProductCost,
    ];

    /// JSON key of the field, also used as the input element id.
    pub fn key(self) -> &'static str {
        match self {
            CustomerField::Recency => "Recency",
            CustomerField::Frequency => "Frequency",
            CustomerField::MonetaryValue => "MonetaryValue",
            CustomerField::Tenure => "Tenure",
            CustomerField::AvgDaysBetweenPurchases => "AvgDaysBetweenPurchases",
            CustomerField::Age => "Age",
            CustomerField::UniqueProductsCount => "UniqueProductsCount",
            CustomerField::ProductCost => "product_cost",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CustomerField::Recency => "Recency (days)",
            CustomerField::Frequency => "Frequency",
            CustomerField::MonetaryValue => "Monetary Value ($)",
            CustomerField::Tenure => "Tenure (days)",
            CustomerField::AvgDaysBetweenPurchases => "Avg Days Between Purchases",
            CustomerField::Age => "Age",
            CustomerField::UniqueProductsCount => "Unique Products Count",
            CustomerField::ProductCost => "Product Cost ($)",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|field| field.key() == key)
    }
}

impl CustomerInput {
    /// Build an input by asking for every field in form order.
    pub fn from_fn(mut value_of: impl FnMut(CustomerField) -> f64) -> Self {
        Self {
            recency: value_of(CustomerField::Recency),
            frequency: value_of(CustomerField::Frequency),
            monetary_value: value_of(CustomerField::MonetaryValue),
            tenure: value_of(CustomerField::Tenure),
            avg_days_between_purchases: value_of(CustomerField::AvgDaysBetweenPurchases),
            age: value_of(CustomerField::Age),
            unique_products_count: value_of(CustomerField::UniqueProductsCount),
            product_cost: value_of(CustomerField::ProductCost),
        }
    }

    pub fn get(&self, field: CustomerField) -> f64 {
        match field {
            CustomerField::Recency => self.recency,
            CustomerField::Frequency => self.frequency,
            CustomerField::MonetaryValue => self.monetary_value,
            CustomerField::Tenure => self.tenure,
            CustomerField::AvgDaysBetweenPurchases => self.avg_days_between_purchases,
            CustomerField::Age => self.age,
            CustomerField::UniqueProductsCount => self.unique_products_count,
            CustomerField::ProductCost => self.product_cost,
        }
    }

    /// Sample high-value customer used by the "Load Sample Data" action.
    pub fn sample() -> Self {
        Self {
            recency: 15.0,
            frequency: 12.0,
            monetary_value: 1200.0,
            tenure: 730.0,
            avg_days_between_purchases: 25.0,
            age: 42.0,
            unique_products_count: 5.0,
            product_cost: 50.0,
        }
    }
}

/// Coerce form text into a number with browser `parseFloat` semantics.
///
/// Leading whitespace is skipped and the longest numeric prefix is read, so
/// `"12abc"` is 12. Text without a numeric prefix yields NaN.
pub fn coerce_number(text: &str) -> f64 {
    let trimmed = text.trim_start();
    let (sign, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (-1.0, &trimmed[1..]),
        Some(b'+') => (1.0, &trimmed[1..]),
        _ => (1.0, trimmed),
    };

    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let bytes = rest.as_bytes();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    while end < bytes.len() {
        match bytes[end] {
            b'0'..=b'9' => seen_digit = true,
            b'.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end += 1;
    }
    if !seen_digit {
        return f64::NAN;
    }

    // An exponent only counts when at least one digit follows it.
    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            end = exp_end;
        }
    }

    rest[..end]
        .parse::<f64>()
        .map(|value| sign * value)
        .unwrap_or(f64::NAN)
}

/// Render a number the way it is written back into a form input.
pub fn format_field_value(value: f64) -> String {
    if value.is_nan() {
        String::new()
    } else {
        value.to_string()
    }
}
