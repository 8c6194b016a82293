use std::collections::BTreeMap;
use std::rc::Rc;

use common::{coerce_number, format_field_value, CustomerField, CustomerInput, PriceResult};
use yew::Reducible;

/// What the page shows below the form.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    #[default]
    Idle,
    Loading,
    Results(PriceResult),
    Error(String),
}

impl ViewState {
    pub fn shows_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn shows_results(&self) -> bool {
        matches!(self, Self::Results(_))
    }

    pub fn shows_error(&self) -> bool {
        matches!(self, Self::Error(_))
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            _ => None,
        }
    }
}

/// Payload of the single price chart. `revision` changes on every render and
/// every reset, so an unchanged result rendered twice still redraws.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChartState {
    pub result: Option<PriceResult>,
    pub revision: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FormAction {
    SetField(CustomerField, String),
    LoadSample,
    Reset,
    /// A request was dispatched.
    Started,
    /// A request finished, whatever its outcome.
    Settled,
    ShowResult(PriceResult),
    ShowError(String),
    /// Fill inputs from a sample keyed by field wire name; unknown keys are ignored.
    FillFields(BTreeMap<String, f64>),
}

/// State of the pricing form page.
///
/// `values` mirrors what the inputs report while the user types. The inputs
/// themselves are only written on a fill (sample, self-test, reset): they are
/// rendered from `presets` and re-keyed by `fill_revision`, so a partly typed
/// number the browser reports as empty is never written back over the text.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PricingForm {
    values: BTreeMap<CustomerField, String>,
    presets: BTreeMap<CustomerField, String>,
    fill_revision: u64,
    outcome: ViewState,
    pending: usize,
    chart: ChartState,
}

impl PricingForm {
    /// Current text of an input.
    pub fn value(&self, field: CustomerField) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Text an input is (re)created with after the last fill.
    pub fn preset(&self, field: CustomerField) -> &str {
        self.presets.get(&field).map(String::as_str).unwrap_or_default()
    }

    /// Changes whenever the inputs must be recreated from [`Self::preset`].
    pub fn fill_revision(&self) -> u64 {
        self.fill_revision
    }

    fn refill_inputs(&mut self) {
        self.presets = self.values.clone();
        self.fill_revision += 1;
    }

    /// Read every field as a number. Text that is not a number becomes NaN.
    pub fn customer_input(&self) -> CustomerInput {
        CustomerInput::from_fn(|field| coerce_number(self.value(field)))
    }

    /// Loading while any request is in flight, otherwise the last outcome.
    pub fn view(&self) -> ViewState {
        if self.pending > 0 {
            ViewState::Loading
        } else {
            self.outcome.clone()
        }
    }

    pub fn pending(&self) -> usize {
        self.pending
    }

    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    pub fn apply(&mut self, action: FormAction) {
        match action {
            FormAction::SetField(field, text) => {
                self.values.insert(field, text);
            }
            FormAction::LoadSample => {
                let sample = CustomerInput::sample();
                for field in CustomerField::ALL {
                    self.values.insert(field, format_field_value(sample.get(field)));
                }
                self.refill_inputs();
            }
            FormAction::Reset => {
                self.values.clear();
                self.refill_inputs();
                self.outcome = ViewState::Idle;
                self.chart = ChartState {
                    result: None,
                    revision: self.chart.revision + 1,
                };
            }
            FormAction::Started => self.pending += 1,
            FormAction::Settled => self.pending = self.pending.saturating_sub(1),
            FormAction::ShowResult(result) => {
                self.outcome = ViewState::Results(result);
                self.chart = ChartState {
                    result: Some(result),
                    revision: self.chart.revision + 1,
                };
            }
            FormAction::ShowError(message) => self.outcome = ViewState::Error(message),
            FormAction::FillFields(sample) => {
                for (key, value) in sample {
                    match CustomerField::from_key(&key) {
                        Some(field) => {
                            self.values.insert(field, format_field_value(value));
                        }
                        None => log::debug!("Ignoring sample value for unknown field {}", key),
                    }
                }
                self.refill_inputs();
            }
        }
    }
}

impl Reducible for PricingForm {
    type Action = FormAction;

    fn reduce(self: Rc<Self>, action: FormAction) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}
