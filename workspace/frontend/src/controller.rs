//! Async user actions of the pricing form.
//!
//! Each action reports its progress through a dispatch callback so the page
//! reducer stays the only owner of view state. The callback is generic to let
//! tests drive the same flows without a browser.

use common::{CustomerInput, PriceResult, PricingError, SelfTestReport};

use crate::api_client::PricingService;
use crate::form_state::FormAction;

/// Marks a request as pending for as long as it is alive.
///
/// Dispatches [`FormAction::Started`] on creation and [`FormAction::Settled`]
/// on drop, so the loading indicator is cleared on every exit path.
pub struct PendingGuard<'a, D: Fn(FormAction)> {
    dispatch: &'a D,
}

impl<'a, D: Fn(FormAction)> PendingGuard<'a, D> {
    pub fn begin(dispatch: &'a D) -> Self {
        dispatch(FormAction::Started);
        Self { dispatch }
    }
}

impl<D: Fn(FormAction)> Drop for PendingGuard<'_, D> {
    fn drop(&mut self) {
        (self.dispatch)(FormAction::Settled);
    }
}

/// Send the form's customer to the pricing endpoint and show the outcome.
pub async fn submit_for_pricing<S, D>(
    service: &S,
    input: CustomerInput,
    dispatch: &D,
) -> Result<PriceResult, PricingError>
where
    S: PricingService,
    D: Fn(FormAction),
{
    let _pending = PendingGuard::begin(dispatch);
    log::info!("Requesting price calculation");
    log::debug!("Customer input: {:?}", input);

    match service.calculate_price(&input).await {
        Ok(result) => {
            log::info!("Price calculated: dynamic price {:.2}", result.dynamic_price);
            dispatch(FormAction::ShowResult(result));
            Ok(result)
        }
        Err(e) => {
            log::error!("Price calculation failed: {}", e);
            dispatch(FormAction::ShowError(e.to_string()));
            Err(e)
        }
    }
}

/// Run the service's canned scenario: fill the form with its input and show its result.
pub async fn load_self_test<S, D>(service: &S, dispatch: &D) -> Result<SelfTestReport, PricingError>
where
    S: PricingService,
    D: Fn(FormAction),
{
    let _pending = PendingGuard::begin(dispatch);
    log::info!("Running model self-test");

    match service.test_model().await {
        Ok(report) => {
            log::info!(
                "Model self-test passed ({} sample fields)",
                report.test_input.len()
            );
            dispatch(FormAction::FillFields(report.test_input.clone()));
            dispatch(FormAction::ShowResult(report.test_result));
            Ok(report)
        }
        Err(e) => {
            log::error!("Model self-test failed: {}", e);
            dispatch(FormAction::ShowError(e.to_string()));
            Err(e)
        }
    }
}
