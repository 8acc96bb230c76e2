use crate::application::assembler::assemble;
use crate::domain::field_store::{Field, FieldStore};
use crate::domain::request::TokenisationRequest;
use serde::Serialize;
use tracing::{debug, info};

/// The two pages of the payment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    #[default]
    CardDetails,
    BillingDetails,
}

/// Completion events raised by the pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardEvent {
    /// The card page's "billing details" control was pressed.
    GoToBilling,
    /// The billing page was filled in and confirmed.
    BillingCompleted,
    /// The billing page was dismissed.
    BillingCanceled,
    /// The card page passed its own validation and the user pressed pay.
    DetailsCompleted,
}

/// What the host has to do after the wizard handled an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEffect {
    ShowPage(Page),
    UpdateBillingSummary(String),
    ClearBillingSummary,
    Submit(TokenisationRequest),
}

/// Page state machine for the card/billing form.
///
/// Pages only change in response to [`WizardEvent`]s; there is no way to
/// swipe between them.
#[derive(Debug, Default)]
pub struct FormWizard {
    page: Page,
}

impl FormWizard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.page
    }

    /// Applies one page event and returns the effects for the host, in order.
    ///
    /// Events that do not belong to the current page are ignored. The wizard
    /// never clears `store` after a submission; that is up to the caller.
    pub fn handle(&mut self, event: WizardEvent, store: &mut FieldStore) -> Vec<WizardEffect> {
        match (self.page, event) {
            (Page::CardDetails, WizardEvent::GoToBilling) => {
                vec![self.transition(Page::BillingDetails)]
            }
            (Page::BillingDetails, WizardEvent::BillingCompleted) => {
                store.set_billing_completed(true);
                vec![
                    WizardEffect::UpdateBillingSummary(billing_summary(store)),
                    self.transition(Page::CardDetails),
                ]
            }
            (Page::BillingDetails, WizardEvent::BillingCanceled) => {
                store.set_billing_completed(false);
                vec![
                    WizardEffect::ClearBillingSummary,
                    self.transition(Page::CardDetails),
                ]
            }
            (Page::CardDetails, WizardEvent::DetailsCompleted) => {
                let request = assemble(store);
                info!(
                    with_billing = request.billing().is_some(),
                    "Card details completed, submitting tokenisation request"
                );
                vec![WizardEffect::Submit(request)]
            }
            (page, event) => {
                debug!(?page, ?event, "Ignoring event for inactive page");
                Vec::new()
            }
        }
    }

    fn transition(&mut self, to: Page) -> WizardEffect {
        debug!(from = ?self.page, ?to, "Page transition");
        self.page = to;
        WizardEffect::ShowPage(to)
    }
}

/// One-line address summary shown on the card page once billing is done.
pub fn billing_summary(store: &FieldStore) -> String {
    [Field::AddressLine1, Field::City, Field::Zipcode, Field::Country]
        .into_iter()
        .map(|field| store.get(field))
        .filter(|value| !value.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}
