use payment_form::application::assembler::assemble;
use payment_form::application::wizard::{FormWizard, Page, WizardEffect, WizardEvent};
use payment_form::domain::field_store::{Field, FieldStore};

#[test]
fn test_assemble_card_only_request() {
    let mut store = FieldStore::new();
    store.set(Field::CardNumber, "4111 1111 1111 1111");
    store.set(Field::CardMonth, "12");
    store.set(Field::CardYear, "2030");
    store.set(Field::CardCvv, "123");

    let request = assemble(&store);
    assert_eq!(request.number(), "4111111111111111");
    assert_eq!(request.expiry_month(), "12");
    assert_eq!(request.expiry_year(), "2030");
    assert_eq!(request.cvv(), "123");
    assert!(request.billing().is_none());
}

#[test]
fn test_page_transitions() {
    let mut wizard = FormWizard::new();
    let mut store = FieldStore::new();
    assert_eq!(wizard.page(), Page::CardDetails);

    for closing in [WizardEvent::BillingCompleted, WizardEvent::BillingCanceled] {
        wizard.handle(WizardEvent::GoToBilling, &mut store);
        assert_eq!(wizard.page(), Page::BillingDetails);

        wizard.handle(closing, &mut store);
        assert_eq!(wizard.page(), Page::CardDetails);
    }
}

#[test]
fn test_billing_section_follows_last_billing_outcome() {
    let mut wizard = FormWizard::new();
    let mut store = FieldStore::new();
    store.set(Field::CardNumber, "5555 5555 5555 4444");
    store.set(Field::AddressLine1, "1 Infinite Loop");
    store.set(Field::Zipcode, "95014");

    wizard.handle(WizardEvent::GoToBilling, &mut store);
    wizard.handle(WizardEvent::BillingCompleted, &mut store);

    let submitted = submit(&mut wizard, &mut store);
    let billing = submitted.billing().expect("billing should be attached");
    assert_eq!(billing.address_line1(), "1 Infinite Loop");
    assert_eq!(billing.zip(), "95014");

    // Re-opening billing and canceling drops the section again.
    wizard.handle(WizardEvent::GoToBilling, &mut store);
    wizard.handle(WizardEvent::BillingCanceled, &mut store);

    let submitted = submit(&mut wizard, &mut store);
    assert!(submitted.billing().is_none());
    assert_eq!(submitted.number(), "5555555555554444");
}

#[test]
fn test_each_details_completed_submits() {
    let mut wizard = FormWizard::new();
    let mut store = FieldStore::new();

    let first = submit(&mut wizard, &mut store);
    store.set(Field::CustomerName, "Grace Hopper");
    let second = submit(&mut wizard, &mut store);

    assert_eq!(first.name(), "");
    assert_eq!(second.name(), "Grace Hopper");
}

fn submit(
    wizard: &mut FormWizard,
    store: &mut FieldStore,
) -> payment_form::domain::request::TokenisationRequest {
    let mut effects = wizard.handle(WizardEvent::DetailsCompleted, store);
    assert_eq!(effects.len(), 1);
    match effects.remove(0) {
        WizardEffect::Submit(request) => request,
        other => panic!("Expected submit, got {:?}", other),
    }
}
