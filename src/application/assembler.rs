use crate::domain::field_store::{Field, FieldStore};
use crate::domain::request::{BillingInfo, PhoneInfo, TokenisationRequest};

/// Strips every non-digit character from a card number.
pub fn sanitize_card_number(entry: &str) -> String {
    entry.chars().filter(char::is_ascii_digit).collect()
}

/// Builds a tokenisation request from the current contents of `store`.
///
/// Never fails: missing fields become empty strings. The billing section is
/// present only when the billing page was completed.
pub fn assemble(store: &FieldStore) -> TokenisationRequest {
    let billing = store.is_billing_completed().then(|| {
        BillingInfo::new(
            store.get(Field::AddressLine1),
            store.get(Field::AddressLine2),
            store.get(Field::Zipcode),
            store.get(Field::Country),
            store.get(Field::City),
            store.get(Field::State),
            PhoneInfo::new(store.get(Field::PhonePrefix), store.get(Field::Phone)),
        )
    });

    TokenisationRequest::new(
        sanitize_card_number(store.get(Field::CardNumber)),
        store.get(Field::CustomerName),
        store.get(Field::CardMonth),
        store.get(Field::CardYear),
        store.get(Field::CardCvv),
        billing,
    )
}
