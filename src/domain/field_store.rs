use super::card::CardScheme;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Every text field the card and billing pages write.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Field {
    CardNumber,
    CustomerName,
    CardMonth,
    CardYear,
    CardCvv,
    AddressLine1,
    AddressLine2,
    Zipcode,
    Country,
    City,
    State,
    PhonePrefix,
    Phone,
}

/// Session-scoped holder of everything the user has entered so far.
///
/// The caller owns the store and hands it to the wizard and the request
/// assembler. Every setter is a single assignment, so a reader never sees a
/// half-written field. No validation happens here.
#[derive(Debug, Clone)]
pub struct FieldStore {
    values: HashMap<Field, String>,
    accepted_cards: Vec<CardScheme>,
    show_billing: bool,
    billing_completed: bool,
}

impl Default for FieldStore {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            accepted_cards: CardScheme::iter().collect(),
            show_billing: true,
            billing_completed: false,
        }
    }
}

impl FieldStore {
    /// Creates an empty store that accepts every card scheme and shows billing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites `field` unconditionally.
    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    /// Returns the last value set for `field`, or `""` if it was never set.
    pub fn get(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or_default()
    }

    pub fn set_accepted_cards(&mut self, cards: Vec<CardScheme>) {
        self.accepted_cards = cards;
    }

    pub fn accepted_cards(&self) -> &[CardScheme] {
        &self.accepted_cards
    }

    pub fn is_card_accepted(&self, scheme: CardScheme) -> bool {
        self.accepted_cards.contains(&scheme)
    }

    pub fn set_show_billing(&mut self, show: bool) {
        self.show_billing = show;
    }

    pub fn show_billing(&self) -> bool {
        self.show_billing
    }

    pub fn set_billing_completed(&mut self, completed: bool) {
        self.billing_completed = completed;
    }

    pub fn is_billing_completed(&self) -> bool {
        self.billing_completed
    }

    /// Clears every entered value and the billing-completed flag.
    ///
    /// Configuration (accepted cards, show billing) survives a reset.
    pub fn reset(&mut self) {
        self.values.clear();
        self.billing_completed = false;
    }
}
