use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Card schemes the form can be configured to accept.
///
/// The list is only stored here; the card-number validator on the card
/// details page consumes it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CardScheme {
    Visa,
    Mastercard,
    Amex,
    Dinersclub,
    Discover,
    Jcb,
    Maestro,
    Mada,
}

/// Expiry month as offered by the month picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter)]
pub enum ExpiryMonth {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl ExpiryMonth {
    /// Maps a zero-based picker position to its month.
    pub fn from_position(position: usize) -> Option<Self> {
        Self::iter().nth(position)
    }

    /// Calendar number, 1 through 12.
    pub fn number(&self) -> u8 {
        *self as u8 + 1
    }

    /// The value written to the month field, e.g. `"04"`.
    pub fn two_digits(&self) -> String {
        format!("{:02}", self.number())
    }
}
