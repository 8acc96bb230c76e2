use crate::application::challenge::NavigationEvent;
use crate::application::session::SessionEvent;
use crate::application::wizard::WizardEvent;
use crate::config::FormConfig;
use crate::domain::field_store::Field;
use crate::error::{FormError, Result};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    Set,
    SelectMonth,
    AcceptedCards,
    IncludeBilling,
    GoToBilling,
    BillingCompleted,
    BillingCanceled,
    DetailsCompleted,
    Challenge,
    NavStarted,
    NavFinished,
    NavError,
    Abort,
    Reset,
}

/// One row of an event script: `kind, target, value`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct EventRecord {
    pub kind: EventKind,
    pub target: Option<String>,
    pub value: Option<String>,
}

impl EventRecord {
    fn value(&self) -> &str {
        self.value.as_deref().unwrap_or_default()
    }

    fn required_value(&self) -> Result<&str> {
        match self.value() {
            "" => Err(FormError::InvalidEvent(format!(
                "{:?} requires a value",
                self.kind
            ))),
            value => Ok(value),
        }
    }
}

impl TryFrom<EventRecord> for SessionEvent {
    type Error = FormError;

    fn try_from(record: EventRecord) -> Result<Self> {
        let event = match record.kind {
            EventKind::Set => {
                let target = record.target.as_deref().unwrap_or_default();
                let field = target
                    .parse::<Field>()
                    .map_err(|_| FormError::InvalidEvent(format!("unknown field: {}", target)))?;
                SessionEvent::SetField(field, record.value().to_string())
            }
            EventKind::SelectMonth => {
                let raw = record.required_value()?;
                let position = raw
                    .parse::<usize>()
                    .map_err(|_| FormError::InvalidEvent(format!("invalid month position: {}", raw)))?;
                SessionEvent::SelectMonth(position)
            }
            EventKind::AcceptedCards => {
                let cards = FormConfig::parse_accepted_cards(record.value())
                    .map_err(|e| FormError::InvalidEvent(e.to_string()))?;
                SessionEvent::SetAcceptedCards(cards)
            }
            EventKind::IncludeBilling => {
                let raw = record.required_value()?;
                let include = raw
                    .parse::<bool>()
                    .map_err(|_| FormError::InvalidEvent(format!("invalid flag: {}", raw)))?;
                SessionEvent::IncludeBilling(include)
            }
            EventKind::GoToBilling => SessionEvent::Wizard(WizardEvent::GoToBilling),
            EventKind::BillingCompleted => SessionEvent::Wizard(WizardEvent::BillingCompleted),
            EventKind::BillingCanceled => SessionEvent::Wizard(WizardEvent::BillingCanceled),
            EventKind::DetailsCompleted => SessionEvent::Wizard(WizardEvent::DetailsCompleted),
            EventKind::Challenge => SessionEvent::StartChallenge(record.required_value()?.to_string()),
            EventKind::NavStarted => SessionEvent::Navigation(NavigationEvent::Started {
                url: record.required_value()?.to_string(),
            }),
            EventKind::NavFinished => SessionEvent::Navigation(NavigationEvent::Finished {
                url: record.required_value()?.to_string(),
            }),
            EventKind::NavError => SessionEvent::Navigation(NavigationEvent::Error {
                url: record.required_value()?.to_string(),
                description: record.target.clone().unwrap_or_default(),
            }),
            EventKind::Abort => SessionEvent::AbortChallenge,
            EventKind::Reset => SessionEvent::ResetFields,
        };
        Ok(event)
    }
}

/// Reads a session event script from a CSV source.
///
/// The header row must be `kind, target, value`. Whitespace around cells is
/// trimmed and short rows are accepted.
pub struct EventReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> EventReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily yields one event per row; a bad row becomes an `Err` item and
    /// does not stop the stream.
    pub fn events(self) -> impl Iterator<Item = Result<SessionEvent>> {
        self.reader.into_deserialize::<EventRecord>().map(|result| {
            result
                .map_err(FormError::from)
                .and_then(SessionEvent::try_from)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::card::CardScheme;

    fn read(data: &str) -> Vec<Result<SessionEvent>> {
        EventReader::new(data.as_bytes()).events().collect()
    }

    #[test]
    fn test_reader_valid_stream() {
        let data = "kind, target, value\n\
                    set, card_number, 4242 4242 4242 4242\n\
                    select_month, , 3\n\
                    go_to_billing, ,\n\
                    nav_finished, , https://m/cko-success?cko-payment-token=tok\n\
                    abort";
        let events: Vec<SessionEvent> = read(data).into_iter().map(|e| e.unwrap()).collect();

        assert_eq!(
            events,
            vec![
                SessionEvent::SetField(Field::CardNumber, "4242 4242 4242 4242".to_string()),
                SessionEvent::SelectMonth(3),
                SessionEvent::Wizard(WizardEvent::GoToBilling),
                SessionEvent::Navigation(NavigationEvent::Finished {
                    url: "https://m/cko-success?cko-payment-token=tok".to_string()
                }),
                SessionEvent::AbortChallenge,
            ]
        );
    }

    #[test]
    fn test_reader_configuration_rows() {
        let data = "kind,target,value\naccepted_cards,,visa|amex\ninclude_billing,,false";
        let events: Vec<SessionEvent> = read(data).into_iter().map(|e| e.unwrap()).collect();

        assert_eq!(
            events,
            vec![
                SessionEvent::SetAcceptedCards(vec![CardScheme::Visa, CardScheme::Amex]),
                SessionEvent::IncludeBilling(false),
            ]
        );
    }

    #[test]
    fn test_reader_nav_error_carries_description() {
        let data = "kind,target,value\nnav_error,net::ERR_TIMED_OUT,https://issuer/acs";
        let events = read(data);
        assert_eq!(
            events[0].as_ref().unwrap(),
            &SessionEvent::Navigation(NavigationEvent::Error {
                url: "https://issuer/acs".to_string(),
                description: "net::ERR_TIMED_OUT".to_string(),
            })
        );
    }

    #[test]
    fn test_reader_malformed_rows_do_not_stop_stream() {
        let data = "kind,target,value\n\
                    teleport,,\n\
                    set,favourite_colour,blue\n\
                    select_month,,thirteen\n\
                    challenge,,\n\
                    reset,,";
        let events = read(data);

        assert_eq!(events.len(), 5);
        assert!(matches!(events[0], Err(FormError::CsvError(_))));
        assert!(matches!(events[1], Err(FormError::InvalidEvent(_))));
        assert!(matches!(events[2], Err(FormError::InvalidEvent(_))));
        assert!(matches!(events[3], Err(FormError::InvalidEvent(_))));
        assert_eq!(events[4].as_ref().unwrap(), &SessionEvent::ResetFields);
    }
}
