use crate::application::challenge::{
    ChallengeEffect, ChallengeRedirectHandler, ChallengeState, NavigationEvent, RedirectPatterns,
};
use crate::application::wizard::{FormWizard, Page, WizardEffect, WizardEvent};
use crate::config::FormConfig;
use crate::domain::card::{CardScheme, ExpiryMonth};
use crate::domain::field_store::{Field, FieldStore};
use crate::domain::ports::{IndicatorBox, SurfaceFactory};
use crate::domain::request::TokenisationRequest;
use crate::error::{FormError, Result};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Everything the host can feed into a checkout session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SetField(Field, String),
    /// Zero-based position picked in the month selector.
    SelectMonth(usize),
    SetAcceptedCards(Vec<CardScheme>),
    IncludeBilling(bool),
    Wizard(WizardEvent),
    StartChallenge(String),
    Navigation(NavigationEvent),
    AbortChallenge,
    ResetFields,
}

/// Results the session hands back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SessionOutput {
    PageChanged { page: Page },
    BillingSummary { summary: Option<String> },
    Submitted { request: TokenisationRequest },
    PrimaryViewVisible { visible: bool },
    ChallengeSucceeded { token: String },
    ChallengeFailed { token: String },
}

impl From<WizardEffect> for SessionOutput {
    fn from(effect: WizardEffect) -> Self {
        match effect {
            WizardEffect::ShowPage(page) => SessionOutput::PageChanged { page },
            WizardEffect::UpdateBillingSummary(summary) => SessionOutput::BillingSummary {
                summary: Some(summary),
            },
            WizardEffect::ClearBillingSummary => SessionOutput::BillingSummary { summary: None },
            WizardEffect::Submit(request) => SessionOutput::Submitted { request },
        }
    }
}

impl From<ChallengeEffect> for SessionOutput {
    fn from(effect: ChallengeEffect) -> Self {
        match effect {
            ChallengeEffect::HidePrimaryView => SessionOutput::PrimaryViewVisible { visible: false },
            ChallengeEffect::RestorePrimaryView => {
                SessionOutput::PrimaryViewVisible { visible: true }
            }
            ChallengeEffect::Succeeded { token } => SessionOutput::ChallengeSucceeded { token },
            ChallengeEffect::Failed { token } => SessionOutput::ChallengeFailed { token },
        }
    }
}

/// One checkout session: the field store, the page wizard and the 3DS
/// handler, driven by a single sequential stream of events.
pub struct CheckoutSession {
    store: FieldStore,
    wizard: FormWizard,
    challenge: ChallengeRedirectHandler,
    patterns: Option<RedirectPatterns>,
    surfaces: SurfaceFactory,
}

impl CheckoutSession {
    /// Creates a session seeded from `config`.
    ///
    /// Redirect patterns are optional at this point; a challenge cannot start
    /// until valid ones are configured.
    pub fn new(config: &FormConfig, indicator: IndicatorBox, surfaces: SurfaceFactory) -> Self {
        let mut store = FieldStore::new();
        config.apply(&mut store);

        let patterns = match config.challenge.patterns() {
            Ok(patterns) => Some(patterns),
            Err(e) => {
                debug!(error = %e, "No usable redirect patterns configured");
                None
            }
        };

        Self {
            store,
            wizard: FormWizard::new(),
            challenge: ChallengeRedirectHandler::new(indicator),
            patterns,
            surfaces,
        }
    }

    pub fn store(&self) -> &FieldStore {
        &self.store
    }

    pub fn wizard(&self) -> &FormWizard {
        &self.wizard
    }

    pub fn challenge(&self) -> &ChallengeRedirectHandler {
        &self.challenge
    }

    /// Applies one event and returns what the host has to act on, in order.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Vec<SessionOutput>> {
        match event {
            SessionEvent::SetField(field, value) => {
                self.store.set(field, value);
                Ok(Vec::new())
            }
            SessionEvent::SelectMonth(position) => {
                let month = ExpiryMonth::from_position(position).ok_or_else(|| {
                    FormError::InvalidEvent(format!("no month at position {}", position))
                })?;
                self.store.set(Field::CardMonth, month.two_digits());
                Ok(Vec::new())
            }
            SessionEvent::SetAcceptedCards(cards) => {
                self.store.set_accepted_cards(cards);
                Ok(Vec::new())
            }
            SessionEvent::IncludeBilling(include) => {
                self.store.set_show_billing(include);
                Ok(Vec::new())
            }
            SessionEvent::Wizard(event) => Ok(self
                .wizard
                .handle(event, &mut self.store)
                .into_iter()
                .map(SessionOutput::from)
                .collect()),
            SessionEvent::StartChallenge(url) => {
                if self.challenge.state() == ChallengeState::InProgress {
                    return Err(FormError::ChallengeInProgress);
                }
                let patterns = self.patterns.clone().ok_or_else(|| {
                    FormError::ConfigError(
                        "success and failure redirect patterns must be configured".to_string(),
                    )
                })?;
                let effects = self.challenge.start(&url, patterns, (self.surfaces)())?;
                Ok(effects.into_iter().map(SessionOutput::from).collect())
            }
            SessionEvent::Navigation(event) => Ok(self
                .challenge
                .handle(event)
                .into_iter()
                .map(SessionOutput::from)
                .collect()),
            SessionEvent::AbortChallenge => {
                self.challenge.abort();
                Ok(Vec::new())
            }
            SessionEvent::ResetFields => {
                self.store.reset();
                Ok(Vec::new())
            }
        }
    }

    /// Processes events one at a time until the sender side closes.
    ///
    /// A failing event is logged and skipped. Returns the session so the
    /// caller can inspect its final state.
    pub async fn run(
        mut self,
        mut events: mpsc::Receiver<SessionEvent>,
        outputs: mpsc::UnboundedSender<SessionOutput>,
    ) -> Self {
        while let Some(event) = events.recv().await {
            match self.handle(event) {
                Ok(produced) => {
                    for output in produced {
                        if outputs.send(output).is_err() {
                            warn!("Output receiver dropped, discarding session output");
                        }
                    }
                }
                Err(e) => warn!(error = %e, "Failed to process session event"),
            }
        }
        info!("Session event stream closed");
        self
    }
}
