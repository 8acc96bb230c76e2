use crate::domain::ports::{IndicatorBox, SurfaceBox};
use crate::error::{FormError, Result};
use tracing::{debug, info, warn};
use url::{Url, form_urlencoded};

/// Query parameter carrying the payment token on the redirect URLs.
pub const PAYMENT_TOKEN_PARAM: &str = "cko-payment-token";

/// Which terminal redirect a URL matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectKind {
    Success,
    Failure,
}

/// Success and failure URL fragments configured for the merchant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectPatterns {
    success: String,
    failure: String,
}

impl RedirectPatterns {
    /// Empty patterns are rejected since they would match every URL.
    pub fn new(success: impl Into<String>, failure: impl Into<String>) -> Result<Self> {
        let success = success.into();
        let failure = failure.into();
        if success.is_empty() {
            return Err(FormError::InvalidPattern(
                "success pattern must not be empty".to_string(),
            ));
        }
        if failure.is_empty() {
            return Err(FormError::InvalidPattern(
                "failure pattern must not be empty".to_string(),
            ));
        }
        Ok(Self { success, failure })
    }

    pub fn success(&self) -> &str {
        &self.success
    }

    pub fn failure(&self) -> &str {
        &self.failure
    }

    /// Substring match, success first. A URL containing both patterns is a
    /// success.
    pub fn classify(&self, url: &str) -> Option<RedirectKind> {
        if url.contains(&self.success) {
            Some(RedirectKind::Success)
        } else if url.contains(&self.failure) {
            Some(RedirectKind::Failure)
        } else {
            None
        }
    }
}

/// Returns the first `cko-payment-token` query value of `url`, or `""` when
/// the parameter is absent.
pub fn extract_payment_token(url: &str) -> String {
    let found = match Url::parse(url) {
        Ok(parsed) => parsed
            .query_pairs()
            .find(|(key, _)| key == PAYMENT_TOKEN_PARAM)
            .map(|(_, value)| value.into_owned()),
        // Relative or otherwise unparseable URLs still carry a query string.
        Err(_) => url
            .split_once('?')
            .map(|(_, rest)| rest.split('#').next().unwrap_or_default())
            .and_then(|query| {
                form_urlencoded::parse(query.as_bytes())
                    .find(|(key, _)| key == PAYMENT_TOKEN_PARAM)
                    .map(|(_, value)| value.into_owned())
            }),
    };
    found.unwrap_or_default()
}

/// `url` without its query string or fragment, for logging.
pub fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or_default()
}

/// Events reported by the navigable surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    Started { url: String },
    Finished { url: String },
    Error { url: String, description: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChallengeState {
    #[default]
    Idle,
    InProgress,
    Succeeded,
    Failed,
}

/// What the host has to do after the handler processed a call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChallengeEffect {
    HidePrimaryView,
    Succeeded { token: String },
    Failed { token: String },
    RestorePrimaryView,
}

/// A surface attached for the lifetime of one challenge.
///
/// Detaches on drop, so every way out of a challenge releases it.
struct AttachedSurface {
    surface: SurfaceBox,
}

impl AttachedSurface {
    fn attach(mut surface: SurfaceBox) -> Result<Self> {
        surface.attach()?;
        Ok(Self { surface })
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        self.surface.load_url(url)
    }
}

impl Drop for AttachedSurface {
    fn drop(&mut self) {
        if let Err(e) = self.surface.detach() {
            warn!(error = %e, "Failed to detach challenge surface");
        }
    }
}

struct ChallengeSession {
    patterns: RedirectPatterns,
    _surface: AttachedSurface,
}

/// Drives a 3-D Secure redirect flow to a single success or failure outcome.
///
/// The active session is taken out of the handler when it settles or is
/// aborted, so at most one terminal effect is ever produced per challenge.
pub struct ChallengeRedirectHandler {
    indicator: IndicatorBox,
    state: ChallengeState,
    session: Option<ChallengeSession>,
}

impl ChallengeRedirectHandler {
    pub fn new(indicator: IndicatorBox) -> Self {
        Self {
            indicator,
            state: ChallengeState::Idle,
            session: None,
        }
    }

    pub fn state(&self) -> ChallengeState {
        self.state
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self.state,
            ChallengeState::Succeeded | ChallengeState::Failed
        )
    }

    /// Attaches `surface`, points it at `url` and asks the host to hide the
    /// form.
    ///
    /// Fails if a challenge is already running. A surface that fails to load
    /// is detached again before the error is returned.
    pub fn start(
        &mut self,
        url: &str,
        patterns: RedirectPatterns,
        surface: SurfaceBox,
    ) -> Result<Vec<ChallengeEffect>> {
        if self.session.is_some() {
            return Err(FormError::ChallengeInProgress);
        }

        let mut surface = AttachedSurface::attach(surface)?;
        surface.load_url(url)?;

        info!(
            url = strip_query(url),
            success_pattern = patterns.success(),
            failure_pattern = patterns.failure(),
            "Starting 3DS challenge"
        );
        self.session = Some(ChallengeSession {
            patterns,
            _surface: surface,
        });
        self.state = ChallengeState::InProgress;

        Ok(vec![ChallengeEffect::HidePrimaryView])
    }

    /// Single entry point for surface navigation events.
    ///
    /// Events arriving with no challenge in progress, including any fired
    /// after settlement, are ignored.
    pub fn handle(&mut self, event: NavigationEvent) -> Vec<ChallengeEffect> {
        let Some(session) = self.session.as_ref() else {
            debug!(state = ?self.state, "No challenge in progress, ignoring navigation event");
            return Vec::new();
        };

        match event {
            NavigationEvent::Started { url } => {
                debug!(url = strip_query(&url), "Challenge page started loading");
                if let Err(e) = self.indicator.show() {
                    warn!(error = %e, "Failed to show loading indicator");
                }
                Vec::new()
            }
            NavigationEvent::Finished { url } => {
                if let Err(e) = self.indicator.hide() {
                    warn!(error = %e, "Failed to hide loading indicator");
                }
                debug!(url = strip_query(&url), "Challenge page finished loading");

                match session.patterns.classify(&url) {
                    Some(kind) => self.settle(kind, &url),
                    None => Vec::new(),
                }
            }
            NavigationEvent::Error { url, description } => {
                warn!(
                    url = strip_query(&url),
                    description = %description,
                    "Challenge page failed to load"
                );
                Vec::new()
            }
        }
    }

    /// Drops the active challenge without producing an outcome.
    ///
    /// A no-op when idle or already settled.
    pub fn abort(&mut self) {
        if let Some(session) = self.session.take() {
            info!("Aborting 3DS challenge");
            drop(session);
            if let Err(e) = self.indicator.hide() {
                warn!(error = %e, "Failed to hide loading indicator");
            }
            self.state = ChallengeState::Idle;
        }
    }

    fn settle(&mut self, kind: RedirectKind, url: &str) -> Vec<ChallengeEffect> {
        let token = extract_payment_token(url);
        if token.is_empty() {
            warn!(url = strip_query(url), ?kind, "Terminal redirect carries no payment token");
        }

        // Releases the surface.
        self.session = None;

        let outcome = match kind {
            RedirectKind::Success => {
                self.state = ChallengeState::Succeeded;
                info!("3DS challenge succeeded");
                ChallengeEffect::Succeeded { token }
            }
            RedirectKind::Failure => {
                self.state = ChallengeState::Failed;
                info!("3DS challenge failed");
                ChallengeEffect::Failed { token }
            }
        };

        vec![outcome, ChallengeEffect::RestorePrimaryView]
    }
}
