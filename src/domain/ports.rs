use crate::error::Result;

/// A web-content surface the challenge flow is rendered into.
///
/// Navigation is fire-and-forget: `load_url` returns immediately and the
/// host later reports progress as navigation events.
pub trait NavigableSurface: Send {
    fn attach(&mut self) -> Result<()>;
    fn detach(&mut self) -> Result<()>;
    fn load_url(&mut self, url: &str) -> Result<()>;
}

/// Spinner shown while a challenge page loads. Both calls are idempotent.
pub trait LoadingIndicator: Send {
    fn show(&mut self) -> Result<()>;
    fn hide(&mut self) -> Result<()>;
}

pub type SurfaceBox = Box<dyn NavigableSurface>;
pub type IndicatorBox = Box<dyn LoadingIndicator>;
pub type SurfaceFactory = Box<dyn Fn() -> SurfaceBox + Send>;
