use crate::application::challenge::strip_query;
use crate::domain::ports::{LoadingIndicator, NavigableSurface};
use crate::error::{FormError, Result};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::debug;

/// Everything an [`InMemorySurface`] has been asked to do.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SurfaceLog {
    pub attached: bool,
    pub attach_count: usize,
    pub detach_count: usize,
    pub loaded_urls: Vec<String>,
}

/// A headless navigable surface.
///
/// Clones share the same log through `Arc<Mutex<_>>`, so a test or host can
/// keep a handle while the challenge handler owns the boxed surface.
#[derive(Debug, Default, Clone)]
pub struct InMemorySurface {
    log: Arc<Mutex<SurfaceLog>>,
    reject_loads: bool,
}

impl InMemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose `load_url` always fails.
    pub fn rejecting_loads() -> Self {
        Self {
            reject_loads: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> SurfaceLog {
        self.log
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn lock(&self) -> Result<MutexGuard<'_, SurfaceLog>> {
        self.log
            .lock()
            .map_err(|e| FormError::SurfaceError(format!("surface log poisoned: {}", e)))
    }
}

impl NavigableSurface for InMemorySurface {
    fn attach(&mut self) -> Result<()> {
        let mut log = self.lock()?;
        if log.attached {
            return Err(FormError::SurfaceError(
                "surface is already attached".to_string(),
            ));
        }
        log.attached = true;
        log.attach_count += 1;
        Ok(())
    }

    fn detach(&mut self) -> Result<()> {
        let mut log = self.lock()?;
        if log.attached {
            log.attached = false;
            log.detach_count += 1;
        }
        Ok(())
    }

    fn load_url(&mut self, url: &str) -> Result<()> {
        if self.reject_loads {
            return Err(FormError::SurfaceError(format!(
                "cannot load {}",
                strip_query(url)
            )));
        }
        let mut log = self.lock()?;
        if !log.attached {
            return Err(FormError::SurfaceError(
                "surface is not attached".to_string(),
            ));
        }
        debug!(url = strip_query(url), "Loading URL into headless surface");
        log.loaded_urls.push(url.to_string());
        Ok(())
    }
}

/// Visibility and call counts of an [`InMemoryIndicator`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IndicatorLog {
    pub visible: bool,
    pub show_calls: usize,
    pub hide_calls: usize,
}

/// A headless loading indicator.
#[derive(Debug, Default, Clone)]
pub struct InMemoryIndicator {
    log: Arc<Mutex<IndicatorLog>>,
    fail_hide: bool,
}

impl InMemoryIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// An indicator whose `hide` records the call and then fails.
    pub fn failing() -> Self {
        Self {
            fail_hide: true,
            ..Self::default()
        }
    }

    pub fn snapshot(&self) -> IndicatorLog {
        *self.log.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock(&self) -> Result<MutexGuard<'_, IndicatorLog>> {
        self.log
            .lock()
            .map_err(|e| FormError::IndicatorError(format!("indicator log poisoned: {}", e)))
    }
}

impl LoadingIndicator for InMemoryIndicator {
    fn show(&mut self) -> Result<()> {
        let mut log = self.lock()?;
        log.show_calls += 1;
        log.visible = true;
        Ok(())
    }

    fn hide(&mut self) -> Result<()> {
        let mut log = self.lock()?;
        log.hide_calls += 1;
        if self.fail_hide {
            return Err(FormError::IndicatorError(
                "indicator is not attached to a window".to_string(),
            ));
        }
        log.visible = false;
        Ok(())
    }
}
