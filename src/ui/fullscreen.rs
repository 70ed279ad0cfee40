// SPDX-License-Identifier: MPL-2.0
//! Fullscreen coordination.
//!
//! Requests go through the first backend of a fallback chain that reports
//! support in the current environment. Requests are fire-and-forget: a
//! refusal is logged and swallowed. The coordinator's `is_fullscreen` flag
//! only changes when the environment confirms a change through
//! [`FullscreenCoordinator::on_fullscreen_change`].

use crate::error::MediaError;

/// One way of putting the player surface into fullscreen.
pub trait FullscreenBackend {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns true when this backend can be used in the current environment.
    fn is_supported(&self) -> bool;

    /// Asks the environment to enter fullscreen.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::FullscreenDenied`] when the request is refused.
    fn request_enter(&mut self) -> Result<(), MediaError>;

    /// Asks the environment to leave fullscreen.
    ///
    /// # Errors
    ///
    /// Returns [`MediaError::FullscreenDenied`] when the request is refused.
    fn request_exit(&mut self) -> Result<(), MediaError>;
}

/// Fullscreen state derived from environment notifications.
pub struct FullscreenCoordinator {
    backends: Vec<Box<dyn FullscreenBackend>>,
    is_fullscreen: bool,
}

impl FullscreenCoordinator {
    /// Creates a coordinator trying `backends` in order.
    #[must_use]
    pub fn new(backends: Vec<Box<dyn FullscreenBackend>>) -> Self {
        Self {
            backends,
            is_fullscreen: false,
        }
    }

    #[must_use]
    pub fn is_fullscreen(&self) -> bool {
        self.is_fullscreen
    }

    /// Name of the backend requests would go through.
    #[must_use]
    pub fn active_backend(&self) -> Option<&str> {
        self.backends
            .iter()
            .find(|backend| backend.is_supported())
            .map(|backend| backend.name())
    }

    pub fn enter(&mut self) {
        self.request(true);
    }

    pub fn exit(&mut self) {
        self.request(false);
    }

    /// Enters or leaves depending on the last confirmed state.
    pub fn toggle(&mut self) {
        self.request(!self.is_fullscreen);
    }

    /// Environment notification. Returns true when the state changed.
    pub fn on_fullscreen_change(&mut self, fullscreen: bool) -> bool {
        let changed = self.is_fullscreen != fullscreen;
        self.is_fullscreen = fullscreen;
        changed
    }

    fn request(&mut self, enter: bool) {
        let Some(backend) = self
            .backends
            .iter_mut()
            .find(|backend| backend.is_supported())
        else {
            tracing::warn!("fullscreen is not supported by any backend");
            return;
        };

        let result = if enter {
            backend.request_enter()
        } else {
            backend.request_exit()
        };
        if let Err(err) = result {
            tracing::warn!(backend = backend.name(), %err, "fullscreen request failed");
        }
    }
}

impl std::fmt::Debug for FullscreenCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FullscreenCoordinator")
            .field("backends", &self.backends.len())
            .field("is_fullscreen", &self.is_fullscreen)
            .finish()
    }
}

/// Backend that records requests for the host to carry out.
///
/// The iced facade drains the requested mode and turns it into a
/// `window::set_mode` task.
#[derive(Debug, Default, Clone)]
pub struct RequestQueue {
    pending: std::sync::Arc<std::sync::Mutex<Option<bool>>>,
}

impl RequestQueue {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the last requested state, if any.
    #[must_use]
    pub fn take(&self) -> Option<bool> {
        self.pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .take()
    }

    fn push(&self, enter: bool) {
        *self
            .pending
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = Some(enter);
    }
}

impl FullscreenBackend for RequestQueue {
    fn name(&self) -> &str {
        "window-mode"
    }

    fn is_supported(&self) -> bool {
        true
    }

    fn request_enter(&mut self) -> Result<(), MediaError> {
        self.push(true);
        Ok(())
    }

    fn request_exit(&mut self) -> Result<(), MediaError> {
        self.push(false);
        Ok(())
    }
}
