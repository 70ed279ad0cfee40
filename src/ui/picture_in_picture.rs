// SPDX-License-Identifier: MPL-2.0
//! Picture-in-picture ("mini player") coordination.
//!
//! The window toolkit has no floating video surface of its own, so the host
//! supplies a [`PictureInPictureBackend`]. Requests are fire-and-forget and
//! the active flag follows environment notifications only, the same way
//! fullscreen does.

use crate::error::MediaError;

/// Host capability that floats the video above other windows.
pub trait PictureInPictureBackend {
    /// Returns true when the environment can float the video right now.
    fn is_supported(&self) -> bool;

    /// # Errors
    ///
    /// Returns [`MediaError::PictureInPictureDenied`] when the request is
    /// refused.
    fn request_enter(&mut self) -> Result<(), MediaError>;

    /// # Errors
    ///
    /// Returns [`MediaError::PictureInPictureDenied`] when the request is
    /// refused.
    fn request_exit(&mut self) -> Result<(), MediaError>;
}

#[derive(Default)]
pub struct PictureInPicture {
    backend: Option<Box<dyn PictureInPictureBackend>>,
    active: bool,
}

impl PictureInPicture {
    #[must_use]
    pub fn new(backend: Box<dyn PictureInPictureBackend>) -> Self {
        Self {
            backend: Some(backend),
            active: false,
        }
    }

    /// Returns true when a backend is present and supported.
    #[must_use]
    pub fn is_available(&self) -> bool {
        self.backend
            .as_ref()
            .is_some_and(|backend| backend.is_supported())
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Leaves the mini player when it is up, otherwise asks for it.
    pub fn toggle(&mut self) {
        let Some(backend) = self.backend.as_mut().filter(|backend| backend.is_supported()) else {
            tracing::warn!("picture-in-picture is not available");
            return;
        };

        let result = if self.active {
            backend.request_exit()
        } else {
            backend.request_enter()
        };
        if let Err(err) = result {
            tracing::warn!(%err, "picture-in-picture request failed");
        }
    }

    /// Environment notification. Returns true when the state changed.
    pub fn on_change(&mut self, active: bool) -> bool {
        let changed = self.active != active;
        self.active = active;
        changed
    }
}

impl std::fmt::Debug for PictureInPicture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PictureInPicture")
            .field("backend", &self.backend.is_some())
            .field("active", &self.active)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    type Calls = Arc<Mutex<Vec<&'static str>>>;

    struct Recording {
        supported: bool,
        deny: bool,
        calls: Calls,
    }

    impl PictureInPictureBackend for Recording {
        fn is_supported(&self) -> bool {
            self.supported
        }

        fn request_enter(&mut self) -> Result<(), MediaError> {
            self.calls.lock().unwrap().push("enter");
            if self.deny {
                return Err(MediaError::PictureInPictureDenied("no user gesture".into()));
            }
            Ok(())
        }

        fn request_exit(&mut self) -> Result<(), MediaError> {
            self.calls.lock().unwrap().push("exit");
            Ok(())
        }
    }

    fn recording(supported: bool, deny: bool) -> (PictureInPicture, Calls) {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let backend = Recording {
            supported,
            deny,
            calls: Arc::clone(&calls),
        };
        (PictureInPicture::new(Box::new(backend)), calls)
    }

    #[test]
    fn toggle_follows_reported_state() {
        let (mut pip, calls) = recording(true, false);

        pip.toggle();
        assert!(!pip.is_active());
        assert!(pip.on_change(true));
        assert!(!pip.on_change(true));
        pip.toggle();

        assert_eq!(*calls.lock().unwrap(), vec!["enter", "exit"]);
    }

    #[test]
    fn denied_request_keeps_state() {
        let (mut pip, calls) = recording(true, true);

        pip.toggle();
        assert!(!pip.is_active());
        assert_eq!(calls.lock().unwrap().len(), 1);
    }

    #[test]
    fn unsupported_backend_is_never_called() {
        let (mut pip, calls) = recording(false, false);

        assert!(!pip.is_available());
        pip.toggle();
        assert!(calls.lock().unwrap().is_empty());
    }

    #[test]
    fn missing_backend_is_unavailable() {
        let mut pip = PictureInPicture::default();
        pip.toggle();
        assert!(!pip.is_available());
        assert!(!pip.is_active());
    }
}
