//! Recording Navigator
//!
//! Navigator that keeps the visited views in order. Front ends read the
//! current view from it; tests count redirects with it.

use std::sync::Mutex;

use crate::domain::view::{Navigator, View};

/// Navigator that records every transition
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<View>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent view, if any navigation happened
    pub fn current(&self) -> Option<View> {
        self.history().last().copied()
    }

    /// All views in the order they were visited
    pub fn history(&self) -> Vec<View> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// How many times `view` was navigated to
    pub fn visits(&self, view: View) -> usize {
        self.history().iter().filter(|v| **v == view).count()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, view: View) {
        tracing::debug!(view = %view, path = view.path(), "Navigate");
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(view);
    }
}
