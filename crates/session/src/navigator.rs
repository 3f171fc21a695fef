//! Navigation capability injected into the session

use std::sync::Mutex;

/// Moves the application to another route
pub trait Navigator: Send + Sync {
    fn navigate(&self, path: &str);

    /// The route currently displayed, if any navigation happened yet
    fn current(&self) -> Option<String>;
}

/// Navigator that records every visited path
#[derive(Debug, Default)]
pub struct History {
    visited: Mutex<Vec<String>>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for History {
    fn navigate(&self, path: &str) {
        log::debug!("navigating to {}", path);
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(path.to_string());
    }

    fn current(&self) -> Option<String> {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }
}
