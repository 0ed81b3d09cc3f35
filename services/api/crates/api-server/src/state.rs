//! Shared handler state.

use std::sync::Arc;
use std::time::Duration;

use starter_cli::application::DataDirs;
use starter_cli::infra::{LocalGenerator, local_generator};

/// Cloned into every handler; all fields are cheap `Arc` clones.
#[derive(Clone)]
pub struct AppState {
    pub generator: Arc<LocalGenerator>,
    pub dirs: Arc<DataDirs>,
    /// Host-configured token used when a request carries none.
    pub fallback_token: Option<Arc<str>>,
}

impl AppState {
    #[must_use]
    pub fn new(dirs: DataDirs, command_timeout: Duration, fallback_token: Option<String>) -> Self {
        Self {
            generator: Arc::new(local_generator(command_timeout)),
            dirs: Arc::new(dirs),
            fallback_token: fallback_token
                .filter(|t| !t.trim().is_empty())
                .map(Arc::from),
        }
    }
}
