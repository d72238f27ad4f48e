use std::sync::Arc;

use devmate_core::Relay;

/// Shared handler state. The relay is built once at startup and only read afterwards.
#[derive(Clone, Debug)]
pub struct AppState {
    pub relay: Arc<Relay>,
}

impl AppState {
    pub fn new(relay: Arc<Relay>) -> Self {
        Self { relay }
    }
}
