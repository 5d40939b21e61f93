use std::sync::Arc;

use pulseboard_core::CoreContext;

#[derive(Clone)]
pub struct AppState {
    pub core: Arc<CoreContext>,
}

impl AppState {
    pub fn new(core: CoreContext) -> Self {
        Self {
            core: Arc::new(core),
        }
    }
}
