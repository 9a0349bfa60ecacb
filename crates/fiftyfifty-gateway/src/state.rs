use std::sync::Arc;

use fiftyfifty_service::VideoSets;

#[derive(Clone)]
pub struct AppState {
    sets: Arc<dyn VideoSets>,
}

impl AppState {
    pub fn new(sets: impl VideoSets) -> Self {
        Self {
            sets: Arc::new(sets),
        }
    }

    pub fn from_shared(sets: Arc<dyn VideoSets>) -> Self {
        Self { sets }
    }

    pub fn sets(&self) -> &dyn VideoSets {
        self.sets.as_ref()
    }
}
