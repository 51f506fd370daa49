use std::sync::Arc;

use crate::profile::ProfileService;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub profiles: ProfileService,
    pub max_photo_size: usize,
}
