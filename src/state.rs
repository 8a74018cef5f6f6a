use std::sync::{Arc, Mutex};

use crate::config::AppConfig;
use crate::models::SlotCatalog;
use crate::services::notifier::ConfirmationNotifier;
use crate::services::sessions::SessionStore;

pub struct AppState {
    pub config: AppConfig,
    pub catalog: Arc<SlotCatalog>,
    pub sessions: Mutex<SessionStore>,
    pub notifier: Box<dyn ConfirmationNotifier>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        catalog: SlotCatalog,
        notifier: Box<dyn ConfirmationNotifier>,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let idle_ttl = chrono::Duration::minutes(config.session_idle_minutes);
        Self {
            sessions: Mutex::new(SessionStore::new(Arc::clone(&catalog), idle_ttl)),
            config,
            catalog,
            notifier,
        }
    }
}
