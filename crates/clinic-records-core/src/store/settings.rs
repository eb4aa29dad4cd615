//! Clinic settings operations.

use tracing::debug;

use super::{RecordStore, StoreResult};
use crate::config::SETTINGS_SLOT;
use crate::models::ClinicSettings;
use crate::storage::KeyValueStore;

impl<S: KeyValueStore> RecordStore<S> {
    /// Current clinic settings.
    pub fn settings(&self) -> &ClinicSettings {
        &self.settings
    }

    /// Persist new clinic settings, then make them current.
    pub fn save_settings(&mut self, settings: ClinicSettings) -> StoreResult<()> {
        let json = serde_json::to_string(&settings)?;
        self.storage.set(SETTINGS_SLOT, &json)?;
        debug!(slot = SETTINGS_SLOT, "Persisted clinic settings");
        self.settings = settings;
        Ok(())
    }
}
