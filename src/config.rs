// Combined configuration for a store and the manager sitting on it

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ConfigError;
use crate::manager::{HotelBookingManager, ManagerConfig};
use crate::store::{InMemoryReservationStore, ReservationStore, StoreConfig};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BookingConfig {
    pub store: StoreConfig,
    pub manager: ManagerConfig,
}

impl BookingConfig {
    /// Parse a JSON document such as
    /// `{"store": {"room_policy": "implicit"}, "manager": {"write_mode": "exclusive"}}`.
    ///
    /// Omitted sections and fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BookingConfig = serde_json::from_str(json)?;
        debug!(?config, "booking configuration loaded");
        Ok(config)
    }

    pub fn build(self) -> HotelBookingManager<InMemoryReservationStore> {
        let store = Arc::new(InMemoryReservationStore::new(self.store));
        HotelBookingManager::new(store, self.manager)
    }
}
