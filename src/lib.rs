// Hotel booking tracker: who is in which room on which date

pub mod config;
pub mod error;
pub mod manager;
pub mod store;

// Re-export key types for convenience
pub use config::BookingConfig;
pub use error::{BookingError, ConfigError};
pub use manager::{BookingManager, BookingStats, HotelBookingManager, ManagerConfig, WriteMode};
pub use store::{InMemoryReservationStore, ReservationStore, RoomNumber, RoomPolicy, StoreConfig};
