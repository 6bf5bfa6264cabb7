// Error types for the booking store and manager

use chrono::NaiveDate;
use thiserror::Error;

use crate::store::RoomNumber;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    #[error("Booking already exists for room {room} on {date}")]
    BookingAlreadyExists { room: RoomNumber, date: NaiveDate },

    #[error("Room {0} does not exist in the booking system")]
    RoomNotRegistered(RoomNumber),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration parse error: {0}")]
    Parse(#[from] serde_json::Error),
}
