// Reservation store: the authoritative (room, date) -> guest table
// and the set of rooms known to the booking system.

use std::collections::HashSet;

use chrono::NaiveDate;
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::BookingError;

pub type RoomNumber = u32;

type BookingKey = (RoomNumber, NaiveDate);

/// Whether a booking may target a room that was never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomPolicy {
    /// Bookings for unregistered rooms fail with `RoomNotRegistered`.
    Strict,
    /// Bookings for unregistered rooms are written as-is. The room set is
    /// not touched, so such rooms never show up in `list_rooms`.
    Implicit,
}

impl Default for RoomPolicy {
    fn default() -> Self {
        RoomPolicy::Strict
    }
}

// Store configuration options
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StoreConfig {
    pub room_policy: RoomPolicy,
    // Pre-sized booking table, 0 lets the map grow on demand
    pub initial_capacity: usize,
}

// Store trait shared by the in-memory table and test doubles
pub trait ReservationStore: Send + Sync + 'static {
    // Initialize a new store with the given configuration
    fn new(config: StoreConfig) -> Self
    where
        Self: Sized;

    // Register a room as bookable. Registering the same room twice is a no-op.
    fn add_room(&self, room: RoomNumber);

    // Write guest at (room, date), replacing whatever was there.
    // Existing bookings are NOT checked here, that is the manager's job.
    fn add_booking(
        &self,
        guest_name: &str,
        room: RoomNumber,
        date: NaiveDate,
    ) -> Result<(), BookingError>;

    // Guest booked into this exact room on this exact date
    fn guest_name(&self, room: RoomNumber, date: NaiveDate) -> Option<String>;

    // Registered rooms, unordered
    fn list_rooms(&self) -> HashSet<RoomNumber>;

    fn booking_count(&self) -> usize;

    fn room_policy(&self) -> RoomPolicy;
}

/// In-memory store backed by a sharded concurrent map.
///
/// Individual reads and writes are safe from any number of threads and
/// writes to different keys never interfere. Nothing here spans a read
/// and a following write, see `WriteMode` on the manager for that.
#[derive(Debug, Default)]
pub struct InMemoryReservationStore {
    bookings: DashMap<BookingKey, String>,
    rooms: RwLock<HashSet<RoomNumber>>,
    config: StoreConfig,
}

impl InMemoryReservationStore {
    fn is_registered(&self, room: RoomNumber) -> bool {
        self.rooms.read().contains(&room)
    }
}

impl ReservationStore for InMemoryReservationStore {
    fn new(config: StoreConfig) -> Self
    where
        Self: Sized,
    {
        Self {
            bookings: DashMap::with_capacity(config.initial_capacity),
            rooms: RwLock::new(HashSet::new()),
            config,
        }
    }

    fn add_room(&self, room: RoomNumber) {
        if self.rooms.write().insert(room) {
            debug!(room, "room registered");
        }
    }

    fn add_booking(
        &self,
        guest_name: &str,
        room: RoomNumber,
        date: NaiveDate,
    ) -> Result<(), BookingError> {
        if self.config.room_policy == RoomPolicy::Strict && !self.is_registered(room) {
            return Err(BookingError::RoomNotRegistered(room));
        }

        let previous = self.bookings.insert((room, date), guest_name.to_string());
        debug!(
            room,
            %date,
            guest = guest_name,
            replaced = previous.is_some(),
            "booking written"
        );

        Ok(())
    }

    fn guest_name(&self, room: RoomNumber, date: NaiveDate) -> Option<String> {
        self.bookings.get(&(room, date)).map(|guest| guest.value().clone())
    }

    fn list_rooms(&self) -> HashSet<RoomNumber> {
        self.rooms.read().clone()
    }

    fn booking_count(&self) -> usize {
        self.bookings.len()
    }

    fn room_policy(&self) -> RoomPolicy {
        self.config.room_policy
    }
}
