// Booking manager: availability checks and the one-guest-per-room-per-day
// rule, layered over a ReservationStore.

use std::{
    collections::HashSet,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    },
};

use chrono::NaiveDate;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::BookingError;
use crate::store::{ReservationStore, RoomNumber};

/// How `add_booking` sequences its availability check and its write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Check, then write, with nothing held in between. Two callers racing
    /// on the same room and date can both pass the check, and the later
    /// write replaces the earlier one.
    CheckThenWrite,
    /// Check and write under a manager-wide lock. Only one booking per
    /// room and date can succeed through this manager.
    Exclusive,
}

impl Default for WriteMode {
    fn default() -> Self {
        WriteMode::CheckThenWrite
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ManagerConfig {
    pub write_mode: WriteMode,
}

// Snapshot of manager activity
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BookingStats {
    pub availability_checks: usize,
    pub bookings_made: usize,
    pub rejected_already_booked: usize,
    pub rejected_unregistered_room: usize,
}

#[derive(Debug, Default)]
struct StatsCounters {
    availability_checks: AtomicUsize,
    bookings_made: AtomicUsize,
    rejected_already_booked: AtomicUsize,
    rejected_unregistered_room: AtomicUsize,
}

impl StatsCounters {
    fn snapshot(&self) -> BookingStats {
        BookingStats {
            availability_checks: self.availability_checks.load(Ordering::Relaxed),
            bookings_made: self.bookings_made.load(Ordering::Relaxed),
            rejected_already_booked: self.rejected_already_booked.load(Ordering::Relaxed),
            rejected_unregistered_room: self.rejected_unregistered_room.load(Ordering::Relaxed),
        }
    }
}

// Booking API consumed by callers
pub trait BookingManager: Send + Sync {
    // True if nobody is booked into the room on that date
    fn is_room_available(&self, room: RoomNumber, date: NaiveDate) -> bool;

    // Book the guest into the room for the date.
    // Fails with BookingAlreadyExists if the room is taken, without writing.
    fn add_booking(
        &self,
        guest_name: &str,
        room: RoomNumber,
        date: NaiveDate,
    ) -> Result<(), BookingError>;

    // Registered rooms free on the date, in no particular order
    fn available_rooms(&self, date: NaiveDate) -> Vec<RoomNumber>;
}

pub struct HotelBookingManager<S: ReservationStore> {
    store: Arc<S>,
    config: ManagerConfig,
    write_lock: Mutex<()>,
    counters: StatsCounters,
}

impl<S: ReservationStore> HotelBookingManager<S> {
    pub fn new(store: Arc<S>, config: ManagerConfig) -> Self {
        Self {
            store,
            config,
            write_lock: Mutex::new(()),
            counters: StatsCounters::default(),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn write_mode(&self) -> WriteMode {
        self.config.write_mode
    }

    pub fn add_room(&self, room: RoomNumber) {
        self.store.add_room(room);
    }

    pub fn list_rooms(&self) -> HashSet<RoomNumber> {
        self.store.list_rooms()
    }

    pub fn guest_name(&self, room: RoomNumber, date: NaiveDate) -> Option<String> {
        self.store.guest_name(room, date)
    }

    pub fn stats(&self) -> BookingStats {
        self.counters.snapshot()
    }
}

impl<S: ReservationStore> BookingManager for HotelBookingManager<S> {
    fn is_room_available(&self, room: RoomNumber, date: NaiveDate) -> bool {
        self.counters
            .availability_checks
            .fetch_add(1, Ordering::Relaxed);
        self.store.guest_name(room, date).is_none()
    }

    fn add_booking(
        &self,
        guest_name: &str,
        room: RoomNumber,
        date: NaiveDate,
    ) -> Result<(), BookingError> {
        // Held until return in exclusive mode, so check and write are one step
        let _guard = match self.config.write_mode {
            WriteMode::Exclusive => Some(self.write_lock.lock()),
            WriteMode::CheckThenWrite => None,
        };

        if !self.is_room_available(room, date) {
            self.counters
                .rejected_already_booked
                .fetch_add(1, Ordering::Relaxed);
            warn!(room, %date, guest = guest_name, "room already booked");
            return Err(BookingError::BookingAlreadyExists { room, date });
        }

        match self.store.add_booking(guest_name, room, date) {
            Ok(()) => {
                self.counters.bookings_made.fetch_add(1, Ordering::Relaxed);
                info!(room, %date, guest = guest_name, "booking confirmed");
                Ok(())
            }
            Err(err) => {
                if let BookingError::RoomNotRegistered(_) = err {
                    self.counters
                        .rejected_unregistered_room
                        .fetch_add(1, Ordering::Relaxed);
                }
                warn!(room, %date, guest = guest_name, error = %err, "booking rejected by store");
                Err(err)
            }
        }
    }

    fn available_rooms(&self, date: NaiveDate) -> Vec<RoomNumber> {
        self.store
            .list_rooms()
            .into_iter()
            .filter(|room| self.is_room_available(*room, date))
            .collect()
    }
}
