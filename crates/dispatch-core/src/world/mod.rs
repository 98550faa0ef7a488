use std::collections::{BTreeMap, BTreeSet};

mod entities;
mod events;
mod init;
mod rides;
mod snapshot;
mod step;

use contracts::{
    DriverSnapshot, DriverStatus, Event, EventType, Position, RideSnapshot, RideStatus,
    RiderSnapshot, WorldSnapshot, SCHEMA_VERSION_V1,
};
use serde_json::{json, Value};

use crate::dispatch;
use crate::error::{EngineError, EntityKind};

/// Internal driver record. The world's driver table is the sole owner;
/// rides refer to drivers by id only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Driver {
    pub id: String,
    pub x: i64,
    pub y: i64,
    pub status: DriverStatus,
    pub assigned_count: u64,
    pub last_busy_tick: Option<u64>,
    pub current_ride_id: Option<String>,
    /// Meaningful only while `status` is `on_trip`.
    pub is_heading_to_dropoff: bool,
}

impl Driver {
    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rider {
    pub id: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ride {
    pub id: String,
    pub rider_id: String,
    pub pickup: Position,
    pub dropoff: Position,
    pub status: RideStatus,
    pub driver_id: Option<String>,
    pub rejected_driver_ids: BTreeSet<String>,
}

/// The simulation root: one tick counter, three entity tables, and the
/// observability log. Every operation mutates through `&mut self`, so a
/// single lock around the world serializes all external access.
#[derive(Debug, Default)]
pub struct DispatchWorld {
    tick: u64,
    drivers: BTreeMap<String, Driver>,
    riders: BTreeMap<String, Rider>,
    rides: BTreeMap<String, Ride>,
    event_log: Vec<Event>,
    next_entity_sequence: u64,
    event_sequence_tick: u64,
    next_event_sequence: u64,
}

#[cfg(test)]
mod tests;
