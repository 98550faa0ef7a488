//! v1 cross-boundary contracts shared by the dispatch kernel, the HTTP API,
//! and the browser visualizer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const SCHEMA_VERSION_V1: &str = "1.0";

/// Inclusive coordinate bounds of the simulated city grid.
pub const GRID_MIN: i64 = 0;
pub const GRID_MAX: i64 = 99;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Position {
    pub x: i64,
    pub y: i64,
}

impl Position {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    pub fn in_bounds(&self) -> bool {
        (GRID_MIN..=GRID_MAX).contains(&self.x) && (GRID_MIN..=GRID_MAX).contains(&self.y)
    }

    /// Manhattan distance; pickup travel time at one cell per tick.
    pub fn manhattan_distance(&self, other: &Position) -> u64 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DriverStatus {
    Available,
    Assigned,
    OnTrip,
    /// Legal wire value; no engine operation currently produces it.
    Offline,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum RideStatus {
    Waiting,
    /// Legal wire value; the engine offers rides as `awaiting_accept` and
    /// never stores `assigned`.
    Assigned,
    AwaitingAccept,
    /// Legal wire value; a rejection re-dispatches or fails instead.
    Rejected,
    InProgress,
    Completed,
    Failed,
}

impl RideStatus {
    /// A ride still coupled to live entities; cascades fail these.
    pub fn is_active(&self) -> bool {
        matches!(
            self,
            Self::Waiting | Self::Assigned | Self::AwaitingAccept | Self::InProgress
        )
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Failed)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DriverSnapshot {
    pub id: String,
    pub x: i64,
    pub y: i64,
    pub status: DriverStatus,
    pub assigned_count: u64,
    pub last_busy_tick: Option<u64>,
    pub current_ride_id: Option<String>,
    pub is_heading_to_dropoff: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RiderSnapshot {
    pub id: String,
    pub x: i64,
    pub y: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RideSnapshot {
    pub id: String,
    pub rider_id: String,
    pub pickup: Position,
    pub dropoff: Position,
    pub status: RideStatus,
    pub driver_id: Option<String>,
    pub rejected_driver_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WorldSnapshot {
    pub schema_version: String,
    pub tick: u64,
    pub drivers: Vec<DriverSnapshot>,
    pub riders: Vec<RiderSnapshot>,
    pub rides: Vec<RideSnapshot>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateDriverRequest {
    pub x: i64,
    pub y: i64,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateRiderRequest {
    pub x: i64,
    pub y: i64,
    pub id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct RequestRideRequest {
    pub rider_id: String,
    pub pickup: Position,
    pub dropoff: Position,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    DriverCreated,
    DriverDeleted,
    RiderCreated,
    RiderDeleted,
    RideRequested,
    RideOffered,
    RideAccepted,
    RideRejected,
    RideCompleted,
    RideFailed,
    WorldReset,
}

/// One entry of the world's observability log. Events never feed back into
/// engine behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Event {
    pub schema_version: String,
    pub event_id: String,
    pub tick: u64,
    pub sequence_in_tick: u64,
    pub event_type: EventType,
    pub subject_id: String,
    pub details: Option<Value>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    NotFound,
    Conflict,
    InvalidInput,
    InternalError,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiError {
    pub schema_version: String,
    pub error_code: ErrorCode,
    pub message: String,
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(error_code: ErrorCode, message: impl Into<String>, details: Option<String>) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            error_code,
            message: message.into(),
            details,
        }
    }
}
