//! Deterministic ride-dispatch simulation kernel: world state, fairness
//! dispatcher, ride lifecycle, and the tick engine.

pub mod dispatch;
pub mod error;
pub mod world;

pub use error::{EngineError, EntityKind};
pub use world::DispatchWorld;
