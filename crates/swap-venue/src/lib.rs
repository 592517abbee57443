//! Venue connectivity for the swap engine.
//!
//! The engine consumes the venue through two narrow traits:
//! - `DepthProvider`: depth-of-book snapshots
//! - `ExecutionProvider`: market order placement
//!
//! `VenueRestClient` implements both against a Binance-style spot REST
//! API; `MockVenue` implements both in memory for tests and simulation.

pub mod error;
pub mod provider;
pub mod rest;

pub use error::{VenueError, VenueResult};
pub use provider::{
    BoxFuture, DepthProvider, DynDepthProvider, DynExecutionProvider, ExecutionProvider, MockVenue,
    RecordedOrder,
};
pub use rest::{VenueRestClient, VenueRestConfig};
