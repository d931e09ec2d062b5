//! The checkpoint aggregation engine.
//!
//! `checkpoints` lays out the x-axis, `reducers` and `contribution` compute one
//! value per checkpoint, and `services` assembles them into chart series.

pub mod checkpoints;
pub mod contribution;
pub mod reducers;
pub mod services;

pub use checkpoints::{generate_checkpoints, Checkpoint};
