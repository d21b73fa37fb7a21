//! Engine of a discrete-time epidemic simulation: agents on a bounded grid
//! move randomly, transmit on contact and die probabilistically, while the
//! per-day health counts accumulate until no infected agent remains.

pub mod stat;
pub mod util;
pub mod world;

pub use world::World;
