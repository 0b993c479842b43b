//! Application services (use cases).
//!
//! These services orchestrate domain logic and coordinate adapters through
//! the outbound ports.

pub mod arbitrage;
pub mod order;
pub mod stats;
