//! Trait definitions (hexagonal ports). Depend only on domain.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │      Application        │
//!     ┌──────────────┤  Orchestrator + Stats   ├──────────────┐
//!     │              └─────────────────────────┘              │
//!     ▼                                                       ▼
//! ┌──────────────┐                                    ┌───────────────┐
//! │    Worker    │                                    │ Product/Order │
//! │ (subprocess) │                                    │ Store (SQLite)│
//! └──────────────┘                                    └───────────────┘
//! ```

pub mod outbound;
