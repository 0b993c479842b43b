//! SQLite database modules.
//!
//! Provides database connection management, schema definitions, and
//! Diesel model types for SQLite persistence.

pub mod connection;
pub mod model;
pub mod schema;

use diesel::result::{DatabaseErrorKind, Error as DieselError};

use crate::error::Error;

/// Map a failed write, surfacing uniqueness conflicts as their own variant.
pub fn write_error(e: DieselError, entity: &'static str) -> Error {
    match e {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, info) => {
            Error::UniqueViolation {
                entity,
                detail: info.message().to_string(),
            }
        }
        other => Error::Database(other.to_string()),
    }
}
