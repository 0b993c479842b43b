use thiserror::Error;

use crate::domain::error::{DomainError, ValidationError};
use crate::domain::worker::WorkerFailure;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Caller input rejected before any worker ran.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Calculator given unusable numbers.
    #[error(transparent)]
    InvalidInput(#[from] DomainError),

    /// The worker ran but did not produce a usable result.
    #[error("worker execution failed ({kind}): {failure}", kind = .0.classification(), failure = .0)]
    WorkerExecution(#[from] WorkerFailure),

    /// The external listing exists but could not be recorded locally.
    #[error("listing {listing_id} for {source_id} was created but saving it failed: {cause}")]
    PersistenceAfterSideEffect {
        source_id: String,
        listing_id: String,
        #[source]
        cause: Box<Error>,
    },

    /// A product with this source id is already recorded.
    #[error("product {source_id} is already listed{}", unrecorded_suffix(.listing_id.as_deref()))]
    DuplicateListing {
        source_id: String,
        listing_id: Option<String>,
    },

    /// A uniqueness constraint rejected a write.
    #[error("duplicate {entity}: {detail}")]
    UniqueViolation { entity: &'static str, detail: String },

    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("connection error: {0}")]
    Connection(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("parse error: {0}")]
    Parse(String),
}

impl Error {
    /// True for errors that mean local and external state have diverged.
    #[must_use]
    pub const fn is_divergent(&self) -> bool {
        matches!(
            self,
            Self::PersistenceAfterSideEffect { .. }
                | Self::DuplicateListing {
                    listing_id: Some(_),
                    ..
                }
        )
    }

    /// True when a uniqueness constraint naming `column` rejected a write.
    #[must_use]
    pub fn violates_unique(&self, column: &str) -> bool {
        matches!(self, Self::UniqueViolation { detail, .. } if detail.contains(column))
    }

    /// Stable machine-readable name of the error category.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Validation(_) => "validation",
            Self::InvalidInput(_) => "invalid_input",
            Self::WorkerExecution(_) => "worker_execution",
            Self::PersistenceAfterSideEffect { .. } => "persistence_after_side_effect",
            Self::DuplicateListing { .. } => "duplicate_listing",
            Self::UniqueViolation { .. } => "unique_violation",
            Self::NotFound { .. } => "not_found",
            Self::Json(_) => "json",
            Self::Io(_) => "io",
            Self::Connection(_) => "connection",
            Self::Database(_) => "database",
            Self::Parse(_) => "parse",
        }
    }
}

fn unrecorded_suffix(listing_id: Option<&str>) -> String {
    listing_id
        .map(|id| format!(" (new listing {id} not recorded)"))
        .unwrap_or_default()
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn worker_errors_name_their_classification() {
        let err = Error::from(WorkerFailure::MalformedOutput {
            reason: "expected value at line 1".into(),
            raw: "oops".into(),
        });
        assert!(err.to_string().starts_with("worker execution failed (malformed_output)"));
    }

    #[test]
    fn divergence_is_flagged() {
        let err = Error::PersistenceAfterSideEffect {
            source_id: "B01".into(),
            listing_id: "L9".into(),
            cause: Box::new(Error::Database("disk full".into())),
        };
        assert!(err.is_divergent());
        assert!(err.to_string().contains("L9"));

        let dup = Error::DuplicateListing {
            source_id: "B01".into(),
            listing_id: Some("L10".into()),
        };
        assert!(dup.is_divergent());
        assert!(!Error::from(DomainError::NonPositiveCost { cost: dec!(0) }).is_divergent());
        assert_eq!(dup.kind(), "duplicate_listing");
    }

    #[test]
    fn unique_violations_name_their_column() {
        let err = Error::UniqueViolation {
            entity: "product",
            detail: "UNIQUE constraint failed: products.listing_id".into(),
        };
        assert!(err.violates_unique("listing_id"));
        assert!(!err.violates_unique("source_id"));
        assert!(!Error::Database("source_id".into()).violates_unique("source_id"));
    }

    #[test]
    fn validation_errors_keep_their_message() {
        let err = Error::from(ValidationError::MissingField { field: "keywords" });
        assert_eq!(err.kind(), "validation");
        assert!(err.to_string().contains("keywords"));
    }
}
