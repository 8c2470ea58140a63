use std::fmt;

use http::StatusCode;
use thiserror::Error;

/// SQLSTATE code the storage engine reports for a violated unique constraint
pub const UNIQUE_VIOLATION: &str = "23505";

/// Anything raised during request processing
///
/// A failure is immutable once raised. The translator only inspects it and
/// drops it after the response descriptor has been produced; no failure
/// outlives the request that raised it.
#[derive(Debug, Clone, Error)]
pub enum Failure {
    /// The storage layer rejected an operation
    #[error("storage failure: {0}")]
    Storage(StorageFailure),

    /// One or more input fields failed validation
    #[error("validation failed: {0}")]
    Validation(ValidationFailure),

    /// Anything that does not belong to a known family
    #[error("{0}")]
    Other(OtherFailure),
}

/// A storage-layer rejection, carrying the engine-level cause when known
///
/// Both the origin and its fields are optional so that partially-shaped
/// driver errors remain representable; the rule table treats any gap as
/// "does not match" rather than an error.
#[derive(Debug, Clone, Default)]
pub struct StorageFailure {
    /// Nested driver-level cause
    pub origin: Option<EngineError>,
}

/// The engine-level error nested inside a storage failure
#[derive(Debug, Clone, Default)]
pub struct EngineError {
    /// Machine-readable engine code (SQLSTATE for Postgres)
    pub code: Option<String>,
    /// Human-readable detail reported by the engine
    pub detail: Option<String>,
}

/// An ordered collection of field-level validation errors
#[derive(Debug, Clone, Default)]
pub struct ValidationFailure {
    pub fields: Vec<FieldFailure>,
}

/// A single field-level validation error
#[derive(Debug, Clone)]
pub struct FieldFailure {
    /// Field path the message refers to, when known
    pub field: Option<String>,
    pub message: String,
}

/// An unclassified failure
#[derive(Debug, Clone)]
pub struct OtherFailure {
    pub message: String,
    /// Status the failure itself encodes, honored by the fallback rule
    pub status: Option<StatusCode>,
}

impl Failure {
    /// Storage failure for a violated unique constraint
    pub fn unique_violation(detail: impl Into<String>) -> Self {
        Self::Storage(StorageFailure {
            origin: Some(EngineError {
                code: Some(UNIQUE_VIOLATION.to_owned()),
                detail: Some(detail.into()),
            }),
        })
    }

    /// Storage failure with an arbitrary (possibly partial) engine cause
    pub fn storage(code: Option<String>, detail: Option<String>) -> Self {
        Self::Storage(StorageFailure {
            origin: Some(EngineError { code, detail }),
        })
    }

    /// Validation failure from field-level errors, order preserved
    pub fn validation(fields: Vec<FieldFailure>) -> Self {
        Self::Validation(ValidationFailure { fields })
    }

    /// Validation failure from bare messages, order preserved
    pub fn invalid<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Validation(ValidationFailure {
            fields: messages.into_iter().map(FieldFailure::new).collect(),
        })
    }

    /// Unclassified failure carrying only a message
    pub fn message(message: impl Into<String>) -> Self {
        Self::Other(OtherFailure {
            message: message.into(),
            status: None,
        })
    }

    /// Unclassified failure that already encodes a response status
    pub fn with_status(message: impl Into<String>, status: StatusCode) -> Self {
        Self::Other(OtherFailure {
            message: message.into(),
            status: Some(status),
        })
    }

    /// Status the failure itself encodes, when it encodes one
    pub const fn encoded_status(&self) -> Option<StatusCode> {
        match self {
            Self::Other(other) => other.status,
            Self::Storage(_) | Self::Validation(_) => None,
        }
    }

    /// Engine-level cause, when the failure carries one
    pub const fn origin(&self) -> Option<&EngineError> {
        match self {
            Self::Storage(StorageFailure { origin: Some(origin) }) => Some(origin),
            _ => None,
        }
    }
}

impl From<anyhow::Error> for Failure {
    fn from(err: anyhow::Error) -> Self {
        Self::Other(OtherFailure {
            message: format!("{err:#}"),
            status: None,
        })
    }
}

impl FieldFailure {
    /// Field error without a field path
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }

    /// Field error attributed to a named field
    pub fn for_field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
        }
    }
}

impl fmt::Display for StorageFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => origin.fmt(f),
            None => f.write_str("unknown engine error"),
        }
    }
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.code, &self.detail) {
            (Some(code), Some(detail)) => write!(f, "engine code {code}: {detail}"),
            (Some(code), None) => write!(f, "engine code {code}"),
            (None, Some(detail)) => f.write_str(detail),
            (None, None) => f.write_str("unspecified engine error"),
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fields.is_empty() {
            return f.write_str("no field errors");
        }
        let joined = self
            .fields
            .iter()
            .map(|field| field.message.as_str())
            .collect::<Vec<_>>()
            .join("; ");
        f.write_str(&joined)
    }
}

impl fmt::Display for OtherFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_violation_carries_code_and_detail() {
        let failure = Failure::unique_violation("email already taken");
        let origin = failure.origin().expect("origin present");
        assert_eq!(origin.code.as_deref(), Some(UNIQUE_VIOLATION));
        assert_eq!(origin.detail.as_deref(), Some("email already taken"));
    }

    #[test]
    fn invalid_preserves_message_order() {
        let failure = Failure::invalid(["first", "second", "third"]);
        let Failure::Validation(validation) = failure else {
            panic!("expected validation failure");
        };
        let messages: Vec<_> = validation.fields.iter().map(|f| f.message.as_str()).collect();
        assert_eq!(messages, ["first", "second", "third"]);
    }

    #[test]
    fn encoded_status_only_on_other() {
        assert_eq!(
            Failure::with_status("gone", StatusCode::NOT_FOUND).encoded_status(),
            Some(StatusCode::NOT_FOUND)
        );
        assert_eq!(Failure::message("boom").encoded_status(), None);
        assert_eq!(Failure::unique_violation("dup").encoded_status(), None);
    }

    #[test]
    fn display_uses_message_for_other() {
        let failure = Failure::message("something broke");
        assert_eq!(failure.to_string(), "something broke");
    }

    #[test]
    fn display_for_partial_engine_error() {
        let failure = Failure::storage(Some("23502".to_owned()), None);
        assert_eq!(failure.to_string(), "storage failure: engine code 23502");

        let failure = Failure::Storage(StorageFailure::default());
        assert_eq!(failure.to_string(), "storage failure: unknown engine error");
    }

    #[test]
    fn anyhow_chain_is_captured() {
        let err = anyhow::anyhow!("root cause").context("outer");
        let failure = Failure::from(err);
        assert_eq!(failure.to_string(), "outer: root cause");
        assert_eq!(failure.encoded_status(), None);
    }
}
