//! Error taxonomy for the VDA5050 wire contract
//!
//! Codec errors describe a payload whose JSON shape or content violates the
//! schema of the selected protocol version. Validation errors describe a
//! message that parsed cleanly but whose node/edge graph is inconsistent.
//! Both are recoverable: callers report them as protocol-level rejections.

use std::fmt;
use thiserror::Error;

/// Errors raised while decoding or encoding a message
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CodecError {
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Unexpected type at '{path}': expected {expected}, found {found}")]
    UnexpectedType {
        path: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Invalid enum value at '{0}': {1:?}")]
    InvalidEnumValue(String, String),

    #[error("Invalid timestamp at '{0}': {1:?}")]
    InvalidTimestamp(String, String),

    #[error("Unsupported protocol version: {0:?}")]
    UnsupportedVersion(String),

    #[error("Field '{path}' is not defined in protocol version {version}")]
    IncompatibleField { path: String, version: String },

    #[error("Non-finite number at '{0}'")]
    NonFiniteNumber(String),

    #[error("Malformed JSON payload: {0}")]
    MalformedJson(String),

    #[error("Payload of {size} bytes exceeds limit of {limit} bytes")]
    PayloadTooLarge { size: usize, limit: usize },
}

impl CodecError {
    /// Create an unsupported version error
    pub fn unsupported_version<S: Into<String>>(version: S) -> Self {
        Self::UnsupportedVersion(version.into())
    }
}

impl From<serde_json::Error> for CodecError {
    fn from(err: serde_json::Error) -> Self {
        Self::MalformedJson(err.to_string())
    }
}

/// Kind of graph element, used when reporting sequencing problems
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ElementKind {
    Node,
    Edge,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ElementKind::Node => f.write_str("node"),
            ElementKind::Edge => f.write_str("edge"),
        }
    }
}

/// Errors raised by the graph and consistency validator
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ValidationError {
    #[error("Order must contain at least one node")]
    EmptyNodeList,

    #[error("Order base plan is empty: first node {0:?} is not released")]
    EmptyBase(String),

    #[error("Duplicate sequenceId {0}")]
    DuplicateSequenceId(u32),

    #[error("Sequence gap: {next} does not follow {previous}")]
    SequenceGap { previous: u32, next: u32 },

    #[error("{kind} {id:?} has sequenceId {sequence_id} of the wrong parity")]
    SequenceParity {
        kind: ElementKind,
        id: String,
        sequence_id: u32,
    },

    #[error("Expected {expected} at sequenceId {sequence_id}, found {found}")]
    MisplacedElement {
        sequence_id: u32,
        expected: ElementKind,
        found: ElementKind,
    },

    #[error("Horizon element precedes released element at sequenceId {sequence_id}")]
    HorizonBeforeBase { sequence_id: u32 },

    #[error("Base plan ends on edge {0:?}")]
    BaseEndsOnEdge(String),

    #[error("Edge {0:?} references node {1:?} which is not its neighbour")]
    DanglingEdgeReference(String, String),

    #[error("Duplicate actionId {0:?}")]
    DuplicateActionId(String),

    #[error("Action {action_id:?} repeats parameter key {key:?}")]
    DuplicateParameterKey { action_id: String, key: String },

    #[error("Malformed trajectory on edge {edge_id:?}: {reason}")]
    MalformedTrajectory { edge_id: String, reason: String },

    #[error("{field} has {actual} entries, limit is {limit}")]
    LimitExceeded {
        field: String,
        limit: u32,
        actual: usize,
    },
}

impl ValidationError {
    /// Create a malformed trajectory error
    pub fn malformed_trajectory<S: Into<String>, R: Into<String>>(edge_id: S, reason: R) -> Self {
        Self::MalformedTrajectory {
            edge_id: edge_id.into(),
            reason: reason.into(),
        }
    }
}

/// Flat classification of every failure the core can report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    MissingField,
    UnexpectedType,
    InvalidEnumValue,
    InvalidTimestamp,
    UnsupportedVersion,
    IncompatibleField,
    NonFiniteNumber,
    MalformedJson,
    PayloadTooLarge,
    EmptyNodeList,
    EmptyBase,
    DuplicateSequenceId,
    SequenceGap,
    SequenceParity,
    MisplacedElement,
    HorizonBeforeBase,
    BaseEndsOnEdge,
    DanglingEdgeReference,
    DuplicateActionId,
    DuplicateParameterKey,
    MalformedTrajectory,
    LimitExceeded,
}

impl ErrorKind {
    /// True for failures detected by the codec stage
    pub fn is_codec(&self) -> bool {
        matches!(
            self,
            ErrorKind::MissingField
                | ErrorKind::UnexpectedType
                | ErrorKind::InvalidEnumValue
                | ErrorKind::InvalidTimestamp
                | ErrorKind::UnsupportedVersion
                | ErrorKind::IncompatibleField
                | ErrorKind::NonFiniteNumber
                | ErrorKind::MalformedJson
                | ErrorKind::PayloadTooLarge
        )
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl CodecError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CodecError::MissingField(_) => ErrorKind::MissingField,
            CodecError::UnexpectedType { .. } => ErrorKind::UnexpectedType,
            CodecError::InvalidEnumValue(..) => ErrorKind::InvalidEnumValue,
            CodecError::InvalidTimestamp(..) => ErrorKind::InvalidTimestamp,
            CodecError::UnsupportedVersion(_) => ErrorKind::UnsupportedVersion,
            CodecError::IncompatibleField { .. } => ErrorKind::IncompatibleField,
            CodecError::NonFiniteNumber(_) => ErrorKind::NonFiniteNumber,
            CodecError::MalformedJson(_) => ErrorKind::MalformedJson,
            CodecError::PayloadTooLarge { .. } => ErrorKind::PayloadTooLarge,
        }
    }
}

impl ValidationError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValidationError::EmptyNodeList => ErrorKind::EmptyNodeList,
            ValidationError::EmptyBase(_) => ErrorKind::EmptyBase,
            ValidationError::DuplicateSequenceId(_) => ErrorKind::DuplicateSequenceId,
            ValidationError::SequenceGap { .. } => ErrorKind::SequenceGap,
            ValidationError::SequenceParity { .. } => ErrorKind::SequenceParity,
            ValidationError::MisplacedElement { .. } => ErrorKind::MisplacedElement,
            ValidationError::HorizonBeforeBase { .. } => ErrorKind::HorizonBeforeBase,
            ValidationError::BaseEndsOnEdge(_) => ErrorKind::BaseEndsOnEdge,
            ValidationError::DanglingEdgeReference(..) => ErrorKind::DanglingEdgeReference,
            ValidationError::DuplicateActionId(_) => ErrorKind::DuplicateActionId,
            ValidationError::DuplicateParameterKey { .. } => ErrorKind::DuplicateParameterKey,
            ValidationError::MalformedTrajectory { .. } => ErrorKind::MalformedTrajectory,
            ValidationError::LimitExceeded { .. } => ErrorKind::LimitExceeded,
        }
    }
}

/// Main error type returned by the decode/validate pipeline
#[derive(Debug, Clone, Error, PartialEq)]
pub enum Vda5050Error {
    #[error("Codec error: {0}")]
    Codec(#[from] CodecError),

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl Vda5050Error {
    /// Flat error kind regardless of which stage failed
    pub fn kind(&self) -> ErrorKind {
        match self {
            Vda5050Error::Codec(e) => e.kind(),
            Vda5050Error::Validation(e) => e.kind(),
        }
    }

    pub fn as_codec(&self) -> Option<&CodecError> {
        match self {
            Vda5050Error::Codec(e) => Some(e),
            Vda5050Error::Validation(_) => None,
        }
    }

    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Vda5050Error::Validation(e) => Some(e),
            Vda5050Error::Codec(_) => None,
        }
    }
}

/// Result type for codec operations
pub type CodecResult<T> = Result<T, CodecError>;

/// Result type for validation operations
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Result type for the full decode pipeline
pub type Vda5050Result<T> = Result<T, Vda5050Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_message() {
        let error = CodecError::MissingField("headerId".to_string());
        assert_eq!(error.to_string(), "Missing required field: headerId");
        assert_eq!(error.kind(), ErrorKind::MissingField);
    }

    #[test]
    fn test_dangling_edge_reference_message() {
        let error = ValidationError::DanglingEdgeReference("e1".to_string(), "n3".to_string());
        assert!(error.to_string().contains("\"e1\""));
        assert!(error.to_string().contains("\"n3\""));
        assert_eq!(error.kind(), ErrorKind::DanglingEdgeReference);
    }

    #[test]
    fn test_from_codec_error() {
        let error: Vda5050Error = CodecError::unsupported_version("3.0.0").into();
        assert_eq!(error.kind(), ErrorKind::UnsupportedVersion);
        assert!(error.as_codec().is_some());
        assert!(error.as_validation().is_none());
        assert!(error.kind().is_codec());
    }

    #[test]
    fn test_from_validation_error() {
        let error: Vda5050Error = ValidationError::DuplicateSequenceId(2).into();
        assert_eq!(error.kind(), ErrorKind::DuplicateSequenceId);
        assert!(!error.kind().is_codec());
        assert_eq!(
            error.as_validation(),
            Some(&ValidationError::DuplicateSequenceId(2))
        );
    }

    #[test]
    fn test_serde_json_error_maps_to_malformed_json() {
        let parse_error = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: CodecError = parse_error.into();
        assert_eq!(error.kind(), ErrorKind::MalformedJson);
    }

    #[test]
    fn test_unexpected_type_message() {
        let error = CodecError::UnexpectedType {
            path: "nodes[0].sequenceId".to_string(),
            expected: "unsigned integer",
            found: "string",
        };
        assert_eq!(
            error.to_string(),
            "Unexpected type at 'nodes[0].sequenceId': expected unsigned integer, found string"
        );
    }

    #[test]
    fn test_malformed_trajectory_constructor() {
        let error = ValidationError::malformed_trajectory("e1", "knot vector too short");
        assert!(matches!(error, ValidationError::MalformedTrajectory { .. }));
        assert!(error.to_string().contains("knot vector too short"));
    }
}
