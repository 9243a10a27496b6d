//! Error types for tessera.
//!
//! This module defines all error types used throughout the library. Variants
//! fall into three groups: host preconditions (checked before any mutation),
//! malformed packer input, and job-file I/O.

use std::path::PathBuf;
use thiserror::Error;

use crate::scene::InteractionMode;

/// Result type alias using [`PackError`].
pub type Result<T> = std::result::Result<T, PackError>;

/// Errors that can occur while packing or baking UVs.
#[derive(Error, Debug)]
pub enum PackError {
    /// The scene is in the wrong interaction mode for the operation.
    #[error("operation requires {expected} mode, scene is in {found} mode")]
    WrongMode {
        /// The mode the operation requires.
        expected: InteractionMode,
        /// The mode the scene is in.
        found: InteractionMode,
    },

    /// No object is active in the scene.
    #[error("no active object")]
    NoActiveObject,

    /// The active object does not carry mesh data.
    #[error("object '{name}' is a {kind}, not a mesh")]
    NotAMesh {
        /// The object name.
        name: String,
        /// The kind of data the object carries.
        kind: &'static str,
    },

    /// The requested vertex group does not exist on the object.
    #[error("object '{object}' has no vertex group named '{group}'")]
    MissingVertexGroup {
        /// The object name.
        object: String,
        /// The requested group name.
        group: String,
    },

    /// The vertex group exists but no face lies fully inside it.
    #[error("vertex group '{group}' on '{object}' selects no faces")]
    EmptySelection {
        /// The object name.
        object: String,
        /// The group name.
        group: String,
    },

    /// A polygon has no corners.
    #[error("polygon {polygon} has no corners")]
    EmptyPolygon {
        /// Index of the polygon in the input list.
        polygon: usize,
    },

    /// A loop index appears more than once in the input.
    #[error("loop index {loop_index} appears again in polygon {polygon}")]
    DuplicateLoop {
        /// The repeated loop index.
        loop_index: u32,
        /// Index of the polygon holding the second occurrence.
        polygon: usize,
    },

    /// A face references an invalid vertex index.
    #[error("face {face} references invalid vertex index {vertex}")]
    InvalidVertexIndex {
        /// The face index.
        face: usize,
        /// The invalid vertex index.
        vertex: usize,
    },

    /// A face has fewer than three corners.
    #[error("face {face} has {corners} corners, need at least 3")]
    InvalidFace {
        /// The face index.
        face: usize,
        /// Number of corners found.
        corners: usize,
    },

    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error loading a job file.
    #[error("failed to load {path}: {message}")]
    LoadError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Error saving a UV file.
    #[error("failed to save {path}: {message}")]
    SaveError {
        /// The file path.
        path: PathBuf,
        /// Error message.
        message: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// The invalid value (as string).
        value: String,
        /// Reason the value is invalid.
        reason: &'static str,
    },
}

impl PackError {
    /// Create an invalid parameter error.
    pub fn invalid_param<T: std::fmt::Display>(
        name: &'static str,
        value: T,
        reason: &'static str,
    ) -> Self {
        PackError::InvalidParameter {
            name,
            value: value.to_string(),
            reason,
        }
    }

    /// Whether this error is a host precondition failure.
    ///
    /// Precondition failures are reported before anything is mutated.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            PackError::WrongMode { .. }
                | PackError::NoActiveObject
                | PackError::NotAMesh { .. }
                | PackError::MissingVertexGroup { .. }
                | PackError::EmptySelection { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_param_message() {
        let err = PackError::invalid_param("rows", 0, "must be at least 1");
        assert_eq!(err.to_string(), "invalid parameter: rows = 0 (must be at least 1)");
        assert!(!err.is_precondition());
    }

    #[test]
    fn test_precondition_classification() {
        assert!(PackError::NoActiveObject.is_precondition());
        assert!(PackError::WrongMode {
            expected: InteractionMode::Object,
            found: InteractionMode::Edit,
        }
        .is_precondition());
        assert!(!PackError::EmptyPolygon { polygon: 3 }.is_precondition());
    }

    #[test]
    fn test_wrong_mode_message() {
        let err = PackError::WrongMode {
            expected: InteractionMode::Object,
            found: InteractionMode::Edit,
        };
        assert_eq!(
            err.to_string(),
            "operation requires object mode, scene is in edit mode"
        );
    }
}
