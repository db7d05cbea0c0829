//! # Scribe Core
//!
//! The domain layer of Scribe.
//! This crate holds the `Post` entity, its validation rules and the ports a
//! persistence backend must implement. It has zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use domain::validation::{
    Field, FieldError, FieldErrorKind, PostCandidate, TITLE_MAX_LENGTH, ValidPost,
    ValidationErrors, validate,
};
pub use error::{DomainError, RepoError};
pub use service::PostService;
