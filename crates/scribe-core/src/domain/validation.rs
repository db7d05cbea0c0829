//! Post validation - turns an unchecked [`PostCandidate`] into a [`ValidPost`].
//!
//! Every rule is evaluated on every call and all failures are reported
//! together, in a fixed order:
//!
//! 1. `title` must not be blank
//! 2. `title` must be at most [`TITLE_MAX_LENGTH`] characters
//! 3. `body` must not be blank
//! 4. `category` reference must be present
//! 5. `user` reference must be present
//!
//! Only the presence of a reference is checked here. Whether the referenced
//! category or user actually exists is up to the persistence backend.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Maximum title length, counted in characters.
pub const TITLE_MAX_LENGTH: usize = 140;

/// A validated attribute of a post. Ordered as the rules run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Title,
    Body,
    Category,
    User,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Body => "body",
            Field::Category => "category",
            Field::User => "user",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The rule a field failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldErrorKind {
    /// Text was empty or whitespace only.
    Blank,
    /// Text exceeded `limit` characters.
    TooLong,
    /// A required reference was absent.
    Required,
}

/// A single rule failure attributed to one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub kind: FieldErrorKind,
    /// Only set for [`FieldErrorKind::TooLong`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<usize>,
}

impl FieldError {
    pub fn blank(field: Field) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Blank,
            limit: None,
        }
    }

    pub fn too_long(field: Field, limit: usize) -> Self {
        Self {
            field,
            kind: FieldErrorKind::TooLong,
            limit: Some(limit),
        }
    }

    pub fn required(field: Field) -> Self {
        Self {
            field,
            kind: FieldErrorKind::Required,
            limit: None,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.limit) {
            (FieldErrorKind::Blank, _) => write!(f, "{} can't be blank", self.field),
            (FieldErrorKind::TooLong, Some(limit)) => write!(
                f,
                "{} is too long (maximum is {} characters)",
                self.field, limit
            ),
            (FieldErrorKind::TooLong, None) => write!(f, "{} is too long", self.field),
            (FieldErrorKind::Required, _) => write!(f, "{} must exist", self.field),
        }
    }
}

/// All rule failures of one validation call, in rule order. Never empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(transparent)]
#[error("Validation failed: {}", join_messages(.0))]
pub struct ValidationErrors(Vec<FieldError>);

fn join_messages(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

impl ValidationErrors {
    pub fn as_slice(&self) -> &[FieldError] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldError> {
        self.0.iter()
    }

    /// Errors attributed to `field`.
    pub fn for_field(&self, field: Field) -> impl Iterator<Item = &FieldError> {
        self.0.iter().filter(move |e| e.field == field)
    }

    pub fn contains(&self, field: Field, kind: FieldErrorKind) -> bool {
        self.0.iter().any(|e| e.field == field && e.kind == kind)
    }

    /// Distinct failing fields, in rule order.
    pub fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        for error in &self.0 {
            if !fields.contains(&error.field) {
                fields.push(error.field);
            }
        }
        fields
    }

    /// Messages keyed by field, iterating in rule order.
    pub fn to_field_map(&self) -> BTreeMap<Field, Vec<String>> {
        let mut map: BTreeMap<Field, Vec<String>> = BTreeMap::new();
        for error in &self.0 {
            map.entry(error.field).or_default().push(error.to_string());
        }
        map
    }

    pub fn into_inner(self) -> Vec<FieldError> {
        self.0
    }
}

impl IntoIterator for ValidationErrors {
    type Item = FieldError;
    type IntoIter = std::vec::IntoIter<FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Unchecked post input.
///
/// Missing or `null` text fields deserialize to the empty string, and missing,
/// `null` or blank references to `None`, so a partial payload still goes
/// through every rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostCandidate {
    #[serde(deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(deserialize_with = "null_as_empty")]
    pub body: String,
    #[serde(deserialize_with = "blank_as_none")]
    pub category_id: Option<Uuid>,
    #[serde(deserialize_with = "blank_as_none")]
    pub user_id: Option<Uuid>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<Uuid>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) if !is_blank(&raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

impl PostCandidate {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
            category_id: None,
            user_id: None,
        }
    }

    pub fn with_category(mut self, category_id: Uuid) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_user(mut self, user_id: Uuid) -> Self {
        self.user_id = Some(user_id);
        self
    }

    pub fn validate(self) -> Result<ValidPost, ValidationErrors> {
        validate(self)
    }
}

/// Post data that passed [`validate`]. Only obtainable through it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidPost {
    title: String,
    body: String,
    category_id: Uuid,
    user_id: Uuid,
}

impl ValidPost {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn category_id(&self) -> Uuid {
        self.category_id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn into_candidate(self) -> PostCandidate {
        PostCandidate {
            title: self.title,
            body: self.body,
            category_id: Some(self.category_id),
            user_id: Some(self.user_id),
        }
    }

    pub(crate) fn into_parts(self) -> (String, String, Uuid, Uuid) {
        (self.title, self.body, self.category_id, self.user_id)
    }
}

/// Empty after trimming Unicode whitespace.
fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Check a candidate against every post rule.
pub fn validate(candidate: PostCandidate) -> Result<ValidPost, ValidationErrors> {
    let mut errors = Vec::new();

    if is_blank(&candidate.title) {
        errors.push(FieldError::blank(Field::Title));
    }
    if candidate.title.chars().count() > TITLE_MAX_LENGTH {
        errors.push(FieldError::too_long(Field::Title, TITLE_MAX_LENGTH));
    }
    if is_blank(&candidate.body) {
        errors.push(FieldError::blank(Field::Body));
    }
    if candidate.category_id.is_none() {
        errors.push(FieldError::required(Field::Category));
    }
    if candidate.user_id.is_none() {
        errors.push(FieldError::required(Field::User));
    }

    match (candidate.category_id, candidate.user_id) {
        (Some(category_id), Some(user_id)) if errors.is_empty() => Ok(ValidPost {
            title: candidate.title,
            body: candidate.body,
            category_id,
            user_id,
        }),
        _ => Err(ValidationErrors(errors)),
    }
}
