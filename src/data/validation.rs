use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use super::{Reaction, Thought, User};

/// Upper bound, in characters, for thought and reaction text.
pub const MAX_TEXT_LEN: usize = 280;

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

#[derive(Debug, Clone, PartialEq, Error)]
#[error("{}", summarize(.issues))]
pub struct ValidationError {
    pub issues: Vec<ValidationIssue>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationIssue {
    pub field: String,
    pub code: String,
    pub message: String,
}

fn summarize(issues: &[ValidationIssue]) -> String {
    let messages = issues.iter().map(|i| i.message.as_str()).collect::<Vec<_>>();
    format!("Validation failed: {}", messages.join("; "))
}

impl ValidationIssue {
    pub fn new(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn duplicate(field: &str, value: &str) -> Self {
        Self::new(field, "duplicate", format!("{} '{}' is already taken", field, value))
    }
}

impl ValidationError {
    pub fn new<I>(issues: I) -> Self
    where
        I: IntoIterator<Item = ValidationIssue>,
    {
        Self {
            issues: issues.into_iter().collect(),
        }
    }

    pub fn single(field: impl Into<String>, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new([ValidationIssue::new(field, code, message)])
    }

    fn check(issues: Vec<ValidationIssue>) -> Result<(), Self> {
        if issues.is_empty() {
            Ok(())
        } else {
            Err(Self::new(issues))
        }
    }
}

fn required(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) -> bool {
    if value.is_empty() {
        issues.push(ValidationIssue::new(field, "required", format!("{} is required", field)));
        false
    } else {
        true
    }
}

fn max_length(field: &str, value: &str, issues: &mut Vec<ValidationIssue>) {
    let len = value.chars().count();
    if len > MAX_TEXT_LEN {
        issues.push(ValidationIssue::new(
            field,
            "length",
            format!("{} must be at most {} characters, got {}", field, MAX_TEXT_LEN, len),
        ));
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

/// Shape checks only. Uniqueness needs the collection and is checked by the
/// user store.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    let mut issues = vec![];
    required("username", &user.username, &mut issues);
    if required("email", &user.email, &mut issues) && !is_valid_email(&user.email) {
        issues.push(ValidationIssue::new(
            "email",
            "format",
            format!("'{}' is not a valid email address", user.email),
        ));
    }
    ValidationError::check(issues)
}

pub fn validate_thought(thought: &Thought) -> Result<(), ValidationError> {
    let mut issues = vec![];
    if thought.thought_text.is_empty() {
        issues.push(ValidationIssue::new(
            "thoughtText",
            "length",
            format!("thoughtText must be between 1 and {} characters", MAX_TEXT_LEN),
        ));
    } else {
        max_length("thoughtText", &thought.thought_text, &mut issues);
    }
    required("username", &thought.username, &mut issues);
    ValidationError::check(issues)
}

pub fn validate_reaction(reaction: &Reaction) -> Result<(), ValidationError> {
    let mut issues = vec![];
    if required("reactionBody", &reaction.reaction_body, &mut issues) {
        max_length("reactionBody", &reaction.reaction_body, &mut issues);
    }
    required("username", &reaction.username, &mut issues);
    ValidationError::check(issues)
}
