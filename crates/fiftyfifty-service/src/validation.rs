//! Validation of create requests.
//!
//! All rules are checked on every request and every violation is reported,
//! in a fixed order, so the submitter can fix everything in one go.

use fiftyfifty_core::{extract_video_id, parse_start_time, VideoRef, MAX_TITLE_CHARS};
use std::fmt::Display;

/// A create request as submitted, with every field still free-form text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewVideoSet {
    pub title: String,
    /// Link to the first video.
    pub video_a: String,
    /// Link to the second video.
    pub video_b: String,
    /// Optional `M:SS` start offset for the first video.
    pub time_a: String,
    /// Optional `M:SS` start offset for the second video.
    pub time_b: String,
    /// Network address of the submitter.
    pub creator_address: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValidationIssue {
    InvalidVideoReference,
    InvalidTime,
    SameVideo,
    TitleRequired,
    TitleTooLong,
}

impl ValidationIssue {
    pub fn message(self) -> &'static str {
        match self {
            ValidationIssue::InvalidVideoReference => "Invalid YouTube URL.",
            ValidationIssue::InvalidTime => "Invalid time.",
            ValidationIssue::SameVideo => "URLs lead to the same video.",
            ValidationIssue::TitleRequired => "Title is required.",
            ValidationIssue::TitleTooLong => "Title is too long.",
        }
    }
}

impl Display for ValidationIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// The ordered list of rules a create request violated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationIssue>);

impl ValidationErrors {
    pub fn issues(&self) -> &[ValidationIssue] {
        &self.0
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.0.iter().map(|issue| issue.message()).collect()
    }

    pub fn contains(&self, issue: ValidationIssue) -> bool {
        self.0.contains(&issue)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn push(&mut self, issue: ValidationIssue) {
        self.0.push(issue);
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join(" "))
    }
}

/// The parsed, checked content of a create request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSet {
    pub title: String,
    pub a: VideoRef,
    pub b: VideoRef,
}

/// Checks a create request before anything touches the store.
pub fn validate(request: &NewVideoSet) -> Result<ValidatedSet, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let video_a = extract_video_id(&request.video_a);
    let video_b = extract_video_id(&request.video_b);
    let time_a = parse_start_time(&request.time_a);
    let time_b = parse_start_time(&request.time_b);

    if video_a.is_none() || video_b.is_none() {
        errors.push(ValidationIssue::InvalidVideoReference);
    }
    if time_a.is_none() || time_b.is_none() {
        errors.push(ValidationIssue::InvalidTime);
    }
    if let (Some(a), Some(b)) = (&video_a, &video_b) {
        if a == b {
            errors.push(ValidationIssue::SameVideo);
        }
    }
    if request.title.is_empty() {
        errors.push(ValidationIssue::TitleRequired);
    } else if request.title.chars().count() > MAX_TITLE_CHARS {
        errors.push(ValidationIssue::TitleTooLong);
    }

    match (video_a, video_b, time_a, time_b) {
        (Some(a), Some(b), Some(time_a), Some(time_b)) if errors.is_empty() => Ok(ValidatedSet {
            title: request.title.clone(),
            a: VideoRef::new(a, stored_start_time(time_a)),
            b: VideoRef::new(b, stored_start_time(time_b)),
        }),
        _ => Err(errors),
    }
}

/// A zero offset is stored as "no offset"; existing records rely on that.
fn stored_start_time(seconds: u32) -> Option<u32> {
    (seconds > 0).then_some(seconds)
}
