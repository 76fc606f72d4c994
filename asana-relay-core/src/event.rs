use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

use crate::error::{RelayError, Result};

/// The workflow events this action knows how to turn into a comment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    PullRequest,
    PullRequestReview,
    IssueComment,
    PullRequestReviewComment,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::PullRequest,
        EventKind::PullRequestReview,
        EventKind::IssueComment,
        EventKind::PullRequestReviewComment,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::PullRequest => "pull_request",
            EventKind::PullRequestReview => "pull_request_review",
            EventKind::IssueComment => "issue_comment",
            EventKind::PullRequestReviewComment => "pull_request_review_comment",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| RelayError::UnsupportedTrigger(s.to_string()))
    }
}

/// Check the event name supplied by the workflow runner against the supported set.
pub fn validate_trigger(event_name: &str) -> Result<EventKind> {
    event_name.parse()
}

/// The parts of a GitHub webhook payload this action reads.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct EventPayload {
    pub action: Option<String>,
    pub pull_request: Option<PullRequest>,
    pub issue: Option<Issue>,
    pub comment: Option<Comment>,
    pub review: Option<Review>,
    pub sender: Option<User>,
    pub requested_reviewer: Option<User>,
    pub requested_team: Option<Team>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct PullRequest {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub state: Option<String>,
    pub merged: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
pub struct Issue {
    pub number: Option<u64>,
    pub title: Option<String>,
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Comment {
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub user: Option<User>,
    pub original_line: Option<u64>,
    pub line: Option<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Review {
    pub body: Option<String>,
    pub html_url: Option<String>,
    pub state: Option<String>,
    pub user: Option<User>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct User {
    pub login: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Team {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewState {
    Commented,
    ChangesRequested,
    Approved,
    Other(String),
}

impl ReviewState {
    pub fn parse(state: &str) -> Self {
        match state.to_ascii_lowercase().as_str() {
            "commented" => ReviewState::Commented,
            "changes_requested" => ReviewState::ChangesRequested,
            "approved" => ReviewState::Approved,
            other => ReviewState::Other(other.to_string()),
        }
    }
}

/// An event reduced to what the comment builder needs, one variant per [`EventKind`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    IssueComment {
        username: String,
        body: String,
        url: String,
    },
    PullRequestReview {
        username: String,
        state: ReviewState,
        body: String,
        url: String,
    },
    PullRequest {
        username: String,
        /// Set when the action is `review_requested`.
        requested_reviewer: Option<String>,
    },
    PullRequestReviewComment {
        username: String,
        line: Option<u64>,
        body: String,
        url: String,
    },
}

impl Event {
    pub fn from_payload(kind: EventKind, payload: &EventPayload) -> Result<Self> {
        match kind {
            EventKind::IssueComment => {
                let comment = payload.comment.as_ref().ok_or(RelayError::MissingField("comment"))?;
                Ok(Event::IssueComment {
                    username: login_of(comment.user.as_ref(), "comment.user")?,
                    body: comment.body.clone().unwrap_or_default(),
                    url: comment.html_url.clone().unwrap_or_default(),
                })
            }
            EventKind::PullRequestReview => {
                let review = payload.review.as_ref().ok_or(RelayError::MissingField("review"))?;
                Ok(Event::PullRequestReview {
                    username: login_of(review.user.as_ref(), "review.user")?,
                    state: ReviewState::parse(review.state.as_deref().unwrap_or_default()),
                    body: review.body.clone().unwrap_or_default(),
                    url: review.html_url.clone().unwrap_or_default(),
                })
            }
            EventKind::PullRequest => {
                let requested_reviewer = if payload.action.as_deref() == Some("review_requested") {
                    // Requests addressed to a team carry `requested_team` instead of a user
                    let reviewer = payload
                        .requested_reviewer
                        .as_ref()
                        .map(|user| user.login.clone())
                        .or_else(|| payload.requested_team.as_ref().map(|team| team.name.clone()))
                        .ok_or(RelayError::MissingField("requested_reviewer"))?;
                    Some(reviewer)
                } else {
                    None
                };
                Ok(Event::PullRequest {
                    username: login_of(payload.sender.as_ref(), "sender")?,
                    requested_reviewer,
                })
            }
            EventKind::PullRequestReviewComment => {
                let comment = payload.comment.as_ref().ok_or(RelayError::MissingField("comment"))?;
                Ok(Event::PullRequestReviewComment {
                    username: login_of(comment.user.as_ref(), "comment.user")?,
                    line: comment.original_line.or(comment.line),
                    body: comment.body.clone().unwrap_or_default(),
                    url: comment.html_url.clone().unwrap_or_default(),
                })
            }
        }
    }
}

fn login_of(user: Option<&User>, field: &'static str) -> Result<String> {
    user.map(|u| u.login.clone())
        .ok_or(RelayError::MissingField(field))
}

/// Pull request (or issue) fields forwarded alongside the comment text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PullRequestMetadata {
    pub description: Option<String>,
    pub id: Option<u64>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub state: Option<String>,
    pub merged: bool,
}

impl PullRequestMetadata {
    /// Prefers `pull_request`, falling back to `issue` field by field.
    pub fn from_payload(payload: &EventPayload) -> Self {
        let pr = payload.pull_request.as_ref();
        let issue = payload.issue.as_ref();

        Self {
            description: non_empty(pr.and_then(|p| p.body.clone()))
                .or_else(|| non_empty(issue.and_then(|i| i.body.clone()))),
            id: pr.and_then(|p| p.number).or_else(|| issue.and_then(|i| i.number)),
            name: non_empty(pr.and_then(|p| p.title.clone()))
                .or_else(|| non_empty(issue.and_then(|i| i.title.clone()))),
            url: non_empty(pr.and_then(|p| p.html_url.clone()))
                .or_else(|| non_empty(issue.and_then(|i| i.html_url.clone()))),
            state: non_empty(pr.and_then(|p| p.state.clone()))
                .or_else(|| non_empty(issue.and_then(|i| i.state.clone()))),
            merged: pr.and_then(|p| p.merged).unwrap_or(false),
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}
