//! Builds the text posted to the linked Asana task for each kind of GitHub event.

use tracing::warn;

use crate::event::{Event, PullRequestMetadata, ReviewState};
use crate::users::UserDirectory;

pub const DEFAULT_MENTION_URL: &str = "https://app.asana.com/0/";
pub const DEFAULT_SERVICE_LOGIN: &str = "github-actions";

/// What the builder decided to do with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    Text(String),
    /// Nothing worth posting; no request is sent.
    NoAction,
}

#[derive(Debug, Clone)]
pub struct CommentSettings {
    /// Prefix that turns an Asana user id into a mention link.
    pub mention_url: String,
    /// Login of the workflow's own bot account. Its comments are posted as a link only.
    pub service_login: String,
    /// Posted verbatim for pull request events other than review requests.
    pub pull_request_text: String,
}

impl Default for CommentSettings {
    fn default() -> Self {
        Self {
            mention_url: DEFAULT_MENTION_URL.to_string(),
            service_login: DEFAULT_SERVICE_LOGIN.to_string(),
            pull_request_text: String::new(),
        }
    }
}

pub fn build_comment(
    event: &Event,
    metadata: &PullRequestMetadata,
    users: &UserDirectory,
    settings: &CommentSettings,
) -> Notification {
    match event {
        Event::IssueComment {
            username,
            body,
            url,
        } => Notification::Text(issue_comment_text(username, body, url, users, settings)),
        Event::PullRequestReview {
            username,
            state,
            body,
            url,
        } => review_text(username, state, body, url, metadata),
        Event::PullRequest {
            username,
            requested_reviewer,
        } => match requested_reviewer {
            Some(reviewer) => Notification::Text(format!(
                "{} is requesting a review from {} on PR #{} -> {}",
                username,
                reviewer,
                display_id(metadata),
                metadata.url.as_deref().unwrap_or_default()
            )),
            None => Notification::Text(settings.pull_request_text.clone()),
        },
        Event::PullRequestReviewComment {
            username,
            line,
            body,
            url,
        } => Notification::Text(format!(
            "{} is requesting the following changes on line {}:\n\n{}\n\nComment URL -> {}",
            username,
            line.map(|l| l.to_string()).unwrap_or_default(),
            body,
            url
        )),
    }
}

fn issue_comment_text(
    username: &str,
    body: &str,
    url: &str,
    users: &UserDirectory,
    settings: &CommentSettings,
) -> String {
    if let Some(reply) = strip_quoted_reply(body) {
        return format!(
            "{} replied:\n\n{}\n\nComment URL -> {}",
            username, reply, url
        );
    }

    if username == settings.service_login {
        return format!("{} commented -> {}", username, url);
    }

    let author = match users.lookup(username) {
        Some(asana_id) => format!("{}{}", settings.mention_url, asana_id),
        None => {
            warn!(
                "No Asana user mapped for GitHub user {}, posting without a mention",
                username
            );
            username.to_string()
        }
    };

    format!(
        "{} commented:\n\n{}\n\nComment URL -> {}",
        author, body, url
    )
}

/// Returns the reply text of a quote-reply, or `None` if no line of `body` starts with `>`.
///
/// Quoted lines are dropped, as is the blank line GitHub puts between the quote and the reply.
fn strip_quoted_reply(body: &str) -> Option<String> {
    let lines: Vec<&str> = body
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();

    if !lines.iter().any(|line| line.starts_with('>')) {
        return None;
    }

    let mut kept = lines.into_iter().filter(|line| !line.starts_with('>')).peekable();
    if kept.peek().is_some_and(|line| line.trim().is_empty()) {
        kept.next();
    }

    Some(kept.collect::<Vec<_>>().join("\n"))
}

fn review_text(
    username: &str,
    state: &ReviewState,
    body: &str,
    url: &str,
    metadata: &PullRequestMetadata,
) -> Notification {
    let text = match state {
        ReviewState::Commented | ReviewState::ChangesRequested => {
            if body.is_empty() {
                return Notification::NoAction;
            }
            format!(
                "{} is requesting the following changes:\n\n{}\n\nComment URL -> {}",
                username, body, url
            )
        }
        ReviewState::Approved => {
            let mut text = format!(
                "PR #{} {} is approved by {}",
                display_id(metadata),
                metadata.name.as_deref().unwrap_or_default(),
                username
            );
            if !body.is_empty() {
                text.push_str(&format!(":\n\n{}\n\nComment URL", body));
            }
            text.push_str(&format!(" -> {}", url));
            text
        }
        ReviewState::Other(other) => format!(
            "PR #{} {} is {} by {} -> {}",
            display_id(metadata),
            metadata.name.as_deref().unwrap_or_default(),
            other,
            username,
            url
        ),
    };

    Notification::Text(text)
}

fn display_id(metadata: &PullRequestMetadata) -> String {
    metadata.id.map(|id| id.to_string()).unwrap_or_default()
}
