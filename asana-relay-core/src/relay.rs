use tracing::info;

use crate::comment::{build_comment, CommentSettings, Notification};
use crate::dispatch::{DispatchOutcome, Dispatcher};
use crate::error::Result;
use crate::event::{validate_trigger, Event, EventPayload, PullRequestMetadata};
use crate::projects::{validate_project_lists, ProjectList};
use crate::request::NotificationRequest;
use crate::users::UserDirectory;

/// Everything one invocation reads from the workflow.
#[derive(Debug, Clone)]
pub struct RelayInput {
    pub event_name: String,
    pub payload: EventPayload,
    pub allowed_projects: ProjectList,
    pub blocked_projects: ProjectList,
    pub settings: CommentSettings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RelayOutcome {
    Sent(DispatchOutcome),
    /// The event produced nothing to post and no request was made.
    Skipped,
}

/// Runs every step up to the send. `None` means the event should be skipped.
pub fn prepare(input: &RelayInput, users: &UserDirectory) -> Result<Option<NotificationRequest>> {
    let kind = validate_trigger(&input.event_name)?;
    validate_project_lists(&input.allowed_projects, &input.blocked_projects)?;

    let metadata = PullRequestMetadata::from_payload(&input.payload);
    let event = Event::from_payload(kind, &input.payload)?;

    match build_comment(&event, &metadata, users, &input.settings) {
        Notification::Text(comment_text) => Ok(Some(NotificationRequest::new(
            input.allowed_projects.clone(),
            input.blocked_projects.clone(),
            comment_text,
            metadata,
        ))),
        Notification::NoAction => {
            info!("Nothing to post for {} event", kind);
            Ok(None)
        }
    }
}

pub async fn relay(
    input: &RelayInput,
    users: &UserDirectory,
    dispatcher: &Dispatcher,
) -> Result<RelayOutcome> {
    match prepare(input, users)? {
        Some(request) => Ok(RelayOutcome::Sent(dispatcher.dispatch(&request).await?)),
        None => Ok(RelayOutcome::Skipped),
    }
}
