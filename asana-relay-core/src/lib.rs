pub mod comment;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod projects;
pub mod relay;
pub mod request;
pub mod users;

pub use comment::{build_comment, CommentSettings, Notification};
pub use dispatch::{DispatchOutcome, Dispatcher, DEFAULT_ACTION_URL};
pub use error::{RelayError, Result};
pub use event::{validate_trigger, Event, EventKind, EventPayload, PullRequestMetadata};
pub use projects::{validate_project_lists, ProjectList};
pub use relay::{prepare, relay, RelayInput, RelayOutcome};
pub use request::NotificationRequest;
pub use users::{UserDirectory, UserEntry};
