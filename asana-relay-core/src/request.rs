use serde::Serialize;

use crate::event::PullRequestMetadata;
use crate::projects::ProjectList;

/// Body of the POST sent to the Asana integration endpoint.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationRequest {
    pub allowed_projects: ProjectList,
    pub blocked_projects: ProjectList,
    pub comment_text: String,
    pub pull_request_description: Option<String>,
    pub pull_request_id: Option<u64>,
    pub pull_request_name: Option<String>,
    #[serde(rename = "pullRequestURL")]
    pub pull_request_url: Option<String>,
    pub pull_request_state: Option<String>,
    pub pull_request_merged: bool,
}

impl NotificationRequest {
    pub fn new(
        allowed_projects: ProjectList,
        blocked_projects: ProjectList,
        comment_text: String,
        metadata: PullRequestMetadata,
    ) -> Self {
        Self {
            allowed_projects,
            blocked_projects,
            comment_text,
            pull_request_description: metadata.description,
            pull_request_id: metadata.id,
            pull_request_name: metadata.name,
            pull_request_url: metadata.url,
            pull_request_state: metadata.state,
            pull_request_merged: metadata.merged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serialized_shape() {
        let request = NotificationRequest::new(
            ProjectList::from_input("111, 222"),
            ProjectList::default(),
            "PR #7 Fix bug is approved by bob -> U".to_string(),
            PullRequestMetadata {
                description: Some("Details".to_string()),
                id: Some(7),
                name: Some("Fix bug".to_string()),
                url: Some("https://github.com/o/r/pull/7".to_string()),
                state: Some("open".to_string()),
                merged: false,
            },
        );

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "allowedProjects": ["111", "222"],
                "blockedProjects": [],
                "commentText": "PR #7 Fix bug is approved by bob -> U",
                "pullRequestDescription": "Details",
                "pullRequestId": 7,
                "pullRequestName": "Fix bug",
                "pullRequestURL": "https://github.com/o/r/pull/7",
                "pullRequestState": "open",
                "pullRequestMerged": false
            })
        );
    }

    #[test]
    fn test_missing_metadata_serializes_as_null() {
        let request = NotificationRequest::new(
            ProjectList::default(),
            ProjectList::default(),
            "hello".to_string(),
            PullRequestMetadata::default(),
        );

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["pullRequestId"], serde_json::Value::Null);
        assert_eq!(value["pullRequestURL"], serde_json::Value::Null);
        assert_eq!(value["pullRequestMerged"], json!(false));
    }
}
