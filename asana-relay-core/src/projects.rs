use serde::Serialize;

use crate::error::{RelayError, Result};

/// Asana project identifiers taken from a comma-separated action input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ProjectList(Vec<String>);

impl ProjectList {
    /// Splits on commas and trims each token. Empty tokens are dropped; order and duplicates are kept.
    pub fn from_input(input: &str) -> Self {
        Self(
            input
                .split(',')
                .map(str::trim)
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, project: &str) -> bool {
        self.0.iter().any(|p| p == project)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for ProjectList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

/// An allow list and a block list may not both be configured, and may never share a project.
pub fn validate_project_lists(allowed: &ProjectList, blocked: &ProjectList) -> Result<()> {
    if !allowed.is_empty() && !blocked.is_empty() {
        let mut shared: Vec<&str> = allowed.iter().filter(|p| blocked.contains(p)).collect();
        shared.sort_unstable();
        shared.dedup();
        if !shared.is_empty() {
            return Err(RelayError::InvalidProjectConfiguration(format!(
                "projects {} appear in both allowed-projects and blocked-projects",
                shared.join(", ")
            )));
        }
        return Err(RelayError::InvalidProjectConfiguration(
            "allowed-projects and blocked-projects cannot both be set".to_string(),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_from_input_trims_and_drops_empty_tokens() {
        let list = ProjectList::from_input(" 123 ,456,, 789 ,");
        assert_eq!(list, ProjectList::from_iter(["123", "456", "789"]));
    }

    #[test]
    fn test_from_input_empty_string() {
        assert!(ProjectList::from_input("").is_empty());
        assert!(ProjectList::from_input(" , ,").is_empty());
    }

    #[test]
    fn test_serializes_as_array() {
        let list = ProjectList::from_input("1,2");
        assert_eq!(serde_json::to_string(&list).unwrap(), r#"["1","2"]"#);
    }

    #[test]
    fn test_validate_both_empty_is_ok() {
        assert!(validate_project_lists(&ProjectList::default(), &ProjectList::default()).is_ok());
    }

    #[test]
    fn test_validate_one_side_is_ok() {
        let list = ProjectList::from_input("1,2");
        assert!(validate_project_lists(&list, &ProjectList::default()).is_ok());
        assert!(validate_project_lists(&ProjectList::default(), &list).is_ok());
    }

    #[test]
    fn test_validate_both_set_fails() {
        let err = validate_project_lists(
            &ProjectList::from_input("1"),
            &ProjectList::from_input("2"),
        )
        .unwrap_err();
        assert!(matches!(err, RelayError::InvalidProjectConfiguration(_)));
    }

    #[test]
    fn test_validate_overlap_names_shared_projects() {
        let err = validate_project_lists(
            &ProjectList::from_input("1,2,3"),
            &ProjectList::from_input("3,4"),
        )
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid project configuration: projects 3 appear in both allowed-projects and blocked-projects"
        );
    }

    fn token() -> impl Strategy<Value = String> {
        "[0-9a-z]{1,6}"
    }

    proptest! {
        #[test]
        fn from_input_keeps_every_non_empty_token_in_order(
            tokens in proptest::collection::vec(token(), 0..20),
            padding in proptest::collection::vec("[ \t]{0,3}", 0..20),
        ) {
            let input = tokens
                .iter()
                .enumerate()
                .map(|(i, t)| {
                    let pad = padding.get(i).map(String::as_str).unwrap_or("");
                    format!("{pad}{t}{pad}")
                })
                .collect::<Vec<_>>()
                .join(",");

            let list = ProjectList::from_input(&input);
            prop_assert_eq!(list.len(), tokens.len());
            prop_assert!(list.iter().eq(tokens.iter().map(String::as_str)));
        }

        #[test]
        fn duplicates_are_preserved(t in token(), n in 1usize..6) {
            let input = vec![t.clone(); n].join(",");
            prop_assert_eq!(ProjectList::from_input(&input).len(), n);
        }

        #[test]
        fn validation_fails_whenever_both_lists_are_non_empty(
            allowed in proptest::collection::vec(token(), 1..8),
            blocked in proptest::collection::vec(token(), 1..8),
        ) {
            let allowed = ProjectList::from_iter(allowed);
            let blocked = ProjectList::from_iter(blocked);
            prop_assert!(validate_project_lists(&allowed, &blocked).is_err());
        }

        #[test]
        fn validation_passes_when_one_list_is_empty(
            projects in proptest::collection::vec(token(), 0..8),
        ) {
            let projects = ProjectList::from_iter(projects);
            prop_assert!(validate_project_lists(&projects, &ProjectList::default()).is_ok());
            prop_assert!(validate_project_lists(&ProjectList::default(), &projects).is_ok());
        }
    }
}
