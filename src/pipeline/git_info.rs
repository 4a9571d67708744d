use std::fmt;

use serde::Serialize;
use url::Url;

use crate::error::{PipelineError, Result};

use super::types::{ActionState, StageState};

/// Name of the action whose revision and entity URL carry git provenance.
pub const SOURCE_ACTION_NAME: &str = "Source";

/// Git provenance of a pipeline's source action.
///
/// Only produced by a successful git info lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GitInfo {
    revision: String,
    repo_name: String,
    org_name: String,
}

impl GitInfo {
    /// Commit or version identifier the pipeline is working on.
    pub fn revision(&self) -> &str {
        &self.revision
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    /// Organization or owner of the repository.
    pub fn org_name(&self) -> &str {
        &self.org_name
    }
}

impl fmt::Display for GitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}@{}", self.org_name, self.repo_name, self.revision)
    }
}

/// Finds the first action named [`SOURCE_ACTION_NAME`], scanning stages then
/// actions in the order given.
pub(crate) fn find_source_action(stages: &[StageState]) -> Option<(&StageState, &ActionState)> {
    stages.iter().find_map(|stage| {
        stage
            .actions
            .iter()
            .find(|action| action.name == SOURCE_ACTION_NAME)
            .map(|action| (stage, action))
    })
}

/// Builds [`GitInfo`] from a source action.
///
/// # Errors
///
/// Returns an error if the action has no current revision, no entity URL, or
/// an entity URL that is not of the form `scheme://host/<org>/<repo>[/...]`.
pub(crate) fn git_info_from_action(pipeline: &str, action: &ActionState) -> Result<GitInfo> {
    let revision =
        action
            .current_revision
            .clone()
            .ok_or_else(|| PipelineError::MissingRevision {
                pipeline: pipeline.to_string(),
            })?;

    let entity_url =
        action
            .entity_url
            .as_deref()
            .ok_or_else(|| PipelineError::MissingEntityUrl {
                pipeline: pipeline.to_string(),
            })?;

    let (org_name, repo_name) = parse_repository_url(pipeline, entity_url)?;

    Ok(GitInfo {
        revision,
        repo_name,
        org_name,
    })
}

/// Splits `scheme://host/<org>/<repo>[...]` on `/` and takes segments 3 and 4
/// verbatim. The `url` parser only vets scheme and host; its normalized path
/// is never used.
fn parse_repository_url(pipeline: &str, entity_url: &str) -> Result<(String, String)> {
    let malformed = |reason: &'static str| PipelineError::MalformedSourceUrl {
        pipeline: pipeline.to_string(),
        url: entity_url.to_string(),
        reason,
    };

    let url = Url::parse(entity_url).map_err(|source| PipelineError::InvalidSourceUrl {
        pipeline: pipeline.to_string(),
        url: entity_url.to_string(),
        source,
    })?;

    if url.host_str().is_none() {
        return Err(malformed("URL has no host"));
    }

    let segments: Vec<&str> = entity_url.split('/').collect();
    if segments.get(1) != Some(&"") {
        return Err(malformed("URL has no authority"));
    }

    let org = segments
        .get(3)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| malformed("missing organization path segment"))?;
    let repo = segments
        .get(4)
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| malformed("missing repository path segment"))?;

    Ok((org.to_string(), repo.to_string()))
}
