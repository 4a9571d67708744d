use aws_sdk_codepipeline::primitives::DateTime as AwsDateTime;
use aws_sdk_codepipeline::types as sdk;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// State of one pipeline stage as reported by CodePipeline.
///
/// Stages keep the order the service returned them in, which is normally the
/// order they run in the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageState {
    /// Stage name (e.g., "Source", "Build", "Deploy")
    pub name: String,
    /// Status of the latest stage execution (e.g., "Succeeded", "InProgress")
    pub status: Option<String>,
    /// Actions of this stage, in service order
    pub actions: Vec<ActionState>,
}

/// State of one action within a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionState {
    /// Action name as declared in the pipeline
    pub name: String,
    /// Status of the latest action execution
    pub status: Option<String>,
    /// Revision the action is currently working on (commit id for git sources)
    pub current_revision: Option<String>,
    /// Location of the entity the action works with (e.g., the repository URL)
    pub entity_url: Option<String>,
    /// When the latest execution last changed status
    pub last_status_change: Option<DateTime<Utc>>,
}

impl From<&sdk::StageState> for StageState {
    fn from(stage: &sdk::StageState) -> Self {
        Self {
            name: stage.stage_name().unwrap_or_default().to_string(),
            status: stage
                .latest_execution()
                .map(|execution| execution.status().as_str().to_string()),
            actions: stage.action_states().iter().map(ActionState::from).collect(),
        }
    }
}

impl From<&sdk::ActionState> for ActionState {
    fn from(action: &sdk::ActionState) -> Self {
        let execution = action.latest_execution();

        Self {
            name: action.action_name().unwrap_or_default().to_string(),
            status: execution
                .and_then(sdk::ActionExecution::status)
                .map(|status| status.as_str().to_string()),
            current_revision: action
                .current_revision()
                .map(|revision| revision.revision_id().to_string()),
            entity_url: action.entity_url().map(ToString::to_string),
            last_status_change: execution
                .and_then(sdk::ActionExecution::last_status_change)
                .and_then(to_utc),
        }
    }
}

fn to_utc(timestamp: &AwsDateTime) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(timestamp.secs(), timestamp.subsec_nanos())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sdk_source_action() -> sdk::ActionState {
        let revision = sdk::ActionRevision::builder()
            .revision_id("abc123")
            .revision_change_id("abc123")
            .created(AwsDateTime::from_secs(1_700_000_000))
            .build()
            .unwrap();

        sdk::ActionState::builder()
            .action_name("Source")
            .current_revision(revision)
            .entity_url("https://github.com/acme/widgets")
            .latest_execution(
                sdk::ActionExecution::builder()
                    .status(sdk::ActionExecutionStatus::Succeeded)
                    .last_status_change(AwsDateTime::from_secs(1_700_000_000))
                    .build(),
            )
            .build()
    }

    #[test]
    fn test_stage_state_from_sdk() {
        let stage = sdk::StageState::builder()
            .stage_name("Source")
            .action_states(sdk_source_action())
            .action_states(sdk::ActionState::builder().action_name("Lint").build())
            .latest_execution(
                sdk::StageExecution::builder()
                    .pipeline_execution_id("exec-1")
                    .status(sdk::StageExecutionStatus::InProgress)
                    .build()
                    .unwrap(),
            )
            .build();

        let converted = StageState::from(&stage);

        assert_eq!(converted.name, "Source");
        assert_eq!(converted.status.as_deref(), Some("InProgress"));
        let names: Vec<_> = converted.actions.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, ["Source", "Lint"]);
    }

    #[test]
    fn test_action_state_from_sdk() {
        let converted = ActionState::from(&sdk_source_action());

        assert_eq!(converted.name, "Source");
        assert_eq!(converted.status.as_deref(), Some("Succeeded"));
        assert_eq!(converted.current_revision.as_deref(), Some("abc123"));
        assert_eq!(
            converted.entity_url.as_deref(),
            Some("https://github.com/acme/widgets")
        );
        assert_eq!(
            converted.last_status_change,
            DateTime::from_timestamp(1_700_000_000, 0)
        );
    }

    #[test]
    fn test_action_state_without_fields() {
        let converted = ActionState::from(&sdk::ActionState::builder().build());

        assert_eq!(converted.name, "");
        assert!(converted.status.is_none());
        assert!(converted.current_revision.is_none());
        assert!(converted.entity_url.is_none());
        assert!(converted.last_status_change.is_none());
    }
}
