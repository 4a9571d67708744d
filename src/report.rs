use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::pipeline::StageState;

#[derive(Debug, Serialize)]
pub struct PipelineStateReport {
    pub pipeline: String,
    pub collected_at: DateTime<Utc>,
    pub total_stages: usize,
    pub total_actions: usize,
    pub stages: Vec<StageState>,
}

impl PipelineStateReport {
    pub fn new(pipeline: impl Into<String>, stages: Vec<StageState>) -> Self {
        Self {
            pipeline: pipeline.into(),
            collected_at: Utc::now(),
            total_stages: stages.len(),
            total_actions: stages.iter().map(|stage| stage.actions.len()).sum(),
            stages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::ActionState;

    fn stage(name: &str, actions: &[&str]) -> StageState {
        StageState {
            name: name.to_string(),
            status: None,
            actions: actions
                .iter()
                .map(|action| ActionState {
                    name: (*action).to_string(),
                    status: None,
                    current_revision: None,
                    entity_url: None,
                    last_status_change: None,
                })
                .collect(),
        }
    }

    #[test]
    fn test_report_counts() {
        let report = PipelineStateReport::new(
            "my-pipeline",
            vec![stage("Source", &["Source"]), stage("Deploy", &["Beta", "Prod"])],
        );

        assert_eq!(report.pipeline, "my-pipeline");
        assert_eq!(report.total_stages, 2);
        assert_eq!(report.total_actions, 3);
    }

    #[test]
    fn test_report_serializes_stages() {
        let report = PipelineStateReport::new("p", vec![stage("Build", &["Compile"])]);
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["pipeline"], "p");
        assert_eq!(json["stages"][0]["name"], "Build");
        assert_eq!(json["stages"][0]["actions"][0]["name"], "Compile");
    }
}
