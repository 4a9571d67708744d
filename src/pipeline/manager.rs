use async_trait::async_trait;
use aws_config::SdkConfig;
use log::Level;

use crate::error::{PipelineError, Result};
use crate::logging::{self, SharedLogger};

use super::client::{CodePipelineClient, PipelineStateApi};
use super::git_info::{find_source_action, git_info_from_action, GitInfo};
use super::types::StageState;

/// Lists the current stage states of a pipeline.
#[async_trait]
pub trait StateLister: Send + Sync {
    /// Fetches stage states for `pipeline_name` in service order.
    ///
    /// # Errors
    ///
    /// Returns the remote service error unchanged.
    async fn list_state(&self, pipeline_name: &str) -> Result<Vec<StageState>>;
}

/// Derives git provenance from a pipeline's `Source` action.
#[async_trait]
pub trait GitInfoGetter: Send + Sync {
    async fn get_git_info(&self, pipeline_name: &str) -> Result<GitInfo>;
}

/// Every pipeline capability in one bound.
pub trait PipelineManager: StateLister + GitInfoGetter {}

impl<T: StateLister + GitInfoGetter> PipelineManager for T {}

/// Pipeline manager for AWS CodePipeline.
///
/// Holds a read-only API handle and issues exactly one request per call. Safe
/// to share between tasks; it keeps no state of its own.
pub struct CodePipelineManager<A = CodePipelineClient> {
    api: A,
    logger: SharedLogger,
}

impl CodePipelineManager {
    /// Creates a manager talking to CodePipeline with the caller's AWS configuration.
    pub fn new(sdk_config: &SdkConfig, logger: SharedLogger) -> Self {
        logging::emit(
            &*logger,
            Level::Debug,
            module_path!(),
            format_args!("Connecting to CodePipeline service"),
        );

        Self::with_api(CodePipelineClient::new(sdk_config), logger)
    }
}

impl<A: PipelineStateApi> CodePipelineManager<A> {
    pub fn with_api(api: A, logger: SharedLogger) -> Self {
        Self { api, logger }
    }
}

#[async_trait]
impl<A: PipelineStateApi> StateLister for CodePipelineManager<A> {
    async fn list_state(&self, pipeline_name: &str) -> Result<Vec<StageState>> {
        logging::emit(
            &*self.logger,
            Level::Debug,
            module_path!(),
            format_args!("Searching for pipeline state for pipeline named '{pipeline_name}'"),
        );

        self.api.get_pipeline_state(pipeline_name).await
    }
}

#[async_trait]
impl<A: PipelineStateApi> GitInfoGetter for CodePipelineManager<A> {
    /// Returns git info of the first action named `Source`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The `GetPipelineState` request fails (error passed through unchanged)
    /// - No stage contains an action named `Source`
    /// - The source action lacks a revision or a `scheme://host/org/repo` entity URL
    async fn get_git_info(&self, pipeline_name: &str) -> Result<GitInfo> {
        let stage_states = self.list_state(pipeline_name).await?;

        let Some((stage, action)) = find_source_action(&stage_states) else {
            return Err(PipelineError::SourceNotFound(pipeline_name.to_string()));
        };

        logging::emit(
            &*self.logger,
            Level::Debug,
            module_path!(),
            format_args!(
                "Found source action in stage '{}' of pipeline '{pipeline_name}'",
                stage.name
            ),
        );

        git_info_from_action(pipeline_name, action)
    }
}
