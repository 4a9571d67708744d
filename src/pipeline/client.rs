use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_codepipeline::Client;

use crate::error::Result;

use super::types::StageState;

/// Remote capability the pipeline manager is built on.
///
/// One call, one request: fetch the stage states of a named pipeline.
#[async_trait]
pub trait PipelineStateApi: Send + Sync {
    async fn get_pipeline_state(&self, pipeline_name: &str) -> Result<Vec<StageState>>;
}

/// [`PipelineStateApi`] backed by the AWS CodePipeline service.
#[derive(Clone, Debug)]
pub struct CodePipelineClient {
    client: Client,
}

impl CodePipelineClient {
    /// Creates a client from an already loaded AWS configuration.
    ///
    /// Credentials, region and retry behaviour all come from `sdk_config`.
    pub fn new(sdk_config: &SdkConfig) -> Self {
        Self {
            client: Client::new(sdk_config),
        }
    }

    pub fn from_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl PipelineStateApi for CodePipelineClient {
    async fn get_pipeline_state(&self, pipeline_name: &str) -> Result<Vec<StageState>> {
        let output = self
            .client
            .get_pipeline_state()
            .name(pipeline_name)
            .send()
            .await?;

        Ok(output.stage_states().iter().map(StageState::from).collect())
    }
}
