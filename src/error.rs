use aws_sdk_codepipeline::error::SdkError;
use aws_sdk_codepipeline::operation::get_pipeline_state::GetPipelineStateError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    /// Failure of the `GetPipelineState` call, exactly as the SDK reported it.
    #[error(transparent)]
    CodePipeline(Box<SdkError<GetPipelineStateError>>),

    #[error("Can not obtain git information from CodePipeline: {0}")]
    SourceNotFound(String),

    #[error("Source action of pipeline '{pipeline}' has no current revision")]
    MissingRevision { pipeline: String },

    #[error("Source action of pipeline '{pipeline}' has no entity URL")]
    MissingEntityUrl { pipeline: String },

    #[error("Invalid source URL '{url}' in pipeline '{pipeline}': {source}")]
    InvalidSourceUrl {
        pipeline: String,
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Malformed source URL '{url}' in pipeline '{pipeline}': {reason}")]
    MalformedSourceUrl {
        pipeline: String,
        url: String,
        reason: &'static str,
    },
}

impl From<SdkError<GetPipelineStateError>> for PipelineError {
    fn from(err: SdkError<GetPipelineStateError>) -> Self {
        Self::CodePipeline(Box::new(err))
    }
}

pub type Result<T> = std::result::Result<T, PipelineError>;
