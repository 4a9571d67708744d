mod client;
mod git_info;
mod manager;
mod types;

pub use client::{CodePipelineClient, PipelineStateApi};
pub use git_info::{GitInfo, SOURCE_ACTION_NAME};
pub use manager::{CodePipelineManager, GitInfoGetter, PipelineManager, StateLister};
pub use types::{ActionState, StageState};
