//! Query-only adapter over AWS CodePipeline.
//!
//! [`pipeline::CodePipelineManager`] lists the stage states of a pipeline and
//! derives git provenance ([`pipeline::GitInfo`]) from its `Source` action.
//! The rest of the crate backs the `pipelens` command line tool.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod pipeline;
pub mod report;

pub use error::{PipelineError, Result};
