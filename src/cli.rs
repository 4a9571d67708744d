use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use serde::Serialize;
use std::path::PathBuf;

use crate::config::{Config, OutputConfig, OutputFormat};
use crate::logging;
use crate::output::{self, FetchProgress};
use crate::pipeline::{CodePipelineManager, GitInfoGetter, StateLister};
use crate::report::PipelineStateReport;

#[derive(Parser)]
#[command(name = "pipelens")]
#[command(author, version, about = "CodePipeline state and git provenance", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (defaults to ./pipelens.{toml,json,yaml,yml})
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[arg(long, global = true)]
    region: Option<String>,

    #[arg(long, global = true)]
    profile: Option<String>,

    #[arg(long, global = true)]
    endpoint_url: Option<String>,

    #[arg(short, long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[arg(short, long, global = true)]
    output: Option<PathBuf>,

    #[arg(short, long, global = true, default_value_t = false)]
    pretty: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current stage and action states of a pipeline
    State { pipeline: String },

    /// Show the git revision, repository and organization a pipeline is building
    GitInfo { pipeline: String },
}

impl Cli {
    /// Applies command line overrides on top of the loaded configuration.
    fn apply_overrides(&self, mut config: Config) -> Config {
        if let Some(region) = &self.region {
            config.aws.region = Some(region.clone());
        }
        if let Some(profile) = &self.profile {
            config.aws.profile = Some(profile.clone());
        }
        if let Some(endpoint_url) = &self.endpoint_url {
            config.aws.endpoint_url = Some(endpoint_url.clone());
        }
        if let Some(format) = self.format {
            config.output.format = format;
        }
        config.output.pretty |= self.pretty;
        config
    }

    async fn execute_state(
        &self,
        lister: &dyn StateLister,
        pipeline: &str,
        output: &OutputConfig,
    ) -> Result<()> {
        info!("Fetching state for pipeline: {}", pipeline);

        let progress = FetchProgress::start(&format!("Fetching state of '{pipeline}'"));
        let stages = match lister.list_state(pipeline).await {
            Ok(stages) => stages,
            Err(e) => {
                progress.abandon();
                return Err(e).with_context(|| format!("Failed to get state of pipeline '{pipeline}'"));
            }
        };
        progress.finish(&format!("Fetched {} stages", stages.len()));

        let report = PipelineStateReport::new(pipeline, stages);
        let rendered = match output.format {
            OutputFormat::Summary => output::render_state_summary(&report),
            OutputFormat::Json => to_json(&report, output.pretty)?,
        };

        self.write_output(&rendered)
    }

    async fn execute_git_info(
        &self,
        getter: &dyn GitInfoGetter,
        pipeline: &str,
        output: &OutputConfig,
    ) -> Result<()> {
        info!("Fetching git info for pipeline: {}", pipeline);

        let progress = FetchProgress::start(&format!("Locating source of '{pipeline}'"));
        let git_info = match getter.get_git_info(pipeline).await {
            Ok(git_info) => git_info,
            Err(e) => {
                progress.abandon();
                return Err(e)
                    .with_context(|| format!("Failed to get git info of pipeline '{pipeline}'"));
            }
        };
        progress.finish(&format!("Found {git_info}"));

        let rendered = match output.format {
            OutputFormat::Summary => output::render_git_info(pipeline, &git_info),
            OutputFormat::Json => to_json(&git_info, output.pretty)?,
        };

        self.write_output(&rendered)
    }

    fn write_output(&self, rendered: &str) -> Result<()> {
        if let Some(output_path) = &self.output {
            std::fs::write(output_path, rendered).with_context(|| {
                format!("Failed to write output file: {}", output_path.display())
            })?;
            info!("Output written to: {}", output_path.display());
        } else {
            println!("{}", rendered);
        }

        Ok(())
    }

    pub async fn execute(&self) -> Result<()> {
        let config = self.apply_overrides(Config::load(self.config.as_deref())?);
        let sdk_config = config.aws.load_sdk_config().await;
        let manager = CodePipelineManager::new(&sdk_config, logging::global());

        match &self.command {
            Commands::State { pipeline } => {
                self.execute_state(&manager, pipeline, &config.output).await
            }
            Commands::GitInfo { pipeline } => {
                self.execute_git_info(&manager, pipeline, &config.output)
                    .await
            }
        }
    }
}

fn to_json(value: &impl Serialize, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(json)
}
