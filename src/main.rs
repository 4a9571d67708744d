use anyhow::Result;
use clap::Parser;
use log::info;
use pipelens::cli::Cli;
use pipelens::output;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    output::print_banner();

    let cli = Cli::parse();
    info!("Starting PipeLens - CodePipeline inspector");
    cli.execute().await?;

    Ok(())
}
