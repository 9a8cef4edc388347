use std::process::ExitCode;

use anyhow::Context as _;
use clap::Parser as _;

#[tokio::main]
async fn main() -> ExitCode {
    if let Err(err) = try_main().await {
        eprintln!("{err:#}");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}

async fn try_main() -> anyhow::Result<()> {
    audible_titles::logging::init().context("init logging")?;

    let cli = audible_titles::cli::Cli::parse();
    tracing::debug!(?cli, "parsed cli");

    match cli.command {
        audible_titles::cli::Command::Crawl(args) => {
            audible_titles::crawl::run(args).await.context("crawl")?;
        }
        audible_titles::cli::Command::Parse(args) => {
            audible_titles::listing::run(args).context("parse")?;
        }
        audible_titles::cli::Command::Seeds(args) => {
            audible_titles::seeds::run(args).context("seeds")?;
        }
    }

    Ok(())
}
