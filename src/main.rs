//! `filetag`: attach tags and descriptions to files.
//!
//! ```text
//! filetag browse [-f DIR] [--json]
//! filetag tag -f FILE [-t TAG]... [-d DESCRIPTION]
//! ```

mod cli;
mod error;
mod logging;
mod output;

use crate::cli::{BrowseArgs, Cli, Command, TagArgs};
use crate::error::{ErrorKind, Result};
use clap::Parser;
use exn::ResultExt;
use filetag_config::Config;
use filetag_library::Tagger;
use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:?}");
            ExitCode::FAILURE
        },
    }
}

async fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.as_deref()).or_raise(|| ErrorKind::Config)?;
    if let Some(tag_file) = cli.tag_file {
        config.tag_file = tag_file;
        config.validate().or_raise(|| ErrorKind::Config)?;
    }
    tracing::debug!(tag_file = %config.tag_file, vacuum = config.vacuum, "Configuration loaded");
    let tagger = Tagger::new().with_tag_file(config.tag_file).with_vacuum(config.vacuum);
    match cli.command {
        Command::Browse(args) => browse(&tagger, args).await,
        Command::Tag(args) => tag(&tagger, args).await,
    }
}

async fn browse(tagger: &Tagger, args: BrowseArgs) -> Result<()> {
    let listing = tagger.list_files(&args.path).await;
    // Whatever was collected is still worth showing when the walk failed.
    let mut out = std::io::stdout().lock();
    if args.json {
        output::write_json(&mut out, &listing.entries).or_raise(|| ErrorKind::Output)?;
    } else {
        output::write_plain(&mut out, &listing.entries).or_raise(|| ErrorKind::Output)?;
    }
    match listing.error {
        Some(err) => Err(err.raise(ErrorKind::Browse(args.path))),
        None => Ok(()),
    }
}

async fn tag(tagger: &Tagger, args: TagArgs) -> Result<()> {
    let description = args.description.as_deref().unwrap_or_default();
    if args.tags.is_empty() && description.is_empty() {
        tracing::warn!(file = %args.file.display(), "No tags or description given; nothing to do");
        return Ok(());
    }
    if !tokio::fs::try_exists(&args.file).await.unwrap_or(false) {
        tracing::warn!(file = %args.file.display(), "File does not exist; tagging it anyway");
    }
    tagger.tag_file(&args.file, args.tags.as_slice()).await.or_raise(|| ErrorKind::Tag(args.file.clone()))?;
    tagger.set_description(&args.file, description).await.or_raise(|| ErrorKind::Tag(args.file.clone()))?;
    tracing::info!(file = %args.file.display(), tags = args.tags.len(), described = !description.is_empty(), "File tagged");
    Ok(())
}
