//! Command-line arguments.

use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

/// Attach tags and descriptions to files.
///
/// Metadata is kept in a small database file inside each tagged directory.
#[derive(Debug, Parser)]
#[command(name = "filetag", version, about, long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Name of the metadata file kept in each directory
    #[arg(long, global = true, value_name = "NAME")]
    pub tag_file: Option<String>,

    /// Log more (repeat for even more)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the files in a directory with their tags
    Browse(BrowseArgs),
    /// Add tags and/or a description to a file
    Tag(TagArgs),
}

#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Directory to list
    #[arg(short = 'f', long = "path", default_value = ".")]
    pub path: PathBuf,

    /// Print the listing as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Debug, Args)]
pub struct TagArgs {
    /// File to tag
    #[arg(short = 'f', long = "file")]
    pub file: PathBuf,

    /// Tag to add (repeatable)
    #[arg(short = 't', long = "tag", value_name = "TAG")]
    pub tags: Vec<String>,

    /// Description to set, replacing any existing one
    #[arg(short = 'd', long = "description")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_browse_defaults() {
        let cli = Cli::try_parse_from(["filetag", "browse"]).unwrap();
        let Command::Browse(args) = cli.command else {
            panic!("expected browse");
        };
        assert_eq!(args.path, PathBuf::from("."));
        assert!(!args.json);
        assert_eq!(cli.tag_file, None);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn test_tag_with_repeated_tags() {
        let cli = Cli::try_parse_from([
            "filetag", "tag", "-f", "docs/a.txt", "-t", "red", "-t", "blue", "-d", "notes", "--tag-file", ".meta",
        ])
        .unwrap();
        assert_eq!(cli.tag_file.as_deref(), Some(".meta"));
        let Command::Tag(args) = cli.command else {
            panic!("expected tag");
        };
        assert_eq!(args.file, PathBuf::from("docs/a.txt"));
        assert_eq!(args.tags, vec!["red", "blue"]);
        assert_eq!(args.description.as_deref(), Some("notes"));
    }

    #[rstest]
    #[case(&["filetag"])]
    #[case(&["filetag", "tag", "-t", "red"])]
    #[case(&["filetag", "-q", "-v", "browse"])]
    #[case(&["filetag", "rename"])]
    fn test_rejected(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn test_verbosity_counts() {
        let cli = Cli::try_parse_from(["filetag", "browse", "-vv"]).unwrap();
        assert_eq!(cli.verbose, 2);
        assert!(!cli.quiet);
    }
}
