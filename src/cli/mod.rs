pub mod commands;
pub mod opml;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::api::DEFAULT_FETCH_DAYS;

#[derive(Parser)]
#[command(name = "riffle")]
#[command(about = "Command-line client for the riffle RSS backend", long_about = None)]
pub struct Cli {
    /// Backend origin, overriding the config file
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Config file to load instead of ~/.config/riffle/config.toml
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage RSS sources
    Sources {
        #[command(subcommand)]
        action: SourceAction,
    },
    /// Import sources from an OPML file
    Import {
        /// Path to the OPML file
        path: PathBuf,
    },
    /// Browse ingested contents
    Contents {
        #[command(subcommand)]
        action: ContentAction,
    },
    /// Trigger backend ingestion
    Fetch {
        /// Only fetch these sources (repeatable)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        /// Look-back window in days
        #[arg(short, long, default_value_t = DEFAULT_FETCH_DAYS)]
        days: u32,
    },
    /// Show the status of a fetch job
    Job {
        /// Job id returned by `fetch`
        id: String,
    },
    /// Show recommended contents
    Recommend {
        #[arg(short, long)]
        user: Option<String>,

        /// Restrict to these sources (repeatable)
        #[arg(short, long = "source")]
        sources: Vec<String>,

        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Rate a recommended content item
    Feedback {
        content_id: String,

        #[arg(short, long)]
        user: String,

        /// Rating from 1 to 5
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(1..=5))]
        rating: u8,

        #[arg(short, long)]
        comment: Option<String>,
    },
    /// Check that the backend is up
    Health,
}

#[derive(Subcommand)]
pub enum SourceAction {
    /// List all sources
    List,
    /// Show one source
    Get { id: String },
    /// Register a new source
    Add {
        /// URL of the feed
        url: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Replace a source
    Update {
        id: String,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        url: String,

        #[arg(short, long, default_value = "")]
        description: String,
    },
    /// Remove one or more sources
    Remove {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ContentAction {
    /// List contents, newest first
    List {
        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long)]
        limit: Option<u32>,

        /// Only contents published at or after this RFC 3339 time
        #[arg(long)]
        since: Option<chrono::DateTime<chrono::Utc>>,
    },
    /// Show one content item
    Get { id: String },
    /// Full-text search
    Search {
        keywords: String,

        #[arg(short, long)]
        source: Option<String>,

        #[arg(short, long)]
        limit: Option<u32>,
    },
    /// Remove one or more content items
    Remove {
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

impl Commands {
    /// Route the application shows while the command runs.
    pub fn route(&self) -> &'static str {
        match self {
            Commands::Sources { .. } | Commands::Import { .. } => "/sources",
            Commands::Contents { .. } | Commands::Fetch { .. } | Commands::Job { .. } => {
                "/contents"
            }
            Commands::Recommend { .. } | Commands::Feedback { .. } => "/recommendations",
            Commands::Health => "/system",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_fetch_defaults() {
        let cli = Cli::parse_from(["riffle", "fetch"]);
        match cli.command {
            Commands::Fetch { sources, days } => {
                assert!(sources.is_empty());
                assert_eq!(days, 30);
            }
            _ => panic!("expected fetch"),
        }
    }

    #[test]
    fn test_repeated_sources_and_global_flags() {
        let cli = Cli::parse_from([
            "riffle", "fetch", "-s", "a", "--source", "b", "--base-url", "http://h:1",
        ]);
        assert_eq!(cli.base_url.as_deref(), Some("http://h:1"));
        assert!(matches!(cli.command, Commands::Fetch { ref sources, .. } if sources == &["a", "b"]));
    }

    #[test]
    fn test_rating_out_of_range_rejected() {
        let result = Cli::try_parse_from(["riffle", "feedback", "c1", "-u", "me", "-r", "6"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_routes_exist() {
        let paths: Vec<&str> = crate::app::context::ROUTES.iter().map(|(p, _)| *p).collect();
        for command in [
            Commands::Health,
            Commands::Job { id: "j".into() },
            Commands::Import {
                path: PathBuf::from("x.opml"),
            },
        ] {
            assert!(paths.contains(&command.route()));
        }
    }
}
