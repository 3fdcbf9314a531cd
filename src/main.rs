use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use riffle_client::api::RecommendationQuery;
use riffle_client::app::AppContext;
use riffle_client::cli::{commands, Cli, Commands, ContentAction, SourceAction};
use riffle_client::config::Config;
use riffle_client::domain::{FeedbackInput, SourceInput};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "riffle_client=debug"
    } else {
        "riffle_client=info"
    };
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .init();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(base_url) = cli.base_url {
        config.api.base_url = base_url;
    }

    let mut ctx = AppContext::bootstrap(config)?;
    ctx.navigate(cli.command.route());

    match cli.command {
        Commands::Sources { action } => match action {
            SourceAction::List => commands::list_sources(&ctx).await?,
            SourceAction::Get { id } => commands::show_source(&ctx, &id).await?,
            SourceAction::Add {
                url,
                name,
                description,
            } => commands::add_source(&ctx, &url, name.as_deref(), &description).await?,
            SourceAction::Update {
                id,
                name,
                url,
                description,
            } => {
                let input = SourceInput::new(name, url).with_description(description);
                commands::update_source(&ctx, &id, &input).await?;
            }
            SourceAction::Remove { ids } => commands::remove_sources(&ctx, &ids).await?,
        },
        Commands::Import { path } => {
            commands::import_opml(&ctx, &path).await?;
        }
        Commands::Contents { action } => match action {
            ContentAction::List {
                source,
                limit,
                since,
            } => commands::list_contents(&ctx, source.as_deref(), limit, since).await?,
            ContentAction::Get { id } => commands::show_content(&ctx, &id).await?,
            ContentAction::Search {
                keywords,
                source,
                limit,
            } => commands::search_contents(&ctx, &keywords, source.as_deref(), limit).await?,
            ContentAction::Remove { ids } => commands::remove_contents(&ctx, &ids).await?,
        },
        Commands::Fetch { sources, days } => {
            commands::fetch(&ctx, &sources, days).await?;
        }
        Commands::Job { id } => {
            commands::job_status(&ctx, &id).await?;
        }
        Commands::Recommend {
            user,
            sources,
            limit,
        } => {
            let query = RecommendationQuery {
                user_id: user,
                source_ids: sources,
                limit,
            };
            commands::recommend(&ctx, &query).await?;
        }
        Commands::Feedback {
            content_id,
            user,
            rating,
            comment,
        } => {
            let input = FeedbackInput {
                content_id,
                user_id: user,
                rating,
                comment,
            };
            commands::feedback(&ctx, &input).await?;
        }
        Commands::Health => {
            commands::health(&ctx).await?;
        }
    }

    Ok(())
}
