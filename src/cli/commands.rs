use std::path::Path;

use chrono::{DateTime, Utc};
use futures::future::join_all;
use serde_json::json;

use crate::api::{ContentQuery, FetchOptions, RecommendationQuery, SearchQuery};
use crate::app::{AppContext, Result};
use crate::cli::opml;
use crate::domain::{
    BatchCreateResult, BatchDeleteResult, Content, ContentList, ContentSearchResult, FeedbackInput,
    FetchJob, Health, RecommendationList, Source, SourceInput, SourceList, SystemInfo,
};

pub async fn list_sources(ctx: &AppContext) -> Result<()> {
    let list: SourceList = ctx.api.list_sources().await?.json()?;

    if list.sources.is_empty() {
        println!("No sources");
        return Ok(());
    }

    for source in &list.sources {
        let fetched = source
            .last_fetched_at
            .map(format_date)
            .unwrap_or_else(|| "never".to_string());
        println!(
            "{}  {} (last fetched {})\n  {}",
            source.id,
            source.display_name(),
            fetched,
            source.url
        );
    }

    Ok(())
}

pub async fn show_source(ctx: &AppContext, id: &str) -> Result<()> {
    let source: Source = ctx.api.get_source(id).await?.json()?;

    println!("{}", source.display_name());
    println!("  id:          {}", source.id);
    println!("  url:         {}", source.url);
    if !source.description.is_empty() {
        println!("  description: {}", source.description);
    }
    println!("  created:     {}", format_date(source.created_at));
    Ok(())
}

pub async fn add_source(
    ctx: &AppContext,
    url: &str,
    name: Option<&str>,
    description: &str,
) -> Result<()> {
    let input = SourceInput::new(name.unwrap_or(url), url).with_description(description);
    let source: Source = ctx.api.create_source(&input).await?.json()?;

    println!("Added source: {} ({})", source.display_name(), source.id);
    ctx.bus.emit("sources:created", json!({ "ids": [source.id] }));
    Ok(())
}

pub async fn update_source(ctx: &AppContext, id: &str, input: &SourceInput) -> Result<()> {
    let source: Source = ctx.api.update_source(id, input).await?.json()?;

    println!("Updated source: {}", source.display_name());
    ctx.bus.emit("sources:updated", json!({ "id": source.id }));
    Ok(())
}

/// A single id uses the per-source endpoint; several go through the batch one.
pub async fn remove_sources(ctx: &AppContext, ids: &[String]) -> Result<()> {
    match ids {
        [id] => {
            ctx.api.delete_source(id).await?;
            println!("Removed source: {}", id);
        }
        _ => {
            let result: BatchDeleteResult = ctx.api.batch_delete_sources(ids).await?.json()?;
            println!("Removed {} sources", result.deleted_count);
            for err in &result.errors {
                eprintln!(
                    "  ! {} - {}: {}",
                    err.source_id.as_deref().unwrap_or("?"),
                    err.error_type,
                    err.message
                );
            }
        }
    }

    ctx.bus.emit("sources:deleted", json!({ "ids": ids }));
    Ok(())
}

/// Import feeds from an OPML file
pub async fn import_opml(ctx: &AppContext, path: &Path) -> Result<()> {
    let feeds = opml::read_opml(path)?;

    if feeds.is_empty() {
        println!("No feeds found in OPML file");
        return Ok(());
    }

    println!("Found {} feeds in OPML file", feeds.len());

    let inputs: Vec<SourceInput> = feeds.into_iter().map(|f| f.into_source(path)).collect();
    let result: BatchCreateResult = ctx.api.batch_create_sources(&inputs).await?.json()?;

    for source in &result.sources {
        println!("  + {} ({})", source.display_name(), source.url);
    }
    for err in &result.errors {
        let url = err
            .input_index()
            .and_then(|i| inputs.get(i))
            .map(|input| input.url.as_str())
            .or(err.source_id.as_deref())
            .unwrap_or("?");
        eprintln!("  ! {} - {}: {}", url, err.error_type, err.message);
    }

    println!(
        "\nImport complete: {} added, {} errors",
        result.sources.len(),
        result.errors.len()
    );

    let ids: Vec<&str> = result.sources.iter().map(|s| s.id.as_str()).collect();
    ctx.bus.emit("sources:created", json!({ "ids": ids }));
    Ok(())
}

pub async fn list_contents(
    ctx: &AppContext,
    source: Option<&str>,
    limit: Option<u32>,
    since: Option<DateTime<Utc>>,
) -> Result<()> {
    let list: ContentList = match (source, since) {
        (Some(source), None) => ctx.api.list_contents_by_source(source, limit).await?,
        _ => {
            let query = ContentQuery {
                source_id: source.map(str::to_string),
                start_date: since,
                limit,
                ..ContentQuery::default()
            };
            ctx.api.list_contents(&query).await?
        }
    }
    .json()?;

    print_contents(&list.contents);
    if let Some(token) = list.next_token.filter(|t| !t.is_empty()) {
        println!("(more available, next token {})", token);
    }
    Ok(())
}

pub async fn show_content(ctx: &AppContext, id: &str) -> Result<()> {
    let content: Content = ctx.api.get_content(id).await?.json()?;

    println!("{}", content.display_title());
    println!("  {}", content.link);
    if let Some(author) = &content.author {
        println!("  by {}", author);
    }
    println!("  published {}", format_date(content.published_at));
    if !content.categories.is_empty() {
        println!("  [{}]", content.categories.join(", "));
    }
    println!();
    println!("{}", content.display_content());
    Ok(())
}

pub async fn search_contents(
    ctx: &AppContext,
    keywords: &str,
    source: Option<&str>,
    limit: Option<u32>,
) -> Result<()> {
    let query = SearchQuery {
        source_id: source.map(str::to_string),
        limit,
        ..SearchQuery::new(keywords)
    };
    let result: ContentSearchResult = ctx.api.search_contents(&query).await?.json()?;

    println!("{} matches for {:?}", result.count, keywords);
    print_contents(&result.contents);
    Ok(())
}

pub async fn remove_contents(ctx: &AppContext, ids: &[String]) -> Result<()> {
    match ids {
        [id] => {
            ctx.api.delete_content(id).await?;
            println!("Removed content: {}", id);
        }
        _ => {
            let result: BatchDeleteResult = ctx.api.batch_delete_contents(ids).await?.json()?;
            println!("Removed {} contents", result.deleted_count);
            for err in &result.errors {
                eprintln!("  ! {}: {}", err.error_type, err.message);
            }
        }
    }

    ctx.bus.emit("contents:deleted", json!({ "ids": ids }));
    Ok(())
}

/// Start ingestion for all sources, or one job per listed source.
///
/// Returns the accepted jobs; per-source failures are reported and skipped.
pub async fn fetch(ctx: &AppContext, sources: &[String], days: u32) -> Result<Vec<FetchJob>> {
    let mut jobs = Vec::new();

    if sources.is_empty() {
        let options = FetchOptions {
            days,
            ..FetchOptions::default()
        };
        let job: FetchJob = ctx.api.fetch_contents_with(&options).await?.json()?;
        println!("Started fetch job {} for all sources ({})", job.job_id, job.status);
        jobs.push(job);
    } else {
        let requests = sources.iter().map(|id| {
            let options = FetchOptions {
                source_id: Some(id.clone()),
                days,
            };
            async move { (id, ctx.api.fetch_contents_with(&options).await) }
        });

        for (id, result) in join_all(requests).await {
            match result.and_then(|response| response.json::<FetchJob>()) {
                Ok(job) => {
                    println!("Started fetch job {} for {} ({})", job.job_id, id, job.status);
                    jobs.push(job);
                }
                Err(e) => eprintln!("  ! {} - {}", id, e),
            }
        }
    }

    let ids: Vec<&str> = jobs.iter().map(|j| j.job_id.as_str()).collect();
    ctx.bus.emit("contents:fetch-started", json!({ "jobs": ids, "days": days }));
    Ok(jobs)
}

pub async fn job_status(ctx: &AppContext, id: &str) -> Result<()> {
    let job: FetchJob = ctx.api.fetch_status(id).await?.json()?;

    println!("Job {}: {}", job.job_id, job.status);
    println!("  items processed: {}", job.items_processed);
    if let Some(source) = &job.source_id {
        println!("  source: {}", source);
    }
    if let Some(completed) = job.completed_at {
        println!("  completed: {}", format_date(completed));
    }
    for err in &job.errors {
        eprintln!("  ! {}", err);
    }
    Ok(())
}

pub async fn recommend(ctx: &AppContext, query: &RecommendationQuery) -> Result<()> {
    let response = if *query == RecommendationQuery::default() {
        ctx.api.get_recommendations().await?
    } else {
        ctx.api.get_recommendations_with(query).await?
    };
    let list: RecommendationList = response.json()?;

    if list.recommendations.is_empty() {
        println!("No recommendations");
        return Ok(());
    }

    for rec in &list.recommendations {
        println!(
            "{:>5.2}  {}  {}\n       {}",
            rec.score,
            format_date(rec.content.published_at),
            rec.content.display_title(),
            rec.content.link
        );
    }
    Ok(())
}

pub async fn feedback(ctx: &AppContext, input: &FeedbackInput) -> Result<()> {
    ctx.api.submit_feedback(input).await?;
    println!("Recorded rating {} for {}", input.rating, input.content_id);
    ctx.bus.emit(
        "recommendations:feedback",
        json!({ "contentId": input.content_id, "rating": input.rating }),
    );
    Ok(())
}

pub async fn health(ctx: &AppContext) -> Result<()> {
    let health: Health = ctx.api.health().await?.json()?;
    println!("{}: {}", ctx.api.base_url(), health.status);

    match ctx.api.system_info().await.and_then(|r| r.json::<SystemInfo>()) {
        Ok(info) => println!("  version {} (up {})", info.version, info.uptime),
        Err(e) => tracing::debug!("system info unavailable: {}", e),
    }
    Ok(())
}

fn print_contents(contents: &[Content]) {
    if contents.is_empty() {
        println!("No contents");
        return;
    }

    for content in contents {
        println!(
            "{} {}  {}",
            format_date(content.published_at),
            content.id,
            content.display_title()
        );
    }
}

fn format_date(date: DateTime<Utc>) -> String {
    date.format("%Y-%m-%d").to_string()
}
