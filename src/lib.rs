//! # riffle-client
//!
//! Client-side glue for the riffle RSS aggregation backend.
//!
//! ## Architecture
//!
//! ```text
//! Config → AppContext::bootstrap ─┬→ Application (library, router, components) → mount("#app")
//!                                 ├→ EventBus (shared by every component)
//!                                 └→ ApiClient → riffle backend
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Register a feed
//! riffle sources add https://blog.rust-lang.org/feed.xml --name "Rust Blog"
//!
//! # Ask the backend to ingest the last 30 days
//! riffle fetch
//!
//! # Browse what came in
//! riffle contents list --source <id>
//! ```
//!
//! ## Modules
//!
//! - [`api`]: REST client and request parameter objects
//! - [`app`]: Bootstrap context and error types
//! - [`bus`]: Publish/subscribe event bus
//! - [`cli`]: Command-line interface definitions
//! - [`config`]: TOML configuration
//! - [`domain`]: Backend DTOs (Source, Content, Recommendation)
//! - [`ui`]: Application instance, plugins and components

/// REST client for the riffle backend.
///
/// - [`ApiClient`](api::ApiClient): one configured `reqwest` client, one method per endpoint
/// - [`ApiResponse`](api::ApiResponse): status, headers and raw body of a 2xx reply
pub mod api;

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the API
/// client, the event bus and the mounted application.
pub mod app;

/// Named publish/subscribe with JSON payloads.
pub mod bus;

/// Command-line interface using clap.
///
/// - `sources list|get|add|update|remove` - Manage sources
/// - `import <opml>` - Batch-register sources from OPML
/// - `contents list|get|search|remove` - Browse contents
/// - `fetch` / `job <id>` - Trigger and inspect ingestion
/// - `recommend` / `feedback` - Recommendations
/// - `health` - Backend status
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/riffle/config.toml`, supporting:
/// - Backend origin and timeout
/// - Theme palettes (named or hex colors)
/// - Mount target
pub mod config;

/// Passthrough shapes of the backend's JSON.
pub mod domain;

/// The application instance.
///
/// - [`Application`](ui::Application): plugins, components, mount lifecycle
/// - [`Router`](ui::Router): route table and navigation events
/// - [`ComponentLibrary`](ui::ComponentLibrary): components, directives and theme
pub mod ui;
