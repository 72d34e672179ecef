//! # Easel
//!
//! A terminal-first manager for drawing-prompt "topics": load a topic list
//! from a local file, filter and sort it, mark topics done with a
//! timestamp, pick one at random, and keep your own additions — all
//! persisted locally, with no server involved.
//!
//! ## Architecture
//!
//! Easel follows a modular pipeline architecture:
//!
//! ```text
//! Loader → Ingestor → Session (Progress/UserTopic stores) → Query → UI
//! ```
//!
//! - [`loader`]: raw text sources with a JSON-then-delimited fallback chain
//! - [`ingest`]: normalizes JSON arrays or pivoted delimited text into topics
//! - [`store`]: SQLite-backed key-value persistence for progress and
//!   user-added topics
//! - [`session`]: the owned in-memory working set and its mutations
//! - [`query`]: date-window/category/search filtering and five sort modes
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # List topics, newest completions first
//! easel list
//!
//! # Pick something to draw
//! easel pick
//!
//! # Mark it done
//! easel done t1mvtwzq
//!
//! # Launch the TUI
//! easel tui
//! ```
//!
//! ## Modules
//!
//! - [`app`]: application context and error types
//! - [`cli`]: command-line interface definitions
//! - [`config`]: TOML configuration (colors, keybindings)
//! - [`domain`]: the [`Topic`](domain::Topic) model and identity hashing
//! - [`picker`]: random selection preferring not-yet-done topics

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together all
/// components: store, loader, ingestor, progress and user-topic stores.
pub mod app;

/// Command-line interface using clap.
///
/// - `list` - Filter and sort topics
/// - `categories` - Distinct categories
/// - `pick` - Random not-yet-done topic
/// - `done <id>` - Toggle completion
/// - `add <title>` - Add a user topic
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration management for the TUI.
///
/// Loads from `~/.config/easel/config.toml`, supporting custom colors
/// (named or hex) and custom keybindings.
pub mod config;

/// Core domain model: [`Topic`](domain::Topic) and the deterministic
/// FNV-1a identity hash joining topics to their persisted state.
pub mod domain;

/// Topic ingestion.
///
/// Converts a JSON topic array or pivoted delimited text (header row of
/// categories, cells of titles) into normalized topics.
pub mod ingest;

/// Raw topic sources.
///
/// - [`Loader`](loader::Loader): async trait returning text or "absent"
/// - [`FileLoader`](loader::FileLoader): data-directory implementation
pub mod loader;

/// Random topic selection.
pub mod picker;

/// Filtering and sorting pipeline producing the display view.
pub mod query;

/// The in-memory working set: load chain, progress merge, user-topic
/// append, and the toggle/add mutations.
pub mod session;

/// SQLite persistence layer.
///
/// - [`KvStore`](store::KvStore): string key-value trait
/// - [`SqliteStore`](store::SqliteStore): rusqlite implementation
/// - [`ProgressStore`](store::ProgressStore) /
///   [`UserTopicStore`](store::UserTopicStore): the persisted records
pub mod store;

/// Terminal user interface.
///
/// Filter bar, topic list, picked pane and status bar. Keybindings:
/// j/k navigate, Space toggles done, g picks, `/` searches, a adds,
/// w/s/c cycle filters, q quits.
pub mod tui;
