//! Mod Resolution Library
//!
//! This library resolves Minecraft mods across CurseForge and Modrinth
//! behind a single interface. It normalizes both providers into shared
//! types, caches upstream responses with per-operation TTLs, and drives
//! the scheduled checks that tell pack owners about newer mod releases
//! and newly supported game versions.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use resolver::{ModLoader, ModResolutionService, SearchFilter};
//!
//! # async fn example() -> resolver::Result<()> {
//! // Reads CURSEFORGE_API_KEY from the environment (or a .env file)
//! let service = ModResolutionService::from_env()?;
//!
//! // Numeric identifiers try CurseForge first, anything else Modrinth;
//! // a miss falls through to the other provider
//! let found = service.get_mod("238222", None).await;
//! println!("Found: {:?}", found.map(|m| m.name));
//!
//! // Newest Fabric build for Minecraft 1.20.1
//! let latest = service
//!     .get_latest_file("238222", None, "1.20.1", ModLoader::Fabric)
//!     .await;
//! println!("Latest: {:?}", latest.and_then(|f| f.comparable_version()));
//!
//! // Free-text search across both catalogs at once
//! let results = service
//!     .search_mods(&SearchFilter::new().with_query("map"))
//!     .await;
//! println!("{} search hits", results.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Features
//!
//! - **Two catalogs, one interface**: CurseForge and Modrinth behind the same typed operations
//! - **Source inference**: numeric-looking identifiers route CurseForge-first, others Modrinth-first
//! - **Read-through caching**: per-operation TTLs, failures and empty results never cached
//! - **Version semantics**: loader-suffix normalization and numeric segment comparison
//! - **Exact compatibility filtering**: game-version filters tolerate every upstream payload shape
//! - **Update reconciliation**: scheduled checks with a per-item notification cooldown
//! - **Readiness reminders**: tell pack owners once a target version is fully supported
//! - **Async/await**: full async support with the Tokio runtime

pub mod cache;
pub mod config;
pub mod core;
pub mod jobs;
pub mod providers;
pub mod resolution;
pub mod store;

// Re-export commonly used types for convenience
pub use crate::core::{
    DownloadInfo, FileDependencies, GameVersion, LoaderEntry, ModLoader, ModRef, ModSummary,
    ProviderKind, ReleaseFile, ResolveError, Result, SearchFilter,
};
pub use config::{CurseForgeConfig, ModrinthConfig};
pub use jobs::{
    ReminderRunSummary, UpdateReconciler, UpdateRunSummary, VersionCompatibilityReminder,
};
pub use providers::{CurseForgeClient, ModProvider, ModrinthClient};
pub use resolution::ModResolutionService;
pub use store::{Notifier, Pack, PackItem, PackStore, ReminderTarget};
