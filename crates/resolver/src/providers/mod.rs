//! Provider clients for the upstream mod services
//!
//! CurseForge and Modrinth are exposed through the [`ModProvider`] trait so
//! the resolution service can treat them interchangeably and callers can swap
//! in fakes. Each client owns its HTTP connection and response cache.
//!
//! Upstream trouble is handled at this boundary: failures are logged with
//! their status detail and collapsed into empty results, never propagated to
//! callers. Combined with the no-cache-on-failure rule this makes every
//! operation self-healing on the next call.

pub mod curseforge;
pub mod modrinth;

// Re-export the concrete clients for convenience
pub use curseforge::CurseForgeClient;
pub use modrinth::ModrinthClient;

use crate::core::{
    DownloadInfo, FileDependencies, GameVersion, LoaderEntry, ModLoader, ModSummary,
    ProviderKind, ReleaseFile, ResolveError, Result, SearchFilter,
};
use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, warn};

/// Trait for mod provider implementations
///
/// This trait defines the interface that all providers must implement.
/// Identifiers cross it as text; each provider interprets them in its own
/// scheme (CurseForge parses numeric mod ids, Modrinth accepts project ids
/// and slugs) and treats identifiers it cannot interpret as not found.
#[async_trait]
pub trait ModProvider: Send + Sync {
    /// Which upstream service this provider talks to
    fn kind(&self) -> ProviderKind;

    /// Look up a mod by its exact slug
    async fn search_by_slug(&self, slug: &str) -> Option<ModSummary>;

    /// Fetch mod/project details by identifier
    async fn get_mod(&self, id: &str) -> Option<ModSummary>;

    /// Free-text search scoped to Minecraft mods
    async fn search_mods(&self, filter: &SearchFilter) -> Vec<ModSummary>;

    /// List released files, optionally filtered by game version and loader
    ///
    /// The game-version filter is exact: a file qualifies only when one of
    /// its declared versions normalizes to the requested version.
    async fn get_files(
        &self,
        id: &str,
        game_version: Option<&str>,
        loader: Option<ModLoader>,
    ) -> Vec<ReleaseFile>;

    /// Fetch a single released file
    async fn get_file(&self, id: &str, file_id: &str) -> Option<ReleaseFile>;

    /// The newest file matching a game version and loader
    ///
    /// Providers return file lists newest-first, so the head of the filtered
    /// list is the latest release.
    async fn get_latest_file(
        &self,
        id: &str,
        game_version: &str,
        loader: ModLoader,
    ) -> Option<ReleaseFile> {
        self.get_files(id, Some(game_version), Some(loader))
            .await
            .into_iter()
            .next()
    }

    /// Mainline release game versions, newest first
    async fn get_game_versions(&self) -> Vec<GameVersion>;

    /// The provider's fixed loader catalog
    fn mod_loaders(&self) -> Vec<LoaderEntry>;

    /// Classify the dependencies declared in a file payload
    ///
    /// Works on the raw payload (as preserved in [`ReleaseFile::raw`]) so
    /// callers holding undecoded provider data can classify it too.
    fn file_dependencies(&self, payload: &Value) -> FileDependencies;

    /// Resolve where a file can be downloaded from
    async fn get_download_info(&self, id: &str, file_id: &str) -> Option<DownloadInfo>;

    /// Drop cached state about a mod so the next call refetches
    fn invalidate_mod(&self, id: &str);

    /// Drop cached state about a single file
    fn invalidate_file(&self, id: &str, file_id: &str);
}

/// Issue a GET request and decode the JSON body.
///
/// Non-success statuses become [`ResolveError::UnexpectedStatus`] carrying
/// whatever detail the provider sent back, so collapsed failures still leave
/// a useful trace in the logs.
pub(crate) async fn fetch_json(request: reqwest::RequestBuilder, url: &str) -> Result<Value> {
    debug!("Provider API request: {}", url);
    let response = request.send().await?;

    let status = response.status();
    if !status.is_success() {
        let detail = response.text().await.unwrap_or_default();
        return Err(ResolveError::UnexpectedStatus {
            url: url.to_string(),
            status: status.as_u16(),
            detail: truncate_detail(&detail),
        });
    }

    let response_text = response.text().await?;
    debug!("Provider API response from {}: {}", url, truncate_detail(&response_text));

    serde_json::from_str(&response_text).map_err(|e| ResolveError::Decode {
        url: url.to_string(),
        source: e,
    })
}

/// Log an upstream failure that is about to collapse into an empty result
pub(crate) fn log_upstream_failure(kind: ProviderKind, operation: &str, err: &ResolveError) {
    warn!(
        "{} {} failed, treating as not found ({}): {}",
        kind,
        operation,
        err.category(),
        err
    );
}

/// Keep response snippets in logs bounded
fn truncate_detail(text: &str) -> String {
    const MAX_DETAIL: usize = 300;
    if text.chars().count() <= MAX_DETAIL {
        text.to_string()
    } else {
        let snippet: String = text.chars().take(MAX_DETAIL).collect();
        format!("{}...", snippet)
    }
}
