//! CurseForge API client
//!
//! Wraps the CurseForge v1 REST API with authenticated requests and
//! per-operation response caching. Payload decoding is deliberately tolerant:
//! list entries that do not decode are skipped, and the declared game-version
//! field is accepted in every shape the API has been seen to produce (a bare
//! string, a list of strings, or a list of objects).

use crate::cache::{CacheKey, CacheOp, ResponseCache};
use crate::config::CurseForgeConfig;
use crate::core::version::{normalize, numeric_sort_key};
use crate::core::{
    DownloadInfo, FileDependencies, GameVersion, LoaderEntry, ModLoader, ModRef, ModSummary,
    ProviderKind, ReleaseFile, ResolveError, Result, SearchFilter,
};
use crate::providers::{ModProvider, fetch_json, log_upstream_failure};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::Value;
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

const GAME_VERSIONS_TTL: Duration = Duration::from_secs(24 * 3600);
const MOD_TTL: Duration = Duration::from_secs(12 * 3600);
const FILES_TTL: Duration = Duration::from_secs(3600);
const FILE_TTL: Duration = Duration::from_secs(2 * 3600);
const SEARCH_TTL: Duration = Duration::from_secs(30 * 60);
const SLUG_SEARCH_TTL: Duration = Duration::from_secs(6 * 3600);
const DOWNLOAD_INFO_TTL: Duration = Duration::from_secs(6 * 3600);

/// CurseForge dependency relation codes
const RELATION_EMBEDDED: u64 = 1;
const RELATION_OPTIONAL: u64 = 2;
const RELATION_REQUIRED: u64 = 3;

static LOADER_CATALOG: Lazy<Vec<LoaderEntry>> = Lazy::new(|| {
    ModLoader::ALL
        .iter()
        .map(|loader| LoaderEntry::new(*loader, ProviderKind::CurseForge))
        .collect()
});

/// CurseForge API client with response caching
pub struct CurseForgeClient {
    config: CurseForgeConfig,
    client: Client,
    cache: ResponseCache,
}

/// Mod entry as the API returns it
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurseForgeMod {
    id: u64,
    name: String,
    #[serde(default)]
    slug: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

impl CurseForgeMod {
    fn into_summary(self) -> ModSummary {
        ModSummary {
            source: ProviderKind::CurseForge,
            id: self.id.to_string(),
            slug: self.slug,
            name: self.name,
            description: self.summary,
        }
    }
}

/// File entry with the stable fields typed; `game_versions` stays raw because
/// its shape varies between deployments
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CurseForgeFile {
    id: u64,
    #[serde(default)]
    mod_id: Option<u64>,
    #[serde(default)]
    display_name: Option<String>,
    #[serde(default)]
    file_name: Option<String>,
    #[serde(default)]
    download_url: Option<String>,
    #[serde(default)]
    game_versions: Value,
}

/// One version-type group from the games/{id}/versions catalog
#[derive(Debug, Deserialize)]
struct CurseForgeVersionGroup {
    #[serde(rename = "type")]
    type_id: u32,
    #[serde(default)]
    versions: Vec<String>,
}

impl CurseForgeClient {
    /// Create a client from an explicit config
    pub fn new(config: CurseForgeConfig) -> Result<Self> {
        config.validate()?;

        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(config.timeout)
            .build()
            .map_err(|e| ResolveError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
                field: None,
                suggestion: None,
            })?;

        Ok(Self {
            config,
            client,
            cache: ResponseCache::new(),
        })
    }

    /// Create a client configured from the environment (CURSEFORGE_API_KEY)
    pub fn from_env() -> Result<Self> {
        Self::new(CurseForgeConfig::from_env()?)
    }

    /// Construct the CDN download URL for a file.
    ///
    /// The CDN addresses files by splitting the numeric id into its thousands
    /// prefix and remainder: file 5846846 lives under `5846/846/`. Plus signs
    /// in file names must travel percent-encoded, but names that already
    /// arrive encoded are left alone.
    pub fn build_download_url(&self, file_id: u64, file_name: &str) -> String {
        let encoded = if file_name.contains("%2B") {
            file_name.to_string()
        } else {
            file_name.replace('+', "%2B")
        };
        format!(
            "{}/files/{}/{}/{}",
            self.config.cdn_base_url,
            file_id / 1000,
            file_id % 1000,
            encoded
        )
    }

    fn authenticated_get(&self, url: &str) -> RequestBuilder {
        self.client.get(url).header("x-api-key", &self.config.api_key)
    }

    fn parse_mod_id(id: &str) -> Option<u64> {
        match id.trim().parse::<u64>() {
            Ok(mod_id) => Some(mod_id),
            Err(_) => {
                debug!("CurseForge cannot interpret non-numeric id '{}'", id);
                None
            }
        }
    }

    fn parse_file(&self, raw: Value, requested_mod_id: u64) -> Option<ReleaseFile> {
        let parsed: CurseForgeFile = match serde_json::from_value(raw.clone()) {
            Ok(file) => file,
            Err(err) => {
                debug!("Skipping undecodable CurseForge file entry: {}", err);
                return None;
            }
        };

        let game_versions = declared_versions(&parsed.game_versions);
        let loaders = declared_loaders(&game_versions);

        Some(ReleaseFile {
            source: ProviderKind::CurseForge,
            mod_id: parsed.mod_id.unwrap_or(requested_mod_id).to_string(),
            file_id: parsed.id.to_string(),
            display_name: parsed.display_name.unwrap_or_default(),
            file_name: parsed.file_name,
            version_number: None,
            game_versions,
            loaders,
            download_url: parsed.download_url.filter(|u| !u.is_empty()),
            raw,
        })
    }

    async fn fetch_mod(&self, mod_id: u64) -> Result<Option<ModSummary>> {
        let url = format!("{}/mods/{}", self.config.base_url, mod_id);
        let payload = fetch_json(self.authenticated_get(&url), &url).await?;
        let entry = match payload.get("data").cloned() {
            Some(data) => match serde_json::from_value::<CurseForgeMod>(data) {
                Ok(parsed) => Some(parsed),
                Err(err) => {
                    debug!("Undecodable CurseForge mod payload for {}: {}", mod_id, err);
                    None
                }
            },
            None => None,
        };
        Ok(entry.map(CurseForgeMod::into_summary))
    }

    async fn fetch_search(&self, params: Vec<(&str, String)>) -> Result<Vec<ModSummary>> {
        let url = format!("{}/mods/search", self.config.base_url);
        let request = self.authenticated_get(&url).query(&params);
        let payload = fetch_json(request, &url).await?;

        let mut results = Vec::new();
        for entry in data_array(&payload) {
            if let Ok(parsed) = serde_json::from_value::<CurseForgeMod>(entry) {
                results.push(parsed.into_summary());
            }
        }
        Ok(results)
    }

    async fn fetch_files(
        &self,
        mod_id: u64,
        game_version: Option<&str>,
        loader: Option<ModLoader>,
    ) -> Result<Vec<ReleaseFile>> {
        let url = format!("{}/mods/{}/files", self.config.base_url, mod_id);

        // The API filters server-side, but some filter combinations are
        // silently ignored, so the exact game-version check happens again
        // below on the declared version lists.
        let mut params: Vec<(&str, String)> = vec![("pageSize", "50".to_string())];
        if let Some(requested) = game_version {
            params.push(("gameVersion", normalize(requested)));
        }
        if let Some(loader) = loader {
            params.push(("modLoaderType", loader.curseforge_code().to_string()));
        }

        let request = self.authenticated_get(&url).query(&params);
        let payload = fetch_json(request, &url).await?;

        let mut files: Vec<ReleaseFile> = data_array(&payload)
            .into_iter()
            .filter_map(|entry| self.parse_file(entry, mod_id))
            .collect();

        if let Some(requested) = game_version {
            let want = normalize(requested);
            files.retain(|file| {
                file.game_versions
                    .iter()
                    .any(|declared| normalize(declared) == want)
            });
        }

        Ok(files)
    }

    async fn fetch_file(&self, mod_id: u64, file_id: u64) -> Result<Option<ReleaseFile>> {
        let url = format!("{}/mods/{}/files/{}", self.config.base_url, mod_id, file_id);
        let payload = fetch_json(self.authenticated_get(&url), &url).await?;
        Ok(payload
            .get("data")
            .cloned()
            .and_then(|data| self.parse_file(data, mod_id)))
    }

    async fn fetch_download_url_endpoint(&self, mod_id: u64, file_id: u64) -> Result<Option<String>> {
        let url = format!(
            "{}/mods/{}/files/{}/download-url",
            self.config.base_url, mod_id, file_id
        );
        let payload = fetch_json(self.authenticated_get(&url), &url).await?;
        Ok(payload
            .get("data")
            .and_then(Value::as_str)
            .filter(|u| !u.is_empty())
            .map(str::to_string))
    }

    async fn fetch_game_versions(&self) -> Result<Vec<GameVersion>> {
        let url = format!("{}/games/{}/versions", self.config.base_url, self.config.game_id);
        let payload = fetch_json(self.authenticated_get(&url), &url).await?;

        let release_group = data_array(&payload)
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<CurseForgeVersionGroup>(entry).ok())
            .find(|group| group.type_id == self.config.game_version_type_id);

        let mut versions: Vec<GameVersion> = release_group
            .map(|group| group.versions)
            .unwrap_or_default()
            .into_iter()
            .map(GameVersion::release)
            .collect();

        versions.sort_by(|a, b| numeric_sort_key(&b.name).cmp(&numeric_sort_key(&a.name)));
        Ok(versions)
    }

    /// Resolve the download location for a file.
    ///
    /// Resolution order: a CDN URL constructed from the file name, then the
    /// download-url API endpoint, then whatever `downloadUrl` the file payload
    /// itself carries.
    async fn resolve_download_info(&self, mod_id: u64, file_id: u64) -> Option<DownloadInfo> {
        let file = match self.fetch_file(mod_id, file_id).await {
            Ok(file) => file,
            Err(err) => {
                log_upstream_failure(ProviderKind::CurseForge, "get_file", &err);
                None
            }
        };

        if let Some(file_name) = file.as_ref().and_then(|f| f.file_name.clone()) {
            return Some(DownloadInfo {
                url: self.build_download_url(file_id, &file_name),
                file_name,
            });
        }

        match self.fetch_download_url_endpoint(mod_id, file_id).await {
            Ok(Some(url)) => {
                let file_name = url_file_name(&url).unwrap_or_default();
                return Some(DownloadInfo { url, file_name });
            }
            Ok(None) => {}
            Err(err) => log_upstream_failure(ProviderKind::CurseForge, "download_url", &err),
        }

        let url = file.as_ref().and_then(|f| f.download_url.clone())?;
        let file_name = url_file_name(&url).unwrap_or_default();
        Some(DownloadInfo { url, file_name })
    }
}

#[async_trait]
impl ModProvider for CurseForgeClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::CurseForge
    }

    async fn search_by_slug(&self, slug: &str) -> Option<ModSummary> {
        let key = CacheKey::new(CacheOp::SlugSearch, &[slug]);

        // Check cache first
        if let Some(cached) = self.cache.get::<ModSummary>(&key) {
            debug!("Returning cached CurseForge slug search for '{}'", slug);
            return Some(cached);
        }

        let params = vec![
            ("gameId", self.config.game_id.to_string()),
            ("classId", self.config.mod_class_id.to_string()),
            ("slug", slug.to_string()),
        ];
        match self.fetch_search(params).await {
            Ok(results) => {
                let first = results.into_iter().next()?;
                // Cache the result for 6 hours
                self.cache.put(key, &first, SLUG_SEARCH_TTL);
                Some(first)
            }
            Err(err) => {
                log_upstream_failure(ProviderKind::CurseForge, "search_by_slug", &err);
                None
            }
        }
    }

    async fn get_mod(&self, id: &str) -> Option<ModSummary> {
        let mod_id = Self::parse_mod_id(id)?;
        let id_param = mod_id.to_string();
        let key = CacheKey::new(CacheOp::ModDetails, &[&id_param]);

        // Check cache first
        if let Some(cached) = self.cache.get::<ModSummary>(&key) {
            debug!("Returning cached CurseForge mod {}", mod_id);
            return Some(cached);
        }

        match self.fetch_mod(mod_id).await {
            Ok(Some(summary)) => {
                // Cache the result for 12 hours
                self.cache.put(key, &summary, MOD_TTL);
                Some(summary)
            }
            Ok(None) => None,
            Err(err) => {
                log_upstream_failure(ProviderKind::CurseForge, "get_mod", &err);
                None
            }
        }
    }

    async fn search_mods(&self, filter: &SearchFilter) -> Vec<ModSummary> {
        let query = filter.query.clone().unwrap_or_default();
        let page_size = filter.page_size.unwrap_or(50);
        let index = filter.index.unwrap_or(0);
        let page_param = page_size.to_string();
        let index_param = index.to_string();
        let key = CacheKey::new(CacheOp::Search, &[&query, &page_param, &index_param]);

        // Check cache first
        if let Some(cached) = self.cache.get::<Vec<ModSummary>>(&key) {
            debug!("Returning cached CurseForge search for '{}'", query);
            return cached;
        }

        let mut params = vec![
            ("gameId", self.config.game_id.to_string()),
            ("classId", self.config.mod_class_id.to_string()),
            ("pageSize", page_param.clone()),
            ("index", index_param.clone()),
        ];
        if !query.is_empty() {
            params.push(("searchFilter", query.clone()));
        }

        match self.fetch_search(params).await {
            Ok(mut results) => {
                // The API occasionally repeats entries across page boundaries
                let mut seen = HashSet::new();
                results.retain(|entry| seen.insert(entry.id.clone()));

                if !results.is_empty() {
                    // Cache the result for 30 minutes
                    self.cache.put(key, &results, SEARCH_TTL);
                }
                results
            }
            Err(err) => {
                log_upstream_failure(ProviderKind::CurseForge, "search_mods", &err);
                Vec::new()
            }
        }
    }

    async fn get_files(
        &self,
        id: &str,
        game_version: Option<&str>,
        loader: Option<ModLoader>,
    ) -> Vec<ReleaseFile> {
        let Some(mod_id) = Self::parse_mod_id(id) else {
            return Vec::new();
        };
        let id_param = mod_id.to_string();
        let version_param = game_version.map(normalize).unwrap_or_default();
        let loader_param = loader.map(|l| l.slug()).unwrap_or_default();
        let key = CacheKey::new(CacheOp::ModFiles, &[&id_param, &version_param, loader_param]);

        // Check cache first
        if let Some(cached) = self.cache.get::<Vec<ReleaseFile>>(&key) {
            debug!("Returning cached CurseForge files for {}", mod_id);
            return cached;
        }

        match self.fetch_files(mod_id, game_version, loader).await {
            Ok(files) => {
                if !files.is_empty() {
                    // Cache the result for 1 hour
                    self.cache.put(key, &files, FILES_TTL);
                }
                files
            }
            Err(err) => {
                log_upstream_failure(ProviderKind::CurseForge, "get_files", &err);
                Vec::new()
            }
        }
    }

    async fn get_file(&self, id: &str, file_id: &str) -> Option<ReleaseFile> {
        let mod_id = Self::parse_mod_id(id)?;
        let file_id = Self::parse_mod_id(file_id)?;
        let mod_param = mod_id.to_string();
        let file_param = file_id.to_string();
        let key = CacheKey::new(CacheOp::FileDetails, &[&mod_param, &file_param]);

        // Check cache first
        if let Some(cached) = self.cache.get::<ReleaseFile>(&key) {
            debug!("Returning cached CurseForge file {}:{}", mod_id, file_id);
            return Some(cached);
        }

        match self.fetch_file(mod_id, file_id).await {
            Ok(Some(file)) => {
                // Cache the result for 2 hours
                self.cache.put(key, &file, FILE_TTL);
                Some(file)
            }
            Ok(None) => None,
            Err(err) => {
                log_upstream_failure(ProviderKind::CurseForge, "get_file", &err);
                None
            }
        }
    }

    async fn get_game_versions(&self) -> Vec<GameVersion> {
        let key = CacheKey::new(CacheOp::GameVersions, &[]);

        // Check cache first
        if let Some(cached) = self.cache.get::<Vec<GameVersion>>(&key) {
            debug!("Returning cached CurseForge game versions");
            return cached;
        }

        match self.fetch_game_versions().await {
            Ok(versions) => {
                if !versions.is_empty() {
                    // Cache the result for 24 hours
                    self.cache.put(key, &versions, GAME_VERSIONS_TTL);
                }
                versions
            }
            Err(err) => {
                log_upstream_failure(ProviderKind::CurseForge, "get_game_versions", &err);
                Vec::new()
            }
        }
    }

    fn mod_loaders(&self) -> Vec<LoaderEntry> {
        LOADER_CATALOG.clone()
    }

    fn file_dependencies(&self, payload: &Value) -> FileDependencies {
        let mut dependencies = FileDependencies::default();
        let entries = payload
            .get("dependencies")
            .and_then(Value::as_array)
            .cloned()
            .unwrap_or_default();

        for entry in entries {
            let Some(mod_id) = entry.get("modId").and_then(Value::as_u64) else {
                continue;
            };
            let reference = ModRef::CurseForge(mod_id);
            match entry.get("relationType").and_then(Value::as_u64) {
                Some(RELATION_REQUIRED) => dependencies.required.push(reference),
                Some(RELATION_OPTIONAL) => dependencies.optional.push(reference),
                Some(RELATION_EMBEDDED) => dependencies.embedded.push(reference),
                _ => {}
            }
        }
        dependencies
    }

    async fn get_download_info(&self, id: &str, file_id: &str) -> Option<DownloadInfo> {
        let mod_id = Self::parse_mod_id(id)?;
        let file_id = Self::parse_mod_id(file_id)?;
        let mod_param = mod_id.to_string();
        let file_param = file_id.to_string();
        let key = CacheKey::new(CacheOp::DownloadInfo, &[&mod_param, &file_param]);

        // Check cache first
        if let Some(cached) = self.cache.get::<DownloadInfo>(&key) {
            debug!("Returning cached CurseForge download info {}:{}", mod_id, file_id);
            return Some(cached);
        }

        let info = self.resolve_download_info(mod_id, file_id).await?;
        // Cache the result for 6 hours
        self.cache.put(key, &info, DOWNLOAD_INFO_TTL);
        Some(info)
    }

    fn invalidate_mod(&self, id: &str) {
        let evicted = self
            .cache
            .purge(|key| key.params.first().map(String::as_str) == Some(id.trim()));
        debug!("Evicted {} CurseForge cache entries for mod {}", evicted, id);
    }

    fn invalidate_file(&self, id: &str, file_id: &str) {
        let evicted = self.cache.purge(|key| {
            matches!(key.op, CacheOp::FileDetails | CacheOp::DownloadInfo)
                && key.params.first().map(String::as_str) == Some(id.trim())
                && key.params.get(1).map(String::as_str) == Some(file_id.trim())
        });
        debug!(
            "Evicted {} CurseForge cache entries for file {}:{}",
            evicted, id, file_id
        );
    }
}

/// Pull the `data` array out of a list envelope, tolerating anything else
fn data_array(payload: &Value) -> Vec<Value> {
    payload
        .get("data")
        .and_then(Value::as_array)
        .cloned()
        .unwrap_or_default()
}

/// Decode a declared game-version field in any of its observed shapes
fn declared_versions(value: &Value) -> Vec<String> {
    match value {
        Value::String(single) => vec![single.clone()],
        Value::Array(entries) => entries.iter().filter_map(version_entry).collect(),
        _ => Vec::new(),
    }
}

fn version_entry(entry: &Value) -> Option<String> {
    match entry {
        Value::String(name) => Some(name.clone()),
        Value::Object(map) => ["versionString", "name", "gameVersion"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_str))
            .map(str::to_string),
        _ => None,
    }
}

/// Loader tags ride along inside the declared game-version list
fn declared_loaders(declared: &[String]) -> Vec<ModLoader> {
    let mut loaders = Vec::new();
    for tag in declared {
        if let Some(loader) = ModLoader::parse(tag) {
            if !loaders.contains(&loader) {
                loaders.push(loader);
            }
        }
    }
    loaders
}

fn url_file_name(url: &str) -> Option<String> {
    url::Url::parse(url)
        .ok()?
        .path_segments()?
        .next_back()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
