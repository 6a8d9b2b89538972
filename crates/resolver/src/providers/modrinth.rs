//! Modrinth API client
//!
//! Wraps the Modrinth v2 REST API. Modrinth identifies callers by user-agent
//! rather than API key, addresses projects by id or slug interchangeably, and
//! expects list filters as JSON-encoded arrays in the query string.

use crate::cache::{CacheKey, CacheOp, ResponseCache};
use crate::config::ModrinthConfig;
use crate::core::version::{normalize, numeric_sort_key};
use crate::core::{
    DownloadInfo, FileDependencies, GameVersion, LoaderEntry, ModLoader, ModRef, ModSummary,
    ProviderKind, ReleaseFile, ResolveError, Result, SearchFilter,
};
use crate::providers::{ModProvider, fetch_json, log_upstream_failure};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

const GAME_VERSIONS_TTL: Duration = Duration::from_secs(24 * 3600);
const PROJECT_TTL: Duration = Duration::from_secs(12 * 3600);
const VERSIONS_TTL: Duration = Duration::from_secs(3600);
const VERSION_TTL: Duration = Duration::from_secs(2 * 3600);
const SEARCH_TTL: Duration = Duration::from_secs(30 * 60);
const SLUG_SEARCH_TTL: Duration = Duration::from_secs(6 * 3600);
const DOWNLOAD_INFO_TTL: Duration = Duration::from_secs(6 * 3600);

static LOADER_CATALOG: Lazy<Vec<LoaderEntry>> = Lazy::new(|| {
    ModLoader::ALL
        .iter()
        .map(|loader| LoaderEntry::new(*loader, ProviderKind::Modrinth))
        .collect()
});

/// Modrinth API client with response caching
pub struct ModrinthClient {
    config: ModrinthConfig,
    client: Client,
    cache: ResponseCache,
}

#[derive(Debug, Deserialize)]
struct ModrinthProject {
    id: String,
    #[serde(default)]
    slug: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
}

impl ModrinthProject {
    fn into_summary(self) -> ModSummary {
        ModSummary {
            source: ProviderKind::Modrinth,
            id: self.id,
            slug: self.slug,
            name: self.title,
            description: self.description,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ModrinthSearchResponse {
    #[serde(default)]
    hits: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ModrinthSearchHit {
    project_id: String,
    #[serde(default)]
    slug: Option<String>,
    title: String,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ModrinthVersion {
    id: String,
    project_id: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    version_number: Option<String>,
    #[serde(default)]
    game_versions: Vec<String>,
    #[serde(default)]
    loaders: Vec<String>,
    #[serde(default)]
    files: Vec<ModrinthVersionFile>,
}

#[derive(Debug, Clone, Deserialize)]
struct ModrinthVersionFile {
    url: String,
    filename: String,
    #[serde(default)]
    primary: bool,
}

#[derive(Debug, Deserialize)]
struct ModrinthGameVersion {
    version: String,
    version_type: String,
}

/// Extract a project slug from a Modrinth page URL.
///
/// Both the legacy `/mod/{slug}` and current `/project/{slug}` paths are
/// recognized; anything after the slug segment, including query strings and
/// fragments, is ignored.
pub fn slug_from_url(input: &str) -> Option<String> {
    let parsed = url::Url::parse(input).ok()?;
    let mut segments = parsed.path_segments()?.filter(|s| !s.is_empty());
    while let Some(segment) = segments.next() {
        if segment == "mod" || segment == "project" {
            return segments
                .next()
                .filter(|slug| !slug.is_empty())
                .map(str::to_string);
        }
    }
    None
}

impl ModrinthClient {
    /// Create a client from an explicit config
    pub fn new(config: ModrinthConfig) -> Result<Self> {
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

    /// Create a client with the default public API endpoint
    pub fn with_defaults() -> Result<Self> {
        Self::new(ModrinthConfig::default())
    }

    fn parse_version_payload(raw: Value) -> Option<ReleaseFile> {
        let parsed: ModrinthVersion = match serde_json::from_value(raw.clone()) {
            Ok(version) => version,
            Err(err) => {
                debug!("Skipping undecodable Modrinth version entry: {}", err);
                return None;
            }
        };

        let picked = pick_version_file(&parsed.files).cloned();
        let loaders = parsed
            .loaders
            .iter()
            .filter_map(|tag| ModLoader::parse(tag))
            .collect();

        Some(ReleaseFile {
            source: ProviderKind::Modrinth,
            mod_id: parsed.project_id,
            file_id: parsed.id,
            display_name: parsed
                .name
                .or_else(|| parsed.version_number.clone())
                .unwrap_or_default(),
            file_name: picked.as_ref().map(|f| f.filename.clone()),
            version_number: parsed.version_number,
            game_versions: parsed.game_versions,
            loaders,
            download_url: picked.map(|f| f.url),
            raw,
        })
    }

    async fn fetch_project(&self, id: &str) -> Result<Option<ModSummary>> {
        let url = format!("{}/project/{}", self.config.base_url, id);
        let payload = fetch_json(self.client.get(&url), &url).await?;
        let project = match serde_json::from_value::<ModrinthProject>(payload) {
            Ok(project) => Some(project),
            Err(err) => {
                debug!("Undecodable Modrinth project payload for '{}': {}", id, err);
                None
            }
        };
        Ok(project.map(ModrinthProject::into_summary))
    }

    async fn fetch_versions(
        &self,
        id: &str,
        game_version: Option<&str>,
        loader: Option<ModLoader>,
    ) -> Result<Vec<ReleaseFile>> {
        let url = format!("{}/project/{}/version", self.config.base_url, id);

        // Filters travel as JSON-encoded single-element arrays
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(loader) = loader {
            params.push(("loaders", json_array_param(loader.slug())));
        }
        let normalized = game_version.map(normalize);
        if let Some(requested) = &normalized {
            params.push(("game_versions", json_array_param(requested)));
        }

        let request = self.client.get(&url).query(&params);
        let payload = fetch_json(request, &url).await?;

        let mut files: Vec<ReleaseFile> = payload
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter_map(Self::parse_version_payload)
            .collect();

        if let Some(want) = normalized {
            files.retain(|file| {
                file.game_versions
                    .iter()
                    .any(|declared| normalize(declared) == want)
            });
        }

        Ok(files)
    }

    async fn fetch_version(&self, version_id: &str) -> Result<Option<ReleaseFile>> {
        let url = format!("{}/version/{}", self.config.base_url, version_id);
        let payload = fetch_json(self.client.get(&url), &url).await?;
        Ok(Self::parse_version_payload(payload))
    }

    async fn fetch_game_versions(&self) -> Result<Vec<GameVersion>> {
        let url = format!("{}/tag/game_version", self.config.base_url);
        let payload = fetch_json(self.client.get(&url), &url).await?;

        let mut versions: Vec<GameVersion> = payload
            .as_array()
            .cloned()
            .unwrap_or_default()
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<ModrinthGameVersion>(entry).ok())
            .filter(|tag| tag.version_type == "release")
            .map(|tag| GameVersion::release(tag.version))
            .collect();

        versions.sort_by(|a, b| numeric_sort_key(&b.name).cmp(&numeric_sort_key(&a.name)));
        Ok(versions)
    }
}

#[async_trait]
impl ModProvider for ModrinthClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Modrinth
    }

    async fn search_by_slug(&self, slug: &str) -> Option<ModSummary> {
        let key = CacheKey::new(CacheOp::SlugSearch, &[slug]);

        // Check cache first
        if let Some(cached) = self.cache.get::<ModSummary>(&key) {
            debug!("Returning cached Modrinth slug lookup for '{}'", slug);
            return Some(cached);
        }

        match self.fetch_project(slug).await {
            Ok(Some(summary)) => {
                // Cache the result for 6 hours
                self.cache.put(key, &summary, SLUG_SEARCH_TTL);
                Some(summary)
            }
            Ok(None) => None,
            Err(err) => {
                log_upstream_failure(ProviderKind::Modrinth, "search_by_slug", &err);
                None
            }
        }
    }

    async fn get_mod(&self, id: &str) -> Option<ModSummary> {
        let key = CacheKey::new(CacheOp::ModDetails, &[id]);

        // Check cache first
        if let Some(cached) = self.cache.get::<ModSummary>(&key) {
            debug!("Returning cached Modrinth project {}", id);
            return Some(cached);
        }

        match self.fetch_project(id).await {
            Ok(Some(summary)) => {
                // Cache the result for 12 hours
                self.cache.put(key, &summary, PROJECT_TTL);
                Some(summary)
            }
            Ok(None) => None,
            Err(err) => {
                log_upstream_failure(ProviderKind::Modrinth, "get_mod", &err);
                None
            }
        }
    }

    async fn search_mods(&self, filter: &SearchFilter) -> Vec<ModSummary> {
        let query = filter.query.clone().unwrap_or_default();
        let limit = filter.page_size.unwrap_or(50).to_string();
        let offset = filter.index.unwrap_or(0).to_string();
        let key = CacheKey::new(CacheOp::Search, &[&query, &limit, &offset]);

        // Check cache first
        if let Some(cached) = self.cache.get::<Vec<ModSummary>>(&key) {
            debug!("Returning cached Modrinth search for '{}'", query);
            return cached;
        }

        let url = format!("{}/search", self.config.base_url);
        let params = vec![
            ("query", query.clone()),
            ("facets", r#"[["project_type:mod"]]"#.to_string()),
            ("limit", limit),
            ("offset", offset),
        ];

        let payload = match fetch_json(self.client.get(&url).query(&params), &url).await {
            Ok(payload) => payload,
            Err(err) => {
                log_upstream_failure(ProviderKind::Modrinth, "search_mods", &err);
                return Vec::new();
            }
        };

        let response: ModrinthSearchResponse = match serde_json::from_value(payload) {
            Ok(response) => response,
            Err(err) => {
                debug!("Undecodable Modrinth search payload for '{}': {}", query, err);
                ModrinthSearchResponse { hits: Vec::new() }
            }
        };
        let results: Vec<ModSummary> = response
            .hits
            .into_iter()
            .filter_map(|hit| serde_json::from_value::<ModrinthSearchHit>(hit).ok())
            .map(|hit| ModSummary {
                source: ProviderKind::Modrinth,
                id: hit.project_id,
                slug: hit.slug,
                name: hit.title,
                description: hit.description,
            })
            .collect();

        if !results.is_empty() {
            // Cache the result for 30 minutes
            self.cache.put(key, &results, SEARCH_TTL);
        }
        results
    }

    async fn get_files(
        &self,
        id: &str,
        game_version: Option<&str>,
        loader: Option<ModLoader>,
    ) -> Vec<ReleaseFile> {
        let version_param = game_version.map(normalize).unwrap_or_default();
        let loader_param = loader.map(|l| l.slug()).unwrap_or_default();
        let key = CacheKey::new(CacheOp::ModFiles, &[id, &version_param, loader_param]);

        // Check cache first
        if let Some(cached) = self.cache.get::<Vec<ReleaseFile>>(&key) {
            debug!("Returning cached Modrinth versions for {}", id);
            return cached;
        }

        match self.fetch_versions(id, game_version, loader).await {
            Ok(files) => {
                if !files.is_empty() {
                    // Cache the result for 1 hour
                    self.cache.put(key, &files, VERSIONS_TTL);
                }
                files
            }
            Err(err) => {
                log_upstream_failure(ProviderKind::Modrinth, "get_files", &err);
                Vec::new()
            }
        }
    }

    async fn get_file(&self, _id: &str, file_id: &str) -> Option<ReleaseFile> {
        let key = CacheKey::new(CacheOp::FileDetails, &[file_id]);

        // Check cache first
        if let Some(cached) = self.cache.get::<ReleaseFile>(&key) {
            debug!("Returning cached Modrinth version {}", file_id);
            return Some(cached);
        }

        match self.fetch_version(file_id).await {
            Ok(Some(file)) => {
                // Cache the result for 2 hours
                self.cache.put(key, &file, VERSION_TTL);
                Some(file)
            }
            Ok(None) => None,
            Err(err) => {
                log_upstream_failure(ProviderKind::Modrinth, "get_file", &err);
                None
            }
        }
    }

    async fn get_game_versions(&self) -> Vec<GameVersion> {
        let key = CacheKey::new(CacheOp::GameVersions, &[]);

        // Check cache first
        if let Some(cached) = self.cache.get::<Vec<GameVersion>>(&key) {
            debug!("Returning cached Modrinth game versions");
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
                log_upstream_failure(ProviderKind::Modrinth, "get_game_versions", &err);
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
            let Some(project_id) = entry
                .get("project_id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
            else {
                continue;
            };
            let reference = ModRef::Modrinth(project_id.to_string());
            match entry.get("dependency_type").and_then(Value::as_str) {
                Some("required") => dependencies.required.push(reference),
                Some("optional") => dependencies.optional.push(reference),
                Some("embedded") => dependencies.embedded.push(reference),
                _ => {}
            }
        }
        dependencies
    }

    async fn get_download_info(&self, id: &str, file_id: &str) -> Option<DownloadInfo> {
        let key = CacheKey::new(CacheOp::DownloadInfo, &[file_id]);

        // Check cache first
        if let Some(cached) = self.cache.get::<DownloadInfo>(&key) {
            debug!("Returning cached Modrinth download info for {}", file_id);
            return Some(cached);
        }

        let file = self.get_file(id, file_id).await?;
        let info = DownloadInfo {
            url: file.download_url?,
            file_name: file.file_name.unwrap_or_default(),
        };

        // Cache the result for 6 hours
        self.cache.put(key, &info, DOWNLOAD_INFO_TTL);
        Some(info)
    }

    fn invalidate_mod(&self, id: &str) {
        let evicted = self
            .cache
            .purge(|key| key.params.first().map(String::as_str) == Some(id.trim()));
        debug!("Evicted {} Modrinth cache entries for project {}", evicted, id);
    }

    fn invalidate_file(&self, id: &str, file_id: &str) {
        let file_id = file_id.trim();
        let evicted = self.cache.purge(|key| {
            matches!(key.op, CacheOp::FileDetails | CacheOp::DownloadInfo)
                && key.params.iter().any(|param| param == file_id)
        });
        debug!(
            "Evicted {} Modrinth cache entries for version {}:{}",
            evicted, id, file_id
        );
    }
}

/// The primary file represents a version; fall back to the first upload
fn pick_version_file(files: &[ModrinthVersionFile]) -> Option<&ModrinthVersionFile> {
    files.iter().find(|f| f.primary).or_else(|| files.first())
}

fn json_array_param(value: &str) -> String {
    serde_json::to_string(&[value]).unwrap_or_else(|_| format!("[\"{}\"]", value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> ModrinthClient {
        ModrinthClient::new(ModrinthConfig::default().with_base_url(base_url)).unwrap()
    }

    #[test]
    fn slug_from_url_recognizes_both_path_styles() {
        assert_eq!(
            slug_from_url("https://modrinth.com/mod/sodium").as_deref(),
            Some("sodium")
        );
        assert_eq!(
            slug_from_url("https://modrinth.com/project/sodium/versions?page=2#files").as_deref(),
            Some("sodium")
        );
        assert_eq!(slug_from_url("https://modrinth.com/user/someone"), None);
        assert_eq!(slug_from_url("sodium"), None);
    }

    #[test]
    fn version_file_pick_prefers_primary() {
        let files = vec![
            ModrinthVersionFile {
                url: "https://cdn.modrinth.com/a.jar".to_string(),
                filename: "a.jar".to_string(),
                primary: false,
            },
            ModrinthVersionFile {
                url: "https://cdn.modrinth.com/b.jar".to_string(),
                filename: "b.jar".to_string(),
                primary: true,
            },
        ];
        assert_eq!(pick_version_file(&files).unwrap().filename, "b.jar");

        let no_primary = &files[..1];
        assert_eq!(pick_version_file(no_primary).unwrap().filename, "a.jar");
    }

    #[test]
    fn dependencies_classified_by_type_string() {
        let client = test_client("http://localhost");
        let payload = json!({
            "dependencies": [
                { "project_id": "P1", "dependency_type": "required" },
                { "project_id": "P2", "dependency_type": "optional" },
                { "project_id": "P3", "dependency_type": "embedded" },
                { "project_id": "P4", "dependency_type": "incompatible" },
                { "version_id": "only-version", "dependency_type": "required" }
            ]
        });

        let deps = client.file_dependencies(&payload);
        assert_eq!(deps.required, vec![ModRef::Modrinth("P1".to_string())]);
        assert_eq!(deps.optional, vec![ModRef::Modrinth("P2".to_string())]);
        assert_eq!(deps.embedded, vec![ModRef::Modrinth("P3".to_string())]);
    }

    #[tokio::test]
    async fn get_files_sends_json_encoded_filters() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/sodium/version"))
            .and(query_param("loaders", r#"["fabric"]"#))
            .and(query_param("game_versions", r#"["1.20.1"]"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                {
                    "id": "v1",
                    "project_id": "AANobbMI",
                    "name": "Sodium 0.5.8",
                    "version_number": "0.5.8",
                    "game_versions": ["1.20.1"],
                    "loaders": ["fabric"],
                    "files": [
                        { "url": "https://cdn.modrinth.com/sodium.jar", "filename": "sodium.jar", "primary": true }
                    ]
                }
            ])))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let files = client
            .get_files("sodium", Some("1.20.1"), Some(ModLoader::Fabric))
            .await;

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].version_number.as_deref(), Some("0.5.8"));
        assert_eq!(files[0].file_name.as_deref(), Some("sodium.jar"));
        assert_eq!(files[0].mod_id, "AANobbMI");
    }

    #[tokio::test]
    async fn game_versions_keep_releases_only() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/tag/game_version"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                { "version": "1.21-pre1", "version_type": "snapshot" },
                { "version": "1.9", "version_type": "release" },
                { "version": "1.20.1", "version_type": "release" }
            ])))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let first = client.get_game_versions().await;
        let second = client.get_game_versions().await;

        let names: Vec<&str> = first.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["1.20.1", "1.9"]);
        assert_eq!(second.len(), 2);
    }

    #[tokio::test]
    async fn get_file_looks_up_versions_by_id() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version/v123"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "v123",
                "project_id": "AANobbMI",
                "name": "Sodium 0.5.8",
                "version_number": "0.5.8",
                "game_versions": ["1.20.1"],
                "loaders": ["fabric"],
                "files": [
                    { "url": "https://cdn.modrinth.com/sodium.jar", "filename": "sodium.jar", "primary": true }
                ]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let file = client.get_file("AANobbMI", "v123").await.unwrap();
        assert_eq!(file.file_id, "v123");

        // Second lookup is served from cache
        let again = client.get_file("AANobbMI", "v123").await.unwrap();
        assert_eq!(again.version_number.as_deref(), Some("0.5.8"));
    }

    #[tokio::test]
    async fn download_info_uses_primary_file() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version/v9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "v9",
                "project_id": "AANobbMI",
                "version_number": "0.5.8",
                "files": [
                    { "url": "https://cdn.modrinth.com/extra.zip", "filename": "extra.zip", "primary": false },
                    { "url": "https://cdn.modrinth.com/sodium.jar", "filename": "sodium.jar", "primary": true }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let info = client.get_download_info("AANobbMI", "v9").await.unwrap();
        assert_eq!(info.url, "https://cdn.modrinth.com/sodium.jar");
        assert_eq!(info.file_name, "sodium.jar");
    }

    #[tokio::test]
    async fn search_results_carry_modrinth_source() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .and(query_param("query", "sodium"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "hits": [
                    { "project_id": "AANobbMI", "slug": "sodium", "title": "Sodium", "description": "renderer" }
                ]
            })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        let results = client
            .search_mods(&SearchFilter::new().with_query("sodium"))
            .await;

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].source, ProviderKind::Modrinth);
        assert_eq!(results[0].id, "AANobbMI");
    }

    #[tokio::test]
    async fn undecodable_payloads_collapse_to_empty() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/project/sodium"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": 42 })))
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "hits": "none" })))
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        assert!(client.get_mod("sodium").await.is_none());
        let results = client
            .search_mods(&SearchFilter::new().with_query("sodium"))
            .await;
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn invalidate_file_forces_version_refetch() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/version/v77"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "v77",
                "project_id": "AANobbMI",
                "version_number": "1.0.0",
                "files": []
            })))
            .expect(2)
            .mount(&mock_server)
            .await;

        let client = test_client(&mock_server.uri());
        assert!(client.get_file("AANobbMI", "v77").await.is_some());
        client.invalidate_file("AANobbMI", "v77");
        assert!(client.get_file("AANobbMI", "v77").await.is_some());
    }
}
