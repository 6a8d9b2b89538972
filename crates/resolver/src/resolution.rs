//! Provider-agnostic mod resolution
//!
//! [`ModResolutionService`] sits between callers and the two provider
//! clients. It owns the routing rules: explicit sources route directly,
//! loose identifiers are classified by shape (numeric reads as CurseForge),
//! mod and file-list lookups fall through to the other provider on a miss
//! while single-file operations stay on their routed provider, and
//! always-both operations run the providers concurrently and merge.
//!
//! Providers collapse their own failures to empty results, so nothing here
//! returns an error; an unreachable provider simply contributes nothing.

use crate::core::version::numeric_sort_key;
use crate::core::{
    DownloadInfo, FileDependencies, GameVersion, LoaderEntry, ModLoader, ModRef, ModSummary,
    ProviderKind, ReleaseFile, Result, SearchFilter,
};
use crate::providers::{CurseForgeClient, ModProvider, ModrinthClient};
use futures::future;
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Routes mod operations across both providers behind one interface
pub struct ModResolutionService {
    curseforge: Arc<dyn ModProvider>,
    modrinth: Arc<dyn ModProvider>,
}

impl ModResolutionService {
    /// Build a service over any two provider implementations
    pub fn new(curseforge: Arc<dyn ModProvider>, modrinth: Arc<dyn ModProvider>) -> Self {
        Self {
            curseforge,
            modrinth,
        }
    }

    /// Build a service over the real clients
    pub fn from_clients(curseforge: CurseForgeClient, modrinth: ModrinthClient) -> Self {
        Self::new(Arc::new(curseforge), Arc::new(modrinth))
    }

    /// Build a service from environment configuration
    pub fn from_env() -> Result<Self> {
        Ok(Self::from_clients(
            CurseForgeClient::from_env()?,
            ModrinthClient::with_defaults()?,
        ))
    }

    fn provider(&self, kind: ProviderKind) -> &dyn ModProvider {
        match kind {
            ProviderKind::CurseForge => self.curseforge.as_ref(),
            ProviderKind::Modrinth => self.modrinth.as_ref(),
        }
    }

    /// The providers to try for an identifier, in order.
    ///
    /// An explicit source pins the lookup to one provider. Otherwise the id's
    /// shape picks the first candidate and the other provider serves as
    /// fall-through.
    fn routing_order(&self, id: &str, source: Option<ProviderKind>) -> Vec<ProviderKind> {
        match source {
            Some(kind) => vec![kind],
            None => match ModRef::infer(id) {
                Some(ModRef::CurseForge(_)) => {
                    vec![ProviderKind::CurseForge, ProviderKind::Modrinth]
                }
                Some(ModRef::Modrinth(_)) => {
                    vec![ProviderKind::Modrinth, ProviderKind::CurseForge]
                }
                None => Vec::new(),
            },
        }
    }

    /// The single provider a per-file operation routes to; never falls through
    fn routed_provider(&self, id: &str, source: Option<ProviderKind>) -> Option<ProviderKind> {
        self.routing_order(id, source).into_iter().next()
    }

    /// Slug lookup against both providers; every hit keeps its source tag
    pub async fn search_mod_by_slug(&self, slug: &str) -> Vec<ModSummary> {
        let (curseforge, modrinth) = future::join(
            self.curseforge.search_by_slug(slug),
            self.modrinth.search_by_slug(slug),
        )
        .await;
        curseforge.into_iter().chain(modrinth).collect()
    }

    /// Free-text search across both providers.
    ///
    /// Results are concatenated CurseForge-first and deduplicated by
    /// (source, id), keeping the first occurrence.
    pub async fn search_mods(&self, filter: &SearchFilter) -> Vec<ModSummary> {
        let (mut results, modrinth) = future::join(
            self.curseforge.search_mods(filter),
            self.modrinth.search_mods(filter),
        )
        .await;
        results.extend(modrinth);

        let mut seen = HashSet::new();
        results.retain(|entry| seen.insert((entry.source, entry.id.clone())));
        results
    }

    pub async fn get_mod(&self, id: &str, source: Option<ProviderKind>) -> Option<ModSummary> {
        for kind in self.routing_order(id, source) {
            if let Some(found) = self.provider(kind).get_mod(id).await {
                return Some(found);
            }
            debug!("{} has no mod '{}', trying next provider", kind, id);
        }
        None
    }

    pub async fn get_mod_files(
        &self,
        id: &str,
        source: Option<ProviderKind>,
        game_version: Option<&str>,
        loader: Option<ModLoader>,
    ) -> Vec<ReleaseFile> {
        for kind in self.routing_order(id, source) {
            let files = self
                .provider(kind)
                .get_files(id, game_version, loader)
                .await;
            if !files.is_empty() {
                return files;
            }
            debug!("{} has no files for '{}', trying next provider", kind, id);
        }
        Vec::new()
    }

    pub async fn get_file(
        &self,
        id: &str,
        file_id: &str,
        source: Option<ProviderKind>,
    ) -> Option<ReleaseFile> {
        let kind = self.routed_provider(id, source)?;
        self.provider(kind).get_file(id, file_id).await
    }

    pub async fn get_latest_file(
        &self,
        id: &str,
        source: Option<ProviderKind>,
        game_version: &str,
        loader: ModLoader,
    ) -> Option<ReleaseFile> {
        let kind = self.routed_provider(id, source)?;
        self.provider(kind)
            .get_latest_file(id, game_version, loader)
            .await
    }

    pub async fn get_download_info(
        &self,
        id: &str,
        file_id: &str,
        source: Option<ProviderKind>,
    ) -> Option<DownloadInfo> {
        let kind = self.routed_provider(id, source)?;
        self.provider(kind).get_download_info(id, file_id).await
    }

    /// Classify dependencies from a normalized file
    pub fn file_dependencies(&self, file: &ReleaseFile) -> FileDependencies {
        self.provider(file.source).file_dependencies(&file.raw)
    }

    /// Classify dependencies from a raw payload of unknown provenance.
    ///
    /// Without an explicit source the payload's own shape decides: CurseForge
    /// dependency entries carry `modId`, Modrinth entries carry `project_id`.
    /// Payloads matching neither produce an empty classification.
    pub fn file_dependencies_from_payload(
        &self,
        payload: &Value,
        source: Option<ProviderKind>,
    ) -> FileDependencies {
        let Some(kind) = source.or_else(|| infer_dependency_source(payload)) else {
            debug!("Could not infer dependency source from payload shape");
            return FileDependencies::default();
        };
        self.provider(kind).file_dependencies(payload)
    }

    /// Union of both game-version catalogs.
    ///
    /// Merged by name with the CurseForge entry winning duplicates, then
    /// re-sorted newest first.
    pub async fn get_game_versions(&self) -> Vec<GameVersion> {
        let (curseforge, modrinth) = future::join(
            self.curseforge.get_game_versions(),
            self.modrinth.get_game_versions(),
        )
        .await;

        let mut merged: Vec<GameVersion> = Vec::new();
        let mut seen = HashSet::new();
        for version in curseforge.into_iter().chain(modrinth) {
            if seen.insert(version.name.clone()) {
                merged.push(version);
            }
        }
        merged.sort_by(|a, b| numeric_sort_key(&b.name).cmp(&numeric_sort_key(&a.name)));
        merged
    }

    /// Both loader catalogs merged by slug, provider order preserved
    pub fn get_mod_loaders(&self) -> Vec<LoaderEntry> {
        let mut merged = self.curseforge.mod_loaders();
        let mut seen: HashSet<String> = merged.iter().map(|entry| entry.slug.clone()).collect();
        for entry in self.modrinth.mod_loaders() {
            if seen.insert(entry.slug.clone()) {
                merged.push(entry);
            }
        }
        merged
    }

    /// Evict cached state for a mod; without a source both providers evict
    pub fn invalidate_mod(&self, id: &str, source: Option<ProviderKind>) {
        match source {
            Some(kind) => self.provider(kind).invalidate_mod(id),
            None => {
                self.curseforge.invalidate_mod(id);
                self.modrinth.invalidate_mod(id);
            }
        }
    }

    /// Evict cached state for one file; without a source both providers evict
    pub fn invalidate_file(&self, id: &str, file_id: &str, source: Option<ProviderKind>) {
        match source {
            Some(kind) => self.provider(kind).invalidate_file(id, file_id),
            None => {
                self.curseforge.invalidate_file(id, file_id);
                self.modrinth.invalidate_file(id, file_id);
            }
        }
    }

    /// Files for an already-classified reference, no fall-through
    pub async fn files_for(
        &self,
        reference: &ModRef,
        game_version: Option<&str>,
        loader: Option<ModLoader>,
    ) -> Vec<ReleaseFile> {
        self.provider(reference.kind())
            .get_files(&reference.id_string(), game_version, loader)
            .await
    }

    /// Latest matching file for an already-classified reference
    pub async fn latest_file_for(
        &self,
        reference: &ModRef,
        game_version: &str,
        loader: ModLoader,
    ) -> Option<ReleaseFile> {
        self.provider(reference.kind())
            .get_latest_file(&reference.id_string(), game_version, loader)
            .await
    }
}

fn infer_dependency_source(payload: &Value) -> Option<ProviderKind> {
    let first = payload.get("dependencies")?.as_array()?.first()?;
    if first.get("modId").is_some() {
        return Some(ProviderKind::CurseForge);
    }
    if first.get("project_id").is_some() {
        return Some(ProviderKind::Modrinth);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned provider that records which operations were asked of it
    struct FakeProvider {
        kind: ProviderKind,
        mods: HashMap<String, ModSummary>,
        files: Vec<ReleaseFile>,
        search_results: Vec<ModSummary>,
        game_versions: Vec<GameVersion>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn new(kind: ProviderKind) -> Self {
            Self {
                kind,
                mods: HashMap::new(),
                files: Vec::new(),
                search_results: Vec::new(),
                game_versions: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_mod(mut self, id: &str, name: &str) -> Self {
            self.mods.insert(
                id.to_string(),
                ModSummary {
                    source: self.kind,
                    id: id.to_string(),
                    slug: None,
                    name: name.to_string(),
                    description: None,
                },
            );
            self
        }

        fn with_file(mut self, file_id: &str) -> Self {
            self.files.push(ReleaseFile {
                source: self.kind,
                mod_id: "m".to_string(),
                file_id: file_id.to_string(),
                display_name: format!("file {}", file_id),
                file_name: None,
                version_number: None,
                game_versions: vec!["1.20.1".to_string()],
                loaders: vec![ModLoader::Fabric],
                download_url: None,
                raw: Value::Null,
            });
            self
        }

        fn with_search_result(mut self, id: &str, name: &str) -> Self {
            self.search_results.push(ModSummary {
                source: self.kind,
                id: id.to_string(),
                slug: None,
                name: name.to_string(),
                description: None,
            });
            self
        }

        fn with_game_versions(mut self, names: &[&str]) -> Self {
            self.game_versions = names
                .iter()
                .map(|name| GameVersion::release(*name))
                .collect();
            self
        }

        fn record(&self, call: &str) {
            self.calls.lock().unwrap().push(call.to_string());
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModProvider for FakeProvider {
        fn kind(&self) -> ProviderKind {
            self.kind
        }

        async fn search_by_slug(&self, slug: &str) -> Option<ModSummary> {
            self.record("search_by_slug");
            self.mods.get(slug).cloned()
        }

        async fn get_mod(&self, id: &str) -> Option<ModSummary> {
            self.record("get_mod");
            self.mods.get(id).cloned()
        }

        async fn search_mods(&self, _filter: &SearchFilter) -> Vec<ModSummary> {
            self.record("search_mods");
            self.search_results.clone()
        }

        async fn get_files(
            &self,
            _id: &str,
            _game_version: Option<&str>,
            _loader: Option<ModLoader>,
        ) -> Vec<ReleaseFile> {
            self.record("get_files");
            self.files.clone()
        }

        async fn get_file(&self, _id: &str, file_id: &str) -> Option<ReleaseFile> {
            self.record("get_file");
            self.files.iter().find(|f| f.file_id == file_id).cloned()
        }

        async fn get_game_versions(&self) -> Vec<GameVersion> {
            self.record("get_game_versions");
            self.game_versions.clone()
        }

        fn mod_loaders(&self) -> Vec<LoaderEntry> {
            ModLoader::ALL
                .iter()
                .map(|loader| LoaderEntry::new(*loader, self.kind))
                .collect()
        }

        fn file_dependencies(&self, _payload: &Value) -> FileDependencies {
            self.record("file_dependencies");
            FileDependencies::default()
        }

        async fn get_download_info(&self, _id: &str, _file_id: &str) -> Option<DownloadInfo> {
            self.record("get_download_info");
            None
        }

        fn invalidate_mod(&self, _id: &str) {
            self.record("invalidate_mod");
        }

        fn invalidate_file(&self, _id: &str, _file_id: &str) {
            self.record("invalidate_file");
        }
    }

    fn service_over(
        curseforge: FakeProvider,
        modrinth: FakeProvider,
    ) -> (ModResolutionService, Arc<FakeProvider>, Arc<FakeProvider>) {
        let curseforge = Arc::new(curseforge);
        let modrinth = Arc::new(modrinth);
        let service = ModResolutionService::new(curseforge.clone(), modrinth.clone());
        (service, curseforge, modrinth)
    }

    #[tokio::test]
    async fn numeric_ids_try_curseforge_first_and_fall_through() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge),
            FakeProvider::new(ProviderKind::Modrinth).with_mod("12345", "Found on Modrinth"),
        );

        let found = service.get_mod("12345", None).await.unwrap();

        assert_eq!(found.source, ProviderKind::Modrinth);
        assert_eq!(curseforge.calls(), vec!["get_mod"]);
        assert_eq!(modrinth.calls(), vec!["get_mod"]);
    }

    #[tokio::test]
    async fn text_ids_try_modrinth_first() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge),
            FakeProvider::new(ProviderKind::Modrinth).with_mod("sodium", "Sodium"),
        );

        let found = service.get_mod("sodium", None).await.unwrap();

        assert_eq!(found.name, "Sodium");
        assert_eq!(modrinth.calls(), vec!["get_mod"]);
        assert!(curseforge.calls().is_empty());
    }

    #[tokio::test]
    async fn explicit_source_never_falls_through() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge),
            FakeProvider::new(ProviderKind::Modrinth).with_mod("12345", "Elsewhere"),
        );

        let found = service
            .get_mod("12345", Some(ProviderKind::CurseForge))
            .await;

        assert!(found.is_none());
        assert_eq!(curseforge.calls(), vec!["get_mod"]);
        assert!(modrinth.calls().is_empty());
    }

    #[tokio::test]
    async fn file_fall_through_requires_empty_first_result() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge).with_file("1"),
            FakeProvider::new(ProviderKind::Modrinth).with_file("other"),
        );

        let files = service.get_mod_files("777", None, None, None).await;

        assert_eq!(files[0].source, ProviderKind::CurseForge);
        assert_eq!(curseforge.calls(), vec!["get_files"]);
        assert!(modrinth.calls().is_empty());
    }

    #[tokio::test]
    async fn single_file_operations_stay_on_the_routed_provider() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge),
            FakeProvider::new(ProviderKind::Modrinth).with_file("9"),
        );

        assert!(service.get_file("777", "9", None).await.is_none());
        assert!(service
            .get_latest_file("777", None, "1.20.1", ModLoader::Fabric)
            .await
            .is_none());
        assert!(service.get_download_info("777", "9", None).await.is_none());

        assert_eq!(
            curseforge.calls(),
            vec!["get_file", "get_files", "get_download_info"]
        );
        assert!(modrinth.calls().is_empty());
    }

    #[tokio::test]
    async fn search_merges_and_dedupes_by_source_and_id() {
        let (service, _curseforge, _modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge)
                .with_search_result("1", "First")
                .with_search_result("1", "Duplicate")
                .with_search_result("2", "Second"),
            FakeProvider::new(ProviderKind::Modrinth).with_search_result("1", "Different source"),
        );

        let results = service.search_mods(&SearchFilter::new()).await;

        let labels: Vec<(&str, &str)> = results
            .iter()
            .map(|m| (m.id.as_str(), m.name.as_str()))
            .collect();
        assert_eq!(
            labels,
            vec![("1", "First"), ("2", "Second"), ("1", "Different source")]
        );
    }

    #[tokio::test]
    async fn slug_search_queries_both_providers() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge).with_mod("jei", "JEI"),
            FakeProvider::new(ProviderKind::Modrinth).with_mod("jei", "JEI on Modrinth"),
        );

        let results = service.search_mod_by_slug("jei").await;

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].source, ProviderKind::CurseForge);
        assert_eq!(results[1].source, ProviderKind::Modrinth);
        assert_eq!(curseforge.calls(), vec!["search_by_slug"]);
        assert_eq!(modrinth.calls(), vec!["search_by_slug"]);
    }

    #[tokio::test]
    async fn game_versions_merge_by_name_and_resort() {
        let (service, _curseforge, _modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge).with_game_versions(&["1.20.1", "1.19.4"]),
            FakeProvider::new(ProviderKind::Modrinth).with_game_versions(&["1.20.1", "1.20"]),
        );

        let versions = service.get_game_versions().await;

        let names: Vec<&str> = versions.iter().map(|v| v.name.as_str()).collect();
        assert_eq!(names, vec!["1.20.1", "1.20", "1.19.4"]);
    }

    #[test]
    fn loader_catalogs_merge_by_slug() {
        let (service, _curseforge, _modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge),
            FakeProvider::new(ProviderKind::Modrinth),
        );

        let loaders = service.get_mod_loaders();

        assert_eq!(loaders.len(), ModLoader::ALL.len());
        assert!(loaders.iter().all(|e| e.source == ProviderKind::CurseForge));
    }

    #[test]
    fn dependency_source_inferred_from_payload_shape() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge),
            FakeProvider::new(ProviderKind::Modrinth),
        );

        let cf_payload = json!({ "dependencies": [{ "modId": 10, "relationType": 3 }] });
        service.file_dependencies_from_payload(&cf_payload, None);
        assert_eq!(curseforge.calls(), vec!["file_dependencies"]);

        let mr_payload = json!({ "dependencies": [{ "project_id": "P1", "dependency_type": "required" }] });
        service.file_dependencies_from_payload(&mr_payload, None);
        assert_eq!(modrinth.calls(), vec!["file_dependencies"]);

        let unknown = json!({ "dependencies": [{ "mystery": true }] });
        let deps = service.file_dependencies_from_payload(&unknown, None);
        assert!(deps.is_empty());
    }

    #[test]
    fn invalidation_without_source_hits_both_providers() {
        let (service, curseforge, modrinth) = service_over(
            FakeProvider::new(ProviderKind::CurseForge),
            FakeProvider::new(ProviderKind::Modrinth),
        );

        service.invalidate_mod("238222", None);
        service.invalidate_file("238222", "5846846", Some(ProviderKind::CurseForge));

        assert_eq!(curseforge.calls(), vec!["invalidate_mod", "invalidate_file"]);
        assert_eq!(modrinth.calls(), vec!["invalidate_mod"]);
    }
}
