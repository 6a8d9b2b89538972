//! Core types used throughout the resolution system
//!
//! This module contains the fundamental types that all other modules depend on.
//! By organizing these in a core module, we make the dependency relationships clear.

pub mod error;
pub mod version;

// Re-export main types for convenience
pub use error::{ResolveError, Result};

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The upstream services mods can be resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    CurseForge,
    Modrinth,
}

impl ProviderKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::CurseForge => "curseforge",
            ProviderKind::Modrinth => "modrinth",
        }
    }

    /// Parse a loose source tag as stored by callers ("curseforge", "modrinth")
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "curseforge" => Some(ProviderKind::CurseForge),
            "modrinth" => Some(ProviderKind::Modrinth),
            _ => None,
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A provider-qualified mod identifier
///
/// CurseForge addresses mods by numeric id, Modrinth by project id or slug.
/// Carrying the source in the variant makes an id without a known provider
/// unrepresentable; loose text ids from callers go through [`ModRef::infer`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "source", content = "id", rename_all = "lowercase")]
pub enum ModRef {
    CurseForge(u64),
    Modrinth(String),
}

impl ModRef {
    /// Classify a loose identifier: all-numeric reads as a CurseForge mod id,
    /// anything else as a Modrinth project id or slug. Empty input has no
    /// usable reference.
    pub fn infer(id: &str) -> Option<Self> {
        let id = id.trim();
        if id.is_empty() {
            return None;
        }
        match id.parse::<u64>() {
            Ok(mod_id) => Some(ModRef::CurseForge(mod_id)),
            Err(_) => Some(ModRef::Modrinth(id.to_string())),
        }
    }

    pub fn kind(&self) -> ProviderKind {
        match self {
            ModRef::CurseForge(_) => ProviderKind::CurseForge,
            ModRef::Modrinth(_) => ProviderKind::Modrinth,
        }
    }

    /// The identifier as providers accept it on the wire
    pub fn id_string(&self) -> String {
        match self {
            ModRef::CurseForge(mod_id) => mod_id.to_string(),
            ModRef::Modrinth(project_id) => project_id.clone(),
        }
    }
}

impl std::fmt::Display for ModRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.kind(), self.id_string())
    }
}

/// Mod loaders both providers understand
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModLoader {
    Forge,
    Fabric,
    Quilt,
    NeoForge,
}

impl ModLoader {
    pub const ALL: [ModLoader; 4] = [
        ModLoader::Forge,
        ModLoader::Fabric,
        ModLoader::Quilt,
        ModLoader::NeoForge,
    ];

    /// Numeric loader code used by the CurseForge API
    pub fn curseforge_code(&self) -> u8 {
        match self {
            ModLoader::Forge => 1,
            ModLoader::Quilt => 2,
            ModLoader::Fabric => 4,
            ModLoader::NeoForge => 6,
        }
    }

    pub fn slug(&self) -> &'static str {
        match self {
            ModLoader::Forge => "forge",
            ModLoader::Fabric => "fabric",
            ModLoader::Quilt => "quilt",
            ModLoader::NeoForge => "neoforge",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ModLoader::Forge => "Forge",
            ModLoader::Fabric => "Fabric",
            ModLoader::Quilt => "Quilt",
            ModLoader::NeoForge => "NeoForge",
        }
    }

    /// Parse a loader tag as providers and pack data spell it.
    ///
    /// NeoForge shows up as "neoforge", "neo-forge" and "neo forge" in the
    /// wild; all of them resolve to the same variant.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "forge" => Some(ModLoader::Forge),
            "fabric" => Some(ModLoader::Fabric),
            "quilt" => Some(ModLoader::Quilt),
            "neoforge" | "neo-forge" | "neo forge" => Some(ModLoader::NeoForge),
            _ => None,
        }
    }
}

impl std::fmt::Display for ModLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// One row of a provider's loader catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoaderEntry {
    pub loader: ModLoader,
    pub name: String,
    pub slug: String,
    pub source: ProviderKind,
}

impl LoaderEntry {
    pub fn new(loader: ModLoader, source: ProviderKind) -> Self {
        Self {
            loader,
            name: loader.name().to_string(),
            slug: loader.slug().to_string(),
            source,
        }
    }
}

/// A Minecraft game version as exposed to pack curation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameVersion {
    pub name: String,
    /// URL-safe form of the name, dots replaced with dashes
    pub slug: String,
    pub kind: String,
}

impl GameVersion {
    pub fn release<S: Into<String>>(name: S) -> Self {
        let name = name.into();
        let slug = name.replace('.', "-");
        Self {
            name,
            slug,
            kind: "release".to_string(),
        }
    }
}

/// A mod or project as returned by search and detail lookups
///
/// Every summary is tagged with the provider it came from so merged result
/// lists stay attributable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModSummary {
    pub source: ProviderKind,
    pub id: String,
    pub slug: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

/// A released file/version of a mod, normalized across providers
///
/// The normalized fields cover what resolution and the scheduled jobs need;
/// the raw provider payload is preserved for callers that want fields the
/// normalization does not cover (hashes, upload dates, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReleaseFile {
    pub source: ProviderKind,
    pub mod_id: String,
    pub file_id: String,
    pub display_name: String,
    pub file_name: Option<String>,
    /// Modrinth's explicit version number; CurseForge has no equivalent field
    pub version_number: Option<String>,
    pub game_versions: Vec<String>,
    pub loaders: Vec<ModLoader>,
    pub download_url: Option<String>,
    pub raw: Value,
}

impl ReleaseFile {
    /// The string a version comparison should run against.
    ///
    /// CurseForge encodes versions in the display name (file name as
    /// fallback); Modrinth carries an explicit version number. `None` means
    /// this file offers nothing comparable and update checks skip it.
    pub fn comparable_version(&self) -> Option<String> {
        match self.source {
            ProviderKind::CurseForge => {
                let display = self.display_name.trim();
                if !display.is_empty() {
                    return Some(display.to_string());
                }
                self.file_name
                    .as_deref()
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string)
            }
            ProviderKind::Modrinth => self
                .version_number
                .as_deref()
                .map(str::trim)
                .filter(|version| !version.is_empty())
                .map(str::to_string),
        }
    }
}

/// File dependencies split by requirement class
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileDependencies {
    pub required: Vec<ModRef>,
    pub optional: Vec<ModRef>,
    pub embedded: Vec<ModRef>,
}

impl FileDependencies {
    pub fn is_empty(&self) -> bool {
        self.required.is_empty() && self.optional.is_empty() && self.embedded.is_empty()
    }
}

/// A resolved download location for a specific file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub url: String,
    pub file_name: String,
}

/// Caller-supplied search filters
///
/// Each provider maps `query` onto its own parameter name; the rest scope
/// paging. Fixed game/class scoping is applied by the providers themselves.
#[derive(Debug, Clone, Default)]
pub struct SearchFilter {
    pub query: Option<String>,
    pub page_size: Option<u32>,
    pub index: Option<u32>,
}

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query<S: Into<String>>(mut self, query: S) -> Self {
        self.query = Some(query.into());
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = Some(page_size);
        self
    }

    pub fn with_index(mut self, index: u32) -> Self {
        self.index = Some(index);
        self
    }
}
