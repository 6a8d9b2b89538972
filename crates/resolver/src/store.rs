//! Pack storage and notification seams
//!
//! The resolution core reads packs and signals verdicts; it never owns
//! persistence. Callers plug their storage and notification backends in
//! through these traits, which keeps the scheduled jobs testable with
//! in-memory fakes.

use crate::core::{ModLoader, ModRef, ProviderKind, ReleaseFile};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One mod installed in a pack, as read from the caller's storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackItem {
    pub id: u64,
    pub name: String,
    /// Provider, when the caller recorded one
    pub source: Option<ProviderKind>,
    /// Loose identifier: CurseForge mod id or Modrinth project id
    pub mod_id: String,
    pub installed_version: String,
    pub last_notified_at: Option<DateTime<Utc>>,
}

impl PackItem {
    /// Resolve the stored fields into a usable reference.
    ///
    /// An explicit source wins; otherwise the id's shape decides. Items whose
    /// id does not fit the recorded source have no usable reference.
    pub fn mod_reference(&self) -> Option<ModRef> {
        let id = self.mod_id.trim();
        match self.source {
            Some(ProviderKind::CurseForge) => id.parse().ok().map(ModRef::CurseForge),
            Some(ProviderKind::Modrinth) => {
                (!id.is_empty()).then(|| ModRef::Modrinth(id.to_string()))
            }
            None => ModRef::infer(id),
        }
    }
}

/// The version and loader pair a pending reminder is waiting on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTarget {
    pub game_version: String,
    pub loader: ModLoader,
}

/// A curated pack, as read from the caller's storage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pack {
    pub id: u64,
    pub name: String,
    /// Game version the pack currently targets
    pub game_version: String,
    pub loader: ModLoader,
    pub items: Vec<PackItem>,
    /// Set while the owner waits for every item to support a new target
    pub pending_reminder: Option<ReminderTarget>,
}

/// Read and stamp packs in whatever storage the caller runs
#[async_trait]
pub trait PackStore: Send + Sync {
    /// Every stored pack with its items
    async fn load_packs(&self) -> anyhow::Result<Vec<Pack>>;

    /// Record that an update notification went out for one item
    async fn mark_notified(
        &self,
        pack_id: u64,
        item_id: u64,
        at: DateTime<Utc>,
    ) -> anyhow::Result<()>;

    /// Drop a pack's pending reminder once its target is fully supported
    async fn clear_reminder(&self, pack_id: u64) -> anyhow::Result<()>;
}

/// Delivers user-facing notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    /// A newer compatible release exists for an installed mod
    async fn mod_update_available(
        &self,
        pack: &Pack,
        item: &PackItem,
        latest: &ReleaseFile,
    ) -> anyhow::Result<()>;

    /// Every item in the pack has a release for the reminder's target
    async fn target_supported(&self, pack: &Pack, target: &ReminderTarget) -> anyhow::Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(source: Option<ProviderKind>, mod_id: &str) -> PackItem {
        PackItem {
            id: 1,
            name: "Some Mod".to_string(),
            source,
            mod_id: mod_id.to_string(),
            installed_version: "1.0.0".to_string(),
            last_notified_at: None,
        }
    }

    #[test]
    fn explicit_source_is_honored() {
        let reference = item(Some(ProviderKind::CurseForge), "238222").mod_reference();
        assert_eq!(reference, Some(ModRef::CurseForge(238222)));

        let reference = item(Some(ProviderKind::Modrinth), "12345").mod_reference();
        assert_eq!(reference, Some(ModRef::Modrinth("12345".to_string())));
    }

    #[test]
    fn missing_source_falls_back_to_id_shape() {
        assert_eq!(
            item(None, "238222").mod_reference(),
            Some(ModRef::CurseForge(238222))
        );
        assert_eq!(
            item(None, "AANobbMI").mod_reference(),
            Some(ModRef::Modrinth("AANobbMI".to_string()))
        );
    }

    #[test]
    fn unusable_references_resolve_to_none() {
        assert_eq!(item(None, "").mod_reference(), None);
        assert_eq!(item(None, "   ").mod_reference(), None);
        assert_eq!(
            item(Some(ProviderKind::CurseForge), "not-a-number").mod_reference(),
            None
        );
        assert_eq!(item(Some(ProviderKind::Modrinth), "").mod_reference(), None);
    }
}
