//! Update reconciliation across stored packs
//!
//! One run walks every stored pack item, groups items sharing a
//! `(loader, game version, mod)` combination so each mod is resolved
//! upstream once, and compares the latest release against what each pack
//! has installed. Newer releases notify the pack owner unless the same
//! item was already notified within the cooldown window.

use crate::core::version::is_newer;
use crate::core::{ModLoader, ModRef, ReleaseFile};
use crate::resolution::ModResolutionService;
use crate::store::{Notifier, Pack, PackItem, PackStore};
use chrono::{DateTime, Months, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counts reported by one reconciliation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateRunSummary {
    pub groups_checked: usize,
    pub updates_found: usize,
    pub notifications_sent: usize,
    pub errors: usize,
}

/// Checks stored packs for newer compatible mod releases
pub struct UpdateReconciler {
    service: Arc<ModResolutionService>,
    store: Arc<dyn PackStore>,
    notifier: Arc<dyn Notifier>,
    cooldown: Months,
}

impl UpdateReconciler {
    pub fn new(
        service: Arc<ModResolutionService>,
        store: Arc<dyn PackStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service,
            store,
            notifier,
            cooldown: Months::new(1),
        }
    }

    /// Override the re-notification cooldown (default one calendar month)
    pub fn with_cooldown_months(mut self, months: u32) -> Self {
        self.cooldown = Months::new(months);
        self
    }

    /// Run one reconciliation pass over every stored pack.
    ///
    /// The run always completes: failures while notifying or stamping are
    /// logged, counted, and skipped.
    pub async fn run(&self) -> UpdateRunSummary {
        let mut summary = UpdateRunSummary::default();
        let now = Utc::now();

        let packs = match self.store.load_packs().await {
            Ok(packs) => packs,
            Err(err) => {
                warn!("Loading packs failed, nothing to reconcile: {}", err);
                summary.errors += 1;
                return summary;
            }
        };

        for (key, members) in group_items(&packs) {
            let (loader, game_version, reference) = &key;
            summary.groups_checked += 1;

            let Some(latest) = self
                .service
                .latest_file_for(reference, game_version, *loader)
                .await
            else {
                debug!(
                    "No release of {} for {} {}, skipping",
                    reference,
                    game_version,
                    loader.name()
                );
                continue;
            };
            let Some(candidate) = latest.comparable_version() else {
                debug!(
                    "Latest file of {} carries no version string, skipping",
                    reference
                );
                continue;
            };

            for (pack, item) in members {
                if !is_newer(&candidate, &item.installed_version) {
                    continue;
                }
                summary.updates_found += 1;

                if !cooldown_elapsed(item.last_notified_at, self.cooldown, now) {
                    debug!(
                        "'{}' in pack '{}' was already notified recently, suppressing",
                        item.name, pack.name
                    );
                    continue;
                }

                match self.notify_item(pack, item, &latest, now).await {
                    Ok(()) => {
                        info!(
                            "Notified pack '{}': '{}' {} -> {}",
                            pack.name, item.name, item.installed_version, candidate
                        );
                        summary.notifications_sent += 1;
                    }
                    Err(err) => {
                        warn!(
                            "Update notification for '{}' in pack '{}' failed: {}",
                            item.name, pack.name, err
                        );
                        summary.errors += 1;
                    }
                }
            }
        }

        debug!(
            "Update check complete: {} groups, {} updates, {} notifications, {} errors",
            summary.groups_checked,
            summary.updates_found,
            summary.notifications_sent,
            summary.errors
        );
        summary
    }

    async fn notify_item(
        &self,
        pack: &Pack,
        item: &PackItem,
        latest: &ReleaseFile,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        self.notifier.mod_update_available(pack, item, latest).await?;
        self.store.mark_notified(pack.id, item.id, now).await?;
        Ok(())
    }
}

type GroupKey = (ModLoader, String, ModRef);

/// Group pack items by `(loader, game version, mod)`, first-seen order.
///
/// Items without a usable mod reference are left out.
fn group_items(packs: &[Pack]) -> Vec<(GroupKey, Vec<(&Pack, &PackItem)>)> {
    let mut groups: Vec<(GroupKey, Vec<(&Pack, &PackItem)>)> = Vec::new();
    let mut index: HashMap<GroupKey, usize> = HashMap::new();

    for pack in packs {
        for item in &pack.items {
            let Some(reference) = item.mod_reference() else {
                debug!("'{}' has no usable mod reference, skipping", item.name);
                continue;
            };
            let key = (pack.loader, pack.game_version.clone(), reference);
            match index.get(&key) {
                Some(&slot) => groups[slot].1.push((pack, item)),
                None => {
                    index.insert(key.clone(), groups.len());
                    groups.push((key, vec![(pack, item)]));
                }
            }
        }
    }
    groups
}

fn cooldown_elapsed(last: Option<DateTime<Utc>>, cooldown: Months, now: DateTime<Utc>) -> bool {
    match last {
        None => true,
        Some(stamp) => match stamp.checked_add_months(cooldown) {
            Some(expiry) => expiry < now,
            None => true,
        },
    }
}
