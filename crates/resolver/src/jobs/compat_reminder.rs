//! Pending "notify me when my target is supported" reminders
//!
//! Pack owners can ask to be told once every mod in a pack has at least one
//! release for a chosen game version and loader. Each run re-checks the
//! packs still waiting: a fully supported pack triggers the notification
//! and clears its reminder, anything else stays queued for the next run.

use crate::resolution::ModResolutionService;
use crate::store::{Notifier, Pack, PackStore, ReminderTarget};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Counts reported by one reminder run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderRunSummary {
    pub packs_checked: usize,
    pub reminders_sent: usize,
    pub blocked_packs: usize,
    pub errors: usize,
}

/// Resolves pending reminders for packs waiting on a target game version
pub struct VersionCompatibilityReminder {
    service: Arc<ModResolutionService>,
    store: Arc<dyn PackStore>,
    notifier: Arc<dyn Notifier>,
}

impl VersionCompatibilityReminder {
    pub fn new(
        service: Arc<ModResolutionService>,
        store: Arc<dyn PackStore>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            service,
            store,
            notifier,
        }
    }

    /// Run one pass over every pack with a pending reminder.
    ///
    /// The run always completes: a failure while notifying or clearing one
    /// pack is logged, counted, and does not stop the others.
    pub async fn run(&self) -> ReminderRunSummary {
        let mut summary = ReminderRunSummary::default();

        let packs = match self.store.load_packs().await {
            Ok(packs) => packs,
            Err(err) => {
                warn!("Loading packs failed, no reminders checked: {}", err);
                summary.errors += 1;
                return summary;
            }
        };

        for pack in &packs {
            let Some(target) = &pack.pending_reminder else {
                continue;
            };
            summary.packs_checked += 1;

            let blocking = self.blocking_items(pack, target).await;
            if !blocking.is_empty() {
                summary.blocked_packs += 1;
                info!(
                    "Pack '{}' still waiting on {} for {} {}",
                    pack.name,
                    blocking.join(", "),
                    target.game_version,
                    target.loader.name()
                );
                continue;
            }

            match self.complete(pack, target).await {
                Ok(()) => {
                    info!(
                        "Pack '{}' is fully supported on {} {}, reminder cleared",
                        pack.name,
                        target.game_version,
                        target.loader.name()
                    );
                    summary.reminders_sent += 1;
                }
                Err(err) => {
                    warn!("Completing reminder for pack '{}' failed: {}", pack.name, err);
                    summary.errors += 1;
                }
            }
        }

        debug!(
            "Reminder check complete: {} packs, {} reminders, {} blocked, {} errors",
            summary.packs_checked,
            summary.reminders_sent,
            summary.blocked_packs,
            summary.errors
        );
        summary
    }

    /// Names of the items still missing a release for the target.
    ///
    /// A pack with no resolvable items blocks on nothing, so it reads as
    /// fully supported.
    async fn blocking_items(&self, pack: &Pack, target: &ReminderTarget) -> Vec<String> {
        let mut blocking = Vec::new();
        for item in &pack.items {
            let Some(reference) = item.mod_reference() else {
                debug!("'{}' has no usable mod reference, skipping", item.name);
                continue;
            };
            let files = self
                .service
                .files_for(&reference, Some(&target.game_version), Some(target.loader))
                .await;
            if files.is_empty() {
                blocking.push(item.name.clone());
            }
        }
        blocking
    }

    async fn complete(&self, pack: &Pack, target: &ReminderTarget) -> anyhow::Result<()> {
        self.notifier.target_supported(pack, target).await?;
        self.store.clear_reminder(pack.id).await?;
        Ok(())
    }
}
