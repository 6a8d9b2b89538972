//! Scheduled reconciliation entry points
//!
//! Both jobs are plain async entry points; scheduling them is the caller's
//! concern. A run never fails as a whole: failures are caught per group or
//! per pack, logged with context, and reported through the run summary.

pub mod compat_reminder;
pub mod update_check;

pub use compat_reminder::{ReminderRunSummary, VersionCompatibilityReminder};
pub use update_check::{UpdateReconciler, UpdateRunSummary};
