//! Most-recently-opened application list.

use desktop_app_contract::AppId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentApp {
    pub app_id: AppId,
    pub display_name: String,
}

/// Most recent first, one entry per app, capped at `limit`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecentApps {
    entries: Vec<RecentApp>,
    limit: usize,
}

impl RecentApps {
    pub fn new(limit: usize) -> Self {
        Self {
            entries: Vec::new(),
            limit,
        }
    }

    /// Rebuilds the list from persisted entries, dropping duplicates and anything past `limit`.
    pub fn from_entries(entries: Vec<RecentApp>, limit: usize) -> Self {
        let mut recent = Self::new(limit);
        for entry in entries.into_iter().rev() {
            recent.record(entry.app_id, entry.display_name);
        }
        recent
    }

    pub fn record(&mut self, app_id: AppId, display_name: impl Into<String>) {
        self.entries.retain(|entry| entry.app_id != app_id);
        self.entries.insert(
            0,
            RecentApp {
                app_id,
                display_name: display_name.into(),
            },
        );
        self.entries.truncate(self.limit);
    }

    pub fn entries(&self) -> &[RecentApp] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
