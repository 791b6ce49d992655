//! Dismissible release announcement.
//!
//! Shown until the user acknowledges it once; the acknowledgement is a single
//! versioned flag, so bumping [`ANNOUNCEMENT_VERSION`] shows the next notice
//! to everyone again.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ChartResult;
use crate::settings::{SettingKey, SettingsStore};

pub const ANNOUNCEMENT_FLAG: &str = "hasClosedAnnouncement";
pub const ANNOUNCEMENT_VERSION: u32 = 6;

#[must_use]
pub fn announcement_key() -> SettingKey {
    SettingKey::versioned(ANNOUNCEMENT_FLAG, ANNOUNCEMENT_VERSION)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnouncementSection {
    pub heading: String,
    pub items: Vec<String>,
}

/// Modal content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub title: String,
    pub sections: Vec<AnnouncementSection>,
    pub acknowledge_label: String,
}

impl Default for Announcement {
    fn default() -> Self {
        let section = |heading: &str, items: &[&str]| AnnouncementSection {
            heading: heading.to_owned(),
            items: items.iter().map(|item| (*item).to_owned()).collect(),
        };
        Self {
            title: "公告".to_owned(),
            sections: vec![
                section(
                    "感谢大家反馈的需求，现已增加如下功能：",
                    &[
                        "邮箱账号登录，以支持同步本地数据至云端。",
                        "加减仓。",
                        "版本更新提示。",
                        "性能优化。",
                    ],
                ),
                section("以下功能会在下一个版本上线：", &["定投。", "基金历史 K 线。"]),
            ],
            acknowledge_label: "我知道了".to_owned(),
        }
    }
}

impl Announcement {
    /// Body lines as displayed, items numbered from 1 within each section.
    #[must_use]
    pub fn body_lines(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for section in &self.sections {
            lines.push(section.heading.clone());
            lines.extend(
                section
                    .items
                    .iter()
                    .enumerate()
                    .map(|(index, item)| format!("{}. {item}", index + 1)),
            );
        }
        lines
    }
}

/// Decides once at startup whether the announcement is shown and records the
/// dismissal.
#[derive(Debug)]
pub struct AnnouncementGate<S: SettingsStore> {
    store: S,
    key: SettingKey,
    visible: bool,
}

impl<S: SettingsStore> AnnouncementGate<S> {
    pub fn load(store: S) -> ChartResult<Self> {
        Self::load_with_key(store, announcement_key())
    }

    /// Any non-empty stored value means the notice was already dismissed.
    pub fn load_with_key(store: S, key: SettingKey) -> ChartResult<Self> {
        let dismissed = store
            .get(&key.storage_key())?
            .is_some_and(|value| !value.is_empty());
        debug!(key = %key, dismissed, "announcement flag read");
        Ok(Self {
            store,
            key,
            visible: !dismissed,
        })
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn key(&self) -> &SettingKey {
        &self.key
    }

    /// Persists the flag and hides the announcement.
    pub fn dismiss(&mut self) -> ChartResult<()> {
        self.store.set(&self.key.storage_key(), "true")?;
        self.visible = false;
        debug!(key = %self.key, "announcement dismissed");
        Ok(())
    }

    #[must_use]
    pub fn into_store(self) -> S {
        self.store
    }
}
