//! Application version check.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Release information published by the server for one platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppVersion {
    pub latest: String,
    pub minimum_supported: String,
    #[serde(default)]
    pub store_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum VersionStatus {
    UpToDate,
    UpdateAvailable { latest: String },
    UpdateRequired { minimum_supported: String },
}

impl AppVersion {
    /// Classifies the running `current` version against this release info.
    pub fn status_for(&self, current: &str) -> VersionStatus {
        if compare_versions(current, &self.minimum_supported) == Ordering::Less {
            VersionStatus::UpdateRequired {
                minimum_supported: self.minimum_supported.clone(),
            }
        } else if compare_versions(current, &self.latest) == Ordering::Less {
            VersionStatus::UpdateAvailable {
                latest: self.latest.clone(),
            }
        } else {
            VersionStatus::UpToDate
        }
    }
}

/// Compares dotted numeric versions. Missing components count as zero and a
/// leading `v` or any pre-release suffix (`-beta`, `+build`) is ignored.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    let left = components(a);
    let right = components(b);
    let len = left.len().max(right.len());
    (0..len)
        .map(|i| {
            let l = left.get(i).copied().unwrap_or(0);
            let r = right.get(i).copied().unwrap_or(0);
            l.cmp(&r)
        })
        .find(|ord| *ord != Ordering::Equal)
        .unwrap_or(Ordering::Equal)
}

fn components(version: &str) -> Vec<u64> {
    let version = version.trim().trim_start_matches(['v', 'V']);
    let core = version
        .split(['-', '+'])
        .next()
        .unwrap_or_default();
    core.split('.')
        .map(|part| part.trim().parse().unwrap_or(0))
        .collect()
}
