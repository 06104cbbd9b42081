use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

use uuid::Uuid;

use super::aggregate::DashboardSummary;

/// Default time-to-live for cached dashboard summaries.
pub const DEFAULT_TTL_SECS: u64 = 30;

struct CacheEntry {
    summary: DashboardSummary,
    expires_at: Instant,
}

/// Short-TTL cache of dashboard summaries keyed by user, held in `AppState`
/// and passed around explicitly. Only an optimization against rapid
/// repeated dashboard loads; correctness never depends on a hit.
///
/// Lock poisoning degrades to a miss (read) or a dropped write rather than
/// a panic.
pub struct DashboardCache {
    ttl: Duration,
    entries: RwLock<HashMap<Uuid, CacheEntry>>,
}

impl DashboardCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
        }
    }

    pub fn get(&self, user_id: Uuid) -> Option<DashboardSummary> {
        let entries = self.entries.read().ok()?;
        let entry = entries.get(&user_id)?;
        if entry.expires_at <= Instant::now() {
            return None;
        }
        Some(entry.summary.clone())
    }

    pub fn insert(&self, user_id: Uuid, summary: DashboardSummary) {
        if let Ok(mut entries) = self.entries.write() {
            let now = Instant::now();
            entries.retain(|_, e| e.expires_at > now);
            entries.insert(
                user_id,
                CacheEntry {
                    summary,
                    expires_at: now + self.ttl,
                },
            );
        }
    }

    /// Drops the user's entry. Called whenever something the summary was
    /// computed from changes (profile edits, new logs).
    pub fn invalidate(&self, user_id: Uuid) {
        if let Ok(mut entries) = self.entries.write() {
            entries.remove(&user_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::aggregate::{build_summary, AggregateInput};
    use time::macros::date;

    fn summary() -> DashboardSummary {
        build_summary(date!(2025 - 06 - 30), &AggregateInput::default())
    }

    #[test]
    fn hit_within_ttl_and_miss_after_expiry() {
        let cache = DashboardCache::new(Duration::from_millis(40));
        let user = Uuid::new_v4();
        cache.insert(user, summary());
        assert!(cache.get(user).is_some());

        std::thread::sleep(Duration::from_millis(60));
        assert!(cache.get(user).is_none());
    }

    #[test]
    fn entries_are_per_user() {
        let cache = DashboardCache::new(Duration::from_secs(30));
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        cache.insert(a, summary());
        assert!(cache.get(a).is_some());
        assert!(cache.get(b).is_none());
    }

    #[test]
    fn invalidate_removes_a_fresh_entry() {
        let cache = DashboardCache::new(Duration::from_secs(30));
        let user = Uuid::new_v4();
        cache.insert(user, summary());
        cache.invalidate(user);
        assert!(cache.get(user).is_none());
    }
}
