//! In-memory history store
//!
//! Append-only per-issuer record store standing in for a real persistence
//! layer. Per-issuer vectors hold records in generation order, so the
//! vector position is the stable secondary key when timestamps collide.
//! `DashMap` per-key locking serializes appends per issuer.

use async_trait::async_trait;
use credit_core::{EventRecord, HistoryStore, Issuer, ScoreRecord, StoreCounts};
use dashmap::DashMap;

pub const DEFAULT_RECENT_EVENTS: usize = 5;

#[derive(Default)]
pub struct InMemoryHistoryStore {
    issuers: DashMap<String, Issuer>,
    scores: DashMap<String, Vec<ScoreRecord>>,
    events: DashMap<String, Vec<EventRecord>>,
}

impl InMemoryHistoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HistoryStore for InMemoryHistoryStore {
    async fn insert_issuer(&self, issuer: Issuer) {
        self.issuers.insert(issuer.id.clone(), issuer);
    }

    async fn get_issuer(&self, id: &str) -> Option<Issuer> {
        self.issuers.get(id).map(|entry| entry.clone())
    }

    async fn list_issuers(&self) -> Vec<Issuer> {
        self.issuers.iter().map(|entry| entry.clone()).collect()
    }

    async fn append_score(&self, record: ScoreRecord) {
        self.scores
            .entry(record.issuer_id.clone())
            .or_default()
            .push(record);
    }

    async fn append_event(&self, record: EventRecord) {
        self.events
            .entry(record.issuer_id.clone())
            .or_default()
            .push(record);
    }

    async fn latest_score(&self, issuer_id: &str) -> Option<ScoreRecord> {
        self.scores.get(issuer_id).and_then(|records| {
            records
                .iter()
                .enumerate()
                .max_by_key(|(idx, record)| (record.timestamp, *idx))
                .map(|(_, record)| record.clone())
        })
    }

    async fn recent_events(&self, issuer_id: &str, limit: usize) -> Vec<EventRecord> {
        let Some(records) = self.events.get(issuer_id) else {
            return Vec::new();
        };
        let mut indexed: Vec<(usize, &EventRecord)> = records.iter().enumerate().collect();
        indexed.sort_by_key(|(idx, record)| std::cmp::Reverse((record.applied_on, *idx)));
        indexed
            .into_iter()
            .take(limit)
            .map(|(_, record)| record.clone())
            .collect()
    }

    async fn all_scores(&self) -> Vec<ScoreRecord> {
        self.scores
            .iter()
            .flat_map(|entry| entry.value().clone())
            .collect()
    }

    async fn counts(&self) -> StoreCounts {
        StoreCounts {
            issuers: self.issuers.len(),
            scores: self.scores.iter().map(|entry| entry.value().len()).sum(),
            events: self.events.iter().map(|entry| entry.value().len()).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use credit_core::{BaselineRating, Outlook, Sector};

    fn issuer(id: &str) -> Issuer {
        Issuer {
            id: id.to_string(),
            name: format!("Issuer {}", id),
            sector: Sector::Tech,
            baseline_rating: BaselineRating::Bbb,
        }
    }

    fn score_at(issuer_id: &str, score: i32, ts: chrono::DateTime<Utc>) -> ScoreRecord {
        ScoreRecord {
            issuer_id: issuer_id.to_string(),
            score,
            shap_values: vec![
                "Profit Margin: 0.100".to_string(),
                "Debt Ratio: -0.050".to_string(),
                "Growth: 0.020".to_string(),
            ],
            outlook: Outlook::from_score(score),
            timestamp: ts,
        }
    }

    fn event_at(issuer_id: &str, description: &str, ts: chrono::DateTime<Utc>) -> EventRecord {
        EventRecord {
            issuer_id: issuer_id.to_string(),
            event_type: "news".to_string(),
            description: description.to_string(),
            applied_on: ts,
        }
    }

    #[tokio::test]
    async fn test_issuer_round_trip() {
        let store = InMemoryHistoryStore::new();
        store.insert_issuer(issuer("a")).await;
        assert!(store.get_issuer("a").await.is_some());
        assert!(store.get_issuer("missing").await.is_none());
        assert_eq!(store.list_issuers().await.len(), 1);
    }

    #[tokio::test]
    async fn test_latest_score_none_without_records() {
        let store = InMemoryHistoryStore::new();
        assert!(store.latest_score("a").await.is_none());
    }

    #[tokio::test]
    async fn test_latest_score_picks_max_timestamp() {
        let store = InMemoryHistoryStore::new();
        let t1 = Utc::now();
        let t2 = t1 + Duration::seconds(10);
        store.append_score(score_at("a", 30, t1)).await;
        store.append_score(score_at("a", 80, t2)).await;
        let latest = store.latest_score("a").await.unwrap();
        assert_eq!(latest.score, 80);
    }

    #[tokio::test]
    async fn test_latest_score_tie_keeps_generation_order() {
        let store = InMemoryHistoryStore::new();
        let ts = Utc::now();
        store.append_score(score_at("a", 41, ts)).await;
        store.append_score(score_at("a", 42, ts)).await;
        // Same instant: the later append wins
        assert_eq!(store.latest_score("a").await.unwrap().score, 42);
    }

    #[tokio::test]
    async fn test_recent_events_capped_and_descending() {
        let store = InMemoryHistoryStore::new();
        let base = Utc::now();
        for i in 0..8 {
            store
                .append_event(event_at("a", &format!("event {}", i), base + Duration::seconds(i)))
                .await;
        }
        let recent = store.recent_events("a", DEFAULT_RECENT_EVENTS).await;
        assert_eq!(recent.len(), 5);
        assert_eq!(recent[0].description, "event 7");
        assert_eq!(recent[4].description, "event 3");
        for window in recent.windows(2) {
            assert!(window[0].applied_on >= window[1].applied_on);
        }
    }

    #[tokio::test]
    async fn test_recent_events_tie_prefers_later_append() {
        let store = InMemoryHistoryStore::new();
        let ts = Utc::now();
        store.append_event(event_at("a", "first", ts)).await;
        store.append_event(event_at("a", "second", ts)).await;
        let recent = store.recent_events("a", DEFAULT_RECENT_EVENTS).await;
        assert_eq!(recent[0].description, "second");
        assert_eq!(recent[1].description, "first");
    }

    #[tokio::test]
    async fn test_recent_events_empty_for_unknown_issuer() {
        let store = InMemoryHistoryStore::new();
        assert!(store.recent_events("nope", 5).await.is_empty());
    }

    #[tokio::test]
    async fn test_counts_track_appends() {
        let store = InMemoryHistoryStore::new();
        store.insert_issuer(issuer("a")).await;
        let ts = Utc::now();
        store.append_score(score_at("a", 55, ts)).await;
        store.append_score(score_at("a", 60, ts)).await;
        store.append_event(event_at("a", "e", ts)).await;
        let counts = store.counts().await;
        assert_eq!(counts.issuers, 1);
        assert_eq!(counts.scores, 2);
        assert_eq!(counts.events, 1);
        assert_eq!(store.all_scores().await.len(), 2);
    }
}
