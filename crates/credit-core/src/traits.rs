use crate::{CreditError, EventRecord, FeatureVector, Issuer, NewsSignal, ScoreRecord, StoreCounts};
use async_trait::async_trait;

/// Source of per-run synthetic inputs. The production implementation never
/// fails; the `Result` is the seam test doubles use to force per-issuer
/// refresh failures.
pub trait FeatureSource: Send + Sync {
    fn financials(&self) -> Result<FeatureVector, CreditError>;
    fn news(&self) -> Result<NewsSignal, CreditError>;
}

/// Capability producing one signed contribution per feature, deterministic
/// given a fixed background. Swappable per deployment.
pub trait Attributor: Send + Sync {
    fn attribute(&self, features: &FeatureVector) -> Result<[f64; 3], CreditError>;
}

/// Append-only record store, injected into the orchestrator (constructed
/// once at startup, never a module-level singleton).
#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn insert_issuer(&self, issuer: Issuer);
    async fn get_issuer(&self, id: &str) -> Option<Issuer>;
    async fn list_issuers(&self) -> Vec<Issuer>;

    async fn append_score(&self, record: ScoreRecord);
    async fn append_event(&self, record: EventRecord);

    /// Latest score by timestamp; insertion order breaks timestamp ties
    async fn latest_score(&self, issuer_id: &str) -> Option<ScoreRecord>;

    /// Most recent events, timestamp descending, at most `limit`
    async fn recent_events(&self, issuer_id: &str, limit: usize) -> Vec<EventRecord>;

    async fn all_scores(&self) -> Vec<ScoreRecord>;
    async fn counts(&self) -> StoreCounts;
}
