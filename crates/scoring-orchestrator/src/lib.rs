//! Scoring orchestration
//!
//! Composes the pipeline for one issuer: synthesize inputs, compute the
//! rule-based score, rank the driving factors, classify the outlook, and
//! append the score/event pair to the history store. All collaborators
//! are injected so each seam can be swapped for a test double.

use attribution_engine::AttributionRanker;
use chrono::Utc;
use credit_core::{
    AssessmentContext, Attributor, CreditError, EventRecord, FeatureSource, HistoryStore, Issuer,
    Outlook, ScoreRecord,
};
use std::sync::Arc;

pub mod seed;

pub struct ScoringOrchestrator {
    store: Arc<dyn HistoryStore>,
    source: Arc<dyn FeatureSource>,
    ranker: AttributionRanker,
}

impl ScoringOrchestrator {
    pub fn new(
        store: Arc<dyn HistoryStore>,
        source: Arc<dyn FeatureSource>,
        attributor: Arc<dyn Attributor>,
    ) -> Self {
        Self {
            store,
            source,
            ranker: AttributionRanker::new(attributor),
        }
    }

    /// Run one scoring pass for an issuer and append the resulting
    /// score/event pair. Both records share a single timestamp.
    pub async fn score_issuer(
        &self,
        issuer: &Issuer,
        context: AssessmentContext,
    ) -> Result<(ScoreRecord, EventRecord), CreditError> {
        let features = self.source.financials()?;
        let signal = self.source.news()?;

        let score = rule_engine::score(&features, &signal);
        let shap_values = self.ranker.ranked_factors(&features);
        let outlook = Outlook::from_score(score);
        let timestamp = Utc::now();

        let score_record = ScoreRecord {
            issuer_id: issuer.id.clone(),
            score,
            shap_values,
            outlook,
            timestamp,
        };
        let event_record = EventRecord {
            issuer_id: issuer.id.clone(),
            event_type: "news".to_string(),
            description: format!("{}: {}", context.label(), signal.joined()),
            applied_on: timestamp,
        };

        self.store.append_score(score_record.clone()).await;
        self.store.append_event(event_record.clone()).await;

        tracing::info!(
            "Scored {} at {} ({})",
            issuer.name,
            score,
            outlook.as_str()
        );

        Ok((score_record, event_record))
    }

    /// Re-score every issuer. Per-issuer failures are logged and skipped;
    /// the batch never aborts. Returns the number of issuers updated.
    pub async fn refresh_all(&self) -> usize {
        let issuers = self.store.list_issuers().await;
        let mut updated = 0;

        for issuer in &issuers {
            match self
                .score_issuer(issuer, AssessmentContext::MarketAnalysis)
                .await
            {
                Ok(_) => updated += 1,
                Err(e) => {
                    tracing::warn!("Error processing issuer {}: {}", issuer.id, e);
                }
            }
        }

        updated
    }
}
