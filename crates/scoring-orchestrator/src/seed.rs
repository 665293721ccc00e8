//! Demo data seeding
//!
//! Creates the fixed set of demo issuers with randomized sector/rating
//! profiles and runs an initial assessment for each. Idempotent: a store
//! that already holds issuers is left untouched.

use crate::ScoringOrchestrator;
use credit_core::{AssessmentContext, CreditError, HistoryStore, Issuer};
use feature_synthesis::demo_profile;
use uuid::Uuid;

const COMPANY_NAMES: [&str; 10] = [
    "TechCorp Industries",
    "Global Finance Ltd",
    "Retail Giants Inc",
    "Energy Solutions Co",
    "Healthcare Innovations",
    "Digital Dynamics",
    "Investment Holdings",
    "Consumer Products LLC",
    "Manufacturing Systems",
    "Data Analytics Corp",
];

impl ScoringOrchestrator {
    /// Seed the demo issuers and score each once. Returns the number of
    /// issuers created (0 when the store is already populated).
    pub async fn seed_demo_issuers(&self) -> Result<usize, CreditError> {
        if !self.store.list_issuers().await.is_empty() {
            return Ok(0);
        }

        let mut rng = rand::thread_rng();
        let mut created = 0;

        for name in COMPANY_NAMES {
            let (sector, baseline_rating) = demo_profile(&mut rng);
            let issuer = Issuer {
                id: Uuid::new_v4().to_string(),
                name: name.to_string(),
                sector,
                baseline_rating,
            };

            self.store.insert_issuer(issuer.clone()).await;
            self.score_issuer(&issuer, AssessmentContext::InitialAssessment)
                .await?;
            created += 1;
        }

        tracing::info!("Seeded {} demo issuers", created);
        Ok(created)
    }
}
