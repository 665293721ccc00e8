use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Industry sector an issuer operates in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sector {
    Finance,
    Tech,
    Retail,
    Energy,
    Healthcare,
}

impl Sector {
    pub const ALL: [Sector; 5] = [
        Sector::Finance,
        Sector::Tech,
        Sector::Retail,
        Sector::Energy,
        Sector::Healthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Sector::Finance => "Finance",
            Sector::Tech => "Tech",
            Sector::Retail => "Retail",
            Sector::Energy => "Energy",
            Sector::Healthcare => "Healthcare",
        }
    }
}

/// Agency credit-rating grade, ordered best (AAA) to worst (BB-)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BaselineRating {
    #[serde(rename = "AAA")]
    Aaa,
    #[serde(rename = "AA+")]
    AaPlus,
    #[serde(rename = "AA")]
    Aa,
    #[serde(rename = "AA-")]
    AaMinus,
    #[serde(rename = "A+")]
    APlus,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A-")]
    AMinus,
    #[serde(rename = "BBB+")]
    BbbPlus,
    #[serde(rename = "BBB")]
    Bbb,
    #[serde(rename = "BBB-")]
    BbbMinus,
    #[serde(rename = "BB+")]
    BbPlus,
    #[serde(rename = "BB")]
    Bb,
    #[serde(rename = "BB-")]
    BbMinus,
}

impl BaselineRating {
    pub const ALL: [BaselineRating; 13] = [
        BaselineRating::Aaa,
        BaselineRating::AaPlus,
        BaselineRating::Aa,
        BaselineRating::AaMinus,
        BaselineRating::APlus,
        BaselineRating::A,
        BaselineRating::AMinus,
        BaselineRating::BbbPlus,
        BaselineRating::Bbb,
        BaselineRating::BbbMinus,
        BaselineRating::BbPlus,
        BaselineRating::Bb,
        BaselineRating::BbMinus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BaselineRating::Aaa => "AAA",
            BaselineRating::AaPlus => "AA+",
            BaselineRating::Aa => "AA",
            BaselineRating::AaMinus => "AA-",
            BaselineRating::APlus => "A+",
            BaselineRating::A => "A",
            BaselineRating::AMinus => "A-",
            BaselineRating::BbbPlus => "BBB+",
            BaselineRating::Bbb => "BBB",
            BaselineRating::BbbMinus => "BBB-",
            BaselineRating::BbPlus => "BB+",
            BaselineRating::Bb => "BB",
            BaselineRating::BbMinus => "BB-",
        }
    }
}

/// The entity being scored. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issuer {
    pub id: String,
    pub name: String,
    pub sector: Sector,
    pub baseline_rating: BaselineRating,
}

/// Synthetic financial features for one scoring run
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FeatureVector {
    pub profit_margin: f64,
    pub debt_ratio: f64,
    pub growth: f64,
}

impl FeatureVector {
    /// Display labels, in declaration order
    pub const LABELS: [&'static str; 3] = ["Profit Margin", "Debt Ratio", "Growth"];

    /// Feature values, in declaration order
    pub fn values(&self) -> [f64; 3] {
        [self.profit_margin, self.debt_ratio, self.growth]
    }
}

/// News keyword from the fixed signal vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsKeyword {
    Profit,
    Expansion,
    Fraud,
    Merger,
    Loss,
    Innovation,
    Bankruptcy,
    Acquisition,
}

impl NewsKeyword {
    pub const ALL: [NewsKeyword; 8] = [
        NewsKeyword::Profit,
        NewsKeyword::Expansion,
        NewsKeyword::Fraud,
        NewsKeyword::Merger,
        NewsKeyword::Loss,
        NewsKeyword::Innovation,
        NewsKeyword::Bankruptcy,
        NewsKeyword::Acquisition,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            NewsKeyword::Profit => "profit",
            NewsKeyword::Expansion => "expansion",
            NewsKeyword::Fraud => "fraud",
            NewsKeyword::Merger => "merger",
            NewsKeyword::Loss => "loss",
            NewsKeyword::Innovation => "innovation",
            NewsKeyword::Bankruptcy => "bankruptcy",
            NewsKeyword::Acquisition => "acquisition",
        }
    }
}

/// News-style signal for one scoring run: 1-3 distinct keywords
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsSignal {
    pub keywords: Vec<NewsKeyword>,
}

impl NewsSignal {
    /// Keywords joined for event descriptions, e.g. "profit, merger"
    pub fn joined(&self) -> String {
        self.keywords
            .iter()
            .map(|k| k.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Qualitative outlook band derived from the numeric score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outlook {
    Safe,
    Caution,
    Risk,
}

impl Outlook {
    /// Classify a clamped score into its outlook band
    pub fn from_score(score: i32) -> Self {
        match score {
            s if s >= 70 => Outlook::Safe,
            s if s >= 40 => Outlook::Caution,
            _ => Outlook::Risk,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Outlook::Safe => "Safe",
            Outlook::Caution => "Caution",
            Outlook::Risk => "Risk",
        }
    }
}

/// One scoring result for an issuer. Immutable once appended.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRecord {
    pub issuer_id: String,
    pub score: i32,
    pub shap_values: Vec<String>,
    pub outlook: Outlook,
    pub timestamp: DateTime<Utc>,
}

/// A logged description of the signal that produced a score
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventRecord {
    pub issuer_id: String,
    pub event_type: String,
    pub description: String,
    pub applied_on: DateTime<Utc>,
}

/// Context label distinguishing the seeding pass from refresh runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentContext {
    InitialAssessment,
    MarketAnalysis,
}

impl AssessmentContext {
    pub fn label(&self) -> &'static str {
        match self {
            AssessmentContext::InitialAssessment => "Initial assessment",
            AssessmentContext::MarketAnalysis => "Market analysis",
        }
    }
}

/// Record counts for the health endpoint
#[derive(Debug, Clone, Copy, Serialize)]
pub struct StoreCounts {
    pub issuers: usize,
    pub scores: usize,
    pub events: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outlook_bands_partition_score_range() {
        assert_eq!(Outlook::from_score(0), Outlook::Risk);
        assert_eq!(Outlook::from_score(39), Outlook::Risk);
        assert_eq!(Outlook::from_score(40), Outlook::Caution);
        assert_eq!(Outlook::from_score(69), Outlook::Caution);
        assert_eq!(Outlook::from_score(70), Outlook::Safe);
        assert_eq!(Outlook::from_score(100), Outlook::Safe);
    }

    #[test]
    fn test_outlook_total_over_full_range() {
        for score in 0..=100 {
            // Every score maps to exactly one band
            let outlook = Outlook::from_score(score);
            match outlook {
                Outlook::Safe => assert!(score >= 70),
                Outlook::Caution => assert!((40..70).contains(&score)),
                Outlook::Risk => assert!(score < 40),
            }
        }
    }

    #[test]
    fn test_rating_order_best_to_worst() {
        assert!(BaselineRating::Aaa < BaselineRating::Bb);
        assert!(BaselineRating::APlus < BaselineRating::BbbMinus);
        assert_eq!(BaselineRating::BbPlus.as_str(), "BB+");
    }

    #[test]
    fn test_rating_serializes_as_agency_grade() {
        let json = serde_json::to_string(&BaselineRating::AaMinus).unwrap();
        assert_eq!(json, "\"AA-\"");
    }

    #[test]
    fn test_news_signal_joined() {
        let signal = NewsSignal {
            keywords: vec![NewsKeyword::Profit, NewsKeyword::Merger],
        };
        assert_eq!(signal.joined(), "profit, merger");
    }

    #[test]
    fn test_keyword_serializes_lowercase() {
        let json = serde_json::to_string(&NewsKeyword::Bankruptcy).unwrap();
        assert_eq!(json, "\"bankruptcy\"");
    }
}
