use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    analysis::CompetitiveAnalysis, company::CompanyProfile, evaluation::EvaluationResult,
};

#[derive(Debug, Deserialize)]
pub struct AnalysisRequest {
    pub url: String,
    pub company_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapeSummary {
    pub title: Option<String>,
    pub char_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisSuccess {
    pub success: bool,
    pub url: String,
    pub scrape: ScrapeSummary,
    pub data: Option<CompanyProfile>,
    pub analysis: CompetitiveAnalysis,
    pub summary: String,
    pub validation: EvaluationResult,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisFailure {
    pub success: bool,
    pub url: String,
    pub error: String,
    pub timestamp: DateTime<Utc>,
}

/// What one pipeline invocation hands back to its caller.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum AnalysisReport {
    Success(AnalysisSuccess),
    Failure(AnalysisFailure),
}

impl AnalysisReport {
    pub fn failure(url: &str, error: String) -> Self {
        AnalysisReport::Failure(AnalysisFailure {
            success: false,
            url: url.to_string(),
            error,
            timestamp: Utc::now(),
        })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AnalysisReport::Success(_))
    }
}
