use std::{sync::Arc, time::Duration};

use chrono::Utc;
use uuid::Uuid;

use crate::{
    configuration::Settings,
    domain::report::{AnalysisReport, AnalysisRequest, AnalysisSuccess, ScrapeSummary},
};

use super::{
    DeepSeekClient, DirectFetcher, EvaluatorAgent, PageFetcher, ScrapeOutcome, ScraperAgent,
    ScrapingAntClient, SummarizerAgent, TextGenerator,
};

pub const AGENT_NAMES: [&str; 3] = ["scraper", "summarizer", "evaluator"];

#[derive(Debug, Clone)]
pub struct PipelineSettings {
    pub fetch_timeout: Duration,
    pub generation_timeout: Duration,
    pub extract_profile: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        PipelineSettings {
            fetch_timeout: Duration::from_secs(25),
            generation_timeout: Duration::from_secs(60),
            extract_profile: true,
        }
    }
}

impl From<&Settings> for PipelineSettings {
    fn from(settings: &Settings) -> Self {
        PipelineSettings {
            fetch_timeout: settings.scraping.timeout(),
            generation_timeout: settings.generation.timeout(),
            extract_profile: settings.scraping.extract_profile,
        }
    }
}

/// Scrape, summarize, evaluate. Only a failed scrape ends a run early.
pub struct Pipeline {
    scraper: ScraperAgent,
    summarizer: SummarizerAgent,
    evaluator: EvaluatorAgent,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn TextGenerator>,
        settings: PipelineSettings,
    ) -> Self {
        Pipeline {
            scraper: ScraperAgent::new(
                fetcher,
                generator.clone(),
                settings.fetch_timeout,
                settings.generation_timeout,
                settings.extract_profile,
            ),
            summarizer: SummarizerAgent::new(generator.clone(), settings.generation_timeout),
            evaluator: EvaluatorAgent::new(generator, settings.generation_timeout),
        }
    }

    /// Wires the production backends described by `settings`.
    pub fn from_settings(settings: &Settings) -> Self {
        let fetcher: Arc<dyn PageFetcher> = match settings.api_keys.scrapingant.trim().is_empty() {
            true => {
                log::warn!("No ScrapingAnt API key configured, fetching pages directly");
                Arc::new(DirectFetcher::new())
            }
            false => Arc::new(ScrapingAntClient::new(
                settings.api_keys.scrapingant.clone(),
                &settings.scraping,
            )),
        };
        if settings.api_keys.deepseek.trim().is_empty() {
            log::warn!("No DeepSeek API key configured, every analysis will hold defaults");
        }
        let generator = Arc::new(DeepSeekClient::new(
            settings.api_keys.deepseek.clone(),
            &settings.generation,
        ));

        Pipeline::new(fetcher, generator, settings.into())
    }

    pub async fn run(&self, request: &AnalysisRequest) -> AnalysisReport {
        let request_id = Uuid::new_v4();
        let url = request.url.as_str();
        let company_hint = request.company_name.as_deref();
        log::info!(
            "[{}] Starting analysis of {} for company {}",
            request_id,
            url,
            company_hint.unwrap_or("<not informed>")
        );

        log::info!("[{}] Scraper stage started", request_id);
        let (page, profile) = match self.scraper.scrape(url).await {
            ScrapeOutcome::Fetched { page, profile } => (page, profile),
            ScrapeOutcome::Failed { failure } => {
                log::error!("[{}] Analysis aborted: {}", request_id, failure);
                return AnalysisReport::failure(url, failure.to_string());
            }
        };

        log::info!("[{}] Summarizer stage started", request_id);
        let summary = self
            .summarizer
            .summarize(&page.prompt_context(), company_hint)
            .await;

        log::info!("[{}] Evaluator stage started", request_id);
        let validation = self.evaluator.evaluate(&summary.executive_summary).await;

        log::info!("[{}] Analysis of {} finished", request_id, url);

        AnalysisReport::Success(AnalysisSuccess {
            success: true,
            url: url.to_string(),
            scrape: ScrapeSummary {
                char_count: page.char_count(),
                title: page.title,
            },
            data: profile,
            analysis: summary.analysis,
            summary: summary.executive_summary,
            validation,
            timestamp: Utc::now(),
        })
    }
}
