use std::{sync::Arc, time::Duration};

use url::Url;

use crate::domain::{company::CompanyProfile, webpage::ScrapedPage};

use super::{
    content_normalizer::{normalize, read_page_meta, truncate},
    structured_call, FetchFailure, PageFetcher, TextGenerator,
};

pub const PAGE_TEXT_CAP: usize = 3000;
const PROFILE_TEMPERATURE: f32 = 0.2;

pub enum ScrapeOutcome {
    Fetched {
        page: ScrapedPage,
        profile: Option<CompanyProfile>,
    },
    Failed {
        failure: FetchFailure,
    },
}

pub struct ScraperAgent {
    fetcher: Arc<dyn PageFetcher>,
    generator: Arc<dyn TextGenerator>,
    fetch_timeout: Duration,
    generation_timeout: Duration,
    extract_profile: bool,
}

impl ScraperAgent {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        generator: Arc<dyn TextGenerator>,
        fetch_timeout: Duration,
        generation_timeout: Duration,
        extract_profile: bool,
    ) -> Self {
        ScraperAgent {
            fetcher,
            generator,
            fetch_timeout,
            generation_timeout,
            extract_profile,
        }
    }

    pub async fn scrape(&self, url: &str) -> ScrapeOutcome {
        let page = match self.fetch_page(url).await {
            Ok(page) => page,
            Err(failure) => {
                log::error!("Scraper could not collect {}: {}", url, failure);
                return ScrapeOutcome::Failed { failure };
            }
        };
        log::debug!("Scraper normalized {} to {} chars", url, page.char_count());

        let profile = match self.extract_profile {
            true => Some(self.company_profile(&page).await),
            false => None,
        };

        ScrapeOutcome::Fetched { page, profile }
    }

    async fn fetch_page(&self, url: &str) -> Result<ScrapedPage, FetchFailure> {
        let parsed = Url::parse(url.trim()).map_err(|e| FetchFailure::InvalidUrl(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(FetchFailure::UnsupportedScheme(parsed.scheme().to_string()));
        }

        let fetched = self.fetcher.fetch(&parsed, self.fetch_timeout).await?;
        if fetched.body.trim().is_empty() {
            return Err(FetchFailure::Empty(parsed.to_string()));
        }
        log::debug!("Fetched {} chars from {}", fetched.body.len(), parsed);

        let meta = read_page_meta(&fetched.body);
        let page = ScrapedPage {
            url: url.to_string(),
            title: fetched.title.or(meta.title),
            description: meta.description,
            headline: meta.headline,
            keywords: meta.keywords,
            text: normalize(&fetched.body, PAGE_TEXT_CAP),
        };

        // Markup with no readable text and no metadata is as empty as a blank body.
        if page.text.is_empty() && page.title.is_none() && page.description.is_none() {
            return Err(FetchFailure::Empty(parsed.to_string()));
        }

        Ok(page)
    }

    async fn company_profile(&self, page: &ScrapedPage) -> CompanyProfile {
        let prompt = profile_prompt(&page.prompt_context());
        structured_call(
            self.generator.as_ref(),
            &prompt,
            PROFILE_TEMPERATURE,
            self.generation_timeout,
        )
        .await
    }
}

fn profile_prompt(context: &str) -> String {
    format!(
        r#"Você é um especialista em coleta de dados de concorrentes.

Dados coletados do site:
{}

Extraia as informações comerciais relevantes e responda APENAS com um objeto JSON, sem texto adicional, no formato:
{{
  "name": "nome da empresa",
  "offerings": ["produtos ou serviços"],
  "pricing": "preços ou planos mencionados, ou null",
  "segments": ["segmentos de clientes atendidos"],
  "differentiators": ["diferenciais declarados"],
  "contact": "telefone, e-mail ou canal de contato, ou null",
  "links": ["URLs relevantes"]
}}

Use listas vazias quando não houver informação. Não invente dados."#,
        truncate(context, PAGE_TEXT_CAP)
    )
}
