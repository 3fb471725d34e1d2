use std::{sync::Arc, time::Duration};

use crate::domain::{analysis::CompetitiveAnalysis, evidence::ExtractionEvidence};

use super::{
    content_normalizer::truncate, contact_extractor::extract_contacts,
    price_extractor::extract_prices, structured_call, TextGenerator,
};

pub const SUMMARY_TEXT_CAP: usize = 2000;
const ANALYSIS_TEMPERATURE: f32 = 0.2;

pub struct Summary {
    pub evidence: ExtractionEvidence,
    pub analysis: CompetitiveAnalysis,
    pub executive_summary: String,
}

pub struct SummarizerAgent {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl SummarizerAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        SummarizerAgent { generator, timeout }
    }

    pub async fn summarize(&self, text: &str, company_hint: Option<&str>) -> Summary {
        let text = truncate(text, SUMMARY_TEXT_CAP);
        let evidence = build_evidence(text);
        log::info!(
            "Summarizer evidence: {} phones, {} urls, {} prices",
            evidence.phones.len(),
            evidence.urls.len(),
            evidence.prices.len()
        );

        let mut analysis: CompetitiveAnalysis = structured_call(
            self.generator.as_ref(),
            &analysis_prompt(&evidence, text),
            ANALYSIS_TEMPERATURE,
            self.timeout,
        )
        .await;
        analysis.apply_company_hint(company_hint);

        let executive_summary = analysis.executive_summary();

        Summary {
            evidence,
            analysis,
            executive_summary,
        }
    }
}

pub fn build_evidence(text: &str) -> ExtractionEvidence {
    let contacts = extract_contacts(text);

    ExtractionEvidence {
        phones: contacts.phones,
        urls: contacts.urls,
        domains: contacts.domains,
        prices: extract_prices(text),
    }
}

fn analysis_prompt(evidence: &ExtractionEvidence, text: &str) -> String {
    let evidence_json =
        serde_json::to_string_pretty(evidence).unwrap_or_else(|_| "{}".to_string());

    format!(
        r#"ANÁLISE COMPETITIVA ESTRATÉGICA

Evidências extraídas deterministicamente do site (use-as como fonte para preços e contatos):
{}

Dados coletados:
{}

Responda APENAS com um objeto JSON, sem texto adicional, no formato:
{{
  "empresa": "nome/posicionamento da marca",
  "proposta_valor": "produtos, diferenciais e benefícios em uma frase",
  "fortalezas": ["pontos fortes e vantagens competitivas"],
  "ameacas": ["riscos competitivos"],
  "oportunidades": ["oportunidades e gaps de mercado"],
  "taticas": {{"precos": "preços/planos mencionados ou null", "contatos": "canais de contato ou null"}},
  "recomendacoes": ["recomendações acionáveis"]
}}

Seja objetivo e estratégico. Não invente preços ou contatos que não estejam nas evidências ou nos dados."#,
        evidence_json, text
    )
}
