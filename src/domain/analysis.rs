use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

const SUMMARY_STRENGTHS: usize = 3;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompetitiveAnalysis {
    #[serde(rename = "empresa", deserialize_with = "deserialize_default_from_null")]
    pub company: String,
    #[serde(
        rename = "proposta_valor",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub value_proposition: String,
    #[serde(rename = "fortalezas", deserialize_with = "deserialize_default_from_null")]
    pub strengths: Vec<String>,
    #[serde(rename = "ameacas", deserialize_with = "deserialize_default_from_null")]
    pub threats: Vec<String>,
    #[serde(
        rename = "oportunidades",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub opportunities: Vec<String>,
    #[serde(rename = "taticas", deserialize_with = "deserialize_default_from_null")]
    pub tactics: Tactics,
    #[serde(
        rename = "recomendacoes",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub recommendations: Vec<String>,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tactics {
    #[serde(rename = "precos")]
    pub prices: Option<String>,
    #[serde(rename = "contatos")]
    pub contacts: Option<String>,
}

impl CompetitiveAnalysis {
    /// Fills `empresa` from the caller's hint only when the model left it blank.
    pub fn apply_company_hint(&mut self, hint: Option<&str>) {
        if let Some(hint) = hint.map(str::trim).filter(|h| !h.is_empty()) {
            if self.company.trim().is_empty() {
                self.company = hint.to_string();
            }
        }
    }

    pub fn executive_summary(&self) -> String {
        let company = match self.company.trim() {
            "" => "Não identificada",
            name => name,
        };
        let value_proposition = match self.value_proposition.trim() {
            "" => "Não identificada",
            proposition => proposition,
        };

        let mut summary = format!(
            "Empresa: {}\nProposta de valor: {}\nPontos fortes:",
            company, value_proposition
        );

        let strengths: Vec<&String> = self
            .strengths
            .iter()
            .filter(|s| !s.trim().is_empty())
            .take(SUMMARY_STRENGTHS)
            .collect();

        match strengths.is_empty() {
            true => summary.push_str("\n- Nenhum identificado"),
            false => strengths
                .iter()
                .for_each(|s| summary.push_str(&format!("\n- {}", s.trim()))),
        }

        summary
    }
}
