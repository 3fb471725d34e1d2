use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::{deserialize_bool_from_anything, deserialize_default_from_null};

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvaluationResult {
    #[serde(rename = "completo", deserialize_with = "deserialize_bool_from_anything")]
    pub complete: bool,
    #[serde(rename = "relevante", deserialize_with = "deserialize_bool_from_anything")]
    pub relevant: bool,
    #[serde(rename = "acionavel", deserialize_with = "deserialize_bool_from_anything")]
    pub actionable: bool,
    #[serde(
        rename = "pontos_fortes",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub strengths: Vec<String>,
    #[serde(rename = "melhorias", deserialize_with = "deserialize_default_from_null")]
    pub improvements: Vec<String>,
}
