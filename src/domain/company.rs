use serde::{Deserialize, Serialize};
use serde_aux::field_attributes::deserialize_default_from_null;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub name: String,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub offerings: Vec<String>,
    pub pricing: Option<String>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub segments: Vec<String>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub differentiators: Vec<String>,
    pub contact: Option<String>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub links: Vec<String>,
}
