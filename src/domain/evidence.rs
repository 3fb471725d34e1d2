use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct ExtractionEvidence {
    pub phones: Vec<String>,
    pub urls: Vec<String>,
    pub domains: Vec<String>,
    pub prices: Vec<PriceMention>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceMention {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub currency: String,
    pub raw: String,
}
