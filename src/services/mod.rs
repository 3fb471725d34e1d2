pub mod contact_extractor;
pub mod content_normalizer;
pub mod evaluator_agent;
pub mod llm_client;
pub mod page_fetcher;
pub mod pipeline;
pub mod price_extractor;
pub mod scraper_agent;
pub mod structured_call;
pub mod summarizer_agent;

#[cfg(test)]
pub(crate) mod testing;

pub use evaluator_agent::*;
pub use llm_client::*;
pub use page_fetcher::*;
pub use pipeline::*;
pub use scraper_agent::*;
pub use structured_call::*;
pub use summarizer_agent::*;
