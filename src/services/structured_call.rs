use std::{any::type_name, time::Duration};

use anyhow::{anyhow, Context};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::TextGenerator;

/// Asks the generator for a JSON object shaped like `T`.
///
/// Every failure along the way (backend error, timeout, fenced garbage,
/// invalid JSON, a value of the wrong shape) is logged and replaced by
/// `T::default()`. Callers always get a fully populated record.
pub async fn structured_call<T>(
    generator: &dyn TextGenerator,
    prompt: &str,
    temperature: f32,
    timeout: Duration,
) -> T
where
    T: DeserializeOwned + Default,
{
    match try_structured_call(generator, prompt, temperature, timeout).await {
        Ok(value) => value,
        Err(e) => {
            log::warn!(
                "Structured call for {} degraded to defaults: {:#}",
                short_type_name::<T>(),
                e
            );
            T::default()
        }
    }
}

async fn try_structured_call<T: DeserializeOwned>(
    generator: &dyn TextGenerator,
    prompt: &str,
    temperature: f32,
    timeout: Duration,
) -> anyhow::Result<T> {
    let raw = tokio::time::timeout(timeout, generator.generate(prompt, temperature, timeout))
        .await
        .map_err(|_| anyhow!("generation timed out after {:?}", timeout))?
        .context("generation backend failed")?;
    log::debug!("Structured call raw response: {} chars", raw.chars().count());

    parse_structured(&raw)
}

/// Parses a model reply into `T`, tolerating one pair of markdown fences.
pub fn parse_structured<T: DeserializeOwned>(raw: &str) -> anyhow::Result<T> {
    let body = strip_code_fences(raw);
    let value: Value = serde_json::from_str(body).context("response is not valid JSON")?;

    match value {
        Value::Object(_) => serde_json::from_value(value).context("response does not fit schema"),
        other => Err(anyhow!("expected a JSON object, got {}", json_kind(&other))),
    }
}

pub fn strip_code_fences(raw: &str) -> &str {
    let s = raw.trim();
    let s = s
        .strip_prefix("```json")
        .or_else(|| s.strip_prefix("```"))
        .unwrap_or(s);
    let s = s.strip_suffix("```").unwrap_or(s);

    s.trim()
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn short_type_name<T>() -> &'static str {
    let full = type_name::<T>();
    full.rsplit("::").next().unwrap_or(full)
}
