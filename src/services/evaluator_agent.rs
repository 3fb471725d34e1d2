use std::{sync::Arc, time::Duration};

use crate::domain::evaluation::EvaluationResult;

use super::{content_normalizer::truncate, structured_call, TextGenerator};

pub const EVALUATION_TEXT_CAP: usize = 600;
const EVALUATION_TEMPERATURE: f32 = 0.1;

pub struct EvaluatorAgent {
    generator: Arc<dyn TextGenerator>,
    timeout: Duration,
}

impl EvaluatorAgent {
    pub fn new(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        EvaluatorAgent { generator, timeout }
    }

    pub async fn evaluate(&self, summary: &str) -> EvaluationResult {
        structured_call(
            self.generator.as_ref(),
            &evaluation_prompt(truncate(summary, EVALUATION_TEXT_CAP)),
            EVALUATION_TEMPERATURE,
            self.timeout,
        )
        .await
    }
}

fn evaluation_prompt(summary: &str) -> String {
    format!(
        r#"Validação da análise competitiva:

{}

Avalie a qualidade da análise e responda APENAS com um objeto JSON, sem texto adicional, no formato:
{{
  "completo": true ou false,
  "relevante": true ou false,
  "acionavel": true ou false,
  "pontos_fortes": ["pontos fortes da análise"],
  "melhorias": ["sugestões de melhoria"]
}}

Seja objetivo e construtivo."#,
        summary
    )
}
