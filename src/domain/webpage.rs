use serde::Serialize;

/// Metadata read from the page markup before it is flattened to text.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct PageMeta {
    pub title: Option<String>,
    pub description: Option<String>,
    pub headline: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScrapedPage {
    pub url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub headline: Option<String>,
    pub keywords: Option<String>,
    pub text: String,
}

impl ScrapedPage {
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Header lines plus body text, the shape every prompt embeds.
    pub fn prompt_context(&self) -> String {
        let mut lines = vec![
            format!("Título: {}", self.title.as_deref().unwrap_or("N/A")),
            format!("Descrição: {}", self.description.as_deref().unwrap_or("N/A")),
        ];
        if let Some(headline) = &self.headline {
            lines.push(format!("Headline Principal: {}", headline));
        }
        if let Some(keywords) = &self.keywords {
            lines.push(format!("Palavras-chave: {}", keywords));
        }
        lines.push(String::new());
        lines.push("Conteúdo Principal:".to_string());
        lines.push(self.text.clone());

        lines.join("\n")
    }
}
