use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use scraper::{node::Node, ElementRef, Html, Selector};

use crate::domain::webpage::PageMeta;

const MAX_SENTENCES: usize = 10;
const MIN_SENTENCE_CHARS: usize = 20;

const SKIPPED_ELEMENTS: [&str; 7] = [
    "head", "script", "style", "noscript", "nav", "header", "footer",
];

const BUSINESS_KEYWORDS: [&str; 24] = [
    "empresa",
    "produto",
    "serviço",
    "solução",
    "tecnologia",
    "inovação",
    "crescimento",
    "resultado",
    "eficiência",
    "produtividade",
    "cliente",
    "mercado",
    "competitivo",
    "estratégia",
    "negócio",
    "company",
    "product",
    "service",
    "solution",
    "technology",
    "customer",
    "market",
    "strategy",
    "business",
];

static BOILERPLATE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)\b(?:pular para o conteúdo|pular para navegação|pular para rodapé|skip to content|skip to navigation|accept cookies|aceitar cookies|menu|navegação|início|sobre|contato|login|cadastro|buscar|pesquisar|cookies?|privacidade)\b",
    )
    .unwrap()
});

static SENTENCE_END_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.!?](?:\s+|$)").unwrap());

static TITLE_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static H1_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("h1").unwrap());
static META_SELECTOR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("meta").unwrap());

/// Flattens fetched markup into at most `max_chars` characters of prose.
///
/// Page chrome (head, scripts, styles, navigation, header, footer) is dropped,
/// boilerplate phrases are removed, and up to ten sentences are kept, those
/// mentioning business terms first, then the earliest remaining ones. Kept
/// sentences stay in document order.
pub fn normalize(raw: &str, max_chars: usize) -> String {
    let text = visible_text(raw);
    let text = BOILERPLATE_RE.replace_all(&text, " ");
    let text = collapse_whitespace(&text);

    let sentences: Vec<&str> = SENTENCE_END_RE
        .split(&text)
        .map(str::trim)
        .filter(|s| s.chars().count() > MIN_SENTENCE_CHARS)
        .collect();

    let mut keep = vec![false; sentences.len()];
    sentences
        .iter()
        .positions(|s| is_business_relevant(s))
        .take(MAX_SENTENCES)
        .for_each(|i| keep[i] = true);

    let remaining = MAX_SENTENCES - keep.iter().filter(|k| **k).count();
    (0..sentences.len())
        .filter(|i| !keep[*i])
        .take(remaining)
        .collect_vec()
        .into_iter()
        .for_each(|i| keep[i] = true);

    let selected = sentences
        .iter()
        .zip(keep)
        .filter_map(|(s, k)| k.then_some(*s))
        .join(". ");

    truncate(&selected, max_chars).to_string()
}

/// Cuts `text` to at most `max_chars` characters on a char boundary.
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub fn read_page_meta(raw: &str) -> PageMeta {
    let document = Html::parse_document(raw);

    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .and_then(element_text)
        .or_else(|| meta_content(&document, "property", "og:title"));
    let description = meta_content(&document, "name", "description")
        .or_else(|| meta_content(&document, "property", "og:description"));
    let headline = document.select(&H1_SELECTOR).find_map(element_text);
    let keywords = meta_content(&document, "name", "keywords");

    PageMeta {
        title,
        description,
        headline,
        keywords,
    }
}

fn visible_text(raw: &str) -> String {
    let document = Html::parse_document(raw);
    let mut text = String::with_capacity(raw.len() / 2);
    let mut stack = vec![document.tree.root()];

    while let Some(node) = stack.pop() {
        match node.value() {
            Node::Text(t) => {
                text.push_str(t);
                text.push(' ');
            }
            Node::Element(e) if SKIPPED_ELEMENTS.contains(&e.name()) => {}
            Node::Element(_) | Node::Document | Node::Fragment => {
                let children: Vec<_> = node.children().collect();
                stack.extend(children.into_iter().rev());
            }
            _ => {}
        }
    }

    text
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().join(" ")
}

fn is_business_relevant(sentence: &str) -> bool {
    let sentence = sentence.to_lowercase();
    BUSINESS_KEYWORDS.iter().any(|k| sentence.contains(k))
}

fn element_text(element: ElementRef) -> Option<String> {
    let text = collapse_whitespace(&element.text().collect::<String>());
    (!text.is_empty()).then_some(text)
}

fn meta_content(document: &Html, attr: &str, value: &str) -> Option<String> {
    document
        .select(&META_SELECTOR)
        .filter(|m| {
            m.value()
                .attr(attr)
                .is_some_and(|v| v.eq_ignore_ascii_case(value))
        })
        .find_map(|m| m.value().attr("content"))
        .map(collapse_whitespace)
        .filter(|c| !c.is_empty())
}
