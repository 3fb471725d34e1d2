use std::sync::LazyLock;

use itertools::Itertools;
use regex::Regex;
use url::Url;

use super::content_normalizer::truncate;

pub const CONTACT_TEXT_CAP: usize = 2000;
const MAX_PHONES: usize = 10;
const MAX_URLS: usize = 20;

/// Area codes (DDD) assigned by Anatel.
const BRAZIL_AREA_CODES: [u8; 67] = [
    11, 12, 13, 14, 15, 16, 17, 18, 19, 21, 22, 24, 27, 28, 31, 32, 33, 34, 35, 37, 38, 41, 42, 43,
    44, 45, 46, 47, 48, 49, 51, 53, 54, 55, 61, 62, 63, 64, 65, 66, 67, 68, 69, 71, 73, 74, 75, 77,
    79, 81, 82, 83, 84, 85, 86, 87, 88, 89, 91, 92, 93, 94, 95, 96, 97, 98, 99,
];

static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:\+?55[\s.-]?)?\(?(\d{2})\)?[\s.-]?((?:9[\s.-]?)?\d{4})[\s.-]?(\d{4})").unwrap()
});

static URL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"https?://[^\s<>"'()\[\]{}]+"#).unwrap());

#[derive(Debug, Default, PartialEq)]
pub struct Contacts {
    pub phones: Vec<String>,
    pub urls: Vec<String>,
    pub domains: Vec<String>,
}

pub fn extract_contacts(text: &str) -> Contacts {
    let text = truncate(text, CONTACT_TEXT_CAP);
    let (urls, domains) = extract_urls(text);

    Contacts {
        phones: extract_phones(text),
        urls,
        domains,
    }
}

/// Brazilian phone numbers in `+55 AA NNNNN-NNNN` form, first-seen order.
pub fn extract_phones(text: &str) -> Vec<String> {
    PHONE_RE
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            if touches_digit(text, whole.start(), whole.end()) {
                return None;
            }
            canonical_phone(caps.get(1)?.as_str(), caps.get(2)?.as_str(), caps.get(3)?.as_str())
        })
        .unique()
        .take(MAX_PHONES)
        .collect()
}

/// Absolute http(s) URLs and their hosts (lowercased, without `www.`).
pub fn extract_urls(text: &str) -> (Vec<String>, Vec<String>) {
    let parsed: Vec<(String, String)> = URL_RE
        .find_iter(text)
        .filter_map(|m| {
            let raw = m
                .as_str()
                .trim_end_matches(['.', ',', ';', ':', '!', '?']);
            let domain = domain_of(raw)?;
            Some((raw.to_string(), domain))
        })
        .unique_by(|(raw, _)| raw.clone())
        .collect();

    let domains = parsed
        .iter()
        .map(|(_, domain)| domain.clone())
        .unique()
        .take(MAX_URLS)
        .collect();
    let urls = parsed
        .into_iter()
        .map(|(raw, _)| raw)
        .take(MAX_URLS)
        .collect();

    (urls, domains)
}

fn domain_of(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") {
        return None;
    }
    let host = url.host_str().filter(|h| !h.is_empty())?.to_lowercase();

    match host.strip_prefix("www.") {
        Some(h) => Some(h.to_string()),
        None => Some(host),
    }
}

fn canonical_phone(area: &str, head: &str, tail: &str) -> Option<String> {
    let area_code: u8 = area.parse().ok()?;
    if !BRAZIL_AREA_CODES.contains(&area_code) {
        return None;
    }

    let head: String = head.chars().filter(|c| c.is_ascii_digit()).collect();
    let first = head.chars().next()?;
    let valid_subscriber = match head.len() {
        5 => first == '9',
        4 => ('2'..='5').contains(&first),
        _ => false,
    };

    valid_subscriber.then(|| format!("+55 {} {}-{}", area, head, tail))
}

fn touches_digit(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();

    before.is_some_and(|c| c.is_ascii_digit()) || after.is_some_and(|c| c.is_ascii_digit())
}
