use rust_decimal::Decimal;

use crate::domain::evidence::PriceMention;

use super::content_normalizer::truncate;

pub const PRICE_TEXT_CAP: usize = 2000;
const MAX_TOKENS: usize = 400;
const MAX_PRICES: usize = 20;

/// Longer markers first so `R$` and `US$` win over `$`.
const CURRENCY_MARKERS: [(&str, &str); 11] = [
    ("US$", "USD"),
    ("R$", "BRL"),
    ("$", "USD"),
    ("€", "EUR"),
    ("£", "GBP"),
    ("¥", "JPY"),
    ("BRL", "BRL"),
    ("USD", "USD"),
    ("EUR", "EUR"),
    ("GBP", "GBP"),
    ("JPY", "JPY"),
];

/// Scans whitespace-separated tokens for currency amounts.
///
/// A bare currency marker may pair with its neighbour (`R$ 99,90`,
/// `49 EUR`). Repeated `(amount, currency)` pairs keep the first raw text.
pub fn extract_prices(text: &str) -> Vec<PriceMention> {
    let tokens: Vec<&str> = truncate(text, PRICE_TEXT_CAP)
        .split_whitespace()
        .take(MAX_TOKENS)
        .collect();

    let mut prices: Vec<PriceMention> = vec![];
    let mut i = 0;

    while i < tokens.len() && prices.len() < MAX_PRICES {
        let (parsed, consumed) = match parse_price(tokens[i]) {
            Some(price) => (Some((price, tokens[i].to_string())), 1),
            None => match tokens.get(i + 1) {
                Some(next) if is_bare_marker(tokens[i]) || is_bare_marker(next) => {
                    match parse_price(&format!("{}{}", tokens[i], next)) {
                        Some(price) => (Some((price, format!("{} {}", tokens[i], next))), 2),
                        None => (None, 1),
                    }
                }
                _ => (None, 1),
            },
        };
        i += consumed;

        if let Some(((amount, currency), raw)) = parsed {
            let seen = prices
                .iter()
                .any(|p| p.currency == currency && p.amount == amount);
            if !seen {
                prices.push(PriceMention {
                    amount,
                    currency: currency.to_string(),
                    raw,
                });
            }
        }
    }

    prices
}

/// Parses one token such as `$199.99`, `R$1.299,90`, `49€` or `120USD/mês`.
pub fn parse_price(token: &str) -> Option<(Decimal, &'static str)> {
    let token = token
        .trim_start_matches(['(', '['])
        .trim_end_matches([')', ']', '.', ',', ';', ':', '!', '?', '*']);

    CURRENCY_MARKERS.iter().find_map(|(marker, code)| {
        let amount = match token.strip_prefix(*marker) {
            Some(rest) => parse_amount(rest)?,
            None => parse_amount(strip_period(token).strip_suffix(*marker)?)?,
        };
        Some((amount, *code))
    })
}

fn is_bare_marker(token: &str) -> bool {
    CURRENCY_MARKERS.iter().any(|(marker, _)| token == *marker)
}

/// Drops a trailing billing period (`/mês`, `/mo`).
fn strip_period(token: &str) -> &str {
    token.split_once('/').map_or(token, |(number, _)| number)
}

fn parse_amount(raw: &str) -> Option<Decimal> {
    let number = strip_period(raw);
    if !number.starts_with(|c: char| c.is_ascii_digit())
        || !number.chars().all(|c| c.is_ascii_digit() || c == '.' || c == ',')
    {
        return None;
    }

    let (integer, fraction) = match (number.rfind('.'), number.rfind(',')) {
        (Some(dot), Some(comma)) => {
            let decimal = dot.max(comma);
            (&number[..decimal], Some(&number[decimal + 1..]))
        }
        (None, Some(comma)) if is_decimal_separator(number, ',', comma) => {
            (&number[..comma], Some(&number[comma + 1..]))
        }
        (Some(dot), None) if is_decimal_separator(number, '.', dot) => {
            (&number[..dot], Some(&number[dot + 1..]))
        }
        _ => (number, None),
    };

    let integer = ungroup(integer)?;
    let amount = match fraction {
        Some(f) if !f.is_empty() && f.chars().all(|c| c.is_ascii_digit()) => {
            format!("{}.{}", integer, f)
        }
        Some(_) => return None,
        None => integer,
    };

    amount.parse::<Decimal>().ok()
}

/// A lone separator marks decimals unless three digits follow a non-zero head.
fn is_decimal_separator(number: &str, separator: char, position: usize) -> bool {
    let occurrences = number.matches(separator).count();
    let fraction_digits = number.len() - position - 1;

    occurrences == 1 && (fraction_digits != 3 || (position == 1 && number.starts_with('0')))
}

/// Drops thousands separators, insisting on well-formed three-digit groups.
fn ungroup(integer: &str) -> Option<String> {
    let mut groups = integer.split(['.', ',']);
    let head = groups.next()?;
    let grouped = integer.contains(['.', ',']);
    if head.is_empty() || (grouped && (head.len() > 3 || head == "0")) {
        return None;
    }

    let mut digits = head.to_string();
    for group in groups {
        if group.len() != 3 {
            return None;
        }
        digits.push_str(group);
    }

    Some(digits)
}
