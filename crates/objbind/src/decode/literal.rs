//! Strict tuple-literal parser.
//!
//! Accepts a parenthesized, comma-separated list of scalar literals
//! (integers, floats, quoted strings, `true`/`false`) with an optional
//! trailing comma. No nesting, no expressions. Anything else is rejected;
//! the input is never evaluated.

use crate::error::DecodeError;
use crate::value::Primitive;

pub fn parse_tuple_literal(input: &str) -> Result<Vec<Primitive>, DecodeError> {
    let err = || DecodeError::UnparsableLiteral {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .ok_or_else(err)?;

    let mut raw_items = split_top_level(inner).ok_or_else(err)?;
    // Trailing comma yields one empty trailing slot.
    if raw_items.last().is_some_and(|item| item.trim().is_empty()) {
        raw_items.pop();
    }
    raw_items
        .iter()
        .map(|item| parse_item(item.trim()).ok_or_else(err))
        .collect()
}

/// Splits on commas outside quotes. Returns `None` on unterminated quotes.
fn split_top_level(inner: &str) -> Option<Vec<String>> {
    if inner.trim().is_empty() {
        return Some(Vec::new());
    }
    let mut items = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut escaped = false;
    for ch in inner.chars() {
        match quote {
            Some(q) => {
                current.push(ch);
                if escaped {
                    escaped = false;
                } else if ch == '\\' {
                    escaped = true;
                } else if ch == q {
                    quote = None;
                }
            }
            None => {
                if ch == ',' {
                    items.push(std::mem::take(&mut current));
                } else {
                    if ch == '\'' || ch == '"' {
                        quote = Some(ch);
                    }
                    current.push(ch);
                }
            }
        }
    }
    if quote.is_some() {
        return None;
    }
    items.push(current);
    Some(items)
}

fn parse_item(item: &str) -> Option<Primitive> {
    if item.is_empty() {
        return None;
    }
    if let Some(first) = item.chars().next() {
        if first == '\'' || first == '"' {
            return parse_quoted(item, first);
        }
    }
    match item {
        "true" => return Some(Primitive::Bool(true)),
        "false" => return Some(Primitive::Bool(false)),
        _ => {}
    }
    // Numeric literals only; reject alphabetic forms f64 would accept (inf, nan).
    if !item
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '+' || c == '-' || c == '.')
    {
        return None;
    }
    if let Ok(i) = item.parse::<i64>() {
        return Some(Primitive::Int(i));
    }
    if item.chars().any(|c| c.is_alphabetic() && c != 'e' && c != 'E') {
        return None;
    }
    item.parse::<f64>().ok().map(Primitive::Float)
}

fn parse_quoted(item: &str, quote: char) -> Option<Primitive> {
    let body = item.strip_prefix(quote)?.strip_suffix(quote)?;
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(ch) = chars.next() {
        if ch == quote {
            // Closing quote mid-item means trailing garbage survived the strip.
            return None;
        }
        if ch == '\\' {
            match chars.next()? {
                '\\' => out.push('\\'),
                '\'' => out.push('\''),
                '"' => out.push('"'),
                _ => return None,
            }
        } else {
            out.push(ch);
        }
    }
    Some(Primitive::Str(out))
}
