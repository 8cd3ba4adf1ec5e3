//! Filter query parser.
//!
//! Parses a filter expression into a [`SearchFilter`]. The filter is purely
//! conjunctive, so the grammar is a flat list of field constraints:
//!
//! ```text
//! filter_expr := field_filter (AND? field_filter)*
//! field_filter := field_name:value | field_name:"quoted value"
//! field_name := name | path | ext | tag (case-insensitive)
//! ```
//!
//! # Examples
//!
//! ```rust
//! # use explore_index::filters::parser::parse_filter;
//! let filter = parse_filter("ext:jpg tag:cat").unwrap();
//! assert_eq!(filter.ext, "jpg");
//! assert_eq!(filter.tag, "cat");
//!
//! // Quoted values for spaces, optional AND keyword
//! let filter = parse_filter("path:\"/summer 2024\" AND name:IMG_").unwrap();
//! assert_eq!(filter.path, "/summer 2024");
//! ```
//!
//! # Validation
//!
//! - `OR` is rejected: there is no way to express a disjunction
//! - each field may appear once
//! - empty field names or values are rejected

use std::iter::Peekable;
use std::str::Chars;

use anyhow::{Context, Result, anyhow};

use super::ast::{FilterField, SearchFilter};

/// Token types produced by the tokenizer
#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    /// field:value or field:"quoted value"
    FieldValue { field: String, value: String },
    /// AND keyword
    And,
    /// OR keyword
    Or,
}

/// Tokenize filter input string into tokens
fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            chars.next();
            continue;
        }

        let word = read_word(&mut chars);

        match word.to_uppercase().as_str() {
            "AND" => tokens.push(Token::And),
            "OR" => tokens.push(Token::Or),
            _ => {
                let Some(colon_pos) = word.find(':') else {
                    return Err(anyhow!("Invalid token: '{}' (expected field:value)", word));
                };

                let field = word[..colon_pos].to_string();
                let mut value = word[colon_pos + 1..].to_string();
                if value.starts_with('"') {
                    value = read_quoted_value(&mut chars, &value)?;
                }

                if field.is_empty() || value.is_empty() {
                    return Err(anyhow!("Invalid field:value format: {}", word));
                }

                tokens.push(Token::FieldValue { field, value });
            }
        }
    }

    Ok(tokens)
}

/// Read a word (until whitespace or end)
fn read_word(chars: &mut Peekable<Chars>) -> String {
    let mut word = String::new();

    while let Some(&ch) = chars.peek() {
        if ch.is_whitespace() {
            break;
        }
        word.push(ch);
        chars.next();
    }

    word
}

/// Read a quoted value; `initial` is the part already read, opening quote included
fn read_quoted_value(chars: &mut Peekable<Chars>, initial: &str) -> Result<String> {
    let mut value = initial[1..].to_string();

    if let Some(quote_pos) = value.find('"') {
        return Ok(value[..quote_pos].to_string());
    }

    for ch in chars.by_ref() {
        if ch == '"' {
            return Ok(value);
        }
        value.push(ch);
    }

    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(field: &str) -> Result<FilterField> {
    match field.to_lowercase().as_str() {
        "name" => Ok(FilterField::Name),
        "path" => Ok(FilterField::Path),
        "ext" => Ok(FilterField::Ext),
        "tag" => Ok(FilterField::Tag),
        _ => Err(anyhow!("Unknown field: '{}' (valid fields: name, path, ext, tag)", field)),
    }
}

/// Parse filter string into a [`SearchFilter`]
///
/// Examples:
/// - `"ext:txt"` → single criterion
/// - `"ext:txt tag:x"` → both must hold
/// - `"ext:txt AND tag:x"` → same thing, explicit
/// - `"name:\"my file\""` → quoted value containing a space
pub fn parse_filter(input: &str) -> Result<SearchFilter> {
    let mut filter = SearchFilter::new();
    if input.trim().is_empty() {
        return Ok(filter);
    }

    let tokens = tokenize(input).context("Failed to tokenize filter")?;
    let mut expecting_filter = true;
    let mut seen_filter = false;

    for token in tokens {
        match token {
            Token::FieldValue { field, value } => {
                let field = parse_field(&field)?;
                filter.set(field, value)?;
                expecting_filter = false;
                seen_filter = true;
            }
            Token::And => {
                if expecting_filter {
                    return Err(anyhow!("Unexpected AND operator (expected field:value)"));
                }
                expecting_filter = true;
            }
            Token::Or => {
                return Err(anyhow!("OR is not supported: all filter criteria must match"));
            }
        }
    }

    if expecting_filter && seen_filter {
        return Err(anyhow!("Filter ended with operator (expected field:value)"));
    }

    Ok(filter)
}
