//! Rewrite rule files
//!
//! Rules are stored in Java properties syntax, one `legacy-anchor=target` per
//! logical line:
//! ```text
//! # moved in 3.0
//! howto.webserver=howto.embedded-web-servers
//! actuator.endpoints=@api:rest/actuator/index.adoc
//! ```

use indexmap::IndexMap;
use std::path::Path;

use crate::error::{Error, Result};

/// Load a rule file into an ordered table
///
/// The file is ISO-8859-1; characters outside it need `\uXXXX` escapes.
pub fn load_rule_file(path: &Path) -> Result<IndexMap<String, String>> {
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    let content = decode_latin1(&bytes);
    parse_rules(&content).map_err(|(line, message)| Error::RewriteSyntax {
        path: path.to_path_buf(),
        line,
        message,
    })
}

/// Syntax error: 1-based physical line number and message
type SyntaxError = (usize, String);

/// Parse properties text
pub fn parse_rules(content: &str) -> std::result::Result<IndexMap<String, String>, SyntaxError> {
    let mut rules = IndexMap::new();
    let mut physical = content.lines().enumerate().peekable();

    while let Some((line_idx, raw)) = physical.next() {
        let trimmed = raw.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
            continue;
        }

        // Join continuation lines
        let mut logical = String::new();
        let mut current = trimmed.to_string();
        while ends_with_continuation(&current) {
            current.pop();
            logical.push_str(&current);
            match physical.next() {
                Some((_, next)) => current = next.trim_start().to_string(),
                None => {
                    current.clear();
                    break;
                }
            }
        }
        logical.push_str(&current);

        let (key, value) = split_entry(&logical);
        let key = unescape(key).map_err(|m| (line_idx + 1, m))?;
        let value = unescape(value).map_err(|m| (line_idx + 1, m))?;
        rules.insert(key, value);
    }

    Ok(rules)
}

fn decode_latin1(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

/// A line continues when it ends in an odd number of backslashes
fn ends_with_continuation(line: &str) -> bool {
    line.chars().rev().take_while(|&c| c == '\\').count() % 2 == 1
}

/// Split a logical line into raw (still escaped) key and value
fn split_entry(line: &str) -> (&str, &str) {
    let mut escaped = false;
    let mut key_end = line.len();

    for (idx, c) in line.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' => escaped = true,
            '=' | ':' | ' ' | '\t' | '\x0c' => {
                key_end = idx;
                break;
            }
            _ => {}
        }
    }

    let key = &line[..key_end];
    let rest = line[key_end..].trim_start_matches([' ', '\t', '\x0c']);
    let rest = rest
        .strip_prefix('=')
        .or_else(|| rest.strip_prefix(':'))
        .unwrap_or(rest);
    (key, rest.trim_start_matches([' ', '\t', '\x0c']))
}

fn unescape(raw: &str) -> std::result::Result<String, String> {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some('f') => out.push('\x0c'),
            Some('u') => {
                let hex: String = chars.by_ref().take(4).collect();
                let code = u32::from_str_radix(&hex, 16)
                    .ok()
                    .filter(|_| hex.len() == 4)
                    .and_then(char::from_u32)
                    .ok_or_else(|| format!("Malformed \\uxxxx encoding: \\u{}", hex))?;
                out.push(code);
            }
            Some(other) => out.push(other),
            None => {}
        }
    }

    Ok(out)
}
