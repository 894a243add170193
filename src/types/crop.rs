//! Canonical crop-field parsing.
//!
//! The `crop` field of a record is free text: usually a single crop name,
//! sometimes a compound form like `"Tomato / Potato"`, `"Corn (maize)"` or
//! `"Multiple crops"`. Historically every consumer split this string with
//! its own ad hoc rule; [`CropHosts`] is the single parse applied once per
//! catalog at load time, and every call site (crop filter, unique-crop
//! counting, statistics) works from it.

use serde::{Deserialize, Serialize};

/// A primary crop name with the number of records attributed to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropCount {
    pub name: String,
    pub count: usize,
}

/// Parsed form of a record's `crop` field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CropHosts {
    /// Display name: text before the first `(`, `,` or `/`, trimmed.
    pub primary: String,
    /// Trimmed, lowercased raw field, used for substring matching.
    pub normalized: String,
    /// Top-level `,`/`/`-separated host names in display case, with
    /// parenthetical qualifiers stripped.
    pub hosts: Vec<String>,
    /// Parenthesised qualifiers (e.g. `"maize"`), in display case.
    pub aliases: Vec<String>,
    /// Field names several crops, or says "multiple".
    pub multi_host: bool,
}

impl CropHosts {
    /// Parse a raw crop field.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let normalized = trimmed.to_lowercase();

        let cut = trimmed.find(['(', ',', '/']).unwrap_or(trimmed.len());
        let mut primary = trimmed[..cut].trim().to_string();
        if primary.is_empty() {
            primary = trimmed.to_string();
        }

        let mut hosts = Vec::new();
        let mut aliases = Vec::new();
        let mut host = String::new();
        let mut alias = String::new();
        let mut depth = 0usize;
        for ch in trimmed.chars() {
            match ch {
                '(' => depth += 1,
                ')' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        push_part(&mut aliases, &mut alias);
                    }
                }
                ',' | '/' if depth == 0 => push_part(&mut hosts, &mut host),
                _ if depth > 0 => alias.push(ch),
                _ => host.push(ch),
            }
        }
        push_part(&mut hosts, &mut host);
        push_part(&mut aliases, &mut alias);

        let multi_host = normalized.contains("multiple") || hosts.len() >= 2;

        Self {
            primary,
            normalized,
            hosts,
            aliases,
            multi_host,
        }
    }

    /// Whether a normalized (trimmed, lowercased) filter term selects this
    /// crop field: substring of the raw field, or equal to one of the
    /// parsed hosts or aliases.
    pub fn matches(&self, term: &str) -> bool {
        self.normalized.contains(term)
            || self.hosts.iter().any(|h| h.to_lowercase() == term)
            || self.aliases.iter().any(|a| a.to_lowercase() == term)
    }
}

fn push_part(parts: &mut Vec<String>, buf: &mut String) {
    let part = buf.trim();
    if !part.is_empty() {
        parts.push(part.to_string());
    }
    buf.clear();
}
