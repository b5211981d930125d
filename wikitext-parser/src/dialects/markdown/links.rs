//! Reference link definitions (`[id]: url "title"`).
//!
//! Definitions may appear anywhere in a document and apply to every reference, including ones
//! before the definition, so they are collected in a pass over the source before parsing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashMap;

static DEFINITION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^ {0,3}\[([^\]]+)\]:[ \t]*<?([^\s>]+)>?(?:[ \t]+(?:"([^"]*)"|'([^']*)'|\(([^)]*)\)))?[ \t]*$"#,
    )
    .unwrap()
});
static FENCE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ {0,3}(`{3,}|~{3,})").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkDefinition {
    pub url: String,
    pub title: Option<String>,
}

/// Link definitions keyed by normalized reference id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDefinitions {
    entries: HashMap<String, LinkDefinition>,
}

impl LinkDefinitions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a definition. The first definition of an id wins.
    pub fn insert(&mut self, id: &str, definition: LinkDefinition) {
        self.entries.entry(normalize(id)).or_insert(definition);
    }

    /// Look up a reference id, ignoring case and runs of whitespace.
    pub fn get(&self, id: &str) -> Option<&LinkDefinition> {
        self.entries.get(&normalize(id))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn normalize(id: &str) -> String {
    id.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Parse a definition line into its id and definition.
pub(crate) fn parse_definition(line: &str) -> Option<(String, LinkDefinition)> {
    let caps = DEFINITION.captures(line)?;
    let title = [3, 4, 5]
        .into_iter()
        .find_map(|index| caps.get(index))
        .map(|m| m.as_str().to_string());
    Some((
        caps[1].to_string(),
        LinkDefinition {
            url: caps[2].to_string(),
            title,
        },
    ))
}

/// Split `source` into lines, removing definition lines and collecting their definitions.
/// Lines inside fenced code are kept as they are.
pub(crate) fn extract(source: &str) -> (Vec<&str>, LinkDefinitions) {
    let mut definitions = LinkDefinitions::new();
    let mut lines = Vec::new();
    let mut fence: Option<&str> = None;
    for line in source.lines() {
        if let Some(caps) = FENCE.captures(line) {
            let marker = caps.get(1).map_or("", |m| m.as_str());
            fence = match fence {
                None => Some(marker),
                Some(open) if marker.starts_with(open) && line.trim_end().ends_with(marker) => None,
                Some(open) => Some(open),
            };
            lines.push(line);
            continue;
        }
        if fence.is_none() {
            if let Some((id, definition)) = parse_definition(line) {
                definitions.insert(&id, definition);
                continue;
            }
        }
        lines.push(line);
    }
    log::debug!("collected {} link definitions", definitions.len());
    (lines, definitions)
}
