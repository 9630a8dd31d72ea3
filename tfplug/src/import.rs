//! Import helpers for reconstructing state from an import ID
//!
//! Resources declare the hierarchical path their import IDs follow, e.g.
//! `/Services/{service_sid}/Channels/{channel_sid}/Members/{sid}`. Each
//! placeholder becomes an attribute of the seed state.

use crate::error::{Result, TfplugError};
use crate::types::{AttributePath, DynamicValue, State};
use regex::Regex;

/// Declarative import ID template
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportTemplate {
    template: &'static str,
}

impl ImportTemplate {
    pub const fn new(template: &'static str) -> Self {
        Self { template }
    }

    pub fn template(&self) -> &'static str {
        self.template
    }

    /// Placeholder names in template order
    pub fn placeholders(&self) -> Vec<&'static str> {
        self.segments()
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name),
                Segment::Literal(_) => None,
            })
            .collect()
    }

    /// Each placeholder matches exactly one non-empty path segment
    fn pattern(&self) -> String {
        let body: String = self
            .segments()
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => regex::escape(text),
                Segment::Placeholder(_) => "([^/]+)".to_string(),
            })
            .collect();
        format!("^{}$", body)
    }

    fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::new();
        let mut rest = self.template;
        while let Some(start) = rest.find('{') {
            let Some(len) = rest[start..].find('}') else {
                break;
            };
            if start > 0 {
                segments.push(Segment::Literal(&rest[..start]));
            }
            segments.push(Segment::Placeholder(&rest[start + 1..start + len]));
            rest = &rest[start + len + 1..];
        }
        if !rest.is_empty() {
            segments.push(Segment::Literal(rest));
        }
        segments
    }

    /// Parses an import ID into a seed state holding every placeholder
    /// attribute and the identifier
    ///
    /// The identifier is the `sid` placeholder when present, otherwise the
    /// last placeholder.
    pub fn parse(&self, id: &str) -> Result<State> {
        let regex = Regex::new(&self.pattern()).map_err(|e| {
            TfplugError::InvalidConfiguration(format!(
                "invalid import template {}: {}",
                self.template, e
            ))
        })?;

        let captures = regex
            .captures(id)
            .ok_or_else(|| TfplugError::MalformedImportId {
                id: id.to_string(),
                template: self.template.to_string(),
            })?;

        let placeholders = self.placeholders();
        let id_index = placeholders
            .iter()
            .position(|name| *name == "sid")
            .unwrap_or(placeholders.len().saturating_sub(1));

        let mut state = DynamicValue::empty_object();
        for (idx, name) in placeholders.into_iter().enumerate() {
            let value = captures
                .get(idx + 1)
                .map(|m| m.as_str().to_string())
                .unwrap_or_default();
            if idx == id_index {
                state.set_id(value.clone());
            }
            state.set_string(&AttributePath::new(name), value)?;
        }
        Ok(state)
    }
}

enum Segment {
    Literal(&'static str),
    Placeholder(&'static str),
}

/// Seed state for resources whose import ID is the bare identifier
pub fn import_state_passthrough_id(attr_path: AttributePath, id: &str) -> Result<State> {
    let mut state = DynamicValue::empty_object();
    state.set_string(&attr_path, id.to_string())?;
    state.set_id(id);
    Ok(state)
}
