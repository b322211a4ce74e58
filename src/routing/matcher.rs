//! Route pattern compilation and matching.
//!
//! # Responsibilities
//! - Compile a pattern such as `/rdf_entity/{rdf_entity}/edit` into segments
//! - Match a slash-trimmed path against the compiled segments
//! - Extract parameter values by name
//!
//! # Design Decisions
//! - Segment count must match exactly (no wildcards, no optional segments)
//! - Literal segments are case-sensitive
//! - Parameters never match an empty segment
//! - No regex to guarantee O(n) matching

use std::collections::BTreeMap;
use thiserror::Error;

/// Errors raised while compiling a route pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("pattern '{0}' contains an empty segment")]
    EmptySegment(String),

    #[error("pattern '{0}' has a malformed parameter segment '{1}'")]
    MalformedParameter(String, String),

    #[error("pattern '{0}' declares parameter '{1}' more than once")]
    DuplicateParameter(String, String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param(String),
}

/// A compiled route pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    /// Compile a pattern. Leading and trailing slashes are ignored.
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        let trimmed = pattern.trim().trim_matches('/');
        let mut segments = Vec::new();

        if !trimmed.is_empty() {
            for raw in trimmed.split('/') {
                segments.push(Self::parse_segment(pattern, raw)?);
            }
        }

        let mut seen = Vec::new();
        for segment in &segments {
            if let Segment::Param(name) = segment {
                if seen.contains(&name) {
                    return Err(PatternError::DuplicateParameter(pattern.to_string(), name.clone()));
                }
                seen.push(name);
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    fn parse_segment(pattern: &str, raw: &str) -> Result<Segment, PatternError> {
        if raw.is_empty() {
            return Err(PatternError::EmptySegment(pattern.to_string()));
        }

        let opens = raw.starts_with('{');
        let closes = raw.ends_with('}');
        match (opens, closes) {
            (true, true) => {
                let name = &raw[1..raw.len() - 1];
                let valid = !name.is_empty()
                    && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
                if !valid {
                    return Err(PatternError::MalformedParameter(pattern.to_string(), raw.to_string()));
                }
                Ok(Segment::Param(name.to_string()))
            }
            (false, false) if !raw.contains('{') && !raw.contains('}') => {
                Ok(Segment::Literal(raw.to_string()))
            }
            _ => Err(PatternError::MalformedParameter(pattern.to_string(), raw.to_string())),
        }
    }

    /// The pattern as written in configuration.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Returns true if the pattern declares the named parameter.
    pub fn has_param(&self, name: &str) -> bool {
        self.segments
            .iter()
            .any(|s| matches!(s, Segment::Param(p) if p == name))
    }

    /// Match an already slash-trimmed path.
    /// Returns the extracted parameters on success.
    pub fn matches(&self, path: &str) -> Option<BTreeMap<String, String>> {
        let parts: Vec<&str> = if path.is_empty() {
            Vec::new()
        } else {
            path.split('/').collect()
        };

        if parts.len() != self.segments.len() {
            return None;
        }

        let mut params = BTreeMap::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            match segment {
                Segment::Literal(lit) if lit == part => {}
                Segment::Param(name) if !part.is_empty() => {
                    params.insert(name.clone(), part.to_string());
                }
                _ => return None,
            }
        }
        Some(params)
    }

    /// Build a concrete path by substituting parameters.
    /// Returns None if a parameter is missing.
    pub fn fill(&self, params: &BTreeMap<String, String>) -> Option<String> {
        let mut out = String::new();
        for segment in &self.segments {
            out.push('/');
            match segment {
                Segment::Literal(lit) => out.push_str(lit),
                Segment::Param(name) => out.push_str(params.get(name)?),
            }
        }
        if out.is_empty() {
            out.push('/');
        }
        Some(out)
    }
}
