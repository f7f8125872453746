use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use std::collections::BTreeMap;

use crate::models::RouteError;

#[derive(Parser)]
#[grammar = "core/route.pest"]
struct RoutePatternParser;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Static(String),
    Param(String),
    /// Swallows every remaining segment, including none.
    CatchAll(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

fn ident_of(pair: Pair<Rule>) -> String {
    pair.into_inner()
        .next()
        .map(|ident| ident.as_str().to_string())
        .unwrap_or_default()
}

/// Parses a route path such as `/trips/:id` or `/:pathMatch(.*)*`.
pub fn parse_pattern(pattern: &str) -> Result<RoutePattern, RouteError> {
    let parsed = RoutePatternParser::parse(Rule::pattern, pattern)
        .map_err(|e| RouteError::invalid_pattern(pattern, &e.to_string()))?
        .next()
        .ok_or_else(|| RouteError::invalid_pattern(pattern, "empty pattern"))?;

    let mut segments = Vec::new();
    for pair in parsed.into_inner() {
        match pair.as_rule() {
            Rule::literal => segments.push(Segment::Static(pair.as_str().to_string())),
            Rule::param => segments.push(Segment::Param(ident_of(pair))),
            Rule::catch_all => segments.push(Segment::CatchAll(ident_of(pair))),
            _ => {}
        }
    }

    let catch_all_at = segments
        .iter()
        .position(|segment| matches!(segment, Segment::CatchAll(_)));
    if let Some(index) = catch_all_at {
        if index + 1 != segments.len() {
            return Err(RouteError::invalid_pattern(
                pattern,
                "catch-all must be the last segment",
            ));
        }
    }

    Ok(RoutePattern {
        source: pattern.to_string(),
        segments,
    })
}

/// Joins a child route path onto its parent's. Absolute children stand alone.
pub fn join_path(parent: &str, child: &str) -> String {
    if child.starts_with('/') {
        child.to_string()
    } else if child.is_empty() {
        parent.to_string()
    } else {
        format!("{}/{}", parent.trim_end_matches('/'), child)
    }
}

/// Splits a request path into its non-empty segments.
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('/').filter(|segment| !segment.is_empty()).collect()
}

impl RoutePattern {
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Matches path segments, returning captured params. Static segments
    /// compare case-insensitively.
    pub fn match_segments(&self, path: &[&str]) -> Option<BTreeMap<String, String>> {
        let mut params = BTreeMap::new();
        for (index, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::CatchAll(name) => {
                    let rest = path.get(index..).unwrap_or(&[]);
                    params.insert(name.clone(), rest.join("/"));
                    return Some(params);
                }
                Segment::Static(literal) => {
                    let actual = path.get(index)?;
                    if !actual.eq_ignore_ascii_case(literal) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let actual = path.get(index)?;
                    params.insert(name.clone(), actual.to_string());
                }
            }
        }
        (path.len() == self.segments.len()).then_some(params)
    }
}
