/// GridView Filter Predicate
///
/// Free-text search over whole records. A record matches when any of its
/// fields matches the query: text fields by a case-insensitive pattern match
/// (the query is compiled as a regular expression, matching the search
/// behavior this engine replaces), numeric fields by exact equality between
/// their decimal form and the query. A query that is not a valid pattern
/// degrades to a literal, escaped match instead of failing the command.

use crate::record::{format_number, CellValue, Record};
use log::warn;
use regex::{Regex, RegexBuilder};
use serde::Serialize;

/// The active filter configuration. An empty query matches everything.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterSpec {
    pub query: String,
}

impl FilterSpec {
    pub fn empty() -> Self {
        FilterSpec {
            query: String::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self::empty()
    }
}

/// A compiled filter query, built once per `set_filter` and applied to every
/// record in the master set.
pub struct RecordMatcher {
    query: String,
    compiled: Option<CompiledQuery>,
}

enum CompiledQuery {
    Pattern(Regex),
    /// Lowercased query, matched as a plain substring.
    Literal(String),
}

impl CompiledQuery {
    fn is_match(&self, text: &str) -> bool {
        match self {
            CompiledQuery::Pattern(re) => re.is_match(text),
            CompiledQuery::Literal(needle) => text.to_lowercase().contains(needle),
        }
    }
}

impl RecordMatcher {
    pub fn new(query: &str) -> Self {
        let compiled = if query.is_empty() {
            None
        } else {
            Some(compile_query(query))
        };
        RecordMatcher {
            query: query.to_string(),
            compiled,
        }
    }

    /// Returns true iff any field of the record satisfies the query.
    pub fn matches(&self, record: &Record) -> bool {
        let compiled = match &self.compiled {
            // Empty query: short-circuit without looking at any field
            None => return true,
            Some(c) => c,
        };

        record.fields.values().any(|value| match value {
            CellValue::Text(s) => compiled.is_match(s),
            CellValue::Number(n) => format_number(*n) == self.query,
            CellValue::Null => false,
        })
    }
}

fn compile_query(query: &str) -> CompiledQuery {
    if let Ok(re) = build_pattern(query) {
        return CompiledQuery::Pattern(re);
    }
    warn!(
        "search query {:?} is not a valid pattern, matching it literally",
        query
    );
    match build_pattern(&regex::escape(query)) {
        Ok(re) => CompiledQuery::Pattern(re),
        // Even the escaped form can fail when it exceeds the regex crate's
        // compiled-size limit; scan for the substring instead.
        Err(_) => CompiledQuery::Literal(query.to_lowercase()),
    }
}

fn build_pattern(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}
