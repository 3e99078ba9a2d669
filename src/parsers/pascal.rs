use regex::Regex;
use std::sync::LazyLock;
use tracing::debug;

use super::common::strip_comments;
use crate::core::{AnalysisError, Dependency, DependencyKind, MalformedReason};

static UNIT_DECLARATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bunit\s+(\w+)\s*;").expect("UNIT_DECLARATION regex is invalid")
});

static INTERFACE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\binterface\b").expect("INTERFACE_KEYWORD regex is invalid"));

static IMPLEMENTATION_KEYWORD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\bimplementation\b").expect("IMPLEMENTATION_KEYWORD regex is invalid")
});

static USES_CLAUSE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\buses\b([^;]*);").expect("USES_CLAUSE regex is invalid"));

/// A declared unit split into its two sections.
///
/// `interface` runs from the `interface` keyword up to `implementation`;
/// `implementation` runs from that keyword to the end of the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitSource<'a> {
    pub name: &'a str,
    pub interface: &'a str,
    pub implementation: &'a str,
}

impl<'a> UnitSource<'a> {
    pub fn interface_uses(&self) -> Vec<&'a str> {
        uses_list(self.interface)
    }

    pub fn implementation_uses(&self) -> Vec<&'a str> {
        uses_list(self.implementation)
    }

    /// Interface references first, then implementation references, each in
    /// source order.
    pub fn dependencies(&self) -> impl Iterator<Item = Dependency> + 'a {
        let name = self.name;
        let interface = self
            .interface_uses()
            .into_iter()
            .map(move |to| Dependency::new(name, to, DependencyKind::Interface));
        let implementation = self
            .implementation_uses()
            .into_iter()
            .map(move |to| Dependency::new(name, to, DependencyKind::Implementation));
        interface.chain(implementation)
    }
}

/// Result of analyzing one file that declares a unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUnit {
    pub name: String,
    pub dependencies: Vec<Dependency>,
}

/// Lexical extractor for `uses` clauses in Delphi / Object Pascal units.
///
/// Only the first `uses` clause of each section is considered, dotted unit
/// names are not recognised, and `in 'path'` suffixes are kept verbatim.
#[derive(Debug, Default, Clone, Copy)]
pub struct PascalParser;

impl PascalParser {
    pub fn new() -> Self {
        Self
    }

    /// Strips comments and extracts every dependency of a single file.
    ///
    /// Sources without a `unit Name;` declaration yield nothing.
    pub fn parse_source(&self, source: &str) -> Result<Vec<Dependency>, AnalysisError> {
        Ok(self
            .parse_declared(source)?
            .map(|unit| unit.dependencies)
            .unwrap_or_default())
    }

    /// Like [`parse_source`](Self::parse_source), keeping the unit name so
    /// units without any `uses` clause are still known.
    pub fn parse_declared(&self, source: &str) -> Result<Option<ParsedUnit>, AnalysisError> {
        let cleaned = strip_comments(source);
        let Some(unit) = self.parse_unit(&cleaned)? else {
            return Ok(None);
        };

        let dependencies: Vec<Dependency> = unit.dependencies().collect();
        debug!(unit = unit.name, count = dependencies.len(), "extracted dependencies");
        Ok(Some(ParsedUnit {
            name: unit.name.to_string(),
            dependencies,
        }))
    }

    /// Locates the unit name and section boundaries in comment-free text.
    pub fn parse_unit<'a>(
        &self,
        cleaned: &'a str,
    ) -> Result<Option<UnitSource<'a>>, AnalysisError> {
        let Some(name) = UNIT_DECLARATION
            .captures(cleaned)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
        else {
            return Ok(None);
        };

        let malformed = |reason| AnalysisError::MalformedSource {
            path: None,
            unit: name.to_string(),
            reason,
        };

        let interface_start = INTERFACE_KEYWORD
            .find(cleaned)
            .ok_or_else(|| malformed(MalformedReason::MissingInterface))?
            .start();
        let implementation_start = IMPLEMENTATION_KEYWORD
            .find(cleaned)
            .ok_or_else(|| malformed(MalformedReason::MissingImplementation))?
            .start();
        if interface_start > implementation_start {
            return Err(malformed(MalformedReason::InterfaceAfterImplementation));
        }

        Ok(Some(UnitSource {
            name,
            interface: &cleaned[interface_start..implementation_start],
            implementation: &cleaned[implementation_start..],
        }))
    }
}

/// Items of the first `uses ... ;` clause in `section`, trimmed, empties dropped.
fn uses_list(section: &str) -> Vec<&str> {
    USES_CLAUSE
        .captures(section)
        .and_then(|caps| caps.get(1))
        .map(|list| {
            list.as_str()
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
