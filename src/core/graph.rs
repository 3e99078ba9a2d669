use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, Copy)]
pub enum DependencyKind {
    /// Introduced by the `uses` clause of the `implementation` section.
    Implementation,
    /// Introduced by the `uses` clause of the `interface` section.
    Interface,
}

/// A single `uses` reference from one unit to another.
///
/// Names are kept exactly as written in the source. One value is produced per
/// reference, so the same pair of units can appear more than once.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Dependency {
    pub from: String,
    pub to: String,
    pub kind: DependencyKind,
}

impl Dependency {
    pub fn new(from: impl Into<String>, to: impl Into<String>, kind: DependencyKind) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            kind,
        }
    }

    pub fn interface(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, DependencyKind::Interface)
    }

    pub fn implementation(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self::new(from, to, DependencyKind::Implementation)
    }
}

/// Names of every unit that declared at least one dependency.
pub fn discovered_units(dependencies: &[Dependency]) -> HashSet<&str> {
    dependencies.iter().map(|d| d.from.as_str()).collect()
}

/// Keeps only dependencies whose target is itself a discovered unit.
///
/// Membership is case-sensitive, even though Pascal identifiers are not:
/// `uses sysutils` does not match a unit declared as `SysUtils`.
///
/// Sources are taken from the input itself, so a second pass can drop more:
/// `[A -> B, B -> X]` becomes `[A -> B]`, then `[]`. Pass the declared units
/// to [`retain_internal_dependencies`] for a stable result.
pub fn remove_external_dependencies(dependencies: Vec<Dependency>) -> Vec<Dependency> {
    retain_internal_dependencies(dependencies, std::iter::empty::<&str>())
}

/// [`remove_external_dependencies`], also counting `declared_units` as
/// internal. Units whose files have no `uses` clause never appear as a source,
/// so callers that know every declared unit pass them here.
pub fn retain_internal_dependencies<I, S>(
    dependencies: Vec<Dependency>,
    declared_units: I,
) -> Vec<Dependency>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut internals: HashSet<String> = discovered_units(&dependencies)
        .into_iter()
        .map(str::to_owned)
        .collect();
    internals.extend(declared_units.into_iter().map(|u| u.as_ref().to_owned()));

    dependencies
        .into_iter()
        .filter(|d| internals.contains(&d.to))
        .collect()
}
