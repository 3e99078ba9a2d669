pub mod dot;
pub mod json_compact;

pub use dot::DotFormatter;
pub use json_compact::JsonCompactFormatter;

use crate::core::{Dependency, DependencyKind};

/// Which dependency kinds a formatter renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdgeDisplay {
    pub implementation: bool,
    pub interface: bool,
}

impl Default for EdgeDisplay {
    fn default() -> Self {
        Self::all()
    }
}

impl EdgeDisplay {
    pub fn all() -> Self {
        Self {
            implementation: true,
            interface: true,
        }
    }

    pub fn none() -> Self {
        Self {
            implementation: false,
            interface: false,
        }
    }

    pub fn shows(&self, kind: DependencyKind) -> bool {
        match kind {
            DependencyKind::Implementation => self.implementation,
            DependencyKind::Interface => self.interface,
        }
    }

    pub fn visible<'a>(
        &self,
        dependencies: &'a [Dependency],
    ) -> impl Iterator<Item = &'a Dependency> {
        let display = *self;
        dependencies.iter().filter(move |d| display.shows(d.kind))
    }
}
