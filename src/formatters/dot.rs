use anyhow::Result;
use std::fmt::Write as _;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::EdgeDisplay;
use crate::core::{Dependency, DependencyKind};

/// Graphviz `digraph` writer.
///
/// One line per visible dependency, in input order, without deduplication.
pub struct DotFormatter {
    display: EdgeDisplay,
}

impl DotFormatter {
    pub fn new() -> Self {
        Self {
            display: EdgeDisplay::all(),
        }
    }

    pub fn with_display(mut self, display: EdgeDisplay) -> Self {
        self.display = display;
        self
    }

    pub fn with_implementation(mut self, show: bool) -> Self {
        self.display.implementation = show;
        self
    }

    pub fn with_interface(mut self, show: bool) -> Self {
        self.display.interface = show;
        self
    }

    pub fn format_to_file(&self, dependencies: &[Dependency], output_path: &Path) -> Result<()> {
        fs::write(output_path, self.format_dependencies(dependencies))?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, dependencies: &[Dependency], writer: &mut W) -> Result<()> {
        writer.write_all(self.format_dependencies(dependencies).as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    pub fn format_dependencies(&self, dependencies: &[Dependency]) -> String {
        let mut out = String::from("digraph\n{\n");
        for dependency in self.display.visible(dependencies) {
            let _ = writeln!(
                out,
                "\t{} -> {} [color={}];",
                dependency.from,
                dependency.to,
                Self::color(dependency.kind)
            );
        }
        out.push_str("}\n");
        out
    }

    fn color(kind: DependencyKind) -> &'static str {
        match kind {
            DependencyKind::Implementation => "red",
            DependencyKind::Interface => "green",
        }
    }
}

impl Default for DotFormatter {
    fn default() -> Self {
        Self::new()
    }
}
