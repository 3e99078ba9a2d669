use anyhow::Result;
use serde_json::json;
use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::Path;

use super::EdgeDisplay;
use crate::core::{Dependency, DependencyKind};

/// JSON formatter with a unit table and index-based edges
pub struct JsonCompactFormatter {
    display: EdgeDisplay,
}

impl JsonCompactFormatter {
    pub fn new() -> Self {
        Self {
            display: EdgeDisplay::all(),
        }
    }

    pub fn with_display(mut self, display: EdgeDisplay) -> Self {
        self.display = display;
        self
    }

    pub fn format_to_file(&self, dependencies: &[Dependency], output_path: &Path) -> Result<()> {
        let json_content = self.format_dependencies(dependencies)?;
        fs::write(output_path, json_content)?;
        Ok(())
    }

    pub fn write_to<W: Write>(&self, dependencies: &[Dependency], writer: &mut W) -> Result<()> {
        let json_content = self.format_dependencies(dependencies)?;
        writeln!(writer, "{json_content}")?;
        writer.flush()?;
        Ok(())
    }

    pub fn format_dependencies(&self, dependencies: &[Dependency]) -> Result<String> {
        let mut units: Vec<&str> = Vec::new();
        let mut unit_ids: HashMap<&str, usize> = HashMap::new();

        let mut edges = Vec::new();
        for dependency in self.display.visible(dependencies) {
            let from = intern(&dependency.from, &mut units, &mut unit_ids);
            let to = intern(&dependency.to, &mut units, &mut unit_ids);
            edges.push(json!([from, to, self.kind_code(dependency.kind)]));
        }

        let output = json!({
            "meta": {
                "units": units.len(),
                "edges": edges.len()
            },
            "units": units,
            "edges": edges
        });

        Ok(serde_json::to_string(&output)?)
    }

    fn kind_code(&self, kind: DependencyKind) -> u8 {
        match kind {
            DependencyKind::Implementation => 0,
            DependencyKind::Interface => 1,
        }
    }
}

/// Index of `name` in `units`, appending it on first sight.
fn intern<'a>(name: &'a str, units: &mut Vec<&'a str>, ids: &mut HashMap<&'a str, usize>) -> usize {
    if let Some(&id) = ids.get(name) {
        return id;
    }
    units.push(name);
    ids.insert(name, units.len() - 1);
    units.len() - 1
}

impl Default for JsonCompactFormatter {
    fn default() -> Self {
        Self::new()
    }
}
