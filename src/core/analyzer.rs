use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use super::{retain_internal_dependencies, AnalysisError, Dependency, FileScanner, SourceFile};
use crate::parsers::{ParsedUnit, PascalParser};

/// A file left out of the analysis because its unit structure was malformed.
#[derive(Debug)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub error: AnalysisError,
}

#[derive(Debug, Default)]
pub struct Analysis {
    /// Every declared unit, in walk order, including units without `uses`.
    pub units: Vec<String>,
    /// Dependencies in discovery order: files in walk order, and within a file
    /// interface references before implementation references.
    pub dependencies: Vec<Dependency>,
    pub skipped: Vec<SkippedFile>,
}

impl Analysis {
    /// Dependencies whose target is a unit declared somewhere in the tree.
    pub fn internal_dependencies(&self) -> Vec<Dependency> {
        retain_internal_dependencies(self.dependencies.clone(), &self.units)
    }
}

pub struct UnitAnalyzer {
    file_scanner: FileScanner,
    parser: PascalParser,
}

impl Default for UnitAnalyzer {
    fn default() -> Self {
        Self::new(FileScanner::new())
    }
}

impl UnitAnalyzer {
    pub fn new(file_scanner: FileScanner) -> Self {
        Self {
            file_scanner,
            parser: PascalParser::new(),
        }
    }

    /// Lazily parses every source file into its declared unit.
    ///
    /// Files without a unit declaration are passed over. Malformed units are
    /// handed to `on_skip` and the walk continues. I/O failures are yielded as
    /// `Err`; callers are expected to stop there.
    pub fn units<'s, F>(
        &'s self,
        root_path: &Path,
        mut on_skip: F,
    ) -> Result<impl Iterator<Item = Result<ParsedUnit, AnalysisError>> + 's, AnalysisError>
    where
        F: FnMut(SkippedFile) + 's,
    {
        let files = self.file_scanner.read_files(root_path)?;
        let parser = self.parser;

        let units = files.filter_map(move |file| {
            let SourceFile { path, text } = match file {
                Ok(file) => file,
                Err(err) => return Some(Err(err)),
            };

            match parser.parse_declared(&text) {
                Ok(Some(unit)) => {
                    debug!(
                        path = %path.display(),
                        unit = %unit.name,
                        count = unit.dependencies.len(),
                        "analyzed unit"
                    );
                    Some(Ok(unit))
                }
                Ok(None) => {
                    debug!(path = %path.display(), "no unit declaration");
                    None
                }
                Err(err) if err.is_recoverable() => {
                    let error = err.with_path(&path);
                    warn!(path = %path.display(), %error, "skipping malformed unit");
                    on_skip(SkippedFile { path, error });
                    None
                }
                Err(err) => Some(Err(err.with_path(&path))),
            }
        });

        Ok(units)
    }

    /// Dependencies of every unit, flattened in discovery order.
    pub fn dependencies<'s, F>(
        &'s self,
        root_path: &Path,
        on_skip: F,
    ) -> Result<impl Iterator<Item = Result<Dependency, AnalysisError>> + 's, AnalysisError>
    where
        F: FnMut(SkippedFile) + 's,
    {
        let dependencies = self
            .units(root_path, on_skip)?
            .flat_map(|unit| -> Vec<Result<Dependency, AnalysisError>> {
                match unit {
                    Ok(unit) => unit.dependencies.into_iter().map(Ok).collect(),
                    Err(err) => vec![Err(err)],
                }
            });
        Ok(dependencies)
    }

    /// Runs the whole pipeline, stopping at the first I/O failure.
    pub fn analyze(&self, root_path: &Path) -> Result<Analysis, AnalysisError> {
        let mut skipped = Vec::new();
        let mut analysis = Analysis::default();

        for unit in self.units(root_path, |file| skipped.push(file))? {
            let unit = unit?;
            analysis.units.push(unit.name);
            analysis.dependencies.extend(unit.dependencies);
        }
        analysis.skipped = skipped;

        debug!(
            units = analysis.units.len(),
            dependencies = analysis.dependencies.len(),
            skipped = analysis.skipped.len(),
            "analysis finished"
        );

        Ok(analysis)
    }
}
