pub mod analyzer;
pub mod error;
pub mod graph;
pub mod scanner;

pub use analyzer::{Analysis, SkippedFile, UnitAnalyzer};
pub use error::{AnalysisError, MalformedReason};
pub use graph::{
    discovered_units, remove_external_dependencies, retain_internal_dependencies, Dependency,
    DependencyKind,
};
pub use scanner::{FileScanner, SourceFile};
