use regex::Regex;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::LazyLock;

use crate::core::AnalysisError;

static PAREN_STAR_COMMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)\(\*.*?\*\)").expect("PAREN_STAR_COMMENT regex is invalid")
});

static BRACE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{[^}]*\}").expect("BRACE_COMMENT regex is invalid"));

static LINE_COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r" *//[^\r\n]*").expect("LINE_COMMENT regex is invalid"));

/// Removes Pascal comments from `source`.
///
/// Passes run in a fixed order, each on the previous output:
/// `(* ... *)` blocks, `{ ... }` blocks, then `//` to end of line together
/// with the spaces in front of it. Line terminators outside block comments are
/// kept. Nesting is not supported, and markers inside string literals are
/// treated as comments.
pub fn strip_comments(source: &str) -> String {
    let result = PAREN_STAR_COMMENT.replace_all(source, "");
    let result = BRACE_COMMENT.replace_all(&result, "");
    LINE_COMMENT.replace_all(&result, "").into_owned()
}

/// Reads a whole source file, replacing invalid UTF-8 rather than failing.
pub fn read_source(file_path: &Path) -> Result<String, AnalysisError> {
    let read = || -> std::io::Result<Vec<u8>> {
        let file = File::open(file_path)?;
        let file_size = file.metadata()?.len() as usize;

        let mut reader = BufReader::with_capacity(file_size.clamp(1, 8192), file);
        let mut bytes = Vec::with_capacity(file_size);
        reader.read_to_end(&mut bytes)?;
        Ok(bytes)
    };

    let bytes = read().map_err(|e| AnalysisError::io(file_path, e))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paren_star_comments_stop_at_first_close() {
        assert_eq!(strip_comments("a (* x *) b (* y *) c"), "a  b  c");
    }

    #[test]
    fn paren_star_comments_span_lines() {
        assert_eq!(strip_comments("a(*\nuses Hidden;\n*)b"), "ab");
    }

    #[test]
    fn line_comment_keeps_terminator() {
        assert_eq!(strip_comments("x;   // note\r\ny;"), "x;\r\ny;");
        assert_eq!(strip_comments("x; // last line"), "x;");
    }
}
