use rustpython_parser::ast::Suite;
use rustpython_parser::Parse;
use std::fs;
use std::path::Path;

use super::error::LoadError;

//─────────────────────────────────────────────────────────────────────────────

/// Loads a Python file and parses it into its top-level statements.
pub fn load_module_source(file_path: &Path) -> Result<Suite, LoadError> {
    let display = file_path.display().to_string();

    let file_content =
        fs::read_to_string(file_path).map_err(|e| LoadError::ReadFile(display.clone(), e))?;

    Suite::parse(&file_content, &display).map_err(|e| LoadError::ParseAst(display, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn parses_top_level_statements() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("mod.py");
        fs::write(&file, "def f(x):\n    return x\n\nVALUE = 1\n").unwrap();
        let suite = load_module_source(&file).unwrap();
        assert_eq!(suite.len(), 2);
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let dir = TempDir::new().unwrap();
        let err = load_module_source(&dir.path().join("absent.py")).unwrap_err();
        assert!(matches!(err, LoadError::ReadFile(..)));
    }

    #[test]
    fn syntax_error_is_a_parse_error() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("broken.py");
        fs::write(&file, "def f(:\n").unwrap();
        let err = load_module_source(&file).unwrap_err();
        assert!(matches!(err, LoadError::ParseAst(..)));
    }
}
