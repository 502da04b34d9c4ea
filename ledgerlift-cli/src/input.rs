//! Input checks and output placement for statement files.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::{Path, PathBuf};

pub const ALLOWED_EXTENSIONS: &[&str] = &["pdf"];

pub fn has_allowed_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            ALLOWED_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
}

/// Check that `path` is an existing PDF no larger than `max_bytes`.
pub fn validate_pdf(path: &Path, max_bytes: u64) -> Result<()> {
    if !has_allowed_extension(path) {
        bail!(
            "invalid file type: {} (only PDF files are allowed)",
            path.display()
        );
    }
    let meta = fs::metadata(path).with_context(|| format!("stat {}", path.display()))?;
    if !meta.is_file() {
        bail!("not a file: {}", path.display());
    }
    if meta.len() > max_bytes {
        bail!(
            "{} is {} bytes; the limit is {} bytes",
            path.display(),
            meta.len(),
            max_bytes
        );
    }
    Ok(())
}

/// `<out_dir>/<input stem>.csv`
pub fn csv_output_path(out_dir: &Path, input: &Path) -> Result<PathBuf> {
    let stem = input
        .file_stem()
        .with_context(|| format!("no file name in {}", input.display()))?;
    let mut name = stem.to_os_string();
    name.push(".csv");
    Ok(out_dir.join(name))
}

pub fn write_output(path: &Path, csv: &str) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    fs::write(path, csv).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_check() {
        assert!(has_allowed_extension(Path::new("statement.pdf")));
        assert!(has_allowed_extension(Path::new("STATEMENT.PDF")));
        assert!(!has_allowed_extension(Path::new("statement.csv")));
        assert!(!has_allowed_extension(Path::new("statement")));
    }

    #[test]
    fn test_validate_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("jan.pdf");
        fs::write(&pdf, b"%PDF-1.4 tiny").unwrap();

        assert!(validate_pdf(&pdf, 1024).is_ok());
        assert!(validate_pdf(&pdf, 4).is_err());
        assert!(validate_pdf(&dir.path().join("missing.pdf"), 1024).is_err());

        let txt = dir.path().join("jan.txt");
        fs::write(&txt, "hello").unwrap();
        let err = validate_pdf(&txt, 1024).unwrap_err();
        assert!(err.to_string().contains("only PDF"));
    }

    #[test]
    fn test_csv_output_path() {
        let out = csv_output_path(Path::new("uploads"), Path::new("/tmp/in/Jan 2024.pdf")).unwrap();
        assert_eq!(out, PathBuf::from("uploads/Jan 2024.csv"));
    }

    #[test]
    fn test_write_output_creates_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/out/jan.csv");
        write_output(&path, "Date\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "Date\n");
    }
}
