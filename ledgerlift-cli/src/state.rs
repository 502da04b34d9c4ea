use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

/// `$LEDGERLIFT_HOME`, or `~/.ledgerlift`.
pub fn ledgerlift_home() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os("LEDGERLIFT_HOME") {
        return Ok(PathBuf::from(dir));
    }
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".ledgerlift"))
}

pub fn ensure_ledgerlift_home() -> Result<PathBuf> {
    let dir = ledgerlift_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}
