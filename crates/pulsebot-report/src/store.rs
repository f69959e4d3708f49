//! Local artifact persistence.
//!
//! A failed write degrades to "report generated but not saved"; it never
//! blocks chat delivery.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::info;

/// Write a report under `<dir>/<category>/<date>.md`, creating the
/// directories as needed. Returns the written path.
pub fn write_artifact(
    dir: &Path,
    category: &str,
    date: &str,
    content: &str,
) -> io::Result<PathBuf> {
    let target_dir = dir.join(category);
    fs::create_dir_all(&target_dir)?;

    let path = target_dir.join(format!("{date}.md"));
    fs::write(&path, content)?;
    info!(path = %path.display(), "report saved");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_artifact_creates_dirs() {
        let tmp = std::env::temp_dir().join(format!("pulsebot-store-{}", std::process::id()));
        let path = write_artifact(&tmp, "MarketMonitor", "2026-02-03", "# report").unwrap();
        assert!(path.ends_with("MarketMonitor/2026-02-03.md"));
        assert_eq!(fs::read_to_string(&path).unwrap(), "# report");
        fs::remove_dir_all(&tmp).unwrap();
    }

    #[test]
    fn test_write_artifact_overwrites() {
        let tmp = std::env::temp_dir().join(format!("pulsebot-store2-{}", std::process::id()));
        write_artifact(&tmp, "Momentum50", "2026-02-03", "v1").unwrap();
        let path = write_artifact(&tmp, "Momentum50", "2026-02-03", "v2").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "v2");
        fs::remove_dir_all(&tmp).unwrap();
    }
}
