pub mod holdings;
pub mod profile;
pub mod report;

use anyhow::Context;
use std::path::Path;

/// Creates the parent directory of `path` when it has one.
pub(crate) fn ensure_parent_dir(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory: {}", dir.display()))?;
    }
    Ok(())
}
