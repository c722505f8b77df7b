use crate::error::{ClientError, Result};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Maps a page URL to its on-disk location: the root path becomes
/// `<root>/index.html`, any other path is treated as a directory and becomes
/// `<root>/<path>/index.html`. The fixed page list is trusted, so no
/// traversal validation happens here.
pub fn page_path(output_root: &Path, url: &str) -> Result<PathBuf> {
    let parsed =
        Url::parse(url).map_err(|e| ClientError::InvalidUrl(format!("Invalid page URL: {}", e)))?;

    let path = parsed.path();
    if path.is_empty() || path == "/" {
        return Ok(output_root.join("index.html"));
    }

    let mut path = path.trim_start_matches('/').to_string();
    if !path.ends_with('/') {
        path.push('/');
    }

    Ok(output_root.join(path).join("index.html"))
}

/// Creates missing parent directories and overwrites any existing file.
pub fn write_page(path: &Path, html: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, html)?;
    Ok(())
}
