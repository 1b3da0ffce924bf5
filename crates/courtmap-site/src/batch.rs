//! Batch page generation: render every region and write it under the group directory.

use std::path::{Path, PathBuf};
use std::time::Instant;

use courtmap_core::{Region, RegionKind};
use tracing::info;

use crate::SiteError;
use crate::markdown;
use crate::page::{Page, build_index, build_page};

#[derive(Debug, Clone, Copy)]
pub struct BatchStats {
    pub pages: usize,
    pub elapsed_secs: f64,
}

/// Render and write one page per region, in order, to `<out_dir>/<slug>.md`.
///
/// Existing files are overwritten. The first failed write stops the batch;
/// pages already written stay on disk.
pub fn write_pages(
    kind: RegionKind,
    regions: &[Region],
    out_dir: &Path,
) -> Result<BatchStats, SiteError> {
    let start = Instant::now();
    ensure_dir(out_dir)?;

    for region in regions {
        let path = write_page(&build_page(kind, region), out_dir)?;
        info!(kind = %kind, path = %path.display(), "wrote page");
    }

    let stats = BatchStats {
        pages: regions.len(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    info!(kind = %kind, pages = stats.pages, "page batch complete");
    Ok(stats)
}

/// Write the group's `index.md`.
pub fn write_index(
    kind: RegionKind,
    regions: &[Region],
    out_dir: &Path,
) -> Result<PathBuf, SiteError> {
    ensure_dir(out_dir)?;
    let path = write_page(&build_index(kind, regions), out_dir)?;
    info!(kind = %kind, path = %path.display(), "wrote index");
    Ok(path)
}

/// Write a transformed region array as pretty JSON.
pub fn write_regions_json(regions: &[Region], path: &Path) -> Result<(), SiteError> {
    let json = serde_json::to_string_pretty(regions)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        ensure_dir(parent)?;
    }
    std::fs::write(path, json).map_err(|source| SiteError::Write {
        path: path.to_path_buf(),
        source,
    })
}

fn write_page(page: &Page, out_dir: &Path) -> Result<PathBuf, SiteError> {
    let path = out_dir.join(page.file_name());
    std::fs::write(&path, markdown::render(page)).map_err(|source| SiteError::Write {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

fn ensure_dir(dir: &Path) -> Result<(), SiteError> {
    std::fs::create_dir_all(dir).map_err(|source| SiteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}
