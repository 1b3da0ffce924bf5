//! Region pipelines: boundary file → transformed array, and boundary file → pages.

use std::path::Path;

use anyhow::Context;
use courtmap_core::{RegionKind, load_regions};
use courtmap_site::{BatchStats, write_index, write_pages, write_regions_json};

use crate::write_output;

/// Load and flatten a boundary file, writing the region array to `output`
/// (`-` for stdout). Returns the number of regions.
pub fn run_transform(kind: RegionKind, input: &Path, output: &str) -> anyhow::Result<usize> {
    let regions = load_regions(input, kind)
        .with_context(|| format!("loading {kind} from {}", input.display()))?;

    if output == "-" {
        let json = serde_json::to_string_pretty(&regions).context("serialising regions")?;
        write_output(output, &json)?;
    } else {
        write_regions_json(&regions, Path::new(output))
            .with_context(|| format!("writing {output}"))?;
    }
    Ok(regions.len())
}

/// Load a boundary file and write every region page, plus the index if asked.
pub fn run_pages(
    kind: RegionKind,
    input: &Path,
    out_dir: &Path,
    with_index: bool,
) -> anyhow::Result<BatchStats> {
    let regions = load_regions(input, kind)
        .with_context(|| format!("loading {kind} from {}", input.display()))?;

    let stats = write_pages(kind, &regions, out_dir).context("writing region pages")?;
    if with_index {
        write_index(kind, &regions, out_dir).context("writing index page")?;
    }
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DISTRICTS: &str = r#"{
        "type": "FeatureCollection",
        "features": [
            { "type": "Feature", "properties": { "JD_NAME": "District of Puerto Rico" }, "geometry": null },
            { "type": "Feature", "properties": { "JD_NAME": "District of Guam" }, "geometry": null }
        ]
    }"#;

    fn site() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("data")).unwrap();
        std::fs::write(dir.path().join("data/districts.json"), DISTRICTS).unwrap();
        dir
    }

    #[test]
    fn pages_written_under_out_dir() {
        let site = site();
        let out = site.path().join("districts");
        let stats = run_pages(
            RegionKind::District,
            &site.path().join("data/districts.json"),
            &out,
            true,
        )
        .unwrap();
        assert_eq!(stats.pages, 2);
        assert!(out.join("district-of-puerto-rico.md").is_file());
        assert!(out.join("district-of-guam.md").is_file());
        assert!(out.join("index.md").is_file());
    }

    #[test]
    fn index_only_when_asked() {
        let site = site();
        let out = site.path().join("districts");
        run_pages(RegionKind::District, &site.path().join("data/districts.json"), &out, false)
            .unwrap();
        assert!(!out.join("index.md").exists());
    }

    #[test]
    fn missing_input_aborts() {
        let site = site();
        let out = site.path().join("circuits");
        let err = run_pages(
            RegionKind::Circuit,
            &site.path().join("data/circuits.json"),
            &out,
            false,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("circuits.json"));
        assert!(!out.exists());
    }

    #[test]
    fn transform_to_file() {
        let site = site();
        let output = site.path().join("out/districts.json");
        let count = run_transform(
            RegionKind::District,
            &site.path().join("data/districts.json"),
            output.to_str().unwrap(),
        )
        .unwrap();
        assert_eq!(count, 2);
        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(value[0]["slug"], "district-of-puerto-rico");
        assert_eq!(value[1]["name"], "District of Guam");
    }
}
