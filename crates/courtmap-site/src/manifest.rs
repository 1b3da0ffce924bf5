//! Static site manifest: title, source/output roots, and the published page groups.

use courtmap_core::RegionKind;
use serde::{Deserialize, Serialize};

const FONT_HEAD: &str = r#"<link rel="preconnect" href="https://fonts.googleapis.com">
<link rel="preconnect" href="https://fonts.gstatic.com" crossorigin>
<link href="https://fonts.googleapis.com/css2?family=Work+Sans:wght@600;800&display=swap" rel="stylesheet">"#;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageGroup {
    pub name: String,
    pub path: String,
}

impl From<RegionKind> for PageGroup {
    fn from(kind: RegionKind) -> Self {
        Self {
            name: kind.group_title().to_string(),
            path: format!("/{}/", kind.dir_name()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteManifest {
    pub title: String,
    pub root: String,
    pub output: String,
    pub pages: Vec<PageGroup>,
    pub theme: String,
    pub head: String,
}

impl Default for SiteManifest {
    fn default() -> Self {
        Self {
            title: "US Federal Courts Map".into(),
            root: "src".into(),
            output: "dist".into(),
            pages: RegionKind::ALL.into_iter().map(PageGroup::from).collect(),
            theme: "default".into(),
            head: FONT_HEAD.into(),
        }
    }
}

impl SiteManifest {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
