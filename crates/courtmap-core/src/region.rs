//! GeoJSON boundary loading and the flat region records pages are built from.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::RegionError;
use crate::slug::slugify;

/// The two kinds of region the site publishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegionKind {
    Circuit,
    District,
}

impl RegionKind {
    pub const ALL: [RegionKind; 2] = [RegionKind::District, RegionKind::Circuit];

    /// Feature property holding the display name.
    pub fn name_key(self) -> &'static str {
        match self {
            RegionKind::Circuit => "Name",
            RegionKind::District => "JD_NAME",
        }
    }

    /// Boundary file under the site's data directory.
    pub fn data_file(self) -> &'static str {
        match self {
            RegionKind::Circuit => "circuits.json",
            RegionKind::District => "districts.json",
        }
    }

    /// Data loader that serves the transformed region array to pages.
    pub fn loader_file(self) -> &'static str {
        match self {
            RegionKind::Circuit => "circuits.json.js",
            RegionKind::District => "districts.json.js",
        }
    }

    /// Directory (relative to the site root) that holds this kind's pages.
    pub fn dir_name(self) -> &'static str {
        match self {
            RegionKind::Circuit => "circuits",
            RegionKind::District => "districts",
        }
    }

    pub fn group_title(self) -> &'static str {
        match self {
            RegionKind::Circuit => "Circuits",
            RegionKind::District => "Districts",
        }
    }

    /// Lowercase singular noun, also used as the page-side variable name.
    pub fn singular(self) -> &'static str {
        match self {
            RegionKind::Circuit => "circuit",
            RegionKind::District => "district",
        }
    }

    /// Sentence fragment completing "The <name> is ...".
    pub fn description(self) -> &'static str {
        match self {
            RegionKind::Circuit => "one of the thirteen United States Courts of Appeals.",
            RegionKind::District => {
                "one of the 94 federal judicial districts in the United States."
            }
        }
    }
}

impl fmt::Display for RegionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.dir_name())
    }
}

impl FromStr for RegionKind {
    type Err = RegionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "circuit" | "circuits" => Ok(RegionKind::Circuit),
            "district" | "districts" => Ok(RegionKind::District),
            other => Err(RegionError::UnknownKind(other.to_string())),
        }
    }
}

/// A single GeoJSON feature. Geometry is carried through untouched.
#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    #[serde(default)]
    pub geometry: Value,
}

/// A GeoJSON feature collection as published in the boundary files.
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Read and parse a boundary file.
    pub fn from_path(path: &Path) -> Result<Self, RegionError> {
        let text = std::fs::read_to_string(path).map_err(|source| RegionError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let collection = parse(&text, &path.display().to_string())?;
        debug!(path = %path.display(), features = collection.features.len(), "loaded boundary file");
        Ok(collection)
    }

    pub fn from_json_str(s: &str) -> Result<Self, RegionError> {
        parse(s, "<inline>")
    }
}

fn parse(text: &str, origin: &str) -> Result<FeatureCollection, RegionError> {
    serde_json::from_str(text).map_err(|source| RegionError::Json {
        origin: origin.to_string(),
        source,
    })
}

/// Flat record for one district or circuit.
///
/// [`Region::new`] derives `slug` from `name`; records are not mutated after
/// loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Region {
    pub name: String,
    pub slug: String,
    pub geometry: Value,
    pub properties: Map<String, Value>,
}

impl Region {
    pub fn new(name: impl Into<String>, geometry: Value, properties: Map<String, Value>) -> Self {
        let name = name.into();
        let slug = slugify(&name);
        Self {
            name,
            slug,
            geometry,
            properties,
        }
    }
}

/// Map every feature into a [`Region`], preserving input order.
pub fn transform(collection: FeatureCollection, kind: RegionKind) -> Result<Vec<Region>, RegionError> {
    let key = kind.name_key();
    collection
        .features
        .into_iter()
        .enumerate()
        .map(|(index, feature)| -> Result<Region, RegionError> {
            let properties = feature.properties.unwrap_or_default();
            let name = properties
                .get(key)
                .and_then(Value::as_str)
                .ok_or(RegionError::MissingName { index, key })?
                .to_string();
            Ok(Region::new(name, feature.geometry, properties))
        })
        .collect()
}

/// Load a boundary file and transform it in one step.
pub fn load_regions(path: &Path, kind: RegionKind) -> Result<Vec<Region>, RegionError> {
    let regions = transform(FeatureCollection::from_path(path)?, kind)?;
    info!(kind = %kind, count = regions.len(), "loaded regions");
    Ok(regions)
}
