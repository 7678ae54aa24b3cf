//! Static JMA area dataset and center/office grouping.

use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, WeatherError};
use crate::types::{Area, AreaKind};

#[derive(Debug, Deserialize)]
struct RawDataset {
    #[serde(default)]
    centers: Map<String, Value>,
    #[serde(default)]
    offices: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct RawArea {
    name: String,
    #[serde(default)]
    parent: Option<String>,
}

/// Centers and offices in dataset order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaDataset {
    pub centers: Vec<Area>,
    pub offices: Vec<Area>,
}

impl AreaDataset {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(WeatherError::DatasetNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };
        let dataset = Self::from_json(&text)?;
        tracing::info!(
            "Loaded area dataset from {:?}: {} centers, {} offices",
            path,
            dataset.centers.len(),
            dataset.offices.len()
        );
        Ok(dataset)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let raw: RawDataset =
            serde_json::from_str(text).map_err(|e| WeatherError::DatasetMalformed(e.to_string()))?;

        let centers = raw
            .centers
            .into_iter()
            .map(|(code, value)| {
                let entry = parse_entry(&code, value)?;
                Ok(Area::center(&code, &entry.name))
            })
            .collect::<Result<Vec<_>>>()?;

        let offices = raw
            .offices
            .into_iter()
            .map(|(code, value)| {
                let entry = parse_entry(&code, value)?;
                Ok(Area::office(&code, &entry.name, entry.parent.as_deref()))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { centers, offices })
    }

    /// Centers followed by offices.
    pub fn areas(&self) -> impl Iterator<Item = &Area> {
        self.centers.iter().chain(self.offices.iter())
    }

    pub fn to_vec(&self) -> Vec<Area> {
        self.areas().cloned().collect()
    }

    pub fn is_empty(&self) -> bool {
        self.centers.is_empty() && self.offices.is_empty()
    }
}

fn parse_entry(code: &str, value: Value) -> Result<RawArea> {
    serde_json::from_value(value)
        .map_err(|e| WeatherError::DatasetMalformed(format!("area {}: {}", code, e)))
}

/// A center with the offices that belong to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaGroup {
    pub center: Area,
    pub offices: Vec<Area>,
}

/// Ordered center groups, the shape the area picker is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AreaGroups {
    groups: Vec<AreaGroup>,
}

impl AreaGroups {
    pub fn get(&self, center_code: &str) -> Option<&AreaGroup> {
        self.groups.iter().find(|g| g.center.code == center_code)
    }

    /// Look up a grouped office by code.
    pub fn office(&self, code: &str) -> Option<&Area> {
        self.groups
            .iter()
            .flat_map(|g| g.offices.iter())
            .find(|o| o.code == code)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AreaGroup> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl<'a> IntoIterator for &'a AreaGroups {
    type Item = &'a AreaGroup;
    type IntoIter = std::slice::Iter<'a, AreaGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}

/// Group offices under their parent centers.
///
/// Centers keep input order and each center's offices keep input order.
/// Offices without a parent, or whose parent is not a center in `areas`,
/// are left out.
pub fn group_by_center(areas: &[Area]) -> AreaGroups {
    let mut groups: Vec<AreaGroup> = areas
        .iter()
        .filter(|a| a.kind == AreaKind::Center)
        .map(|center| AreaGroup {
            center: center.clone(),
            offices: Vec::new(),
        })
        .collect();

    let mut orphans = 0usize;
    for office in areas.iter().filter(|a| a.kind == AreaKind::Office) {
        let group = office
            .parent_code
            .as_deref()
            .and_then(|parent| groups.iter_mut().find(|g| g.center.code == parent));
        match group {
            Some(group) => group.offices.push(office.clone()),
            None => orphans += 1,
        }
    }

    if orphans > 0 {
        tracing::debug!("Omitted {} offices without a known center", orphans);
    }

    AreaGroups { groups }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use std::io::Write;

    const DATASET: &str = r#"{
        "centers": {
            "010300": {"name": "Kanto Koshin", "officeName": "JMA", "children": ["130000"]},
            "010100": {"name": "Hokkaido", "children": ["014100"]}
        },
        "offices": {
            "130000": {"name": "Tokyo", "parent": "010300"},
            "014100": {"name": "Kushiro", "parent": "010100"},
            "140000": {"name": "Kanagawa", "parent": "010300"},
            "999999": {"name": "Nowhere", "parent": "000000"}
        },
        "class10s": {}
    }"#;

    #[test]
    fn test_from_json_preserves_order() {
        let dataset = AreaDataset::from_json(DATASET).unwrap();
        let centers: Vec<_> = dataset.centers.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(centers, ["010300", "010100"]);
        let offices: Vec<_> = dataset.offices.iter().map(|a| a.code.as_str()).collect();
        assert_eq!(offices, ["130000", "014100", "140000", "999999"]);
        assert_eq!(dataset.offices[0].parent_code.as_deref(), Some("010300"));
    }

    #[test]
    fn test_from_json_malformed() {
        assert!(matches!(
            AreaDataset::from_json("{not json"),
            Err(WeatherError::DatasetMalformed(_))
        ));
        assert!(matches!(
            AreaDataset::from_json(r#"{"centers": {"1": {"parent": "x"}}}"#),
            Err(WeatherError::DatasetMalformed(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(DATASET.as_bytes()).unwrap();

        let dataset = AreaDataset::from_path(file.path()).unwrap();
        assert_eq!(dataset.centers.len(), 2);

        let missing = file.path().with_extension("missing");
        assert!(matches!(
            AreaDataset::from_path(&missing),
            Err(WeatherError::DatasetNotFound(p)) if p == missing
        ));
    }

    #[test]
    fn test_group_by_center() {
        let dataset = AreaDataset::from_json(DATASET).unwrap();
        let groups = group_by_center(&dataset.to_vec());

        assert_eq!(groups.len(), 2);
        let kanto = groups.get("010300").unwrap();
        let names: Vec<_> = kanto.offices.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, ["Tokyo", "Kanagawa"]);

        assert_eq!(groups.office("014100").unwrap().name, "Kushiro");
        assert!(groups.office("999999").is_none());
    }

    #[test]
    fn test_group_by_center_omits_orphans() {
        let areas = vec![
            Area::center("A", "Center A"),
            Area::office("X", "Orphan", Some("B")),
            Area::office("Y", "No parent", None),
        ];
        let groups = group_by_center(&areas);
        assert_eq!(groups.len(), 1);
        assert!(groups.get("A").unwrap().offices.is_empty());
        assert_eq!(groups.iter().map(|g| g.offices.len()).sum::<usize>(), 0);
    }
}
