//! Detailed zone to aggregate region lookup.

use std::collections::BTreeMap;

use crate::error::{ModelError, Result};

const DEFAULT_REGIONS: &[(&str, &[&str])] = &[
    ("WECC", &["BASN", "CANO", "CASO", "NWPP", "SRSG", "RMRG"]),
    ("TRE", &["TRE", "TRE_WEST"]),
    ("SPP", &["SPPC", "SPPN", "SPPS"]),
    ("MISO", &["MISC", "MISE", "MISS", "MISW", "SRCE"]),
    ("PJM", &["PJMC", "PJMW", "PJME", "PJMD"]),
    ("SOU", &["SRSE", "SRCA", "FRCC"]),
    ("NE", &["ISNE", "NYUP", "NYCW"]),
];

/// The built-in region groups for the 26-zone CONUS setup.
pub fn default_region_groups() -> BTreeMap<String, Vec<String>> {
    DEFAULT_REGIONS
        .iter()
        .map(|(region, zones)| {
            (
                (*region).to_string(),
                zones.iter().map(|zone| (*zone).to_string()).collect(),
            )
        })
        .collect()
}

/// Reverse index of a one-to-many region configuration.
///
/// Every zone maps to exactly one region; building from a configuration that
/// lists a zone under two regions fails instead of letting one silently win.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionMap {
    zone_to_region: BTreeMap<String, String>,
}

impl RegionMap {
    /// Builds the reverse map from `region -> zones` groups.
    ///
    /// Listing the same zone twice under one region is harmless; listing it
    /// under two different regions returns [`ModelError::DuplicateZone`].
    pub fn from_groups<'a, I>(groups: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a String, &'a Vec<String>)>,
    {
        let mut zone_to_region: BTreeMap<String, String> = BTreeMap::new();
        for (region, zones) in groups {
            for zone in zones {
                match zone_to_region.get(zone) {
                    Some(existing) if existing != region => {
                        return Err(ModelError::DuplicateZone {
                            zone: zone.clone(),
                            first: existing.clone(),
                            second: region.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        zone_to_region.insert(zone.clone(), region.clone());
                    }
                }
            }
        }
        Ok(Self { zone_to_region })
    }

    /// Region for a detailed zone; `None` when the zone is unmapped.
    pub fn region_for(&self, zone: &str) -> Option<&str> {
        self.zone_to_region.get(zone).map(String::as_str)
    }

    /// Distinct region names, sorted.
    pub fn regions(&self) -> Vec<&str> {
        let mut regions: Vec<&str> = self.zone_to_region.values().map(String::as_str).collect();
        regions.sort_unstable();
        regions.dedup();
        regions
    }

    /// Zones assigned to one region, sorted.
    pub fn zones_in(&self, region: &str) -> Vec<&str> {
        self.zone_to_region
            .iter()
            .filter(|(_, r)| r.as_str() == region)
            .map(|(zone, _)| zone.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.zone_to_region.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zone_to_region.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn groups(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
        entries
            .iter()
            .map(|(r, zs)| (r.to_string(), zs.iter().map(|z| z.to_string()).collect()))
            .collect()
    }

    #[test]
    fn test_default_map_is_injective() {
        let map = RegionMap::from_groups(&default_region_groups()).unwrap();
        assert_eq!(map.len(), 26);
        assert_eq!(map.region_for("CASO"), Some("WECC"));
        assert_eq!(map.region_for("TRE_WEST"), Some("TRE"));
        assert_eq!(map.regions().len(), 7);
    }

    #[test]
    fn test_unmapped_zone_is_none() {
        let map = RegionMap::from_groups(&default_region_groups()).unwrap();
        assert_eq!(map.region_for("MEXICO"), None);
    }

    #[test]
    fn test_duplicate_zone_is_rejected() {
        let result = RegionMap::from_groups(&groups(&[("EAST", &["A", "B"]), ("WEST", &["B"])]));
        match result {
            Err(ModelError::DuplicateZone {
                zone,
                first,
                second,
            }) => {
                assert_eq!(zone, "B");
                assert_eq!(first, "EAST");
                assert_eq!(second, "WEST");
            }
            other => panic!("expected duplicate zone error, got {other:?}"),
        }
    }

    #[test]
    fn test_repeated_zone_in_same_region_is_allowed() {
        let map = RegionMap::from_groups(&groups(&[("EAST", &["A", "A"])])).unwrap();
        assert_eq!(map.zones_in("EAST"), vec!["A"]);
    }
}
