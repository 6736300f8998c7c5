//! EPSG code constants and UTM zone helpers

/// Geodetic WGS84 (longitude/latitude in degrees)
pub const WGS84: u16 = 4326;

/// Spherical Web Mercator
pub const WEB_MERCATOR: u16 = 3857;

/// Base code for UTM north zones: 32601..=32660 map to zones 1..=60
pub const UTM_NORTH_BASE: u16 = 32600;

/// Base code for UTM south zones: 32701..=32760 map to zones 1..=60
pub const UTM_SOUTH_BASE: u16 = 32700;

/// Decodes an EPSG code into a UTM zone number and hemisphere
///
/// Returns `(zone, south)` for codes in the two UTM/WGS84 bands, `None`
/// otherwise.
pub fn utm_zone(code: u16) -> Option<(u8, bool)> {
    match code {
        32601..=32660 => Some(((code - UTM_NORTH_BASE) as u8, false)),
        32701..=32760 => Some(((code - UTM_SOUTH_BASE) as u8, true)),
        _ => None,
    }
}

/// Builds the PROJ definition for a UTM zone (WGS84 spheroid, meters)
pub fn utm_crs_definition(zone: u8, south: bool) -> String {
    let hemisphere = if south { " +south" } else { "" };
    format!(
        "+proj=utm +zone={}{} +ellps=WGS84 +units=m +no_defs +type=crs",
        zone, hemisphere
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utm_zone_north() {
        assert_eq!(utm_zone(32601), Some((1, false)));
        assert_eq!(utm_zone(32633), Some((33, false)));
        assert_eq!(utm_zone(32660), Some((60, false)));
    }

    #[test]
    fn test_utm_zone_south() {
        assert_eq!(utm_zone(32701), Some((1, true)));
        assert_eq!(utm_zone(32756), Some((56, true)));
    }

    #[test]
    fn test_non_utm_codes() {
        assert_eq!(utm_zone(WGS84), None);
        assert_eq!(utm_zone(WEB_MERCATOR), None);
        assert_eq!(utm_zone(32600), None);
        assert_eq!(utm_zone(32661), None);
        assert_eq!(utm_zone(32761), None);
    }

    #[test]
    fn test_utm_crs_definition() {
        let north = utm_crs_definition(33, false);
        assert!(north.contains("+proj=utm"));
        assert!(north.contains("+zone=33"));
        assert!(!north.contains("+south"));

        let south = utm_crs_definition(56, true);
        assert!(south.contains("+zone=56"));
        assert!(south.contains("+south"));
    }
}
