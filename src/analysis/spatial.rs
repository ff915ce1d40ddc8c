//! Narrowing the station list for display, either by distance from a point
//! or by a name fragment. Both filters keep the original order.

use crate::analysis::geo::distance_km;
use crate::types::station::{LatLon, Station};

/// Stations whose haversine distance from `center` is at most `radius_km`.
///
/// The boundary is inclusive, so a radius of `0.0` keeps only stations located
/// exactly at `center`. The radius is expected to be validated by the caller
/// (see [`crate::parse_radius`]).
///
/// # Examples
///
/// ```
/// use airquality::{within_radius, LatLon, Station};
///
/// let stations = vec![
///     Station::new(1, "Poznań, ul. Polanka", 52.4200, 16.9500),
///     Station::new(2, "Gdańsk, ul. Leczkowa", 54.3800, 18.6200),
/// ];
/// let near = within_radius(&stations, LatLon(52.4064, 16.9252), 10.0);
/// assert_eq!(near.len(), 1);
/// assert_eq!(near[0].id, 1);
/// ```
pub fn within_radius(stations: &[Station], center: LatLon, radius_km: f64) -> Vec<Station> {
    stations
        .iter()
        .filter(|station| {
            distance_km(center.0, center.1, station.latitude, station.longitude) <= radius_km
        })
        .cloned()
        .collect()
}

/// Stations whose name contains `text`, ignoring case. An empty `text`
/// matches every station.
pub fn filter_by_name(stations: &[Station], text: &str) -> Vec<Station> {
    let needle = text.to_lowercase();
    stations
        .iter()
        .filter(|station| station.name.to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stations() -> Vec<Station> {
        vec![
            Station::new(114, "Wrocław, ul. Bartnicza", 51.1158, 17.1413),
            Station::new(944, "Poznań, ul. Polanka", 52.4200, 16.9500),
            Station::new(117, "Wrocław, ul. Wiśniowa", 51.0860, 17.0120),
            Station::new(400, "Warszawa, al. Niepodległości", 52.2190, 21.0048),
        ]
    }

    #[test]
    fn test_within_radius_matches_distance_and_keeps_order() {
        let all = stations();
        let center = LatLon(51.1079, 17.0385); // Wrocław market square
        let radius = 10.0;

        let found = within_radius(&all, center, radius);
        let expected: Vec<i64> = all
            .iter()
            .filter(|s| distance_km(center.0, center.1, s.latitude, s.longitude) <= radius)
            .map(|s| s.id)
            .collect();

        let ids: Vec<i64> = found.iter().map(|s| s.id).collect();
        assert_eq!(ids, expected);
        assert_eq!(ids, vec![114, 117]);
    }

    #[test]
    fn test_zero_radius_keeps_only_coincident_points() {
        let all = stations();
        let found = within_radius(&all, all[1].location(), 0.0);
        assert_eq!(found, vec![all[1].clone()]);
    }

    #[test]
    fn test_nothing_in_range_is_empty() {
        let found = within_radius(&stations(), LatLon(0.0, 160.0), 50.0);
        assert!(found.is_empty());
    }

    #[test]
    fn test_filter_by_name_is_case_insensitive() {
        let ids: Vec<i64> = filter_by_name(&stations(), "WROCŁAW")
            .iter()
            .map(|s| s.id)
            .collect();
        assert_eq!(ids, vec![114, 117]);
        assert_eq!(filter_by_name(&stations(), "").len(), 4);
        assert!(filter_by_name(&stations(), "Kraków").is_empty());
    }
}
