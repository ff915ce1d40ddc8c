/// π truncated to 12 decimals. Distances are expected to match the values the
/// monitoring client has always produced, so `std::f64::consts::PI` is not used.
#[allow(clippy::approx_constant)]
const PI: f64 = 3.141592653589;
const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance in kilometers between two points given in decimal
/// degrees, using the haversine formula on a spherical Earth.
///
/// Inputs are not validated; out-of-range coordinates give an unspecified result.
///
/// # Examples
///
/// ```
/// use airquality::distance_km;
///
/// let d = distance_km(0.0, 0.0, 1.0, 1.0);
/// assert!((d - 157.0).abs() < 1.0);
/// ```
pub fn distance_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1 = lat1 * PI / 180.0;
    let lon1 = lon1 * PI / 180.0;
    let lat2 = lat2 * PI / 180.0;
    let lon2 = lon2 * PI / 180.0;

    let d_lat = lat2 - lat1;
    let d_lon = lon2 - lon1;

    let a = (d_lat / 2.0).sin() * (d_lat / 2.0).sin()
        + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin() * (d_lon / 2.0).sin();
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}
