//! Response shapes of the GIOŚ air-quality API and the Nominatim geocoder, and
//! their conversion into the crate's records.

use crate::types::measurement::{Measurement, MISSING_VALUE};
use crate::types::sensor::Sensor;
use crate::types::station::{LatLon, Station};
use chrono::NaiveDateTime;
use log::warn;
use serde::Deserialize;

/// Entry of `station/findAll`. Coordinates arrive as numeric strings.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationDto {
    pub id: i64,
    pub station_name: String,
    pub gegr_lat: String,
    pub gegr_lon: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamDto {
    pub param_name: String,
}

/// Entry of `station/sensors/{id}`.
#[derive(Debug, Deserialize)]
pub struct SensorDto {
    pub id: i64,
    pub param: ParamDto,
}

/// Body of `data/getData/{id}`.
#[derive(Debug, Deserialize)]
pub struct SensorDataDto {
    pub key: String,
    #[serde(default)]
    pub values: Vec<ValueDto>,
}

#[derive(Debug, Deserialize)]
pub struct ValueDto {
    pub date: String,
    pub value: Option<f64>,
}

/// Entry of a Nominatim `search` response.
#[derive(Debug, Deserialize)]
pub struct GeocodeHitDto {
    pub lat: String,
    pub lon: String,
}

/// Unparseable coordinate strings become 0.0, like the service's own clients do.
fn parse_coordinate(raw: &str) -> f64 {
    raw.trim().parse().unwrap_or_else(|_| {
        warn!("Unparseable coordinate '{}', using 0.0", raw);
        0.0
    })
}

/// Accepts `2025-04-10T12:00:00` as well as the API's `2025-04-10 12:00:00`.
fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S"))
        .ok()
}

impl From<StationDto> for Station {
    fn from(dto: StationDto) -> Self {
        Station {
            id: dto.id,
            name: dto.station_name,
            latitude: parse_coordinate(&dto.gegr_lat),
            longitude: parse_coordinate(&dto.gegr_lon),
        }
    }
}

impl From<SensorDto> for Sensor {
    fn from(dto: SensorDto) -> Self {
        Sensor {
            id: dto.id,
            param_name: dto.param.param_name,
        }
    }
}

impl SensorDataDto {
    /// Converts the values in response order. A `null` value becomes
    /// [`MISSING_VALUE`]; an entry without a readable date is dropped.
    pub fn into_measurements(self) -> Vec<Measurement> {
        let key = self.key;
        self.values
            .into_iter()
            .filter_map(|v| {
                let Some(date_time) = parse_timestamp(&v.date) else {
                    warn!("Dropping {} value with unreadable date '{}'", key, v.date);
                    return None;
                };
                Some(Measurement::new(
                    key.clone(),
                    v.value.unwrap_or(MISSING_VALUE),
                    date_time,
                ))
            })
            .collect()
    }
}

impl From<&GeocodeHitDto> for LatLon {
    fn from(hit: &GeocodeHitDto) -> Self {
        LatLon(parse_coordinate(&hit.lat), parse_coordinate(&hit.lon))
    }
}
