//! The remote data source: the trait the rest of the crate fetches through, and
//! its HTTP implementation for the GIOŚ API with Nominatim geocoding.

use crate::remote::error::RemoteError;
use crate::remote::wire::{GeocodeHitDto, SensorDataDto, SensorDto, StationDto};
use crate::types::measurement::Measurement;
use crate::types::sensor::Sensor;
use crate::types::station::{LatLon, Station};
use log::{info, warn};
use reqwest::header::USER_AGENT;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::future::Future;

pub const DEFAULT_API_URL: &str = "https://api.gios.gov.pl/pjp-api/rest";
pub const DEFAULT_GEOCODE_URL: &str = "https://nominatim.openstreetmap.org";
const GEOCODE_USER_AGENT: &str = "AirQualityMonitor/1.0";

/// Something that can supply stations, sensors, measurements and coordinates.
///
/// Every call either returns the complete collection or an error; partial
/// results are never produced.
pub trait AirQualitySource {
    fn fetch_stations(&self) -> impl Future<Output = Result<Vec<Station>, RemoteError>> + Send;

    fn fetch_sensors(
        &self,
        station_id: i64,
    ) -> impl Future<Output = Result<Vec<Sensor>, RemoteError>> + Send;

    fn fetch_measurements(
        &self,
        sensor_id: i64,
    ) -> impl Future<Output = Result<Vec<Measurement>, RemoteError>> + Send;

    /// Resolves a free-text address to the coordinates of its first match.
    fn geocode(&self, address: &str) -> impl Future<Output = Result<LatLon, RemoteError>> + Send;
}

#[derive(Debug, Clone)]
pub struct GiosClient {
    api_url: String,
    geocode_url: String,
    http: Client,
}

impl Default for GiosClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GiosClient {
    pub fn new() -> Self {
        Self::with_base_urls(DEFAULT_API_URL, DEFAULT_GEOCODE_URL)
    }

    /// Points the client at other hosts, e.g. a mirror or a local test server.
    pub fn with_base_urls(api_url: impl Into<String>, geocode_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            geocode_url: geocode_url.into().trim_end_matches('/').to_string(),
            http: Client::new(),
        }
    }

    fn stations_url(&self) -> String {
        format!("{}/station/findAll", self.api_url)
    }

    fn sensors_url(&self, station_id: i64) -> String {
        format!("{}/station/sensors/{}", self.api_url, station_id)
    }

    fn measurements_url(&self, sensor_id: i64) -> String {
        format!("{}/data/getData/{}", self.api_url, sensor_id)
    }

    fn geocode_search_url(&self) -> String {
        format!("{}/search", self.geocode_url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        url: &str,
    ) -> Result<T, RemoteError> {
        info!("Requesting {}", url);
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::NetworkRequest(url.to_string(), e))?;

        let response = match response.error_for_status() {
            Ok(resp) => resp,
            Err(e) => {
                warn!("HTTP error for {}: {:?}", url, e);
                return Err(if let Some(status) = e.status() {
                    RemoteError::HttpStatus {
                        url: url.to_string(),
                        status,
                        source: e,
                    }
                } else {
                    RemoteError::NetworkRequest(url.to_string(), e)
                });
            }
        };

        let bytes = response
            .bytes()
            .await
            .map_err(|e| RemoteError::NetworkRequest(url.to_string(), e))?;
        serde_json::from_slice(&bytes).map_err(|e| RemoteError::JsonParse(url.to_string(), e))
    }
}

impl AirQualitySource for GiosClient {
    async fn fetch_stations(&self) -> Result<Vec<Station>, RemoteError> {
        let url = self.stations_url();
        let dtos: Vec<StationDto> = self.get_json(self.http.get(&url), &url).await?;
        info!("Fetched {} stations", dtos.len());
        Ok(dtos.into_iter().map(Station::from).collect())
    }

    async fn fetch_sensors(&self, station_id: i64) -> Result<Vec<Sensor>, RemoteError> {
        let url = self.sensors_url(station_id);
        let dtos: Vec<SensorDto> = self.get_json(self.http.get(&url), &url).await?;
        info!("Fetched {} sensors for station {}", dtos.len(), station_id);
        Ok(dtos.into_iter().map(Sensor::from).collect())
    }

    async fn fetch_measurements(&self, sensor_id: i64) -> Result<Vec<Measurement>, RemoteError> {
        let url = self.measurements_url(sensor_id);
        let dto: SensorDataDto = self.get_json(self.http.get(&url), &url).await?;
        let measurements = dto.into_measurements();
        info!(
            "Fetched {} measurements for sensor {}",
            measurements.len(),
            sensor_id
        );
        Ok(measurements)
    }

    async fn geocode(&self, address: &str) -> Result<LatLon, RemoteError> {
        let url = self.geocode_search_url();
        let request = self
            .http
            .get(&url)
            .query(&[("q", address), ("format", "json"), ("limit", "1")])
            .header(USER_AGENT, GEOCODE_USER_AGENT);
        let hits: Vec<GeocodeHitDto> = self.get_json(request, &url).await?;
        hits.first()
            .map(LatLon::from)
            .ok_or_else(|| RemoteError::AddressNotFound(address.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls() {
        let client = GiosClient::with_base_urls("http://localhost:8080/rest/", "http://geo/");
        assert_eq!(client.stations_url(), "http://localhost:8080/rest/station/findAll");
        assert_eq!(client.sensors_url(944), "http://localhost:8080/rest/station/sensors/944");
        assert_eq!(
            client.measurements_url(642),
            "http://localhost:8080/rest/data/getData/642"
        );
        assert_eq!(client.geocode_search_url(), "http://geo/search");
    }

    #[test]
    fn test_default_client_targets_gios() {
        let client = GiosClient::default();
        assert_eq!(
            client.stations_url(),
            "https://api.gios.gov.pl/pjp-api/rest/station/findAll"
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_a_network_error() {
        // Port 9 (discard) is not expected to accept HTTP connections.
        let client = GiosClient::with_base_urls("http://127.0.0.1:9", "http://127.0.0.1:9");
        let err = client.fetch_stations().await.unwrap_err();
        assert!(matches!(err, RemoteError::NetworkRequest(..)), "got {err:?}");
    }
}
