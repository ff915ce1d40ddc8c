use thiserror::Error;

/// Failure of the remote data service or the geocoder. The `Display` text is
/// what the user is shown before being offered the saved snapshot.
#[derive(Debug, Error)]
pub enum RemoteError {
    #[error("Network request failed for {0}")]
    NetworkRequest(String, #[source] reqwest::Error),

    #[error("HTTP request failed for {url} with status {status}")]
    HttpStatus {
        url: String,
        status: reqwest::StatusCode,
        #[source]
        source: reqwest::Error,
    },

    #[error("Failed to parse response from {0}")]
    JsonParse(String, #[source] serde_json::Error),

    #[error("Nie znaleziono współrzędnych dla podanego adresu: {0}")]
    AddressNotFound(String),
}
