use std::time::Duration;
use thiserror::Error;
use tokio::runtime::Handle;

#[derive(Error, Debug)]
pub enum TransmitError {
    #[error("Invalid dump endpoint {0}: {1}")]
    InvalidEndpoint(String, String),
    #[error("Failed to create HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Dump transmission failed: {0}")]
    TransmissionFailed(String),
}

/// Outbound channel for serialized grid dumps.
///
/// Implementations must return immediately; the frame loop calls `send`
/// from inside a frame callback and never waits on the result.
pub trait Transmit {
    fn send(&self, payload: &str);
}

/// Builds the request URL for a dump, `{endpoint}?data={payload}`.
pub fn dump_url(endpoint: &str, payload: &str) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}data={}", endpoint, separator, payload)
}

/// Sends each dump as a GET request on a tokio runtime.
pub struct HttpTransmitter {
    endpoint: String,
    client: reqwest::Client,
    runtime: Handle,
}

impl HttpTransmitter {
    pub fn new(endpoint: &str, timeout: Duration, runtime: Handle) -> Result<Self, TransmitError> {
        reqwest::Url::parse(endpoint)
            .map_err(|e| TransmitError::InvalidEndpoint(endpoint.to_string(), e.to_string()))?;
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            endpoint: endpoint.to_string(),
            client,
            runtime,
        })
    }

    async fn request(client: reqwest::Client, url: String) -> Result<reqwest::StatusCode, TransmitError> {
        let response = client
            .get(&url)
            .send()
            .await
            .map_err(|e| TransmitError::TransmissionFailed(e.to_string()))?;
        let status = response.status();
        if status.is_success() {
            Ok(status)
        } else {
            Err(TransmitError::TransmissionFailed(format!("server answered {}", status)))
        }
    }
}

impl Transmit for HttpTransmitter {
    fn send(&self, payload: &str) {
        let url = dump_url(&self.endpoint, payload);
        let client = self.client.clone();
        self.runtime.spawn(async move {
            match Self::request(client, url.clone()).await {
                Ok(status) => log::info!("Requested data ({}): {}", status, url),
                Err(err) => log::warn!("{}", err),
            }
        });
    }
}

/// Used when no endpoint is configured; dumps only reach the log.
#[derive(Debug, Default)]
pub struct LogTransmitter;

impl Transmit for LogTransmitter {
    fn send(&self, payload: &str) {
        log::info!("Dump: {}", payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dump_url_appends_data_parameter() {
        assert_eq!(dump_url("http://10.0.0.2/", "1,2,3"), "http://10.0.0.2/?data=1,2,3");
        assert_eq!(dump_url("http://host/set?panel=1", "0"), "http://host/set?panel=1&data=0");
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = HttpTransmitter::new("not a url", Duration::from_secs(1), runtime.handle().clone());
        assert!(matches!(result, Err(TransmitError::InvalidEndpoint(..))));
    }

    #[test]
    fn valid_endpoint_builds_client() {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        let result = HttpTransmitter::new("http://127.0.0.1:9/", Duration::from_secs(1), runtime.handle().clone());
        assert!(result.is_ok());
    }

    #[test]
    fn unreachable_endpoint_fails_transmission() {
        let runtime = tokio::runtime::Builder::new_current_thread().enable_all().build().unwrap();
        let client = reqwest::Client::builder().timeout(Duration::from_secs(2)).build().unwrap();
        let url = dump_url("http://127.0.0.1:9/", "1");

        let result = runtime.block_on(HttpTransmitter::request(client, url));
        assert!(matches!(result, Err(TransmitError::TransmissionFailed(_))));
    }

    #[test]
    fn send_returns_without_waiting_for_the_request() {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .unwrap();
        let transmitter =
            HttpTransmitter::new("http://127.0.0.1:9/", Duration::from_secs(5), runtime.handle().clone()).unwrap();

        let start = std::time::Instant::now();
        transmitter.send("1,2,3");
        transmitter.send("4,5,6");
        assert!(start.elapsed() < Duration::from_secs(1));

        runtime.shutdown_timeout(Duration::from_secs(1));
    }
}
