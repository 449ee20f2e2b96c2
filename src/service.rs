use reqwest::{blocking::Client, StatusCode};

use crate::{
    debug,
    error::{AppError, Result},
    metadata::metadata_endpoint,
};

const USER_AGENT: &str = concat!("daily-background/", env!("CARGO_PKG_VERSION"));

/// The remote image-of-the-day service.
pub trait ImageService {
    fn fetch_metadata_json(&self) -> Result<String>;

    /// Whether `url` exists. Every failure reads as "not found".
    fn probe(&self, url: &str) -> bool;

    fn download(&self, url: &str) -> Result<Vec<u8>>;
}

pub struct BingClient {
    client: Client,
    endpoint: String,
}

impl BingClient {
    pub fn new(market: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::Network(e.to_string()))?;

        Ok(Self::with_client(client, metadata_endpoint(market)))
    }

    pub fn with_client(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }

    fn get_ok(&self, url: &str) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|e| AppError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(AppError::Network(format!(
                "GET {url} returned {}",
                response.status()
            )));
        }

        Ok(response)
    }
}

impl ImageService for BingClient {
    fn fetch_metadata_json(&self) -> Result<String> {
        debug!("GET {}", self.endpoint);
        self.get_ok(&self.endpoint)?
            .text()
            .map_err(|e| AppError::Network(e.to_string()))
    }

    fn probe(&self, url: &str) -> bool {
        match self.client.head(url).send() {
            Ok(response) => {
                debug!("HEAD {} -> {}", url, response.status());
                response.status() == StatusCode::OK
            }
            Err(e) => {
                debug!("HEAD {} failed: {}", url, e);
                false
            }
        }
    }

    fn download(&self, url: &str) -> Result<Vec<u8>> {
        debug!("GET {}", url);
        let bytes = self
            .get_ok(url)?
            .bytes()
            .map_err(|e| AppError::Network(e.to_string()))?;
        debug!("Downloaded {} bytes", bytes.len());
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io::{Read, Write},
        net::{SocketAddr, TcpListener},
        thread,
    };

    use super::*;

    /// Answers a single request on a loopback port with `status` and `body`.
    fn serve_once(status: &'static str, body: &'static [u8]) -> SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        thread::spawn(move || {
            let Ok((mut stream, _)) = listener.accept() else {
                return;
            };

            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => request.extend_from_slice(&buf[..n]),
                }
            }

            let head = format!(
                "HTTP/1.1 {status}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
                body.len()
            );
            let _ = stream.write_all(head.as_bytes());
            if !request.starts_with(b"HEAD") {
                let _ = stream.write_all(body);
            }
        });

        addr
    }

    fn client(endpoint: String) -> BingClient {
        let client = Client::builder().no_proxy().build().unwrap();
        BingClient::with_client(client, endpoint)
    }

    fn image_url(addr: SocketAddr) -> String {
        format!("http://{addr}/th?id=OHR.Sample_2560x1440.jpg")
    }

    #[test]
    fn existing_variant_is_found() {
        let addr = serve_once("200 OK", b"");
        assert!(client(String::new()).probe(&image_url(addr)));
    }

    #[test]
    fn missing_variant_is_not_found() {
        let addr = serve_once("404 Not Found", b"");
        assert!(!client(String::new()).probe(&image_url(addr)));
    }

    #[test]
    fn refused_connection_is_not_found() {
        let addr = TcpListener::bind("127.0.0.1:0").unwrap().local_addr().unwrap();
        assert!(!client(String::new()).probe(&image_url(addr)));
    }

    #[test]
    fn server_error_on_download_is_network_error() {
        let addr = serve_once("500 Internal Server Error", b"oops");
        let err = client(String::new()).download(&image_url(addr)).unwrap_err();
        match err {
            AppError::Network(msg) => assert!(msg.contains("500"), "{msg}"),
            other => panic!("expected network error, got {other:?}"),
        }
    }

    #[test]
    fn successful_download_returns_body() {
        let addr = serve_once("200 OK", b"\xff\xd8jpeg");
        let bytes = client(String::new()).download(&image_url(addr)).unwrap();
        assert_eq!(bytes, b"\xff\xd8jpeg");
    }

    #[test]
    fn metadata_json_is_returned_verbatim() {
        let addr = serve_once("200 OK", br#"{"images":[]}"#);
        let json = client(format!("http://{addr}/HPImageArchive.aspx"))
            .fetch_metadata_json()
            .unwrap();
        assert_eq!(json, r#"{"images":[]}"#);
    }

    #[test]
    fn missing_metadata_endpoint_is_network_error() {
        let addr = serve_once("404 Not Found", b"");
        let err = client(format!("http://{addr}/HPImageArchive.aspx"))
            .fetch_metadata_json()
            .unwrap_err();
        assert!(matches!(err, AppError::Network(_)));
    }
}
