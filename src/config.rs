//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;

/// Default cap on paste content size in bytes.
pub const DEFAULT_MAX_CONTENT_BYTES: usize = 1024 * 1024; // 1 MB

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Origin used to build shareable paste URLs, without trailing slash
    pub base_url: String,
    /// Whether the `x-test-now-ms` header may override the clock
    pub test_mode: bool,
    /// Background TTL reaper interval in seconds
    pub cleanup_interval: u64,
    /// Upper bound on a single store round trip in milliseconds
    pub request_timeout_ms: u64,
    /// Maximum accepted paste content size in bytes
    pub max_content_bytes: usize,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `PUBLIC_BASE_URL` - Origin for paste URLs (default: `http://localhost:{port}`)
    /// - `TEST_MODE` - `1` enables the test clock header (default: off)
    /// - `CLEANUP_INTERVAL` - TTL reaper frequency in seconds (default: 1)
    /// - `REQUEST_TIMEOUT_MS` - Store round trip timeout (default: 5000)
    /// - `MAX_CONTENT_BYTES` - Content size cap (default: 1 MB)
    pub fn from_env() -> Self {
        let server_port = env::var("SERVER_PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3000);

        Self {
            server_port,
            base_url: env::var("PUBLIC_BASE_URL")
                .ok()
                .map(|v| v.trim().trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| local_base_url(server_port)),
            test_mode: env::var("TEST_MODE").map(|v| v == "1").unwrap_or(false),
            cleanup_interval: env::var("CLEANUP_INTERVAL")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(1),
            request_timeout_ms: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            max_content_bytes: env::var("MAX_CONTENT_BYTES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_MAX_CONTENT_BYTES),
        }
    }
}

fn local_base_url(port: u16) -> String {
    format!("http://localhost:{}", port)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            base_url: local_base_url(3000),
            test_mode: false,
            cleanup_interval: 1,
            request_timeout_ms: 5000,
            max_content_bytes: DEFAULT_MAX_CONTENT_BYTES,
        }
    }
}
