/*
[INPUT]:  Wallet RPC credentials, port, timeouts and block polling options
[OUTPUT]: Configured reqwest client bound to the wallet's /rpc endpoint
[POS]:    HTTP layer - core client implementation
[UPDATE]: When adding connection options or changing client behavior
*/

use std::fmt;
use std::time::Duration;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use reqwest::{Client, Url};
use tracing::debug;

use crate::http::{BtsxError, Result};

const LOCAL_HOST: &str = "localhost";
const RPC_PATH: &str = "/rpc";

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Duration,
    pub connect_timeout: Duration,
    /// Delay between `get_info` polls while waiting for a block
    pub block_poll_interval: Duration,
    /// Upper bound for `wait_for_next_block`; `None` waits indefinitely
    pub max_block_wait: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(10),
            block_poll_interval: Duration::from_millis(100),
            max_block_wait: None,
        }
    }
}

/// Wallet RPC login
#[derive(Clone, PartialEq, Eq)]
pub struct RpcCredentials {
    pub user: String,
    pub password: String,
}

impl RpcCredentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user: user.into(),
            password: password.into(),
        }
    }

    /// Value of the HTTP Basic `Authorization` header
    pub fn basic_auth_header(&self) -> String {
        let token = STANDARD.encode(format!("{}:{}", self.user, self.password));
        format!("Basic {token}")
    }
}

impl fmt::Debug for RpcCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RpcCredentials")
            .field("user", &self.user)
            .field("password", &"***")
            .finish()
    }
}

/// JSON-RPC client for a local BTSX wallet daemon
#[derive(Debug)]
pub struct BtsxClient {
    http_client: Client,
    endpoint: Url,
    credentials: RpcCredentials,
    config: ClientConfig,
}

impl BtsxClient {
    /// Create a client for `http://localhost:<port>/rpc` with default configuration
    pub fn new(credentials: RpcCredentials, port: u16) -> Result<Self> {
        Self::with_config(ClientConfig::default(), credentials, port)
    }

    /// Create a client for `http://localhost:<port>/rpc` with custom configuration
    pub fn with_config(config: ClientConfig, credentials: RpcCredentials, port: u16) -> Result<Self> {
        let base = format!("http://{LOCAL_HOST}:{port}");
        Self::with_endpoint(config, credentials, &base)
    }

    /// Create a client against an arbitrary base URL; `/rpc` is appended
    pub fn with_endpoint(
        config: ClientConfig,
        credentials: RpcCredentials,
        base_url: &str,
    ) -> Result<Self> {
        if config.block_poll_interval.is_zero() {
            return Err(BtsxError::Config(
                "block_poll_interval must be non-zero".to_string(),
            ));
        }

        let http_client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()?;
        let endpoint = Url::parse(base_url)?.join(RPC_PATH)?;

        debug!(endpoint = %endpoint, user = %credentials.user, "wallet rpc client initialized");

        Ok(Self {
            http_client,
            endpoint,
            credentials,
            config,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub fn credentials(&self) -> &RpcCredentials {
        &self.credentials
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub(crate) fn http_client(&self) -> &Client {
        &self.http_client
    }
}
