use serde::Deserialize;

/// Top-level configuration settings for the application.
///
/// Includes settings for the HTTP server, the broker connection, and the
/// purge loop.
#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub broker: BrokerSettings,
    pub purge: PurgeSettings,
}

/// Configuration settings for the server.
///
/// Defines the host and port the server will bind to.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Configuration settings for the broker connection.
///
/// The connection string follows the Service Bus format and is parsed once
/// at startup; see [`crate::config::ConnectionString`].
#[derive(Debug, Deserialize, Clone)]
pub struct BrokerSettings {
    pub connection_string: String,
}

/// Configuration settings for the purge drain loop.
///
/// Defaults to 100 messages per batch with a 1000 ms per-batch wait.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct PurgeSettings {
    pub batch_size: usize,
    pub wait_timeout_ms: u64,
}

/// Partial configuration settings loaded from files or environment.
///
/// Allows partial specification of settings. Missing values can be filled using defaults.
#[derive(Debug, Deserialize)]
pub struct PartialSettings {
    pub server: Option<PartialServerSettings>,
    pub broker: Option<PartialBrokerSettings>,
    pub purge: Option<PartialPurgeSettings>,
}

/// Partial server settings.
///
/// Used when loading server configuration from external sources with optional values.
#[derive(Debug, Deserialize)]
pub struct PartialServerSettings {
    pub host: Option<String>,
    pub port: Option<u16>,
}

/// Partial broker settings.
#[derive(Debug, Deserialize)]
pub struct PartialBrokerSettings {
    pub connection_string: Option<String>,
}

/// Partial purge settings.
#[derive(Debug, Deserialize)]
pub struct PartialPurgeSettings {
    pub batch_size: Option<usize>,
    pub wait_timeout_ms: Option<u64>,
}

impl Default for PurgeSettings {
    fn default() -> Self {
        Self {
            batch_size: 100,
            wait_timeout_ms: 1000,
        }
    }
}

/// Provides default values for `Settings`.
///
/// Ensures the application has sensible defaults if no configuration is
/// provided. The default connection string targets a local development
/// emulator.
impl Default for Settings {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            broker: BrokerSettings {
                connection_string: "Endpoint=sb://localhost:5672;\
                     SharedAccessKeyName=RootManageSharedAccessKey;\
                     SharedAccessKey=SAS_KEY_VALUE;UseDevelopmentEmulator=true;"
                    .to_string(),
            },
            purge: PurgeSettings::default(),
        }
    }
}
