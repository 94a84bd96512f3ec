mod connection;
mod settings;

use crate::config::settings::PartialSettings;
use config::{Config, ConfigError, Environment, File};

pub use connection::ConnectionString;
pub use settings::{BrokerSettings, PurgeSettings, ServerSettings, Settings};

/// Loads the configuration from the default file and environment variables
/// Merges the configuration with default values
/// Returns a `Settings` struct containing the server, broker, and purge
/// configurations
pub fn load_config() -> Result<Settings, ConfigError> {
    let builder = Config::builder()
        .add_source(File::with_name("config/default").required(false))
        // Double underscore so snake_case keys like broker.connection_string
        // stay addressable from the environment (BROKER__CONNECTION_STRING).
        .add_source(Environment::default().separator("__"));

    let config = builder.build()?;

    // Try to deserialize what is available
    let partial: PartialSettings = config.try_deserialize()?;

    // Merge with defaults
    let default = Settings::default();

    Ok(Settings {
        server: ServerSettings {
            host: partial
                .server
                .as_ref()
                .and_then(|s| s.host.clone())
                .unwrap_or(default.server.host),
            port: partial
                .server
                .as_ref()
                .and_then(|s| s.port)
                .unwrap_or(default.server.port),
        },
        broker: BrokerSettings {
            connection_string: partial
                .broker
                .as_ref()
                .and_then(|b| b.connection_string.clone())
                .unwrap_or(default.broker.connection_string),
        },
        purge: PurgeSettings {
            batch_size: partial
                .purge
                .as_ref()
                .and_then(|p| p.batch_size)
                .unwrap_or(default.purge.batch_size),
            wait_timeout_ms: partial
                .purge
                .as_ref()
                .and_then(|p| p.wait_timeout_ms)
                .unwrap_or(default.purge.wait_timeout_ms),
        },
    })
}

#[cfg(test)]
mod tests;
