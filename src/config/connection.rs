use crate::utils::error::{BrokerError, BrokerResult};

/// A parsed broker connection string.
///
/// The wire format is a `;`-separated list of `Key=Value` pairs:
///
/// ```text
/// Endpoint=sb://localhost:5672;SharedAccessKeyName=Root;SharedAccessKey=abc;UseDevelopmentEmulator=true;
/// ```
///
/// Parsed once at process start and passed explicitly to whoever needs it;
/// it is never re-read per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionString {
    pub host: String,
    pub port: Option<u16>,
    pub key_name: String,
    pub key: String,
    pub use_development_emulator: bool,
}

/// Fixed HTTP port the emulator's administration API listens on.
const EMULATOR_ADMIN_PORT: u16 = 5300;

impl ConnectionString {
    /// Parses a connection string, requiring the endpoint and the shared
    /// access key pair.
    pub fn parse(raw: &str) -> BrokerResult<Self> {
        let mut endpoint = None;
        let mut key_name = None;
        let mut key = None;
        let mut use_development_emulator = false;

        for pair in raw.split(';') {
            let Some((k, v)) = pair.split_once('=') else {
                continue;
            };
            match k.trim() {
                "Endpoint" => endpoint = Some(v.trim().to_string()),
                "SharedAccessKeyName" => key_name = Some(v.trim().to_string()),
                // The key itself may contain '=' padding; split_once keeps it.
                "SharedAccessKey" => key = Some(v.trim().to_string()),
                "UseDevelopmentEmulator" => {
                    use_development_emulator = v.trim().eq_ignore_ascii_case("true")
                }
                _ => {}
            }
        }

        let endpoint = endpoint.ok_or_else(|| {
            BrokerError::validation("connection string is missing an Endpoint")
        })?;
        let key_name = key_name.ok_or_else(|| {
            BrokerError::validation("connection string is missing SharedAccessKeyName")
        })?;
        let key = key.ok_or_else(|| {
            BrokerError::validation("connection string is missing SharedAccessKey")
        })?;

        let host_with_port = endpoint
            .strip_prefix("sb://")
            .ok_or_else(|| {
                BrokerError::validation("connection string Endpoint must use the sb:// scheme")
            })?
            .trim_end_matches('/');

        let (host, port) = match host_with_port.split_once(':') {
            Some((host, port)) => {
                let port = port.parse::<u16>().map_err(|_| {
                    BrokerError::validation(format!(
                        "invalid port '{port}' in connection string Endpoint"
                    ))
                })?;
                (host.to_string(), Some(port))
            }
            None => (host_with_port.to_string(), None),
        };
        if host.is_empty() {
            return Err(BrokerError::validation(
                "connection string Endpoint has no host",
            ));
        }

        Ok(Self {
            host,
            port,
            key_name,
            key,
            use_development_emulator,
        })
    }

    /// The HTTP administration endpoint of the development emulator,
    /// derived from the endpoint host.
    pub fn admin_endpoint(&self) -> String {
        format!("http://{}:{}/", self.host, EMULATOR_ADMIN_PORT)
    }

    /// The AMQP endpoint in `sb://` form.
    pub fn endpoint(&self) -> String {
        match self.port {
            Some(port) => format!("sb://{}:{}", self.host, port),
            None => format!("sb://{}", self.host),
        }
    }
}
