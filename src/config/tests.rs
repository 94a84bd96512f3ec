use serial_test::serial;

use super::{ConnectionString, Settings, load_config};
use crate::utils::error::BrokerError;

#[test]
fn test_default_settings() {
    let settings = Settings::default();
    assert_eq!(settings.server.host, "127.0.0.1");
    assert_eq!(settings.server.port, 8080);
    assert_eq!(settings.purge.batch_size, 100);
    assert_eq!(settings.purge.wait_timeout_ms, 1000);
    assert!(
        settings
            .broker
            .connection_string
            .contains("UseDevelopmentEmulator=true")
    );
}

#[test]
#[serial]
fn load_config_falls_back_to_defaults() {
    temp_env::with_vars_unset(["SERVER__HOST", "SERVER__PORT"], || {
        let cfg = load_config().expect("load_config failed");
        assert_eq!(cfg.server.port, Settings::default().server.port);
        assert_eq!(cfg.purge.batch_size, 100);
    });
}

#[test]
#[serial]
fn load_config_reads_environment_overrides() {
    temp_env::with_vars(
        [
            ("SERVER__HOST", Some("0.0.0.0")),
            ("SERVER__PORT", Some("9000")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert_eq!(cfg.server.host, "0.0.0.0");
            assert_eq!(cfg.server.port, 9000);
        },
    );
}

#[test]
#[serial]
fn load_config_addresses_snake_case_keys_from_the_environment() {
    temp_env::with_vars(
        [
            (
                "BROKER__CONNECTION_STRING",
                Some("Endpoint=sb://remote;SharedAccessKeyName=K;SharedAccessKey=V;"),
            ),
            ("PURGE__BATCH_SIZE", Some("25")),
            ("PURGE__WAIT_TIMEOUT_MS", Some("50")),
        ],
        || {
            let cfg = load_config().expect("load_config failed");
            assert!(cfg.broker.connection_string.contains("sb://remote"));
            assert_eq!(cfg.purge.batch_size, 25);
            assert_eq!(cfg.purge.wait_timeout_ms, 50);
        },
    );
}

#[test]
fn connection_string_parses_the_emulator_default() {
    let parsed = ConnectionString::parse(&Settings::default().broker.connection_string)
        .expect("default connection string must parse");
    assert_eq!(parsed.host, "localhost");
    assert_eq!(parsed.port, Some(5672));
    assert_eq!(parsed.key_name, "RootManageSharedAccessKey");
    assert_eq!(parsed.key, "SAS_KEY_VALUE");
    assert!(parsed.use_development_emulator);
    assert_eq!(parsed.admin_endpoint(), "http://localhost:5300/");
    assert_eq!(parsed.endpoint(), "sb://localhost:5672");
}

#[test]
fn connection_string_without_port() {
    let parsed =
        ConnectionString::parse("Endpoint=sb://broker.internal;SharedAccessKeyName=K;SharedAccessKey=V")
            .unwrap();
    assert_eq!(parsed.host, "broker.internal");
    assert_eq!(parsed.port, None);
    assert!(!parsed.use_development_emulator);
    assert_eq!(parsed.endpoint(), "sb://broker.internal");
    assert_eq!(parsed.admin_endpoint(), "http://broker.internal:5300/");
}

#[test]
fn connection_string_keeps_padding_in_the_key() {
    let parsed =
        ConnectionString::parse("Endpoint=sb://h;SharedAccessKeyName=K;SharedAccessKey=abc==;")
            .unwrap();
    assert_eq!(parsed.key, "abc==");
}

#[test]
fn connection_string_missing_sas_pair_is_rejected() {
    let err = ConnectionString::parse("Endpoint=sb://localhost:5672;").unwrap_err();
    assert!(matches!(err, BrokerError::Validation(_)));

    let err =
        ConnectionString::parse("Endpoint=sb://localhost;SharedAccessKeyName=K;").unwrap_err();
    assert!(matches!(err, BrokerError::Validation(_)));
}

#[test]
fn connection_string_rejects_bad_endpoints() {
    assert!(matches!(
        ConnectionString::parse("SharedAccessKeyName=K;SharedAccessKey=V"),
        Err(BrokerError::Validation(_))
    ));
    assert!(matches!(
        ConnectionString::parse(
            "Endpoint=amqp://localhost;SharedAccessKeyName=K;SharedAccessKey=V"
        ),
        Err(BrokerError::Validation(_))
    ));
    assert!(matches!(
        ConnectionString::parse(
            "Endpoint=sb://localhost:notaport;SharedAccessKeyName=K;SharedAccessKey=V"
        ),
        Err(BrokerError::Validation(_))
    ));
}
