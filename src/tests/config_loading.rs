// Config loading from YAML files and from the environment.

#[cfg(test)]
mod test {
    use std::io::Write;

    use serial_test::serial;
    use tempfile::NamedTempFile;

    use crate::config::credentials::Credential;
    use crate::config::proc_loader::{env_to_config, file_to_config};
    use crate::utils::config_loader;

    fn write_yaml(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    #[serial]
    async fn file_config_expands_placeholders_and_applies_defaults() {
        std::env::set_var("PAYPAL_GATEWAY_TEST_SECRET", "from-env");
        let file = write_yaml(
            r#"
settings:
  safety_margin_seconds: 300
  server:
    host: "127.0.0.1"
    port: "${PAYPAL_GATEWAY_TEST_PORT:9090}"
paypal:
  base_url: "https://api-m.paypal.com/"
  client_id: "id"
  client_secret: "${PAYPAL_GATEWAY_TEST_SECRET}"
"#,
        );

        let config = file_to_config(file.path()).await.unwrap();
        std::env::remove_var("PAYPAL_GATEWAY_TEST_SECRET");

        assert_eq!(config.settings.safety_margin_seconds(), 300);
        assert_eq!(config.settings.refresh_interval_seconds(), 60);
        assert_eq!(config.settings.http_timeout_seconds(), 30);
        assert_eq!(config.settings.server.port, "9090");
        assert_eq!(config.settings.metrics.path, "/metrics");
        assert!(config.settings.logging.is_some());
        assert_eq!(config.paypal.base_url, "https://api-m.paypal.com");

        let credential = Credential::from(&config.paypal);
        assert_eq!(credential.pair(), Some(("id", "from-env")));
    }

    #[tokio::test]
    #[serial]
    async fn environment_config_reads_paypal_variables() {
        std::env::set_var("PAYPAL_CLIENT_ID", "env-id");
        std::env::set_var("PAYPAL_CLIENT_SECRET", "env-secret");
        std::env::remove_var("BASE_URL");
        std::env::remove_var("PORT");

        let config = env_to_config().await.unwrap();

        std::env::remove_var("PAYPAL_CLIENT_ID");
        std::env::remove_var("PAYPAL_CLIENT_SECRET");

        assert_eq!(config.paypal.base_url, "https://api-m.sandbox.paypal.com");
        assert_eq!(config.settings.server.port, "8888");
        assert!(Credential::from(&config.paypal).is_complete());
    }

    #[tokio::test]
    #[serial]
    async fn missing_credentials_do_not_block_startup() {
        std::env::remove_var("PAYPAL_CLIENT_ID");
        std::env::remove_var("PAYPAL_CLIENT_SECRET");

        let config = env_to_config().await.unwrap();
        assert!(!Credential::from(&config.paypal).is_complete());
    }

    #[tokio::test]
    async fn margin_not_above_interval_is_rejected() {
        let file = write_yaml(
            r#"
settings:
  safety_margin_seconds: 30
  refresh_interval_seconds: 60
paypal:
  base_url: "https://api-m.paypal.com"
"#,
        );

        let err = file_to_config(file.path()).await.unwrap_err();
        assert!(err.to_string().contains("safety_margin_seconds"));
    }

    #[tokio::test]
    async fn unknown_config_path_is_an_error() {
        assert!(config_loader::run(Some("/definitely/not/here.yaml")).await.is_err());
    }
}
