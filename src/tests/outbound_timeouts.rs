// Every outbound call is bounded by the configured client timeout:
//  - a slow token endpoint fails acquisition with a transport timeout
//  - a slow orders endpoint fails the authorized call the same way
//  - the client wired by `PaypalOrders::from_config` carries the configured timeout

#[cfg(test)]
mod test {
    use std::time::{Duration, Instant};

    use httpmock::Method::{GET, POST};
    use httpmock::MockServer;
    use reqwest::Method;
    use serde_json::json;

    use crate::cache::token_cache::TokenCache;
    use crate::config::proc_loader::parse_config;
    use crate::error::{GatewayError, TransportFailure};
    use crate::orders::api::PaypalOrders;
    use crate::orders::executor::AuthorizedRequestExecutor;
    use crate::sources::build_client;
    use crate::sources::oauth2::{OAuth2Source, TOKEN_PATH};
    use crate::tests::common::credential;

    fn is_timeout(result: &Result<impl std::fmt::Debug, GatewayError>) -> bool {
        matches!(
            result,
            Err(GatewayError::Transport { source: TransportFailure::Http(e), .. }) if e.is_timeout()
        )
    }

    fn one_second_executor(base_url: &str) -> AuthorizedRequestExecutor {
        let client = build_client(1).unwrap();
        let source = OAuth2Source::new(base_url, credential(), client.clone());
        AuthorizedRequestExecutor::new(client, TokenCache::new(source, 120))
    }

    async fn mock_token(server: &MockServer) {
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(json!({"access_token": "T1", "expires_in": 3600}));
            })
            .await;
    }

    #[tokio::test]
    async fn slow_token_endpoint_times_out() {
        let server = MockServer::start_async().await;
        let token_mock = server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"access_token": "late", "expires_in": 3600}));
            })
            .await;

        let executor = one_second_executor(&server.base_url());
        let started = Instant::now();
        let result = executor.tokens().get_valid(false).await;

        assert!(is_timeout(&result), "expected a timeout, got {:?}", result);
        assert!(started.elapsed() < Duration::from_millis(2500));
        assert!(executor.tokens().snapshot().await.is_none());
        token_mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn slow_orders_endpoint_times_out() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        let orders_mock = server
            .mock_async(|when, then| {
                when.method(POST).path("/v2/checkout/orders");
                then.status(201)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"id": "late"}));
            })
            .await;

        let started = Instant::now();
        let result = one_second_executor(&server.base_url())
            .execute("create_order", Method::POST, &server.url("/v2/checkout/orders"), Some(&json!({})))
            .await;

        assert!(is_timeout(&result), "expected a timeout, got {:?}", result);
        assert!(started.elapsed() < Duration::from_millis(2500));
        orders_mock.assert_hits_async(1).await;
    }

    #[tokio::test]
    async fn configured_timeout_reaches_the_wired_client() {
        let server = MockServer::start_async().await;
        mock_token(&server).await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/checkout/orders/ORDER-1");
                then.status(200)
                    .delay(Duration::from_secs(3))
                    .json_body(json!({"id": "ORDER-1"}));
            })
            .await;

        let yaml = format!(
            r#"
settings:
  http_timeout_seconds: 1
paypal:
  base_url: "{}"
  client_id: "client-id"
  client_secret: "client-secret"
"#,
            server.base_url()
        );
        let config = parse_config(yaml).await.unwrap();
        let orders = PaypalOrders::from_config(&config).unwrap();

        assert_eq!(orders.get_valid_access_token(false).await.unwrap(), "T1");
        let result = orders.get_order_details("ORDER-1").await;
        assert!(is_timeout(&result), "expected a timeout, got {:?}", result);
    }
}
