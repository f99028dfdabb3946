use base64::{engine::general_purpose::STANDARD, Engine as _};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, error};

use crate::config::credentials::Credential;
use crate::error::GatewayError;

pub const TOKEN_PATH: &str = "/v1/oauth2/token";
const GRANT_BODY: &str = "grant_type=client_credentials";

/// Successful client-credentials grant as reported by PayPal.
#[derive(Debug, Clone, Deserialize)]
pub struct GrantedToken {
    pub access_token: String,
    pub expires_in: u64,
    pub token_type: Option<String>,
    pub scope: Option<String>,
    pub app_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TokenEndpointResponse {
    Rejected {
        error: String,
        error_description: Option<String>,
    },
    Granted(GrantedToken),
}

/// Client-credentials grant against `{base_url}/v1/oauth2/token`.
#[derive(Debug, Clone)]
pub struct OAuth2Source {
    pub token_url: String,
    credential: Credential,
    client: Client,
}

impl OAuth2Source {
    pub fn new(base_url: &str, credential: Credential, client: Client) -> Self {
        let token_url = format!("{}{}", base_url.trim_end_matches('/'), TOKEN_PATH);
        Self { token_url, credential, client }
    }

    pub async fn fetch_token(&self) -> Result<GrantedToken, GatewayError> {
        // checked before touching the network
        let (client_id, client_secret) = self.credential.pair().ok_or_else(|| {
            error!("failed to generate access token: client credentials are not configured");
            GatewayError::CredentialsMissing
        })?;
        let basic = STANDARD.encode(format!("{}:{}", client_id, client_secret));

        debug!("requesting access token from {}", self.token_url);
        let response = self
            .client
            .post(&self.token_url)
            .header(AUTHORIZATION, format!("Basic {}", basic))
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(GRANT_BODY)
            .send()
            .await
            .map_err(|e| GatewayError::transport(&self.token_url, e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GatewayError::transport(&self.token_url, e))?;

        match serde_json::from_str::<TokenEndpointResponse>(&body) {
            Ok(TokenEndpointResponse::Rejected { error, error_description }) => {
                error!("access token request rejected: {} ({})", error, status);
                Err(GatewayError::AuthEndpoint {
                    status: status.as_u16(),
                    error,
                    description: error_description.unwrap_or_default(),
                })
            }
            Ok(TokenEndpointResponse::Granted(granted)) if status.is_success() => Ok(granted),
            Ok(TokenEndpointResponse::Granted(_)) => Err(unstructured_rejection(status)),
            Err(_) if !status.is_success() => Err(unstructured_rejection(status)),
            Err(e) => Err(GatewayError::transport(&self.token_url, e)),
        }
    }
}

fn unstructured_rejection(status: reqwest::StatusCode) -> GatewayError {
    error!("access token request failed with status {}", status);
    GatewayError::AuthEndpoint {
        status: status.as_u16(),
        error: "http_status".to_owned(),
        description: status.canonical_reason().unwrap_or("unknown").to_owned(),
    }
}
