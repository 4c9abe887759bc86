//! HTTP helper for the calls the coordinator makes itself

use reqwest::{Client, Method, RequestBuilder};
use url::Url;

use crate::config::ProviderConfig;
use crate::error::AuthError;

/// Helper for building and executing HTTP requests
pub struct FetchBuilder<'a> {
    client: &'a Client,
    url: Url,
    method: Method,
    form: Option<Vec<(String, String)>>,
}

impl<'a> FetchBuilder<'a> {
    pub fn new(client: &'a Client, url: Url, method: Method) -> Self {
        Self {
            client,
            url,
            method,
            form: None,
        }
    }

    /// Add an `application/x-www-form-urlencoded` body
    pub fn form(mut self, fields: &[(&str, &str)]) -> Self {
        self.form = Some(
            fields
                .iter()
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .collect(),
        );
        self
    }

    fn build(&self) -> RequestBuilder {
        let mut req = self
            .client
            .request(self.method.clone(), self.url.clone());

        if let Some(form) = &self.form {
            req = req.form(form);
        }

        req
    }

    /// Execute the request, failing on non-success statuses
    pub async fn execute(&self) -> Result<reqwest::Response, AuthError> {
        let response = self.build().send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(AuthError::client(format!(
                "Request failed with status {}: {}",
                status, text
            )));
        }

        Ok(response)
    }
}

/// Revoke a refresh token at the provider's revocation endpoint
pub async fn revoke_refresh_token(
    client: &Client,
    config: &ProviderConfig,
    refresh_token: &str,
) -> Result<(), AuthError> {
    let url = config.revoke_url()?;

    FetchBuilder::new(client, url, Method::POST)
        .form(&[
            ("client_id", config.client_id.as_str()),
            ("token", refresh_token),
            ("token_type_hint", "refresh_token"),
        ])
        .execute()
        .await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_string, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn test_revoke_refresh_token() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/realms/zc/protocol/openid-connect/revoke"))
                .and(header("content-type", "application/x-www-form-urlencoded"))
                .and(body_string(
                    "client_id=web&token=refresh-1&token_type_hint=refresh_token",
                ))
                .respond_with(ResponseTemplate::new(200))
                .expect(1)
                .mount(&mock_server)
                .await;

            let config = ProviderConfig::new(&mock_server.uri(), "zc", "web");
            let result = revoke_refresh_token(&Client::new(), &config, "refresh-1").await;

            assert!(result.is_ok());
        });
    }

    #[test]
    fn test_revoke_reports_failure_status() {
        tokio_test::block_on(async {
            let mock_server = MockServer::start().await;

            Mock::given(method("POST"))
                .and(path("/realms/zc/protocol/openid-connect/revoke"))
                .respond_with(ResponseTemplate::new(400).set_body_string("invalid_token"))
                .mount(&mock_server)
                .await;

            let config = ProviderConfig::new(&mock_server.uri(), "zc", "web");
            let result = revoke_refresh_token(&Client::new(), &config, "refresh-1").await;

            match result {
                Err(AuthError::Client(msg)) => assert!(msg.contains("invalid_token")),
                other => panic!("unexpected result: {:?}", other),
            }
        });
    }
}
