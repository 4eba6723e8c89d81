use async_trait::async_trait;
use common::error::{AppError, Res};
use pricing::checkout::{CardDetails, PaymentProvider};
use stripe::TokenId;

use crate::dtos::pay::{TokenRequest, TokenResponse};

/// Tokenizes cards through Stripe's REST API with a publishable key.
pub struct StripeTokenProvider {
    http: reqwest::Client,
    publishable_key: String,
    api_base: String,
}

impl StripeTokenProvider {
    pub fn new(publishable_key: &str, api_base: &str) -> Self {
        StripeTokenProvider {
            http: reqwest::Client::new(),
            publishable_key: publishable_key.to_string(),
            api_base: api_base.trim_end_matches('/').to_string(),
        }
    }

    fn tokens_url(&self) -> String {
        format!("{}/v1/tokens", self.api_base)
    }
}

#[async_trait]
impl PaymentProvider for StripeTokenProvider {
    async fn create_token(&self, card: &CardDetails) -> Res<TokenId> {
        let response = self
            .http
            .post(self.tokens_url())
            .bearer_auth(&self.publishable_key)
            .form(&TokenRequest::from(card))
            .send()
            .await
            .map_err(AppError::from)?;

        let status = response.status();
        let body = response.text().await.map_err(AppError::from)?;
        log::debug!("Stripe token request answered {}", status);
        parse_token_response(&body)
    }
}

/// Turns a `/v1/tokens` response body into a token id or a user-facing payment error.
pub(crate) fn parse_token_response(body: &str) -> Res<TokenId> {
    match serde_json::from_str::<TokenResponse>(body)? {
        TokenResponse::Token { id } => common::stripe::parse_token_id(&id),
        TokenResponse::Failure { error } => {
            log::warn!(
                "Stripe rejected card ({})",
                error.kind.as_deref().unwrap_or("unknown error")
            );
            Err(AppError::Payment(error.message.unwrap_or_else(|| {
                "Your card could not be processed.".to_string()
            })))
        }
    }
}
