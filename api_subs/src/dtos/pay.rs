use pricing::checkout::CardDetails;
use serde::{Deserialize, Serialize};

/// Form body of `POST /v1/tokens`.
#[derive(Serialize)]
pub struct TokenRequest<'a> {
    #[serde(rename = "card[number]")]
    pub number: &'a str,
    #[serde(rename = "card[exp_month]")]
    pub exp_month: u32,
    #[serde(rename = "card[exp_year]")]
    pub exp_year: u32,
    #[serde(rename = "card[cvc]")]
    pub cvc: &'a str,
}

impl<'a> From<&'a CardDetails> for TokenRequest<'a> {
    fn from(card: &'a CardDetails) -> Self {
        TokenRequest {
            number: &card.number,
            exp_month: card.exp_month,
            exp_year: card.exp_year,
            cvc: &card.cvc,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct StripeErrorBody {
    pub message: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum TokenResponse {
    Failure { error: StripeErrorBody },
    Token { id: String },
}
