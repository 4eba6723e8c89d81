use stripe::{Client, Token, TokenId};

use crate::error::{AppError, Res};

pub fn create_client(secret_key: &str) -> Client {
    Client::new(secret_key)
}

/// Parses a token id as issued by Stripe (`tok_...`).
pub fn parse_token_id(token: &str) -> Res<TokenId> {
    token.parse::<TokenId>().map_err(|e| {
        AppError::BadRequest(format!("Failed to parse stripe token: {}. {}", token, e))
    })
}

/// Retrieves a token by id, failing if Stripe has already consumed it.
pub async fn retrieve_unused_token(client: &Client, id: &TokenId) -> Res<Token> {
    let token = Token::retrieve(client, id, &[])
        .await
        .map_err(AppError::from)?;
    if token.used {
        return Err(AppError::Payment(format!("Token {} has already been used", id)));
    }
    Ok(token)
}
