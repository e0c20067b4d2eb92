use crate::auth::{AuthTokenProvider, TimeProvider, TokenClaims, TokenConfig};
use crate::domain::{DomainError, DomainResult};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

/// HS256 token provider.
///
/// Expiry is checked against the injected clock rather than the wall clock, so
/// issuing and refreshing are reproducible for a fixed clock and config.
pub struct JwtAuthTokenProvider {
    config: TokenConfig,
    time_provider: Arc<dyn TimeProvider>,
}

impl JwtAuthTokenProvider {
    pub fn new(config: TokenConfig, time_provider: Arc<dyn TimeProvider>) -> Self {
        Self {
            config,
            time_provider,
        }
    }

    fn sign(&self, user_id: &str, username: &str) -> DomainResult<String> {
        let now = self.time_provider.now();
        let exp = i64::try_from(self.config.timeout_minutes)
            .ok()
            .and_then(chrono::Duration::try_minutes)
            .and_then(|timeout| now.checked_add_signed(timeout))
            .ok_or_else(|| {
                DomainError::TokenError(format!(
                    "token timeout out of range: {} minutes",
                    self.config.timeout_minutes
                ))
            })?;

        let claims = TokenClaims {
            sub: user_id.to_string(),
            name: username.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.config.secret.as_bytes()),
        )
        .map_err(|e| DomainError::TokenError(format!("JWT encoding error: {}", e)))
    }
}

impl AuthTokenProvider for JwtAuthTokenProvider {
    fn generate_token(&self, user_id: &str, username: &str) -> DomainResult<String> {
        self.sign(user_id, username)
    }

    fn validate_token(&self, token: &str) -> DomainResult<TokenClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;

        let claims = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(self.config.secret.as_bytes()),
            &validation,
        )
        .map_err(|e| DomainError::InvalidToken(e.to_string()))?
        .claims;

        if claims.exp <= self.time_provider.now().timestamp() {
            return Err(DomainError::InvalidToken("token expired".to_string()));
        }

        Ok(claims)
    }

    fn refresh_token(&self, token: &str) -> DomainResult<String> {
        let claims = self.validate_token(token)?;
        self.sign(&claims.sub, &claims.name)
    }
}
