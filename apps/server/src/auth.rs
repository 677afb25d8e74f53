use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::State,
    http::{header::AUTHORIZATION, Request},
    middleware::Next,
    response::Response,
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use carteira_core::users::NewUser;

use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;
use crate::models::{AuthResponse, UserDto};

/// Issues and verifies the signed, time-limited credentials backing
/// request authorization. Stateless: nothing is stored server-side and
/// validity is determined purely by signature and expiry.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct Claims {
    pub sub: String,
    pub email: String,
    pub iat: usize,
    pub exp: usize,
}

/// Identity extracted from a verified token, injected as a request
/// extension by [`require_auth`].
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: String,
    pub email: String,
}

impl AuthManager {
    pub fn new(jwt_secret: &[u8], token_ttl: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(jwt_secret);
        let decoding_key = DecodingKey::from_secret(jwt_secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key,
            decoding_key,
            validation,
            token_ttl,
        }
    }

    pub fn issue_token(&self, user_id: &str, email: &str) -> anyhow::Result<String> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| anyhow::anyhow!("System clock is before UNIX_EPOCH"))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| anyhow::anyhow!("Failed to sign token: {e}"))
    }

    /// Fails closed: any malformed, forged, or expired token is `None`,
    /// indistinguishable from one another to callers.
    pub fn verify_token(&self, token: &str) -> Option<AuthenticatedUser> {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => Some(AuthenticatedUser {
                user_id: data.claims.sub,
                email: data.claims.email,
            }),
            Err(err) => {
                tracing::debug!("Token rejected: {err}");
                None
            }
        }
    }
}

/// Decodes the signing secret: base64, or a 32-byte ASCII string; must
/// decode to exactly 32 bytes.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) => bytes,
        Err(_) if trimmed.len() == 32 => trimmed.as_bytes().to_vec(),
        Err(_) => {
            anyhow::bail!("JWT secret must be base64 encoded or a 32-byte ASCII string")
        }
    };

    if decoded.len() != 32 {
        anyhow::bail!("JWT secret must decode to exactly 32 bytes");
    }

    Ok(decoded)
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (name, email, password) = match (payload.name, payload.email, payload.password) {
        (Some(name), Some(email), Some(password))
            if !name.trim().is_empty() && !email.trim().is_empty() && !password.is_empty() =>
        {
            (name, email, password)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Nome, email e senha são obrigatórios".to_string(),
            ))
        }
    };

    let user = state
        .user_service
        .register(NewUser {
            name,
            email,
            password,
        })
        .await?;
    let token = state.auth.issue_token(&user.id, &user.email)?;

    Ok(Json(AuthResponse {
        user: UserDto::from(user),
        token,
        message: Some("Usuário criado com sucesso".to_string()),
    }))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let (email, password) = match (payload.email, payload.password) {
        (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
            (email, password)
        }
        _ => {
            return Err(ApiError::BadRequest(
                "Email e senha são obrigatórios".to_string(),
            ))
        }
    };

    let user = state.user_service.authenticate(&email, &password)?;
    let token = state.auth.issue_token(&user.id, &user.email)?;

    Ok(Json(AuthResponse {
        user: UserDto::from(user),
        token,
        message: None,
    }))
}

/// Middleware guarding portfolio routes: verifies the bearer token and
/// injects the [`AuthenticatedUser`] extension.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let unauthorized = || ApiError::Unauthorized("Não autorizado".to_string());

    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(unauthorized)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(unauthorized());
    };
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(unauthorized());
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(unauthorized());
    }

    let user = state.auth.verify_token(token).ok_or_else(unauthorized)?;
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secret() -> Vec<u8> {
        b"0123456789abcdef0123456789abcdef".to_vec()
    }

    fn manager() -> AuthManager {
        AuthManager::new(&secret(), Duration::from_secs(7 * 24 * 60 * 60))
    }

    #[test]
    fn verify_returns_identity_right_after_issuance() {
        let auth = manager();
        let token = auth.issue_token("user-1", "joao@exemplo.com").unwrap();

        let user = auth.verify_token(&token).unwrap();
        assert_eq!(user.user_id, "user-1");
        assert_eq!(user.email, "joao@exemplo.com");
    }

    #[test]
    fn verify_rejects_expired_token() {
        let auth = manager();
        let past = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs() as usize
            - 3600;
        let claims = Claims {
            sub: "user-1".to_string(),
            email: "joao@exemplo.com".to_string(),
            iat: past - 60,
            exp: past,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(&secret()),
        )
        .unwrap();

        assert!(auth.verify_token(&token).is_none());
    }

    #[test]
    fn verify_rejects_token_signed_with_another_secret() {
        let auth = manager();
        let other = AuthManager::new(
            b"ffffffffffffffffffffffffffffffff",
            Duration::from_secs(3600),
        );
        let token = other.issue_token("user-1", "joao@exemplo.com").unwrap();

        assert!(auth.verify_token(&token).is_none());
    }

    #[test]
    fn verify_rejects_malformed_token() {
        let auth = manager();
        assert!(auth.verify_token("not-a-jwt").is_none());
        assert!(auth.verify_token("").is_none());
        assert!(auth.verify_token("a.b.c").is_none());
    }

    #[test]
    fn secret_key_rules() {
        assert!(decode_secret_key("").is_err());
        assert!(decode_secret_key("too-short").is_err());
        // 32-byte ASCII (not valid base64) accepted as-is
        assert_eq!(
            decode_secret_key("!123456789abcdef0123456789abcdef").unwrap().len(),
            32
        );
        // base64 of 32 bytes accepted
        let b64 = BASE64.encode([7u8; 32]);
        assert_eq!(decode_secret_key(&b64).unwrap(), vec![7u8; 32]);
    }
}
