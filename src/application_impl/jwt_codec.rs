use crate::application_port::{AccessToken, AuthError, TokenCodec};
use crate::domain_model::UserId;
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

/// Fixed issuer claim; tokens minted under any other issuer are rejected.
pub const TOKEN_ISSUER: &str = "clavier";

#[derive(Debug, Serialize, Deserialize)]
struct AccessClaims {
    sub: String, // user id as string
    exp: i64,
    iat: i64,
    iss: String,
}

fn encode_access(
    uid: UserId,
    ttl: Duration,
    signing_key: &[u8],
) -> Result<(String, DateTime<Utc>), AuthError> {
    let iat_dt = Utc::now();
    let exp_dt = iat_dt + ttl;
    let claims = AccessClaims {
        sub: uid.0.to_string(),
        exp: exp_dt.timestamp(),
        iat: iat_dt.timestamp(),
        iss: TOKEN_ISSUER.to_string(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
    .map_err(|e| AuthError::Internal(e.to_string()))?;
    Ok((token, exp_dt))
}

fn decode_access(token: &str, signing_key: &[u8]) -> Result<AccessClaims, AuthError> {
    let mut v = Validation::new(Algorithm::HS256);
    v.validate_exp = true;
    v.leeway = 0; // the library grants 60s of clock skew unless told otherwise
    v.set_issuer(&[TOKEN_ISSUER]);
    let data = decode::<AccessClaims>(token, &DecodingKey::from_secret(signing_key), &v)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::Expired,
            ErrorKind::InvalidSignature | ErrorKind::InvalidIssuer | ErrorKind::InvalidAlgorithm => {
                AuthError::BadSignature
            }
            _ => AuthError::Malformed,
        })?;

    // The library treats exp == now as still live; the deadline here is
    // inclusive.
    if data.claims.exp <= Utc::now().timestamp() {
        return Err(AuthError::Expired);
    }

    Ok(data.claims)
}

pub struct JwtHs256Codec {
    signing_key: Vec<u8>,
}

impl JwtHs256Codec {
    pub fn new(signing_key: Vec<u8>) -> Self {
        JwtHs256Codec { signing_key }
    }

    #[inline]
    fn parse_user_id(sub: &str) -> Result<UserId, AuthError> {
        let id = sub.parse::<UserId>().map_err(|_| AuthError::Malformed)?;
        Ok(id)
    }
}

#[async_trait::async_trait]
impl TokenCodec for JwtHs256Codec {
    async fn issue_access_token(
        &self,
        user: UserId,
        ttl: Duration,
    ) -> Result<(AccessToken, DateTime<Utc>), AuthError> {
        let (token, exp_dt) = encode_access(user, ttl, &self.signing_key)?;
        Ok((AccessToken(token), exp_dt))
    }

    async fn verify_access_token(&self, token: &AccessToken) -> Result<UserId, AuthError> {
        let claims = decode_access(&token.0, &self.signing_key)?;
        Self::parse_user_id(&claims.sub)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn codec() -> JwtHs256Codec {
        JwtHs256Codec::new(b"test-secret".to_vec())
    }

    fn new_user() -> UserId {
        UserId(uuid::Uuid::new_v4())
    }

    #[tokio::test]
    async fn issued_token_verifies_to_the_same_subject() {
        let codec = codec();
        let user = new_user();

        let (token, expires_at) = codec.issue_access_token(user, Duration::hours(1)).await.unwrap();
        assert_eq!(token.0.matches('.').count(), 2);
        assert!(expires_at > Utc::now());

        let verified = codec.verify_access_token(&token).await.unwrap();
        assert_eq!(verified, user);
    }

    #[tokio::test]
    async fn expired_token_fails_as_expired_not_bad_signature() {
        let codec = codec();
        let (token, _) = codec.issue_access_token(new_user(), Duration::hours(-1)).await.unwrap();

        let err = codec.verify_access_token(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Expired), "got {err:?}");
    }

    #[tokio::test]
    async fn no_clock_skew_leeway_is_granted() {
        // 30s inside the window the library would forgive by default.
        let codec = codec();
        let (token, _) = codec.issue_access_token(new_user(), Duration::seconds(-30)).await.unwrap();

        let err = codec.verify_access_token(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::Expired), "got {err:?}");
    }

    #[tokio::test]
    async fn token_signed_with_another_key_is_rejected() {
        let codec = codec();
        let other = JwtHs256Codec::new(b"another-secret".to_vec());
        let (token, _) = other.issue_access_token(new_user(), Duration::hours(1)).await.unwrap();

        let err = codec.verify_access_token(&token).await.unwrap_err();
        assert!(matches!(err, AuthError::BadSignature), "got {err:?}");
    }

    #[tokio::test]
    async fn token_from_another_issuer_is_rejected() {
        let codec = codec();
        let now = Utc::now();
        let claims = AccessClaims {
            sub: new_user().to_string(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
            iss: "someone-else".to_string(),
        };
        let foreign = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = codec.verify_access_token(&AccessToken(foreign)).await.unwrap_err();
        assert!(matches!(err, AuthError::BadSignature), "got {err:?}");
    }

    #[tokio::test]
    async fn unparseable_token_is_malformed() {
        let codec = codec();

        for garbage in ["", "not-a-token", "a.b", "a.b.c.d"] {
            let err = codec
                .verify_access_token(&AccessToken(garbage.to_string()))
                .await
                .unwrap_err();
            assert!(matches!(err, AuthError::Malformed), "{garbage:?} gave {err:?}");
        }
    }

    #[tokio::test]
    async fn subject_that_is_not_an_identity_is_malformed() {
        let codec = codec();
        let now = Utc::now();
        let claims = AccessClaims {
            sub: "not-a-uuid".to_string(),
            exp: (now + Duration::hours(1)).timestamp(),
            iat: now.timestamp(),
            iss: TOKEN_ISSUER.to_string(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = codec.verify_access_token(&AccessToken(token)).await.unwrap_err();
        assert!(matches!(err, AuthError::Malformed), "got {err:?}");
    }
}
