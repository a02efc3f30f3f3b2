//! Authentication endpoints and bearer-token claims.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::ApiClient;
use crate::error::Error;

/// Claims carried in the login token. Only read for display; the
/// signature is the backend's problem.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct TokenClaims {
    pub email: String,
    pub username: String,
    #[serde(default)]
    pub profile: Option<String>,
}

impl TokenClaims {
    /// Decode the payload segment of a JWT without verifying it.
    pub fn decode(token: &str) -> Result<Self, Error> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| Error::parse("token is not a JWT", None))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload)
            .map_err(|e| Error::parse(format!("token payload: {e}"), None))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| Error::parse(format!("token claims: {e}"), None))
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub verification_code: u32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub email: String,
    pub new_password: String,
    pub verification_code: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct EmailBody<'a> {
    email: &'a str,
}

impl ApiClient {
    /// Exchange credentials for a bearer token. The token is stored on
    /// the client and returned for the caller's records.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, Error> {
        let token: String = self
            .post("authentication/login", request)
            .await?
            .into_data()?;
        self.set_token(token.clone());
        Ok(token)
    }

    /// Drop the stored token. Purely local; the backend keeps no
    /// session state beyond the token itself.
    pub fn logout(&self) {
        self.clear_token();
    }

    pub async fn create_account(&self, request: &CreateAccountRequest) -> Result<(), Error> {
        self.post::<Value, _>("authentication/signUp", request)
            .await?
            .into_result()?;
        Ok(())
    }

    pub async fn reset_password(&self, request: &ResetPasswordRequest) -> Result<(), Error> {
        self.post::<Value, _>("authentication/resetPassword", request)
            .await?
            .into_result()?;
        Ok(())
    }

    /// Ask the backend to e-mail a password reset verification code.
    pub async fn send_password_reset_code(&self, email: &str) -> Result<(), Error> {
        self.post::<Value, _>(
            "authentication/sendResetPasswordVerification",
            &EmailBody { email },
        )
        .await?
        .into_result()?;
        Ok(())
    }

    /// Ask the backend to e-mail a sign-up verification code.
    pub async fn send_email_verification(&self, email: &str) -> Result<(), Error> {
        self.post::<Value, _>("authentication/sendEmailVerification", &EmailBody { email })
            .await?
            .into_result()?;
        Ok(())
    }

    /// Whether an account already exists for this address.
    pub async fn verify_email_in_use(&self, email: &str) -> Result<bool, Error> {
        let path = format!(
            "authentication/verifyEmailInUse?Email={}",
            urlencoding::encode(email)
        );
        self.get(&path).await?.into_data()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_decode_from_unverified_jwt() {
        // header {"alg":"none"} . payload . empty signature
        let payload = URL_SAFE_NO_PAD.encode(
            r#"{"Email":"ada@example.com","Id":"1","Username":"ada","exp":0,"iat":0,"nbf":0}"#,
        );
        let token = format!("eyJhbGciOiJub25lIn0.{payload}.");
        let claims = TokenClaims::decode(&token).unwrap();
        assert_eq!(claims.username, "ada");
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.profile.is_none());
    }

    #[test]
    fn garbage_token_is_a_parse_error() {
        assert!(TokenClaims::decode("not-a-jwt").is_err());
    }

    #[test]
    fn login_request_uses_camel_case() {
        let json = serde_json::to_value(CreateAccountRequest {
            email: "a@b.c".into(),
            username: "ada".into(),
            password: "pw".into(),
            verification_code: 123456,
        })
        .unwrap();
        assert!(json.get("verificationCode").is_some());
    }
}
