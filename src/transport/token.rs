use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("invalid token response: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token response contains an empty access_token")]
    EmptyAccessToken,
}

/// Successful client-credentials response.
#[derive(Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
}

impl std::fmt::Debug for TokenResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenResponse")
            .field("access_token", &"<redacted>")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

pub fn encode_token_form() -> Vec<(String, String)> {
    vec![("grant_type".to_owned(), "client_credentials".to_owned())]
}

pub fn decode_token_response(json: &str) -> Result<TokenResponse, TransportError> {
    let parsed: TokenResponse = serde_json::from_str(json)?;
    if parsed.access_token.trim().is_empty() {
        return Err(TransportError::EmptyAccessToken);
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_uses_client_credentials_grant() {
        assert_eq!(
            encode_token_form(),
            vec![("grant_type".to_owned(), "client_credentials".to_owned())]
        );
    }

    #[test]
    fn decode_reads_token_and_lifetime() {
        let json = r#"{"access_token":"abc","token_type":"bearer","expires_in":3599,"scope":""}"#;
        let token = decode_token_response(json).unwrap();
        assert_eq!(token.access_token, "abc");
        assert_eq!(token.token_type.as_deref(), Some("bearer"));
        assert_eq!(token.expires_in, Some(3599));
        assert!(!format!("{token:?}").contains("abc"));
    }

    #[test]
    fn decode_tolerates_missing_expiry() {
        let token = decode_token_response(r#"{"access_token":"abc"}"#).unwrap();
        assert_eq!(token.expires_in, None);
    }

    #[test]
    fn decode_rejects_empty_or_missing_token() {
        assert!(matches!(
            decode_token_response(r#"{"access_token":"  "}"#),
            Err(TransportError::EmptyAccessToken)
        ));
        assert!(matches!(
            decode_token_response(r#"{"expires_in":3600}"#),
            Err(TransportError::Json(_))
        ));
    }
}
