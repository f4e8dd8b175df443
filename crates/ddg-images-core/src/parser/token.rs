//! vqd session token extraction
//!
//! The image search endpoint requires a short-lived `vqd` token that the
//! front page embeds in an inline script, in the form `vqd='...'` or
//! `vqd="..."`.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{DdgImageError, Result};

/// Matches `vqd='TOKEN'` or `vqd="TOKEN"`; the token is alphanumeric
/// with hyphens.
static VQD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"vqd=['"]([a-zA-Z0-9-]+)['"]"#).unwrap());

/// Extracts the vqd session token from a front page response body
///
/// # Arguments
/// * `body` - Response body of the front page form POST
///
/// # Returns
/// The first token found in the body
///
/// # Errors
/// Returns `TokenExtraction` if no token pattern is present.
pub fn extract_vqd_token(body: &str) -> Result<String> {
    VQD_RE
        .captures(body)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| {
            DdgImageError::TokenExtraction("no vqd token in response body".to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_extract_token_single_quoted() {
        let body = r#"<script>DDG.deep.initialize('/d.js?q=cats',{vqd='4-123456789'});</script>"#;
        assert_eq!(extract_vqd_token(body).unwrap(), "4-123456789");
    }

    #[test]
    fn test_extract_token_double_quoted() {
        let body = r#"<script>vqd="4-98aBcD-42";</script>"#;
        assert_eq!(extract_vqd_token(body).unwrap(), "4-98aBcD-42");
    }

    #[test]
    fn test_extract_token_first_match_wins() {
        let body = r#"vqd='first-token' and later vqd='second-token'"#;
        assert_eq!(extract_vqd_token(body).unwrap(), "first-token");
    }

    #[test]
    fn test_extract_token_missing() {
        let body = "<html><body>No token here</body></html>";
        let result = extract_vqd_token(body);
        assert!(matches!(result, Err(DdgImageError::TokenExtraction(_))));
    }

    #[test]
    fn test_extract_token_unquoted_is_not_matched() {
        let body = "vqd=4-123456789&other=1";
        assert!(extract_vqd_token(body).is_err());
    }

    #[test]
    fn test_extract_token_empty_body() {
        assert!(extract_vqd_token("").is_err());
    }

    proptest! {
        #[test]
        fn extracts_any_alphanumeric_hyphen_token(token in "[a-zA-Z0-9-]{1,64}") {
            let body = format!("<script>var x = {{vqd='{}'}};</script>", token);
            prop_assert_eq!(extract_vqd_token(&body).unwrap(), token);
        }
    }
}
