//! Redirect capture for the server-side sign-in page.
//!
//! The sign-in page redirects back to the app with the session token in the
//! `session_token` query parameter.

use url::Url;

use crate::error::AuthError;
use crate::Result;

const SIGN_IN_PATH: &str = "api/auth/signin";
const REDIRECT_PARAM: &str = "expo-redirect";
const TOKEN_PARAM: &str = "session_token";

/// Build the sign-in URL for `base_url`, asking the server to redirect to `redirect_to`.
pub fn sign_in_url(base_url: &str, redirect_to: &str) -> Result<Url> {
    let mut base =
        Url::parse(base_url).map_err(|e| AuthError::InvalidUrl(format!("{base_url}: {e}")))?;

    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }

    let mut url = base
        .join(SIGN_IN_PATH)
        .map_err(|e| AuthError::InvalidUrl(e.to_string()))?;
    url.query_pairs_mut()
        .clear()
        .append_pair(REDIRECT_PARAM, redirect_to);
    Ok(url)
}

/// Extract the session token from the URL the sign-in page redirected to.
pub fn session_token_from_redirect(redirect: &str) -> Result<String> {
    let url =
        Url::parse(redirect).map_err(|e| AuthError::InvalidUrl(format!("{redirect}: {e}")))?;

    url.query_pairs()
        .find(|(key, _)| key == TOKEN_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|token| !token.trim().is_empty())
        .ok_or(AuthError::MissingToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign_in_url_encodes_redirect() {
        let url = sign_in_url("http://localhost:3000", "everynote://login").unwrap();
        assert_eq!(url.path(), "/api/auth/signin");

        let (key, value) = url.query_pairs().next().unwrap();
        assert_eq!(key, "expo-redirect");
        assert_eq!(value, "everynote://login");
        assert!(url.as_str().contains("everynote%3A%2F%2Flogin"));
    }

    #[test]
    fn test_sign_in_url_keeps_base_path() {
        let url = sign_in_url("https://example.com/app", "x://y").unwrap();
        assert_eq!(url.path(), "/app/api/auth/signin");
    }

    #[test]
    fn test_token_from_redirect() {
        let token =
            session_token_from_redirect("everynote://login?session_token=abc%20123").unwrap();
        assert_eq!(token, "abc 123");
    }

    #[test]
    fn test_missing_or_invalid_redirect() {
        assert!(matches!(
            session_token_from_redirect("everynote://login?other=1"),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            session_token_from_redirect("everynote://login?session_token="),
            Err(AuthError::MissingToken)
        ));
        assert!(matches!(
            session_token_from_redirect("not a url"),
            Err(AuthError::InvalidUrl(_))
        ));
    }
}
