use crate::application_port::AuthError;

pub const BEARER_SCHEME: &str = "Bearer";

/// Strip `"<scheme> "` from the front of a raw `Authorization` header
/// value. The scheme match is case-sensitive and must be followed by a
/// single space; a header equal to the bare scheme carries no token, which
/// is distinct from a successfully stripped empty token.
pub fn extract_scheme_token<'a>(header: &'a str, scheme: &str) -> Result<&'a str, AuthError> {
    header
        .strip_prefix(scheme)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or(AuthError::MissingToken)
}

pub fn extract_bearer_token(header: &str) -> Result<&str, AuthError> {
    extract_scheme_token(header, BEARER_SCHEME)
}
