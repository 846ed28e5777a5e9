//! Username rules.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::CoreError;

static USERNAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9_]{3,20}$").expect("valid username regex"));

/// Trim, lowercase, and validate a requested username.
pub fn normalize_username(raw: &str) -> Result<String, CoreError> {
    let username = raw.trim().to_lowercase();
    if !USERNAME_RE.is_match(&username) {
        return Err(CoreError::Validation(
            "Username must be 3-20 characters: lowercase letters, numbers, and underscores only."
                .to_string(),
        ));
    }
    Ok(username)
}
