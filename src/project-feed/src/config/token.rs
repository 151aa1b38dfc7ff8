//! GitHub token resolution from the environment.

use std::fmt;

/// Environment variables checked for a GitHub token, in order of preference.
pub const TOKEN_ENV_VARS: [&str; 2] = ["PRIVATE_REPOS_TOKEN", "GITHUB_TOKEN"];

/// A GitHub token together with the variable it was read from.
///
/// The token value is never printed by [`fmt::Debug`].
#[derive(Clone, PartialEq, Eq)]
pub struct ApiToken {
    value: String,
    source: &'static str,
}

impl ApiToken {
    /// Wraps a token obtained outside the environment.
    pub fn new(value: impl Into<String>, source: &'static str) -> Self {
        Self {
            value: value.into(),
            source,
        }
    }

    /// Returns the raw token.
    pub fn expose(&self) -> &str {
        &self.value
    }

    /// Returns the name of the variable the token came from.
    pub fn source(&self) -> &'static str {
        self.source
    }
}

impl fmt::Debug for ApiToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiToken")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

/// Reads the first non-empty token from [`TOKEN_ENV_VARS`].
#[must_use]
pub fn resolve_token() -> Option<ApiToken> {
    TOKEN_ENV_VARS.iter().find_map(|&var| {
        std::env::var(var)
            .ok()
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .map(|value| ApiToken::new(value, var))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefers_private_repos_token() {
        temp_env::with_vars(
            [
                ("PRIVATE_REPOS_TOKEN", Some("private")),
                ("GITHUB_TOKEN", Some("public")),
            ],
            || {
                let token = resolve_token().unwrap();
                assert_eq!(token.expose(), "private");
                assert_eq!(token.source(), "PRIVATE_REPOS_TOKEN");
            },
        );
    }

    #[test]
    fn falls_back_to_github_token() {
        temp_env::with_vars(
            [
                ("PRIVATE_REPOS_TOKEN", None),
                ("GITHUB_TOKEN", Some("public")),
            ],
            || {
                let token = resolve_token().unwrap();
                assert_eq!(token.expose(), "public");
                assert_eq!(token.source(), "GITHUB_TOKEN");
            },
        );
    }

    #[test]
    fn ignores_blank_values() {
        temp_env::with_vars(
            [
                ("PRIVATE_REPOS_TOKEN", Some("  ")),
                ("GITHUB_TOKEN", None::<&str>),
            ],
            || {
                assert!(resolve_token().is_none());
            },
        );
    }

    #[test]
    fn debug_hides_value() {
        let token = ApiToken::new("secret-value", "GITHUB_TOKEN");
        let printed = format!("{token:?}");
        assert!(!printed.contains("secret-value"));
        assert!(printed.contains("GITHUB_TOKEN"));
    }
}
