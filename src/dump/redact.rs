//! Masking of secret-looking environment variables.
//!
//! Environment dumps leave the machine, so values whose names look like
//! credentials are replaced before they are written.

use regex::Regex;

/// Replacement written instead of a secret value.
pub const REDACTED: &str = "***";

/// Built-in patterns for common secrets, as (name, regex) pairs.
pub const BUILTIN_PATTERNS: &[(&str, &str)] = &[
    ("api_key", r"(?i)^.*_?(API_?KEY|APIKEY)$"),
    ("secret", r"(?i)^.*_?(SECRET|SECRET_KEY|SECRET_ACCESS_KEY)$"),
    ("token", r"(?i)^.*_?(TOKEN|ACCESS_TOKEN|AUTH_TOKEN)$"),
    ("password", r"(?i)^.*_?(PASSWORD|PASSWD)$"),
    ("credential", r"(?i)^.*_?CREDENTIALS?$"),
    ("private_key", r"(?i)^.*_?PRIVATE_KEY$"),
    ("connection_string", r"(?i)^.*(CONNECTION_STRING|DATABASE_URL)$"),
];

/// Decides which environment variables are secret.
///
/// ```
/// use inspector::dump::SecretMatcher;
///
/// let matcher = SecretMatcher::with_builtins();
/// assert!(matcher.is_secret("GITHUB_TOKEN"));
/// assert!(!matcher.is_secret("PATH"));
/// assert_eq!(matcher.redact("DB_PASSWORD", "hunter2"), "***");
/// ```
#[derive(Debug, Clone)]
pub struct SecretMatcher {
    patterns: Vec<(String, Regex)>,
}

impl SecretMatcher {
    /// Matcher with the built-in patterns.
    pub fn with_builtins() -> Self {
        let patterns = BUILTIN_PATTERNS
            .iter()
            .map(|(name, pattern)| {
                let re = Regex::new(pattern).expect("built-in secret pattern must compile");
                (name.to_string(), re)
            })
            .collect();
        Self { patterns }
    }

    /// Built-ins plus exact-name matches for `names`.
    pub fn with_builtins_and_names(names: &[String]) -> Self {
        let mut matcher = Self::with_builtins();
        for name in names {
            if let Ok(re) = Regex::new(&format!("^{}$", regex::escape(name))) {
                matcher.patterns.push((format!("custom:{}", name), re));
            }
        }
        matcher
    }

    pub fn is_secret(&self, env_name: &str) -> bool {
        self.patterns.iter().any(|(_, re)| re.is_match(env_name))
    }

    /// `value`, or [`REDACTED`] if `env_name` is secret.
    pub fn redact<'a>(&self, env_name: &str, value: &'a str) -> &'a str {
        if self.is_secret(env_name) {
            REDACTED
        } else {
            value
        }
    }

    pub fn pattern_count(&self) -> usize {
        self.patterns.len()
    }
}

impl Default for SecretMatcher {
    fn default() -> Self {
        Self::with_builtins()
    }
}
