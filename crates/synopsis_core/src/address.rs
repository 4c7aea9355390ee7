use std::fmt;

use thiserror::Error;
use url::Url;

/// A submitted location that parsed as an `http` or `https` URL.
///
/// Holds the trimmed input verbatim: case, trailing slashes and query
/// strings are not normalized.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Address(String);

impl Address {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for Address {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RejectionReason {
    #[error("Please enter a blog URL")]
    EmptyInput,
    #[error("Please enter a valid URL (must start with http:// or https://)")]
    MalformedAddress,
    #[error("Only http:// and https:// URLs are supported")]
    UnsupportedScheme,
}

/// Checks free-text input and wraps it as an [`Address`].
pub fn validate(raw: &str) -> Result<Address, RejectionReason> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(RejectionReason::EmptyInput);
    }

    let parsed = Url::parse(trimmed).map_err(|_| RejectionReason::MalformedAddress)?;
    match parsed.scheme() {
        "http" | "https" => Ok(Address(trimmed.to_owned())),
        _ => Err(RejectionReason::UnsupportedScheme),
    }
}
