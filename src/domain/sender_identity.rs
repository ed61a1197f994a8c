use std::fmt;
use std::str::FromStr;

use regex::Regex;

use unicode_segmentation::UnicodeSegmentation;

const MAX_LEN: usize = 320;

/// A configured sender identity: a bare address or a `Name <address>` pair
#[derive(Debug, PartialEq, Clone)]
pub struct SenderIdentity(String);

impl FromStr for SenderIdentity {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        lazy_static::lazy_static! {
            static ref EMAIL_REGEX: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
        }

        let value = value.trim();
        if value.is_empty() {
            return Err("Sender identity cannot be empty".into());
        }
        if value.graphemes(true).count() > MAX_LEN {
            return Err("Sender identity too long".into());
        }

        // A display name is allowed, but the bracketed part must still be an address
        let address = match (value.find('<'), value.rfind('>')) {
            (Some(open), Some(close)) if open < close => value[open + 1..close].trim(),
            _ => value,
        };
        if !EMAIL_REGEX.is_match(address) {
            return Err(format!(
                "Sender identity of incorrect format: \"{}\". Expected \"email@example.com\" or \"Name <email@example.com>\"",
                value
            ));
        }

        Ok(Self(value.to_string()))
    }
}

impl AsRef<str> for SenderIdentity {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SenderIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}
