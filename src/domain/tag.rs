use std::fmt;

use semver::Version;

use crate::domain::version::parse_version;
use crate::error::{GitBumpError, Result};

/// A version as it appears in a git tag, e.g. `v1.2.3`.
///
/// The prefix ("", "v" or "V") is kept so the next tag is spelled the
/// same way as the previous one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagVersion {
    pub prefix: String,
    pub version: Version,
}

impl TagVersion {
    pub fn new(prefix: impl Into<String>, version: Version) -> Self {
        TagVersion {
            prefix: prefix.into(),
            version,
        }
    }

    /// Parse a tag name such as "v1.2.3", "1.2" or "V2.0.0-rc.1"
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        let (prefix, rest) = match tag.chars().next() {
            Some(c @ ('v' | 'V')) => (c.to_string(), &tag[1..]),
            _ => (String::new(), tag),
        };

        let version = parse_version(rest).map_err(|_| {
            GitBumpError::version(format!(
                "Tag '{}' is not a semantic version - expected [v]X.Y.Z",
                tag
            ))
        })?;

        Ok(TagVersion { prefix, version })
    }

    /// Same prefix, different version
    pub fn with_version(&self, version: Version) -> Self {
        TagVersion {
            prefix: self.prefix.clone(),
            version,
        }
    }

    /// Full tag name including the prefix
    pub fn tag_name(&self) -> String {
        format!("{}{}", self.prefix, self.version)
    }
}

impl fmt::Display for TagVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.prefix, self.version)
    }
}
