//! Protocol version families and version-claim parsing
//!
//! A version claim arrives either from transport metadata (the declared tag)
//! or from the document's own `version` header field. Both are resolved to
//! exactly one schema family; nothing is inferred from the document shape.

use crate::error::{CodecError, CodecResult};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;
use std::str::FromStr;

static VERSION_CLAIM: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[vV]?(\d+)\.(\d+)(?:\.(\d+))?$").expect("version claim pattern is valid")
});

/// Supported VDA5050 schema families
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ProtocolVersion {
    V2_0_0,
    V2_1_0,
}

impl ProtocolVersion {
    pub const ALL: [ProtocolVersion; 2] = [ProtocolVersion::V2_0_0, ProtocolVersion::V2_1_0];

    /// Canonical `[Major].[Minor].[Patch]` string written into outgoing headers
    pub fn as_str(&self) -> &'static str {
        match self {
            ProtocolVersion::V2_0_0 => "2.0.0",
            ProtocolVersion::V2_1_0 => "2.1.0",
        }
    }

    /// Resolve a version claim such as `2.1.0`, `2.0` or `v2.1.3` to a family.
    ///
    /// Patch levels are accepted within a family. Any other major/minor pair
    /// fails with `UnsupportedVersion` carrying the raw claim.
    pub fn from_claim(claim: &str) -> CodecResult<Self> {
        let captures = VERSION_CLAIM
            .captures(claim.trim())
            .ok_or_else(|| CodecError::unsupported_version(claim))?;

        match (&captures[1], &captures[2]) {
            ("2", "0") => Ok(ProtocolVersion::V2_0_0),
            ("2", "1") => Ok(ProtocolVersion::V2_1_0),
            _ => Err(CodecError::unsupported_version(claim)),
        }
    }
}

impl fmt::Display for ProtocolVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtocolVersion {
    type Err = CodecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_claim(s)
    }
}
