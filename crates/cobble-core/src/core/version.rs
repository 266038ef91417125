use crate::core::error::{CobbleError, CobbleResult};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Dotted numeric version ("1", "1.2", "1.2.3.4")
///
/// Segments compare as integers and missing segments count as zero, so
/// `1.2` and `1.2.0` are the same version.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Version {
    segments: Vec<u64>,
}

impl Version {
    pub fn new(segments: Vec<u64>) -> Self {
        Self { segments }
    }

    /// Parse a dotted version string (e.g., "1.0", "2.3.1", " 10.0.2.4 ")
    pub fn parse(s: &str) -> CobbleResult<Self> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CobbleError::Version("Empty version string".to_string()));
        }

        let segments = s
            .split('.')
            .map(|part| {
                // u64::from_str would also take a leading '+'
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(CobbleError::Version(format!(
                        "Invalid version segment '{}' in '{}'",
                        part, s
                    )));
                }
                part.parse::<u64>().map_err(|_| {
                    CobbleError::Version(format!(
                        "Invalid version segment '{}' in '{}'",
                        part, s
                    ))
                })
            })
            .collect::<CobbleResult<Vec<_>>>()?;

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    fn segment(&self, index: usize) -> u64 {
        self.segments.get(index).copied().unwrap_or(0)
    }
}

// Equality must agree with Ord, which pads missing segments with zeros
impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Version {}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| self.segment(i).cmp(&other.segment(i)))
            .find(|ordering| *ordering != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(|s| s.to_string()).collect();
        write!(f, "{}", parts.join("."))
    }
}

impl FromStr for Version {
    type Err = CobbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Version {
    type Error = CobbleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Version> for String {
    fn from(version: Version) -> Self {
        version.to_string()
    }
}

/// Quality tier of a build, ordered `alpha < beta < rc < stable`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ReleaseChannel {
    Alpha,
    Beta,
    Rc,
    Stable,
}

impl ReleaseChannel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReleaseChannel::Alpha => "alpha",
            ReleaseChannel::Beta => "beta",
            ReleaseChannel::Rc => "rc",
            ReleaseChannel::Stable => "stable",
        }
    }

    /// Parse a channel name, ignoring case and surrounding whitespace
    pub fn parse(s: &str) -> CobbleResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alpha" => Ok(ReleaseChannel::Alpha),
            "beta" => Ok(ReleaseChannel::Beta),
            "rc" => Ok(ReleaseChannel::Rc),
            "stable" => Ok(ReleaseChannel::Stable),
            _ => Err(CobbleError::Version(format!(
                "Unknown release channel '{}' (expected alpha, beta, rc or stable)",
                s.trim()
            ))),
        }
    }
}

impl fmt::Display for ReleaseChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReleaseChannel {
    type Err = CobbleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ReleaseChannel {
    type Error = CobbleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ReleaseChannel> for String {
    fn from(channel: ReleaseChannel) -> Self {
        channel.as_str().to_string()
    }
}
