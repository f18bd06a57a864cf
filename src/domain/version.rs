use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a bare "X.Y.Z" string (e.g., "1.2.3" -> Version(1,2,3))
    ///
    /// Each component must be a plain run of ASCII digits: no sign, no
    /// whitespace, no pre-release or build suffix.
    pub fn parse(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::format(format!(
                "Invalid version format: '{}' - expected X.Y.Z",
                text
            )));
        }

        let major = parse_component(parts[0], "major", text)?;
        let minor = parse_component(parts[1], "minor", text)?;
        let patch = parse_component(parts[2], "patch", text)?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to bump type
    ///
    /// Fails when the incremented component would not fit in a `u32`.
    pub fn bump(&self, kind: BumpKind) -> Result<Self> {
        let bumped = match kind {
            BumpKind::Major => Version {
                major: increment(self.major, "major", self)?,
                minor: 0,
                patch: 0,
            },
            BumpKind::Minor => Version {
                major: self.major,
                minor: increment(self.minor, "minor", self)?,
                patch: 0,
            },
            BumpKind::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: increment(self.patch, "patch", self)?,
            },
        };
        Ok(bumped)
    }
}

fn increment(component: u32, name: &str, version: &Version) -> Result<u32> {
    component.checked_add(1).ok_or_else(|| {
        ReleaseError::format(format!(
            "Cannot bump {} version of {}: {} is already at its maximum",
            name, version, component
        ))
    })
}

fn parse_component(part: &str, name: &str, text: &str) -> Result<u32> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReleaseError::format(format!(
            "Invalid {} version '{}' in '{}'",
            name, part, text
        )));
    }

    part.parse::<u32>().map_err(|_| {
        ReleaseError::format(format!(
            "{} version '{}' in '{}' is out of range",
            name, part, text
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Which version component a release increments
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum BumpKind {
    Major,
    Minor,
    Patch,
}

impl BumpKind {
    /// Lowercase name as accepted on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            BumpKind::Major => "major",
            BumpKind::Minor => "minor",
            BumpKind::Patch => "patch",
        }
    }
}

impl fmt::Display for BumpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BumpKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(BumpKind::Major),
            "minor" => Ok(BumpKind::Minor),
            "patch" => Ok(BumpKind::Patch),
            other => Err(ReleaseError::InvalidKind(other.to_string())),
        }
    }
}
