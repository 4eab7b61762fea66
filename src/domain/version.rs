use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

static TAG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(v)?(\d+)\.(\d+)\.(\d+)$").expect("tag pattern is a valid regex")
});

/// Semantic version representation
///
/// Ordering is lexicographic over (major, minor, patch), which is exactly the
/// field order below.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl Version {
    /// The baseline used when a repository has no valid version tags
    pub const ZERO: Version = Version::new(0, 0, 0);

    /// Create a new version
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse version from a tag name (e.g., "v1.2.3" -> Version(1,2,3))
    ///
    /// Accepts an optional lowercase `v` prefix followed by exactly three
    /// dot-separated integers. Surrounding whitespace is ignored. Anything
    /// else, including pre-release or build suffixes, yields `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        let captures = TAG_PATTERN.captures(tag.trim())?;

        let major = captures.get(2)?.as_str().parse::<u32>().ok()?;
        let minor = captures.get(3)?.as_str().parse::<u32>().ok()?;
        let patch = captures.get(4)?.as_str().parse::<u32>().ok()?;

        Some(Version::new(major, minor, patch))
    }

    /// Render the version as a tag name, with a leading `v` iff `v_prefix`
    pub fn to_tag(&self, v_prefix: bool) -> String {
        if v_prefix {
            format!("v{}", self)
        } else {
            self.to_string()
        }
    }

    /// Bump version according to bump type
    ///
    /// Raising a component zeroes every lower component. Callers are expected
    /// to stop at `VersionBump::None`; if it does get here it bumps the patch.
    pub fn bump(&self, bump_type: VersionBump) -> Self {
        match bump_type {
            VersionBump::Major => Version::new(self.major.saturating_add(1), 0, 0),
            VersionBump::Minor => Version::new(self.major, self.minor.saturating_add(1), 0),
            VersionBump::Patch | VersionBump::None => {
                Version::new(self.major, self.minor, self.patch.saturating_add(1))
            }
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

/// Version bump type decision
///
/// Variants are declared from weakest to strongest so that `Ord` (and thus
/// `max`) gives the precedence major > minor > patch > none.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum VersionBump {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::None => "none",
            VersionBump::Patch => "patch",
            VersionBump::Minor => "minor",
            VersionBump::Major => "major",
        }
    }

    /// Whether this bump asks for a new tag at all
    pub fn is_release(&self) -> bool {
        !matches!(self, VersionBump::None)
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
