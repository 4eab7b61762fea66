use crate::domain::Version;

/// A tag name that parsed as a semantic version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub name: String,
    pub version: Version,
}

impl Tag {
    /// Accept a tag name as a version candidate, or `None` if it does not
    /// follow `[v]MAJOR.MINOR.PATCH`
    pub fn parse(name: &str) -> Option<Self> {
        Version::parse(name).map(|version| Tag {
            name: name.trim().to_string(),
            version,
        })
    }
}

/// `refs/tags/<name>`
pub fn ref_name(tag_name: &str) -> String {
    format!("refs/tags/{}", tag_name)
}

/// Pick the highest versioned tag among `names`
///
/// Names that are not valid versions are skipped. When two names carry the
/// same version (`v1.2.3` and `1.2.3`) the first one listed is kept.
pub fn latest<S: AsRef<str>>(names: &[S]) -> Option<Tag> {
    names
        .iter()
        .filter_map(|name| Tag::parse(name.as_ref()))
        .fold(None, |best: Option<Tag>, candidate| match best {
            Some(current) if candidate.version <= current.version => Some(current),
            _ => Some(candidate),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_parse() {
        let tag = Tag::parse("v1.2.3").unwrap();
        assert_eq!(tag.name, "v1.2.3");
        assert_eq!(tag.version, Version::new(1, 2, 3));
        assert_eq!(ref_name(&tag.name), "refs/tags/v1.2.3");
    }

    #[test]
    fn test_tag_parse_rejects_suffix() {
        assert!(Tag::parse("v1.2.3-rc.1").is_none());
    }

    #[test]
    fn test_latest_uses_numeric_order() {
        let names = ["v1.9.0", "v1.10.0", "v1.2.30", "nightly", "v2.0.0-beta"];
        let tag = latest(&names).unwrap();
        assert_eq!(tag.name, "v1.10.0");
    }

    #[test]
    fn test_latest_mixed_prefixes() {
        let names = ["0.9.0", "v0.10.1", "0.10.0"];
        assert_eq!(latest(&names).unwrap().version, Version::new(0, 10, 1));
    }

    #[test]
    fn test_latest_keeps_first_of_equal_versions() {
        let names = ["1.2.3", "v1.2.3"];
        assert_eq!(latest(&names).unwrap().name, "1.2.3");
    }

    #[test]
    fn test_latest_none_without_valid_tags() {
        assert!(latest(&["latest", "v1", "stable"]).is_none());
        assert!(latest::<String>(&[]).is_none());
    }
}
