//! Semantic version parsing and bumping on top of the `semver` crate.

use semver::{BuildMetadata, Prerelease, Version};

use crate::domain::BumpKind;
use crate::error::{GitBumpError, Result};

/// Parse a version string, filling in missing minor/patch components.
///
/// `"1"` parses as `1.0.0` and `"1.2"` as `1.2.0`; anything after the
/// core (pre-release, build metadata) is kept as-is.
pub fn parse_version(input: &str) -> Result<Version> {
    let input = input.trim();
    let core_end = input.find(['-', '+']).unwrap_or(input.len());
    let (core, rest) = input.split_at(core_end);

    let padded = match core.split('.').count() {
        1 => format!("{}.0.0{}", core, rest),
        2 => format!("{}.0{}", core, rest),
        _ => input.to_string(),
    };

    Version::parse(&padded).map_err(|e| {
        GitBumpError::version(format!("Invalid version '{}': {}", input, e))
    })
}

/// Compute the next version for `kind`.
///
/// Release bumps drop any pre-release and build metadata. Pre-release
/// bumps increment the last numeric pre-release identifier, or start a
/// new `<label>.1` series on the next patch when `version` is a release.
pub fn bump_version(version: &Version, kind: BumpKind, label: &str) -> Result<Version> {
    let next = match kind {
        BumpKind::Major => Version::new(increment(version.major, version)?, 0, 0),
        BumpKind::Minor => Version::new(version.major, increment(version.minor, version)?, 0),
        BumpKind::Patch => Version::new(
            version.major,
            version.minor,
            increment(version.patch, version)?,
        ),
        BumpKind::Pre => {
            let mut next = version.clone();
            next.build = BuildMetadata::EMPTY;
            if version.pre.is_empty() {
                next.patch = increment(version.patch, version)?;
                next.pre = new_prerelease(&format!("{}.1", label))?;
            } else {
                let pre = increment_prerelease(version.pre.as_str())
                    .ok_or_else(|| overflow(version))?;
                next.pre = new_prerelease(&pre)?;
            }
            next
        }
    };
    Ok(next)
}

fn increment(component: u64, version: &Version) -> Result<u64> {
    component.checked_add(1).ok_or_else(|| overflow(version))
}

fn overflow(version: &Version) -> GitBumpError {
    GitBumpError::version(format!("Cannot bump {}: component overflows", version))
}

/// Returns `None` when the numeric identifier is already `u64::MAX`.
fn increment_prerelease(pre: &str) -> Option<String> {
    let mut identifiers: Vec<String> = pre.split('.').map(str::to_string).collect();

    let last_numeric = identifiers
        .iter()
        .rposition(|id| !id.is_empty() && id.chars().all(|c| c.is_ascii_digit()));

    match last_numeric.and_then(|i| identifiers[i].parse::<u64>().ok().map(|n| (i, n))) {
        Some((i, n)) => identifiers[i] = n.checked_add(1)?.to_string(),
        None => identifiers.push("1".to_string()),
    }

    Some(identifiers.join("."))
}

fn new_prerelease(pre: &str) -> Result<Prerelease> {
    Prerelease::new(pre).map_err(|e| {
        GitBumpError::version(format!("Invalid pre-release identifier '{}': {}", pre, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_parse_full_version() {
        assert_eq!(parse_version("1.2.3").unwrap(), Version::new(1, 2, 3));
    }

    #[test]
    fn test_parse_fills_missing_components() {
        assert_eq!(parse_version("1").unwrap(), Version::new(1, 0, 0));
        assert_eq!(parse_version("1.2").unwrap(), Version::new(1, 2, 0));
        assert_eq!(parse_version("1.2-rc.1").unwrap(), v("1.2.0-rc.1"));
    }

    #[test]
    fn test_parse_keeps_prerelease_and_build() {
        let parsed = parse_version("2.0.0-dev.3+abc").unwrap();
        assert_eq!(parsed.pre.as_str(), "dev.3");
        assert_eq!(parsed.build.as_str(), "abc");
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_version("").is_err());
        assert!(parse_version("release").is_err());
        assert!(parse_version("1.2.3.4").is_err());
        assert!(parse_version("1.x.3").is_err());
    }

    #[test]
    fn test_bump_major() {
        let bumped = bump_version(&v("1.2.3"), BumpKind::Major, "dev").unwrap();
        assert_eq!(bumped, Version::new(2, 0, 0));
    }

    #[test]
    fn test_bump_minor() {
        let bumped = bump_version(&v("1.2.3"), BumpKind::Minor, "dev").unwrap();
        assert_eq!(bumped, Version::new(1, 3, 0));
    }

    #[test]
    fn test_bump_patch() {
        let bumped = bump_version(&v("1.2.3"), BumpKind::Patch, "dev").unwrap();
        assert_eq!(bumped, Version::new(1, 2, 4));
    }

    #[test]
    fn test_release_bump_drops_prerelease() {
        let bumped = bump_version(&v("1.2.3-dev.4+build"), BumpKind::Patch, "dev").unwrap();
        assert_eq!(bumped, Version::new(1, 2, 4));
    }

    #[test]
    fn test_pre_from_release_starts_series_on_next_patch() {
        let bumped = bump_version(&v("1.1.0"), BumpKind::Pre, "dev").unwrap();
        assert_eq!(bumped, v("1.1.1-dev.1"));
    }

    #[test]
    fn test_pre_uses_configured_label() {
        let bumped = bump_version(&v("0.3.0"), BumpKind::Pre, "rc").unwrap();
        assert_eq!(bumped, v("0.3.1-rc.1"));
    }

    #[test]
    fn test_pre_increments_existing_series() {
        assert_eq!(
            bump_version(&v("1.1.1-dev.1"), BumpKind::Pre, "dev").unwrap(),
            v("1.1.1-dev.2")
        );
        assert_eq!(
            bump_version(&v("2.0.0-rc.9"), BumpKind::Pre, "dev").unwrap(),
            v("2.0.0-rc.10")
        );
    }

    #[test]
    fn test_pre_appends_number_when_none_present() {
        assert_eq!(
            bump_version(&v("2.0.0-rc"), BumpKind::Pre, "dev").unwrap(),
            v("2.0.0-rc.1")
        );
    }

    #[test]
    fn test_pre_increments_last_numeric_identifier() {
        assert_eq!(
            bump_version(&v("1.0.0-alpha.1.beta"), BumpKind::Pre, "dev").unwrap(),
            v("1.0.0-alpha.2.beta")
        );
    }

    #[test]
    fn test_pre_rejects_invalid_label() {
        assert!(bump_version(&v("1.0.0"), BumpKind::Pre, "not valid!").is_err());
    }

    #[test]
    fn test_bump_overflow_is_error() {
        let max = u64::MAX;
        let cases = [
            (Version::new(max, 0, 0), BumpKind::Major),
            (Version::new(1, max, 0), BumpKind::Minor),
            (Version::new(1, 0, max), BumpKind::Patch),
            (Version::new(1, 0, max), BumpKind::Pre),
            (v("1.0.0-rc.18446744073709551615"), BumpKind::Pre),
        ];

        for (version, kind) in cases {
            let err = bump_version(&version, kind, "dev").unwrap_err();
            assert!(
                matches!(err, GitBumpError::Version(_)),
                "{} bump of {} gave {:?}",
                kind,
                version,
                err
            );
        }
    }

    #[test]
    fn test_every_bump_increases_version() {
        let versions = [
            "0.0.0",
            "0.0.1",
            "1.1.0",
            "1.2.3",
            "9.9.9",
            "1.0.0-rc",
            "1.0.0-dev.1",
            "1.0.0-alpha.beta",
            "3.4.5-rc.1+build.7",
        ];
        let kinds = [BumpKind::Major, BumpKind::Minor, BumpKind::Patch, BumpKind::Pre];

        for version in versions {
            let current = v(version);
            for kind in kinds {
                let next = bump_version(&current, kind, "dev").unwrap();
                assert!(
                    next > current,
                    "{} bump of {} gave {}, which is not greater",
                    kind,
                    current,
                    next
                );
            }
        }
    }
}
