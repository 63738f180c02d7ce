use std::fmt;
use std::str::FromStr;

use super::error::ParseError;

/// Which component of a version to increase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Bump {
    /// Breaking change.
    Major,
    /// Additive change.
    Minor,
    /// No structural change.
    Patch,
}

impl fmt::Display for Bump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Bump::Major => "major",
            Bump::Minor => "minor",
            Bump::Patch => "patch",
        })
    }
}

/// An immutable `MAJOR.MINOR.PATCH` version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VersionTriple {
    major: u64,
    minor: u64,
    patch: u64,
}

impl VersionTriple {
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }

    pub fn major(&self) -> u64 {
        self.major
    }

    pub fn minor(&self) -> u64 {
        self.minor
    }

    pub fn patch(&self) -> u64 {
        self.patch
    }

    pub fn bump_major(&self) -> Result<Self, ParseError> {
        let major = self.increment(self.major, Bump::Major)?;
        Ok(Self::new(major, 0, 0))
    }

    pub fn bump_minor(&self) -> Result<Self, ParseError> {
        let minor = self.increment(self.minor, Bump::Minor)?;
        Ok(Self::new(self.major, minor, 0))
    }

    pub fn bump_patch(&self) -> Result<Self, ParseError> {
        let patch = self.increment(self.patch, Bump::Patch)?;
        Ok(Self::new(self.major, self.minor, patch))
    }

    /// Applies `bump`, resetting the lower components.
    ///
    /// # Errors
    /// `ParseError::Overflow` if the bumped component is already `u64::MAX`.
    pub fn bump(&self, bump: Bump) -> Result<Self, ParseError> {
        match bump {
            Bump::Major => self.bump_major(),
            Bump::Minor => self.bump_minor(),
            Bump::Patch => self.bump_patch(),
        }
    }

    fn increment(&self, component: u64, bump: Bump) -> Result<u64, ParseError> {
        component.checked_add(1).ok_or_else(|| ParseError::Overflow {
            version: self.to_string(),
            bump,
        })
    }
}

/// Parses one component: ASCII digits only, no sign, no leading zeros.
fn parse_component(input: &str, component: &str) -> Result<u64, ParseError> {
    let invalid = || ParseError::Component {
        input: input.to_string(),
        component: component.to_string(),
    };
    let canonical = !component.is_empty()
        && component.bytes().all(|b| b.is_ascii_digit())
        && (component == "0" || !component.starts_with('0'));
    if !canonical {
        return Err(invalid());
    }
    component.parse().map_err(|_| invalid())
}

impl FromStr for VersionTriple {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.split('.').collect();
        let [major, minor, patch] = parts.as_slice() else {
            return Err(ParseError::Format(s.to_string()));
        };
        Ok(Self::new(
            parse_component(s, major)?,
            parse_component(s, minor)?,
            parse_component(s, patch)?,
        ))
    }
}

impl fmt::Display for VersionTriple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn parses_well_formed_versions() {
        assert_eq!("1.2.3".parse::<VersionTriple>(), Ok(VersionTriple::new(1, 2, 3)));
        assert_eq!("0.0.0".parse::<VersionTriple>(), Ok(VersionTriple::new(0, 0, 0)));
        assert_eq!("10.20.30".parse::<VersionTriple>(), Ok(VersionTriple::new(10, 20, 30)));
    }

    #[test]
    fn rejects_malformed_versions() {
        let inputs = [
            "", "1", "1.2", "1.2.3.4", "1..3", " 1.2.3", "1.2.3 ", "v1.2.3", "1.2.3-rc1",
        ];
        for input in inputs {
            assert!(input.parse::<VersionTriple>().is_err(), "accepted {input:?}");
        }
        assert_eq!(
            "1.2".parse::<VersionTriple>(),
            Err(ParseError::Format("1.2".into()))
        );
    }

    #[test]
    fn rejects_signs_and_leading_zeros() {
        for input in ["+1.2.3", "-1.2.3", "01.2.3", "1.02.3", "1.2.00"] {
            assert!(
                matches!(
                    input.parse::<VersionTriple>(),
                    Err(ParseError::Component { .. })
                ),
                "accepted {input:?}"
            );
        }
    }

    #[test]
    fn rejects_components_beyond_u64() {
        assert!("18446744073709551616.0.0".parse::<VersionTriple>().is_err());
    }

    #[test]
    fn bumps_reset_lower_components() {
        let version = VersionTriple::new(1, 2, 3);
        assert_eq!(version.bump_major(), Ok(VersionTriple::new(2, 0, 0)));
        assert_eq!(version.bump_minor(), Ok(VersionTriple::new(1, 3, 0)));
        assert_eq!(version.bump_patch(), Ok(VersionTriple::new(1, 2, 4)));
        assert_eq!(version.bump(Bump::Minor), version.bump_minor());
        // The receiver is untouched.
        assert_eq!(version, VersionTriple::new(1, 2, 3));
    }

    #[test]
    fn bumping_a_maximal_component_is_an_error() {
        let version = VersionTriple::new(u64::MAX, u64::MAX, u64::MAX);
        for bump in [Bump::Major, Bump::Minor, Bump::Patch] {
            assert_eq!(
                version.bump(bump),
                Err(ParseError::Overflow {
                    version: version.to_string(),
                    bump,
                })
            );
        }
        // Only the bumped component has to have room.
        assert_eq!(
            VersionTriple::new(1, u64::MAX, u64::MAX).bump_major(),
            Ok(VersionTriple::new(2, 0, 0))
        );
    }

    proptest! {
        #[test]
        fn prop_round_trip(major in 0u64..100_000, minor in 0u64..100_000, patch in 0u64..100_000) {
            let text = format!("{}.{}.{}", major, minor, patch);
            let parsed: VersionTriple = text.parse().unwrap();
            prop_assert_eq!(parsed.to_string(), text);
        }

        #[test]
        fn prop_bumps_increase_the_version(major in 0u64..1_000, minor in 0u64..1_000, patch in 0u64..1_000) {
            let version = VersionTriple::new(major, minor, patch);
            prop_assert!(version.bump_major().unwrap() > version);
            prop_assert!(version.bump_minor().unwrap() > version);
            prop_assert!(version.bump_patch().unwrap() > version);
        }
    }
}
