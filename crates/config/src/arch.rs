use crate::error::{Error, ErrorKind};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

/// A Contents file variant published under `dists/<suite>/<component>/`.
///
/// Binary architectures, the `all` pseudo-architecture, source packages, and
/// the installer (`udeb`) pools each get their own file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Architecture {
    #[default]
    All,
    Amd64,
    Arm64,
    Armel,
    Armhf,
    I386,
    Mips64el,
    Mipsel,
    Ppc64el,
    S390x,
    Source,
    UdebAll,
    UdebAmd64,
    UdebArm64,
    UdebArmel,
    UdebArmhf,
    UdebI386,
    UdebMips64el,
    UdebMipsel,
    UdebPpc64el,
    UdebS390x,
}

impl Architecture {
    /// Every supported variant, in mirror directory listing order.
    pub const ALL: [Architecture; 21] = [
        Architecture::All,
        Architecture::Amd64,
        Architecture::Arm64,
        Architecture::Armel,
        Architecture::Armhf,
        Architecture::I386,
        Architecture::Mips64el,
        Architecture::Mipsel,
        Architecture::Ppc64el,
        Architecture::S390x,
        Architecture::Source,
        Architecture::UdebAll,
        Architecture::UdebAmd64,
        Architecture::UdebArm64,
        Architecture::UdebArmel,
        Architecture::UdebArmhf,
        Architecture::UdebI386,
        Architecture::UdebMips64el,
        Architecture::UdebMipsel,
        Architecture::UdebPpc64el,
        Architecture::UdebS390x,
    ];

    /// The name used by the mirror, as in `Contents-<name>.gz`.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::All => "all",
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
            Architecture::Armel => "armel",
            Architecture::Armhf => "armhf",
            Architecture::I386 => "i386",
            Architecture::Mips64el => "mips64el",
            Architecture::Mipsel => "mipsel",
            Architecture::Ppc64el => "ppc64el",
            Architecture::S390x => "s390x",
            Architecture::Source => "source",
            Architecture::UdebAll => "udeb-all",
            Architecture::UdebAmd64 => "udeb-amd64",
            Architecture::UdebArm64 => "udeb-arm64",
            Architecture::UdebArmel => "udeb-armel",
            Architecture::UdebArmhf => "udeb-armhf",
            Architecture::UdebI386 => "udeb-i386",
            Architecture::UdebMips64el => "udeb-mips64el",
            Architecture::UdebMipsel => "udeb-mipsel",
            Architecture::UdebPpc64el => "udeb-ppc64el",
            Architecture::UdebS390x => "udeb-s390x",
        }
    }
}

impl Display for Architecture {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        match Self::ALL.into_iter().find(|arch| arch.as_str() == wanted) {
            Some(arch) => Ok(arch),
            None => exn::bail!(ErrorKind::InvalidArchitecture(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Architecture;
    use crate::error::ErrorKind;
    use rstest::rstest;

    #[rstest]
    #[case("all", Architecture::All)]
    #[case("amd64", Architecture::Amd64)]
    #[case("ARM64", Architecture::Arm64)]
    #[case(" i386 ", Architecture::I386)]
    #[case("source", Architecture::Source)]
    #[case("udeb-all", Architecture::UdebAll)]
    #[case("udeb-s390x", Architecture::UdebS390x)]
    #[case("udeb-mips64el", Architecture::UdebMips64el)]
    fn test_from_str(#[case] test: &str, #[case] expected: Architecture) {
        assert_eq!(test.parse::<Architecture>().unwrap(), expected);
    }

    #[rstest]
    #[case("totally-armhf")]
    #[case("udeb_amd64")]
    #[case("x86_64")]
    #[case("")]
    fn test_from_str_invalid(#[case] test: &str) {
        let err = test.parse::<Architecture>().unwrap_err();
        assert_eq!(*err, ErrorKind::InvalidArchitecture(test.to_string()));
    }

    #[test]
    fn test_names_roundtrip_and_unique() {
        let mut names: Vec<&str> = Architecture::ALL.iter().map(Architecture::as_str).collect();
        for (arch, name) in Architecture::ALL.iter().zip(&names) {
            assert_eq!(name.parse::<Architecture>().unwrap(), *arch);
            assert_eq!(arch.to_string(), *name);
        }
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), Architecture::ALL.len());
    }
}
