/// The package-list field of one Contents line.
///
/// Borrowed from the line it was parsed from; identifiers are yielded as raw
/// byte slices and are never interpreted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PackageList<'a> {
    field: &'a [u8],
}

impl<'a> PackageList<'a> {
    /// Extract the package-list field from a raw line.
    ///
    /// The line is split on ASCII whitespace and the final token is the
    /// package list. File paths may contain spaces, so nothing before the
    /// final token is looked at beyond requiring that it exists. Returns
    /// `None` for a malformed line: one that is empty, whitespace-only, or
    /// holds a single token with no path in front of it.
    ///
    /// ```
    /// use debstat_contents::PackageList;
    ///
    /// let list = PackageList::parse(b"usr/bin/perl5.36.0   perl/perl-base,perl/perl").unwrap();
    /// let packages: Vec<&[u8]> = list.iter().collect();
    /// assert_eq!(packages, [&b"perl/perl-base"[..], &b"perl/perl"[..]]);
    ///
    /// assert!(PackageList::parse(b"bad-line-no-package").is_none());
    /// ```
    pub fn parse(line: &'a [u8]) -> Option<Self> {
        let mut tokens = line.split(u8::is_ascii_whitespace).filter(|token| !token.is_empty());
        let field = tokens.next_back()?;
        // Anything left is the (possibly space-separated) file path.
        tokens.next()?;
        Some(Self { field })
    }

    /// Iterate over the comma-separated package identifiers.
    ///
    /// A leading, trailing or doubled comma yields an empty identifier; it is
    /// passed through like any other.
    pub fn iter(&self) -> impl Iterator<Item = &'a [u8]> + 'a {
        let field = self.field;
        field.split(|byte| *byte == b',')
    }

    /// The raw, unsplit package-list field.
    pub fn as_bytes(&self) -> &'a [u8] {
        self.field
    }
}
