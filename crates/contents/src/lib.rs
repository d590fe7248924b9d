//! Parsing and tallying of Debian `Contents-<arch>` index files.
//!
//! A Contents file maps every installed file path to the packages that ship
//! it, one record per line:
//!
//! ```text
//! usr/share/doc/base-files/README                 admin/base-files
//! usr/src/rustc/compiler/rustc/Windows Manifest.xml devel/rust-src
//! usr/share/man/man1/perl.1.gz                    perl/perl,perl/perl-doc
//! ```
//!
//! [`PackageList::parse`] pulls the package list out of one line, and
//! [`Tally::from_lines`] counts every file association across a whole file
//! into a [`FrequencyTable`] that can be ranked.

mod parse;
mod tally;

pub use crate::parse::PackageList;
pub use crate::tally::{FrequencyTable, Ranked, Tally};
