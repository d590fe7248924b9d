//! Line splitting of decompressed payloads.

use crate::Compression;
use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use std::io::{BufRead, BufReader, Read};
use tracing::instrument;

/// One raw record of a decompressed payload, without its `\n` terminator.
///
/// Index files are not guaranteed to be valid UTF-8, so lines stay as bytes.
pub type Line = Vec<u8>;

impl Compression {
    /// Decompress everything from `reader` and split it into lines.
    ///
    /// The `\n` terminator is removed from every line. A trailing terminator
    /// does not produce an empty final line, but a final line without one is
    /// still returned. Any decoding failure (corrupt or truncated payload)
    /// discards the lines read so far and returns
    /// [`ErrorKind::InvalidData`].
    ///
    /// # Examples
    ///
    /// ```
    /// use debstat_compress::Compression;
    /// use std::io::Cursor;
    ///
    /// let compressed = Compression::Gzip.compress(b"one\ntwo\n").unwrap();
    /// let lines = Compression::Gzip.lines(Cursor::new(compressed)).unwrap();
    /// assert_eq!(lines, vec![b"one".to_vec(), b"two".to_vec()]);
    /// ```
    #[instrument(skip(reader), fields(format = %self, lines))]
    pub fn lines<'a, R: Read + 'a>(&self, reader: R) -> Result<Vec<Line>> {
        let lines = BufReader::new(self.wrap_reader(reader))
            .split(b'\n')
            .collect::<std::io::Result<Vec<Line>>>()
            .or_raise(|| ErrorKind::InvalidData)?;
        tracing::Span::current().record("lines", lines.len());
        Ok(lines)
    }
}

#[cfg(test)]
mod tests {
    use crate::Compression;
    use rstest::rstest;
    use std::io::Cursor;

    const CONTENTS: &[u8] = b"\
usr/lib/python3/dist-packages/kajiki/__init__.py        python/python3-kajiki
usr/src/rustc-1.63.0/compiler/rustc/Windows Manifest.xml devel/rust-src
usr/share/doc/base-files/README admin/base-files,admin/base-passwd
";

    #[test]
    fn test_lines_reproduce_original() {
        let compressed = Compression::Gzip.compress(CONTENTS).unwrap();
        let lines = Compression::Gzip.lines(Cursor::new(compressed)).unwrap();
        assert_eq!(lines.len(), 3);

        let mut rebuilt = lines.join(&b'\n');
        rebuilt.push(b'\n');
        assert_eq!(rebuilt, CONTENTS);
    }

    #[rstest]
    #[case(b"one\ntwo", 2)]
    #[case(b"one\ntwo\n", 2)]
    #[case(b"one\n\ntwo\n", 3)]
    #[case(b"\n", 1)]
    fn test_line_terminators(#[case] payload: &[u8], #[case] expected: usize) {
        let compressed = Compression::Gzip.compress(payload).unwrap();
        let lines = Compression::Gzip.lines(compressed.as_slice()).unwrap();
        assert_eq!(lines.len(), expected);
        assert!(lines.iter().all(|line| !line.contains(&b'\n')));
    }

    #[test]
    fn test_lines_keep_carriage_returns_and_invalid_utf8() {
        let payload = b"dos/line\r\nlatin1 \xe9t\xe9\n";
        let compressed = Compression::Gzip.compress(payload).unwrap();
        let lines = Compression::Gzip.lines(compressed.as_slice()).unwrap();
        assert_eq!(lines, vec![b"dos/line\r".to_vec(), b"latin1 \xe9t\xe9".to_vec()]);
    }

    #[test]
    fn test_lines_span_every_member() {
        let mut concatenated = Compression::Gzip.compress(b"a/path pkg/one\n").unwrap();
        concatenated.extend(Compression::Gzip.compress(b"b/path pkg/two\n").unwrap());
        let lines = Compression::Gzip.lines(concatenated.as_slice()).unwrap();
        assert_eq!(lines, vec![b"a/path pkg/one".to_vec(), b"b/path pkg/two".to_vec()]);
    }

    #[test]
    fn test_lines_not_compressed() {
        let result = Compression::Gzip.lines(Cursor::new(b"plain text, no gzip header".to_vec()));
        assert!(result.is_err());
    }

    #[test]
    fn test_lines_truncated() {
        let compressed = Compression::Gzip.compress(&CONTENTS.repeat(32)).unwrap();
        let truncated = compressed[..compressed.len() - 12].to_vec();
        assert!(Compression::Gzip.lines(Cursor::new(truncated)).is_err());
    }
}
