use crate::PackageList;
use std::borrow::Cow;
use std::collections::HashMap;
use tracing::instrument;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Count {
    files: usize,
    /// Position of the first occurrence, used to break ties when ranking.
    first_seen: usize,
}

/// Number of file associations per package identifier.
///
/// Built in one go from an iterator of identifiers (or through
/// [`Tally::from_lines`]) and read-only afterwards.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: HashMap<Vec<u8>, Count>,
    total: usize,
}

impl FrequencyTable {
    fn record(&mut self, package: &[u8]) {
        // Look up by slice first; only new packages pay for an owned key.
        match self.counts.get_mut(package) {
            Some(count) => count.files += 1,
            None => {
                let first_seen = self.counts.len();
                self.counts.insert(package.to_vec(), Count { files: 1, first_seen });
            },
        }
        self.total += 1;
    }

    /// Number of files associated with `package`, if it was seen at all.
    pub fn get(&self, package: impl AsRef<[u8]>) -> Option<usize> {
        self.counts.get(package.as_ref()).map(|count| count.files)
    }

    /// Number of distinct package identifiers.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts: the number of file/package associations recorded.
    pub fn total(&self) -> usize {
        self.total
    }

    /// The `limit` most common packages, most files first.
    ///
    /// Packages with equal counts keep the order in which they were first
    /// encountered, so the ranking is deterministic for a given input. A
    /// `limit` beyond the number of distinct packages returns all of them.
    ///
    /// ```
    /// use debstat_contents::FrequencyTable;
    ///
    /// let table: FrequencyTable = [&b"b"[..], b"a", b"a", b"c"].into_iter().collect();
    /// let top: Vec<_> = table.top(2).into_iter().map(|r| (r.name().into_owned(), r.count)).collect();
    /// assert_eq!(top, [("a".to_string(), 2), ("b".to_string(), 1)]);
    /// ```
    pub fn top(&self, limit: usize) -> Vec<Ranked> {
        let mut entries: Vec<(&Vec<u8>, &Count)> = self.counts.iter().collect();
        entries.sort_unstable_by_key(|(_, count)| count.first_seen);
        // Stable, so equal counts stay in first-seen order.
        entries.sort_by(|(_, a), (_, b)| b.files.cmp(&a.files));
        entries
            .into_iter()
            .take(limit)
            .enumerate()
            .map(|(index, (package, count))| Ranked {
                rank: index + 1,
                package: package.clone(),
                count: count.files,
            })
            .collect()
    }
}

impl<'a> FromIterator<&'a [u8]> for FrequencyTable {
    fn from_iter<T: IntoIterator<Item = &'a [u8]>>(iter: T) -> Self {
        let mut table = Self::default();
        for package in iter {
            table.record(package);
        }
        table
    }
}

/// One row of a ranking produced by [`FrequencyTable::top`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ranked {
    /// 1-indexed position in the ranking.
    pub rank: usize,
    pub package: Vec<u8>,
    pub count: usize,
}

impl Ranked {
    /// The package identifier for display; invalid UTF-8 is replaced.
    pub fn name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.package)
    }
}

/// Everything learnt from one pass over a Contents file.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Tally {
    packages: FrequencyTable,
    rows: usize,
    malformed: usize,
}

impl Tally {
    /// Parse and count every line.
    ///
    /// Malformed lines are skipped and counted; they never stop the tally.
    #[instrument(skip(lines), fields(rows, malformed, packages))]
    pub fn from_lines<I, L>(lines: I) -> Self
    where
        I: IntoIterator<Item = L>,
        L: AsRef<[u8]>,
    {
        let mut tally = Self::default();
        for line in lines {
            let line = line.as_ref();
            tally.rows += 1;
            match PackageList::parse(line) {
                Some(list) => list.iter().for_each(|package| tally.packages.record(package)),
                None => {
                    tracing::trace!(row = tally.rows, line = %String::from_utf8_lossy(line), "malformed line");
                    tally.malformed += 1;
                },
            }
        }
        let span = tracing::Span::current();
        span.record("rows", tally.rows);
        span.record("malformed", tally.malformed);
        span.record("packages", tally.packages.len());
        tally
    }

    pub fn packages(&self) -> &FrequencyTable {
        &self.packages
    }

    /// Number of lines seen, malformed ones included.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of lines without a package list.
    pub fn malformed(&self) -> usize {
        self.malformed
    }
}

#[cfg(test)]
mod tests {
    use super::{FrequencyTable, Tally};
    use rstest::rstest;

    const SAMPLE: &str = "\
usr/lib/python3/dist-packages/kajiki-0.9.2.egg-info/requires.txt python/python3-kajiki
usr/lib/python3/dist-packages/kajiki/__init__.py        python/python3-kajiki
usr/lib/python3/dist-packages/kajiki/__main__.py        python/python3-kajiki
usr/lib/python3/dist-packages/kajiki/doctype.py         python/python3-kajiki
usr/lib/python3/dist-packages/kajiki/html_utils.py      python/python3-kajiki
usr/lib/python3/dist-packages/kajiki/i18n.py            python/python3-kajiki
var/lib/wims/public_html/modules/help/example/oefquicktool.fr/src/practice_pasts_case.oef web/wims-help
var/lib/wims/public_html/modules/help/example/oefquicktool.fr/src/voca_histoire.oef web/wims-help
var/lib/wims/public_html/modules/help/example/oefquicktool.fr/src/word_stress_patterns_tonic.oef web/wims-help
usr/lib/python3/dist-packages/mailman/templates/he/list:user:notice:warning.txt mail/mailman3
usr/lib/python3/dist-packages/mailman/templates/he/list:user:notice:welcome.txt mail/mailman3
usr/lib/python3/dist-packages/mailman/templates/hu/list:admin:notice:disable.txt mail/mailman3
usr/lib/python3/dist-packages/mailman/templates/hu/list:admin:notice:removal.txt mail/mailman3";

    fn ranking(table: &FrequencyTable, limit: usize) -> Vec<(String, usize)> {
        table.top(limit).into_iter().map(|r| (r.name().into_owned(), r.count)).collect()
    }

    #[test]
    fn test_tally_scenario() {
        let tally = Tally::from_lines(["a/path file1.txt pkg/one,pkg/two", "b/path file2.txt pkg/one", "bad-line-no-package"]);
        assert_eq!(tally.rows(), 3);
        assert_eq!(tally.malformed(), 1);
        assert_eq!(tally.packages().len(), 2);
        assert_eq!(tally.packages().get("pkg/one"), Some(2));
        assert_eq!(tally.packages().get("pkg/two"), Some(1));
        assert_eq!(tally.packages().get("bad-line-no-package"), None);
    }

    #[test]
    fn test_tally_sample() {
        let tally = Tally::from_lines(SAMPLE.lines());
        assert_eq!(tally.malformed(), 0);
        assert_eq!(
            ranking(tally.packages(), 10),
            [
                ("python/python3-kajiki".to_string(), 6),
                ("mail/mailman3".to_string(), 4),
                ("web/wims-help".to_string(), 3),
            ]
        );
    }

    #[test]
    fn test_counts_every_association() {
        // The same package listed twice on one line counts twice.
        let tally = Tally::from_lines(["usr/bin/x pkg/a,pkg/a", "usr/bin/y pkg/a,pkg/b"]);
        assert_eq!(tally.packages().get("pkg/a"), Some(3));
        assert_eq!(tally.packages().total(), 4);
    }

    #[test]
    fn test_empty_identifiers_are_counted() {
        let tally = Tally::from_lines(["usr/bin/x ,pkg/a", "usr/bin/y pkg/b,"]);
        assert_eq!(tally.packages().get(""), Some(2));
        assert_eq!(tally.packages().len(), 3);
    }

    #[test]
    fn test_blank_lines_are_malformed() {
        let tally = Tally::from_lines(["", "   ", "usr/bin/x pkg/a"]);
        assert_eq!(tally.rows(), 3);
        assert_eq!(tally.malformed(), 2);
        assert_eq!(tally.packages().total(), 1);
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(3, 3)]
    #[case(4, 3)]
    #[case(usize::MAX, 3)]
    fn test_top_limit(#[case] limit: usize, #[case] expected: usize) {
        let tally = Tally::from_lines(SAMPLE.lines());
        let top = tally.packages().top(limit);
        assert_eq!(top.len(), expected);
        assert!(top.iter().enumerate().all(|(index, ranked)| ranked.rank == index + 1));
    }

    #[test]
    fn test_top_everything_sums_to_total() {
        let tally = Tally::from_lines(SAMPLE.lines().chain(["usr/bin/x pkg/a,pkg/b,python/python3-kajiki"]));
        let table = tally.packages();
        let everything = table.top(table.len());
        assert_eq!(everything.len(), table.len());
        assert_eq!(everything.iter().map(|r| r.count).sum::<usize>(), table.total());
        assert_eq!(table.total(), 16);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let tally = Tally::from_lines(["f1 pkg/c", "f2 pkg/a", "f3 pkg/b", "f4 pkg/b", "f5 pkg/c"]);
        assert_eq!(
            ranking(tally.packages(), 3),
            [("pkg/c".to_string(), 2), ("pkg/b".to_string(), 2), ("pkg/a".to_string(), 1)]
        );
    }

    #[test]
    fn test_tally_is_repeatable() {
        let first = Tally::from_lines(SAMPLE.lines());
        let second = Tally::from_lines(SAMPLE.lines());
        assert_eq!(first, second);
        assert_eq!(ranking(first.packages(), 10), ranking(second.packages(), 10));
    }

    #[test]
    fn test_line_order_only_changes_ties() {
        let forward = Tally::from_lines(SAMPLE.lines());
        let reversed = Tally::from_lines(SAMPLE.lines().rev());
        let table = forward.packages();
        for ranked in table.top(table.len()) {
            assert_eq!(reversed.packages().get(&ranked.package), Some(ranked.count));
        }
        assert_eq!(ranking(forward.packages(), 10), ranking(reversed.packages(), 10));
    }
}
