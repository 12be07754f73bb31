// src/omission.rs
//
// Some translations leave verse numbers out entirely. Reconciliation puts an
// empty placeholder back at each such number so passage keys stay canonical.

use std::{
    collections::{BTreeMap, HashMap, HashSet},
    sync::LazyLock,
};

use crate::core::{catalog, numbers::FIRST_PASSAGE_MARKER};
use crate::range::FetchUnit;

type Address = (String, u32, u32);

const ASV: &[&str] = &[
    "Matthew 17:21", "Matthew 18:11", "Matthew 23:14",
    "Mark 7:16", "Mark 9:44", "Mark 9:46", "Mark 11:26", "Mark 15:28",
    "Luke 17:36", "Luke 23:17",
    "John 5:4",
    "Acts 8:37", "Acts 15:34", "Acts 24:7", "Acts 28:29",
    "Romans 16:24",
];

const EHV: &[&str] = &[
    "Matthew 23:14", "Mark 15:28", "Luke 17:36",
    "Acts 8:37", "Acts 15:34", "Acts 24:7", "Acts 28:29",
    "Romans 16:24",
];

const ISV: &[&str] = &[
    "Mark 15:28", "Luke 17:36", "Acts 8:37", "Acts 15:34", "Acts 24:7", "Acts 28:29",
];

const NASB: &[&str] = &[
    "Matthew 17:21", "Matthew 18:11", "Matthew 23:14",
    "Mark 7:16", "Mark 9:44", "Mark 9:46", "Mark 15:28",
    "John 5:4",
    "Acts 8:37", "Acts 15:34", "Acts 24:7", "Acts 28:29",
    "Romans 16:24",
];

/// Known omissions for the supported translations.
pub static BUILTIN: LazyLock<OmissionTable> = LazyLock::new(|| {
    let esv = ASV.iter().copied().chain(["Matthew 12:47"]);

    OmissionTable::new()
        .with("ASV", ASV.iter().copied())
        .with("EHV", EHV.iter().copied())
        .with("ESV", esv.clone())
        .with("ESVUK", esv)
        .with("GW", ASV.iter().copied())
        .with("ISV", ISV.iter().copied())
        .with("LEB", asv_except("Romans 16:24"))
        .with("NASB", NASB.iter().copied())
        .with("NET", asv_except("Acts 24:7"))
        .with("NLT", ASV.iter().copied())
        .with("NOG", asv_except("Mark 7:16"))
        .with("NRSV", ASV.iter().copied())
});

fn asv_except(drop: &'static str) -> impl Iterator<Item = &'static str> {
    ASV.iter().copied().filter(move |a| *a != drop)
}

/// Translation -> omitted `(book, chapter, passage)` addresses.
#[derive(Clone, Debug, Default)]
pub struct OmissionTable {
    by_translation: HashMap<String, HashSet<Address>>,
}

impl OmissionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `"Book C:P"` entries for `translation`. Entries that do not parse are ignored.
    pub fn with<'a, I>(mut self, translation: &str, entries: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let set = self.by_translation.entry(translation.to_uppercase()).or_default();
        set.extend(entries.into_iter().filter_map(parse_address));
        self
    }

    pub fn has_omissions(&self, translation: &str) -> bool {
        self.by_translation
            .get(&translation.to_uppercase())
            .is_some_and(|set| !set.is_empty())
    }

    pub fn is_omitted(&self, translation: &str, book: &str, chapter: u32, passage: u32) -> bool {
        self.by_translation
            .get(&translation.to_uppercase())
            .is_some_and(|set| set.contains(&(catalog::normalize(book), chapter, passage)))
    }

    /// Omitted passage numbers of one chapter, looked up once per unit.
    pub fn omitted_in_chapter(&self, translation: &str, book: &str, chapter: u32) -> HashSet<u32> {
        let Some(set) = self.by_translation.get(&translation.to_uppercase()) else {
            return HashSet::new();
        };
        let book = catalog::normalize(book);
        set.iter()
            .filter(|(b, c, _)| *b == book && *c == chapter)
            .map(|(_, _, p)| *p)
            .collect()
    }
}

fn parse_address(entry: &str) -> Option<Address> {
    let (book, cp) = entry.trim().rsplit_once(' ')?;
    let (c, p) = cp.split_once(':')?;
    Some((catalog::normalize(book), c.parse().ok()?, p.parse().ok()?))
}

/// Number the raw texts of one unit, starting at its first passage.
///
/// Before each text is consumed, every omitted number at the cursor gets an
/// empty entry. With numbers shown, the first passage of a chapter gets the
/// `¹ ` marker if the source left it out.
pub fn reconcile(
    unit: &FetchUnit,
    raw: Vec<String>,
    translation: &str,
    show_numbers: bool,
    table: &OmissionTable,
) -> BTreeMap<u32, String> {
    let omitted = table.omitted_in_chapter(translation, &unit.book, unit.chapter);
    let mut cursor = unit.passage_from;
    let mut out = BTreeMap::new();

    for text in raw {
        while omitted.contains(&cursor) {
            out.insert(cursor, s!());
            cursor += 1;
        }
        let text = if cursor == 1 && show_numbers && !text.starts_with(FIRST_PASSAGE_MARKER) {
            join!(FIRST_PASSAGE_MARKER, &text)
        } else {
            text
        };
        out.insert(cursor, text);
        cursor += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(v: &[&str]) -> Vec<String> {
        v.iter().map(|s| s!(*s)).collect()
    }

    #[test]
    fn placeholder_for_omitted_verse() {
        let unit = FetchUnit::new("Romans", 16, 23, 25);
        let got = reconcile(&unit, raw(&["²³ a", "²⁵ c"]), "ASV", true, &BUILTIN);
        let keys: Vec<_> = got.keys().copied().collect();
        assert_eq!(keys, vec![23, 24, 25]);
        assert_eq!(got[&24], "");
        assert_eq!(got[&25], "²⁵ c");
    }

    #[test]
    fn consecutive_omissions_all_get_placeholders() {
        let table = OmissionTable::new().with("XYZ", ["Mark 9:44", "Mark 9:45"]);
        let unit = FetchUnit::new("Mark", 9, 43, 46);
        let got = reconcile(&unit, raw(&["a", "d"]), "xyz", false, &table);
        assert_eq!(got.into_iter().collect::<Vec<_>>(), vec![
            (43, s!("a")), (44, s!()), (45, s!()), (46, s!("d")),
        ]);
    }

    #[test]
    fn first_passage_marker() {
        let unit = FetchUnit::new("Genesis", 1, 1, 2);
        let got = reconcile(&unit, raw(&["In the beginning", "² Now"]), "NIV", true, &BUILTIN);
        assert_eq!(got[&1], "¹ In the beginning");

        let hidden = reconcile(&unit, raw(&["In the beginning"]), "NIV", false, &BUILTIN);
        assert_eq!(hidden[&1], "In the beginning");

        let already = reconcile(&unit, raw(&["¹ In"]), "NIV", true, &BUILTIN);
        assert_eq!(already[&1], "¹ In");
    }

    #[test]
    fn builtin_variants() {
        assert!(BUILTIN.is_omitted("esv", "Matthew", 12, 47));
        assert!(!BUILTIN.is_omitted("ASV", "Matthew", 12, 47));
        assert!(!BUILTIN.is_omitted("LEB", "Romans", 16, 24));
        assert!(!BUILTIN.is_omitted("NET", "Acts", 24, 7));
        assert!(!BUILTIN.is_omitted("NOG", "Mark", 7, 16));
        assert!(!BUILTIN.has_omissions("NIV"));
    }

    #[test]
    fn chapter_lookup_normalizes_the_book() {
        let mut mark: Vec<u32> = BUILTIN.omitted_in_chapter("nasb", "mark", 9).into_iter().collect();
        mark.sort();
        assert_eq!(mark, vec![44, 46]);
        assert!(BUILTIN.omitted_in_chapter("NIV", "Mark", 9).is_empty());

        let unit = FetchUnit::new("romans", 16, 23, 25);
        let got = reconcile(&unit, raw(&["a", "c"]), "asv", false, &BUILTIN);
        assert_eq!(got[&24], "");
        assert_eq!(got[&25], "c");
    }

    #[test]
    fn bad_entries_are_inert() {
        let table = OmissionTable::new().with("ASV", ["nonsense", "Romans x:1"]);
        assert!(!table.has_omissions("ASV"));
    }
}
