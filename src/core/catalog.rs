// src/core/catalog.rs
//
// Static book and translation tables. Everything here is read-only data plus
// lookups that never fail: unknown inputs map to 0 / "" / None.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Language {
    English,
    Spanish,
}

impl Language {
    /// Name as written into a document's `Info.Language`.
    pub fn name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Spanish => "Español",
        }
    }

    fn books(&self) -> (&'static [(&'static str, u32)], &'static [(&'static str, u32)]) {
        match self {
            Language::English => (ENGLISH_OT, ENGLISH_NT),
            Language::Spanish => (SPANISH_OT, SPANISH_NT),
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Translation {
    pub code: &'static str,
    pub language: Language,
    pub new_testament_only: bool,
    pub copyright: &'static str,
}

impl Translation {
    /// Canonical books with chapter counts, in canonical order.
    pub fn books(&self) -> impl Iterator<Item = (&'static str, u32)> + use<> {
        let (ot, nt) = self.language.books();
        let ot: &'static [(&'static str, u32)] = if self.new_testament_only { &[] } else { ot };
        ot.iter().chain(nt.iter()).copied()
    }
}

const fn t(code: &'static str, language: Language, copyright: &'static str) -> Translation {
    Translation { code, language, new_testament_only: false, copyright }
}

use Language::*;

const GW: &str = "https://www.biblegateway.com/versions/";

static TRANSLATIONS: &[Translation] = &[
    t("AMP", English, "Amplified-Bible-AMP/#copy"),
    t("ASV", English, "American-Standard-Version-ASV-Bible/#copy"),
    t("AKJV", English, "Authorized-King-James-Version-AKJV-Bible/#copy"),
    t("BRG", English, "BRG-Bible/#copy"),
    t("CSB", English, "Christian-Standard-Bible-CSB/#copy"),
    t("EHV", English, "Evangelical-Heritage-Version-EHV-Bible/#copy"),
    t("ESV", English, "English-Standard-Version-ESV-Bible/#copy"),
    t("ESVUK", English, "English-Standard-Version-Anglicised-ESV-Bible/#copy"),
    t("GNV", English, "1599-Geneva-Bible-GNV/#copy"),
    t("GW", English, "GODS-WORD-Translation-GW-Bible/#copy"),
    t("ISV", English, "International-Standard-Version-ISV-Bible/#copy"),
    t("JUB", English, "Jubilee-Bible-2000-JUB/#copy"),
    t("KJV", English, "King-James-Version-KJV-Bible/#copy"),
    t("KJ21", English, "21st-Century-King-James-Version-KJ21-Bible/#copy"),
    t("LEB", English, "Lexham-English-Bible-LEB/#copy"),
    t("LSB", English, "Legacy-Standard-Bible-LSB-Bible/#copy"),
    t("MEV", English, "Modern-English-Version-MEV-Bible/#copy"),
    t("NASB", English, "New-American-Standard-Bible-NASB/#copy"),
    t("NASB1995", English, "New-American-Standard-Bible-NASB1995/#copy"),
    t("NET", English, "New-English-Translation-NET-Bible/#copy"),
    t("NIV", English, "new-international-version-niv-bible/#copy"),
    t("NIVUK", English, "New-International-Version-UK-NIVUK-Bible/#copy"),
    t("NKJV", English, "New-King-James-Version-NKJV-Bible/#copy"),
    t("NLT", English, "New-Living-Translation-NLT-Bible/#copy"),
    t("NLV", English, "New-Life-Version-NLV-Bible/#copy"),
    Translation {
        code: "NMB",
        language: English,
        new_testament_only: true,
        copyright: "New-Matthew-Bible-NMB/#copy",
    },
    t("NOG", English, "Names-of-God-NOG-Bible/#copy"),
    // NRSV pages redirect to the updated edition
    t("NRSV", English, "New-Revised-Standard-Version-Updated-Edition-NRSVue-Bible/#copy"),
    t("NRSVUE", English, "New-Revised-Standard-Version-Updated-Edition-NRSVue-Bible/#copy"),
    t("RSV", English, "Revised-Standard-Version-RSV-Bible/#copy"),
    t("WEB", English, "World-English-Bible-WEB/#copy"),
    t("YLT", English, "Youngs-Literal-Translation-YLT-Bible/#copy"),
    t("RVA", Spanish, "Reina-Valera-Antigua-RVA-Biblia/#copy"),
];

static ENGLISH_OT: &[(&str, u32)] = &[
    ("Genesis", 50), ("Exodus", 40), ("Leviticus", 27), ("Numbers", 36), ("Deuteronomy", 34),
    ("Joshua", 24), ("Judges", 21), ("Ruth", 4), ("1 Samuel", 31), ("2 Samuel", 24),
    ("1 Kings", 22), ("2 Kings", 25), ("1 Chronicles", 29), ("2 Chronicles", 36), ("Ezra", 10),
    ("Nehemiah", 13), ("Esther", 10), ("Job", 42), ("Psalm", 150), ("Proverbs", 31),
    ("Ecclesiastes", 12), ("Song Of Songs", 8), ("Isaiah", 66), ("Jeremiah", 52),
    ("Lamentations", 5), ("Ezekiel", 48), ("Daniel", 12), ("Hosea", 14), ("Joel", 3),
    ("Amos", 9), ("Obadiah", 1), ("Jonah", 4), ("Micah", 7), ("Nahum", 3), ("Habakkuk", 3),
    ("Zephaniah", 3), ("Haggai", 2), ("Zechariah", 14), ("Malachi", 4),
];

static ENGLISH_NT: &[(&str, u32)] = &[
    ("Matthew", 28), ("Mark", 16), ("Luke", 24), ("John", 21), ("Acts", 28), ("Romans", 16),
    ("1 Corinthians", 16), ("2 Corinthians", 13), ("Galatians", 6), ("Ephesians", 6),
    ("Philippians", 4), ("Colossians", 4), ("1 Thessalonians", 5), ("2 Thessalonians", 3),
    ("1 Timothy", 6), ("2 Timothy", 4), ("Titus", 3), ("Philemon", 1), ("Hebrews", 13),
    ("James", 5), ("1 Peter", 5), ("2 Peter", 3), ("1 John", 5), ("2 John", 1), ("3 John", 1),
    ("Jude", 1), ("Revelation", 22),
];

static SPANISH_OT: &[(&str, u32)] = &[
    ("Génesis", 50), ("Éxodo", 40), ("Levítico", 27), ("Números", 36), ("Deuteronomio", 34),
    ("Josué", 24), ("Jueces", 21), ("Rut", 4), ("1 Samuel", 31), ("2 Samuel", 24),
    ("1 Reyes", 22), ("2 Reyes", 25), ("1 Crónicas", 29), ("2 Crónicas", 36), ("Esdras", 10),
    ("Nehemías", 13), ("Ester", 10), ("Job", 42), ("Salmos", 150), ("Proverbios", 31),
    ("Eclesiastés", 12), ("Cantares", 8), ("Isaías", 66), ("Jeremías", 52),
    ("Lamentaciones", 5), ("Ezequiel", 48), ("Daniel", 12), ("Oseas", 14), ("Joel", 3),
    ("Amós", 9), ("Abdías", 1), ("Jonás", 4), ("Miqueas", 7), ("Nahúm", 3), ("Habacuc", 3),
    ("Sofonías", 3), ("Hageo", 2), ("Zacarías", 14), ("Malaquías", 4),
];

static SPANISH_NT: &[(&str, u32)] = &[
    ("Mateo", 28), ("Marcos", 16), ("Lucas", 24), ("Juan", 21), ("Hechos", 28), ("Romanos", 16),
    ("1 Corintios", 16), ("2 Corintios", 13), ("Gálatas", 6), ("Efesios", 6),
    ("Filipenses", 4), ("Colosenses", 4), ("1 Tesalonicenses", 5), ("2 Tesalonicenses", 3),
    ("1 Timoteo", 6), ("2 Timoteo", 4), ("Tito", 3), ("Filemón", 1), ("Hebreos", 13),
    ("Santiago", 5), ("1 Pedro", 5), ("2 Pedro", 3), ("1 Juan", 5), ("2 Juan", 1),
    ("3 Juan", 1), ("Judas", 1), ("Apocalipsis", 22),
];

/* ---------------- Lookups ---------------- */

/// Case-insensitive translation lookup.
pub fn translation(code: &str) -> Option<&'static Translation> {
    TRANSLATIONS.iter().find(|t| t.code.eq_ignore_ascii_case(code))
}

pub fn is_supported(code: &str) -> bool {
    translation(code).is_some()
}

pub fn translations() -> impl Iterator<Item = &'static Translation> {
    TRANSLATIONS.iter()
}

/// NRSV and NRSVUE count as the same edition.
pub fn is_matching_translation(a: &str, b: &str) -> bool {
    let (a, b) = (a.to_uppercase(), b.to_uppercase());
    let nrsv = |s: &str| s == "NRSV" || s == "NRSVUE";
    a == b || (nrsv(&a) && nrsv(&b))
}

/// Capitalise the first letter of every word and lowercase the rest.
/// A word starts after any character that is not a letter ("1 samuel" -> "1 Samuel").
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_letter = false;
    for ch in s.chars() {
        if prev_letter {
            out.extend(ch.to_lowercase());
        } else {
            out.extend(ch.to_uppercase());
        }
        prev_letter = ch.is_alphabetic();
    }
    out
}

/// Canonical spelling of a book name. Idempotent.
pub fn normalize(book: &str) -> String {
    let titled = title_case(book);
    match titled.as_str() {
        "Song Of Solomon" => s!("Song Of Songs"),
        "Psalms" => s!("Psalm"),
        "Phillippians" => s!("Philippians"),
        _ => titled,
    }
}

/// Chapters in `book` under `translation`; 0 when either is unknown.
pub fn chapter_count(book: &str, translation_code: &str) -> u32 {
    let Some(tr) = translation(translation_code) else { return 0 };
    let book = normalize(book);
    tr.books()
        .find(|(name, _)| *name == book)
        .map(|(_, n)| n)
        .unwrap_or(0)
}

/// `Info.Language` for a translation; empty when unsupported.
pub fn language(translation_code: &str) -> &'static str {
    translation(translation_code).map(|t| t.language.name()).unwrap_or("")
}

pub fn copyright_url(translation_code: &str) -> String {
    translation(translation_code)
        .map(|t| join!(GW, t.copyright))
        .unwrap_or_default()
}

/// Minimal attribution for non-commercial quoting, e.g. `(NIV)`.
pub fn minimal_copyright(translation_code: &str) -> String {
    if is_supported(translation_code) {
        format!("({translation_code})")
    } else {
        s!()
    }
}
