//! Arabic text canonicalization used on both sides of every search: songs are
//! normalized once when written, queries are normalized when read, and both
//! go through [`normalize`] so equal-after-normalization strings always match.

/// Diacritics (fathatan through sukun), superscript alef and tatweel. These
/// are dropped outright rather than replaced.
const TASHKEEL: std::ops::RangeInclusive<char> = '\u{064B}'..='\u{0652}';
const SUPERSCRIPT_ALEF: char = '\u{0670}';
const TATWEEL: char = '\u{0640}';

/// Alef with hamza above/below, alef with madda and alef wasla.
const ALEF_VARIANTS: [(char, char); 4] = [
    ('\u{0623}', '\u{0627}'),
    ('\u{0625}', '\u{0627}'),
    ('\u{0622}', '\u{0627}'),
    ('\u{0671}', '\u{0627}'),
];

/// Taa marbuta, alef maksura, waw with hamza, yaa with hamza.
const LETTER_VARIANTS: [(char, char); 4] = [
    ('\u{0629}', '\u{0647}'),
    ('\u{0649}', '\u{064A}'),
    ('\u{0624}', '\u{0648}'),
    ('\u{0626}', '\u{064A}'),
];

const ARABIC_BLOCK: std::ops::RangeInclusive<char> = '\u{0600}'..='\u{06FF}';

fn is_stripped(c: char) -> bool {
    TASHKEEL.contains(&c) || c == SUPERSCRIPT_ALEF || c == TATWEEL
}

fn lookup(table: &[(char, char)], c: char) -> Option<char> {
    table
        .iter()
        .find_map(|&(from, to)| (from == c).then_some(to))
}

/// Canonical search form of `text`.
///
/// Blank input yields an empty string. Diacritics are removed first, then each
/// surviving character is remapped once through the alef table or, failing
/// that, the letter table. Everything else passes through untouched.
pub fn normalize(text: &str) -> String {
    if text.trim().is_empty() {
        return String::new();
    }

    text.chars()
        .filter(|&c| !is_stripped(c))
        .map(|c| {
            lookup(&ALEF_VARIANTS, c)
                .or_else(|| lookup(&LETTER_VARIANTS, c))
                .unwrap_or(c)
        })
        .collect()
}

/// True when the trimmed text is one or more ASCII digits and nothing else.
pub fn is_numeric_only(text: &str) -> bool {
    let trimmed = text.trim();
    !trimmed.is_empty() && trimmed.chars().all(|c| c.is_ascii_digit())
}

/// True when any character falls in the Arabic Unicode block.
pub fn contains_arabic(text: &str) -> bool {
    text.chars().any(|c| ARABIC_BLOCK.contains(&c))
}

/// Parse the first run of ASCII digits in `text`, e.g. `42` in "Hymn 42".
/// Returns `None` when there is no run or it overflows `i64`.
pub fn first_number(text: &str) -> Option<i64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}
