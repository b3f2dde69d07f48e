//! Script detection and whitespace helpers shared by the title rules and
//! the guidance locale detection.

/// Whether `c` belongs to a CJK script (Han, Kana, Hangul) or is CJK
/// punctuation / full-width form.
pub const fn is_cjk(c: char) -> bool {
    matches!(
        c,
        '\u{1100}'..='\u{11FF}'     // Hangul Jamo
            | '\u{2E80}'..='\u{2FDF}' // CJK radicals
            | '\u{3000}'..='\u{303F}' // CJK symbols and punctuation
            | '\u{3040}'..='\u{309F}' // Hiragana
            | '\u{30A0}'..='\u{30FF}' // Katakana
            | '\u{3130}'..='\u{318F}' // Hangul compatibility Jamo
            | '\u{3400}'..='\u{4DBF}' // CJK extension A
            | '\u{4E00}'..='\u{9FFF}' // CJK unified ideographs
            | '\u{AC00}'..='\u{D7AF}' // Hangul syllables
            | '\u{F900}'..='\u{FAFF}' // CJK compatibility ideographs
            | '\u{FF00}'..='\u{FFEF}' // Half/full-width forms
            | '\u{20000}'..='\u{2FA1F}' // CJK extensions B+
    )
}

pub fn contains_cjk(text: &str) -> bool {
    text.chars().any(is_cjk)
}

/// Whether `text` contains at least one alphanumeric non-CJK character,
/// i.e. some space-delimited script is present.
pub fn contains_spaced_script(text: &str) -> bool {
    text.chars().any(|c| c.is_alphanumeric() && !is_cjk(c))
}

/// Whitespace-delimited word count.
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Trim and collapse every run of whitespace into a single space.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
