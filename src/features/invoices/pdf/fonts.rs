//! Built-in Helvetica faces with two single-byte encodings.
//!
//! The standard Type 1 faces ship with every PDF viewer, so nothing is
//! embedded. Each face is registered twice: once with plain
//! `WinAnsiEncoding` (ASCII, Latin-1, the euro sign and typographic quotes)
//! and once with a `/Differences` encoding that maps codes from 128 upwards
//! to the Latin Extended-A letters Baltic and Central European names use.
//! Text is split into runs per encoding before it is drawn. Widths come
//! from the Adobe core AFM files (thousandths of an em).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontFace {
    Regular,
    Bold,
}

/// Which of the two encodings a byte belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphSet {
    WinAnsi,
    Extended,
}

/// Consecutive bytes drawn with the same font resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRun {
    pub set: GlyphSet,
    pub bytes: Vec<u8>,
}

/// First code re-mapped by [`EXTENDED_GLYPHS`]
pub const FIRST_EXTENDED_CODE: u8 = 128;

const REPLACEMENT: u8 = b'?';

/// (character, glyph name, regular width, bold width)
const EXTENDED_GLYPHS: [(char, &str, u16, u16); 80] = [
    ('Ā', "Amacron", 667, 722),
    ('ā', "amacron", 556, 556),
    ('Ă', "Abreve", 667, 722),
    ('ă', "abreve", 556, 556),
    ('Ą', "Aogonek", 667, 722),
    ('ą', "aogonek", 556, 556),
    ('Ć', "Cacute", 722, 722),
    ('ć', "cacute", 500, 556),
    ('Č', "Ccaron", 722, 722),
    ('č', "ccaron", 500, 556),
    ('Ď', "Dcaron", 722, 722),
    ('ď', "dcaron", 643, 743),
    ('Đ', "Dcroat", 722, 722),
    ('đ', "dcroat", 556, 611),
    ('Ē', "Emacron", 667, 667),
    ('ē', "emacron", 556, 556),
    ('Ė', "Edotaccent", 667, 667),
    ('ė', "edotaccent", 556, 556),
    ('Ę', "Eogonek", 667, 667),
    ('ę', "eogonek", 556, 556),
    ('Ě', "Ecaron", 667, 667),
    ('ě', "ecaron", 556, 556),
    ('Ğ', "Gbreve", 778, 778),
    ('ğ', "gbreve", 556, 611),
    ('Ģ', "Gcommaaccent", 778, 778),
    ('ģ', "gcommaaccent", 556, 611),
    ('Ī', "Imacron", 278, 278),
    ('ī', "imacron", 278, 278),
    ('Į', "Iogonek", 278, 278),
    ('į', "iogonek", 222, 278),
    ('İ', "Idotaccent", 278, 278),
    ('ı', "dotlessi", 278, 278),
    ('Ķ', "Kcommaaccent", 667, 722),
    ('ķ', "kcommaaccent", 500, 556),
    ('Ĺ', "Lacute", 556, 611),
    ('ĺ', "lacute", 222, 278),
    ('Ļ', "Lcommaaccent", 556, 611),
    ('ļ', "lcommaaccent", 222, 278),
    ('Ľ', "Lcaron", 556, 611),
    ('ľ', "lcaron", 299, 400),
    ('Ł', "Lslash", 556, 611),
    ('ł', "lslash", 222, 278),
    ('Ń', "Nacute", 722, 722),
    ('ń', "nacute", 556, 611),
    ('Ņ', "Ncommaaccent", 722, 722),
    ('ņ', "ncommaaccent", 556, 611),
    ('Ň', "Ncaron", 722, 722),
    ('ň', "ncaron", 556, 611),
    ('Ō', "Omacron", 778, 778),
    ('ō', "omacron", 556, 611),
    ('Ő', "Ohungarumlaut", 778, 778),
    ('ő', "ohungarumlaut", 556, 611),
    ('Ŕ', "Racute", 722, 722),
    ('ŕ', "racute", 333, 389),
    ('Ŗ', "Rcommaaccent", 722, 722),
    ('ŗ', "rcommaaccent", 333, 389),
    ('Ř', "Rcaron", 722, 722),
    ('ř', "rcaron", 333, 389),
    ('Ś', "Sacute", 667, 667),
    ('ś', "sacute", 500, 556),
    ('Ş', "Scedilla", 667, 667),
    ('ş', "scedilla", 500, 556),
    ('Ș', "Scommaaccent", 667, 667),
    ('ș', "scommaaccent", 500, 556),
    ('Ţ', "Tcommaaccent", 611, 611),
    ('ţ', "tcommaaccent", 278, 333),
    ('Ť', "Tcaron", 611, 611),
    ('ť', "tcaron", 317, 389),
    ('Ū', "Umacron", 722, 722),
    ('ū', "umacron", 556, 611),
    ('Ů', "Uring", 722, 722),
    ('ů', "uring", 556, 611),
    ('Ű', "Uhungarumlaut", 722, 722),
    ('ű', "uhungarumlaut", 556, 611),
    ('Ų', "Uogonek", 722, 722),
    ('ų', "uogonek", 556, 611),
    ('Ź', "Zacute", 611, 611),
    ('ź', "zacute", 500, 500),
    ('Ż', "Zdotaccent", 611, 611),
    ('ż', "zdotaccent", 500, 500),
];

/// WinAnsiEncoding code points 128..=159 that differ from Latin-1
const WIN_ANSI_HIGH: [(char, u8); 27] = [
    ('€', 0x80),
    ('‚', 0x82),
    ('ƒ', 0x83),
    ('„', 0x84),
    ('…', 0x85),
    ('†', 0x86),
    ('‡', 0x87),
    ('ˆ', 0x88),
    ('‰', 0x89),
    ('Š', 0x8A),
    ('‹', 0x8B),
    ('Œ', 0x8C),
    ('Ž', 0x8E),
    ('‘', 0x91),
    ('’', 0x92),
    ('“', 0x93),
    ('”', 0x94),
    ('•', 0x95),
    ('–', 0x96),
    ('—', 0x97),
    ('˜', 0x98),
    ('™', 0x99),
    ('š', 0x9A),
    ('›', 0x9B),
    ('œ', 0x9C),
    ('ž', 0x9E),
    ('Ÿ', 0x9F),
];

/// Helvetica, codes 32..=126
const REGULAR_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 48-63
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 80-95
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // 96-111
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 112-126
];

/// Helvetica-Bold, codes 32..=126
const BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // 32-47
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 48-63
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // 64-79
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // 80-95
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // 96-111
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // 112-126
];

/// Helvetica, WinAnsi codes 128..=255 (0 marks an undefined code)
const REGULAR_HIGH: [u16; 128] = [
    556, 0, 222, 556, 333, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 128-143
    0, 222, 222, 333, 333, 350, 556, 1000, 333, 1000, 500, 333, 944, 0, 500, 667, // 144-159
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 160-175
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 176-191
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 192-207
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 208-223
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278, // 224-239
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500, // 240-255
];

/// Helvetica-Bold, WinAnsi codes 128..=255 (0 marks an undefined code)
const BOLD_HIGH: [u16; 128] = [
    556, 0, 278, 556, 500, 1000, 556, 556, 333, 1000, 667, 333, 1000, 0, 611, 0, // 128-143
    0, 278, 278, 500, 500, 350, 556, 1000, 333, 1000, 556, 333, 944, 0, 500, 667, // 144-159
    278, 333, 556, 556, 556, 556, 280, 556, 333, 737, 370, 556, 584, 333, 737, 333, // 160-175
    400, 584, 333, 333, 333, 611, 556, 278, 333, 333, 365, 556, 834, 834, 834, 611, // 176-191
    722, 722, 722, 722, 722, 722, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278, // 192-207
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611, // 208-223
    556, 556, 556, 556, 556, 556, 889, 556, 556, 556, 556, 556, 278, 278, 278, 278, // 224-239
    611, 611, 611, 611, 611, 611, 611, 584, 611, 611, 611, 611, 611, 556, 611, 556, // 240-255
];

impl FontFace {
    /// Name under which the face and encoding are registered in the page resources
    pub fn resource_name(self, set: GlyphSet) -> &'static str {
        match (self, set) {
            (FontFace::Regular, GlyphSet::WinAnsi) => "F1",
            (FontFace::Bold, GlyphSet::WinAnsi) => "F2",
            (FontFace::Regular, GlyphSet::Extended) => "F3",
            (FontFace::Bold, GlyphSet::Extended) => "F4",
        }
    }

    pub fn base_font(self) -> &'static str {
        match self {
            FontFace::Regular => "Helvetica",
            FontFace::Bold => "Helvetica-Bold",
        }
    }

    fn code_width(self, set: GlyphSet, code: u8) -> u16 {
        match set {
            GlyphSet::Extended => {
                let (_, _, regular, bold) =
                    EXTENDED_GLYPHS[usize::from(code - FIRST_EXTENDED_CODE)];
                match self {
                    FontFace::Regular => regular,
                    FontFace::Bold => bold,
                }
            }
            GlyphSet::WinAnsi if code >= 128 => {
                let table = match self {
                    FontFace::Regular => &REGULAR_HIGH,
                    FontFace::Bold => &BOLD_HIGH,
                };
                table[usize::from(code - 128)]
            }
            GlyphSet::WinAnsi => {
                let table = match self {
                    FontFace::Regular => &REGULAR_ASCII,
                    FontFace::Bold => &BOLD_ASCII,
                };
                table[usize::from(code.saturating_sub(32))]
            }
        }
    }

    /// Advance width of `text` at `size` points, as drawn after [`encode_runs`].
    pub fn width_of_text_at_size(self, text: &str, size: f32) -> f32 {
        let units: u32 = encode_runs(text)
            .iter()
            .flat_map(|run| run.bytes.iter().map(move |code| (run.set, *code)))
            .map(|(set, code)| u32::from(self.code_width(set, code)))
            .sum();
        units as f32 * size / 1000.0
    }
}

fn encode_char(c: char) -> Option<(GlyphSet, u8)> {
    // Romanian comma-below letters share the cedilla-era glyphs
    let c = match c {
        'Ț' => 'Ţ',
        'ț' => 'ţ',
        '\u{A0}' => ' ',
        other => other,
    };

    if (' '..='~').contains(&c) || ('\u{A1}'..='\u{FF}').contains(&c) {
        return u8::try_from(u32::from(c))
            .ok()
            .map(|code| (GlyphSet::WinAnsi, code));
    }

    if let Some((_, code)) = WIN_ANSI_HIGH.iter().find(|(glyph, _)| *glyph == c) {
        return Some((GlyphSet::WinAnsi, *code));
    }

    EXTENDED_GLYPHS
        .iter()
        .position(|(glyph, ..)| *glyph == c)
        .and_then(|index| u8::try_from(index).ok())
        .map(|index| (GlyphSet::Extended, FIRST_EXTENDED_CODE + index))
}

/// Split `text` into per-encoding runs for `Tj` operands.
///
/// Characters neither encoding covers become `?` and are logged.
pub fn encode_runs(text: &str) -> Vec<TextRun> {
    let mut runs: Vec<TextRun> = Vec::new();
    let mut unsupported = 0usize;

    for c in text.chars() {
        let (set, code) = encode_char(c).unwrap_or_else(|| {
            unsupported += 1;
            (GlyphSet::WinAnsi, REPLACEMENT)
        });

        match runs.last_mut() {
            Some(run) if run.set == set => run.bytes.push(code),
            _ => runs.push(TextRun {
                set,
                bytes: vec![code],
            }),
        }
    }

    if unsupported > 0 {
        tracing::warn!(
            "Invoice PDF text {:?} has {} characters without a Helvetica glyph",
            text,
            unsupported
        );
    }

    runs
}

/// Glyph names for the `/Differences` array, starting at [`FIRST_EXTENDED_CODE`]
pub fn extended_glyph_names() -> impl Iterator<Item = &'static str> {
    EXTENDED_GLYPHS.iter().map(|(_, name, ..)| *name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn single_run(text: &str) -> TextRun {
        let runs = encode_runs(text);
        assert_eq!(runs.len(), 1, "{:?}", runs);
        runs.into_iter().next().unwrap()
    }

    #[test]
    fn test_ascii_passes_through() {
        let run = single_run("Nr.: EV-1");
        assert_eq!(run.set, GlyphSet::WinAnsi);
        assert_eq!(run.bytes, b"Nr.: EV-1".to_vec());
    }

    #[test]
    fn test_latin1_and_euro_keep_win_ansi_codes() {
        let run = single_run("Müller Café €5");
        assert_eq!(run.bytes, b"M\xfcller Caf\xe9 \x805".to_vec());
        assert!(!run.bytes.contains(&REPLACEMENT));
    }

    #[test]
    fn test_lithuanian_text_uses_both_encodings() {
        let runs = encode_runs("Sąskaita „Žalias“");
        assert_eq!(
            runs,
            vec![
                TextRun {
                    set: GlyphSet::WinAnsi,
                    bytes: b"S".to_vec(),
                },
                TextRun {
                    set: GlyphSet::Extended,
                    bytes: vec![FIRST_EXTENDED_CODE + 5],
                },
                TextRun {
                    set: GlyphSet::WinAnsi,
                    bytes: b"skaita \x84\x8ealias\x93".to_vec(),
                },
            ]
        );
    }

    #[test]
    fn test_polish_letters_are_supported() {
        let runs = encode_runs("Łódź");
        assert!(runs.iter().all(|run| !run.bytes.contains(&REPLACEMENT)));
        assert_eq!(runs[0].set, GlyphSet::Extended);
        assert_eq!(runs[1].bytes, vec![0xF3, b'd']);
        assert_eq!(runs[2].set, GlyphSet::Extended);
    }

    #[test]
    fn test_romanian_comma_below_aliases() {
        assert_eq!(encode_runs("ț"), encode_runs("ţ"));
    }

    #[test]
    fn test_unknown_characters_are_replaced() {
        let run = single_run("漢字");
        assert_eq!(run.bytes, b"??".to_vec());
    }

    #[test]
    fn test_widths_follow_metrics() {
        // "Suma" = 667 + 556 + 833 + 556
        let width = FontFace::Regular.width_of_text_at_size("Suma", 10.0);
        assert!((width - 26.12).abs() < 1e-3);

        let bold = FontFace::Bold.width_of_text_at_size("Suma", 10.0);
        assert!(bold > width);
    }

    #[test]
    fn test_accented_letters_use_base_width() {
        let plain = FontFace::Regular.width_of_text_at_size("Saskaita", 10.0);
        let accented = FontFace::Regular.width_of_text_at_size("Sąskaita", 10.0);
        assert!((plain - accented).abs() < 1e-3);

        let cafe = FontFace::Bold.width_of_text_at_size("Cafe", 10.0);
        let cafe_accented = FontFace::Bold.width_of_text_at_size("Café", 10.0);
        assert!((cafe - cafe_accented).abs() < 1e-3);
    }

    #[test]
    fn test_every_defined_code_has_a_width() {
        for c in ('\u{A1}'..='\u{FF}').chain(WIN_ANSI_HIGH.iter().map(|(c, _)| *c)) {
            for face in [FontFace::Regular, FontFace::Bold] {
                assert!(face.width_of_text_at_size(&c.to_string(), 10.0) > 0.0, "{c}");
            }
        }
    }

    #[test]
    fn test_extended_glyph_names_fill_the_differences_range() {
        assert_eq!(extended_glyph_names().count(), EXTENDED_GLYPHS.len());
        assert!(usize::from(FIRST_EXTENDED_CODE) + EXTENDED_GLYPHS.len() <= 256);
    }
}
