// src/legacy/ansi.rs
//! Windows-1251 single-byte text codec
//!
//! Strings in the legacy records are stored one byte per character in the
//! Cyrillic ANSI code page. Characters outside the code page encode as `?`.

/// Code page 1251, bytes 0x80..=0xBF
const HIGH_HALF: [char; 64] = [
    '\u{0402}', '\u{0403}', '\u{201A}', '\u{0453}', '\u{201E}', '\u{2026}', '\u{2020}', '\u{2021}',
    '\u{20AC}', '\u{2030}', '\u{0409}', '\u{2039}', '\u{040A}', '\u{040C}', '\u{040B}', '\u{040F}',
    '\u{0452}', '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}', '\u{2022}', '\u{2013}', '\u{2014}',
    '\u{0098}', '\u{2122}', '\u{0459}', '\u{203A}', '\u{045A}', '\u{045C}', '\u{045B}', '\u{045F}',
    '\u{00A0}', '\u{040E}', '\u{045E}', '\u{0408}', '\u{00A4}', '\u{0490}', '\u{00A6}', '\u{00A7}',
    '\u{0401}', '\u{00A9}', '\u{0404}', '\u{00AB}', '\u{00AC}', '\u{00AD}', '\u{00AE}', '\u{0407}',
    '\u{00B0}', '\u{00B1}', '\u{0406}', '\u{0456}', '\u{0491}', '\u{00B5}', '\u{00B6}', '\u{00B7}',
    '\u{0451}', '\u{2116}', '\u{0454}', '\u{00BB}', '\u{0458}', '\u{0405}', '\u{0455}', '\u{0457}',
];

const REPLACEMENT: u8 = b'?';

/// Encode one character, `None` when the code page lacks it
fn encode_char(c: char) -> Option<u8> {
    match c {
        '\u{0000}'..='\u{007F}' => Some(c as u8),
        // А..я are contiguous in both tables
        '\u{0410}'..='\u{044F}' => Some((c as u32 - 0x0410 + 0xC0) as u8),
        _ => HIGH_HALF.iter().position(|&h| h == c).map(|i| 0x80 + i as u8),
    }
}

/// Encode `text`, replacing unmappable characters with `?`
pub fn encode(text: &str) -> Vec<u8> {
    text.chars().map(|c| encode_char(c).unwrap_or(REPLACEMENT)).collect()
}

/// Decode Windows-1251 `bytes`
pub fn decode(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|&b| match b {
            0x00..=0x7F => b as char,
            0x80..=0xBF => HIGH_HALF[(b - 0x80) as usize],
            _ => char::from_u32(0x0410 + (b - 0xC0) as u32).unwrap_or(REPLACEMENT as char),
        })
        .collect()
}
