use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

/// Two-byte glyph id to Unicode mapping, read from a font's `ToUnicode`
/// CMap.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlyphMap {
    glyphs: HashMap<u16, char>,
}

impl GlyphMap {
    /// Parse a `ToUnicode` CMap stream.
    ///
    /// Both `bfchar` and `bfrange` mappings are read. Codes wider than two
    /// bytes and targets that are not a single UTF-16 code point are
    /// skipped. A stream that does not parse yields an empty map.
    pub fn parse(data: &[u8]) -> GlyphMap {
        // The parser can panic on truncated input.
        let parsed = panic::catch_unwind(AssertUnwindSafe(|| {
            adobe_cmap_parser::get_unicode_map(data)
        }));
        let cmap = match parsed {
            Ok(Ok(cmap)) => cmap,
            Ok(Err(e)) => {
                warn!("failed to parse ToUnicode CMap: {:?}", e);
                return GlyphMap::default();
            }
            Err(_) => {
                warn!("ToUnicode CMap parser panicked, using an empty map");
                return GlyphMap::default();
            }
        };

        let mut glyphs = HashMap::with_capacity(cmap.len());
        for (&code, target) in cmap.iter() {
            let Ok(glyph) = u16::try_from(code) else {
                debug!("skipping wide code {:#x}", code);
                continue;
            };
            // Targets are UTF-16BE.
            let units = target
                .chunks_exact(2)
                .map(|pair| u16::from_be_bytes([pair[0], pair[1]]));
            match char::decode_utf16(units).next() {
                Some(Ok(c)) => {
                    glyphs.insert(glyph, c);
                }
                _ => debug!("skipping glyph {:#06x} with target {:02X?}", glyph, target),
            }
        }
        GlyphMap { glyphs }
    }

    pub fn get(&self, glyph: u16) -> Option<char> {
        self.glyphs.get(&glyph).copied()
    }

    pub fn insert(&mut self, glyph: u16, c: char) {
        self.glyphs.insert(glyph, c);
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl FromIterator<(u16, char)> for GlyphMap {
    fn from_iter<T: IntoIterator<Item = (u16, char)>>(iter: T) -> Self {
        GlyphMap {
            glyphs: iter.into_iter().collect(),
        }
    }
}

/// Decode a hex string of big-endian two-byte glyph ids.
///
/// Whitespace inside the string is ignored and glyphs missing from `map`
/// are dropped. A string that is not valid hex decodes to nothing; a
/// trailing odd byte is ignored.
pub fn decode_hex_glyphs(hex: &str, map: &GlyphMap) -> String {
    let digits: Vec<u8> = hex
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    if digits.len() % 2 != 0 {
        return String::new();
    }
    let Some(bytes) = digits
        .chunks_exact(2)
        .map(|pair| Some((hex_value(pair[0])? << 4) | hex_value(pair[1])?))
        .collect::<Option<Vec<u8>>>()
    else {
        return String::new();
    };

    bytes
        .chunks_exact(2)
        .filter_map(|pair| map.get(u16::from_be_bytes([pair[0], pair[1]])))
        .collect()
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}
