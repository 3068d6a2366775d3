use tracing::{debug, trace};

use crate::tokenizer::{Token, tokenize};

/// Kerning gap, in thousandths of a text space unit, above which two glyphs
/// are considered to sit in different table columns.
///
/// Tuned against the generator of the court statistics reports; documents
/// from another producer may need a different value.
pub const KERNING_THRESHOLD: f64 = 500.0;

/// Fragment text whose presence marks a page as carrying table data.
pub const DATA_PAGE_MARKER: &str = "Filings";

/// Turns content stream tokens into an ordered list of text fragments.
///
/// Empty fragments are line-break sentinels, inserted when a `TD`/`Td`
/// moves to another line or a `Tm` starts a new text block.
#[derive(Debug, Clone)]
pub struct TextExtractor {
    kerning_threshold: f64,
    /// Current `Tc` in text space units.
    character_spacing: f64,
}

impl Default for TextExtractor {
    fn default() -> Self {
        Self::with_threshold(KERNING_THRESHOLD)
    }
}

impl TextExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a kerning threshold other than [`KERNING_THRESHOLD`].
    pub fn with_threshold(kerning_threshold: f64) -> Self {
        TextExtractor {
            kerning_threshold,
            character_spacing: 0.,
        }
    }

    pub fn kerning_threshold(&self) -> f64 {
        self.kerning_threshold
    }

    /// Extract the fragments of one page content stream.
    ///
    /// Character spacing starts at zero for every call, so one extractor can
    /// be reused across pages.
    pub fn extract(&mut self, stream: &[u8]) -> Vec<String> {
        self.character_spacing = 0.;
        let mut items = Vec::new();
        let mut operands: Vec<Token> = Vec::new();

        for token in tokenize(stream) {
            let operator = match token {
                Token::Operator(operator) => operator,
                operand => {
                    operands.push(operand);
                    continue;
                }
            };
            trace!("{} {:?}", operator, operands);

            match operator.as_str() {
                "Tj" => {
                    if let Some(Token::String(s)) = operands.last() {
                        if self.spacing_thousandths().abs() > self.kerning_threshold {
                            // Each glyph lands in its own column.
                            items.extend(s.chars().map(String::from));
                        } else {
                            items.push(s.clone());
                        }
                    }
                }
                "TJ" => {
                    if let Some(Token::Array(children)) = operands.last() {
                        items.extend(self.process_array(children));
                    }
                }
                "TD" | "Td" => {
                    if operands.len() >= 2 {
                        let ty = operands.last().and_then(Token::as_number);
                        if ty.is_some_and(|ty| ty != 0.) {
                            items.push(String::new());
                        }
                    }
                }
                "Tm" => items.push(String::new()),
                "Tc" => {
                    if let Some(tc) = operands.last().and_then(Token::as_number) {
                        self.character_spacing = tc;
                    }
                }
                _ => {}
            }
            operands.clear();
        }

        items
    }

    fn spacing_thousandths(&self) -> f64 {
        self.character_spacing * 1000.
    }

    /// Split a `TJ` array into fragments.
    ///
    /// The gap before each glyph is `Tc*1000` minus the displacements seen
    /// since the previous glyph. Displacements roughly equal to `Tc*1000`
    /// cancel the character spacing and keep neighbours together; a gap
    /// above the threshold starts a new fragment.
    fn process_array(&self, children: &[Token]) -> Vec<String> {
        let spacing = self.spacing_thousandths();
        let mut items = Vec::new();
        let mut current = String::new();
        let mut gap = spacing;

        for child in children {
            match child {
                Token::String(s) => {
                    for c in s.chars() {
                        if !current.is_empty() && gap.abs() > self.kerning_threshold {
                            items.push(std::mem::take(&mut current));
                        }
                        current.push(c);
                        gap = spacing;
                    }
                }
                Token::Number(_) => {
                    if let Some(displacement) = child.as_number() {
                        gap -= displacement;
                    }
                }
                _ => {}
            }
        }

        if !current.is_empty() {
            items.push(current);
        }
        items
    }
}

/// Extract fragments with the default kerning threshold.
pub fn extract_text_items(stream: &[u8]) -> Vec<String> {
    TextExtractor::default().extract(stream)
}

/// Whether a page's fragments include the `Filings` section label.
///
/// Cover and summary pages without the table fail this check and are skipped
/// before parsing.
pub fn contains_filings(items: &[String]) -> bool {
    let found = items.iter().any(|item| item == DATA_PAGE_MARKER);
    debug!("data page: {}", found);
    found
}
