//! Municipal court statistics extraction
//!
//! This library rebuilds the statistics table printed on each municipality
//! page of a municipal court report from the page's raw content stream:
//! tokenize the operators, turn kerned glyph runs into text fragments,
//! group fragments into lines, repair numbers split at their thousands
//! separator and map the lines onto the fixed section layout.

mod cmap;
mod error;
mod extract;
mod lines;
mod processor;
mod repair;
mod table;
mod tokenizer;
mod types;
mod utils;

// Re-export error types
pub use error::{Error, PageError, ParseError};

// Re-export extraction API
pub use extract::{
    DocumentReport, PageContent, StatsExtractor, StatsExtractorBuilder, from_bytes, from_path,
    from_reader,
};

// Re-export the page pipeline
pub use cmap::{GlyphMap, decode_hex_glyphs};
pub use lines::{Line, group_into_lines};
pub use processor::{
    DATA_PAGE_MARKER, KERNING_THRESHOLD, TextExtractor, contains_filings, extract_text_items,
};
pub use repair::{looks_like_comma_split, merge_comma_split_numbers};
pub use table::{PageParser, TITLE_MARKER, parse_page};
pub use tokenizer::{Token, tokenize};

// Re-export public types
pub use types::{
    MISSING_VALUE, MunicipalityRecord, ROW_WIDTH, RowData, RowShape, Section, SectionRef,
    SectionTwoRow, SectionWithChange,
};
