//! Maps grouped lines onto the fixed statistics table.
//!
//! A page reads top to bottom as: title, date range, county, municipality,
//! some column-header lines, then the eight sections in a fixed order, each
//! a name line followed by two or three data rows. The parser walks that
//! layout with a single cursor and stops at the first line that does not fit.

use tracing::{debug, warn};

use crate::error::ParseError;
use crate::lines::{Line, group_into_lines};
use crate::repair::merge_comma_split_numbers;
use crate::types::{
    MunicipalityRecord, ROW_WIDTH, RowData, RowShape, Section, SectionTwoRow, SectionWithChange,
};

/// Text the first header line must contain.
pub const TITLE_MARKER: &str = "MUNICIPAL COURT";

/// Parse one page's fragments into a [`MunicipalityRecord`].
pub fn parse_page<S: AsRef<str>>(items: &[S]) -> Result<MunicipalityRecord, ParseError> {
    PageParser::new(group_into_lines(items)).parse()
}

/// Cursor over the lines of a single page.
#[derive(Debug)]
pub struct PageParser {
    lines: Vec<Line>,
    pos: usize,
}

impl PageParser {
    pub fn new(lines: Vec<Line>) -> PageParser {
        PageParser { lines, pos: 0 }
    }

    pub fn parse(mut self) -> Result<MunicipalityRecord, ParseError> {
        let title = self.next_joined("reading title")?;
        if !title.contains(TITLE_MARKER) {
            return Err(ParseError::MissingTitle {
                marker: TITLE_MARKER,
                found: title,
            });
        }
        let date_range = self.next_joined("reading date range")?;
        let county = self.next_joined("reading county")?;
        let municipality = self.next_joined("reading municipality")?;
        debug!("parsing {} / {} ({})", county, municipality, date_range);

        self.skip_to_first_section();

        Ok(MunicipalityRecord {
            county,
            municipality,
            date_range,
            filings: self.read_with_change(Section::Filings)?,
            resolutions: self.read_with_change(Section::Resolutions)?,
            clearance: self.read_two_row(Section::Clearance)?,
            clearance_pct: self.read_two_row(Section::ClearancePercent)?,
            backlog: self.read_with_change(Section::Backlog)?,
            backlog_per_100: self.read_with_change(Section::BacklogPer100)?,
            backlog_pct: self.read_two_row(Section::BacklogPercent)?,
            active_pending: self.read_with_change(Section::ActivePending)?,
        })
    }

    pub fn peek(&self) -> Option<&Line> {
        self.lines.get(self.pos)
    }

    pub fn next_line(&mut self, context: &str) -> Result<Line, ParseError> {
        let line = self
            .lines
            .get(self.pos)
            .cloned()
            .ok_or_else(|| ParseError::UnexpectedEnd {
                context: context.to_string(),
                line: self.pos,
            })?;
        self.pos += 1;
        Ok(line)
    }

    fn next_joined(&mut self, context: &str) -> Result<String, ParseError> {
        Ok(self.next_line(context)?.join(" "))
    }

    /// Skip column-header noise up to the first line naming a section.
    fn skip_to_first_section(&mut self) {
        while let Some(line) = self.peek() {
            if Section::from_line(line).is_some() {
                break;
            }
            debug!("skipping header line {}: {:?}", self.pos, line);
            self.pos += 1;
        }
    }

    fn read_section_name(&mut self, expected: Section) -> Result<(), ParseError> {
        let line = self.next_line(&format!("reading section name for {:?}", expected.name()))?;
        match Section::from_line(&line) {
            Some(found) if found == expected => Ok(()),
            found => Err(ParseError::SectionMismatch {
                expected: expected.name(),
                found: found.map_or_else(|| line.join(" "), |s| s.name().to_string()),
            }),
        }
    }

    /// Read one data row: repair split numbers, then pad or truncate to
    /// [`ROW_WIDTH`] fields.
    fn read_row(&mut self, section: Section) -> Result<RowData, ParseError> {
        let line = self.next_line(&format!("section {:?}: reading data row", section.name()))?;
        let line = merge_comma_split_numbers(line, ROW_WIDTH);
        if line.len() > ROW_WIDTH {
            warn!(
                "section {:?}: row has {} fields after merging, keeping the first {}: {:?}",
                section.name(),
                line.len(),
                ROW_WIDTH,
                line
            );
        }
        Ok(RowData::from_fields(line))
    }

    fn read_with_change(&mut self, section: Section) -> Result<SectionWithChange, ParseError> {
        debug_assert_eq!(section.shape(), RowShape::WithChange);
        self.read_section_name(section)?;
        Ok(SectionWithChange {
            prior_period: self.read_row(section)?,
            current_period: self.read_row(section)?,
            pct_change: self.read_row(section)?,
        })
    }

    fn read_two_row(&mut self, section: Section) -> Result<SectionTwoRow, ParseError> {
        debug_assert_eq!(section.shape(), RowShape::TwoRow);
        self.read_section_name(section)?;
        Ok(SectionTwoRow {
            prior_period: self.read_row(section)?,
            current_period: self.read_row(section)?,
        })
    }
}
