use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields in a table row: the label followed by nine column values.
pub const ROW_WIDTH: usize = 10;

/// Filler for cells missing from a short row.
pub const MISSING_VALUE: &str = "- -";

/// How many data rows follow a section's name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowShape {
    /// Prior period, current period and percent change.
    WithChange,
    /// Prior and current period only.
    TwoRow,
}

impl RowShape {
    pub fn row_count(self) -> usize {
        match self {
            RowShape::WithChange => 3,
            RowShape::TwoRow => 2,
        }
    }
}

/// The eight statistical sections, in the order they appear on a page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Filings,
    Resolutions,
    Clearance,
    ClearancePercent,
    Backlog,
    BacklogPer100,
    BacklogPercent,
    ActivePending,
}

/// Older reports print some sections under a different name.
const SECTION_ALIASES: &[(&str, Section)] = &[("Terminations", Section::Resolutions)];

impl Section {
    pub const ALL: [Section; 8] = [
        Section::Filings,
        Section::Resolutions,
        Section::Clearance,
        Section::ClearancePercent,
        Section::Backlog,
        Section::BacklogPer100,
        Section::BacklogPercent,
        Section::ActivePending,
    ];

    /// Canonical name, as printed by the report generator.
    pub fn name(self) -> &'static str {
        match self {
            Section::Filings => "Filings",
            Section::Resolutions => "Resolutions",
            Section::Clearance => "Clearance",
            Section::ClearancePercent => "Clearance Percent",
            Section::Backlog => "Backlog",
            Section::BacklogPer100 => "Backlog/100 Mthly Filings",
            Section::BacklogPercent => "Backlog Percent",
            Section::ActivePending => "Active Pending",
        }
    }

    pub fn shape(self) -> RowShape {
        match self {
            Section::Clearance | Section::ClearancePercent | Section::BacklogPercent => {
                RowShape::TwoRow
            }
            _ => RowShape::WithChange,
        }
    }

    /// Prefix used for this section's columns in flat (CSV) output.
    pub fn column_prefix(self) -> &'static str {
        match self {
            Section::Filings => "Filings",
            Section::Resolutions => "Resolutions",
            Section::Clearance => "Clearance",
            Section::ClearancePercent => "ClearancePct",
            Section::Backlog => "Backlog",
            Section::BacklogPer100 => "BacklogPer100",
            Section::BacklogPercent => "BacklogPct",
            Section::ActivePending => "ActivePending",
        }
    }

    /// Recognise a line as a section name.
    ///
    /// Spaces are ignored, so kerning splits such as `["F", "ilings"]` or
    /// `["Clearance", "Percent"]` still match. Aliases resolve to their
    /// canonical section.
    pub fn from_line<S: AsRef<str>>(line: &[S]) -> Option<Section> {
        let compact: String = line
            .iter()
            .flat_map(|item| item.as_ref().chars())
            .filter(|&c| c != ' ')
            .collect();
        let matches = |name: &str| name.chars().filter(|&c| c != ' ').eq(compact.chars());

        Section::ALL
            .into_iter()
            .find(|section| matches(section.name()))
            .or_else(|| {
                SECTION_ALIASES
                    .iter()
                    .find(|(alias, _)| matches(alias))
                    .map(|&(_, section)| section)
            })
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One table row. Values are kept as printed: they may hold commas, `%`,
/// a leading `-`, or `- -` for "not applicable".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RowData {
    pub label: String,
    pub indictables: String,
    pub dp_and_pdp: String,
    pub other_criminal: String,
    pub criminal_total: String,
    pub dwi: String,
    pub traffic_moving: String,
    pub parking: String,
    pub traffic_total: String,
    pub grand_total: String,
}

impl RowData {
    /// Column names in positional order.
    pub const COLUMNS: [&'static str; ROW_WIDTH] = [
        "Label",
        "Indictables",
        "DPAndPDP",
        "OtherCriminal",
        "CriminalTotal",
        "DWI",
        "TrafficMoving",
        "Parking",
        "TrafficTotal",
        "GrandTotal",
    ];

    /// Build a row positionally. Missing trailing cells become
    /// [`MISSING_VALUE`]; anything past [`ROW_WIDTH`] is ignored.
    pub fn from_fields<I>(fields: I) -> RowData
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut fields = fields.into_iter().map(Into::into);
        let mut next = || fields.next().unwrap_or_else(|| MISSING_VALUE.to_string());
        RowData {
            label: next(),
            indictables: next(),
            dp_and_pdp: next(),
            other_criminal: next(),
            criminal_total: next(),
            dwi: next(),
            traffic_moving: next(),
            parking: next(),
            traffic_total: next(),
            grand_total: next(),
        }
    }

    pub fn values(&self) -> [&str; ROW_WIDTH] {
        [
            self.label.as_str(),
            self.indictables.as_str(),
            self.dp_and_pdp.as_str(),
            self.other_criminal.as_str(),
            self.criminal_total.as_str(),
            self.dwi.as_str(),
            self.traffic_moving.as_str(),
            self.parking.as_str(),
            self.traffic_total.as_str(),
            self.grand_total.as_str(),
        ]
    }
}

/// A section with prior period, current period and percent change rows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionWithChange {
    pub prior_period: RowData,
    pub current_period: RowData,
    pub pct_change: RowData,
}

/// A section with prior and current period rows only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionTwoRow {
    pub prior_period: RowData,
    pub current_period: RowData,
}

/// The full statistics table of one municipality page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MunicipalityRecord {
    pub county: String,
    pub municipality: String,
    pub date_range: String,
    pub filings: SectionWithChange,
    pub resolutions: SectionWithChange,
    pub clearance: SectionTwoRow,
    #[serde(rename = "clearancePercent")]
    pub clearance_pct: SectionTwoRow,
    pub backlog: SectionWithChange,
    #[serde(rename = "backlogPer100MthlyFilings")]
    pub backlog_per_100: SectionWithChange,
    #[serde(rename = "backlogPercent")]
    pub backlog_pct: SectionTwoRow,
    pub active_pending: SectionWithChange,
}

impl MunicipalityRecord {
    /// Every row in table order, keyed by a flat name such as
    /// `Filings_Prior` or `ActivePending_PctChange`.
    pub fn rows(&self) -> Vec<(String, &RowData)> {
        let mut rows = Vec::with_capacity(21);
        for section in Section::ALL {
            let prefix = section.column_prefix();
            match self.section(section) {
                SectionRef::WithChange(s) => {
                    rows.push((format!("{}_Prior", prefix), &s.prior_period));
                    rows.push((format!("{}_Current", prefix), &s.current_period));
                    rows.push((format!("{}_PctChange", prefix), &s.pct_change));
                }
                SectionRef::TwoRow(s) => {
                    rows.push((format!("{}_Prior", prefix), &s.prior_period));
                    rows.push((format!("{}_Current", prefix), &s.current_period));
                }
            }
        }
        rows
    }

    pub fn section(&self, section: Section) -> SectionRef<'_> {
        match section {
            Section::Filings => SectionRef::WithChange(&self.filings),
            Section::Resolutions => SectionRef::WithChange(&self.resolutions),
            Section::Clearance => SectionRef::TwoRow(&self.clearance),
            Section::ClearancePercent => SectionRef::TwoRow(&self.clearance_pct),
            Section::Backlog => SectionRef::WithChange(&self.backlog),
            Section::BacklogPer100 => SectionRef::WithChange(&self.backlog_per_100),
            Section::BacklogPercent => SectionRef::TwoRow(&self.backlog_pct),
            Section::ActivePending => SectionRef::WithChange(&self.active_pending),
        }
    }
}

/// Borrowed view of one section of a [`MunicipalityRecord`].
#[derive(Debug, Clone, Copy)]
pub enum SectionRef<'a> {
    WithChange(&'a SectionWithChange),
    TwoRow(&'a SectionTwoRow),
}

impl fmt::Display for MunicipalityRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} / {} ({})", self.county, self.municipality, self.date_range)?;
        for (name, row) in self.rows() {
            writeln!(f, "  {:<26} {}", name, row.values().join(" | "))?;
        }
        Ok(())
    }
}
