mod common;

use common::{absecon_page, cover_page, out_of_order_page, pdf_with_pages, truncated_page};
use municourt::{
    MunicipalityRecord, ParseError, RowData, StatsExtractor, contains_filings, extract_text_items,
    parse_page,
};

fn values(row: &RowData) -> Vec<&str> {
    row.values().to_vec()
}

fn absecon() -> MunicipalityRecord {
    let items = extract_text_items(&absecon_page("Resolutions"));
    assert!(contains_filings(&items));
    parse_page(&items).unwrap()
}

#[test]
fn header_fields() {
    let record = absecon();
    assert_eq!(record.county, "ATLANTIC");
    assert_eq!(record.municipality, "ABSECON");
    assert_eq!(record.date_range, "JULY 2023 - JUNE 2024");
}

#[test]
fn filings_with_comma_split_repaired() {
    let record = absecon();
    assert_eq!(
        values(&record.filings.prior_period),
        ["Jul 2022 - Jun 2023", "434", "385", "77", "896", "33", "2,339", "56", "2,428", "3,324"]
    );
    assert_eq!(
        values(&record.filings.current_period),
        ["Jul 2023 - Jun 2024", "232", "410", "63", "705", "41", "2,510", "58", "2,609", "3,314"]
    );
    assert_eq!(
        values(&record.filings.pct_change),
        ["% Change", "-47%", "6%", "-18%", "-21%", "24%", "7%", "4%", "7%", "0%"]
    );
}

#[test]
fn character_spacing_digits_rejoined() {
    let record = absecon();
    assert_eq!(
        values(&record.resolutions.prior_period),
        ["Jul 2022 - Jun 2023", "439", "370", "80", "889", "30", "2,200", "50", "2,280", "3,169"]
    );
    assert_eq!(record.resolutions.pct_change.grand_total, "2%");
}

#[test]
fn negative_comma_split_in_clearance() {
    let record = absecon();
    assert_eq!(record.clearance.prior_period.grand_total, "-136");
    assert_eq!(
        values(&record.clearance.current_period),
        ["Jul 2023 - Jun 2024", "68", "-50", "7", "25", "-6", "-1,040", "-6", "-1,052", "-220"]
    );
    assert_eq!(record.clearance_pct.current_period.parking, "235%");
}

#[test]
fn backlog_kerning_splits() {
    let record = absecon();
    assert_eq!(
        values(&record.backlog.prior_period),
        ["Jun 2023", "0", "88", "23", "111", "9", "180", "18", "207", "318"]
    );
    assert_eq!(record.backlog.pct_change.indictables, "- -");
    assert_eq!(record.backlog.pct_change.dp_and_pdp, "-23%");
}

#[test]
fn multi_fragment_section_names() {
    let record = absecon();
    assert_eq!(record.backlog_per_100.current_period.parking, "93");
    assert_eq!(record.backlog_per_100.pct_change.parking, "-84%");
    assert_eq!(record.backlog_pct.current_period.grand_total, "40%");
    assert_eq!(
        values(&record.active_pending.current_period),
        ["Jun 2024", "0", "96", "25", "121", "28", "560", "68", "656", "777"]
    );
    assert_eq!(record.active_pending.pct_change.dwi, "90%");
}

#[test]
fn terminations_is_resolutions() {
    let items = extract_text_items(&absecon_page("Terminations"));
    let record = parse_page(&items).unwrap();
    assert_eq!(record, absecon());
}

#[test]
fn every_row_has_ten_fields() {
    let record = absecon();
    let rows = record.rows();
    assert_eq!(rows.len(), 21);
    for (name, row) in rows {
        assert!(
            row.values().iter().all(|v| !v.is_empty()),
            "{} has an empty cell",
            name
        );
    }
}

#[test]
fn document_report() {
    let pdf = pdf_with_pages(&[cover_page(), absecon_page("Resolutions"), truncated_page()]);
    let report = StatsExtractor::default().from_bytes(&pdf).unwrap();

    assert_eq!(report.pages, 3);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.successful(), 1);
    assert_eq!(report.records[0], absecon());

    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].page, 3);
    assert_eq!(
        report.errors[0].error,
        ParseError::UnexpectedEnd {
            context: "section \"Filings\": reading data row".to_string(),
            line: 7,
        }
    );
}

#[test_log::test]
fn section_mismatch_is_reported_per_page() {
    let pdf = pdf_with_pages(&[out_of_order_page(), absecon_page("Terminations")]);
    let report = municourt::from_bytes(&pdf).unwrap();

    assert_eq!(report.successful(), 1);
    assert_eq!(report.errors.len(), 1);
    assert_eq!(
        report.errors[0].to_string(),
        "page 1: expected section \"Resolutions\", got \"Backlog\""
    );
}

#[test]
fn cover_only_document_has_no_records() {
    let pdf = pdf_with_pages(&[cover_page()]);
    let report = municourt::from_reader(&pdf[..]).unwrap();
    assert_eq!(report.pages, 1);
    assert_eq!(report.skipped, 1);
    assert!(report.records.is_empty());
    assert!(report.errors.is_empty());
}

#[test]
fn from_path_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("atlantic.pdf");
    std::fs::write(&path, pdf_with_pages(&[absecon_page("Resolutions")])).unwrap();

    let report = municourt::from_path(&path).unwrap();
    assert_eq!(report.records[0].municipality, "ABSECON");

    let pages = StatsExtractor::default().pages_from_path(&path).unwrap();
    assert_eq!(pages.len(), 1);
    assert_eq!(pages[0].page, 1);
    assert!(pages[0].glyph_maps.is_empty());
}

#[test]
fn wide_threshold_keeps_columns_together() {
    let pdf = pdf_with_pages(&[absecon_page("Resolutions")]);
    let report = StatsExtractor::builder()
        .kerning_threshold(5000.)
        .build()
        .from_bytes(&pdf)
        .unwrap();

    // Every row collapses into its label cell and the rest is padding.
    let row = &report.records[0].filings.current_period;
    assert!(row.label.starts_with("Jul 2023 - Jun 2024232"));
    assert_eq!(row.indictables, "- -");
}

#[test]
fn json_shape() {
    let json = serde_json::to_value(absecon()).unwrap();
    assert_eq!(json["county"], "ATLANTIC");
    assert_eq!(json["dateRange"], "JULY 2023 - JUNE 2024");
    assert_eq!(json["filings"]["priorPeriod"]["trafficMoving"], "2,339");
    assert_eq!(json["clearancePercent"]["currentPeriod"]["parking"], "235%");
    assert_eq!(json["backlogPer100MthlyFilings"]["pctChange"]["label"], "% Change");
    assert_eq!(json["backlogPercent"]["priorPeriod"]["grandTotal"], "52%");
    assert_eq!(json["activePending"]["currentPeriod"]["dpAndPdp"], "96");
}

#[test]
fn fixture_spot_checks() {
    let record = absecon();
    assert_eq!(record.filings.prior_period.indictables, "434");
    assert_eq!(record.filings.pct_change.grand_total, "0%");
    assert_eq!(record.backlog.pct_change.indictables, "- -");
    assert_eq!(record.active_pending.current_period.grand_total, "777");
}
