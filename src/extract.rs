use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use lopdf::{Dictionary, Document, ObjectId, Stream};
use tracing::{debug, info, warn};

use crate::cmap::GlyphMap;
use crate::error::{Error, PageError};
use crate::processor::{KERNING_THRESHOLD, TextExtractor, contains_filings};
use crate::table::parse_page;
use crate::types::MunicipalityRecord;
use crate::utils::{FromObj, get_contents, get_inherited, maybe_get};

/// Raw material of one page: its content stream and the glyph maps of the
/// fonts it can reference.
#[derive(Debug, Clone, Default)]
pub struct PageContent {
    /// 1-based page number.
    pub page: u32,
    /// Every stream of the page's `Contents`, decompressed and joined with
    /// a newline.
    pub content: Vec<u8>,
    /// Glyph maps keyed by font resource name, for fonts with a `ToUnicode`
    /// stream.
    pub glyph_maps: BTreeMap<String, GlyphMap>,
}

/// Outcome of parsing every page of one document.
#[derive(Debug, Clone, Default)]
pub struct DocumentReport {
    /// Total pages in the document.
    pub pages: usize,
    /// Pages without table data (cover, summary), not parsed.
    pub skipped: usize,
    pub records: Vec<MunicipalityRecord>,
    pub errors: Vec<PageError>,
}

impl DocumentReport {
    /// Number of pages that produced a record.
    pub fn successful(&self) -> usize {
        self.records.len()
    }
}

fn page_content(doc: &Document, page: u32, page_id: ObjectId) -> PageContent {
    let mut content = Vec::new();
    for id in doc.get_page_contents(page_id) {
        match doc.get_object(id).and_then(|o| o.as_stream()) {
            Ok(stream) => {
                if !content.is_empty() {
                    content.push(b'\n');
                }
                content.extend_from_slice(&get_contents(stream));
            }
            Err(e) => warn!("page {}: unreadable content stream {:?}: {}", page, id, e),
        }
    }

    let glyph_maps = match doc.get_dictionary(page_id) {
        Ok(page_dict) => glyph_maps(doc, page_dict),
        Err(e) => {
            warn!("page {}: missing page dictionary: {}", page, e);
            BTreeMap::new()
        }
    };

    PageContent {
        page,
        content,
        glyph_maps,
    }
}

fn glyph_maps(doc: &Document, page_dict: &Dictionary) -> BTreeMap<String, GlyphMap> {
    let mut maps = BTreeMap::new();
    let Some(resources) = get_inherited::<&Dictionary>(doc, page_dict, b"Resources") else {
        return maps;
    };
    let Some(fonts) = maybe_get::<&Dictionary>(doc, resources, b"Font") else {
        return maps;
    };

    for (name, font) in fonts.iter() {
        let name = String::from_utf8_lossy(name).into_owned();
        let Some(font) = <&Dictionary>::from_obj(doc, font) else {
            debug!("font {} is not a dictionary", name);
            continue;
        };
        if let Some(to_unicode) = maybe_get::<&Stream>(doc, font, b"ToUnicode") {
            let map = GlyphMap::parse(&get_contents(to_unicode));
            debug!("font {}: {} glyphs mapped", name, map.len());
            maps.insert(name, map);
        }
    }
    maps
}

fn page_contents(doc: &Document) -> Vec<PageContent> {
    doc.get_pages()
        .into_iter()
        .map(|(page, page_id)| page_content(doc, page, page_id))
        .collect()
}

/// Builder for configuring extraction options.
///
/// # Examples
///
/// ```no_run
/// use municourt::StatsExtractor;
///
/// let report = StatsExtractor::builder()
///     .password("secret")
///     .kerning_threshold(450.)
///     .build()
///     .from_path("atlantic.pdf")?;
/// # Ok::<(), municourt::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StatsExtractorBuilder {
    password: Option<String>,
    kerning_threshold: f64,
}

impl Default for StatsExtractorBuilder {
    fn default() -> Self {
        StatsExtractorBuilder {
            password: None,
            kerning_threshold: KERNING_THRESHOLD,
        }
    }
}

impl StatsExtractorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the password for encrypted PDFs.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Override [`KERNING_THRESHOLD`].
    pub fn kerning_threshold(mut self, kerning_threshold: f64) -> Self {
        self.kerning_threshold = kerning_threshold;
        self
    }

    pub fn build(self) -> StatsExtractor {
        StatsExtractor {
            password: self.password,
            kerning_threshold: self.kerning_threshold,
        }
    }
}

/// Parses every municipality page of a statistics report.
///
/// # Examples
///
/// ```no_run
/// use municourt::StatsExtractor;
///
/// let report = StatsExtractor::default().from_path("atlantic.pdf")?;
/// for record in &report.records {
///     println!("{} / {}", record.county, record.municipality);
/// }
/// for error in &report.errors {
///     eprintln!("{}", error);
/// }
/// # Ok::<(), municourt::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct StatsExtractor {
    password: Option<String>,
    kerning_threshold: f64,
}

impl Default for StatsExtractor {
    fn default() -> Self {
        StatsExtractorBuilder::default().build()
    }
}

impl StatsExtractor {
    pub fn builder() -> StatsExtractorBuilder {
        StatsExtractorBuilder::new()
    }

    pub fn kerning_threshold(&self) -> f64 {
        self.kerning_threshold
    }

    /// A text extractor configured like this one.
    pub fn text_extractor(&self) -> TextExtractor {
        TextExtractor::with_threshold(self.kerning_threshold)
    }

    /// Parse a PDF file at the given path.
    pub fn from_path<P: AsRef<Path>>(&self, path: P) -> Result<DocumentReport, Error> {
        let doc = self.load(Document::load(path)?)?;
        Ok(self.parse_document(&doc))
    }

    /// Parse a PDF in memory.
    pub fn from_bytes(&self, bytes: &[u8]) -> Result<DocumentReport, Error> {
        let doc = self.load(Document::load_mem(bytes)?)?;
        Ok(self.parse_document(&doc))
    }

    /// Parse a PDF reader.
    pub fn from_reader<R: Read>(&self, mut reader: R) -> Result<DocumentReport, Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes)?;
        self.from_bytes(&bytes)
    }

    /// Page contents of a PDF file, without parsing them.
    pub fn pages_from_path<P: AsRef<Path>>(&self, path: P) -> Result<Vec<PageContent>, Error> {
        let doc = self.load(Document::load(path)?)?;
        Ok(page_contents(&doc))
    }

    /// Page contents of a PDF in memory, without parsing them.
    pub fn pages_from_bytes(&self, bytes: &[u8]) -> Result<Vec<PageContent>, Error> {
        let doc = self.load(Document::load_mem(bytes)?)?;
        Ok(page_contents(&doc))
    }

    fn load(&self, mut doc: Document) -> Result<Document, Error> {
        if doc.is_encrypted() {
            if let Some(password) = &self.password {
                doc.decrypt(password)?;
            } else {
                doc.decrypt("")?;
            }
        }
        Ok(doc)
    }

    fn parse_document(&self, doc: &Document) -> DocumentReport {
        let mut extractor = self.text_extractor();
        let mut report = DocumentReport::default();

        for page in page_contents(doc) {
            report.pages += 1;
            let items = extractor.extract(&page.content);
            if !contains_filings(&items) {
                debug!("page {}: no table data, skipping", page.page);
                report.skipped += 1;
                continue;
            }
            match parse_page(&items) {
                Ok(record) => {
                    debug!(
                        "page {}: {} / {}",
                        page.page, record.county, record.municipality
                    );
                    report.records.push(record);
                }
                Err(error) => {
                    warn!("page {}: {}", page.page, error);
                    report.errors.push(PageError {
                        page: page.page,
                        error,
                    });
                }
            }
        }

        info!(
            "{} pages, {} successful, {} skipped, {} errors",
            report.pages,
            report.successful(),
            report.skipped,
            report.errors.len()
        );
        report
    }
}

/// Parse a PDF file at the given path using default settings.
///
/// This is a convenience function equivalent to `StatsExtractor::default().from_path(path)`.
///
/// # Examples
///
/// ```no_run
/// let report = municourt::from_path("atlantic.pdf")?;
/// println!("{} of {} pages parsed", report.successful(), report.pages);
/// # Ok::<(), municourt::Error>(())
/// ```
pub fn from_path<P: AsRef<Path>>(path: P) -> Result<DocumentReport, Error> {
    StatsExtractor::default().from_path(path)
}

/// Parse a PDF in memory using default settings.
///
/// # Examples
///
/// ```no_run
/// let bytes = std::fs::read("atlantic.pdf")?;
/// let report = municourt::from_bytes(&bytes)?;
/// # Ok::<(), municourt::Error>(())
/// ```
pub fn from_bytes(bytes: &[u8]) -> Result<DocumentReport, Error> {
    StatsExtractor::default().from_bytes(bytes)
}

/// Parse a PDF reader using default settings.
///
/// # Examples
///
/// ```no_run
/// use std::fs::File;
///
/// let file = File::open("atlantic.pdf")?;
/// let report = municourt::from_reader(file)?;
/// # Ok::<(), municourt::Error>(())
/// ```
pub fn from_reader<R: Read>(reader: R) -> Result<DocumentReport, Error> {
    StatsExtractor::default().from_reader(reader)
}
