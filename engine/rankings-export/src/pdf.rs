//! Multi-page PDF rankings report.
//!
//! One page per position group, then a team defense page. Rows whose raw
//! ppr_sh clears the group's highlight threshold are set in bold dark green.

use crate::error::ExportError;
use crate::ReportRenderer;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream, StringFormat};
use rank_engine::{PositionReport, RankingReport};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, info};

/// US letter, in points
const PAGE_WIDTH: i64 = 612;
const PAGE_HEIGHT: i64 = 792;
const MARGIN: i64 = 72;

const TITLE_SIZE: i64 = 18;
const TITLE_SPACING: i64 = 20;
const BODY_SIZE: i64 = 12;
const LINE_SPACING: i64 = 5;

const REGULAR_FONT: &[u8] = b"F1";
const BOLD_FONT: &[u8] = b"F2";

const TITLE_RGB: [f32; 3] = [0.25, 0.25, 0.25];
const BODY_RGB: [f32; 3] = [0.0, 0.0, 0.0];
const HIGHLIGHT_RGB: [f32; 3] = [0.0, 0.392, 0.0];

/// Rows that fit below the title on one page
pub const ROWS_PER_PAGE: usize =
    ((PAGE_HEIGHT - 2 * MARGIN - TITLE_SIZE - TITLE_SPACING) / (BODY_SIZE + LINE_SPACING)) as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    Normal,
    Highlight,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PageLine {
    pub text: String,
    pub style: LineStyle,
}

/// Title plus body lines for one PDF page
#[derive(Debug, Clone, PartialEq)]
pub struct PageSpec {
    pub title: String,
    pub lines: Vec<PageLine>,
}

/// Renders a `RankingReport` as a letter-size PDF
#[derive(Debug, Clone, Copy, Default)]
pub struct PdfRenderer;

impl PdfRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Lay the report out into pages. Empty position groups get no page.
    pub fn layout(&self, report: &RankingReport) -> Vec<PageSpec> {
        let mut pages = Vec::new();

        for position in &report.positions {
            if position.players.is_empty() {
                debug!("No ranked players for {}, skipping page", position.position);
                continue;
            }
            let title = format!("Top {} {}s", position.limit, position.position);
            paginate(&mut pages, title, position_lines(position));
        }

        if !report.defenses.is_empty() {
            let lines = report
                .defenses
                .iter()
                .map(|row| PageLine { text: format!("{} - {:.4}", row.team_name, row.score), style: LineStyle::Normal })
                .collect();
            paginate(&mut pages, format!("Top {} Team Defenses", report.defense_limit), lines);
        }

        if pages.is_empty() {
            pages.push(PageSpec { title: "No rankings available".to_string(), lines: Vec::new() });
        }

        pages
    }

    /// Build the PDF in memory
    pub fn to_bytes(&self, report: &RankingReport) -> Result<Vec<u8>, ExportError> {
        let mut document = build_document(&self.layout(report))?;
        let mut bytes = Vec::new();
        document.save_to(&mut bytes)?;
        Ok(bytes)
    }
}

impl ReportRenderer for PdfRenderer {
    fn render(&self, report: &RankingReport, path: &Path) -> Result<(), ExportError> {
        info!("Exporting rankings to PDF: {}", path.display());

        let pages = self.layout(report);
        let mut document = build_document(&pages)?;
        let mut writer = BufWriter::new(File::create(path)?);
        document.save_to(&mut writer)?;
        writer.flush()?;

        info!("PDF export complete: {} ({} pages)", path.display(), pages.len());
        Ok(())
    }
}

fn position_lines(position: &PositionReport) -> Vec<PageLine> {
    position
        .players
        .iter()
        .map(|row| PageLine {
            text: format!("{} - {:.4}", row.last_name, row.score),
            style: if row.highlighted { LineStyle::Highlight } else { LineStyle::Normal },
        })
        .collect()
}

fn paginate(pages: &mut Vec<PageSpec>, title: String, lines: Vec<PageLine>) {
    for (i, chunk) in lines.chunks(ROWS_PER_PAGE).enumerate() {
        let title = if i == 0 { title.clone() } else { format!("{title} (cont.)") };
        pages.push(PageSpec { title, lines: chunk.to_vec() });
    }
}

fn color(rgb: [f32; 3]) -> Operation {
    Operation::new("rg", rgb.iter().map(|c| Object::from(*c)).collect())
}

fn text_at(font: &[u8], size: i64, x: i64, y: i64, text: &str) -> Vec<Operation> {
    vec![
        Operation::new("BT", vec![]),
        Operation::new("Tf", vec![Object::Name(font.to_vec()), Object::Integer(size)]),
        Operation::new("Td", vec![Object::Integer(x), Object::Integer(y)]),
        Operation::new("Tj", vec![Object::String(win_ansi(text), StringFormat::Literal)]),
        Operation::new("ET", vec![]),
    ]
}

/// Encode text for the standard fonts' WinAnsiEncoding. Latin-1 maps
/// directly, a few punctuation marks live in 0x80-0x9F, anything else
/// becomes '?'.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7E}' | '\u{A0}'..='\u{FF}' => c as u8,
            '\u{20AC}' => 0x80,
            '\u{201A}' => 0x82,
            '\u{201E}' => 0x84,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201C}' => 0x93,
            '\u{201D}' => 0x94,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            '\u{0160}' => 0x8A,
            '\u{0161}' => 0x9A,
            '\u{017D}' => 0x8E,
            '\u{017E}' => 0x9E,
            '\u{0152}' => 0x8C,
            '\u{0153}' => 0x9C,
            '\u{0178}' => 0x9F,
            _ => b'?',
        })
        .collect()
}

fn page_operations(page: &PageSpec) -> Vec<Operation> {
    let mut operations = vec![color(TITLE_RGB)];
    let mut y = PAGE_HEIGHT - MARGIN - TITLE_SIZE;
    operations.extend(text_at(BOLD_FONT, TITLE_SIZE, MARGIN, y, &page.title));
    y -= TITLE_SPACING + BODY_SIZE;

    for line in &page.lines {
        let (font, rgb) = match line.style {
            LineStyle::Normal => (REGULAR_FONT, BODY_RGB),
            LineStyle::Highlight => (BOLD_FONT, HIGHLIGHT_RGB),
        };
        operations.push(color(rgb));
        operations.extend(text_at(font, BODY_SIZE, MARGIN, y, &line.text));
        y -= BODY_SIZE + LINE_SPACING;
    }

    operations
}

fn font(base_font: &str) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base_font,
        "Encoding" => "WinAnsiEncoding",
    }
}

fn build_document(pages: &[PageSpec]) -> Result<Document, ExportError> {
    let mut document = Document::with_version("1.5");
    let pages_id: ObjectId = document.new_object_id();

    let regular_id = document.add_object(font("Helvetica"));
    let bold_id = document.add_object(font("Helvetica-Bold"));
    let resources_id = document.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content { operations: page_operations(page) };
        let content_id = document.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = document.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> =
        vec![Object::Integer(0), Object::Integer(0), Object::Integer(PAGE_WIDTH), Object::Integer(PAGE_HEIGHT)];
    document.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => media_box,
        }),
    );

    let catalog_id = document.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    document.trailer.set("Root", catalog_id);

    Ok(document)
}
