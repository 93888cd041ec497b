use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use lopdf::content::{Content, Operation};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};

use crate::analysis::summary::describe;
use crate::config::OutputPaths;
use crate::data::model::Session;

// US Letter, in points.
const PAGE_WIDTH: f32 = 612.0;
const PAGE_HEIGHT: f32 = 792.0;
const MARGIN: f32 = 72.0;

const TITLE: &str = "Automated Data Analysis Report";
const TITLE_SIZE: f32 = 16.0;
const HEADING_SIZE: f32 = 12.0;
const BODY_SIZE: f32 = 8.0;
const BODY_LEADING: f32 = 10.0;

const IMAGE_X: f32 = 100.0;
const IMAGE_SIZE: (f32, f32) = (400.0, 300.0);
const IMAGE_NAME: &str = "Im1";

const FONT_REGULAR: &str = "F1";
const FONT_BOLD: &str = "F2";
const FONT_MONO: &str = "F3";

/// What ended up in the written report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOutcome {
    pub path: PathBuf,
    pub pages: usize,
    pub embedded_scatter: bool,
    pub references_interactive: bool,
}

// ---------------------------------------------------------------------------
// Page layout
// ---------------------------------------------------------------------------

/// Top-down flow of text and images over as many pages as needed.
struct PageFlow {
    pages: Vec<Vec<Operation>>,
    cursor: f32,
}

impl PageFlow {
    fn new() -> Self {
        Self {
            pages: vec![Vec::new()],
            cursor: PAGE_HEIGHT - MARGIN,
        }
    }

    fn ensure_room(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            self.pages.push(Vec::new());
            self.cursor = PAGE_HEIGHT - MARGIN;
        }
    }

    fn current(&mut self) -> &mut Vec<Operation> {
        // `pages` always holds at least one page.
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    fn text_line(&mut self, font: &str, size: f32, leading: f32, line: &str) {
        self.ensure_room(leading);
        self.cursor -= leading;
        let y = self.cursor;
        self.current().extend([
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec![font.into(), size.into()]),
            Operation::new("Td", vec![MARGIN.into(), y.into()]),
            Operation::new("Tj", vec![Object::string_literal(pdf_safe(line))]),
            Operation::new("ET", vec![]),
        ]);
    }

    fn gap(&mut self, height: f32) {
        self.cursor -= height;
    }

    fn image(&mut self, name: &str, (width, height): (f32, f32)) {
        self.ensure_room(height);
        self.cursor -= height;
        let y = self.cursor;
        self.current().extend([
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    width.into(),
                    0i64.into(),
                    0i64.into(),
                    height.into(),
                    IMAGE_X.into(),
                    y.into(),
                ],
            ),
            Operation::new("Do", vec![name.into()]),
            Operation::new("Q", vec![]),
        ]);
    }
}

/// Standard Type1 fonts only cover printable ASCII safely.
fn pdf_safe(line: &str) -> String {
    line.chars()
        .map(|c| match c {
            ' '..='~' => c,
            '\t' => ' ',
            _ => '?',
        })
        .collect()
}

/// Split a line into chunks that fit the text column at the given font size.
fn wrap(line: &str, size: f32) -> Vec<String> {
    // Courier advances 0.6 em per glyph.
    let max_chars = (((PAGE_WIDTH - 2.0 * MARGIN) / (0.6 * size)) as usize).max(1);
    let chars: Vec<char> = line.chars().collect();
    if chars.is_empty() {
        return vec![String::new()];
    }
    chars.chunks(max_chars).map(|c| c.iter().collect()).collect()
}

// ---------------------------------------------------------------------------
// Image embedding
// ---------------------------------------------------------------------------

fn image_xobject(path: &Path) -> Result<Stream> {
    let img = image::open(path)
        .with_context(|| format!("decoding {}", path.display()))?
        .to_rgb8();
    let (width, height) = img.dimensions();

    Ok(Stream::new(
        dictionary! {
            "Type" => "XObject",
            "Subtype" => "Image",
            "Width" => width as i64,
            "Height" => height as i64,
            "ColorSpace" => "DeviceRGB",
            "BitsPerComponent" => 8i64,
        },
        img.into_raw(),
    ))
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Compose the PDF report for a session and write it to `paths.report()`.
///
/// The scatter image and the pointer to the interactive chart are included
/// only if those files exist when this runs.
pub fn generate_report(session: &Session, paths: &OutputPaths) -> Result<ReportOutcome> {
    let summary = describe(&session.dataset).to_string();
    let mut flow = PageFlow::new();

    flow.text_line(FONT_BOLD, TITLE_SIZE, TITLE_SIZE * 1.5, TITLE);
    flow.gap(HEADING_SIZE);
    flow.text_line(FONT_REGULAR, HEADING_SIZE, HEADING_SIZE * 1.5, "Data Summary:");
    for line in summary.lines() {
        for chunk in wrap(line, BODY_SIZE) {
            flow.text_line(FONT_MONO, BODY_SIZE, BODY_LEADING, &chunk);
        }
    }

    let scatter_path = paths.scatter();
    let scatter = if scatter_path.exists() {
        match image_xobject(&scatter_path) {
            Ok(stream) => Some(stream),
            Err(e) => {
                log::warn!("Leaving scatter plot out of the report: {e:#}");
                None
            }
        }
    } else {
        None
    };
    if scatter.is_some() {
        flow.gap(HEADING_SIZE);
        flow.image(IMAGE_NAME, IMAGE_SIZE);
    }

    let references_interactive = paths.interactive().exists();
    if references_interactive {
        flow.gap(HEADING_SIZE);
        flow.text_line(FONT_REGULAR, HEADING_SIZE, HEADING_SIZE * 1.5, "Interactive Plot:");
        flow.text_line(
            FONT_REGULAR,
            HEADING_SIZE,
            HEADING_SIZE * 1.5,
            &format!("Open '{}' to view interactive plot.", paths.interactive_file),
        );
    }

    let embedded_scatter = scatter.is_some();
    let pages = flow.pages.len();
    let mut doc = build_document(flow, scatter)?;

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer).context("encoding PDF")?;
    let path = paths.report();
    std::fs::write(&path, buffer).with_context(|| format!("writing {}", path.display()))?;

    log::info!("Report with {pages} page(s) written to {}", path.display());
    Ok(ReportOutcome {
        path,
        pages,
        embedded_scatter,
        references_interactive,
    })
}

fn add_font(doc: &mut Document, base: &str) -> ObjectId {
    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => base,
        "Encoding" => "WinAnsiEncoding",
    })
}

fn build_document(flow: PageFlow, image: Option<Stream>) -> Result<Document> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = add_font(&mut doc, "Helvetica");
    let bold = add_font(&mut doc, "Helvetica-Bold");
    let mono = add_font(&mut doc, "Courier");

    let mut resources = dictionary! {
        "Font" => dictionary! {
            FONT_REGULAR => regular,
            FONT_BOLD => bold,
            FONT_MONO => mono,
        },
    };
    if let Some(stream) = image {
        let image_id = doc.add_object(stream);
        resources.set("XObject", dictionary! { IMAGE_NAME => image_id });
    }
    let resources_id = doc.add_object(resources);

    let mut kids: Vec<Object> = Vec::with_capacity(flow.pages.len());
    for operations in flow.pages {
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(
            Dictionary::new(),
            content.encode().context("encoding page content")?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![0i64.into(), 0i64.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();
    Ok(doc)
}
