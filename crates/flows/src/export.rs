//! PDF Export.
//!
//! The dashboard's data is projected into an [`ExportTable`] (see
//! `boothlog_core::export`) and handed to a [`TableRenderer`]. The renderer
//! is the only place that knows about the PDF library.

use std::path::{Component, Path, PathBuf};

use boothlog_core::export::{company_report_table, staff_activity_table, ExportTable};
use chrono::FixedOffset;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Rgb,
};

use crate::dashboard::Dashboard;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Membro da equipe '{0}' não encontrado.")]
    UnknownStaff(String),

    #[error("Empresa com estande '{0}' não encontrada.")]
    UnknownCompany(String),

    #[error("Nome de arquivo inválido: '{0}'")]
    InvalidFileName(String),

    #[error("PDF rendering failed: {0}")]
    Render(String),

    #[error("Cannot write export: {0}")]
    Io(#[from] std::io::Error),
}

/// Turns a table into document bytes.
pub trait TableRenderer {
    fn render_table(&self, table: &ExportTable) -> Result<Vec<u8>, ExportError>;
}

// ---------------------------------------------------------------------------
// Projections from the dashboard
// ---------------------------------------------------------------------------

/// Activity log of the staff member with `personal_code`.
pub fn staff_report(
    dashboard: &Dashboard,
    personal_code: &str,
    offset: &FixedOffset,
) -> Result<ExportTable, ExportError> {
    let staff = dashboard
        .staff_by_code(personal_code)
        .ok_or_else(|| ExportError::UnknownStaff(personal_code.to_string()))?;
    Ok(staff_activity_table(
        dashboard.event().map(|e| e.name.as_str()),
        staff,
        dashboard.activities_of(&staff.id),
        offset,
    ))
}

/// Reports filed at the company with `booth_code`, newest first.
pub fn company_report(
    dashboard: &Dashboard,
    booth_code: &str,
    offset: &FixedOffset,
) -> Result<ExportTable, ExportError> {
    let company = dashboard
        .company_by_booth(booth_code)
        .ok_or_else(|| ExportError::UnknownCompany(booth_code.to_string()))?;
    let reports = dashboard
        .reports()
        .iter()
        .filter(|r| r.booth_code == company.booth_code);
    Ok(company_report_table(
        dashboard.event().map(|e| e.name.as_str()),
        company,
        reports,
        offset,
    ))
}

/// Render `table` and write it to `dir` under the table's file name.
///
/// The file name must be a single plain component, so the export always
/// lands directly in `dir`.
pub fn write_export(
    renderer: &dyn TableRenderer,
    table: &ExportTable,
    dir: &Path,
) -> Result<PathBuf, ExportError> {
    let name = Path::new(&table.file_name);
    let mut components = name.components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(ExportError::InvalidFileName(table.file_name.clone()));
    }

    let bytes = renderer.render_table(table)?;
    std::fs::create_dir_all(dir)?;
    let path = dir.join(name);
    std::fs::write(&path, bytes)?;
    tracing::info!(path = %path.display(), rows = table.rows.len(), "Export written");
    Ok(path)
}

// ---------------------------------------------------------------------------
// PDF renderer
// ---------------------------------------------------------------------------

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 14.0;
const TITLE_SIZE: f32 = 18.0;
const SUBTITLE_SIZE: f32 = 11.0;
const CELL_SIZE: f32 = 9.0;
const LINE_HEIGHT: f32 = 4.6;
const CELL_PADDING: f32 = 1.5;
/// Average Helvetica glyph width as a fraction of the font size.
const GLYPH_WIDTH_EM: f32 = 0.5;
const PT_TO_MM: f32 = 0.3528;

/// A4 portrait table renderer using the PDF base-14 Helvetica fonts.
///
/// Columns are sized by their longest cell, cells wrap on word boundaries
/// and the header row is repeated on every page.
#[derive(Debug, Default, Clone, Copy)]
pub struct PdfTableRenderer;

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

impl PdfTableRenderer {
    pub fn new() -> Self {
        Self
    }

    fn new_page(doc: &PdfDocumentReference) -> PdfLayerReference {
        let (page, layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        doc.get_page(page).get_layer(layer)
    }

    /// Draw one row starting at `top` and return the row's bottom edge.
    fn draw_row(
        layer: &PdfLayerReference,
        font: &IndirectFontRef,
        cells: &[Vec<String>],
        widths: &[f32],
        top: f32,
    ) -> f32 {
        let mut x = MARGIN;
        for (lines, width) in cells.iter().zip(widths) {
            for (i, line) in lines.iter().enumerate() {
                let baseline = top - CELL_PADDING - LINE_HEIGHT * (i as f32 + 1.0) + 1.0;
                layer.use_text(line.clone(), CELL_SIZE, Mm(x + CELL_PADDING), Mm(baseline), font);
            }
            x += width;
        }
        top - row_height(cells)
    }
}

impl TableRenderer for PdfTableRenderer {
    fn render_table(&self, table: &ExportTable) -> Result<Vec<u8>, ExportError> {
        let (doc, page, layer) =
            PdfDocument::new(&table.title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
        let fonts = Fonts {
            regular: doc
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| ExportError::Render(e.to_string()))?,
            bold: doc
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| ExportError::Render(e.to_string()))?,
        };
        let mut layer = doc.get_page(page).get_layer(layer);

        let mut y = PAGE_HEIGHT - MARGIN - 6.0;
        layer.use_text(table.title.clone(), TITLE_SIZE, Mm(MARGIN), Mm(y), &fonts.bold);
        y -= 8.0;
        layer.set_fill_color(Color::Rgb(Rgb::new(0.4, 0.4, 0.4, None)));
        layer.use_text(table.subtitle.clone(), SUBTITLE_SIZE, Mm(MARGIN), Mm(y), &fonts.regular);
        layer.set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        y -= 5.0;

        let widths = column_widths(table, PAGE_WIDTH - 2.0 * MARGIN);
        let header = wrap_row(&table.columns, &widths);
        y = Self::draw_row(&layer, &fonts.bold, &header, &widths, y);

        for row in &table.rows {
            let cells = wrap_row(row, &widths);
            if y - row_height(&cells) < MARGIN {
                layer = Self::new_page(&doc);
                y = PAGE_HEIGHT - MARGIN;
                y = Self::draw_row(&layer, &fonts.bold, &header, &widths, y);
            }
            y = Self::draw_row(&layer, &fonts.regular, &cells, &widths, y);
        }

        doc.save_to_bytes().map_err(|e| ExportError::Render(e.to_string()))
    }
}

fn row_height(cells: &[Vec<String>]) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    lines as f32 * LINE_HEIGHT + 2.0 * CELL_PADDING
}

/// Characters of cell text that fit in `width` millimetres.
fn chars_per_line(width: f32) -> usize {
    let glyph = CELL_SIZE * GLYPH_WIDTH_EM * PT_TO_MM;
    (((width - 2.0 * CELL_PADDING) / glyph).floor() as usize).max(1)
}

/// Split the usable width between columns in proportion to their longest
/// cell, clamped so that no column starves or dominates.
fn column_widths(table: &ExportTable, usable: f32) -> Vec<f32> {
    let weights: Vec<f32> = (0..table.columns.len())
        .map(|i| {
            let longest = std::iter::once(&table.columns[i])
                .chain(table.rows.iter().filter_map(|r| r.get(i)))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0);
            longest.clamp(10, 60) as f32
        })
        .collect();
    let total: f32 = weights.iter().sum();
    weights.iter().map(|w| usable * w / total).collect()
}

fn wrap_row(row: &[String], widths: &[f32]) -> Vec<Vec<String>> {
    widths
        .iter()
        .enumerate()
        .map(|(i, w)| wrap_text(row.get(i).map(String::as_str).unwrap_or(""), chars_per_line(*w)))
        .collect()
}

/// Greedy word wrap. Words longer than a line are hard-split.
fn wrap_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        while word.len() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            lines.push(word.drain(..max_chars).collect());
        }
        if word.is_empty() {
            continue;
        }

        let needed = if current.is_empty() {
            word.len()
        } else {
            current.chars().count() + 1 + word.len()
        };
        if needed > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.extend(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}
