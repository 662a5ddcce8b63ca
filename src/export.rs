//! Chart → PDF export.
//!
//! The export works on pixels, not data: the current canvas is encoded as PNG and that
//! snapshot is placed on a landscape A4 page at a fixed position and size. Whatever is on
//! screen at click time (including a blank chart) ends up in the document.

use crate::viz::Canvas;
use anyhow::{Context, Result, anyhow};
use image::ColorType;
use image::png::{PngDecoder, PngEncoder};
use printpdf::{Image, Mm, PdfDocument};
use std::fs;
use std::io::{BufWriter, Cursor};
use std::path::{Path, PathBuf};

/// File name used when the caller does not pick one.
pub const DEFAULT_PDF_NAME: &str = "chart.pdf";

/// Landscape A4.
pub const PAGE_WIDTH_MM: f64 = 297.0;
pub const PAGE_HEIGHT_MM: f64 = 210.0;

/// Placement of the snapshot, measured from the top-left corner of the page.
pub const IMAGE_LEFT_MM: f64 = 10.0;
pub const IMAGE_TOP_MM: f64 = 10.0;
pub const IMAGE_WIDTH_MM: f64 = 280.0;
pub const IMAGE_HEIGHT_MM: f64 = 150.0;

/// DPI assumed for the snapshot before it is scaled into its box.
const SNAPSHOT_DPI: f64 = 96.0;
const MM_PER_INCH: f64 = 25.4;

/// Encode the canvas as PNG bytes.
pub fn snapshot_png(canvas: &Canvas) -> Result<Vec<u8>> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .encode(
            canvas.pixels(),
            canvas.width(),
            canvas.height(),
            ColorType::Rgb8,
        )
        .context("encode chart snapshot as PNG")?;
    Ok(png)
}

/// Scale factors that stretch a `px_w` × `px_h` image at [`SNAPSHOT_DPI`] to the fixed box.
fn placement_scale(px_w: u32, px_h: u32) -> (f64, f64) {
    let natural_w = px_w as f64 * MM_PER_INCH / SNAPSHOT_DPI;
    let natural_h = px_h as f64 * MM_PER_INCH / SNAPSHOT_DPI;
    (IMAGE_WIDTH_MM / natural_w, IMAGE_HEIGHT_MM / natural_h)
}

/// Build the PDF document for the current canvas and return its bytes.
pub fn pdf_bytes(canvas: &Canvas) -> Result<Vec<u8>> {
    let png = snapshot_png(canvas)?;
    let decoder = PngDecoder::new(Cursor::new(png.as_slice())).context("decode PNG snapshot")?;
    let image = Image::try_from(decoder).context("embed PNG snapshot")?;

    let (doc, page, layer) = PdfDocument::new(
        "Universities by state",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Chart",
    );
    let current_layer = doc.get_page(page).get_layer(layer);

    let (scale_x, scale_y) = placement_scale(canvas.width(), canvas.height());
    // PDF origin is bottom-left.
    let bottom_mm = PAGE_HEIGHT_MM - IMAGE_TOP_MM - IMAGE_HEIGHT_MM;
    image.add_to_layer(
        current_layer,
        Some(Mm(IMAGE_LEFT_MM)),
        Some(Mm(bottom_mm)),
        None,
        Some(scale_x),
        Some(scale_y),
        Some(SNAPSHOT_DPI),
    );

    let mut out = BufWriter::new(Vec::new());
    doc.save(&mut out).map_err(|e| anyhow!("{:?}", e))?;
    out.into_inner().map_err(|e| anyhow!("{:?}", e))
}

/// Write the PDF for `canvas` to `path` and return the path.
pub fn export_pdf<P: AsRef<Path>>(canvas: &Canvas, path: P) -> Result<PathBuf> {
    let path = path.as_ref();
    let bytes = pdf_bytes(canvas)?;
    fs::write(path, bytes).with_context(|| format!("write {}", path.display()))?;
    Ok(path.to_path_buf())
}

/// Where a "download" lands: `dir`, else the user's download folder, else the working dir.
pub fn default_export_path(dir: Option<&Path>) -> PathBuf {
    let base = dir
        .map(Path::to_path_buf)
        .or_else(dirs::download_dir)
        .unwrap_or_else(|| PathBuf::from("."));
    base.join(DEFAULT_PDF_NAME)
}
