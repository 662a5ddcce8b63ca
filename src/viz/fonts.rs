//! One-time registration of a "sans-serif" font for the `ab_glyph` text path.
//!
//! `ab_glyph` does not discover OS fonts, so a TTF has to be located and handed to
//! plotters before any text is drawn. Without one the chart still renders, just
//! without its legend.

use log::{debug, warn};
use std::env;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Environment variable pointing at a `.ttf` file.
pub const FONT_ENV: &str = "UNIDASH_FONT";

const SYSTEM_FONTS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation-sans/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

static REGISTERED: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Candidate font files in lookup order: `explicit`, `$UNIDASH_FONT`,
/// `assets/` next to the executable and the crate, then common system locations.
pub fn font_candidates(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(p) = explicit {
        candidates.push(p.to_path_buf());
    }

    if let Ok(path) = env::var(FONT_ENV)
        && !path.trim().is_empty()
    {
        candidates.push(PathBuf::from(path));
    }

    if let Ok(current_exe) = env::current_exe()
        && let Some(bin_dir) = current_exe.parent()
    {
        candidates.push(bin_dir.join("assets/DejaVuSans.ttf"));
    }
    candidates.push(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/DejaVuSans.ttf"));

    candidates.extend(SYSTEM_FONTS.iter().map(PathBuf::from));
    candidates
}

/// Register the first readable candidate as plotters' "sans-serif" font.
///
/// Safe to call many times; only the first call searches, so `explicit` is ignored
/// afterwards. Returns whether text can be drawn.
pub fn ensure_fonts_registered(explicit: Option<&Path>) -> bool {
    REGISTERED
        .get_or_init(|| register_first(&font_candidates(explicit)))
        .is_some()
}

/// Path of the registered font, if any.
pub fn registered_font() -> Option<&'static Path> {
    REGISTERED.get().and_then(|p| p.as_deref())
}

fn register_first(candidates: &[PathBuf]) -> Option<PathBuf> {
    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        if ab_glyph::FontRef::try_from_slice(&bytes).is_err() {
            warn!("{} is not a usable font", path.display());
            continue;
        }
        // plotters keeps a `'static` reference for the lifetime of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            bytes,
        ) {
            Ok(()) => {
                debug!("registered chart font {}", path.display());
                return Some(path.clone());
            }
            Err(_) => warn!("{} is not a usable font", path.display()),
        }
    }
    warn!(
        "no font found (set {} to a .ttf file); charts are drawn without legend",
        FONT_ENV
    );
    None
}
