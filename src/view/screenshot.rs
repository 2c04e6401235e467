//! Full-page rendering and export.
//!
//! A full page is the header stacked on the complete, unscrolled body. Both are
//! taken as standalone surfaces, so the live regions and their offsets are never
//! touched. The result is a fresh [`Buffer`] independent of the viewport, written
//! out as plain text.

use crate::gui::Theme;
use crate::model::ExportError;
use chrono::{DateTime, Local};
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Extension of exported screenshots.
const EXTENSION: &str = "txt";

/// Names tried per export before giving up on a crowded directory.
const MAX_NAME_ATTEMPTS: u32 = 100;

/// Stack the `header` surface above the `body` surface in a new buffer `width`
/// cells wide.
pub fn render_full_page(header: &Buffer, body: &Buffer, width: u16, theme: &Theme) -> Buffer {
    let header_height = header.area.height;
    let height = header_height.saturating_add(body.area.height);

    let mut surface = Buffer::empty(Rect::new(0, 0, width, height));
    surface.set_style(surface.area, theme.base());
    copy_rows(&mut surface, header, 0);
    copy_rows(&mut surface, body, header_height);
    surface
}

/// Copy all of `source` into `target` starting at row `top`, clipped to `target`.
fn copy_rows(target: &mut Buffer, source: &Buffer, top: u16) {
    let area = source.area;
    for y in 0..area.height {
        for x in 0..area.width {
            let Some(dst) = target.cell_mut((x, top.saturating_add(y))) else {
                break;
            };
            if let Some(src) = source.cell((area.x + x, area.y + y)) {
                *dst = src.clone();
            }
        }
    }
}

/// Plain text of a buffer: one line per row, trailing blanks trimmed.
pub fn buffer_to_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        let mut line = String::new();
        for x in area.left()..area.right() {
            line.push_str(buffer[(x, y)].symbol());
        }
        text.push_str(line.trim_end());
        text.push('\n');
    }
    text
}

/// File name for a screenshot of `page_name` taken at `taken_at`.
///
/// The page name is lowercased and anything but letters and digits becomes `-`.
pub fn screenshot_file_name(page_name: &str, taken_at: DateTime<Local>) -> String {
    let slug: String = page_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect();
    let slug = slug.trim_matches('-');
    let slug = if slug.is_empty() { "page" } else { slug };
    format!("{slug}-{}.{EXTENSION}", taken_at.format("%Y%m%d-%H%M%S-%3f"))
}

/// Create `file_name` in `dir`, or `<stem>-<n>.txt` if that name is taken.
fn create_unique(dir: &Path, file_name: &str) -> Result<(PathBuf, File), ExportError> {
    let stem = file_name
        .strip_suffix(&format!(".{EXTENSION}"))
        .unwrap_or(file_name);
    let candidates = std::iter::once(file_name.to_string())
        .chain((1..MAX_NAME_ATTEMPTS).map(|n| format!("{stem}-{n}.{EXTENSION}")));

    let mut last = None;
    for candidate in candidates {
        let path = dir.join(candidate);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                debug!(path = %path.display(), "screenshot name taken");
                last = Some(path);
            }
            Err(source) => return Err(ExportError::Write { path, source }),
        }
    }
    Err(ExportError::Write {
        path: last.unwrap_or_else(|| dir.join(file_name)),
        source: io::Error::from(io::ErrorKind::AlreadyExists),
    })
}

/// Write `buffer` as text into a new file in `dir`, returning the path written.
///
/// An existing file is never overwritten; a numeric suffix is added instead.
pub fn export_screenshot(
    buffer: &Buffer,
    dir: &Path,
    page_name: &str,
) -> Result<PathBuf, ExportError> {
    if buffer.area.is_empty() {
        return Err(ExportError::EmptyPage);
    }
    fs::create_dir_all(dir).map_err(|source| ExportError::DirectoryCreation {
        path: dir.to_path_buf(),
        source,
    })?;

    let (path, mut file) = create_unique(dir, &screenshot_file_name(page_name, Local::now()))?;
    file.write_all(buffer_to_text(buffer).as_bytes())
        .map_err(|source| ExportError::Write {
            path: path.clone(),
            source,
        })?;

    info!(
        path = %path.display(),
        width = buffer.area.width,
        height = buffer.area.height,
        "screenshot exported"
    );
    Ok(path)
}
