//! Output rendering for composed reports

pub mod pdf;

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::report::Document;

pub use pdf::render_pdf;

/// Renders `document` and writes it to `path`.
///
/// The document is fully rendered before the file is touched. If writing
/// fails, a file created by this call is removed again.
pub fn write_pdf(document: &Document<'_>, path: &Path) -> Result<()> {
    let bytes = render_pdf(document)?;
    persist(path, &bytes)?;
    debug!(bytes = bytes.len(), "wrote {}", path.display());
    Ok(())
}

/// Writes `bytes` to `path`, flushing and syncing before returning.
pub fn persist(path: &Path, bytes: &[u8]) -> Result<()> {
    let existed = path.exists();

    let written = File::create(path).and_then(|file| {
        let mut writer = BufWriter::new(file);
        writer.write_all(bytes)?;
        writer.flush()?;
        writer.into_inner().map_err(io::IntoInnerError::into_error)?.sync_all()
    });

    written.map_err(|source| {
        if !existed && path.is_file() {
            if let Err(e) = fs::remove_file(path) {
                warn!("could not remove partial output {}: {}", path.display(), e);
            }
        }
        Error::OutputWriteFailed {
            path: path.to_path_buf(),
            source,
        }
    })
}
