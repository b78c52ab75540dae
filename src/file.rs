//! File load and save collaborators.
//!
//! Load never fails: a missing or unreadable file yields a document
//! with a single empty line (new-file semantics; the caller already
//! decided the path is acceptable). Save failures are recoverable and
//! surface to the user.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::document::Document;
use crate::error::Result;
use crate::log::{LogLevel, emit_log};

/// Load `path` into a document. Tabs expand through the tab model;
/// `'\n'` breaks lines; everything else is literal.
pub fn load(path: &Path) -> Result<Document> {
    match std::fs::read(path) {
        Ok(bytes) => {
            let text = String::from_utf8_lossy(&bytes);
            let doc = Document::from_text(&text)?;
            emit_log(
                LogLevel::Info,
                &format!("loaded {} ({} lines)", path.display(), doc.line_count()),
            );
            Ok(doc)
        }
        Err(e) => {
            emit_log(
                LogLevel::Warn,
                &format!("could not read {}: {e}; starting empty", path.display()),
            );
            Ok(Document::new())
        }
    }
}

/// Write the document to `path` as plain newline-delimited text with
/// placeholders elided.
pub fn save(path: &Path, doc: &Document) -> Result<()> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    doc.write_to(&mut out)?;
    out.flush()?;
    emit_log(LogLevel::Info, &format!("saved {}", path.display()));
    Ok(())
}
