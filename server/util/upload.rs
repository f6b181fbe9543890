use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

/// An uploaded file written to the upload folder for the duration of one
/// request. The file is removed when the guard drops, on every exit path.
#[derive(Debug)]
pub struct TempUpload {
    file: NamedTempFile,
}

impl TempUpload {
    /// Writes `data` under `dir` with a unique name ending in the client's
    /// sanitized `filename`.
    pub fn create(dir: &Path, filename: &str, data: &[u8]) -> io::Result<TempUpload> {
        let suffix = format!("-{}", sanitize_filename(filename));
        let mut file = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&suffix)
            .tempfile_in(dir)?;
        file.write_all(data)?;
        file.flush()?;
        Ok(TempUpload { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}

/// Keeps only the final path component and replaces anything outside
/// `[A-Za-z0-9._-]` with `_`.
pub fn sanitize_filename(filename: &str) -> String {
    let base = filename.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or("");
    let cleaned: String = base
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' { c } else { '_' })
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() { "upload".to_owned() } else { cleaned.to_owned() }
}
