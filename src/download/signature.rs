//! PDF signature validation for retrieved files.

use std::path::Path;

use tokio::io::AsyncReadExt;

use super::constants::PDF_MAGIC;

/// Returns true if the file at `path` starts with `%PDF-`.
///
/// Unreadable, missing, or short files are not PDFs.
pub async fn is_valid_pdf(path: &Path) -> bool {
    let Ok(mut file) = tokio::fs::File::open(path).await else {
        return false;
    };
    let mut header = [0u8; PDF_MAGIC.len()];
    match file.read_exact(&mut header).await {
        Ok(_) => &header == PDF_MAGIC,
        Err(_) => false,
    }
}
