use crate::document::DocumentFile;
use crate::slot::UploadSlot;

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];

/// What the surface shows next to a filled slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePreview {
    pub slot: UploadSlot,
    pub name: String,
    pub size_label: String,
    pub mime_type: String,
}

impl FilePreview {
    #[must_use]
    pub fn of(slot: UploadSlot, file: &DocumentFile) -> Self {
        Self {
            slot,
            name: file.name.clone(),
            size_label: format_file_size(file.size_bytes),
            mime_type: file.mime_type.clone(),
        }
    }
}

/// Human-readable size using 1024-based units, at most two decimals.
///
/// Values past the gigabyte range stay expressed in `GB`.
#[must_use]
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_owned();
    }
    let mut unit = 0;
    let mut scale = 1u64;
    while unit + 1 < UNITS.len() && bytes >= scale * 1024 {
        scale *= 1024;
        unit += 1;
    }
    #[allow(clippy::cast_precision_loss)]
    let value = bytes as f64 / scale as f64;
    let fixed = format!("{value:.2}");
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    format!("{trimmed} {}", UNITS[unit])
}
