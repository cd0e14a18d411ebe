// Where the label goes and how it reaches the disk.
// Visual: after Enter, `<stem>_label.png` appears next to the source image.

use crate::error::Error;
use image::{GrayImage, ImageFormat};
use std::fs;
use std::path::{Path, PathBuf};

/// `dir/photo.jpg` + `_label` -> `dir/photo_label.png`.
pub fn label_path(source: &Path, suffix: &str) -> PathBuf {
    let stem = source
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let name = format!("{stem}{suffix}.png");
    match source.parent() {
        Some(dir) => dir.join(name),
        None => PathBuf::from(name),
    }
}

/// Capability the session needs to persist a finished mask.
pub trait LabelWriter {
    fn write_label(&mut self, path: &Path, mask: &GrayImage) -> Result<(), Error>;
}

/// Writes PNGs, replacing any earlier label in one rename.
#[derive(Debug, Default)]
pub struct PngWriter;

impl LabelWriter for PngWriter {
    fn write_label(&mut self, path: &Path, mask: &GrayImage) -> Result<(), Error> {
        let file_name = path
            .file_name()
            .ok_or_else(|| Error::Save(format!("No file name in {}", path.display())))?;
        let tmp = path.with_file_name(format!(".{}.tmp", file_name.to_string_lossy()));

        // 1) Encode beside the target so the rename stays on one filesystem.
        mask.save_with_format(&tmp, ImageFormat::Png)
            .map_err(|e| Error::Save(format!("Encode {}: {e}", tmp.display())))?;

        // 2) Swap it in; the previous label stays intact if this fails.
        fs::rename(&tmp, path).map_err(|e| {
            let _ = fs::remove_file(&tmp);
            Error::Save(format!("Replace {}: {e}", path.display()))
        })
    }
}
