use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use input_logger::FrameCanvas;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum OverlayExportError {
    #[error("failed to create overlay output directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write overlay image {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

/// Saves the canvas as an RGBA PNG.
pub(crate) fn export_overlay_png(
    canvas: &FrameCanvas,
    path: &Path,
) -> Result<(), OverlayExportError> {
    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OverlayExportError::CreateDir {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    image::save_buffer_with_format(
        path,
        canvas.frame(),
        canvas.width(),
        canvas.height(),
        image::ExtendedColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|source| OverlayExportError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use input_logger::{draw_label_overlay, OVERLAY_COLOR, OVERLAY_POSITION};

    #[test]
    fn exported_png_keeps_overlay_pixels() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("frames").join("overlay.png");
        let mut canvas = FrameCanvas::new(320, 240);
        draw_label_overlay(&mut canvas, "Jump, ");

        export_overlay_png(&canvas, &path).expect("export");

        let decoded = image::open(&path).expect("decode").to_rgba8();
        assert_eq!(decoded.dimensions(), (320, 240));
        let (x, y) = OVERLAY_POSITION;
        assert_eq!(decoded.get_pixel(x as u32, y as u32).0, OVERLAY_COLOR);
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }
}
