use crate::error::{Result, SilhouetteError};
use crate::params::SilhouetteParams;
use image::{DynamicImage, ImageFormat, RgbaImage};
use log::debug;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

// --- decoding ---

/// Read and decode an image file. The format is sniffed from the content.
pub fn open_image(path: &Path) -> Result<DynamicImage> {
    let bytes = fs::read(path).map_err(|e| SilhouetteError::io(path, e))?;
    image::load_from_memory(&bytes).map_err(|source| SilhouetteError::UnreadableImage {
        path: Some(path.to_path_buf()),
        source,
    })
}

pub fn load_image(path: &Path) -> Result<RgbaImage> {
    Ok(open_image(path)?.to_rgba8())
}

pub fn open_image_from_bytes(input: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(input)
        .map_err(|source| SilhouetteError::UnreadableImage { path: None, source })
}

pub fn load_image_from_bytes(input: &[u8]) -> Result<RgbaImage> {
    Ok(open_image_from_bytes(input)?.to_rgba8())
}

// --- encoding ---

pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>> {
    let mut out: Vec<u8> = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(SilhouetteError::Encode)?;
    Ok(out)
}

/// Write `img` as PNG. The whole file is encoded before anything touches
/// the disk, so a failed encode leaves no partial file behind.
pub fn save_png(img: &RgbaImage, path: &Path) -> Result<()> {
    let png = encode_png(img)?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| SilhouetteError::io(parent, e))?;
    }
    fs::write(path, png).map_err(|e| SilhouetteError::io(path, e))
}

// --- output path derivation ---

/// `<parent>/<stem>-<suffix>.png`
pub fn derive_output_path(input: &Path, suffix: &str) -> Result<PathBuf> {
    let parent = input.parent().unwrap_or_else(|| Path::new("."));
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| SilhouetteError::InvalidPath(input.to_path_buf()))?;

    let filename = format!("{stem}-{suffix}.png");
    Ok(parent.join(filename))
}

// --- preview pipeline ---

fn silhouette_png(original: &DynamicImage, params: SilhouetteParams) -> Result<Vec<u8>> {
    let started = Instant::now();
    let silhouette = crate::silhouette_dynamic(original, params);
    let png = encode_png(&silhouette)?;
    debug!(
        "silhouette {}x{} at intensity {:.2} in {:?} ({} bytes out)",
        silhouette.width(),
        silhouette.height(),
        params.intensity,
        started.elapsed(),
        png.len()
    );
    Ok(png)
}

/// Generate the silhouette of an image file and return it as PNG bytes.
pub fn silhouette_png_from_path(input: &Path, params: SilhouetteParams) -> Result<Vec<u8>> {
    let original = open_image(input)?;
    silhouette_png(&original, params)
}

/// Generate the silhouette from encoded image bytes (png/jpg) and return it as PNG bytes.
pub fn silhouette_png_from_bytes(input: &[u8], params: SilhouetteParams) -> Result<Vec<u8>> {
    let original = open_image_from_bytes(input)?;
    silhouette_png(&original, params)
}
