use image::{DynamicImage, ImageBuffer, Rgba, RgbaImage};

mod cache;
mod config;
mod error;
mod folder;
mod io;
mod params;

pub use cache::{SilhouetteCache, DEFAULT_CACHE_CAPACITY};
pub use config::Config;
pub use error::{Result, SilhouetteError};
pub use folder::{is_supported_image, ImageFolder, SUPPORTED_EXTENSIONS};
pub use io::{
    derive_output_path, encode_png, load_image, load_image_from_bytes, open_image,
    open_image_from_bytes, save_png, silhouette_png_from_bytes, silhouette_png_from_path,
};
pub use params::{
    clamp_intensity, snap_intensity, SilhouetteParams, INTENSITY_DEFAULT, INTENSITY_MAX,
    INTENSITY_MIN, INTENSITY_STEP,
};

pub const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
pub const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// 16-bit RGBA buffer, as decoded from 16-bit PNGs.
pub type Rgba16Image = ImageBuffer<Rgba<u16>, Vec<u16>>;

// --- channel widening ---

/// Channel types the transform can read. Every channel is widened to the
/// 16-bit range [0, 65535] before luminance is computed.
pub trait Channel16: Copy {
    fn widen(self) -> u16;
}

impl Channel16 for u8 {
    #[inline]
    fn widen(self) -> u16 {
        u16::from(self) * 257
    }
}

impl Channel16 for u16 {
    #[inline]
    fn widen(self) -> u16 {
        self
    }
}

// --- BT.601 luma ---

/// Perceptual luminance in [0, 1] of 16-bit straight channels.
#[inline]
pub fn luma_bt601(r: u16, g: u16, b: u16) -> f64 {
    let weighted = u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114;
    f64::from(weighted) / 1000.0 / 65535.0
}

// --- silhouette transform ---

fn silhouette_from_raw<S: Channel16>(
    (w, h): (u32, u32),
    raw: &[S],
    params: SilhouetteParams,
) -> RgbaImage {
    let adjusted_threshold = params.adjusted_threshold();
    let mut out: RgbaImage = ImageBuffer::new(w, h);

    for (dst, src) in out.pixels_mut().zip(raw.chunks_exact(4)) {
        let gray = luma_bt601(src[0].widen(), src[1].widen(), src[2].widen());
        *dst = if gray < adjusted_threshold && src[3].widen() > 0 {
            BLACK
        } else {
            WHITE
        };
    }

    out
}

/// Render `input` as an opaque black-and-white silhouette.
///
/// A pixel turns black when its luminance is below `1 - intensity` and it is
/// not fully transparent; everything else turns white. The intensity is not
/// range-checked, out-of-range values just move the cutoff.
pub fn silhouette(input: &RgbaImage, params: SilhouetteParams) -> RgbaImage {
    silhouette_from_raw(input.dimensions(), input.as_raw(), params)
}

/// [`silhouette`] for 16-bit sources.
pub fn silhouette_rgba16(input: &Rgba16Image, params: SilhouetteParams) -> RgbaImage {
    silhouette_from_raw(input.dimensions(), input.as_raw(), params)
}

/// Same as [`silhouette`] for any decoded image. 16-bit and float sources go
/// through the 16-bit path so they keep their precision.
pub fn silhouette_dynamic(input: &DynamicImage, params: SilhouetteParams) -> RgbaImage {
    match input {
        DynamicImage::ImageRgba8(buf) => silhouette(buf, params),
        DynamicImage::ImageRgba16(buf) => silhouette_rgba16(buf, params),
        DynamicImage::ImageLuma8(_) | DynamicImage::ImageLumaA8(_) | DynamicImage::ImageRgb8(_) => {
            silhouette(&input.to_rgba8(), params)
        }
        _ => silhouette_rgba16(&input.to_rgba16(), params),
    }
}
