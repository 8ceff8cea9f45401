#![allow(dead_code)]

use image::{Rgba, RgbaImage};

/// Horizontal gray ramp from black on the left to white on the right.
pub fn gray_ramp(width: u32, height: u32) -> RgbaImage {
    let span = width.saturating_sub(1).max(1);
    RgbaImage::from_fn(width, height, |x, _| {
        let v = (x * 255 / span) as u8;
        Rgba([v, v, v, 255])
    })
}

/// Dark disc on a light background, with a fully transparent border column.
pub fn disc_on_light(size: u32) -> RgbaImage {
    let c = size as i64 / 2;
    let r2 = (size as i64 / 3).pow(2);
    RgbaImage::from_fn(size, size, |x, y| {
        if x == 0 {
            return Rgba([0, 0, 0, 0]);
        }
        let dx = x as i64 - c;
        let dy = y as i64 - c;
        if dx * dx + dy * dy <= r2 {
            Rgba([20, 30, 40, 255])
        } else {
            Rgba([230, 225, 210, 255])
        }
    })
}
