//! Pure per-pixel compositing on RGBA8 buffers.
//!
//! Always available (no feature gate) so the rasterizer and any caller that
//! hands raw bytes to a host (e.g. `ImageData`) share the same math.

use point_field_core::Rgb;

/// Composites `color` at opacity `alpha` over the pixel starting at `dst[0]`
/// (source-over). The destination alpha byte is raised accordingly.
///
/// `dst` must hold at least four bytes.
pub fn blend(dst: &mut [u8], color: Rgb, alpha: f64) {
    let a = alpha.clamp(0.0, 1.0);
    if a <= 0.0 {
        return;
    }
    let mix = |d: u8, s: u8| (f64::from(s) * a + f64::from(d) * (1.0 - a)).round() as u8;
    dst[0] = mix(dst[0], color.r);
    dst[1] = mix(dst[1], color.g);
    dst[2] = mix(dst[2], color.b);
    let da = f64::from(dst[3]) / 255.0;
    dst[3] = ((a + da * (1.0 - a)) * 255.0).round() as u8;
}

/// Fills every pixel of an RGBA8 buffer with an opaque color.
pub fn fill(buf: &mut [u8], color: Rgb) {
    for px in buf.chunks_exact_mut(4) {
        px.copy_from_slice(&[color.r, color.g, color.b, 255]);
    }
}
