/// Clear colour behind everything.
pub const SKY: u32 = 0x87ceeb;
/// Hemisphere light colour from above.
pub const HEMISPHERE_SKY: u32 = 0xffffff;
/// Hemisphere light colour from below.
pub const HEMISPHERE_GROUND: u32 = 0x222222;
pub const HEMISPHERE_INTENSITY: f32 = 1.2;
/// Flat colour of the rippled ground plane.
pub const TERRAIN: u32 = 0x3caa5b;
/// Preview outline.
pub const OUTLINE: u32 = 0xffffff;

/// sRGB-encoded channel to linear.
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// `0xRRGGBB` to linear RGB, for uniforms and vertex colours written to an
/// sRGB surface.
pub fn linear_rgb(hex: u32) -> [f32; 3] {
    let channel = |shift: u32| srgb_to_linear(((hex >> shift) & 0xff) as f32 / 255.0);
    [channel(16), channel(8), channel(0)]
}

pub fn linear_rgba(hex: u32, alpha: f32) -> [f32; 4] {
    let [r, g, b] = linear_rgb(hex);
    [r, g, b, alpha]
}

pub fn clear_color(hex: u32) -> wgpu::Color {
    let [r, g, b] = linear_rgb(hex);
    wgpu::Color {
        r: r as f64,
        g: g as f64,
        b: b as f64,
        a: 1.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(linear_rgb(0x000000), [0.0, 0.0, 0.0]);
        assert_eq!(linear_rgb(0xffffff), [1.0, 1.0, 1.0]);
    }

    #[test]
    fn sky_is_light_blue() {
        let [r, g, b] = linear_rgb(SKY);
        assert!((r - 0.242).abs() < 0.005);
        assert!((g - 0.617).abs() < 0.005);
        assert!((b - 0.831).abs() < 0.005);
    }

    #[test]
    fn channel_order_is_rgb() {
        let [r, g, b] = linear_rgb(0xff0000);
        assert_eq!((r, g, b), (1.0, 0.0, 0.0));
    }
}
