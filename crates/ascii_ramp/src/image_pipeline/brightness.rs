use image::Rgb;

/// HSB brightness: the strongest channel, normalized to [0.0, 1.0].
pub fn hsb_brightness(pixel: Rgb<u8>) -> f32 {
    let [r, g, b] = pixel.0;
    f32::from(r.max(g).max(b)) / 255.0
}
