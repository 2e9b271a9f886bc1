use crate::foundation::core::Rgba8Premul;
use crate::foundation::math::mul_div255_u8;

/// Premultiplied source-over with an extra global opacity in `[0, 1]`.
pub fn over(dst: Rgba8Premul, src: Rgba8Premul, opacity: f32) -> Rgba8Premul {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src.a == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255_u8(u16::from(src.a), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);
    let channel = |s: u8, d: u8| {
        mul_div255_u8(u16::from(s), op).saturating_add(mul_div255_u8(u16::from(d), inv))
    };

    Rgba8Premul {
        r: channel(src.r, dst.r),
        g: channel(src.g, dst.g),
        b: channel(src.b, dst.b),
        a: sa.saturating_add(mul_div255_u8(u16::from(dst.a), inv)),
    }
}

/// Blend a shaded row over a run of RGBA8 bytes (`dst.len() == 4 * src.len()`).
pub(crate) fn over_row(dst: &mut [u8], src: &[Rgba8Premul], opacity: f32) {
    for (d, &s) in dst.chunks_exact_mut(4).zip(src) {
        let out = over(Rgba8Premul::from_array([d[0], d[1], d[2], d[3]]), s, opacity);
        d.copy_from_slice(&out.to_array());
    }
}

/// Overwrite a run of RGBA8 bytes with a shaded row.
pub(crate) fn copy_row(dst: &mut [u8], src: &[Rgba8Premul]) {
    for (d, &s) in dst.chunks_exact_mut(4).zip(src) {
        d.copy_from_slice(&s.to_array());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/composite.rs"]
mod tests;
