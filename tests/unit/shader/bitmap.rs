use crate::bitmap::BYTES_PER_PIXEL;
use crate::shader::sampler::TileMode;

use super::*;

const A: Rgba8Premul = Rgba8Premul::pack_argb(0xFF, 0xFF, 0, 0);
const B: Rgba8Premul = Rgba8Premul::pack_argb(0xFF, 0, 0, 0xFF);
const C: Rgba8Premul = Rgba8Premul::pack_argb(0x80, 0, 0x80, 0);
const D: Rgba8Premul = Rgba8Premul::pack_argb(0x40, 0x40, 0x40, 0x40);
const PAD: Rgba8Premul = Rgba8Premul::pack_argb(0xFF, 0xFF, 0, 0xFF);

fn padded_2x2() -> Bitmap {
    // Two pixels per row plus one padding pixel.
    Bitmap::new(2, 2, 3 * BYTES_PER_PIXEL, vec![A, B, PAD, C, D], false)
}

#[test]
fn identity_samples_pixels_and_skips_padding() {
    let sh = create_bitmap_shader(&padded_2x2(), &Matrix::identity()).unwrap();
    let ctx = sh.bind(&Matrix::identity()).unwrap();
    assert_eq!(ctx.produce_span(0, 0, 2), vec![A, B]);
    assert_eq!(ctx.produce_span(0, 1, 2), vec![C, D]);
    assert_eq!((sh.width(), sh.height()), (2, 2));
}

#[test]
fn clamp_extends_edge_pixels() {
    let bm = Bitmap::tight(2, 1, vec![A, B]);
    let sh = create_bitmap_shader(&bm, &Matrix::identity()).unwrap();
    let ctx = sh.bind(&Matrix::identity()).unwrap();
    assert_eq!(ctx.produce_span(-3, 0, 8), vec![A, A, A, A, B, B, B, B]);
    assert_eq!(ctx.produce_span(0, -5, 2), vec![A, B]);
    assert_eq!(ctx.produce_span(0, 9, 2), vec![A, B]);
}

#[test]
fn repeat_wraps_image() {
    let bm = Bitmap::tight(2, 1, vec![A, B]);
    let opts = SamplerOpts::default().with_tile(TileMode::Repeat);
    let sh = create_bitmap_shader_with(&bm, &Matrix::identity(), opts).unwrap();
    assert_eq!(sh.sampler(), opts);
    let ctx = sh.bind(&Matrix::identity()).unwrap();
    assert_eq!(ctx.produce_span(-3, 0, 8), vec![B, A, B, A, B, A, B, A]);
}

#[test]
fn local_matrix_stretches_bitmap_over_rect() {
    // A 1x5 column stretched to 100x100, as a band-per-row backdrop.
    let column = Bitmap::tight(1, 5, vec![A, B, C, D, A]);
    let local = Matrix::scale(100.0, 100.0 / 5.0);
    let sh = create_bitmap_shader(&column, &local).unwrap();
    let ctx = sh.bind(&Matrix::identity()).unwrap();

    let first = |y| ctx.produce_span(0, y, 1)[0];
    assert_eq!(first(0), A);
    assert_eq!(first(19), A);
    assert_eq!(first(20), B);
    assert_eq!(first(45), C);
    assert_eq!(first(99), A);
    assert!(ctx.produce_span(0, 70, 100).iter().all(|&px| px == D));
}

#[test]
fn translated_and_scaled_placement() {
    let bm = Bitmap::tight(2, 2, vec![A, B, C, D]);
    let local = Matrix::translate(10.0, 20.0).pre_scale(4.0, 4.0);
    let sh = create_bitmap_shader(&bm, &local).unwrap();
    let ctx = sh.bind(&Matrix::identity()).unwrap();
    assert_eq!(ctx.produce_span(10, 20, 8), vec![A, A, A, A, B, B, B, B]);
    assert_eq!(ctx.produce_span(10, 27, 8), vec![C, C, C, C, D, D, D, D]);
}

#[test]
fn source_mutation_after_construction_is_invisible() {
    let mut bm = padded_2x2();
    let mut local = Matrix::scale(2.0, 2.0);
    let sh = create_bitmap_shader(&bm, &local).unwrap();
    let before = sh.bind(&Matrix::identity()).unwrap().produce_span(0, 0, 4);

    bm.pixels.fill(PAD);
    bm.reset();
    local = Matrix::scale(0.0, 0.0);
    assert!(local.invert().is_none());

    let after = sh.bind(&Matrix::identity()).unwrap().produce_span(0, 0, 4);
    assert_eq!(before, after);
    assert_eq!(after, vec![A, A, B, B]);
}

#[test]
fn opacity_is_the_declared_flag() {
    let opaque_pixels = vec![A, B];
    let declared_false = Bitmap::new(2, 1, 2 * BYTES_PER_PIXEL, opaque_pixels.clone(), false);
    let declared_true = Bitmap::new(2, 1, 2 * BYTES_PER_PIXEL, opaque_pixels, true);
    assert!(
        !create_bitmap_shader(&declared_false, &Matrix::identity())
            .unwrap()
            .is_opaque()
    );
    assert!(
        create_bitmap_shader(&declared_true, &Matrix::identity())
            .unwrap()
            .is_opaque()
    );
}

#[test]
fn invalid_inputs_are_rejected() {
    let empty = Bitmap::default();
    assert!(matches!(
        create_bitmap_shader(&empty, &Matrix::identity()),
        Err(ShadeError::Validation(_))
    ));

    let short_stride = Bitmap::new(3, 1, 2 * BYTES_PER_PIXEL, vec![A; 3], true);
    assert!(create_bitmap_shader(&short_stride, &Matrix::identity()).is_err());

    let ok = Bitmap::tight(1, 1, vec![A]);
    let nan = Matrix::scale(f64::NAN, 1.0);
    assert!(matches!(
        create_bitmap_shader(&ok, &nan),
        Err(ShadeError::Validation(_))
    ));
}

#[test]
fn singular_local_matrix_constructs_but_never_binds() {
    let bm = Bitmap::tight(1, 1, vec![A]);
    let sh = create_bitmap_shader(&bm, &Matrix::scale(0.0, 1.0)).unwrap();
    assert!(sh.bind(&Matrix::identity()).is_none());
}

#[test]
fn bilinear_blends_neighbouring_centres() {
    let black = Rgba8Premul::pack_argb(0xFF, 0, 0, 0);
    let white = Rgba8Premul::pack_argb(0xFF, 0xFF, 0xFF, 0xFF);
    let bm = Bitmap::tight(2, 1, vec![black, white]);
    let opts = SamplerOpts::default().with_filter(FilterMode::Bilinear);
    let sh = create_bitmap_shader_with(&bm, &Matrix::identity(), opts).unwrap();

    let ctx = sh.bind(&Matrix::identity()).unwrap();
    assert_eq!(ctx.produce_span(0, 0, 2), vec![black, white]);

    let mut mid = [Rgba8Premul::transparent()];
    sh.shade_local(Point::new(1.0, 0.5), Vec2::ZERO, &mut mid);
    assert_eq!(mid[0], Rgba8Premul::pack_argb(0xFF, 128, 128, 128));
}

#[test]
fn span_matches_per_pixel_evaluation_under_rotation() {
    let bm = Bitmap::tight(3, 2, vec![A, B, C, D, A, B]);
    let local = Matrix::translate(5.0, 5.0).pre_scale(7.0, 9.0);
    let sh = create_bitmap_shader(&bm, &local).unwrap();
    let ctx = sh
        .bind(&Matrix::translate(60.0, 10.0).pre_rotate(0.6))
        .unwrap();
    for y in [0, 13, 31] {
        let span = ctx.produce_span(-20, y, 90);
        for (i, &px) in span.iter().enumerate() {
            assert_eq!(px, ctx.produce_span(-20 + i as i32, y, 1)[0]);
        }
    }
}

#[test]
fn far_translation_saturates_instead_of_overflowing() {
    let bm = Bitmap::tight(2, 1, vec![A, B]);
    for filter in [FilterMode::Nearest, FilterMode::Bilinear] {
        let clamp = SamplerOpts::default().with_filter(filter);
        let sh = create_bitmap_shader_with(&bm, &Matrix::identity(), clamp).unwrap();

        let left = sh.bind(&Matrix::translate(1e300, 0.0)).unwrap();
        assert_eq!(left.produce_span(0, 0, 2), vec![A, A]);

        let right = sh.bind(&Matrix::translate(-1e300, -1e300)).unwrap();
        assert_eq!(right.produce_span(0, 0, 2), vec![B, B]);

        for tile in [TileMode::Repeat, TileMode::Mirror] {
            let sh = create_bitmap_shader_with(&bm, &Matrix::identity(), clamp.with_tile(tile))
                .unwrap();
            let ctx = sh.bind(&Matrix::translate(-1e300, 1e300)).unwrap();
            assert_eq!(ctx.produce_span(0, 0, 3).len(), 3);
        }
    }
}
