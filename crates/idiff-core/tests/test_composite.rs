#[allow(dead_code)]
mod common;

use approx::assert_abs_diff_eq;

use idiff_core::composite::{BlendMode, Bounds, CompositeImage, Opacity};
use idiff_core::IdiffError;

use common::{gradient, solid, BLUE, RED, WHITE};

#[test]
fn test_uniform_opacity_broadcasts_to_every_layer() {
    assert_eq!(Opacity::Uniform(0.25).resolve(4), vec![0.25; 4]);
}

#[test]
fn test_short_sequence_repeats_last_value() {
    let resolved = Opacity::PerLayer(vec![0.2, 0.6]).resolve(5);
    assert_eq!(resolved, vec![0.2, 0.6, 0.6, 0.6, 0.6]);
}

#[test]
fn test_long_sequence_is_truncated() {
    let resolved = Opacity::PerLayer(vec![0.1, 0.2, 0.3, 0.4]).resolve(2);
    assert_eq!(resolved, vec![0.1, 0.2]);
}

#[test]
fn test_empty_sequence_is_opaque() {
    assert_eq!(Opacity::PerLayer(Vec::new()).resolve(3), vec![1.0; 3]);
}

#[test]
fn test_opacity_is_clamped() {
    assert_eq!(Opacity::PerLayer(vec![-1.0, 2.0]).resolve(2), vec![0.0, 1.0]);
}

#[test]
fn test_default_bounds_follow_background() {
    let background = solid(10, 10, RED);
    let wide = solid(20, 5, BLUE);
    let composite = CompositeImage::new(
        BlendMode::SourceOver,
        &background,
        &[&wide],
        &Opacity::default(),
        None,
    )
    .unwrap();
    assert_eq!(composite.bounds(), Bounds::new(0, 0, 10, 10));
}

#[test]
fn test_explicit_bounds_are_used_as_given() {
    let background = gradient(16, 16);
    let bounds = Bounds::new(2, 3, 4, 5);
    let composite = CompositeImage::new(
        BlendMode::SourceOver,
        &background,
        &[],
        &Opacity::default(),
        Some(bounds),
    )
    .unwrap();
    assert_eq!((composite.width(), composite.height()), (4, 5));
    assert_eq!(composite.pixel(0, 0), Some(background.get_pixel(2, 3).0));
    assert_eq!(composite.pixel(4, 0), None);
}

#[test]
fn test_area_outside_every_layer_stays_transparent() {
    let background = solid(4, 4, RED);
    let composite = CompositeImage::new(
        BlendMode::SourceOver,
        &background,
        &[],
        &Opacity::default(),
        Some(Bounds::new(2, 2, 4, 4)),
    )
    .unwrap();
    assert_eq!(composite.pixel(0, 0), Some(RED));
    assert_eq!(composite.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn test_zero_sized_bounds_are_rejected() {
    let background = solid(4, 4, RED);
    let result = CompositeImage::new(
        BlendMode::Difference,
        &background,
        &[],
        &Opacity::default(),
        Some(Bounds::new(0, 0, 0, 4)),
    );
    assert!(matches!(
        result,
        Err(IdiffError::InvalidBounds { width: 0, height: 4 })
    ));
}

#[test]
fn test_difference_of_red_and_half_blue_is_deterministic() {
    let red = solid(10, 10, RED);
    let blue = solid(10, 10, BLUE);
    let opacity = Opacity::PerLayer(vec![1.0, 0.5]);
    let build = || {
        CompositeImage::new(
            BlendMode::Difference,
            &red,
            &[&blue],
            &opacity,
            Some(Bounds::new(0, 0, 10, 10)),
        )
        .unwrap()
    };

    let first = build();
    for y in 0..10 {
        for x in 0..10 {
            assert_eq!(first.pixel(x, y), Some([255, 0, 128, 255]));
        }
    }
    assert_eq!(first, build());
}

#[test]
fn test_multiply_by_white_keeps_background() {
    let background = gradient(8, 8);
    let white = solid(8, 8, WHITE);
    let composite = CompositeImage::new(
        BlendMode::Multiply,
        &background,
        &[&white],
        &Opacity::default(),
        None,
    )
    .unwrap();
    assert_eq!(composite.to_rgba_image(), background);
}

#[test]
fn test_difference_of_identical_images_is_black() {
    let a = gradient(12, 9);
    let composite =
        CompositeImage::from_images(BlendMode::Difference, &[&a, &a], &Opacity::default(), None)
            .unwrap();
    assert!(composite
        .premultiplied()
        .chunks_exact(4)
        .all(|px| px == [0, 0, 0, 255]));
}

#[test]
fn test_translucent_result_is_unpremultiplied_on_export() {
    let blue = solid(2, 2, BLUE);
    let composite = CompositeImage::new(
        BlendMode::SourceOver,
        &blue,
        &[],
        &Opacity::Uniform(0.5),
        None,
    )
    .unwrap();
    assert_eq!(composite.pixel(0, 0), Some([0, 0, 128, 128]));
    assert_eq!(composite.to_rgba_image().get_pixel(0, 0).0, [0, 0, 255, 128]);
}

#[test]
fn test_parallel_rows_match_sequential_rows() {
    let background = gradient(300, 300);
    let layer = solid(300, 300, [40, 200, 90, 200]);
    let opacity = Opacity::Uniform(0.7);

    // 90,000 pixels takes the parallel path; the 50x50 crop does not.
    let full =
        CompositeImage::new(BlendMode::Screen, &background, &[&layer], &opacity, None).unwrap();
    let crop = CompositeImage::new(
        BlendMode::Screen,
        &background,
        &[&layer],
        &opacity,
        Some(Bounds::new(10, 20, 50, 50)),
    )
    .unwrap();

    for y in 0..50 {
        for x in 0..50 {
            assert_eq!(crop.pixel(x, y), full.pixel(x + 10, y + 20));
        }
    }
}

#[test]
fn test_blend_formulas_on_opaque_inputs() {
    let s = [0.2, 0.5, 0.8, 1.0];
    let d = [0.6, 0.5, 0.1, 1.0];
    let expect = |mode: BlendMode, rgb: [f32; 3]| {
        let out = mode.blend(s, d);
        for c in 0..3 {
            assert_abs_diff_eq!(out[c], rgb[c], epsilon = 1e-6);
        }
        assert_abs_diff_eq!(out[3], 1.0, epsilon = 1e-6);
    };

    expect(BlendMode::SourceOver, [0.2, 0.5, 0.8]);
    expect(BlendMode::Multiply, [0.12, 0.25, 0.08]);
    expect(BlendMode::Screen, [0.68, 0.75, 0.82]);
    expect(BlendMode::Darken, [0.2, 0.5, 0.1]);
    expect(BlendMode::Lighten, [0.6, 0.5, 0.8]);
    expect(BlendMode::Difference, [0.4, 0.0, 0.7]);
    expect(BlendMode::Exclusion, [0.56, 0.5, 0.74]);
}

#[test]
fn test_save_writes_straight_rgba() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("diff.png");
    let composite = CompositeImage::new(
        BlendMode::Difference,
        &solid(3, 3, RED),
        &[&solid(3, 3, BLUE)],
        &Opacity::default(),
        None,
    )
    .unwrap();
    composite.save(&path).unwrap();

    let saved = image::open(&path).unwrap().to_rgba8();
    assert_eq!(saved.get_pixel(1, 1).0, [255, 0, 255, 255]);
}
