#[allow(dead_code)]
mod common;

use approx::assert_relative_eq;
use ndarray::Array2;

use pagescan_core::color::color_frame_to_rgb;
use pagescan_core::enhance::{
    apply_geometry, enhance_batch, enhance_page, rotate, tier_scale, CropRect, PageEdit,
    PageFilter, PerspectiveQuad, Point, QualityTier, Rotation,
};
use pagescan_core::error::PagescanError;
use pagescan_core::frame::{ColorFrame, FrameSample};

use common::{page, uniform};

fn numbered(h: usize, w: usize) -> ColorFrame {
    let data = Array2::from_shape_fn((h, w), |(r, c)| (r * w + c) as f32 / (h * w) as f32);
    ColorFrame::from_planes(data.clone(), data.mapv(|v| 1.0 - v), data.mapv(|v| v * 0.5))
}

fn full_quad() -> PerspectiveQuad {
    PerspectiveQuad::new([
        Point::new(0.0, 0.0),
        Point::new(1.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ])
    .unwrap()
}

fn skewed_quad() -> PerspectiveQuad {
    PerspectiveQuad::new([
        Point::new(0.15, 0.10),
        Point::new(0.85, 0.05),
        Point::new(0.95, 0.90),
        Point::new(0.05, 0.95),
    ])
    .unwrap()
}

// ---------------------------------------------------------------------------
// Determinism and identity
// ---------------------------------------------------------------------------

#[test]
fn test_enhancement_is_byte_identical_across_runs() {
    let sample = FrameSample::new(1000, page(2));
    let edits = [
        PageEdit::default(),
        PageEdit {
            rotation: Rotation::Cw90,
            perspective: Some(skewed_quad()),
            filter: PageFilter::Document,
            ..Default::default()
        },
        PageEdit {
            rotation: Rotation::Cw270,
            crop: CropRect::new(0.1, 0.2, 0.9, 0.7).unwrap(),
            filter: PageFilter::BlackWhite,
            ..Default::default()
        },
    ];

    for edit in &edits {
        for tier in [QualityTier::EmailFriendly, QualityTier::Balanced, QualityTier::PrintQuality] {
            let a = enhance_page(&sample, edit, tier).unwrap();
            let b = enhance_page(&sample, edit, tier).unwrap();
            assert_eq!(a.image.as_raw(), b.image.as_raw(), "{edit:?} at {tier}");
            assert_eq!(a.byte_size, b.byte_size);
        }
    }
}

#[test]
fn test_full_crop_original_filter_is_identity() {
    let image = numbered(48, 64);
    let sample = FrameSample::new(0, image.clone());
    let edit = PageEdit::with_filter(PageFilter::Original);

    let page = enhance_page(&sample, &edit, QualityTier::PrintQuality).unwrap();
    assert_eq!(page.image, color_frame_to_rgb(&image));
    assert_eq!(page.byte_size, 48 * 64 * 3);

    // Other tiers only change the size.
    let balanced = enhance_page(&sample, &edit, QualityTier::Balanced).unwrap();
    assert_eq!((balanced.width(), balanced.height()), (51, 38));
}

#[test]
fn test_input_frame_is_not_mutated() {
    let sample = FrameSample::new(0, page(1));
    let before = sample.clone();
    let edit = PageEdit {
        rotation: Rotation::Cw180,
        filter: PageFilter::BlackWhite,
        ..Default::default()
    };
    enhance_page(&sample, &edit, QualityTier::Balanced).unwrap();
    assert_eq!(sample, before);
}

#[test]
fn test_batch_matches_sequential() {
    let jobs: Vec<(FrameSample, PageEdit)> = (0..4)
        .map(|i| {
            let edit = PageEdit {
                rotation: Rotation::try_from(90 * i as u32).unwrap(),
                ..Default::default()
            };
            (FrameSample::new(i as u64 * 1000, page(i)), edit)
        })
        .collect();

    let batch = enhance_batch(&jobs, QualityTier::Balanced);
    assert_eq!(batch.len(), jobs.len());
    for ((sample, edit), result) in jobs.iter().zip(batch) {
        let expected = enhance_page(sample, edit, QualityTier::Balanced).unwrap();
        assert_eq!(result.unwrap(), expected);
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn test_black_white_on_mid_gray_is_monochrome_and_darker() {
    let sample = FrameSample::new(0, uniform(32, 32, 0.5));
    let edit = PageEdit::with_filter(PageFilter::BlackWhite);
    let page = enhance_page(&sample, &edit, QualityTier::PrintQuality).unwrap();

    let pixels: Vec<[u8; 3]> = page.image.pixels().map(|p| p.0).collect();
    assert!(pixels.iter().all(|p| p[0] == p[1] && p[1] == p[2]));

    for channel in 0..3 {
        let values: Vec<f64> = pixels.iter().map(|p| p[channel] as f64).collect();
        let mean = values.iter().sum::<f64>() / values.len() as f64;
        let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / values.len() as f64;
        assert!(variance < 1e-9, "channel {channel} variance {variance}");
    }

    let mean = pixels.iter().map(|p| p[0] as f64).sum::<f64>() / pixels.len() as f64;
    assert_relative_eq!(mean - 127.5, -40.0, epsilon = 1.5);
}

#[test]
fn test_document_filter_stretches_low_contrast_page() {
    // Paper and ink squeezed into a narrow band.
    let faded = common::text_page(0, 0.55, 0.45);
    let sample = FrameSample::new(0, faded);
    let out = enhance_page(
        &sample,
        &PageEdit::with_filter(PageFilter::Document),
        QualityTier::PrintQuality,
    )
    .unwrap();

    let (lo, hi) = out
        .image
        .pixels()
        .map(|p| p.0[0])
        .fold((u8::MAX, u8::MIN), |(lo, hi), v| (lo.min(v), hi.max(v)));
    assert!(lo < 20, "darkest pixel {lo}");
    assert!(hi > 235, "brightest pixel {hi}");
}

#[test]
fn test_document_filter_on_flat_frame_applies_contrast_only() {
    // No luminance range to stretch, no edges to sharpen.
    let sample = FrameSample::new(0, uniform(16, 16, 0.5));
    let out = enhance_page(&sample, &PageEdit::default(), QualityTier::PrintQuality).unwrap();
    let expected = ((0.5f32 - 128.0 / 255.0) * 1.2 + (128.0 + 10.0) / 255.0) * 255.0;
    for p in out.image.pixels() {
        assert!((p.0[0] as f32 - expected).abs() <= 1.0);
    }
}

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

#[test]
fn test_rotation_moves_corners_clockwise() {
    let image = numbered(2, 3);
    let corner = |f: &ColorFrame, r: usize, c: usize| f.red.data[[r, c]];

    let cw90 = rotate(&image, Rotation::Cw90);
    assert_eq!((cw90.height(), cw90.width()), (3, 2));
    // Top-left goes to top-right.
    assert_eq!(corner(&cw90, 0, 1), corner(&image, 0, 0));
    // Bottom-left goes to top-left.
    assert_eq!(corner(&cw90, 0, 0), corner(&image, 1, 0));

    let cw180 = rotate(&image, Rotation::Cw180);
    assert_eq!(corner(&cw180, 1, 2), corner(&image, 0, 0));

    let cw270 = rotate(&image, Rotation::Cw270);
    assert_eq!((cw270.height(), cw270.width()), (3, 2));
    // Top-left goes to bottom-left.
    assert_eq!(corner(&cw270, 2, 0), corner(&image, 0, 0));
}

#[test]
fn test_four_quarter_turns_are_identity() {
    let image = numbered(5, 7);
    let mut turned = image.clone();
    for _ in 0..4 {
        turned = rotate(&turned, Rotation::Cw90);
    }
    assert_eq!(turned, image);
}

#[test]
fn test_crop_uses_normalized_bounds() {
    let image = numbered(48, 64);
    let edit = PageEdit {
        crop: CropRect::new(0.25, 0.5, 0.75, 1.0).unwrap(),
        ..Default::default()
    };
    let cropped = apply_geometry(&image, &edit).unwrap();
    assert_eq!((cropped.height(), cropped.width()), (24, 32));
    assert_eq!(cropped.red.data[[0, 0]], image.red.data[[24, 16]]);
}

#[test]
fn test_crop_applies_after_rotation() {
    let image = numbered(48, 64);
    let edit = PageEdit {
        rotation: Rotation::Cw90,
        crop: CropRect::new(0.0, 0.0, 0.5, 1.0).unwrap(),
        ..Default::default()
    };
    let out = apply_geometry(&image, &edit).unwrap();
    // Rotated frame is 64 high, 48 wide; crop keeps its left half.
    assert_eq!((out.height(), out.width()), (64, 24));
}

#[test]
fn test_crop_too_small_for_frame_fails_at_render() {
    let edit = PageEdit {
        crop: CropRect::new(0.0, 0.0, 0.001, 1.0).unwrap(),
        ..Default::default()
    };
    let err = apply_geometry(&numbered(48, 64), &edit).unwrap_err();
    assert!(matches!(err, PagescanError::InvalidGeometry(_)));
}

#[test]
fn test_full_frame_quad_reproduces_frame() {
    let image = numbered(24, 32);
    let out = pagescan_core::enhance::unwarp(&image, &full_quad()).unwrap();
    assert_eq!((out.height(), out.width()), (24, 32));
    for (a, b) in out.green.data.iter().zip(image.green.data.iter()) {
        assert_relative_eq!(*a, *b, epsilon = 1e-4);
    }
}

#[test]
fn test_perspective_replaces_crop() {
    // White page on a black table.
    let data = Array2::from_shape_fn((100, 100), |(r, c)| {
        if (20..=80).contains(&r) && (20..=80).contains(&c) {
            1.0
        } else {
            0.0
        }
    });
    let image = ColorFrame::from_planes(data.clone(), data.clone(), data);
    let quad = PerspectiveQuad::new([
        Point::new(0.25, 0.25),
        Point::new(0.75, 0.25),
        Point::new(0.75, 0.75),
        Point::new(0.25, 0.75),
    ])
    .unwrap();
    let edit = PageEdit {
        crop: CropRect::new(0.0, 0.0, 0.1, 0.1).unwrap(),
        perspective: Some(quad),
        filter: PageFilter::Original,
        ..Default::default()
    };

    let out = apply_geometry(&image, &edit).unwrap();
    assert_eq!((out.height(), out.width()), (51, 51));
    assert!(out.red.data.iter().all(|&v| (v - 1.0).abs() < 1e-5));
}

#[test]
fn test_skewed_quad_output_uses_longest_edges() {
    let image = numbered(100, 200);
    let out = pagescan_core::enhance::unwarp(&image, &skewed_quad()).unwrap();
    // Top edge 0.70 * 199 wide, bottom edge 0.90 * 199 wide: the bottom wins.
    let bottom = ((0.90f64 * 199.0).powi(2) + (0.05f64 * 99.0).powi(2)).sqrt();
    assert_eq!(out.width(), bottom.round() as usize + 1);
    assert!(out.height() > 80);
}

/// Red holds the normalized column, green the normalized row.
fn coordinate_gradient(h: usize, w: usize) -> ColorFrame {
    let xs = Array2::from_shape_fn((h, w), |(_, c)| c as f32 / (w - 1) as f32);
    let ys = Array2::from_shape_fn((h, w), |(r, _)| r as f32 / (h - 1) as f32);
    ColorFrame::from_planes(xs, ys, Array2::zeros((h, w)))
}

#[test]
fn test_skewed_quad_maps_corners_onto_quad_points() {
    let image = coordinate_gradient(100, 200);
    let out = pagescan_core::enhance::unwarp(&image, &skewed_quad()).unwrap();
    let (bottom, right) = (out.height() - 1, out.width() - 1);

    let sample = |row: usize, col: usize| (out.red.data[[row, col]], out.green.data[[row, col]]);
    for ((row, col), corner) in [(0, 0), (0, right), (bottom, right), (bottom, 0)]
        .into_iter()
        .zip(skewed_quad().corners())
    {
        let (x, y) = sample(row, col);
        assert_relative_eq!(x, corner.x, epsilon = 0.01);
        assert_relative_eq!(y, corner.y, epsilon = 0.01);
    }

    // The rectangle's centre lands on the intersection of the quad diagonals.
    let (x, y) = sample(bottom / 2, right / 2);
    assert_relative_eq!(x, 0.4971, epsilon = 0.01);
    assert_relative_eq!(y, 0.4471, epsilon = 0.01);
}

#[test]
fn test_empty_frame_is_invalid_geometry() {
    let err = apply_geometry(&uniform(0, 0, 0.5), &PageEdit::default()).unwrap_err();
    assert!(matches!(err, PagescanError::InvalidGeometry(_)));
}

// ---------------------------------------------------------------------------
// Construction-time validation
// ---------------------------------------------------------------------------

#[test]
fn test_degenerate_crop_rect_is_rejected() {
    for (l, t, r, b) in [(0.5, 0.0, 0.5, 1.0), (0.0, 0.8, 1.0, 0.2), (-0.1, 0.0, 1.0, 1.0)] {
        let err = CropRect::new(l, t, r, b).unwrap_err();
        assert!(matches!(err, PagescanError::InvalidGeometry(_)));
    }
    assert!(CropRect::default().is_full());
}

#[test]
fn test_invalid_quads_are_rejected() {
    let bow_tie = [
        Point::new(0.0, 0.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
        Point::new(0.0, 1.0),
    ];
    let collapsed = [
        Point::new(0.5, 0.5),
        Point::new(0.501, 0.5),
        Point::new(0.501, 0.501),
        Point::new(0.5, 0.501),
    ];
    let outside = [
        Point::new(0.0, 0.0),
        Point::new(1.2, 0.0),
        Point::new(1.0, 1.0),
        Point::new(0.0, 1.0),
    ];
    let counter_clockwise = [
        Point::new(0.0, 0.0),
        Point::new(0.0, 1.0),
        Point::new(1.0, 1.0),
        Point::new(1.0, 0.0),
    ];
    for corners in [bow_tie, collapsed, outside, counter_clockwise] {
        let err = PerspectiveQuad::new(corners).unwrap_err();
        assert!(matches!(err, PagescanError::InvalidGeometry(_)), "{corners:?}");
    }
}

#[test]
fn test_rotation_only_accepts_quarter_turns() {
    assert_eq!(Rotation::try_from(270).unwrap(), Rotation::Cw270);
    assert!(matches!(
        Rotation::try_from(45),
        Err(PagescanError::InvalidGeometry(_))
    ));
}

#[test]
fn test_unknown_filter_is_rejected_at_construction() {
    assert_eq!("black-white".parse::<PageFilter>().unwrap(), PageFilter::BlackWhite);
    assert!(matches!(
        "sepia".parse::<PageFilter>(),
        Err(PagescanError::UnknownFilter(_))
    ));
    assert!(serde_json::from_str::<PageFilter>("\"SEPIA\"").is_err());
}

#[test]
fn test_page_edit_deserialization_validates() {
    let edit: PageEdit = serde_json::from_str(
        r#"{"rotation": 90, "crop": {"left": 0.1, "top": 0.1, "right": 0.9, "bottom": 0.9}, "filter": "BLACK_WHITE"}"#,
    )
    .unwrap();
    assert_eq!(edit.rotation, Rotation::Cw90);
    assert_eq!(edit.filter, PageFilter::BlackWhite);
    assert!(edit.perspective.is_none());

    assert!(serde_json::from_str::<PageEdit>(r#"{"rotation": 45}"#).is_err());
    assert!(serde_json::from_str::<PageEdit>(
        r#"{"crop": {"left": 0.5, "top": 0.0, "right": 0.5, "bottom": 1.0}}"#
    )
    .is_err());
    assert!(serde_json::from_str::<PageEdit>(
        r#"{"perspective": [{"x": 0, "y": 0}, {"x": 1, "y": 1}, {"x": 1, "y": 0}, {"x": 0, "y": 1}]}"#
    )
    .is_err());
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

#[test]
fn test_tier_scale_never_upscales() {
    assert_relative_eq!(tier_scale(1000, QualityTier::PrintQuality), 1.0);
    assert_relative_eq!(tier_scale(1000, QualityTier::EmailFriendly), 0.6);
    // Large frames are first brought down to the print baseline.
    assert_relative_eq!(tier_scale(7016, QualityTier::PrintQuality), 0.5);
    assert_relative_eq!(tier_scale(7016, QualityTier::Balanced), 0.4);
}

#[test]
fn test_tier_parsing_and_quality() {
    assert_eq!("print".parse::<QualityTier>().unwrap(), QualityTier::PrintQuality);
    assert_eq!("EMAIL_FRIENDLY".parse::<QualityTier>().unwrap(), QualityTier::EmailFriendly);
    assert!(matches!(
        "huge".parse::<QualityTier>(),
        Err(PagescanError::UnknownQualityTier(_))
    ));
    assert!(QualityTier::EmailFriendly.jpeg_quality() < QualityTier::PrintQuality.jpeg_quality());
}
