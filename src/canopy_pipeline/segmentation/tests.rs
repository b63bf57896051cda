use crate::canopy_pipeline::common::error::CanopyError;
use crate::canopy_pipeline::decode::PlantImage;
use crate::canopy_pipeline::segmentation::{ColorRange, Hsv, rgb_to_hsv, segment};

/// RGB pixel that converts to HSV (60, 99, 100): mid green inside the
/// default range.
const MID_GREEN: [u8; 3] = [61, 100, 61];

#[test]
fn test_rgb_to_hsv_primaries() {
    assert_eq!(rgb_to_hsv([255, 0, 0]), Hsv::new(0, 255, 255));
    assert_eq!(rgb_to_hsv([0, 255, 0]), Hsv::new(60, 255, 255));
    assert_eq!(rgb_to_hsv([0, 0, 255]), Hsv::new(120, 255, 255));
}

#[test]
fn test_rgb_to_hsv_greys_have_no_hue() {
    assert_eq!(rgb_to_hsv([0, 0, 0]), Hsv::new(0, 0, 0));
    assert_eq!(rgb_to_hsv([255, 255, 255]), Hsv::new(0, 0, 255));
    assert_eq!(rgb_to_hsv([128, 128, 128]), Hsv::new(0, 0, 128));
}

#[test]
fn test_rgb_to_hsv_mid_green() {
    assert_eq!(rgb_to_hsv(MID_GREEN), Hsv::new(60, 99, 100));
}

#[test]
fn test_rgb_to_hsv_wraps_negative_hue() {
    // Red-dominant with more blue than green lands just below a full turn.
    assert_eq!(rgb_to_hsv([255, 0, 51]), Hsv::new(174, 255, 255));
}

#[test]
fn test_rgb_to_hsv_fixed_point_upper_hue_edge() {
    // Exact float math gives hue 86 here; the fixed-point tables give 85.
    let hsv = rgb_to_hsv([0, 87, 74]);
    assert_eq!(hsv, Hsv::new(85, 255, 87));
    assert!(ColorRange::default().contains(hsv));
}

#[test]
fn test_rgb_to_hsv_fixed_point_lower_hue_edge() {
    let outside = rgb_to_hsv([96, 113, 0]);
    assert_eq!(outside, Hsv::new(34, 255, 113));
    assert!(!ColorRange::default().contains(outside));

    let inside = rgb_to_hsv([108, 127, 0]);
    assert_eq!(inside, Hsv::new(35, 255, 127));
    assert!(ColorRange::default().contains(inside));
}

#[test]
fn test_green_edge_pixels_in_mask() {
    let data = [[0, 87, 74], [96, 113, 0], [108, 127, 0]].concat();
    let image = PlantImage::from_rgb(3, 1, data);
    let mask = segment(&image, &ColorRange::default()).unwrap();

    assert_eq!(mask.data, [true, false, true]);
}

#[test]
fn test_default_range_is_green() {
    let range = ColorRange::default();
    assert_eq!(range.lower, Hsv::new(35, 50, 50));
    assert_eq!(range.upper, Hsv::new(85, 255, 255));
}

#[test]
fn test_range_bounds_are_inclusive() {
    let range = ColorRange::default();
    assert!(range.contains(Hsv::new(35, 50, 50)));
    assert!(range.contains(Hsv::new(85, 255, 255)));
    assert!(!range.contains(Hsv::new(34, 100, 100)));
    assert!(!range.contains(Hsv::new(86, 100, 100)));
    assert!(!range.contains(Hsv::new(60, 49, 100)));
}

#[test]
fn test_mask_matches_image_dimensions() {
    let image = PlantImage::filled(7, 3, MID_GREEN);
    let mask = segment(&image, &ColorRange::default()).unwrap();

    assert_eq!(mask.width, 7);
    assert_eq!(mask.height, 3);
    assert_eq!(mask.len(), 21);
}

#[test]
fn test_all_black_image_selects_nothing() {
    let image = PlantImage::filled(16, 16, [0, 0, 0]);
    let mask = segment(&image, &ColorRange::default()).unwrap();

    assert_eq!(mask.count_set(), 0);
}

#[test]
fn test_fully_green_image_selects_everything() {
    let image = PlantImage::filled(10, 10, MID_GREEN);
    let mask = segment(&image, &ColorRange::default()).unwrap();

    assert_eq!(mask.count_set(), 100);
}

#[test]
fn test_mixed_image_selects_green_pixels_only() {
    // Row 0: green, red; row 1: black, green.
    let data = [MID_GREEN, [255, 0, 0], [0, 0, 0], MID_GREEN].concat();
    let image = PlantImage::from_rgb(2, 2, data);
    let mask = segment(&image, &ColorRange::default()).unwrap();

    assert_eq!(mask.get(0, 0), Some(true));
    assert_eq!(mask.get(1, 0), Some(false));
    assert_eq!(mask.get(0, 1), Some(false));
    assert_eq!(mask.get(1, 1), Some(true));
    assert_eq!(mask.get(2, 0), None);
}

#[test]
fn test_segment_is_deterministic() {
    let data: Vec<u8> = (0..30u8 * 3).map(|i| i.wrapping_mul(37)).collect();
    let image = PlantImage::from_rgb(10, 3, data);
    let range = ColorRange::default();

    let first = segment(&image, &range).unwrap();
    let second = segment(&image, &range).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_inverted_range_is_rejected() {
    let range = ColorRange {
        lower: Hsv::new(90, 0, 0),
        upper: Hsv::new(10, 255, 255),
    };
    let image = PlantImage::filled(2, 2, MID_GREEN);

    let result = segment(&image, &range);
    assert!(matches!(result, Err(CanopyError::InvalidRange(_))));
    assert!(ColorRange::new(range.lower, range.upper).is_err());
}

#[test]
fn test_zero_area_image_is_rejected() {
    let image = PlantImage::from_rgb(0, 5, Vec::new());
    let result = segment(&image, &ColorRange::default());

    assert!(matches!(result, Err(CanopyError::InvalidInput { width: 0, .. })));
}

#[test]
fn test_wrong_channel_count_is_rejected() {
    let image = PlantImage {
        width: 2,
        height: 2,
        channels: 4,
        data: vec![0; 16],
        encoded_len: None,
    };
    let result = segment(&image, &ColorRange::default());

    assert!(matches!(result, Err(CanopyError::InvalidInput { channels: 4, .. })));
}

#[test]
fn test_truncated_buffer_is_rejected() {
    let image = PlantImage::from_rgb(4, 4, vec![0; 10]);
    let result = segment(&image, &ColorRange::default());

    assert!(matches!(result, Err(CanopyError::InvalidInput { samples: 10, .. })));
}

#[test]
fn test_overflowing_dimensions_are_invalid_input() {
    let image = PlantImage {
        width: usize::MAX,
        height: 2,
        channels: 3,
        data: Vec::new(),
        encoded_len: None,
    };

    assert_eq!(image.pixel_count(), None);
    assert!(matches!(
        segment(&image, &ColorRange::default()),
        Err(CanopyError::InvalidInput { width: usize::MAX, .. })
    ));
    assert!(PlantImage::filled(usize::MAX, 2, MID_GREEN).validate().is_err());
}
