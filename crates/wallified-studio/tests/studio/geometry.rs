use proptest::prelude::*;
use wallified_studio::paper::{catalog, ISO_RATIO};
use wallified_studio::preview::cell_slot_ratios;
use wallified_studio::{auto_fit_scale, slot_aspect_ratio, LayoutMode};

use crate::support::studio_with;

#[test]
fn test_combined_slot_table() {
    let r = ISO_RATIO;
    let combined = LayoutMode::Combined;

    let two: Vec<f64> = (0..2).map(|i| slot_aspect_ratio(r, 2, i, combined)).collect();
    assert_eq!(two[0], two[1]);
    assert_eq!(two[0], 2.0 * r);

    let three: Vec<f64> = (0..3).map(|i| slot_aspect_ratio(r, 3, i, combined)).collect();
    assert_eq!(three[0], 2.0 * three[1]);
    assert_eq!(three[0], 2.0 * three[2]);

    for i in 0..4 {
        assert_eq!(slot_aspect_ratio(r, 4, i, combined), r);
    }
    assert_eq!(slot_aspect_ratio(r, 1, 0, combined), r);
}

#[test]
fn test_preview_cells_match_fit_slots() {
    for count in 1..=4 {
        let sizes = vec![(1600, 1200); count];
        let (mut studio, _) = studio_with(&sizes);
        for (drawn, fitted) in cell_slot_ratios(studio.state()) {
            assert!((drawn - fitted).abs() < 1e-9, "count {}", count);
        }
        studio.set_layout_mode(LayoutMode::Separate);
        for (drawn, fitted) in cell_slot_ratios(studio.state()) {
            assert!((drawn - fitted).abs() < 1e-9);
        }
    }
}

proptest! {
    #[test]
    fn prop_auto_fit_is_pure_and_positive(
        image_aspect in 0.05f64..20.0,
        slot_aspect in 0.05f64..20.0,
        borderless in any::<bool>(),
    ) {
        let first = auto_fit_scale(image_aspect, slot_aspect, borderless);
        let second = auto_fit_scale(image_aspect, slot_aspect, borderless);
        prop_assert_eq!(first, second);
        prop_assert!(first > 0.0);
    }

    #[test]
    fn prop_fit_depends_only_on_ratios(
        width in 1u32..6000,
        height in 1u32..6000,
        factor in 1u32..4,
    ) {
        let small = f64::from(width) / f64::from(height);
        let large = f64::from(width * factor) / f64::from(height * factor);
        let a = auto_fit_scale(small, ISO_RATIO, false);
        let b = auto_fit_scale(large, ISO_RATIO, false);
        prop_assert!((a - b).abs() < 1e-12);
    }

    #[test]
    fn prop_borderless_round_trip_restores_scale(
        width in 100u32..6000,
        height in 100u32..6000,
        paper_index in 0usize..3,
    ) {
        let (mut studio, ids) = studio_with(&[(width, height)]);
        studio.set_paper_size(catalog()[paper_index].id);
        let before = studio.state().image(ids[0]).unwrap().transform.scale;

        studio.set_borderless(true);
        let borderless = studio.state().image(ids[0]).unwrap().transform.scale;
        prop_assert!(borderless >= before);

        studio.set_borderless(false);
        let after = studio.state().image(ids[0]).unwrap().transform.scale;
        prop_assert!((after - before).abs() < 1e-12);
    }
}
