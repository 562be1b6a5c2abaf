use wallified_settings::Config;
use wallified_studio::{
    AdjustmentsPatch, LayoutMode, OverlayPatch, PaperSizeId, Studio, TransformPatch,
};

use crate::support::{decoded, studio_with};

#[test]
fn test_fresh_studio_has_nothing_to_undo() {
    let mut studio = Studio::default();
    assert_eq!(studio.history_len(), 1);
    assert_eq!(studio.history_cursor(), Some(0));
    assert!(!studio.can_undo());
    assert!(!studio.undo());
    assert!(!studio.redo());
}

#[test]
fn test_undo_and_redo_restore_exact_states() {
    let (mut studio, ids) = studio_with(&[(3000, 2000), (1200, 1800)]);
    let steps: Vec<Box<dyn Fn(&mut Studio)>> = vec![
        Box::new(|s: &mut Studio| s.set_borderless(true)),
        Box::new(|s: &mut Studio| s.set_layout_mode(LayoutMode::Separate)),
        Box::new(|s: &mut Studio| {
            s.set_paper_size(PaperSizeId::A6);
        }),
        Box::new(move |s: &mut Studio| s.remove_image(ids[1]).unwrap()),
        Box::new(|s: &mut Studio| s.reset_all()),
        Box::new(|s: &mut Studio| {
            s.add_images(vec![decoded(800, 800)]).unwrap();
        }),
    ];

    for step in steps {
        let before = studio.state().clone();
        step(&mut studio);
        let after = studio.state().clone();

        assert!(studio.undo());
        assert_eq!(studio.state(), &before);
        assert!(studio.redo());
        assert_eq!(studio.state(), &after);
    }
}

#[test]
fn test_history_keeps_most_recent_thirty() {
    let mut studio = Studio::default();
    for i in 0..40 {
        studio.set_borderless(i % 2 == 0);
    }
    assert_eq!(studio.history_len(), 30);

    let mut undos = 0;
    while studio.undo() {
        undos += 1;
    }
    assert_eq!(undos, 29);
    // The oldest reachable snapshot is the 11th operation's result
    assert!(studio.state().borderless);
}

#[test]
fn test_history_depth_follows_config() {
    let mut config = Config::default();
    config.studio.history_depth = 5;
    let mut studio = Studio::new(&config);
    for _ in 0..12 {
        studio.reset_all();
    }
    assert_eq!(studio.history_len(), 5);
}

#[test]
fn test_drag_gesture_is_one_snapshot() {
    let (mut studio, ids) = studio_with(&[(2000, 3000)]);
    let start = studio.state().clone();
    let len = studio.history_len();

    for _ in 0..25 {
        studio.nudge(ids[0], 2.0, -1.0).unwrap();
    }
    studio.set_transform(ids[0], TransformPatch::rotate(30.0)).unwrap();
    assert_eq!(studio.history_len(), len);

    assert!(studio.commit_gesture());
    assert!(!studio.commit_gesture());
    assert_eq!(studio.history_len(), len + 1);

    let moved = studio.state().image(ids[0]).unwrap().transform;
    assert_eq!((moved.x, moved.y, moved.rotate), (50.0, -25.0, 30.0));

    assert!(studio.undo());
    assert_eq!(studio.state(), &start);
}

#[test]
fn test_slider_scrub_then_structural_edit() {
    let (mut studio, _) = studio_with(&[(2400, 3400)]);
    let len = studio.history_len();

    for value in [110.0, 130.0, 150.0] {
        studio.set_adjustments(AdjustmentsPatch {
            brightness: Some(value),
            ..AdjustmentsPatch::default()
        });
    }
    studio.set_borderless(true);
    // The pending scrub is committed before the structural edit
    assert_eq!(studio.history_len(), len + 2);

    studio.undo();
    assert_eq!(studio.state().adjustments.brightness, 150.0);
    assert!(!studio.state().borderless);
    studio.undo();
    assert_eq!(studio.state().adjustments.brightness, 100.0);
}

#[test]
fn test_undo_rolls_back_uncommitted_gesture() {
    let (mut studio, _) = studio_with(&[(2400, 3400)]);
    let committed = studio.state().clone();
    studio
        .set_overlay_text(OverlayPatch::content("Summer 2026"))
        .unwrap();
    assert!(studio.can_undo());

    assert!(studio.undo());
    assert_eq!(studio.state(), &committed);
}

#[test]
fn test_redo_brings_back_uncommitted_gesture() {
    let (mut studio, ids) = studio_with(&[(20, 30)]);
    studio
        .set_transform(ids[0], TransformPatch::rotate(45.0))
        .unwrap();
    let rotated = studio.state().clone();

    assert!(studio.undo());
    assert_eq!(studio.state().image(ids[0]).unwrap().transform.rotate, 0.0);
    assert!(studio.can_redo());

    assert!(studio.redo());
    assert_eq!(studio.state(), &rotated);
}

#[test]
fn test_gesture_that_returns_to_start_is_not_undoable() {
    let (mut studio, ids) = studio_with(&[(2400, 3400)]);
    let len = studio.history_len();
    studio.nudge(ids[0], 5.0, 0.0).unwrap();
    studio.nudge(ids[0], -5.0, 0.0).unwrap();

    assert!(studio.can_undo());
    assert!(!studio.commit_gesture());
    assert_eq!(studio.history_len(), len);
}

#[test]
fn test_new_edit_discards_redo_tail() {
    let mut studio = Studio::default();
    studio.set_borderless(true);
    studio.set_layout_mode(LayoutMode::Separate);
    studio.undo();
    studio.undo();
    assert!(studio.can_redo());

    studio.set_paper_size(PaperSizeId::A5);
    assert!(!studio.can_redo());
    assert_eq!(studio.history_len(), 2);
}

#[test]
fn test_reset_all_is_one_atomic_step() {
    let (mut studio, ids) = studio_with(&[(3000, 2000)]);
    let fitted = studio.state().image(ids[0]).unwrap().transform;

    studio.set_transform(ids[0], TransformPatch::position(40.0, 12.0)).unwrap();
    studio.set_adjustments(AdjustmentsPatch {
        contrast: Some(160.0),
        ..AdjustmentsPatch::default()
    });
    studio.set_overlay_text(OverlayPatch::content("Hello")).unwrap();
    studio.commit_gesture();
    let edited = studio.state().clone();

    studio.reset_all();
    let state = studio.state();
    assert_eq!(state.images[0].transform, fitted);
    assert!(state.adjustments.is_neutral());
    assert!(state.overlay.content.is_empty());

    studio.undo();
    assert_eq!(studio.state(), &edited);
}

#[test]
fn test_auto_fit_image_clears_manual_placement() {
    let (mut studio, ids) = studio_with(&[(3000, 2000), (2000, 3000)]);
    let fitted = studio.state().image(ids[1]).unwrap().transform;

    studio
        .set_transform(
            ids[1],
            TransformPatch {
                scale: Some(2.2),
                rotate: Some(-90.0),
                x: Some(5.0),
                y: Some(5.0),
            },
        )
        .unwrap();
    let len = studio.history_len();

    studio.auto_fit_image(ids[1]).unwrap();
    assert_eq!(studio.state().image(ids[1]).unwrap().transform, fitted);
    // gesture commit plus the refit
    assert_eq!(studio.history_len(), len + 2);
}
