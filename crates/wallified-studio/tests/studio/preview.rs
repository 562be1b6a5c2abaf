use wallified_studio::preview::{
    css_filter, LAB_COMBINED_HEIGHT_VH, LAB_SEPARATE_HEIGHT_VH, ROOM_BASE_HEIGHT_VH,
};
use wallified_studio::{
    AdjustmentsPatch, LayoutMode, OverlayPatch, PaperSizeId, PreviewMode, TextPosition,
    TransformPatch,
};

use crate::support::studio_with;

#[test]
fn test_combined_sheet_grid() {
    let (studio, ids) = studio_with(&[(3000, 2000); 3]);
    let sheets = studio.preview(PreviewMode::Lab);
    assert_eq!(sheets.len(), 1);

    let sheet = &sheets[0];
    assert_eq!((sheet.grid.columns, sheet.grid.rows), (2, 2));
    assert_eq!(sheet.cells.len(), 3);
    assert_eq!(sheet.cells[0].column_span, 2);
    assert_eq!(sheet.cells[0].image_id, ids[0]);
    assert_eq!(sheet.height_vh, LAB_COMBINED_HEIGHT_VH);
    assert_eq!(sheet.padding_rem, 3.0);
}

#[test]
fn test_separate_sheets_each_carry_overlay() {
    let (mut studio, _) = studio_with(&[(3000, 2000); 3]);
    studio.set_layout_mode(LayoutMode::Separate);
    studio
        .set_overlay_text(OverlayPatch {
            content: Some("Goa, 2026".to_string()),
            position: Some(TextPosition { x: 25.0, y: 90.0 }),
            ..OverlayPatch::default()
        })
        .unwrap();

    let sheets = studio.preview(PreviewMode::Lab);
    assert_eq!(sheets.len(), 3);
    for sheet in &sheets {
        assert_eq!(sheet.cells.len(), 1);
        assert_eq!(sheet.height_vh, LAB_SEPARATE_HEIGHT_VH);
        let overlay = sheet.overlay.as_ref().unwrap();
        assert_eq!(overlay.content, "Goa, 2026");
        assert_eq!((overlay.x, overlay.y), (25.0, 90.0));
    }
}

#[test]
fn test_whitespace_caption_is_hidden() {
    let (mut studio, _) = studio_with(&[(3000, 2000)]);
    studio.set_overlay_text(OverlayPatch::content("   ")).unwrap();
    assert!(studio.preview(PreviewMode::Lab)[0].overlay.is_none());
}

#[test]
fn test_room_view_scales_with_paper() {
    let (mut studio, _) = studio_with(&[(3000, 2000)]);
    studio.set_paper_size(PaperSizeId::A5);
    studio.set_borderless(true);

    let sheets = studio.preview(PreviewMode::Room);
    let sheet = &sheets[0];
    assert!((sheet.height_vh - ROOM_BASE_HEIGHT_VH * 0.8).abs() < 1e-9);
    assert_eq!(sheet.padding_rem, 0.0);
}

#[test]
fn test_transform_and_filter_reach_the_renderer() {
    let (mut studio, ids) = studio_with(&[(3000, 2000)]);
    studio
        .set_transform(
            ids[0],
            TransformPatch {
                scale: Some(1.5),
                rotate: Some(10.0),
                x: Some(-20.0),
                y: Some(5.0),
            },
        )
        .unwrap();
    studio.set_adjustments(AdjustmentsPatch {
        saturation: Some(0.0),
        ..AdjustmentsPatch::default()
    });

    let sheets = studio.preview(PreviewMode::Lab);
    let sheet = &sheets[0];
    assert_eq!(
        sheet.cells[0].css_transform,
        "translate(-20px, 5px) rotate(10deg) scale(1.5)"
    );
    assert_eq!(sheet.filter, css_filter(&studio.state().adjustments));
    assert!(sheet.filter.contains("saturate(0%)"));
}
