use wallified_studio::{
    decode_batch, decode_file, PaperSizeId, Studio, StudioError, UploadedFile,
};

use crate::support::{decoded, noisy_png_bytes, png_file, studio_with};

#[test]
fn test_decode_reads_dimensions_and_builds_data_url() {
    let image = decode_file(&png_file("wide.png", 64, 16)).unwrap();
    assert_eq!((image.resolution.width, image.resolution.height), (64, 16));
    assert_eq!(image.mime_type, "image/png");
    assert!(image
        .source
        .as_str()
        .starts_with("data:image/png;base64,"));
}

#[test]
fn test_truncated_body_is_a_decode_failure() {
    let mut bytes = noisy_png_bytes(64, 64);
    bytes.truncate(bytes.len() / 2);

    let result = decode_file(&UploadedFile::new("cut.png", bytes));
    assert!(matches!(
        result,
        Err(StudioError::DecodeFailure { ref name, .. }) if name == "cut.png"
    ));
}

#[tokio::test]
async fn test_batch_keeps_selection_order_and_drops_failures() {
    let files = vec![
        png_file("first.png", 40, 30),
        UploadedFile::new("broken.png", vec![0x89, b'P', b'N', b'G', 0, 0]),
        png_file("second.png", 20, 50),
        png_file("third.png", 10, 10),
    ];
    let report = decode_batch(files).await;

    let names: Vec<&str> = report.decoded.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["first.png", "second.png", "third.png"]);
    assert_eq!(report.failures.len(), 1);
    assert!(matches!(
        &report.failures[0],
        StudioError::DecodeFailure { name, .. } if name == "broken.png"
    ));
}

#[tokio::test]
async fn test_import_adds_in_selection_order() {
    let mut studio = Studio::default();
    let report = studio
        .import(vec![
            png_file("a.png", 30, 40),
            UploadedFile::new("notes.txt", b"hello".to_vec()),
            png_file("b.png", 60, 40),
        ])
        .await
        .unwrap();

    assert_eq!(report.added.len(), 2);
    assert_eq!(report.notices.len(), 1);
    let names: Vec<&str> = studio.state().images.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["a.png", "b.png"]);
    // Every new photo is fitted before the user sees it
    for image in &studio.state().images {
        assert!(image.transform.scale > 0.0 && image.transform.scale <= 1.0);
    }
}

#[tokio::test]
async fn test_import_caps_batch_to_remaining_slots() {
    let (mut studio, _) = studio_with(&[(3000, 2000), (3000, 2000)]);
    let report = studio
        .import(vec![
            png_file("1.png", 8, 8),
            png_file("2.png", 8, 8),
            png_file("3.png", 8, 8),
        ])
        .await
        .unwrap();

    assert_eq!(report.added.len(), 2);
    assert_eq!(studio.state().images.len(), 4);
    assert!(report
        .notices
        .contains(&StudioError::CapacityExceeded { max: 4, dropped: 1 }));
}

#[test]
fn test_fifth_image_is_refused() {
    let (mut studio, _) = studio_with(&[(3000, 2000); 4]);
    let before = studio.state().clone();
    let history = studio.history_len();

    let result = studio.add_images(vec![decoded(3000, 2000)]);
    assert_eq!(
        result.unwrap_err(),
        StudioError::CapacityExceeded { max: 4, dropped: 1 }
    );
    assert_eq!(studio.state(), &before);
    assert_eq!(studio.history_len(), history);
}

#[tokio::test]
async fn test_fifth_import_is_refused_before_decoding() {
    let (mut studio, _) = studio_with(&[(3000, 2000); 4]);
    let result = studio.import(vec![png_file("extra.png", 8, 8)]).await;
    assert!(matches!(result, Err(StudioError::CapacityExceeded { .. })));
    assert_eq!(studio.state().images.len(), 4);
}

#[test]
fn test_sharp_photo_gets_no_advisory() {
    let mut studio = Studio::default();
    let report = studio.add_images(vec![decoded(3000, 2000)]).unwrap();
    assert!(report.advisories.is_empty());
    assert!(studio.resolution_advisories().is_empty());
}

#[test]
fn test_small_photo_advisory_and_one_click_switch() {
    let mut studio = Studio::default();
    let report = studio.add_images(vec![decoded(1000, 1400)]).unwrap();

    assert_eq!(report.advisories.len(), 1);
    let advisory = report.advisories[0];
    assert_eq!(advisory.image_id, report.added[0]);
    assert_eq!(advisory.current, PaperSizeId::A4);
    assert_eq!(advisory.suggested, PaperSizeId::A6);
    assert!(advisory.message().contains("1000px"));

    // Still advisory after the switch: nothing fits 1000px
    let remaining = studio.apply_advisory(&advisory);
    assert_eq!(studio.state().paper_size, PaperSizeId::A6);
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].suggested, PaperSizeId::A6);
}

#[test]
fn test_paper_change_reissues_advisories() {
    let (mut studio, _) = studio_with(&[(2000, 3000), (3200, 2400)]);
    assert_eq!(studio.resolution_advisories().len(), 1);

    let advisories = studio.set_paper_size(PaperSizeId::A5);
    assert!(advisories.is_empty());

    let advisories = studio.set_paper_size(PaperSizeId::A4);
    assert_eq!(advisories.len(), 1);
    assert_eq!(advisories[0].suggested, PaperSizeId::A5);
    studio.apply_advisory(&advisories[0]);
    assert_eq!(studio.state().paper_size, PaperSizeId::A5);
}
