#[allow(dead_code)]
mod common;

use idiff_core::image_io::{load_image, load_images};
use idiff_core::IdiffError;

use common::{gradient, write_png};

#[test]
fn test_load_png() {
    let dir = tempfile::tempdir().unwrap();
    let expected = gradient(12, 7);
    let path = write_png(dir.path(), "gradient.png", &expected);

    let loaded = load_image(&path).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (12, 7));
    assert_eq!(loaded.rgba(), &expected);
    assert_eq!(loaded.path(), path.as_path());
    assert_eq!(loaded.display_name(), "gradient.png");
}

#[test]
fn test_misnamed_file_is_decoded_from_content() {
    let dir = tempfile::tempdir().unwrap();
    let expected = gradient(5, 5);
    let png = write_png(dir.path(), "real.png", &expected);
    let misnamed = dir.path().join("actually_png.jpg");
    std::fs::copy(&png, &misnamed).unwrap();

    let loaded = load_image(&misnamed).unwrap();
    assert_eq!(loaded.rgba(), &expected);
}

#[test]
fn test_file_without_extension_is_decoded_from_content() {
    let dir = tempfile::tempdir().unwrap();
    let png = write_png(dir.path(), "real.png", &gradient(3, 4));
    let bare = dir.path().join("snapshot");
    std::fs::copy(&png, &bare).unwrap();

    let loaded = load_image(&bare).unwrap();
    assert_eq!((loaded.width(), loaded.height()), (3, 4));
}

#[test]
fn test_garbage_is_not_recognized() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.png");
    std::fs::write(&path, b"definitely not pixels").unwrap();

    match load_image(&path) {
        Err(IdiffError::ImageNotRecognized { path: reported, .. }) => assert_eq!(reported, path),
        other => panic!("expected ImageNotRecognized, got {other:?}"),
    }
}

#[test]
fn test_missing_file_is_not_recognized() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_image(&dir.path().join("missing.png"));
    assert!(matches!(result, Err(IdiffError::ImageNotRecognized { .. })));
}

#[test]
fn test_load_images_stops_at_first_failure() {
    let dir = tempfile::tempdir().unwrap();
    let good = write_png(dir.path(), "good.png", &gradient(2, 2));
    let bad = dir.path().join("bad.png");
    std::fs::write(&bad, b"xx").unwrap();

    let all = load_images(&[good.clone(), good.clone()]).unwrap();
    assert_eq!(all.len(), 2);

    match load_images(&[good.clone(), bad.clone(), good]) {
        Err(IdiffError::ImageNotRecognized { path, .. }) => assert_eq!(path, bad),
        other => panic!("expected failure on the bad file, got {:?}", other.map(|v| v.len())),
    }
}
