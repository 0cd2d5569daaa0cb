use std::path::Path;

use plastiscan_core::capture::FrameSource;
use plastiscan_core::error::ScanError;
use plastiscan_core::sources::ImageFolderSource;

/// Write a small solid-color PNG.
fn write_png(path: &Path, luma: u8) {
    let img = image::RgbImage::from_pixel(16, 16, image::Rgb([luma, luma, luma]));
    img.save(path).unwrap();
}

#[test]
fn test_reads_frames_in_sorted_order() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("b.png"), 50);
    write_png(&dir.path().join("a.png"), 10);
    write_png(&dir.path().join("c.png"), 90);

    let mut source = ImageFolderSource::new(dir.path());
    source.open().unwrap();

    let mut lumas = Vec::new();
    while let Some(frame) = source.read().unwrap() {
        assert_eq!((frame.width(), frame.height()), (16, 16));
        lumas.push(frame.data[[0, 0, 0]]);
    }
    source.release();

    assert_eq!(lumas, vec![10, 50, 90]);
}

#[test]
fn test_end_of_stream_is_clean() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("only.png"), 128);

    let mut source = ImageFolderSource::new(dir.path());
    source.open().unwrap();
    assert!(source.read().unwrap().is_some());
    assert!(source.read().unwrap().is_none());
    assert!(source.read().unwrap().is_none());
}

#[test]
fn test_looping_source_wraps_around() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("a.png"), 10);
    write_png(&dir.path().join("b.png"), 50);

    let mut source = ImageFolderSource::new(dir.path());
    source.loop_frames = true;
    source.open().unwrap();

    let mut lumas = Vec::new();
    for _ in 0..5 {
        let frame = source.read().unwrap().expect("looping source never ends");
        lumas.push(frame.data[[0, 0, 0]]);
    }
    assert_eq!(lumas, vec![10, 50, 10, 50, 10]);
}

#[test]
fn test_empty_folder_fails_open() {
    let dir = tempfile::tempdir().unwrap();
    let mut source = ImageFolderSource::new(dir.path());
    let err = source.open().unwrap_err();
    assert!(matches!(err, ScanError::DeviceUnavailable(_)));
}

#[test]
fn test_missing_folder_fails_open() {
    let mut source = ImageFolderSource::new(Path::new("/nonexistent/frames"));
    assert!(source.open().is_err());
}

#[test]
fn test_non_image_files_are_skipped() {
    let dir = tempfile::tempdir().unwrap();
    write_png(&dir.path().join("frame.png"), 42);
    std::fs::write(dir.path().join("notes.txt"), "not a frame").unwrap();

    let mut source = ImageFolderSource::new(dir.path());
    source.open().unwrap();
    assert!(source.read().unwrap().is_some());
    assert!(source.read().unwrap().is_none());
}
