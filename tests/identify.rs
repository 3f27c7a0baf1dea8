//! End-to-end checks against the public API.

use std::io::Write;
use std::sync::Arc;
use std::thread;

use filekind::features::{FeatureLayout, extract};
use filekind::labels;
use filekind::{Error, Session, SessionConfig, SessionState};
use proptest::prelude::*;

#[test]
fn test_png_prefix_end_to_end() {
    let session = Session::new().unwrap();
    let info = session.identify_bytes(&[0x89, 0x50, 0x4E]).unwrap();
    assert_eq!(info.label(), "png");
    assert_eq!(info.mime_type(), "image/png");
    assert!(!info.is_text());
    assert_eq!(info.extensions().first().map(String::as_str), Some("png"));
    session.release();
}

#[test]
fn test_ascii_file_is_text() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(b"Lorem ipsum dolor sit amet consectetur adipiscing elit")
        .unwrap();
    file.flush().unwrap();

    let session = Session::new().unwrap();
    let info = session.identify_path(file.path()).unwrap();
    assert!(info.is_text());
    assert!(info.extensions().iter().any(|e| e == "txt"));
    session.release();
}

#[test]
fn test_empty_input_has_a_label() {
    let session = Session::new().unwrap();
    assert_eq!(session.identify_bytes(&[]).unwrap().label(), labels::EMPTY);

    let file = tempfile::NamedTempFile::new().unwrap();
    assert_eq!(session.identify_path(file.path()).unwrap().label(), labels::EMPTY);
    session.release();
}

#[test]
fn test_every_model_label_is_registered() {
    let session = Session::new().unwrap();
    for label in session.model_labels().unwrap() {
        assert!(labels::lookup(&label).is_ok(), "{label}");
    }
    session.release();
}

#[test]
fn test_lifecycle() {
    let session = Session::new().unwrap();
    assert_eq!(session.state(), SessionState::Ready);
    session.release();
    session.release();
    assert!(matches!(session.identify_bytes(b"data"), Err(Error::SessionClosed)));
    assert!(matches!(session.identify_bytes(&[]), Err(Error::SessionClosed)));
}

#[test]
fn test_release_under_concurrent_load() {
    let session = Arc::new(Session::new().unwrap());
    let workers: Vec<_> = (0..8)
        .map(|i| {
            let session = Arc::clone(&session);
            thread::spawn(move || {
                let data = if i % 2 == 0 { &b"OggS\x00\x02"[..] } else { &b"plain words"[..] };
                loop {
                    match session.identify_bytes(data) {
                        Ok(_) => continue,
                        Err(Error::SessionClosed) => break,
                        Err(other) => panic!("unexpected error: {other}"),
                    }
                }
            })
        })
        .collect();

    thread::sleep(std::time::Duration::from_millis(25));
    session.release();
    for worker in workers {
        worker.join().unwrap();
    }
    assert_eq!(session.state(), SessionState::Released);
}

#[test]
fn test_config_from_yaml() {
    let config = SessionConfig::from_yaml_str("confidence_threshold: 0.75\n").unwrap();
    let session = Session::with_config(config).unwrap();
    assert_eq!(session.config().confidence_threshold, 0.75);
    assert_eq!(session.identify_bytes(b"%PDF-1.3\n").unwrap().label(), "pdf");
    session.release();
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn prop_identify_is_deterministic(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let session = Session::new().unwrap();
        let first = session.identify_bytes(&data).unwrap();
        let second = session.identify_bytes(&data).unwrap();
        prop_assert_eq!(first, second);
        session.release();
    }

    #[test]
    fn prop_feature_length_is_fixed(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        prop_assert_eq!(
            extract(&data, &FeatureLayout::DEFAULT).len(),
            FeatureLayout::DEFAULT.width()
        );
    }
}
