//! Request-file handling through the public batch surface.

use std::io::Write as _;

use nutrigraph::{BatchOptions, NutrigraphError, Theme, parse_requests, run_batch};

#[test]
fn request_file_round_trips_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("dairy");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        "# dairy products\n\n170567\n28\n1 slice (28g)\n\n173410\n227\nOne cup, diced\n"
    )
    .unwrap();

    let source = std::fs::read_to_string(&path).unwrap();
    let requests = parse_requests(&source).unwrap();
    assert_eq!(requests.len(), 2);
    assert_eq!(requests[0].identifier, 170567);
    assert_eq!(requests[1].description, "One cup, diced");
}

#[test]
fn batch_aborts_on_a_malformed_request_list_before_any_rendering() {
    let dir = tempfile::tempdir().unwrap();
    let requests = dir.path().join("requests");
    std::fs::write(&requests, "not-an-id\n100\nOne cup\n").unwrap();

    // Dataset and font paths are never opened: the parse fault comes first
    // and discards the whole batch.
    let options = BatchOptions {
        requests,
        dataset: dir.path().join("missing.csv"),
        out_dir: dir.path().to_path_buf(),
        font: dir.path().join("missing.ttf"),
        theme: Theme::default(),
    };

    let err = run_batch(&options).unwrap_err();
    assert!(matches!(err, NutrigraphError::RequestParse(_)));
}

#[test]
fn batch_aborts_on_a_truncated_request_list() {
    let dir = tempfile::tempdir().unwrap();
    let requests = dir.path().join("requests");
    std::fs::write(&requests, "170567\n28\nOne slice\n173410\n227\n").unwrap();

    let options = BatchOptions {
        requests,
        dataset: dir.path().join("missing.csv"),
        out_dir: dir.path().to_path_buf(),
        font: dir.path().join("missing.ttf"),
        theme: Theme::default(),
    };

    let err = run_batch(&options).unwrap_err();
    assert!(matches!(err, NutrigraphError::UnexpectedEof(_)));
}
