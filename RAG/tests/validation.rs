use kb_assist::validation::MAX_IMAGE_SIZE;
use kb_assist::{check_upload, validate_upload, AssistError};

const MIB: u64 = 1024 * 1024;

#[test]
fn accepts_allowed_extensions_in_any_case() {
    for name in ["photo.PNG", "scan.jpg", "scan.JPEG", "receipt.Png", "a.b.jpeg"] {
        let check = validate_upload(name, 1024);
        assert!(check.valid, "{name} should be accepted");
        assert!(check.reason.is_empty());
    }
}

#[test]
fn rejects_other_extensions_with_allowed_types_in_reason() {
    let check = validate_upload("doc.pdf", 1024);
    assert!(!check.valid);
    assert!(check.reason.contains("jpg, jpeg, png"), "reason was: {}", check.reason);

    for name in ["receipt", "receipt.", "image.gif", "photo.png.exe", ".png"] {
        assert!(!validate_upload(name, 10).valid, "{name} should be rejected");
    }
}

#[test]
fn missing_extension_is_named_in_the_reason() {
    let check = validate_upload("receipt", 10);
    assert!(!check.valid);
    assert!(check.reason.contains("(none)"), "reason was: {}", check.reason);
    assert!(!check.reason.contains("''"), "reason was: {}", check.reason);

    let check = validate_upload("doc.pdf", 10);
    assert!(check.reason.contains("'pdf'"), "reason was: {}", check.reason);
}

#[test]
fn rejects_files_over_five_mib() {
    let check = validate_upload("big.jpg", 6 * MIB);
    assert!(!check.valid);
    assert!(check.reason.contains("size limit"), "reason was: {}", check.reason);
    assert!(check.reason.contains("5 MiB"), "reason was: {}", check.reason);
}

#[test]
fn size_limit_is_inclusive() {
    assert!(validate_upload("edge.png", MAX_IMAGE_SIZE).valid);
    assert!(!validate_upload("edge.png", MAX_IMAGE_SIZE + 1).valid);
    assert!(validate_upload("empty.png", 0).valid);
}

#[test]
fn extension_is_checked_before_size() {
    let err = check_upload("huge.pdf", 50 * MIB).unwrap_err();
    assert_eq!(
        err,
        AssistError::InvalidExtension {
            extension: "pdf".to_string()
        }
    );
    assert_eq!(err.code(), "INVALID_EXTENSION");

    let err = check_upload("huge.png", 50 * MIB).unwrap_err();
    assert_eq!(err.code(), "FILE_TOO_LARGE");
}

#[test]
fn valid_iff_extension_allowed_and_size_within_limit() {
    let names = ["a.jpg", "a.JPG", "a.jpeg", "a.png", "a.gif", "a.pdf", "a", "a.pngx"];
    let sizes = [0, 1, MAX_IMAGE_SIZE - 1, MAX_IMAGE_SIZE, MAX_IMAGE_SIZE + 1, 6 * MIB];

    for name in names {
        let ext_ok = matches!(
            name.rsplit_once('.').map(|(_, ext)| ext.to_lowercase()).as_deref(),
            Some("jpg") | Some("jpeg") | Some("png")
        );
        for size in sizes {
            let expected = ext_ok && size <= MAX_IMAGE_SIZE;
            assert_eq!(validate_upload(name, size).valid, expected, "{name} / {size}");
        }
    }
}
