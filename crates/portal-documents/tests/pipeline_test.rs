//! Document pipeline integration tests.
//!
//! Run with: `cargo test -p portal-documents --test pipeline_test`

mod helpers;

use base64::Engine as _;
use helpers::{fixtures, jpeg_file, pdf_file, profile_coordinator, server_values, MAX_UPLOAD_BYTES};
use portal_core::ErrorMetadata;
use portal_documents::codec::decode_to_bytes;
use portal_documents::{LocalFile, SelectionOutcome, SlotError, SlotKind};

#[tokio::test]
async fn test_happy_path_shop_photo() {
    let (mut coordinator, registry) = profile_coordinator();

    let outcome = coordinator
        .select_file("shopPhoto", &jpeg_file("shop.jpg", 500 * 1024))
        .await
        .unwrap();
    assert_eq!(outcome, SelectionOutcome::Applied);

    let value = coordinator.encoded_value("shopPhoto").unwrap();
    assert!(value.starts_with("data:image/jpeg;base64,"));
    let handle = coordinator.display_handle("shopPhoto").unwrap();
    assert_eq!(registry.resolve(handle).unwrap().data.len(), 500 * 1024);
    assert_eq!(
        coordinator.snapshot()["shopPhoto"].as_deref(),
        Some(value)
    );
}

#[tokio::test]
async fn test_oversize_pdf_leaves_snapshot_unchanged() {
    let (mut coordinator, _registry) = profile_coordinator();
    let original = format!(
        "data:application/pdf;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(fixtures::pdf_of_size(64))
    );
    coordinator.initialize(&server_values(&[("gstCertificate", Some(original.clone()))]));
    let before = coordinator.snapshot();

    let err = coordinator
        .select_file("gstCertificate", &pdf_file("gst.pdf", 3 * 1024 * 1024))
        .await
        .unwrap_err();

    assert!(matches!(err, SlotError::TooLarge { .. }));
    assert_eq!(coordinator.snapshot(), before);
    assert_eq!(
        coordinator.error("gstCertificate").map(|e| e.client_message()),
        Some("File size exceeds 2MB limit.".to_string())
    );
}

#[tokio::test]
async fn test_size_boundary_through_coordinator() {
    let (mut coordinator, _registry) = profile_coordinator();
    let exact = pdf_file("exact.pdf", MAX_UPLOAD_BYTES as usize);
    let over = pdf_file("over.pdf", MAX_UPLOAD_BYTES as usize + 1);

    assert!(coordinator.select_file("idProofDoc", &exact).await.is_ok());
    assert!(matches!(
        coordinator.select_file("idProofDoc", &over).await,
        Err(SlotError::TooLarge { .. })
    ));
}

#[tokio::test]
async fn test_cancel_edit_restores_initial_state() {
    let (mut coordinator, registry) = profile_coordinator();
    let original = server_values(&[
        (
            "userPhoto",
            Some(base64::engine::general_purpose::STANDARD.encode(fixtures::minimal_png())),
        ),
        ("bankDetailsDoc", None),
    ]);
    coordinator.initialize(&original);
    let initial = coordinator.snapshot();

    coordinator
        .select_file("userPhoto", &jpeg_file("new.jpg", 1024))
        .await
        .unwrap();
    coordinator
        .select_file("bankDetailsDoc", &pdf_file("bank.pdf", 256))
        .await
        .unwrap();
    assert_eq!(registry.live_count(), 2);

    coordinator.revert_all(&original);

    assert_eq!(coordinator.snapshot(), initial);
    assert!(coordinator.display_handle("bankDetailsDoc").is_none());
    let handle = coordinator.display_handle("userPhoto").unwrap();
    assert_eq!(registry.resolve(handle).unwrap().mime_type, "image/png");
    assert_eq!(registry.live_count(), 1);
}

#[tokio::test]
async fn test_legacy_payloads_do_not_block_siblings() {
    let (mut coordinator, registry) = profile_coordinator();
    coordinator.initialize(&server_values(&[
        ("companyRegistrationDoc", Some("this is ~not~ base64".to_string())),
        (
            "shopPhoto",
            Some(base64::engine::general_purpose::STANDARD.encode(fixtures::minimal_png())),
        ),
    ]));

    assert!(coordinator.display_handle("companyRegistrationDoc").is_none());
    assert!(coordinator.error("companyRegistrationDoc").unwrap().is_warning());
    assert!(coordinator.display_handle("shopPhoto").is_some());
    assert_eq!(registry.live_count(), 1);

    // The user can still replace the broken document.
    coordinator
        .select_file("companyRegistrationDoc", &pdf_file("reg.pdf", 128))
        .await
        .unwrap();
    assert!(coordinator.error("companyRegistrationDoc").is_none());
    assert_eq!(registry.live_count(), 2);
}

#[tokio::test]
async fn test_local_file_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.png");
    std::fs::write(&path, fixtures::minimal_png()).unwrap();

    let (mut coordinator, _registry) = profile_coordinator();
    let file = LocalFile::open(&path).await.unwrap();
    coordinator.select_file("userPhoto", &file).await.unwrap();

    let value = coordinator.encoded_value("userPhoto").unwrap();
    let (mime, data) = decode_to_bytes(value, SlotKind::Image).unwrap();
    assert_eq!(mime, "image/png");
    assert_eq!(data.as_ref(), fixtures::minimal_png().as_slice());
}

#[tokio::test]
async fn test_teardown_and_drop_release_everything() {
    let (mut coordinator, registry) = profile_coordinator();
    for slot in ["userPhoto", "shopPhoto"] {
        coordinator
            .select_file(slot, &jpeg_file("p.jpg", 64))
            .await
            .unwrap();
    }
    coordinator
        .select_file("gstCertificate", &pdf_file("g.pdf", 64))
        .await
        .unwrap();
    assert_eq!(registry.live_count(), 3);

    coordinator.teardown();
    assert_eq!(registry.live_count(), 0);
    assert!(coordinator.snapshot()["gstCertificate"].is_some());

    coordinator
        .select_file("shopPhoto", &jpeg_file("p.jpg", 64))
        .await
        .unwrap();
    drop(coordinator);
    assert_eq!(registry.live_count(), 0);
}
