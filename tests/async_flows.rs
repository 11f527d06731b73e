//!
//! `async` 特性下的延迟执行流程
//!

use seal_messenger::prelude::*;
use std::time::{Duration, Instant};
use tempfile::tempdir;

fn user(busy_deferral_ms: u64) -> InteractionController {
    let mut config = MessengerConfig {
        crypto: CryptoConfig { rsa_key_bits: 1024 },
        ..Default::default()
    };
    config.ui.busy_deferral_ms = busy_deferral_ms;
    InteractionController::new(config, MemoryClipboard::new())
}

#[tokio::test]
async fn test_deferred_roundtrip() {
    let mut ui = user(20);
    let started = Instant::now();
    let keys = ui.generate_keys_deferred().await.unwrap();
    assert!(started.elapsed() >= Duration::from_millis(20));
    assert!(ui.form().is_enabled(Control::GenerateKeys));

    ui.set_field(Field::RecipientPublicKey, keys.public_key());
    ui.set_field(Field::MessageToSend, "hello");
    let payload = ui.encrypt_message_deferred().await.unwrap();

    ui.set_field(Field::EncryptedMessageReceived, payload.as_str());
    assert_eq!(ui.decrypt_message_deferred().await.unwrap(), "hello");
}

#[tokio::test]
async fn test_deferred_validation_skips_delay() {
    let mut ui = user(10_000);
    let started = Instant::now();
    assert!(ui.decrypt_message_deferred().await.is_err());
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
async fn test_async_import() {
    let dir = tempdir().unwrap();
    let store = KeyFileStore::new(dir.path()).unwrap();
    let mut source = user(0);
    let keys = source.generate_keys().unwrap();
    let path = source.export_keys(&store).unwrap();

    let mut ui = user(0);
    ui.import_keys_async(&path).await.unwrap();
    assert_eq!(ui.manager().keys(), &keys);

    assert!(ui.import_keys_async(&dir.path().join("missing.json")).await.is_err());
}
