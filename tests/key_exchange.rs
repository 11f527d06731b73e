//!
//! 集成测试
//!
//! 两个用户各自持有一个控制器，通过公钥交换和加密载荷完成一次完整的消息往来。
//!

use seal_messenger::Error;
use seal_messenger::prelude::*;

fn user() -> InteractionController {
    let config = MessengerConfig {
        crypto: CryptoConfig { rsa_key_bits: 1024 },
        ..Default::default()
    };
    InteractionController::new(config, MemoryClipboard::new())
}

#[test]
fn test_alice_sends_bob_a_message() {
    let mut alice = user();
    let mut bob = user();
    alice.generate_keys().unwrap();
    bob.generate_keys().unwrap();

    // Bob 把公钥复制给 Alice
    bob.dispatch(UiAction::Copy(Field::PublicKey)).unwrap();
    let bob_public = bob.clipboard().contents().unwrap().to_string();

    alice.select_tab(Tab::Send);
    alice.set_field(Field::RecipientPublicKey, bob_public);
    alice.set_field(Field::MessageToSend, "Meet at noon");
    alice.dispatch(UiAction::EncryptAndSend).unwrap();
    alice.dispatch(UiAction::Copy(Field::EncryptedMessage)).unwrap();
    let payload = alice.clipboard().contents().unwrap().to_string();

    bob.select_tab(Tab::Receive);
    bob.set_field(Field::EncryptedMessageReceived, payload.clone());
    bob.dispatch(UiAction::DecryptMessage).unwrap();
    assert_eq!(bob.field(Field::DecryptedMessage), "Meet at noon");

    // Alice 自己无法解开发给 Bob 的消息
    alice.set_field(Field::EncryptedMessageReceived, payload);
    let err = alice.decrypt_message().unwrap_err();
    assert!(matches!(err, Error::Crypto(_)));
    assert_eq!(alice.field(Field::DecryptedMessage), "");
}

#[test]
fn test_generate_encrypt_decrypt_hello() {
    let mut manager: KeyManager = KeyManager::new(CryptoConfig { rsa_key_bits: 1024 });
    let keys = manager.generate_keys().unwrap();

    let payload = manager.encrypt_message("hello", keys.public_key()).unwrap();
    assert_eq!(manager.decrypt_message(&payload).unwrap(), "hello");
}

#[test]
fn test_roundtrip_various_lengths() {
    let mut manager: KeyManager = KeyManager::new(CryptoConfig { rsa_key_bits: 1024 });
    let keys = manager.generate_keys().unwrap();

    let longest = "z".repeat(117);
    for message in ["a", "Hello, World!", "àèìòù", longest.as_str()] {
        let payload = manager.encrypt_message(message, keys.public_key()).unwrap();
        assert_eq!(manager.decrypt_message(&payload).unwrap(), message);
    }
}

#[test]
fn test_encrypt_with_malformed_recipient_key() {
    let manager: KeyManager = KeyManager::new(CryptoConfig { rsa_key_bits: 1024 });
    assert!(manager.encrypt_message("hello", "-----BEGIN PUBLIC KEY-----\nAAAA\n-----END PUBLIC KEY-----").is_err());
}

#[test]
fn test_decrypt_without_keys() {
    let manager: KeyManager = KeyManager::new(CryptoConfig { rsa_key_bits: 1024 });
    let result = manager.decrypt_message(&EncryptedPayload::from("Zm9v"));
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_mismatched_manual_keys_are_accepted() {
    // 手动输入的公钥和私钥不必配对，只有解密失败才暴露不一致
    let mut first = user();
    let mut second = user();
    let a = first.generate_keys().unwrap();
    let b = second.generate_keys().unwrap();

    let mut ui = user();
    ui.set_field(Field::PublicKey, a.public_key());
    ui.set_field(Field::PrivateKey, b.private_key());
    ui.set_manual_keys().unwrap();

    ui.set_field(Field::RecipientPublicKey, a.public_key());
    ui.set_field(Field::MessageToSend, "lost");
    let payload = ui.encrypt_message().unwrap();
    ui.set_field(Field::EncryptedMessageReceived, payload.as_str());
    assert!(ui.decrypt_message().is_err());
}

#[test]
fn test_switch_tabs() {
    let mut ui = user();
    assert_eq!(ui.tabs().active(), Tab::Keys);
    ui.select_tab_id("send").unwrap();
    assert!(ui.tabs().is_active(Tab::Send));
    assert!(!ui.tabs().is_active(Tab::Keys));
    assert!(!ui.tabs().is_active(Tab::Receive));
}
