//! `KeyManager` 持有当前会话的密钥对，并把加解密委托给 RSA 原语。

use std::marker::PhantomData;

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use tracing::{debug, error, info};

use crate::asymmetric::{AsymmetricCryptographicSystem, RsaCryptoSystem};
use crate::common::config::CryptoConfig;
use crate::error::{Error, Result};
use crate::keys::{EncryptedPayload, KeyPair};

/// 管理当前密钥对
///
/// 状态只有一份密钥对及其解析后的私钥（解密路径）。调用方显式持有 `KeyManager`
/// 并按需传递引用；每次 `generate_keys` / `set_keys` 都整体替换旧的密钥对。
pub struct KeyManager<S: AsymmetricCryptographicSystem = RsaCryptoSystem> {
    config: CryptoConfig,
    keys: KeyPair,
    decryptor: Option<S::PrivateKey>,
    _system: PhantomData<S>,
}

impl<S: AsymmetricCryptographicSystem> Default for KeyManager<S> {
    fn default() -> Self {
        Self::new(CryptoConfig::default())
    }
}

impl<S: AsymmetricCryptographicSystem> KeyManager<S> {
    pub fn new(config: CryptoConfig) -> Self {
        Self {
            config,
            keys: KeyPair::default(),
            decryptor: None,
            _system: PhantomData,
        }
    }

    /// 当前密钥对；尚未加载时两个字段均为空
    pub fn keys(&self) -> &KeyPair {
        &self.keys
    }

    pub fn has_private_key(&self) -> bool {
        self.decryptor.is_some()
    }

    pub fn config(&self) -> &CryptoConfig {
        &self.config
    }

    /// 生成新的密钥对并设为当前密钥，同时配置解密路径。
    ///
    /// 失败时保留原有密钥对，不重试。
    pub fn generate_keys(&mut self) -> Result<KeyPair> {
        let generated = S::generate_keypair(&self.config).and_then(|(public_key, private_key)| {
            let public_pem = S::export_public_key(&public_key)?;
            let private_pem = S::export_private_key(&private_key)?;
            Ok((KeyPair::new(public_pem, private_pem), private_key))
        });

        match generated {
            Ok((keys, private_key)) => {
                self.keys = keys;
                self.decryptor = Some(private_key);
                info!(bits = self.config.rsa_key_bits, "generated new key pair");
                Ok(self.keys.clone())
            }
            Err(e) => {
                error!(error = %e, "key generation failed");
                Err(Error::crypto("Error generating the keys"))
            }
        }
    }

    /// 设置外部提供的密钥（手动输入或文件导入）。
    ///
    /// 私钥会被加载到解密路径中，加载失败时不修改当前状态。
    /// 不检查公钥与私钥在数学上是否配对。
    pub fn set_keys(&mut self, public_key: &str, private_key: &str) -> Result<()> {
        if public_key.trim().is_empty() || private_key.trim().is_empty() {
            return Err(Error::validation("Both keys are required"));
        }

        let decryptor = S::import_private_key(private_key).map_err(|e| {
            error!(error = %e, "failed to load private key");
            e
        })?;

        self.keys = KeyPair::new(public_key, private_key);
        self.decryptor = Some(decryptor);
        info!("key pair replaced");
        Ok(())
    }

    /// 使用收件人的公钥加密消息。
    ///
    /// 每次调用都临时解析收件人公钥，不会保存。
    pub fn encrypt_message(
        &self,
        message: &str,
        recipient_public_key: &str,
    ) -> Result<EncryptedPayload> {
        let encrypted = S::import_public_key(recipient_public_key).and_then(|public_key| {
            let max = S::max_plaintext_len(&public_key);
            if message.len() > max {
                return Err(Error::crypto(format!(
                    "message is {} bytes, the key accepts at most {}",
                    message.len(),
                    max
                )));
            }
            S::encrypt(&public_key, message.as_bytes())
        });

        match encrypted {
            Ok(ciphertext) if !ciphertext.is_empty() => {
                debug!(bytes = ciphertext.len(), "message encrypted");
                Ok(EncryptedPayload::new(BASE64.encode(ciphertext)))
            }
            Ok(_) => {
                error!("encryption produced an empty ciphertext");
                Err(Error::crypto("Error encrypting the message"))
            }
            Err(e) => {
                error!(error = %e, "encryption failed");
                Err(Error::crypto("Error encrypting the message"))
            }
        }
    }

    /// 使用当前私钥解密消息
    pub fn decrypt_message(&self, payload: &EncryptedPayload) -> Result<String> {
        let Some(private_key) = self.decryptor.as_ref() else {
            return Err(Error::validation("No private key loaded"));
        };

        let decrypted = BASE64
            .decode(payload.as_str().trim())
            .map_err(Error::from)
            .and_then(|ciphertext| S::decrypt(private_key, &ciphertext))
            .and_then(|plaintext| Ok(String::from_utf8(plaintext)?));

        match decrypted {
            Ok(plaintext) if !plaintext.is_empty() => {
                debug!(bytes = plaintext.len(), "message decrypted");
                Ok(plaintext)
            }
            Ok(_) => {
                error!("decryption produced no plaintext");
                Err(Error::crypto("Error decrypting the message"))
            }
            Err(e) => {
                error!(error = %e, "decryption failed");
                Err(Error::crypto("Error decrypting the message"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> KeyManager {
        KeyManager::new(CryptoConfig { rsa_key_bits: 1024 })
    }

    #[test]
    fn test_generate_encrypt_decrypt() {
        let mut manager = manager();
        let keys = manager.generate_keys().unwrap();
        assert!(keys.is_complete());
        assert_eq!(manager.keys(), &keys);

        let payload = manager.encrypt_message("hello", keys.public_key()).unwrap();
        assert_eq!(manager.decrypt_message(&payload).unwrap(), "hello");
    }

    #[test]
    fn test_unicode_roundtrip() {
        let mut manager = manager();
        let keys = manager.generate_keys().unwrap();
        let message = "Ciao! Comunicazione crittografica 🔐";

        let payload = manager.encrypt_message(message, keys.public_key()).unwrap();
        assert_eq!(manager.decrypt_message(&payload).unwrap(), message);
    }

    #[test]
    fn test_decrypt_without_private_key_fails() {
        let manager = manager();
        let result = manager.decrypt_message(&EncryptedPayload::from("AAAA"));
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_encrypt_with_malformed_key_fails() {
        let manager = manager();
        let result = manager.encrypt_message("hello", "not-a-key");
        assert!(matches!(result, Err(Error::Crypto(_))));
    }

    #[test]
    fn test_encrypt_rejects_oversized_message() {
        let mut manager = manager();
        let keys = manager.generate_keys().unwrap();
        let message = "x".repeat(118);
        assert!(manager.encrypt_message(&message, keys.public_key()).is_err());
        assert!(manager.encrypt_message(&message[..117], keys.public_key()).is_ok());
    }

    #[test]
    fn test_decrypt_with_other_key_fails() {
        let mut alice = manager();
        let mut bob = manager();
        alice.generate_keys().unwrap();
        let bob_keys = bob.generate_keys().unwrap();

        let payload = alice.encrypt_message("for bob", bob_keys.public_key()).unwrap();
        assert!(alice.decrypt_message(&payload).is_err());
        assert_eq!(bob.decrypt_message(&payload).unwrap(), "for bob");
    }

    #[test]
    fn test_decrypt_garbage_payload_fails() {
        let mut manager = manager();
        manager.generate_keys().unwrap();
        assert!(manager.decrypt_message(&EncryptedPayload::from("%%%")).is_err());
        assert!(manager.decrypt_message(&EncryptedPayload::from("AAAA")).is_err());
    }

    #[test]
    fn test_set_keys_replaces_pair() {
        let mut source = manager();
        let keys = source.generate_keys().unwrap();

        let mut target = manager();
        target.set_keys(keys.public_key(), keys.private_key()).unwrap();
        assert_eq!(target.keys(), &keys);
        assert!(target.has_private_key());

        let payload = source.encrypt_message("shared", keys.public_key()).unwrap();
        assert_eq!(target.decrypt_message(&payload).unwrap(), "shared");
    }

    #[test]
    fn test_set_keys_with_bad_private_key_keeps_state() {
        let mut manager = manager();
        let keys = manager.generate_keys().unwrap();

        let result = manager.set_keys(keys.public_key(), "garbage");
        assert!(result.is_err());
        assert_eq!(manager.keys(), &keys);
    }

    #[test]
    fn test_set_keys_requires_both() {
        let mut manager = manager();
        assert!(matches!(manager.set_keys("", "x"), Err(Error::Validation(_))));
        assert!(manager.keys().is_empty());
    }
}
