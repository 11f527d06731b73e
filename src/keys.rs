//! 密钥与载荷的数据类型。
//!
//! `KeyPair` 只保存 PEM 字符串，不关心其中的数学结构；密钥是否真正配对由 RSA 原语负责。

pub mod validation;

use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub use self::validation::{format_key, validate_key, validate_private_key, validate_public_key};

/// 区分公钥与私钥，用于校验和错误信息
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyKind {
    Public,
    Private,
}

impl fmt::Display for KeyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyKind::Public => f.write_str("public"),
            KeyKind::Private => f.write_str("private"),
        }
    }
}

/// 当前会话使用的密钥对
///
/// 两个字段要么同时为空（尚未加载密钥），要么同时有值。私钥在丢弃时会被擦除。
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    #[zeroize(skip)]
    public_key: String,
    private_key: String,
}

impl KeyPair {
    pub fn new(public_key: impl Into<String>, private_key: impl Into<String>) -> Self {
        Self {
            public_key: public_key.into(),
            private_key: private_key.into(),
        }
    }

    pub fn public_key(&self) -> &str {
        &self.public_key
    }

    pub fn private_key(&self) -> &str {
        &self.private_key
    }

    /// 两个字段都为空时表示没有加载任何密钥
    pub fn is_empty(&self) -> bool {
        self.public_key.is_empty() && self.private_key.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        !self.public_key.is_empty() && !self.private_key.is_empty()
    }
}

// 私钥永远不出现在日志中
impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .finish()
    }
}

/// 加密后的消息，Base64 编码的密文。本 crate 不解析其内部结构。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EncryptedPayload(String);

impl EncryptedPayload {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for EncryptedPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for EncryptedPayload {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl From<&str> for EncryptedPayload {
    fn from(encoded: &str) -> Self {
        Self(encoded.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_states() {
        assert!(KeyPair::default().is_empty());
        assert!(!KeyPair::default().is_complete());

        let pair = KeyPair::new("pub", "priv");
        assert!(pair.is_complete());
        assert_eq!(pair.public_key(), "pub");
        assert_eq!(pair.private_key(), "priv");
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let pair = KeyPair::new("PUBLIC-PEM", "SECRET-PEM");
        let printed = format!("{:?}", pair);
        assert!(printed.contains("PUBLIC-PEM"));
        assert!(!printed.contains("SECRET-PEM"));
    }

    #[test]
    fn test_keypair_serializes_camel_case() {
        let json = serde_json::to_value(KeyPair::new("a", "b")).unwrap();
        assert_eq!(json["publicKey"], "a");
        assert_eq!(json["privateKey"], "b");
    }
}
