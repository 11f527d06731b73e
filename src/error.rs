//! Defines the custom error type for the `seal-messenger` crate.

use crate::keys::KeyKind;
use thiserror::Error;

/// The main error type for the `seal-messenger` crate.
///
/// 变体按来源分为三类：输入校验错误、密码学操作失败、I/O 错误。
#[derive(Debug, Error)]
pub enum Error {
    /// 必填字段为空、控件正忙等输入问题
    #[error("{0}")]
    Validation(String),

    /// RSA 原语拒绝加载的密钥材料
    #[error("invalid {kind} key: {reason}")]
    InvalidKey { kind: KeyKind, reason: String },

    /// 密钥生成、加密或解密没有产生可用结果
    #[error("{0}")]
    Crypto(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("decoding from Base64 failed: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("clipboard error: {0}")]
    Clipboard(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    pub(crate) fn crypto(msg: impl Into<String>) -> Self {
        Error::Crypto(msg.into())
    }

    /// 是否属于输入校验类错误（包括非法密钥）
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_) | Error::InvalidKey { .. })
    }
}

impl From<std::string::FromUtf8Error> for Error {
    fn from(err: std::string::FromUtf8Error) -> Self {
        Error::Crypto(format!("decrypted data is not valid UTF-8: {}", err))
    }
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
