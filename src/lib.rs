//! # Seal-Messenger: RSA 加密消息交换
//!
//! `seal-messenger` 让两个用户通过 RSA 加密的文本消息通信：生成或手动输入密钥对、
//! 以 JSON 文件导入导出密钥、用对方公钥加密消息、用自己的私钥解密消息。
//!
//! RSA 数学运算（密钥生成、PKCS#1 v1.5 填充、模幂）全部委托给 `rsa` crate；
//! 本 crate 负责密钥状态、输入校验、文件格式和界面状态。
//!
//! ## Core Concepts
//!
//! - **`KeyManager`**: 持有当前密钥对，提供加密与解密。
//! - **`InteractionController`**: 无界面的控制器，维护字段、控件忙碌状态、标签页和状态消息。
//! - **`KeyFileStore`**: 以 `chiavi_rsa_<日期>.json` 导出并导入密钥对。
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use seal_messenger::prelude::*;
//!
//! fn main() -> seal_messenger::Result<()> {
//!     let mut manager: KeyManager = KeyManager::new(CryptoConfig::default());
//!     let keys = manager.generate_keys()?;
//!
//!     let payload = manager.encrypt_message("hello", keys.public_key())?;
//!     assert_eq!(manager.decrypt_message(&payload)?, "hello");
//!     Ok(())
//! }
//! ```

pub mod asymmetric;
pub mod common;
pub mod error;
pub mod keys;
pub mod manager;
pub mod storage;
pub mod ui;

pub use error::{Error, Result};
pub use manager::KeyManager;

// --- Prelude ---
// A collection of the most commonly used traits, structs, and enums.
pub mod prelude {
    pub use crate::asymmetric::{AsymmetricCryptographicSystem, RsaCryptoSystem};
    pub use crate::common::config::{CryptoConfig, MessengerConfig};
    pub use crate::keys::{EncryptedPayload, KeyKind, KeyPair};
    pub use crate::manager::KeyManager;
    pub use crate::storage::{ExportedKeyFile, KeyFileStore};
    pub use crate::ui::{Clipboard, Control, Field, InteractionController, MemoryClipboard, Tab, UiAction};
}

/// The version of the `seal-messenger` crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
