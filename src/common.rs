//! 通用模块，包含配置结构

pub mod config;

pub use self::config::{CryptoConfig, ExportConfig, MessengerConfig, UiConfig};
