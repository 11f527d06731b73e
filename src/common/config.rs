//!
//! # 通用配置模块
//!
//! 包含消息工作台所使用的全部配置结构：密钥参数、状态消息时长和导出文件格式。
//! 配置可以来自默认值、JSON 文件或 `SEAL_MESSENGER_*` 环境变量。
//!
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::error::{Error, Result};

/// 环境变量前缀
pub const ENV_PREFIX: &str = "SEAL_MESSENGER_";

/// 加密配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CryptoConfig {
    /// RSA密钥位数
    #[serde(default = "default_rsa_key_bits")]
    pub rsa_key_bits: usize,
}

fn default_rsa_key_bits() -> usize {
    2048
}

impl Default for CryptoConfig {
    fn default() -> Self {
        Self {
            rsa_key_bits: default_rsa_key_bits(),
        }
    }
}

/// 界面时序配置（毫秒）
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// 操作结果状态消息的显示时长
    pub status_ttl_ms: u64,
    /// 欢迎消息的显示时长
    pub welcome_ttl_ms: u64,
    /// 启动后多久显示欢迎消息
    pub welcome_delay_ms: u64,
    /// 异步流程中为重绘忙碌指示器而让出的时间
    pub busy_deferral_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_ttl_ms: 5000,
            welcome_ttl_ms: 8000,
            welcome_delay_ms: 1000,
            busy_deferral_ms: 100,
        }
    }
}

impl UiConfig {
    pub fn status_ttl(&self) -> Duration {
        Duration::from_millis(self.status_ttl_ms)
    }

    pub fn welcome_ttl(&self) -> Duration {
        Duration::from_millis(self.welcome_ttl_ms)
    }

    pub fn welcome_delay(&self) -> Duration {
        Duration::from_millis(self.welcome_delay_ms)
    }

    pub fn busy_deferral(&self) -> Duration {
        Duration::from_millis(self.busy_deferral_ms)
    }
}

/// 密钥导出文件配置
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ExportConfig {
    /// 写入导出文件的 `version` 字段
    pub format_version: String,
    /// 导出文件名前缀，完整文件名为 `<prefix>_<日期>.json`
    pub file_prefix: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            format_version: "1.0".to_string(),
            file_prefix: "chiavi_rsa".to_string(),
        }
    }
}

/// 完整配置文件
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Default)]
pub struct MessengerConfig {
    /// 加密配置
    #[serde(default)]
    pub crypto: CryptoConfig,
    /// 界面配置
    #[serde(default)]
    pub ui: UiConfig,
    /// 导出配置
    #[serde(default)]
    pub export: ExportConfig,
}

impl MessengerConfig {
    /// 从 JSON 文件加载配置，缺失的段落使用默认值
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        let config: MessengerConfig = serde_json::from_str(&contents)
            .map_err(|e| Error::Config(format!("failed to parse {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 以给定的查找函数代替进程环境，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let var = |key: &str| lookup(&format!("{ENV_PREFIX}{key}"));

        if let Some(value) = var("RSA_KEY_BITS") {
            config.crypto.rsa_key_bits = parse_env("RSA_KEY_BITS", &value)?;
        }
        if let Some(value) = var("STATUS_TTL_MS") {
            config.ui.status_ttl_ms = parse_env("STATUS_TTL_MS", &value)?;
        }
        if let Some(value) = var("BUSY_DEFERRAL_MS") {
            config.ui.busy_deferral_ms = parse_env("BUSY_DEFERRAL_MS", &value)?;
        }
        if let Some(value) = var("EXPORT_PREFIX") {
            config.export.file_prefix = value;
        }

        config.validate()?;
        Ok(config)
    }

    /// 保存配置到文件
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let bits = self.crypto.rsa_key_bits;
        if bits < 512 || bits % 8 != 0 {
            return Err(Error::Config(format!(
                "rsa_key_bits must be a multiple of 8 and at least 512, got {bits}"
            )));
        }
        if self.ui.status_ttl_ms == 0 || self.ui.welcome_ttl_ms == 0 {
            return Err(Error::Config("status timeouts must be non-zero".to_string()));
        }
        if self.export.file_prefix.trim().is_empty() {
            return Err(Error::Config("export file prefix must not be empty".to_string()));
        }
        Ok(())
    }
}

fn parse_env<T: std::str::FromStr>(key: &str, value: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{ENV_PREFIX}{key} has invalid value {value:?}")))
}
