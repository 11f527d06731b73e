//! JSON key file envelope and its filesystem store.
// 中文: JSON 密钥文件信封及其文件系统存储。

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::asymmetric::AsymmetricCryptographicSystem;
use crate::common::config::ExportConfig;
use crate::error::{Error, Result};
use crate::keys::{KeyPair, validate_private_key, validate_public_key};

/// The serialized form of an exported key pair.
///
/// `timestamp` and `version` are written on export but optional on import;
/// only the two key fields are mandatory.
///
/// 中文: 导出密钥对的序列化形式。导出时写入 `timestamp` 和 `version`，
/// 导入时二者可选，只有两个密钥字段是必需的。
#[derive(Clone, PartialEq, Serialize, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct ExportedKeyFile {
    #[serde(default)]
    #[zeroize(skip)]
    pub public_key: String,
    #[serde(default)]
    pub private_key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[zeroize(skip)]
    pub timestamp: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[zeroize(skip)]
    pub version: Option<String>,
}

// 私钥永远不出现在日志中
impl fmt::Debug for ExportedKeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExportedKeyFile")
            .field("public_key", &self.public_key)
            .field("private_key", &"[REDACTED]")
            .field("timestamp", &self.timestamp)
            .field("version", &self.version)
            .finish()
    }
}

impl ExportedKeyFile {
    /// Wraps a key pair with an ISO-8601 timestamp and the configured version tag.
    /// 中文: 用 ISO-8601 时间戳和配置的版本号包装密钥对。
    pub fn new(keys: &KeyPair, version: &str, at: DateTime<Utc>) -> Self {
        Self {
            public_key: keys.public_key().to_string(),
            private_key: keys.private_key().to_string(),
            timestamp: Some(at.to_rfc3339_opts(SecondsFormat::Millis, true)),
            version: Some(version.to_string()),
        }
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses an import document and checks that both key fields are present.
    /// 中文: 解析导入文档并检查两个密钥字段都存在。
    pub fn from_json(json: &str) -> Result<Self> {
        let file: ExportedKeyFile = serde_json::from_str(json)?;
        if file.public_key.trim().is_empty() || file.private_key.trim().is_empty() {
            return Err(Error::validation("Invalid key file"));
        }
        Ok(file)
    }

    /// Validates both keys against the RSA primitive and returns them as a `KeyPair`.
    /// 中文: 用 RSA 原语校验两个密钥，并以 `KeyPair` 返回。
    pub fn into_key_pair<S: AsymmetricCryptographicSystem>(self) -> Result<KeyPair> {
        validate_public_key::<S>(&self.public_key)?;
        validate_private_key::<S>(&self.private_key)?;
        Ok(KeyPair::new(self.public_key.as_str(), self.private_key.as_str()))
    }
}

/// `<prefix>_<YYYY-MM-DD>.json`
pub fn export_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.json", prefix, date.format("%Y-%m-%d"))
}

/// Reads and writes key files inside a single directory.
///
/// 中文: 在单个目录中读写密钥文件。写入是原子的：先写临时文件再重命名，
/// 避免中断时留下损坏的文件。
#[derive(Debug, Clone)]
pub struct KeyFileStore {
    dir: PathBuf,
}

impl KeyFileStore {
    /// Creates the directory if it does not exist yet.
    /// 中文: 目录不存在时会自动创建。
    pub fn new<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Exports `keys` as `<prefix>_<date>.json` and returns the written path.
    /// 中文: 将 `keys` 导出为 `<prefix>_<日期>.json` 并返回写入的路径。
    pub fn export(&self, keys: &KeyPair, config: &ExportConfig, at: DateTime<Utc>) -> Result<PathBuf> {
        if !keys.is_complete() {
            return Err(Error::validation("Generate the keys first"));
        }

        let file = ExportedKeyFile::new(keys, &config.format_version, at);
        let json = file.to_json()?;
        let path = self
            .dir
            .join(export_file_name(&config.file_prefix, at.date_naive()));

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        if let Err(e) = fs::rename(&temp_path, &path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }

        info!(path = %path.display(), "key pair exported");
        Ok(path)
    }

    /// Reads a key file from any path and validates both keys.
    /// 中文: 从任意路径读取密钥文件并校验两个密钥。
    pub fn import<S: AsymmetricCryptographicSystem>(path: &Path) -> Result<KeyPair> {
        let json = fs::read_to_string(path)?;
        Self::import_str::<S>(&json).inspect_err(|e| {
            warn!(path = %path.display(), error = %e, "key file rejected");
        })
    }

    pub fn import_str<S: AsymmetricCryptographicSystem>(json: &str) -> Result<KeyPair> {
        ExportedKeyFile::from_json(json)?.into_key_pair::<S>()
    }
}
