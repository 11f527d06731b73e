//! 密钥校验与 PEM 规范化。
//!
//! 校验通过把密钥交给 RSA 原语解析来完成，但只返回 `Result<()>`，
//! 与真正使用密钥的路径解耦。

use super::KeyKind;
use crate::asymmetric::traits::AsymmetricCryptographicSystem;
use crate::error::{Error, Result};

const PEM_LINE_WIDTH: usize = 64;
const BEGIN_MARKER: &str = "-----BEGIN ";
const END_MARKER: &str = "-----END ";
const DASHES: &str = "-----";

/// 校验公钥能否被 RSA 原语加载
pub fn validate_public_key<S: AsymmetricCryptographicSystem>(key: &str) -> Result<()> {
    validate_key::<S>(key, KeyKind::Public)
}

/// 校验私钥能否被 RSA 原语加载
pub fn validate_private_key<S: AsymmetricCryptographicSystem>(key: &str) -> Result<()> {
    validate_key::<S>(key, KeyKind::Private)
}

pub fn validate_key<S: AsymmetricCryptographicSystem>(key: &str, kind: KeyKind) -> Result<()> {
    if key.trim().is_empty() {
        return Err(Error::InvalidKey {
            kind,
            reason: "key is empty".to_string(),
        });
    }
    match kind {
        KeyKind::Public => S::import_public_key(key).map(|_| ()),
        KeyKind::Private => S::import_private_key(key).map(|_| ()),
    }
}

/// 规范化 PEM 文本：去掉首尾空白和 `\r`，并把正文重新按 64 列折行。
///
/// 粘贴时被压成一行的密钥经过这一步即可被严格的 PEM 解析器接受。
/// 没有 PEM 头尾的输入只做空白清理后原样返回。
pub fn format_key(key: &str) -> String {
    let key = key.trim().replace('\r', "");
    if key.is_empty() {
        return key;
    }

    let Some(header_end) = key
        .strip_prefix(BEGIN_MARKER)
        .and_then(|rest| rest.find(DASHES))
        .map(|pos| BEGIN_MARKER.len() + pos + DASHES.len())
    else {
        return key;
    };
    let Some(footer_start) = key.rfind(END_MARKER) else {
        return key;
    };
    if footer_start < header_end {
        return key;
    }

    let header = &key[..header_end];
    let footer = key[footer_start..].trim();
    let body: Vec<char> = key[header_end..footer_start]
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    let mut formatted = String::with_capacity(key.len() + body.len() / PEM_LINE_WIDTH + 2);
    formatted.push_str(header);
    formatted.push('\n');
    for line in body.chunks(PEM_LINE_WIDTH) {
        formatted.extend(line);
        formatted.push('\n');
    }
    formatted.push_str(footer);
    formatted.push('\n');
    formatted
}
