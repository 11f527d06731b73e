//! 具名字段与控件，以及它们的当前状态。

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

/// 页面上的具名文本字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    PublicKey,
    PrivateKey,
    RecipientPublicKey,
    MessageToSend,
    EncryptedMessage,
    EncryptedMessageReceived,
    DecryptedMessage,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::PublicKey,
        Field::PrivateKey,
        Field::RecipientPublicKey,
        Field::MessageToSend,
        Field::EncryptedMessage,
        Field::EncryptedMessageReceived,
        Field::DecryptedMessage,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Field::PublicKey => "publicKey",
            Field::PrivateKey => "privateKey",
            Field::RecipientPublicKey => "recipientPublicKey",
            Field::MessageToSend => "messageToSend",
            Field::EncryptedMessage => "encryptedMessage",
            Field::EncryptedMessageReceived => "encryptedMessageReceived",
            Field::DecryptedMessage => "decryptedMessage",
        }
    }

    pub fn from_id(id: &str) -> Option<Field> {
        Field::ALL.into_iter().find(|f| f.id() == id)
    }
}

/// 页面上的具名按钮
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    GenerateKeys,
    ExportKeys,
    ImportKeys,
    SetManualKeys,
    CopyPublicKey,
    CopyPrivateKey,
    EncryptAndSend,
    DecryptMessage,
    CopyEncrypted,
    CopyDecrypted,
}

impl Control {
    pub const ALL: [Control; 10] = [
        Control::GenerateKeys,
        Control::ExportKeys,
        Control::ImportKeys,
        Control::SetManualKeys,
        Control::CopyPublicKey,
        Control::CopyPrivateKey,
        Control::EncryptAndSend,
        Control::DecryptMessage,
        Control::CopyEncrypted,
        Control::CopyDecrypted,
    ];

    pub fn id(self) -> &'static str {
        match self {
            Control::GenerateKeys => "generateKeys",
            Control::ExportKeys => "exportKeys",
            Control::ImportKeys => "importKeys",
            Control::SetManualKeys => "setManualKeys",
            Control::CopyPublicKey => "copyPublicKey",
            Control::CopyPrivateKey => "copyPrivateKey",
            Control::EncryptAndSend => "encryptAndSend",
            Control::DecryptMessage => "decryptMessage",
            Control::CopyEncrypted => "copyEncrypted",
            Control::CopyDecrypted => "copyDecrypted",
        }
    }

    pub fn from_id(id: &str) -> Option<Control> {
        Control::ALL.into_iter().find(|c| c.id() == id)
    }

    pub fn label(self) -> &'static str {
        match self {
            Control::GenerateKeys => "Generate keys",
            Control::ExportKeys => "Export keys",
            Control::ImportKeys => "Import keys",
            Control::SetManualKeys => "Use these keys",
            Control::CopyPublicKey | Control::CopyPrivateKey => "Copy",
            Control::EncryptAndSend => "Encrypt and send",
            Control::DecryptMessage => "Decrypt",
            Control::CopyEncrypted | Control::CopyDecrypted => "Copy",
        }
    }

    /// 复制类按钮对应的源字段
    pub fn copy_source(self) -> Option<Field> {
        match self {
            Control::CopyPublicKey => Some(Field::PublicKey),
            Control::CopyPrivateKey => Some(Field::PrivateKey),
            Control::CopyEncrypted => Some(Field::EncryptedMessage),
            Control::CopyDecrypted => Some(Field::DecryptedMessage),
            _ => None,
        }
    }
}

pub const BUSY_LABEL: &str = "Processing...";

/// 字段内容与控件忙碌状态
#[derive(Debug, Default)]
pub struct Form {
    values: HashMap<Field, String>,
    busy: HashSet<Control>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, field: Field) -> &str {
        self.values.get(&field).map(String::as_str).unwrap_or("")
    }

    /// 去掉首尾空白后的字段内容
    pub fn trimmed(&self, field: Field) -> &str {
        self.value(field).trim()
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn clear(&mut self, field: Field) {
        self.values.remove(&field);
    }

    pub fn is_busy(&self, control: Control) -> bool {
        self.busy.contains(&control)
    }

    pub fn is_enabled(&self, control: Control) -> bool {
        !self.is_busy(control)
    }

    pub fn label(&self, control: Control) -> &'static str {
        if self.is_busy(control) {
            BUSY_LABEL
        } else {
            control.label()
        }
    }

    /// Idle → Busy。控件已处于忙碌状态时拒绝。
    pub fn begin(&mut self, control: Control) -> Result<()> {
        if !self.busy.insert(control) {
            return Err(Error::validation("Operation already in progress"));
        }
        Ok(())
    }

    /// Busy → Idle
    pub fn finish(&mut self, control: Control) {
        self.busy.remove(&control);
    }
}
