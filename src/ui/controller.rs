//! `InteractionController` 连接用户控件与 `KeyManager`。
//!
//! 每个流程都遵循同一个状态机：校验输入 → Idle → Busy（控件禁用）→
//! 成功（更新字段并显示状态）或失败（显示错误）→ Idle。
//! 所有错误都会变成一条错误状态消息，同时返回给调用方；失败不会改变之前的稳定状态。

use std::path::{Path, PathBuf};
use std::time::Instant;

use chrono::Utc;
use tracing::{info, warn};

use crate::asymmetric::{AsymmetricCryptographicSystem, RsaCryptoSystem};
use crate::common::config::MessengerConfig;
use crate::error::{Error, Result};
use crate::keys::{EncryptedPayload, KeyPair, format_key, validate_private_key, validate_public_key};
use crate::manager::KeyManager;
use crate::storage::KeyFileStore;

use super::clipboard::{Clipboard, MemoryClipboard};
use super::form::{Control, Field, Form};
use super::status::{StatusBoard, StatusKind, StatusMessage, user_message};
use super::tabs::{Tab, TabBar};

/// 宿主环境可分派的用户操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    GenerateKeys,
    SetManualKeys,
    ExportKeys { dir: PathBuf },
    ImportKeys { path: PathBuf },
    EncryptAndSend,
    DecryptMessage,
    Copy(Field),
    SelectTab(Tab),
}

impl UiAction {
    /// 不需要额外参数的按钮直接映射为操作
    pub fn from_control(control: Control) -> Option<UiAction> {
        if let Some(field) = control.copy_source() {
            return Some(UiAction::Copy(field));
        }
        match control {
            Control::GenerateKeys => Some(UiAction::GenerateKeys),
            Control::SetManualKeys => Some(UiAction::SetManualKeys),
            Control::EncryptAndSend => Some(UiAction::EncryptAndSend),
            Control::DecryptMessage => Some(UiAction::DecryptMessage),
            _ => None,
        }
    }
}

pub struct InteractionController<S = RsaCryptoSystem, C = MemoryClipboard>
where
    S: AsymmetricCryptographicSystem,
    C: Clipboard,
{
    config: MessengerConfig,
    manager: KeyManager<S>,
    form: Form,
    tabs: TabBar,
    status: StatusBoard,
    clipboard: C,
}

impl<S, C> InteractionController<S, C>
where
    S: AsymmetricCryptographicSystem,
    C: Clipboard,
{
    /// 创建控制器并计划欢迎消息
    pub fn new(config: MessengerConfig, clipboard: C) -> Self {
        let manager = KeyManager::new(config.crypto.clone());
        Self::with_manager(config, manager, clipboard)
    }

    pub fn with_manager(config: MessengerConfig, manager: KeyManager<S>, clipboard: C) -> Self {
        let mut status = StatusBoard::new(config.ui.status_ttl());
        status.schedule_welcome(Instant::now() + config.ui.welcome_delay(), config.ui.welcome_ttl());
        Self {
            config,
            manager,
            form: Form::new(),
            tabs: TabBar::new(),
            status,
            clipboard,
        }
    }

    pub fn config(&self) -> &MessengerConfig {
        &self.config
    }

    pub fn manager(&self) -> &KeyManager<S> {
        &self.manager
    }

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn tabs(&self) -> &TabBar {
        &self.tabs
    }

    pub fn clipboard(&self) -> &C {
        &self.clipboard
    }

    pub fn field(&self, field: Field) -> &str {
        self.form.value(field)
    }

    /// 用户在字段中输入内容
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        self.form.set(field, value);
    }

    /// 当前可见的状态消息
    pub fn status(&mut self) -> Option<&StatusMessage> {
        self.status_at(Instant::now())
    }

    pub fn status_at(&mut self, now: Instant) -> Option<&StatusMessage> {
        self.status.visible(now)
    }

    pub fn dispatch(&mut self, action: UiAction) -> Result<()> {
        match action {
            UiAction::GenerateKeys => self.generate_keys().map(|_| ()),
            UiAction::SetManualKeys => self.set_manual_keys(),
            UiAction::ExportKeys { dir } => {
                let store = KeyFileStore::new(&dir).map_err(|e| self.reject(e))?;
                self.export_keys(&store).map(|_| ())
            }
            UiAction::ImportKeys { path } => self.import_keys(&path),
            UiAction::EncryptAndSend => self.encrypt_message().map(|_| ()),
            UiAction::DecryptMessage => self.decrypt_message().map(|_| ()),
            UiAction::Copy(field) => self.copy_to_clipboard(field),
            UiAction::SelectTab(tab) => {
                self.select_tab(tab);
                Ok(())
            }
        }
    }

    pub fn select_tab(&mut self, tab: Tab) {
        self.tabs.select(tab);
    }

    pub fn select_tab_id(&mut self, id: &str) -> Result<Tab> {
        self.tabs.select_id(id)
    }

    /// 生成新密钥并填入公钥/私钥字段
    pub fn generate_keys(&mut self) -> Result<KeyPair> {
        self.begin(Control::GenerateKeys)?;
        let result = self.run_generate();
        self.finish(Control::GenerateKeys, result, "Keys generated successfully!")
    }

    /// 使用公钥/私钥字段中手动输入的密钥
    pub fn set_manual_keys(&mut self) -> Result<()> {
        let (public_key, private_key) = self.prepare_manual_keys().map_err(|e| self.reject(e))?;
        self.begin(Control::SetManualKeys)?;
        let result = self.manager.set_keys(&public_key, &private_key);
        self.finish(Control::SetManualKeys, result, "Keys set successfully!")
    }

    /// 把当前密钥对导出到 `store`，返回写入的文件路径
    pub fn export_keys(&mut self, store: &KeyFileStore) -> Result<PathBuf> {
        self.begin(Control::ExportKeys)?;
        let result = store.export(self.manager.keys(), &self.config.export, Utc::now());
        self.finish(Control::ExportKeys, result, "Keys exported successfully!")
    }

    /// 从 JSON 文件导入密钥对
    pub fn import_keys(&mut self, path: &Path) -> Result<()> {
        self.begin(Control::ImportKeys)?;
        let result = KeyFileStore::import::<S>(path).and_then(|keys| self.apply_keys(keys));
        self.finish(Control::ImportKeys, result, "Keys imported successfully!")
    }

    /// 从已读取的文件内容导入密钥对
    pub fn import_keys_from_str(&mut self, json: &str) -> Result<()> {
        self.begin(Control::ImportKeys)?;
        let result = KeyFileStore::import_str::<S>(json).and_then(|keys| self.apply_keys(keys));
        self.finish(Control::ImportKeys, result, "Keys imported successfully!")
    }

    /// 用收件人公钥加密待发送消息，结果写入加密消息字段
    pub fn encrypt_message(&mut self) -> Result<EncryptedPayload> {
        let (message, recipient) = self.prepare_encrypt().map_err(|e| self.reject(e))?;
        self.begin(Control::EncryptAndSend)?;
        let result = self.run_encrypt(&message, &recipient);
        self.finish(Control::EncryptAndSend, result, "Message encrypted successfully!")
    }

    /// 用当前私钥解密收到的消息，结果写入解密消息字段
    pub fn decrypt_message(&mut self) -> Result<String> {
        let payload = self.prepare_decrypt().map_err(|e| self.reject(e))?;
        self.begin(Control::DecryptMessage)?;
        let result = self.run_decrypt(&payload);
        self.finish(Control::DecryptMessage, result, "Message decrypted successfully!")
    }

    pub fn copy_to_clipboard(&mut self, field: Field) -> Result<()> {
        let text = self.form.value(field);
        if text.is_empty() {
            return Err(self.reject(Error::validation("Nothing to copy")));
        }
        let result = self.clipboard.write_text(text);
        self.finish_untracked(result, "Copied to clipboard!")
    }

    fn run_generate(&mut self) -> Result<KeyPair> {
        let keys = self.manager.generate_keys()?;
        self.form.set(Field::PublicKey, keys.public_key());
        self.form.set(Field::PrivateKey, keys.private_key());
        Ok(keys)
    }

    fn prepare_manual_keys(&self) -> Result<(String, String)> {
        let public_key = self.form.trimmed(Field::PublicKey);
        let private_key = self.form.trimmed(Field::PrivateKey);
        if public_key.is_empty() || private_key.is_empty() {
            return Err(Error::validation("Enter both the public and the private key"));
        }
        let public_key = format_key(public_key);
        let private_key = format_key(private_key);
        validate_public_key::<S>(&public_key)?;
        validate_private_key::<S>(&private_key)?;
        Ok((public_key, private_key))
    }

    fn apply_keys(&mut self, keys: KeyPair) -> Result<()> {
        self.manager.set_keys(keys.public_key(), keys.private_key())?;
        self.form.set(Field::PublicKey, keys.public_key());
        self.form.set(Field::PrivateKey, keys.private_key());
        Ok(())
    }

    fn prepare_encrypt(&self) -> Result<(String, String)> {
        let recipient = self.form.trimmed(Field::RecipientPublicKey);
        if recipient.is_empty() {
            return Err(Error::validation("Enter the recipient's public key"));
        }
        let message = self.form.trimmed(Field::MessageToSend);
        if message.is_empty() {
            return Err(Error::validation("Enter a message to encrypt"));
        }
        let recipient = format_key(recipient);
        validate_public_key::<S>(&recipient)?;
        Ok((message.to_string(), recipient))
    }

    fn run_encrypt(&mut self, message: &str, recipient: &str) -> Result<EncryptedPayload> {
        let payload = self.manager.encrypt_message(message, recipient)?;
        self.form.set(Field::EncryptedMessage, payload.as_str());
        Ok(payload)
    }

    fn prepare_decrypt(&self) -> Result<EncryptedPayload> {
        let payload = self.form.trimmed(Field::EncryptedMessageReceived);
        if payload.is_empty() {
            return Err(Error::validation("Enter an encrypted message to decrypt"));
        }
        if !self.manager.has_private_key() {
            return Err(Error::validation("Load your private key first"));
        }
        Ok(EncryptedPayload::from(payload))
    }

    fn run_decrypt(&mut self, payload: &EncryptedPayload) -> Result<String> {
        let plaintext = self.manager.decrypt_message(payload)?;
        self.form.set(Field::DecryptedMessage, plaintext.as_str());
        Ok(plaintext)
    }

    /// Idle → Busy
    fn begin(&mut self, control: Control) -> Result<()> {
        match self.form.begin(control) {
            Ok(()) => Ok(()),
            Err(e) => Err(self.reject(e)),
        }
    }

    /// Busy → Idle，并显示结果
    fn finish<T>(&mut self, control: Control, result: Result<T>, success: &str) -> Result<T> {
        self.form.finish(control);
        if result.is_ok() {
            info!(control = control.id(), "operation completed");
        }
        self.finish_untracked(result, success)
    }

    fn finish_untracked<T>(&mut self, result: Result<T>, success: &str) -> Result<T> {
        match result {
            Ok(value) => {
                self.status.show(StatusKind::Success, success, Instant::now());
                Ok(value)
            }
            Err(e) => Err(self.reject(e)),
        }
    }

    fn reject(&mut self, error: Error) -> Error {
        warn!(error = %error, "operation rejected");
        self.status
            .show(StatusKind::Error, user_message(&error), Instant::now());
        error
    }
}

#[cfg(feature = "async")]
impl<S, C> InteractionController<S, C>
where
    S: AsymmetricCryptographicSystem,
    C: Clipboard,
{
    /// 标记忙碌后先让出 `busy_deferral_ms`，给宿主重绘忙碌指示器的机会，再执行生成
    pub async fn generate_keys_deferred(&mut self) -> Result<KeyPair> {
        self.begin(Control::GenerateKeys)?;
        tokio::time::sleep(self.config.ui.busy_deferral()).await;
        let result = self.run_generate();
        self.finish(Control::GenerateKeys, result, "Keys generated successfully!")
    }

    pub async fn encrypt_message_deferred(&mut self) -> Result<EncryptedPayload> {
        let (message, recipient) = self.prepare_encrypt().map_err(|e| self.reject(e))?;
        self.begin(Control::EncryptAndSend)?;
        tokio::time::sleep(self.config.ui.busy_deferral()).await;
        let result = self.run_encrypt(&message, &recipient);
        self.finish(Control::EncryptAndSend, result, "Message encrypted successfully!")
    }

    pub async fn decrypt_message_deferred(&mut self) -> Result<String> {
        let payload = self.prepare_decrypt().map_err(|e| self.reject(e))?;
        self.begin(Control::DecryptMessage)?;
        tokio::time::sleep(self.config.ui.busy_deferral()).await;
        let result = self.run_decrypt(&payload);
        self.finish(Control::DecryptMessage, result, "Message decrypted successfully!")
    }

    /// 异步读取密钥文件后导入
    pub async fn import_keys_async(&mut self, path: &Path) -> Result<()> {
        match tokio::fs::read_to_string(path).await {
            Ok(json) => self.import_keys_from_str(&json),
            Err(e) => Err(self.reject(Error::Io(e))),
        }
    }
}
