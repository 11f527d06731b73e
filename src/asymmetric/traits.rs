//! 定义了非对称加密系统的核心 Trait。
use crate::common::config::CryptoConfig;
use crate::error::Result;

/// `AsymmetricCryptographicSystem` 描述消息交换所依赖的 RSA 原语。
///
/// 实现者负责全部数学运算（密钥生成、填充、模幂）；本 crate 只通过这里的
/// 关联函数与其交互，并把密钥以 PEM 字符串的形式保存和传递。
pub trait AsymmetricCryptographicSystem {
    /// 已解析的公钥
    type PublicKey;

    /// 已解析的私钥
    type PrivateKey;

    /// 生成新的密钥对
    fn generate_keypair(config: &CryptoConfig) -> Result<(Self::PublicKey, Self::PrivateKey)>;

    /// 使用公钥加密单个数据块。明文超过密钥容量时返回错误。
    fn encrypt(public_key: &Self::PublicKey, plaintext: &[u8]) -> Result<Vec<u8>>;

    /// 使用私钥解密单个数据块。
    fn decrypt(private_key: &Self::PrivateKey, ciphertext: &[u8]) -> Result<Vec<u8>>;

    /// 单次加密可接受的最大明文字节数
    fn max_plaintext_len(public_key: &Self::PublicKey) -> usize;

    /// 将公钥导出为 PEM
    fn export_public_key(public_key: &Self::PublicKey) -> Result<String>;

    /// 将私钥导出为 PEM
    fn export_private_key(private_key: &Self::PrivateKey) -> Result<String>;

    /// 从 PEM 导入公钥，格式错误时返回 `Error::InvalidKey`
    fn import_public_key(key_data: &str) -> Result<Self::PublicKey>;

    /// 从 PEM 导入私钥，格式错误时返回 `Error::InvalidKey`
    fn import_private_key(key_data: &str) -> Result<Self::PrivateKey>;
}
