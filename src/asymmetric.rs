//! 非对称加密：RSA 原语的约定及其实现

pub mod systems;
pub mod traits;

pub use self::systems::traditional::rsa::RsaCryptoSystem;
pub use self::traits::AsymmetricCryptographicSystem;
