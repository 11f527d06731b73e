//! The storage module, defining how key pairs are exported to and imported from JSON files.
// 中文: 存储模块，定义密钥对如何导出为 JSON 文件以及如何从中导入。

pub mod key_file;

pub use key_file::{ExportedKeyFile, KeyFileStore, export_file_name};
