//! 无界面的交互控制层：字段、控件、标签页、状态消息与剪贴板。
//!
//! 宿主环境（网页、桌面或终端）负责渲染；这里只维护可见状态并驱动 `KeyManager`。

pub mod clipboard;
pub mod controller;
pub mod form;
pub mod status;
pub mod tabs;

pub use clipboard::{Clipboard, MemoryClipboard};
pub use controller::{InteractionController, UiAction};
pub use form::{Control, Field, Form};
pub use status::{StatusBoard, StatusKind, StatusMessage};
pub use tabs::{Tab, TabBar};
