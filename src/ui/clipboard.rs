//! 剪贴板由宿主环境提供，这里只定义写入约定。

use crate::error::Result;

pub trait Clipboard {
    /// 写入文本；失败时返回 `Error::Clipboard`
    fn write_text(&mut self, text: &str) -> Result<()>;
}

/// 进程内剪贴板，用于无界面运行和测试
#[derive(Debug, Default, Clone)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }
}

impl<C: Clipboard + ?Sized> Clipboard for Box<C> {
    fn write_text(&mut self, text: &str) -> Result<()> {
        (**self).write_text(text)
    }
}
