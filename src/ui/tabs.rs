//! 标签页切换：任意时刻恰好一个标签处于激活状态。

use crate::error::{Error, Result};

const TAB_COUNT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tab {
    Keys,
    Send,
    Receive,
}

impl Tab {
    pub const ALL: [Tab; TAB_COUNT] = [Tab::Keys, Tab::Send, Tab::Receive];

    pub fn id(self) -> &'static str {
        match self {
            Tab::Keys => "keys",
            Tab::Send => "send",
            Tab::Receive => "receive",
        }
    }

    pub fn from_id(id: &str) -> Option<Tab> {
        Tab::ALL.into_iter().find(|t| t.id() == id)
    }
}

/// 每个标签的触发按钮和内容面板的激活标记
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabState {
    pub trigger_active: bool,
    pub panel_active: bool,
}

#[derive(Debug, Clone)]
pub struct TabBar {
    states: [TabState; TAB_COUNT],
}

impl Default for TabBar {
    fn default() -> Self {
        let mut bar = Self {
            states: [TabState::default(); TAB_COUNT],
        };
        bar.select(Tab::Keys);
        bar
    }
}

impl TabBar {
    pub fn new() -> Self {
        Self::default()
    }

    /// 先取消所有标签，再激活所选标签的按钮与面板
    pub fn select(&mut self, tab: Tab) {
        for state in &mut self.states {
            *state = TabState::default();
        }
        self.states[tab as usize] = TabState {
            trigger_active: true,
            panel_active: true,
        };
    }

    pub fn select_id(&mut self, id: &str) -> Result<Tab> {
        let tab = Tab::from_id(id).ok_or_else(|| Error::validation(format!("Unknown tab: {id}")))?;
        self.select(tab);
        Ok(tab)
    }

    pub fn state(&self, tab: Tab) -> TabState {
        self.states[tab as usize]
    }

    pub fn is_active(&self, tab: Tab) -> bool {
        let state = self.state(tab);
        state.trigger_active && state.panel_active
    }

    pub fn active(&self) -> Tab {
        Tab::ALL
            .into_iter()
            .find(|&tab| self.is_active(tab))
            .unwrap_or(Tab::Keys)
    }
}
