//! 答案存储 - 会话级
//!
//! 以“答案组”名称为键保存作答内容，并记录当前在屏幕上登记的答案组。
//! 普通导航不会清除任何内容，只有显式的重置事件会清空。

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::StoreError;

/// 答案内容，结构由作答组件决定
pub type AnswerValue = serde_json::Value;

/// 存储运行模式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// 有客户端会话，可读可写
    Interactive,
    /// 非交互渲染（如静态预渲染），读取一律为空，写入被忽略
    Prerender,
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    registered_groups: BTreeSet<String>,
    #[serde(default)]
    answers: BTreeMap<String, AnswerValue>,
}

/// 会话答案存储
///
/// 由会话创建并持有，以引用方式交给各个作答组件。
#[derive(Debug)]
pub struct SessionStore {
    mode: StoreMode,
    state: StoreState,
    snapshot_path: Option<PathBuf>,
}

impl SessionStore {
    /// 创建交互模式的空存储
    pub fn interactive() -> Self {
        Self::new(StoreMode::Interactive)
    }

    /// 创建预渲染模式的存储
    pub fn prerender() -> Self {
        Self::new(StoreMode::Prerender)
    }

    pub fn new(mode: StoreMode) -> Self {
        Self {
            mode,
            state: StoreState::default(),
            snapshot_path: None,
        }
    }

    /// 绑定快照文件；文件已存在时从中恢复
    pub fn with_snapshot(mut self, path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        if self.mode == StoreMode::Interactive && path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StoreError::ReadFailed {
                path: path.display().to_string(),
                source,
            })?;
            self.state = serde_json::from_str(&content)?;
            info!(
                "♻️ 已从 {} 恢复会话: {} 个答案, {} 个登记组",
                path.display(),
                self.state.answers.len(),
                self.state.registered_groups.len()
            );
        }
        self.snapshot_path = Some(path);
        Ok(self)
    }

    pub fn mode(&self) -> StoreMode {
        self.mode
    }

    /// 当前登记的答案组
    pub fn get_registered_groups(&self) -> BTreeSet<String> {
        match self.mode {
            StoreMode::Interactive => self.state.registered_groups.clone(),
            StoreMode::Prerender => BTreeSet::new(),
        }
    }

    /// 替换登记的答案组
    pub fn set_registered_groups(&mut self, groups: BTreeSet<String>) {
        if self.mode == StoreMode::Prerender {
            warn!("预渲染模式下忽略答案组登记");
            return;
        }
        debug!("登记答案组: {:?}", groups);
        self.state.registered_groups = groups;
    }

    /// 写入答案
    pub fn write_answer(&mut self, group: impl Into<String>, value: AnswerValue) {
        let group = group.into();
        if self.mode == StoreMode::Prerender {
            warn!("预渲染模式下忽略答案写入: {}", group);
            return;
        }
        debug!("写入答案: {} = {}", group, value);
        self.state.answers.insert(group, value);
    }

    /// 读取答案
    ///
    /// 从未作答时返回 `None`，与“作答为空”（如空字符串）区分开。
    pub fn read_answer(&self, group: &str) -> Option<&AnswerValue> {
        match self.mode {
            StoreMode::Interactive => self.state.answers.get(group),
            StoreMode::Prerender => None,
        }
    }

    /// 收集指定答案组中已作答的内容
    pub fn answers_for<'a>(
        &self,
        groups: impl IntoIterator<Item = &'a String>,
    ) -> BTreeMap<String, AnswerValue> {
        groups
            .into_iter()
            .filter_map(|g| self.read_answer(g).map(|v| (g.clone(), v.clone())))
            .collect()
    }

    pub fn answer_count(&self) -> usize {
        self.state.answers.len()
    }

    /// 显式重置：清空全部答案与登记组
    pub fn reset(&mut self) {
        info!(
            "🧹 重置会话存储: 清除 {} 个答案, {} 个登记组",
            self.state.answers.len(),
            self.state.registered_groups.len()
        );
        self.state = StoreState::default();
    }

    /// 写出快照（未配置快照文件时什么也不做）
    pub fn persist(&self) -> Result<(), StoreError> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };
        if self.mode == StoreMode::Prerender {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.state)?;
        fs::write(path, json).map_err(|source| StoreError::WriteFailed {
            path: path.display().to_string(),
            source,
        })?;
        debug!("会话快照已写入 {}", path.display());
        Ok(())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::interactive()
    }
}
