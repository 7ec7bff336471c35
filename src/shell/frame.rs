//! 导航外壳
//!
//! 标题、横幅与过渡方向。方向只以符号的形式交给渲染层。

use crate::models::Catalog;
use crate::routing::NavigableQuestion;

/// 过渡方向
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlideDirection {
    /// 首次显示，无方向
    None,
    Forward,
    Backward,
}

impl SlideDirection {
    pub fn from_direction(direction: i64) -> Self {
        match direction.signum() {
            1 => SlideDirection::Forward,
            -1 => SlideDirection::Backward,
            _ => SlideDirection::None,
        }
    }

    /// 新题目进入时的水平偏移符号：方向 >= 0 从右侧进入
    pub fn enter_sign(self) -> i32 {
        match self {
            SlideDirection::Backward => -1,
            _ => 1,
        }
    }

    /// 旧题目离开时的水平偏移符号：只有前进时向左离开
    pub fn exit_sign(self) -> i32 {
        match self {
            SlideDirection::Forward => -1,
            _ => 1,
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SlideDirection::None => "·",
            SlideDirection::Forward => "→",
            SlideDirection::Backward => "←",
        }
    }
}

/// 按模板生成章节标题，支持 `{index}` 与 `{title}`
pub fn section_title(template: &str, catalog: &Catalog, section_slug: &str) -> String {
    let index = catalog
        .section_display_index(section_slug)
        .map(|i| i.to_string())
        .unwrap_or_default();
    let title = catalog
        .section(section_slug)
        .map(|s| s.title.as_str())
        .unwrap_or_default();
    template.replace("{index}", &index).replace("{title}", title)
}

/// 整个问卷的横幅
pub fn banner(text: &str) -> String {
    let width = text.chars().count().max(20) + 8;
    format!("{}\n    {}\n{}", "=".repeat(width), text, "=".repeat(width))
}

/// 一帧外壳内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellFrame {
    pub title: String,
    pub question_id: String,
    pub direction: SlideDirection,
    pub progress: String,
    pub prompt: String,
    pub description: Option<String>,
}

impl ShellFrame {
    pub fn new(
        template: &str,
        catalog: &Catalog,
        view: &NavigableQuestion,
        total: usize,
        direction: i64,
    ) -> Self {
        let question = &view.question;
        Self {
            title: section_title(template, catalog, &question.section_slug),
            question_id: view.id.clone(),
            direction: SlideDirection::from_direction(direction),
            progress: format!("{}/{}", view.link_index + 1, total),
            prompt: question.content.prompt.clone(),
            description: question.content.description.clone(),
        }
    }

    pub fn render(&self) -> String {
        let mut out = format!(
            "{} {}  [{}]\n\n{}",
            self.direction.arrow(),
            self.title,
            self.progress,
            self.prompt
        );
        if let Some(description) = &self.description {
            out.push_str(&format!("\n{}", description));
        }
        out
    }
}
