//! 操作闸门
//!
//! 根据当前有效性决定能否前进；后退永远允许。
//! 前进与后退本身不写会话存储，作答早已由组件写入。

use serde::Serialize;
use std::collections::BTreeMap;
use tracing::{debug, warn};

use crate::routing::NavigableQuestion;
use crate::store::AnswerValue;

/// 前进操作的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateAction {
    /// 前往下一题
    Advance(String),
    /// 已是最后一题，完成问卷
    Finish,
    /// 当前作答无效，不允许前进
    Denied,
}

/// 只有当前作答有效时才能前进，与是否编辑过无关
pub fn can_advance(is_responding_ok: bool) -> bool {
    is_responding_ok
}

pub fn on_advance(view: &NavigableQuestion, is_responding_ok: bool) -> GateAction {
    if !can_advance(is_responding_ok) {
        warn!("⛔ 题目 {} 作答无效，不能前进", view.id);
        return GateAction::Denied;
    }
    match &view.next_question_link {
        Some(link) => {
            debug!("前进: {} -> {}", view.id, link);
            GateAction::Advance(link.clone())
        }
        None => GateAction::Finish,
    }
}

/// 后退：第一题没有上一题时返回 `None`
pub fn on_retreat(view: &NavigableQuestion) -> Option<String> {
    view.prev_question_link.clone()
}

/// 展示策略：用户动过输入且仍无效时才显示校验提示
pub fn show_validation_hint(is_edited_once: bool, is_responding_ok: bool) -> bool {
    is_edited_once && !is_responding_ok
}

/// 操作区的可见状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionsView {
    pub can_retreat: bool,
    pub can_advance: bool,
    pub is_last: bool,
    pub show_hint: bool,
}

impl ActionsView {
    pub fn new(view: &NavigableQuestion, is_responding_ok: bool, is_edited_once: bool) -> Self {
        Self {
            can_retreat: view.prev_question_link.is_some(),
            can_advance: can_advance(is_responding_ok),
            is_last: view.is_last(),
            show_hint: show_validation_hint(is_edited_once, is_responding_ok),
        }
    }
}

/// 问卷提交内容
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Submission {
    pub title: String,
    pub submitted_at: String,
    pub answers: BTreeMap<String, AnswerValue>,
}

impl Submission {
    pub fn new(title: impl Into<String>, answers: BTreeMap<String, AnswerValue>) -> Self {
        Self {
            title: title.into(),
            submitted_at: chrono::Local::now().to_rfc3339(),
            answers,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Question, QuestionContent, QuestionType};

    fn view(prev: Option<&str>, next: Option<&str>) -> NavigableQuestion {
        NavigableQuestion {
            id: "s1-1".to_string(),
            question: Question {
                id: "s1-1".to_string(),
                section_slug: "s1".to_string(),
                question_index: 1,
                content: QuestionContent::new(QuestionType::ShortAnswer, "p"),
            },
            link_index: 1,
            prev_question_link: prev.map(str::to_string),
            next_question_link: next.map(str::to_string),
        }
    }

    #[test]
    fn test_advance_requires_validity() {
        let v = view(Some("/questionnaires/s1/0"), Some("/questionnaires/s2/0"));
        assert_eq!(on_advance(&v, false), GateAction::Denied);
        assert_eq!(
            on_advance(&v, true),
            GateAction::Advance("/questionnaires/s2/0".to_string())
        );
    }

    #[test]
    fn test_last_question_finishes() {
        let v = view(Some("/questionnaires/s1/0"), None);
        assert_eq!(on_advance(&v, true), GateAction::Finish);
        assert_eq!(on_advance(&v, false), GateAction::Denied);
    }

    #[test]
    fn test_retreat_ignores_validity_and_stops_at_first() {
        assert_eq!(
            on_retreat(&view(Some("/questionnaires/s1/0"), None)).as_deref(),
            Some("/questionnaires/s1/0")
        );
        assert_eq!(on_retreat(&view(None, Some("/questionnaires/s1/1"))), None);
    }

    #[test]
    fn test_hint_only_after_edit() {
        assert!(!show_validation_hint(false, false));
        assert!(show_validation_hint(true, false));
        assert!(!show_validation_hint(true, true));
    }

    #[test]
    fn test_actions_view() {
        let v = view(None, Some("/questionnaires/s1/1"));
        let actions = ActionsView::new(&v, true, false);
        assert!(!actions.can_retreat);
        assert!(actions.can_advance);
        assert!(!actions.is_last);
        assert!(!actions.show_hint);
    }

    #[test]
    fn test_submission_serializes_answers() {
        let mut answers = BTreeMap::new();
        answers.insert("s1-0".to_string(), serde_json::json!("x"));
        let json = Submission::new("t", answers).to_json().unwrap();
        assert!(json.contains("\"s1-0\": \"x\""));
        assert!(json.contains("submitted_at"));
    }
}
