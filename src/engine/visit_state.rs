//! 单次访问的临时状态
//!
//! 有效性与“本次访问是否编辑过”只属于当前显示的题目，
//! 题目身份变化时重置为初始值，其余情况下从不重置。

use crate::engine::event::RespondingEvent;

/// 作答有效性
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validity {
    /// 组件尚未报告（视同无效）
    #[default]
    Unvalidated,
    Valid,
    Invalid,
}

/// 编辑状态，进入 `EditedOnce` 后不会回退
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    #[default]
    NotEdited,
    EditedOnce,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitState {
    question_id: String,
    validity: Validity,
    edited: EditState,
}

impl VisitState {
    /// 进入新题目时的初始状态
    pub fn fresh(question_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            validity: Validity::default(),
            edited: EditState::default(),
        }
    }

    pub fn question_id(&self) -> &str {
        &self.question_id
    }

    pub fn validity(&self) -> Validity {
        self.validity
    }

    pub fn edited(&self) -> EditState {
        self.edited
    }

    pub fn is_responding_ok(&self) -> bool {
        self.validity == Validity::Valid
    }

    pub fn is_edited_once_this_visit(&self) -> bool {
        self.edited == EditState::EditedOnce
    }

    /// 应用一个事件；答案组登记不影响访问状态
    pub fn apply(&mut self, event: &RespondingEvent) {
        match event {
            RespondingEvent::Validate(true) => self.validity = Validity::Valid,
            RespondingEvent::Validate(false) => self.validity = Validity::Invalid,
            RespondingEvent::Edited => self.edited = EditState::EditedOnce,
            RespondingEvent::RegisteringGroups(_) => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_state_is_not_ok_and_not_edited() {
        let state = VisitState::fresh("s1-0");
        assert_eq!(state.validity(), Validity::Unvalidated);
        assert!(!state.is_responding_ok());
        assert!(!state.is_edited_once_this_visit());
    }

    #[test]
    fn test_validity_can_flip_any_number_of_times() {
        let mut state = VisitState::fresh("s1-0");
        state.apply(&RespondingEvent::Validate(true));
        assert!(state.is_responding_ok());
        state.apply(&RespondingEvent::Validate(false));
        assert_eq!(state.validity(), Validity::Invalid);
        state.apply(&RespondingEvent::Validate(true));
        assert!(state.is_responding_ok());
    }

    #[test]
    fn test_edited_is_sticky() {
        let mut state = VisitState::fresh("s1-0");
        state.apply(&RespondingEvent::Edited);
        state.apply(&RespondingEvent::Validate(false));
        state.apply(&RespondingEvent::Validate(true));
        assert!(state.is_edited_once_this_visit());
    }
}
