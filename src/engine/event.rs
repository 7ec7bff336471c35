use std::collections::BTreeSet;

/// 作答组件向上报告的事件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RespondingEvent {
    /// 当前作答是否有效
    Validate(bool),
    /// 组件当前拥有的全部答案组
    RegisteringGroups(BTreeSet<String>),
    /// 用户第一次修改了作答
    Edited,
}

/// 带题目身份的事件
///
/// 分发时按题目 ID 匹配，而不是按位置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaggedEvent {
    pub question_id: String,
    pub event: RespondingEvent,
}

impl TaggedEvent {
    pub fn new(question_id: impl Into<String>, event: RespondingEvent) -> Self {
        Self {
            question_id: question_id.into(),
            event,
        }
    }

    /// 给一批事件打上同一个题目 ID
    pub fn tag_all(question_id: &str, events: Vec<RespondingEvent>) -> Vec<TaggedEvent> {
        events
            .into_iter()
            .map(|event| TaggedEvent::new(question_id, event))
            .collect()
    }
}
