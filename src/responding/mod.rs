//! 作答组件层
//!
//! ## 职责
//!
//! 每种题型一个组件，统一实现 [`Responding`]：
//! - 挂载时从会话存储恢复作答，登记答案组并报告初始有效性
//! - 处理用户输入，写入会话存储，报告有效性变化与首次编辑
//!
//! 导航引擎不关心组件内部，只消费它们产生的 [`RespondingEvent`]。

pub mod choice;
pub mod prioritization;
pub mod text;

use std::collections::BTreeSet;

use crate::engine::RespondingEvent;
use crate::error::RespondingError;
use crate::models::{Question, QuestionType};
use crate::store::SessionStore;

pub use choice::{CheckboxesResponding, MultiChoiceResponding};
pub use prioritization::PrioritizationResponding;
pub use text::{LongAnswerResponding, ShortAnswerResponding};

/// 作答组件的统一能力
pub trait Responding {
    /// 所属题目 ID
    fn question_id(&self) -> &str;

    /// 组件拥有的全部答案组
    fn groups(&self) -> BTreeSet<String>;

    /// 挂载：登记答案组，并根据已恢复的作答报告初始有效性
    fn mount(&mut self, store: &SessionStore) -> Vec<RespondingEvent>;

    /// 处理一次用户输入
    fn respond(
        &mut self,
        input: &str,
        store: &mut SessionStore,
    ) -> Result<Vec<RespondingEvent>, RespondingError>;

    /// 文本形式的当前作答
    fn render(&self, store: &SessionStore) -> String;

    /// 输入提示
    fn input_hint(&self) -> &'static str;
}

/// 按题型选择作答组件
pub fn responding_for(question: &Question) -> Box<dyn Responding> {
    match question.question_type() {
        QuestionType::ShortAnswer => Box::new(ShortAnswerResponding::new(question)),
        QuestionType::LongAnswer => Box::new(LongAnswerResponding::new(question)),
        QuestionType::MultiChoice => Box::new(MultiChoiceResponding::new(question)),
        QuestionType::Checkboxes => Box::new(CheckboxesResponding::new(question)),
        QuestionType::Prioritization => Box::new(PrioritizationResponding::new(question)),
    }
}

/// 有效性与编辑的上报记录
///
/// 有效性只在变化时上报（挂载时必报一次）；编辑只上报第一次。
#[derive(Debug, Default)]
pub(crate) struct ReportTracker {
    last_validity: Option<bool>,
    edited: bool,
}

impl ReportTracker {
    pub(crate) fn on_mount(&mut self, groups: BTreeSet<String>, valid: bool) -> Vec<RespondingEvent> {
        self.last_validity = Some(valid);
        vec![
            RespondingEvent::RegisteringGroups(groups),
            RespondingEvent::Validate(valid),
        ]
    }

    pub(crate) fn on_change(&mut self, valid: bool) -> Vec<RespondingEvent> {
        let mut events = Vec::new();
        if !self.edited {
            self.edited = true;
            events.push(RespondingEvent::Edited);
        }
        if self.last_validity != Some(valid) {
            self.last_validity = Some(valid);
            events.push(RespondingEvent::Validate(valid));
        }
        events
    }
}

/// 解析从1开始的序号
pub(crate) fn parse_one_based(token: &str, max: usize) -> Result<usize, RespondingError> {
    let n: usize = token
        .trim()
        .parse()
        .map_err(|_| RespondingError::unparsable(token, "需要一个数字序号"))?;
    if n == 0 || n > max {
        return Err(RespondingError::IndexOutOfRange { index: n, max });
    }
    Ok(n - 1)
}
