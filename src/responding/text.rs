//! 文本作答组件（简答 / 长文本）

use serde_json::json;
use std::collections::BTreeSet;

use crate::engine::RespondingEvent;
use crate::error::RespondingError;
use crate::models::Question;
use crate::responding::{ReportTracker, Responding};
use crate::store::SessionStore;

/// 文本作答的共用部分：一个答案组，内容为字符串
#[derive(Debug)]
struct TextField {
    question_id: String,
    group: String,
    required: bool,
    max_length: Option<usize>,
    tracker: ReportTracker,
}

impl TextField {
    fn new(question: &Question) -> Self {
        Self {
            question_id: question.id.clone(),
            group: question.id.clone(),
            required: question.content.required,
            max_length: question.content.max_length,
            tracker: ReportTracker::default(),
        }
    }

    fn current<'a>(&self, store: &'a SessionStore) -> Option<&'a str> {
        store.read_answer(&self.group).and_then(|v| v.as_str())
    }

    fn is_valid(&self, text: Option<&str>) -> bool {
        let text = text.unwrap_or_default();
        if self.required && text.trim().is_empty() {
            return false;
        }
        self.max_length
            .map_or(true, |max| text.chars().count() <= max)
    }

    fn mount(&mut self, store: &SessionStore) -> Vec<RespondingEvent> {
        let valid = self.is_valid(self.current(store));
        self.tracker
            .on_mount(BTreeSet::from([self.group.clone()]), valid)
    }

    fn write(&mut self, text: String, store: &mut SessionStore) -> Vec<RespondingEvent> {
        let valid = self.is_valid(Some(text.as_str()));
        store.write_answer(self.group.clone(), json!(text));
        self.tracker.on_change(valid)
    }

    fn render(&self, store: &SessionStore) -> String {
        match self.current(store) {
            Some(text) if !text.is_empty() => format!("  答: {}", text.replace('\n', "\n      ")),
            Some(_) => "  答: (空)".to_string(),
            None => "  答: (未作答)".to_string(),
        }
    }
}

/// 简答
#[derive(Debug)]
pub struct ShortAnswerResponding {
    field: TextField,
}

impl ShortAnswerResponding {
    pub fn new(question: &Question) -> Self {
        Self {
            field: TextField::new(question),
        }
    }
}

impl Responding for ShortAnswerResponding {
    fn question_id(&self) -> &str {
        &self.field.question_id
    }

    fn groups(&self) -> BTreeSet<String> {
        BTreeSet::from([self.field.group.clone()])
    }

    fn mount(&mut self, store: &SessionStore) -> Vec<RespondingEvent> {
        self.field.mount(store)
    }

    fn respond(
        &mut self,
        input: &str,
        store: &mut SessionStore,
    ) -> Result<Vec<RespondingEvent>, RespondingError> {
        Ok(self.field.write(input.trim().to_string(), store))
    }

    fn render(&self, store: &SessionStore) -> String {
        self.field.render(store)
    }

    fn input_hint(&self) -> &'static str {
        "输入答案"
    }
}

/// 长文本作答
///
/// 输入中的 `\n` 会被换成换行符。
#[derive(Debug)]
pub struct LongAnswerResponding {
    field: TextField,
}

impl LongAnswerResponding {
    pub fn new(question: &Question) -> Self {
        Self {
            field: TextField::new(question),
        }
    }
}

impl Responding for LongAnswerResponding {
    fn question_id(&self) -> &str {
        &self.field.question_id
    }

    fn groups(&self) -> BTreeSet<String> {
        BTreeSet::from([self.field.group.clone()])
    }

    fn mount(&mut self, store: &SessionStore) -> Vec<RespondingEvent> {
        self.field.mount(store)
    }

    fn respond(
        &mut self,
        input: &str,
        store: &mut SessionStore,
    ) -> Result<Vec<RespondingEvent>, RespondingError> {
        let text = input.replace("\\n", "\n");
        Ok(self.field.write(text, store))
    }

    fn render(&self, store: &SessionStore) -> String {
        self.field.render(store)
    }

    fn input_hint(&self) -> &'static str {
        "输入答案（用 \\n 换行）"
    }
}
