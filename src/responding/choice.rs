//! 选择题作答组件（单选 / 多选）
//!
//! 答案中保存的是从0开始的选项下标；输入与显示使用从1开始的序号。

use serde_json::json;
use std::collections::BTreeSet;

use crate::engine::RespondingEvent;
use crate::error::RespondingError;
use crate::models::Question;
use crate::responding::{parse_one_based, ReportTracker, Responding};
use crate::store::SessionStore;

fn render_choices(choices: &[String], selected: &BTreeSet<usize>, multi: bool) -> String {
    choices
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let mark = match (multi, selected.contains(&i)) {
                (false, true) => "(•)",
                (false, false) => "( )",
                (true, true) => "[x]",
                (true, false) => "[ ]",
            };
            format!("  {} {}. {}", mark, i + 1, choice)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// 单选
#[derive(Debug)]
pub struct MultiChoiceResponding {
    question_id: String,
    choices: Vec<String>,
    required: bool,
    tracker: ReportTracker,
}

impl MultiChoiceResponding {
    pub fn new(question: &Question) -> Self {
        Self {
            question_id: question.id.clone(),
            choices: question.content.choices.clone(),
            required: question.content.required,
            tracker: ReportTracker::default(),
        }
    }

    fn selected(&self, store: &SessionStore) -> Option<usize> {
        store
            .read_answer(&self.question_id)
            .and_then(|v| v.as_u64())
            .map(|v| v as usize)
            .filter(|i| *i < self.choices.len())
    }

    fn is_valid(&self, selected: Option<usize>) -> bool {
        selected.is_some() || !self.required
    }
}

impl Responding for MultiChoiceResponding {
    fn question_id(&self) -> &str {
        &self.question_id
    }

    fn groups(&self) -> BTreeSet<String> {
        BTreeSet::from([self.question_id.clone()])
    }

    fn mount(&mut self, store: &SessionStore) -> Vec<RespondingEvent> {
        let valid = self.is_valid(self.selected(store));
        let groups = self.groups();
        self.tracker.on_mount(groups, valid)
    }

    fn respond(
        &mut self,
        input: &str,
        store: &mut SessionStore,
    ) -> Result<Vec<RespondingEvent>, RespondingError> {
        let index = parse_one_based(input, self.choices.len())?;
        store.write_answer(self.question_id.clone(), json!(index));
        let valid = self.is_valid(Some(index));
        Ok(self.tracker.on_change(valid))
    }

    fn render(&self, store: &SessionStore) -> String {
        let selected: BTreeSet<usize> = self.selected(store).into_iter().collect();
        render_choices(&self.choices, &selected, false)
    }

    fn input_hint(&self) -> &'static str {
        "输入选项序号"
    }
}

/// 多选
///
/// 每次输入切换一个或多个选项（逗号或空格分隔）。
#[derive(Debug)]
pub struct CheckboxesResponding {
    question_id: String,
    choices: Vec<String>,
    min_selected: usize,
    max_selected: usize,
    tracker: ReportTracker,
}

impl CheckboxesResponding {
    pub fn new(question: &Question) -> Self {
        let (min_selected, max_selected) = question.content.selection_bounds();
        Self {
            question_id: question.id.clone(),
            choices: question.content.choices.clone(),
            min_selected,
            max_selected,
            tracker: ReportTracker::default(),
        }
    }

    fn selected(&self, store: &SessionStore) -> BTreeSet<usize> {
        store
            .read_answer(&self.question_id)
            .and_then(|v| v.as_array())
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_u64())
                    .map(|v| v as usize)
                    .filter(|i| *i < self.choices.len())
                    .collect()
            })
            .unwrap_or_default()
    }

    fn is_valid(&self, selected: &BTreeSet<usize>) -> bool {
        (self.min_selected..=self.max_selected).contains(&selected.len())
    }
}

impl Responding for CheckboxesResponding {
    fn question_id(&self) -> &str {
        &self.question_id
    }

    fn groups(&self) -> BTreeSet<String> {
        BTreeSet::from([self.question_id.clone()])
    }

    fn mount(&mut self, store: &SessionStore) -> Vec<RespondingEvent> {
        let valid = self.is_valid(&self.selected(store));
        let groups = self.groups();
        self.tracker.on_mount(groups, valid)
    }

    fn respond(
        &mut self,
        input: &str,
        store: &mut SessionStore,
    ) -> Result<Vec<RespondingEvent>, RespondingError> {
        let toggles = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|t| !t.is_empty())
            .map(|t| parse_one_based(t, self.choices.len()))
            .collect::<Result<BTreeSet<_>, _>>()?;
        if toggles.is_empty() {
            return Err(RespondingError::unparsable(input, "至少需要一个选项序号"));
        }

        let mut selected = self.selected(store);
        for index in toggles {
            if !selected.remove(&index) {
                selected.insert(index);
            }
        }

        let valid = self.is_valid(&selected);
        store.write_answer(
            self.question_id.clone(),
            json!(selected.iter().collect::<Vec<_>>()),
        );
        Ok(self.tracker.on_change(valid))
    }

    fn render(&self, store: &SessionStore) -> String {
        render_choices(&self.choices, &self.selected(store), true)
    }

    fn input_hint(&self) -> &'static str {
        "输入要切换的选项序号，如 1,3"
    }
}
