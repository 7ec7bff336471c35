//! 排序作答组件
//!
//! 每个待排序项目是一个独立的答案组，值为该项目的优先级（1 为最高）。
//! 答案组数量取决于题目内容，因此组名由题目 ID 与项目下标组成。

use serde_json::json;
use std::collections::BTreeSet;

use crate::engine::RespondingEvent;
use crate::error::RespondingError;
use crate::models::Question;
use crate::responding::{parse_one_based, ReportTracker, Responding};
use crate::store::SessionStore;

/// 项目答案组名（`#` 不会出现在题目 ID 中）
pub fn item_group(question_id: &str, item_index: usize) -> String {
    format!("{}#{}", question_id, item_index)
}

#[derive(Debug)]
pub struct PrioritizationResponding {
    question_id: String,
    items: Vec<String>,
    required: bool,
    tracker: ReportTracker,
}

impl PrioritizationResponding {
    pub fn new(question: &Question) -> Self {
        Self {
            question_id: question.id.clone(),
            items: question.content.items.clone(),
            required: question.content.required,
            tracker: ReportTracker::default(),
        }
    }

    fn ranks(&self, store: &SessionStore) -> Vec<Option<usize>> {
        (0..self.items.len())
            .map(|i| {
                store
                    .read_answer(&item_group(&self.question_id, i))
                    .and_then(|v| v.as_u64())
                    .map(|v| v as usize)
            })
            .collect()
    }

    /// 全部项目都有优先级且互不相同时有效；非必答题在完全未排序时也有效
    fn is_valid(&self, ranks: &[Option<usize>]) -> bool {
        if !self.required && ranks.iter().all(Option::is_none) {
            return true;
        }
        let n = self.items.len();
        let mut seen = BTreeSet::new();
        ranks.iter().all(|rank| match rank {
            Some(r) if (1..=n).contains(r) => seen.insert(*r),
            _ => false,
        })
    }
}

impl Responding for PrioritizationResponding {
    fn question_id(&self) -> &str {
        &self.question_id
    }

    fn groups(&self) -> BTreeSet<String> {
        (0..self.items.len())
            .map(|i| item_group(&self.question_id, i))
            .collect()
    }

    fn mount(&mut self, store: &SessionStore) -> Vec<RespondingEvent> {
        let valid = self.is_valid(&self.ranks(store));
        let groups = self.groups();
        self.tracker.on_mount(groups, valid)
    }

    /// 输入 `项目序号 优先级`，如 `2 1` 表示把第 2 项排在第 1 位
    fn respond(
        &mut self,
        input: &str,
        store: &mut SessionStore,
    ) -> Result<Vec<RespondingEvent>, RespondingError> {
        let tokens: Vec<&str> = input.split_whitespace().collect();
        let [item, rank] = tokens.as_slice() else {
            return Err(RespondingError::unparsable(input, "格式应为: 项目序号 优先级"));
        };
        let n = self.items.len();
        let item_index = parse_one_based(item, n)?;
        let rank = parse_one_based(rank, n)? + 1;

        store.write_answer(item_group(&self.question_id, item_index), json!(rank));

        let valid = self.is_valid(&self.ranks(store));
        Ok(self.tracker.on_change(valid))
    }

    fn render(&self, store: &SessionStore) -> String {
        self.items
            .iter()
            .zip(self.ranks(store))
            .enumerate()
            .map(|(i, (item, rank))| match rank {
                Some(r) => format!("  [{}] {}. {}", r, i + 1, item),
                None => format!("  [-] {}. {}", i + 1, item),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn input_hint(&self) -> &'static str {
        "输入 项目序号 优先级，如 2 1"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{QuestionContent, QuestionType};

    fn question(required: bool) -> Question {
        let mut content =
            QuestionContent::new(QuestionType::Prioritization, "p").with_items(&["cost", "speed", "safety"]);
        content.required = required;
        Question {
            id: "s2-0".to_string(),
            section_slug: "s2".to_string(),
            question_index: 0,
            content,
        }
    }

    #[test]
    fn test_registers_one_group_per_item() {
        let store = SessionStore::interactive();
        let mut widget = PrioritizationResponding::new(&question(true));
        let events = widget.mount(&store);
        assert_eq!(
            events[0],
            RespondingEvent::RegisteringGroups(BTreeSet::from([
                "s2-0#0".to_string(),
                "s2-0#1".to_string(),
                "s2-0#2".to_string(),
            ]))
        );
        assert_eq!(events[1], RespondingEvent::Validate(false));
    }

    #[test]
    fn test_valid_only_when_all_ranks_distinct() {
        let mut store = SessionStore::interactive();
        let mut widget = PrioritizationResponding::new(&question(true));
        widget.mount(&store);

        widget.respond("1 2", &mut store).unwrap();
        widget.respond("2 2", &mut store).unwrap();
        let events = widget.respond("3 1", &mut store).unwrap();
        assert!(events.is_empty());

        let events = widget.respond("2 3", &mut store).unwrap();
        assert_eq!(events, vec![RespondingEvent::Validate(true)]);
        assert_eq!(store.read_answer("s2-0#1"), Some(&json!(3)));
    }

    #[test]
    fn test_optional_is_valid_when_untouched() {
        let store = SessionStore::interactive();
        let mut widget = PrioritizationResponding::new(&question(false));
        assert!(widget.mount(&store).contains(&RespondingEvent::Validate(true)));
    }

    #[test]
    fn test_bad_input_shape() {
        let mut store = SessionStore::interactive();
        let mut widget = PrioritizationResponding::new(&question(true));
        widget.mount(&store);
        assert!(widget.respond("1", &mut store).is_err());
        assert!(widget.respond("1 2 3", &mut store).is_err());
        assert!(widget.respond("1 4", &mut store).is_err());
    }
}
