//! 导航状态引擎
//!
//! ## 职责
//!
//! 1. **方向**：比较本次与上一次显示题目的链接序号
//! 2. **访问状态**：题目身份变化时重置有效性与编辑标记
//! 3. **事件分发**：按题目 ID 分发作答事件，丢弃已卸载题目的迟到事件
//!
//! 所有状态变化都是同步、逐个处理的，不需要加锁。

use tracing::{debug, info};

use crate::engine::event::{RespondingEvent, TaggedEvent};
use crate::engine::visit_state::VisitState;
use crate::routing::NavigableQuestion;
use crate::store::SessionStore;

/// 计算过渡方向
///
/// 没有上一次显示的题目时为 0；否则为序号之差。只有符号有意义。
pub fn compute_direction(current_link_index: usize, previous_link_index: Option<usize>) -> i64 {
    match previous_link_index {
        Some(previous) => current_link_index as i64 - previous as i64,
        None => 0,
    }
}

/// 一次导航产生的过渡
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub direction: i64,
    /// 本次导航是否重置了访问状态
    pub reset: bool,
}

/// 事件分发结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Applied,
    /// 事件属于已不在显示中的题目，被丢弃
    Stale,
}

/// 导航状态引擎
#[derive(Debug, Default)]
pub struct Navigator {
    previous_link_index: Option<usize>,
    visit: Option<VisitState>,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 显示一道题
    ///
    /// 先完成访问状态的重置，再返回过渡信息，因此新题目的任何事件都晚于重置。
    pub fn visit(&mut self, view: &NavigableQuestion) -> Transition {
        let direction = compute_direction(view.link_index, self.previous_link_index);
        self.previous_link_index = Some(view.link_index);

        let reset = self
            .visit
            .as_ref()
            .map_or(true, |state| state.question_id() != view.id);
        if reset {
            self.visit = Some(VisitState::fresh(view.id.clone()));
        }

        info!(
            "➡️ 显示题目 {} (序号 {}, 方向 {})",
            view.id, view.link_index, direction
        );

        Transition { direction, reset }
    }

    /// 分发一个作答事件
    ///
    /// 答案组登记写入会话存储；有效性与编辑事件写入访问状态。
    pub fn dispatch(&mut self, tagged: &TaggedEvent, store: &mut SessionStore) -> Dispatch {
        let Some(state) = self.visit.as_mut() else {
            debug!("没有显示中的题目，丢弃事件 {:?}", tagged);
            return Dispatch::Stale;
        };

        if state.question_id() != tagged.question_id {
            debug!(
                "丢弃过期事件: 来自 {}, 当前为 {}",
                tagged.question_id,
                state.question_id()
            );
            return Dispatch::Stale;
        }

        if let RespondingEvent::RegisteringGroups(groups) = &tagged.event {
            store.set_registered_groups(groups.clone());
        }
        state.apply(&tagged.event);

        Dispatch::Applied
    }

    /// 依次分发一批事件，返回被应用的数量
    pub fn dispatch_all(&mut self, events: &[TaggedEvent], store: &mut SessionStore) -> usize {
        events
            .iter()
            .filter(|e| self.dispatch(e, store) == Dispatch::Applied)
            .count()
    }

    pub fn visit_state(&self) -> Option<&VisitState> {
        self.visit.as_ref()
    }

    pub fn current_question_id(&self) -> Option<&str> {
        self.visit.as_ref().map(VisitState::question_id)
    }

    pub fn is_responding_ok(&self) -> bool {
        self.visit.as_ref().is_some_and(VisitState::is_responding_ok)
    }

    pub fn is_edited_once_this_visit(&self) -> bool {
        self.visit
            .as_ref()
            .is_some_and(VisitState::is_edited_once_this_visit)
    }

    /// 卸载当前题目，丢弃访问状态（保留方向历史）
    pub fn unmount(&mut self) {
        self.visit = None;
    }
}
