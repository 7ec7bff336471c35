//! 问卷会话 - 流程层
//!
//! 核心职责：把路由表、会话存储、导航引擎与作答组件串成一次完整的作答过程
//!
//! 一次导航的顺序：
//! 1. 链接 → 题目视图（关闭式失败）
//! 2. 导航引擎计算方向，并在题目身份变化时重置访问状态
//! 3. 挂载作答组件，分发它的初始事件（答案组登记 + 初始有效性）

use std::sync::Arc;
use tracing::{info, warn};

use crate::engine::{Dispatch, Navigator, TaggedEvent};
use crate::error::{AppResult, RespondingError};
use crate::gate::{self, ActionsView, GateAction, Submission};
use crate::responding::{responding_for, Responding};
use crate::routing::{NavigableQuestion, RouteTable};
use crate::shell::ShellFrame;
use crate::store::SessionStore;

/// 当前挂载的题目
struct Mounted {
    view: NavigableQuestion,
    widget: Box<dyn Responding>,
    frame: ShellFrame,
}

/// 一次输入的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputOutcome {
    pub is_responding_ok: bool,
    pub show_hint: bool,
}

/// 问卷会话
pub struct QuestionnaireSession {
    routes: Arc<RouteTable>,
    store: SessionStore,
    navigator: Navigator,
    current: Option<Mounted>,
    title_template: String,
}

impl QuestionnaireSession {
    /// 创建新的会话
    pub fn new(routes: Arc<RouteTable>, store: SessionStore, title_template: impl Into<String>) -> Self {
        Self {
            routes,
            store,
            navigator: Navigator::new(),
            current: None,
            title_template: title_template.into(),
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn current_view(&self) -> Option<&NavigableQuestion> {
        self.current.as_ref().map(|m| &m.view)
    }

    pub fn frame(&self) -> Option<&ShellFrame> {
        self.current.as_ref().map(|m| &m.frame)
    }

    pub fn is_responding_ok(&self) -> bool {
        self.navigator.is_responding_ok()
    }

    pub fn is_edited_once_this_visit(&self) -> bool {
        self.navigator.is_edited_once_this_visit()
    }

    /// 打开一个链接
    ///
    /// 导航状态与当前题目总是一起切换；快照写入失败时新题目仍然保持挂载。
    pub fn open(&mut self, link: &str) -> AppResult<&ShellFrame> {
        let view = self.routes.resolve(link)?;
        let transition = self.navigator.visit(&view);

        let mut widget = responding_for(&view.question);
        let events = widget.mount(&self.store);
        let events = TaggedEvent::tag_all(widget.question_id(), events);
        self.navigator.dispatch_all(&events, &mut self.store);

        let frame = ShellFrame::new(
            &self.title_template,
            self.routes.catalog(),
            &view,
            self.routes.len(),
            transition.direction,
        );
        self.current = Some(Mounted { view, widget, frame });

        self.store.persist()?;
        self.frame()
            .ok_or_else(|| RespondingError::NothingMounted.into())
    }

    /// 打开第一道题
    pub fn open_first(&mut self) -> AppResult<Option<&ShellFrame>> {
        let Some(link) = self.routes.first_link().map(str::to_string) else {
            warn!("⚠️ 题目目录为空，没有可打开的题目");
            return Ok(None);
        };
        self.open(&link).map(Some)
    }

    /// 把一次用户输入交给当前作答组件
    pub fn input(&mut self, text: &str) -> AppResult<InputOutcome> {
        let mounted = self.current.as_mut().ok_or(RespondingError::NothingMounted)?;
        let events = mounted.widget.respond(text, &mut self.store)?;
        let tagged = TaggedEvent::tag_all(mounted.widget.question_id(), events);
        self.navigator.dispatch_all(&tagged, &mut self.store);
        self.store.persist()?;

        let ok = self.navigator.is_responding_ok();
        Ok(InputOutcome {
            is_responding_ok: ok,
            show_hint: gate::show_validation_hint(self.navigator.is_edited_once_this_visit(), ok),
        })
    }

    /// 分发来自外部的事件（迟到的旧事件会被丢弃）
    pub fn dispatch(&mut self, event: &TaggedEvent) -> Dispatch {
        self.navigator.dispatch(event, &mut self.store)
    }

    /// 前进
    pub fn advance(&mut self) -> AppResult<GateAction> {
        let mounted = self.current.as_ref().ok_or(RespondingError::NothingMounted)?;
        let action = gate::on_advance(&mounted.view, self.navigator.is_responding_ok());
        match &action {
            GateAction::Advance(link) => {
                let link = link.clone();
                self.open(&link)?;
            }
            GateAction::Finish => info!("🏁 已到达最后一题，问卷完成"),
            GateAction::Denied => {}
        }
        Ok(action)
    }

    /// 后退；在第一题时返回 `false`
    pub fn retreat(&mut self) -> AppResult<bool> {
        let mounted = self.current.as_ref().ok_or(RespondingError::NothingMounted)?;
        match gate::on_retreat(&mounted.view) {
            Some(link) => {
                self.open(&link)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// 显式重置：清空存储，重新挂载当前题目
    pub fn reset(&mut self) -> AppResult<()> {
        self.store.reset();
        self.store.persist()?;
        self.navigator.unmount();

        let link = self
            .current
            .take()
            .and_then(|m| self.routes.static_paths().get(m.view.link_index).cloned());
        if let Some(link) = link {
            self.open(&link)?;
        }
        Ok(())
    }

    /// 操作区状态
    pub fn actions(&self) -> Option<ActionsView> {
        self.current.as_ref().map(|m| {
            ActionsView::new(
                &m.view,
                self.navigator.is_responding_ok(),
                self.navigator.is_edited_once_this_visit(),
            )
        })
    }

    /// 汇总整份问卷的作答
    pub fn submission(&self) -> AppResult<Submission> {
        let mut groups = Vec::new();
        for address in self.routes.addresses() {
            let question = self.routes.resolve_question(address)?;
            groups.extend(responding_for(&question).groups());
        }
        let answers = self.store.answers_for(&groups);
        Ok(Submission::new(self.routes.catalog().title.clone(), answers))
    }

    /// 渲染当前画面
    pub fn render(&self) -> String {
        let Some(mounted) = &self.current else {
            return "(没有正在显示的题目)".to_string();
        };
        let mut out = format!("{}\n{}", mounted.frame.render(), mounted.widget.render(&self.store));

        if let Some(actions) = self.actions() {
            if actions.show_hint {
                out.push_str("\n  ⚠️ 当前作答不完整");
            }
            let prev = if actions.can_retreat { ":prev" } else { "" };
            let next = match (actions.can_advance, actions.is_last) {
                (true, true) => ":next (完成)",
                (true, false) => ":next",
                (false, _) => "",
            };
            out.push_str(&format!(
                "\n\n  [{}] {} {}",
                mounted.widget.input_hint(),
                prev,
                next
            ));
        }
        out
    }
}
