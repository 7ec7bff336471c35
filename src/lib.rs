//! # Questionnaire Flow
//!
//! 线性问卷的题目排序与导航状态引擎
//!
//! ## 架构设计
//!
//! ### ① 数据层（Models / Routing）
//! - `models/` - 题目目录（只读），从 TOML 加载
//! - `routing/` - 地址 ↔ 链接的双向映射，构建期生成全部静态路由
//!
//! ### ② 状态层（Store / Engine）
//! - `store/` - 会话级答案存储，按答案组保存作答
//! - `engine/` - 方向计算、单次访问状态、按题目身份分发事件
//!
//! ### ③ 组件层（Responding / Gate / Shell）
//! - `responding/` - 每种题型一个作答组件，统一的 `Responding` 能力
//! - `gate/` - 前进 / 后退闸门与提交内容
//! - `shell/` - 标题、横幅与过渡方向
//!
//! ### ④ 流程层（Workflow / App）
//! - `workflow/` - 一次完整的作答会话
//! - `app` - 终端驱动：读取命令，打印画面
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod engine;
pub mod error;
pub mod gate;
pub mod logger;
pub mod models;
pub mod responding;
pub mod routing;
pub mod shell;
pub mod store;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use app::App;
pub use config::Config;
pub use error::{AppError, AppResult, RouteError};
pub use models::{Address, Catalog, Question, QuestionType};
pub use routing::{NavigableQuestion, RouteTable};
pub use store::SessionStore;
pub use workflow::QuestionnaireSession;
