use anyhow::{Context, Result};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::gate::GateAction;
use crate::models::load_catalog;
use crate::routing::RouteTable;
use crate::shell::banner;
use crate::store::SessionStore;
use crate::utils::logging::{
    append_log_line, init_log_file, log_catalog_loaded, log_startup, print_final_stats, truncate_text,
};
use crate::workflow::QuestionnaireSession;

/// 终端命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 交给当前作答组件的输入
    Input(String),
    Next,
    Prev,
    Go(String),
    Reset,
    Routes,
    Quit,
    /// 无法识别的 `:` 命令，不会被当作作答
    Unknown(String),
}

impl Command {
    /// 以 `:` 开头的是命令，其余都是作答输入
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        let Some(command) = trimmed.strip_prefix(':') else {
            return Command::Input(line.to_string());
        };
        let mut parts = command.splitn(2, char::is_whitespace);
        match (parts.next().unwrap_or_default(), parts.next().map(str::trim)) {
            ("next" | "n", _) => Command::Next,
            ("prev" | "p", _) => Command::Prev,
            ("go", Some(link)) if !link.is_empty() => Command::Go(link.to_string()),
            ("reset", _) => Command::Reset,
            ("routes", _) => Command::Routes,
            ("quit" | "q", _) => Command::Quit,
            _ => Command::Unknown(trimmed.to_string()),
        }
    }
}

/// 一次运行的统计
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub visited: usize,
    pub finished: bool,
    pub answered: usize,
}

/// 应用主结构
pub struct App {
    config: Config,
    session: QuestionnaireSession,
}

impl App {
    /// 初始化应用
    pub async fn initialize(config: Config) -> Result<Self> {
        config.validate()?;
        init_log_file(&config.output_log_file)?;
        log_startup(&config.catalog_path, config.session_file.as_deref());

        let catalog = load_catalog(Path::new(&config.catalog_path)).await?;
        log_catalog_loaded(catalog.sections.len(), catalog.question_count());

        let routes = RouteTable::build(catalog)?;
        if config.verbose_logging {
            for link in routes.static_paths() {
                info!("  {}", link);
            }
        }

        let store = match &config.session_file {
            Some(path) => SessionStore::interactive()
                .with_snapshot(path)
                .with_context(|| format!("无法打开会话快照: {}", path))?,
            None => SessionStore::interactive(),
        };

        let session = QuestionnaireSession::new(routes, store, config.section_title_template.clone());

        Ok(Self { config, session })
    }

    pub fn session(&self) -> &QuestionnaireSession {
        &self.session
    }

    /// 运行应用主逻辑（从标准输入读取命令）
    pub async fn run(mut self) -> Result<()> {
        let stdin = BufReader::new(tokio::io::stdin());
        self.run_with(stdin).await?;
        Ok(())
    }

    /// 从任意输入源读取命令并驱动会话
    pub async fn run_with<R: AsyncBufRead + Unpin>(&mut self, reader: R) -> Result<RunSummary> {
        let mut summary = RunSummary::default();

        println!("{}", banner(&self.session.routes().catalog().title));
        if self.session.open_first()?.is_none() {
            warn!("⚠️ 没有可作答的题目，程序结束");
            return Ok(summary);
        }
        summary.visited += 1;
        self.log_visit()?;
        println!("\n{}", self.session.render());

        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            match Command::parse(&line) {
                Command::Quit => break,
                Command::Unknown(command) => {
                    warn!("⚠️ 未知命令: {}", command);
                    println!("  ⚠️ 未知命令 {}，可用: :next :prev :go <链接> :reset :routes :quit", command);
                }
                Command::Routes => {
                    for (i, link) in self.session.routes().static_paths().iter().enumerate() {
                        println!("  [{}] {}", i, link);
                    }
                }
                Command::Input(text) => match self.session.input(&text) {
                    Ok(_) => println!("\n{}", self.session.render()),
                    Err(AppError::Responding(e)) => println!("  ⚠️ {}", e),
                    Err(e) => return Err(e.into()),
                },
                Command::Next => match self.session.advance()? {
                    GateAction::Advance(_) => {
                        summary.visited += 1;
                        self.log_visit()?;
                        println!("\n{}", self.session.render());
                    }
                    GateAction::Denied => println!("  ⛔ 当前作答无效，不能前进"),
                    GateAction::Finish => {
                        self.finish()?;
                        summary.finished = true;
                        break;
                    }
                },
                Command::Prev => {
                    if self.session.retreat()? {
                        summary.visited += 1;
                        self.log_visit()?;
                        println!("\n{}", self.session.render());
                    } else {
                        println!("  已经是第一题");
                    }
                }
                Command::Go(link) => match self.session.open(&link) {
                    Ok(_) => {
                        summary.visited += 1;
                        self.log_visit()?;
                        println!("\n{}", self.session.render());
                    }
                    Err(AppError::Route(e)) => {
                        error!("404: {}", e);
                        println!("  404: {}", e);
                    }
                    Err(e) => return Err(e.into()),
                },
                Command::Reset => {
                    self.session.reset()?;
                    append_log_line(&self.config.output_log_file, "reset")?;
                    println!("\n{}", self.session.render());
                }
            }
        }

        summary.answered = self.session.store().answer_count();
        print_final_stats(summary.answered, summary.finished, &self.config.output_log_file);
        Ok(summary)
    }

    fn log_visit(&self) -> Result<()> {
        if let Some(view) = self.session.current_view() {
            let line = format!(
                "visit {} [{}] {}",
                view.id,
                view.link_index,
                truncate_text(&view.question.content.prompt, 40)
            );
            append_log_line(&self.config.output_log_file, &line)?;
        }
        Ok(())
    }

    fn finish(&self) -> Result<()> {
        let submission = self.session.submission()?;
        let json = submission.to_json()?;
        println!("\n{}", json);
        append_log_line(&self.config.output_log_file, &format!("submission\n{}", json))?;
        info!("🏁 问卷完成，共 {} 个答案组", submission.answers.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(":next"), Command::Next);
        assert_eq!(Command::parse(" :p "), Command::Prev);
        assert_eq!(
            Command::parse(":go /questionnaires/s1/0"),
            Command::Go("/questionnaires/s1/0".to_string())
        );
        assert_eq!(Command::parse(":reset"), Command::Reset);
        assert_eq!(Command::parse(":q"), Command::Quit);
        assert_eq!(Command::parse("hello world"), Command::Input("hello world".to_string()));
        assert_eq!(Command::parse(":go"), Command::Unknown(":go".to_string()));
        assert_eq!(Command::parse(" :nxt "), Command::Unknown(":nxt".to_string()));
    }
}
