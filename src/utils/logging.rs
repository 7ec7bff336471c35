//! 日志工具模块
//!
//! 提供日志格式化和输出的辅助函数

use anyhow::Result;
use std::fs::{self, OpenOptions};
use std::io::Write;
use tracing::info;

/// 初始化会话日志文件
///
/// # 参数
/// - `log_file_path`: 日志文件路径
pub fn init_log_file(log_file_path: &str) -> Result<()> {
    let log_header = format!(
        "{}\n问卷会话日志 - {}\n{}\n\n",
        "=".repeat(60),
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        "=".repeat(60)
    );
    fs::write(log_file_path, log_header)?;
    Ok(())
}

/// 向会话日志追加一行（带时间）
pub fn append_log_line(log_file_path: &str, line: &str) -> Result<()> {
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_file_path)?;
    writeln!(
        file,
        "[{}] {}",
        chrono::Local::now().format("%H:%M:%S"),
        line
    )?;
    Ok(())
}

/// 记录程序启动信息
///
/// # 参数
/// - `catalog_path`: 题目目录路径
/// - `session_file`: 会话快照文件
pub fn log_startup(catalog_path: &str, session_file: Option<&str>) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 问卷作答模式");
    info!("📁 题目目录: {}", catalog_path);
    match session_file {
        Some(path) => info!("💾 会话快照: {}", path),
        None => info!("💾 会话快照: 未启用（仅内存）"),
    }
    info!("{}", "=".repeat(60));
}

/// 记录题目目录加载信息
///
/// # 参数
/// - `sections`: 章节数
/// - `questions`: 题目总数
pub fn log_catalog_loaded(sections: usize, questions: usize) {
    info!("✓ 共 {} 个章节, {} 道题", sections, questions);
}

/// 打印会话结束统计
///
/// # 参数
/// - `answered`: 已作答的答案组数量
/// - `finished`: 是否完成了最后一题
/// - `log_file_path`: 日志文件路径
pub fn print_final_stats(answered: usize, finished: bool, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 会话结束");
    info!(
        "结束时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已作答: {} 个答案组", answered);
    info!("{}", if finished { "🏁 问卷已完成" } else { "⏸️ 问卷未完成" });
    info!("{}", "=".repeat(60));
    info!("\n日志已保存至: {}", log_file_path);
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大长度
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text_counts_chars() {
        assert_eq!(truncate_text("สวัสดี", 3), "สวั...");
        assert_eq!(truncate_text("abc", 3), "abc");
    }

    #[test]
    fn test_log_file_header_and_lines() {
        let path = std::env::temp_dir().join(format!("questionnaire_flow_{}_session.log", std::process::id()));
        let path = path.to_string_lossy().to_string();
        init_log_file(&path).unwrap();
        append_log_line(&path, "visit s1-0").unwrap();
        let content = fs::read_to_string(&path).unwrap();
        assert!(content.starts_with(&"=".repeat(60)));
        assert!(content.contains("visit s1-0"));
        let _ = fs::remove_file(&path);
    }
}
