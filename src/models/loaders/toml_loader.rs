use crate::models::question::Catalog;
use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;

/// 从 TOML 文件加载题目目录
pub async fn load_catalog(toml_file_path: &Path) -> Result<Catalog> {
    let content = fs::read_to_string(toml_file_path)
        .await
        .with_context(|| format!("无法读取题目目录: {}", toml_file_path.display()))?;

    let catalog = Catalog::from_toml_str(&content)
        .with_context(|| format!("无法解析题目目录: {}", toml_file_path.display()))?;

    tracing::info!(
        "成功加载题目目录 '{}': {} 个章节, {} 道题",
        catalog.title,
        catalog.sections.len(),
        catalog.question_count()
    );

    Ok(catalog)
}
