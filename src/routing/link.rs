//! 链接编解码
//!
//! 链接格式是对外公开的永久地址，必须在不同构建之间保持稳定：
//! `/questionnaires/{sectionSlug}/{questionIndex}`

use regex::Regex;

use crate::error::{AppError, AppResult, RouteError};
use crate::models::Address;

/// 所有题目路由的公共前缀
pub const LINK_PREFIX: &str = "/questionnaires";

/// 地址 → 链接
pub fn address_to_link(address: &Address) -> String {
    format!(
        "{}/{}/{}",
        LINK_PREFIX, address.section_slug, address.question_index
    )
}

/// 链接解码器
///
/// 只接受规范形式：小写标识、无前导零的十进制序号、无多余的斜杠或查询串。
#[derive(Debug, Clone)]
pub struct LinkCodec {
    pattern: Regex,
}

impl LinkCodec {
    pub fn new() -> AppResult<Self> {
        let pattern = Regex::new(&format!(
            r"^{}/([a-z0-9]+(?:-[a-z0-9]+)*)/(0|[1-9][0-9]*)$",
            regex::escape(LINK_PREFIX)
        ))
        .map_err(|e| AppError::Other(format!("链接正则编译失败: {}", e)))?;
        Ok(Self { pattern })
    }

    /// 链接 → 地址（只检查格式，不检查是否在目录中）
    pub fn decode(&self, link: &str) -> Result<Address, RouteError> {
        let caps = self
            .pattern
            .captures(link)
            .ok_or_else(|| RouteError::invalid(link))?;

        let slug = &caps[1];
        let index = caps[2]
            .parse::<usize>()
            .map_err(|_| RouteError::invalid(link))?;

        Ok(Address::new(slug, index))
    }
}
