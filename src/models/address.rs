//! 题目地址
//!
//! `(章节标识, 章节内序号)` 是题目在目录中的结构位置，也是路由与题目身份的来源。

use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// 题目结构地址
///
/// 两个地址相等，当且仅当章节标识与序号都相同。
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Address {
    /// 章节标识
    pub section_slug: String,
    /// 题目在章节中的序号（从0开始）
    pub question_index: usize,
}

impl Address {
    /// 创建新的地址
    pub fn new(section_slug: impl Into<String>, question_index: usize) -> Self {
        Self {
            section_slug: section_slug.into(),
            question_index,
        }
    }

    /// 由结构位置确定性地生成题目 ID
    ///
    /// 序号总在最后一个 `-` 之后，不同地址不会得到相同 ID。
    pub fn question_id(&self) -> String {
        format!("{}-{}", self.section_slug, self.question_index)
    }
}

impl Display for Address {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.section_slug, self.question_index)
    }
}

/// 章节标识是否合法：小写字母与数字，以单个 `-` 分隔
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .split('-')
            .all(|part| !part.is_empty() && part.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_id_is_derived_from_position() {
        assert_eq!(Address::new("s1", 0).question_id(), "s1-0");
        assert_eq!(Address::new("about-you", 12).question_id(), "about-you-12");
        assert_ne!(
            Address::new("a-1", 0).question_id(),
            Address::new("a", 10).question_id()
        );
    }

    #[test]
    fn test_slug_validation() {
        assert!(is_valid_slug("s1"));
        assert!(is_valid_slug("about-you"));
        assert!(!is_valid_slug(""));
        assert!(!is_valid_slug("About"));
        assert!(!is_valid_slug("a--b"));
        assert!(!is_valid_slug("-a"));
        assert!(!is_valid_slug("a/b"));
    }
}
