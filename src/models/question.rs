use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::models::address::{is_valid_slug, Address};
use crate::models::question_type::QuestionType;

/// 题目内容（对导航引擎不透明，只由作答组件解读）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionContent {
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub prompt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub choices: Vec<String>,
    #[serde(default)]
    pub items: Vec<String>,
    #[serde(default = "default_required")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_selected: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_selected: Option<usize>,
}

fn default_required() -> bool {
    true
}

impl QuestionContent {
    /// 创建只有题干的题目内容
    pub fn new(question_type: QuestionType, prompt: impl Into<String>) -> Self {
        Self {
            question_type,
            prompt: prompt.into(),
            description: None,
            choices: Vec::new(),
            items: Vec::new(),
            required: true,
            max_length: None,
            min_selected: None,
            max_selected: None,
        }
    }

    pub fn with_choices(mut self, choices: &[&str]) -> Self {
        self.choices = choices.iter().map(|c| c.to_string()).collect();
        self
    }

    pub fn with_items(mut self, items: &[&str]) -> Self {
        self.items = items.iter().map(|c| c.to_string()).collect();
        self
    }

    /// 多选题实际生效的选择数量范围 `(最少, 最多)`
    ///
    /// 必答题默认至少选 1 个，最多默认为选项数量。
    pub fn selection_bounds(&self) -> (usize, usize) {
        let default_min = if self.required { 1 } else { 0 };
        (
            self.min_selected.unwrap_or(default_min),
            self.max_selected.unwrap_or(self.choices.len()),
        )
    }
}

/// 章节
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    pub slug: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub questions: Vec<QuestionContent>,
}

/// 题目目录：按顺序排列的全部章节
///
/// 构建后只读，整个进程共享。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// 解析后的题目
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Question {
    /// 稳定 ID，由结构位置推导
    pub id: String,
    pub section_slug: String,
    pub question_index: usize,
    #[serde(flatten)]
    pub content: QuestionContent,
}

impl Question {
    pub fn address(&self) -> Address {
        Address::new(self.section_slug.clone(), self.question_index)
    }

    pub fn question_type(&self) -> QuestionType {
        self.content.question_type
    }
}

impl Catalog {
    /// 从 TOML 文本解析并校验目录
    pub fn from_toml_str(content: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// 检查章节标识与各题型所需内容
    pub fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        for section in &self.sections {
            if !is_valid_slug(&section.slug) {
                return Err(CatalogError::InvalidSectionSlug {
                    slug: section.slug.clone(),
                });
            }
            if !seen.insert(section.slug.as_str()) {
                return Err(CatalogError::DuplicateSection {
                    slug: section.slug.clone(),
                });
            }
            for (index, question) in section.questions.iter().enumerate() {
                validate_content(&section.slug, index, question)?;
            }
        }
        Ok(())
    }

    /// 全部题目数量
    pub fn question_count(&self) -> usize {
        self.sections.iter().map(|s| s.questions.len()).sum()
    }

    pub fn section(&self, slug: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.slug == slug)
    }

    /// 章节显示序号（从1开始）
    pub fn section_display_index(&self, slug: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|s| s.slug == slug)
            .map(|i| i + 1)
    }

    /// 按地址查找题目内容
    pub fn content_at(&self, address: &Address) -> Option<&QuestionContent> {
        self.section(&address.section_slug)
            .and_then(|s| s.questions.get(address.question_index))
    }
}

fn validate_content(slug: &str, index: usize, question: &QuestionContent) -> Result<(), CatalogError> {
    let ty = question.question_type;
    if ty.needs_choices() && question.choices.is_empty() {
        return Err(CatalogError::invalid_content(slug, index, format!("{} 题必须提供 choices", ty)));
    }
    if ty == QuestionType::Prioritization && question.items.is_empty() {
        return Err(CatalogError::invalid_content(slug, index, "排序题必须提供 items"));
    }
    if ty == QuestionType::Checkboxes {
        let (min, max) = question.selection_bounds();
        if min > max {
            return Err(CatalogError::invalid_content(
                slug,
                index,
                format!("至少选择 {} 项却最多只能选择 {} 项", min, max),
            ));
        }
        if min > question.choices.len() {
            return Err(CatalogError::invalid_content(
                slug,
                index,
                format!("min_selected ({}) 超过选项数量 ({})", min, question.choices.len()),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
title = "แบบสอบถาม"

[[sections]]
slug = "s1"
title = "ข้อมูลทั่วไป"

[[sections.questions]]
type = "SHORT_ANSWER"
prompt = "ชื่อเล่น"

[[sections.questions]]
type = "MULTI_CHOICE"
prompt = "ช่วงอายุ"
choices = ["<20", "20-30", ">30"]

[[sections]]
slug = "empty"

[[sections]]
slug = "s2"

[[sections.questions]]
type = "PRIORITIZATION"
prompt = "เรียงลำดับ"
items = ["a", "b"]
required = false
"#;

    #[test]
    fn test_parse_sample_catalog() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        assert_eq!(catalog.sections.len(), 3);
        assert_eq!(catalog.question_count(), 3);
        assert!(catalog.sections[0].questions[0].required);
        assert!(!catalog.sections[2].questions[0].required);
        assert_eq!(
            catalog.sections[0].questions[1].question_type,
            QuestionType::MultiChoice
        );
    }

    #[test]
    fn test_section_display_index_is_one_based() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        assert_eq!(catalog.section_display_index("s1"), Some(1));
        assert_eq!(catalog.section_display_index("s2"), Some(3));
        assert_eq!(catalog.section_display_index("nope"), None);
    }

    #[test]
    fn test_unknown_type_tag_fails() {
        let bad = "[[sections]]\nslug = \"s1\"\n[[sections.questions]]\ntype = \"RATING\"\nprompt = \"x\"\n";
        let err = Catalog::from_toml_str(bad).unwrap_err();
        assert!(err.to_string().contains("RATING"));
    }

    #[test]
    fn test_duplicate_slug_fails() {
        let bad = "[[sections]]\nslug = \"s1\"\n[[sections]]\nslug = \"s1\"\n";
        assert!(matches!(
            Catalog::from_toml_str(bad),
            Err(CatalogError::DuplicateSection { .. })
        ));
    }

    #[test]
    fn test_choice_question_without_choices_fails() {
        let bad = "[[sections]]\nslug = \"s1\"\n[[sections.questions]]\ntype = \"CHECKBOXES\"\nprompt = \"x\"\n";
        assert!(matches!(
            Catalog::from_toml_str(bad),
            Err(CatalogError::InvalidContent { index: 0, .. })
        ));
    }

    #[test]
    fn test_content_at_missing_address() {
        let catalog = Catalog::from_toml_str(SAMPLE).unwrap();
        assert!(catalog.content_at(&Address::new("s1", 1)).is_some());
        assert!(catalog.content_at(&Address::new("s1", 2)).is_none());
        assert!(catalog.content_at(&Address::new("empty", 0)).is_none());
    }

    #[test]
    fn test_required_checkboxes_with_zero_max_fails() {
        let bad = "[[sections]]\nslug = \"s1\"\n[[sections.questions]]\ntype = \"CHECKBOXES\"\nprompt = \"x\"\nchoices = [\"a\", \"b\"]\nmax_selected = 0\n";
        assert!(matches!(
            Catalog::from_toml_str(bad),
            Err(CatalogError::InvalidContent { index: 0, .. })
        ));

        let optional = bad.replace("max_selected = 0", "max_selected = 0\nrequired = false");
        assert!(Catalog::from_toml_str(&optional).is_ok());
    }

    #[test]
    fn test_selection_bounds_defaults() {
        let content = QuestionContent::new(QuestionType::Checkboxes, "p").with_choices(&["a", "b", "c"]);
        assert_eq!(content.selection_bounds(), (1, 3));
        let mut optional = content.clone();
        optional.required = false;
        optional.max_selected = Some(2);
        assert_eq!(optional.selection_bounds(), (0, 2));
    }
}
