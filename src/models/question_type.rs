/// 题目类型
///
/// 每种类型对应一个作答组件，见 `responding` 模块。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    /// 简答
    ShortAnswer,
    /// 长文本作答
    LongAnswer,
    /// 单选
    MultiChoice,
    /// 多选
    Checkboxes,
    /// 排序（为每一项指定优先级）
    Prioritization,
}

/// 目录文件中的类型标签
static QUESTION_TYPE_TAGS: phf::Map<&'static str, QuestionType> = phf::phf_map! {
    "SHORT_ANSWER" => QuestionType::ShortAnswer,
    "LONG_ANSWER" => QuestionType::LongAnswer,
    "MULTI_CHOICE" => QuestionType::MultiChoice,
    "CHECKBOXES" => QuestionType::Checkboxes,
    "PRIORITIZATION" => QuestionType::Prioritization,
};

impl QuestionType {
    /// 从类型标签解析（精确匹配）
    pub fn from_tag(tag: &str) -> Option<Self> {
        QUESTION_TYPE_TAGS.get(tag).copied()
    }

    /// 获取类型标签
    pub fn tag(self) -> &'static str {
        match self {
            QuestionType::ShortAnswer => "SHORT_ANSWER",
            QuestionType::LongAnswer => "LONG_ANSWER",
            QuestionType::MultiChoice => "MULTI_CHOICE",
            QuestionType::Checkboxes => "CHECKBOXES",
            QuestionType::Prioritization => "PRIORITIZATION",
        }
    }

    /// 是否需要选项列表
    pub fn needs_choices(self) -> bool {
        matches!(self, QuestionType::MultiChoice | QuestionType::Checkboxes)
    }
}

impl std::fmt::Display for QuestionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

impl serde::Serialize for QuestionType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> serde::Deserialize<'de> for QuestionType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        use serde::de::Visitor;
        use std::fmt;

        struct TagVisitor;

        impl<'de> Visitor<'de> for TagVisitor {
            type Value = QuestionType;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a question type tag such as \"SHORT_ANSWER\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: serde::de::Error,
            {
                QuestionType::from_tag(value).ok_or_else(|| {
                    E::custom(crate::error::CatalogError::UnknownQuestionType {
                        tag: value.to_string(),
                    })
                })
            }
        }

        deserializer.deserialize_str(TagVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tag_maps_back_to_itself() {
        for ty in [
            QuestionType::ShortAnswer,
            QuestionType::LongAnswer,
            QuestionType::MultiChoice,
            QuestionType::Checkboxes,
            QuestionType::Prioritization,
        ] {
            assert_eq!(QuestionType::from_tag(ty.tag()), Some(ty));
        }
    }

    #[test]
    fn test_unknown_or_lowercase_tag_is_rejected() {
        assert_eq!(QuestionType::from_tag("short_answer"), None);
        assert_eq!(QuestionType::from_tag("RATING"), None);
    }
}
