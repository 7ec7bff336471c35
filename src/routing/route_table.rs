//! 路由表 - 构建期生成
//!
//! ## 职责
//!
//! 1. **枚举地址**：按章节顺序、章节内顺序展开全部题目地址
//! 2. **静态路由**：把每个地址编码为链接，作为唯一可访问的路由集合
//! 3. **解析**：链接 → 地址 → 题目 → 带前后链接的题目视图
//!
//! 链接序号 (`link_index`) 与静态路由生成时使用的是同一份列表，
//! 因此前后链接与实际发布的路由始终一致。

use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AppResult, RouteError};
use crate::models::{Address, Catalog, Question};
use crate::routing::link::{address_to_link, LinkCodec};

/// 带导航信息的题目视图
///
/// 每次导航都重新生成，不做持久化。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavigableQuestion {
    /// 渲染身份，用于过渡动画与访问状态重置
    pub id: String,
    pub question: Question,
    pub link_index: usize,
    pub prev_question_link: Option<String>,
    pub next_question_link: Option<String>,
}

impl NavigableQuestion {
    pub fn address(&self) -> Address {
        self.question.address()
    }

    pub fn is_first(&self) -> bool {
        self.prev_question_link.is_none()
    }

    pub fn is_last(&self) -> bool {
        self.next_question_link.is_none()
    }
}

/// 按规范遍历顺序列出目录中的所有地址
///
/// 空章节不贡献任何地址；重复地址只保留第一次出现。
pub fn enumerate_all_addresses(catalog: &Catalog) -> Vec<Address> {
    let mut seen = HashSet::new();
    catalog
        .sections
        .iter()
        .flat_map(|section| {
            (0..section.questions.len()).map(move |index| Address::new(section.slug.clone(), index))
        })
        .filter(|address| seen.insert(address.clone()))
        .collect()
}

/// 路由表
#[derive(Debug)]
pub struct RouteTable {
    catalog: Catalog,
    addresses: Vec<Address>,
    links: Vec<String>,
    index_by_link: HashMap<String, usize>,
    codec: LinkCodec,
}

impl RouteTable {
    /// 由目录构建路由表（只构建一次，之后只读共享）
    pub fn build(catalog: Catalog) -> AppResult<Arc<Self>> {
        catalog.validate()?;

        let addresses = enumerate_all_addresses(&catalog);
        let links: Vec<String> = addresses.iter().map(address_to_link).collect();
        let index_by_link = links
            .iter()
            .enumerate()
            .map(|(i, link)| (link.clone(), i))
            .collect();

        info!("🧭 路由表构建完成: 共 {} 个题目路由", links.len());
        for (i, link) in links.iter().enumerate() {
            debug!("  [{}] {}", i, link);
        }

        Ok(Arc::new(Self {
            catalog,
            addresses,
            links,
            index_by_link,
            codec: LinkCodec::new()?,
        }))
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 全部地址（规范顺序）
    pub fn addresses(&self) -> &[Address] {
        &self.addresses
    }

    /// 全部静态路由（规范顺序）
    pub fn static_paths(&self) -> &[String] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// 第一道题的链接
    pub fn first_link(&self) -> Option<&str> {
        self.links.first().map(String::as_str)
    }

    /// 链接 → 地址；不在目录中的地址同样视为无效地址
    pub fn link_to_address(&self, link: &str) -> Result<Address, RouteError> {
        let address = self.codec.decode(link)?;
        if self.index_by_link.contains_key(link) {
            Ok(address)
        } else {
            Err(RouteError::invalid(link))
        }
    }

    /// 地址在展开列表中的位置
    pub fn compute_link_index(&self, address: &Address) -> Result<usize, RouteError> {
        self.index_by_link
            .get(&address_to_link(address))
            .copied()
            .ok_or_else(|| RouteError::NotFound {
                slug: address.section_slug.clone(),
                index: address.question_index,
            })
    }

    /// 按地址查找题目
    pub fn resolve_question(&self, address: &Address) -> Result<Question, RouteError> {
        let content = self
            .catalog
            .content_at(address)
            .ok_or_else(|| RouteError::NotFound {
                slug: address.section_slug.clone(),
                index: address.question_index,
            })?;

        Ok(Question {
            id: address.question_id(),
            section_slug: address.section_slug.clone(),
            question_index: address.question_index,
            content: content.clone(),
        })
    }

    /// 为地址生成带前后链接的题目视图
    pub fn view_for(&self, address: &Address) -> Result<NavigableQuestion, RouteError> {
        let question = self.resolve_question(address)?;
        let link_index = self.compute_link_index(address)?;

        let prev_question_link = link_index
            .checked_sub(1)
            .and_then(|i| self.links.get(i))
            .cloned();
        let next_question_link = self.links.get(link_index + 1).cloned();

        Ok(NavigableQuestion {
            id: question.id.clone(),
            question,
            link_index,
            prev_question_link,
            next_question_link,
        })
    }

    /// 链接 → 题目视图
    pub fn resolve(&self, link: &str) -> Result<NavigableQuestion, RouteError> {
        let address = self.link_to_address(link)?;
        self.view_for(&address)
    }
}
