//! 链接生成层
//!
//! 题目结构位置与可导航链接之间的双向映射。

pub mod link;
pub mod route_table;

pub use link::{address_to_link, LinkCodec, LINK_PREFIX};
pub use route_table::{enumerate_all_addresses, NavigableQuestion, RouteTable};
