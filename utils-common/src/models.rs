use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 商品记录 - 页面加载时从商品卡片读取的只读快照
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Product {
    /// 加载顺序索引，同时作为本次列表中的稳定标识
    pub id: usize,
    /// 商品名称，用于按名称排序和文本搜索
    pub name: String,
    /// 商品分类
    pub category: String,
    /// 可选尺码集合，一个商品可以同时满足多个尺码筛选
    #[serde(default)]
    pub sizes: BTreeSet<String>,
    /// 颜色
    pub color: String,
    /// 品牌
    pub brand: String,
    /// 价格（非负整数，整个目录使用同一货币单位）
    pub price: u32,
}

impl Product {
    /// 创建商品，尺码为空
    pub fn new(id: usize, name: impl Into<String>, category: impl Into<String>, price: u32) -> Self {
        Self {
            id,
            name: name.into(),
            category: category.into(),
            sizes: BTreeSet::new(),
            color: String::new(),
            brand: String::new(),
            price,
        }
    }

    pub fn with_sizes<I, S>(mut self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.sizes = sizes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }
}

/// 目录中出现的价格区间
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PriceSpan {
    pub min: u32,
    pub max: u32,
}

impl PriceSpan {
    /// 计算一组商品的价格区间，空目录返回 None
    pub fn of(products: &[Product]) -> Option<Self> {
        let min = products.iter().map(|p| p.price).min()?;
        let max = products.iter().map(|p| p.price).max()?;
        Some(Self { min, max })
    }
}

/// 目录元数据 - 存储目录索引的基本信息
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CatalogMetadata {
    /// 目录包含的商品数量
    pub product_count: usize,
    /// 所有维度下不同取值的总数
    pub facet_count: usize,
    /// 价格区间（空目录为 None）
    pub price_span: Option<PriceSpan>,
    /// 索引创建时间
    pub created_at: DateTime<Utc>,
    /// 索引版本
    pub version: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn price_span_covers_all_products() {
        let products = vec![
            Product::new(0, "Shirt", "shirts", 129),
            Product::new(1, "Dress", "dresses", 299),
            Product::new(2, "Scarf", "accessories", 49),
        ];

        assert_eq!(PriceSpan::of(&products), Some(PriceSpan { min: 49, max: 299 }));
        assert_eq!(PriceSpan::of(&[]), None);
    }

    #[test]
    fn builder_methods_fill_tags() {
        let product = Product::new(3, "Jacket", "jackets", 399)
            .with_sizes(["M", "L", "M"])
            .with_color("red")
            .with_brand("EliteShop");

        assert_eq!(product.sizes.len(), 2);
        assert!(product.sizes.contains("L"));
        assert_eq!(product.color, "red");
        assert_eq!(product.brand, "EliteShop");
    }
}
