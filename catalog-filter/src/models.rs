use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use utils_common::compression as utils;
use utils_common::{CatalogMetadata, Product};

use crate::error::{CatalogError, CatalogResult};

/// 目录索引文件的格式版本
pub const CATALOG_INDEX_VERSION: [u8; 2] = [1, 0];

/// 筛选维度
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Category,
    Size,
    Color,
    Brand,
}

impl Dimension {
    pub const ALL: [Dimension; 4] = [
        Dimension::Category,
        Dimension::Size,
        Dimension::Color,
        Dimension::Brand,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Dimension::Category => "category",
            Dimension::Size => "size",
            Dimension::Color => "color",
            Dimension::Brand => "brand",
        }
    }

    /// 商品在该维度上的标签，不分配内存
    pub fn values_of(self, product: &Product) -> impl Iterator<Item = &str> + '_ {
        let (single, sizes) = match self {
            Dimension::Category => (Some(&product.category), None),
            Dimension::Size => (None, Some(product.sizes.iter())),
            Dimension::Color => (Some(&product.color), None),
            Dimension::Brand => (Some(&product.brand), None),
        };
        single
            .into_iter()
            .chain(sizes.into_iter().flatten())
            .map(String::as_str)
    }
}

impl FromStr for Dimension {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "category" => Ok(Dimension::Category),
            "size" => Ok(Dimension::Size),
            "color" => Ok(Dimension::Color),
            "brand" => Ok(Dimension::Brand),
            other => Err(CatalogError::invalid_argument(format!("未知的筛选维度: {other:?}"))),
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 排序方式，默认为 featured（原始目录顺序）
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortMode {
    PriceLow,
    PriceHigh,
    Name,
    Newest,
    #[default]
    Featured,
}

impl SortMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SortMode::PriceLow => "price-low",
            SortMode::PriceHigh => "price-high",
            SortMode::Name => "name",
            SortMode::Newest => "newest",
            SortMode::Featured => "featured",
        }
    }
}

impl FromStr for SortMode {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-low" => Ok(SortMode::PriceLow),
            "price-high" => Ok(SortMode::PriceHigh),
            "name" => Ok(SortMode::Name),
            "newest" => Ok(SortMode::Newest),
            "featured" => Ok(SortMode::Featured),
            other => Err(CatalogError::invalid_argument(format!("未知的排序方式: {other:?}"))),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 价格滑块范围，也是清除筛选后的默认价格区间
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceBounds {
    pub min: i64,
    pub max: i64,
}

impl PriceBounds {
    pub fn new(min: i64, max: i64) -> Self {
        Self { min, max }.normalized()
    }

    /// 保证 min <= max
    pub fn normalized(self) -> Self {
        if self.min <= self.max {
            self
        } else {
            Self { min: self.max, max: self.min }
        }
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        Self { min: 0, max: 500 }
    }
}

/// 筛选参数 - 客户端一次性提交的筛选条件
///
/// 缺省字段保持当前状态不变。
#[derive(Deserialize, Debug, Default, Clone)]
pub struct FilterParams {
    pub category: Option<Vec<String>>,
    pub size: Option<Vec<String>>,
    pub color: Option<Vec<String>>,
    pub brand: Option<Vec<String>>,
    #[serde(alias = "minPrice")]
    pub min_price: Option<i64>,
    #[serde(alias = "maxPrice")]
    pub max_price: Option<i64>,
    /// 排序方式: "price-low", "price-high", "name", "newest", "featured"
    pub sort: Option<String>,
    pub search: Option<String>,
}

impl FilterParams {
    pub fn from_json(json: &str) -> CatalogResult<Self> {
        serde_json::from_str(json)
            .map_err(|e| CatalogError::invalid_argument(format!("解析筛选参数失败: {e}")))
    }

    pub(crate) fn selections(&self) -> [(Dimension, Option<&Vec<String>>); 4] {
        [
            (Dimension::Category, self.category.as_ref()),
            (Dimension::Size, self.size.as_ref()),
            (Dimension::Color, self.color.as_ref()),
            (Dimension::Brand, self.brand.as_ref()),
        ]
    }
}

/// 重新计算后的视图 - 交给展示层渲染
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogView {
    /// 排序后的可见商品
    pub visible: Vec<Product>,
    /// 可见商品数量
    pub count: usize,
    /// 没有结果时为 true，展示层据此显示"无结果"提示
    pub is_empty: bool,
}

impl CatalogView {
    pub fn new(visible: Vec<Product>) -> Self {
        let count = visible.len();
        Self {
            visible,
            count,
            is_empty: count == 0,
        }
    }

    /// 结果数量文案，例如 "1 Product" / "12 Products"
    pub fn results_label(&self) -> String {
        let noun = if self.count == 1 { "Product" } else { "Products" };
        format!("{} {}", self.count, noun)
    }

    pub fn ids(&self) -> Vec<usize> {
        self.visible.iter().map(|p| p.id).collect()
    }
}

/// 维度 -> (取值 -> 商品数量)
pub type Facets = BTreeMap<Dimension, BTreeMap<String, usize>>;

/// 目录索引 - 商品列表、维度统计和元数据
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct CatalogIndex {
    /// 按加载顺序排列的商品
    pub products: Vec<Product>,
    /// 各维度出现的取值及数量
    pub facets: Facets,
    pub metadata: CatalogMetadata,
}

impl CatalogIndex {
    /// 从压缩的二进制数据恢复索引
    pub fn from_compressed(data: &[u8]) -> CatalogResult<Self> {
        Ok(utils::from_compressed_with_max_version(data, CATALOG_INDEX_VERSION[0])?)
    }

    pub fn to_compressed(&self) -> CatalogResult<Vec<u8>> {
        Ok(utils::to_compressed(self, CATALOG_INDEX_VERSION)?)
    }
}
