use serde::Serialize;
use std::collections::BTreeSet;

use crate::error::CatalogResult;
use crate::models::{Dimension, PriceBounds};

/// 当前筛选状态
///
/// 每个维度是一组已选标签，空集合表示该维度不做限制。
/// 价格区间始终满足 `min_price <= max_price`。
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FilterState {
    category: BTreeSet<String>,
    size: BTreeSet<String>,
    color: BTreeSet<String>,
    brand: BTreeSet<String>,
    min_price: i64,
    max_price: i64,
    search: String,
    #[serde(skip)]
    bounds: PriceBounds,
}

impl Default for FilterState {
    fn default() -> Self {
        Self::with_bounds(PriceBounds::default())
    }
}

impl FilterState {
    /// 以给定的滑块范围作为默认价格区间
    pub fn with_bounds(bounds: PriceBounds) -> Self {
        let bounds = bounds.normalized();
        Self {
            category: BTreeSet::new(),
            size: BTreeSet::new(),
            color: BTreeSet::new(),
            brand: BTreeSet::new(),
            min_price: bounds.min,
            max_price: bounds.max,
            search: String::new(),
            bounds,
        }
    }

    pub fn selected(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Category => &self.category,
            Dimension::Size => &self.size,
            Dimension::Color => &self.color,
            Dimension::Brand => &self.brand,
        }
    }

    fn selected_mut(&mut self, dimension: Dimension) -> &mut BTreeSet<String> {
        match dimension {
            Dimension::Category => &mut self.category,
            Dimension::Size => &mut self.size,
            Dimension::Color => &mut self.color,
            Dimension::Brand => &mut self.brand,
        }
    }

    pub fn min_price(&self) -> i64 {
        self.min_price
    }

    pub fn max_price(&self) -> i64 {
        self.max_price
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn bounds(&self) -> PriceBounds {
        self.bounds
    }

    /// 选中时加入标签，取消时移除；重复调用结果不变
    pub fn toggle(&mut self, dimension: Dimension, value: &str, selected: bool) {
        let set = self.selected_mut(dimension);
        if selected {
            if !set.contains(value) {
                set.insert(value.to_string());
            }
        } else {
            set.remove(value);
        }
    }

    /// 按维度名称切换，未知维度返回 InvalidArgument
    pub fn toggle_named(&mut self, dimension: &str, value: &str, selected: bool) -> CatalogResult<()> {
        let dimension = dimension.parse::<Dimension>()?;
        self.toggle(dimension, value, selected);
        Ok(())
    }

    /// 用一组标签整体替换某个维度的选择
    pub fn replace_selection<I, S>(&mut self, dimension: Dimension, values: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        *self.selected_mut(dimension) = values.into_iter().map(Into::into).collect();
    }

    /// 设置最低价；超过当前最高价时把最高价一起推到同一位置
    pub fn set_min_price(&mut self, value: i64) {
        self.min_price = value;
        if self.max_price < value {
            self.max_price = value;
        }
    }

    /// 设置最高价；低于当前最低价时停在最低价上
    pub fn set_max_price(&mut self, value: i64) {
        self.max_price = value.max(self.min_price);
    }

    pub fn set_search(&mut self, query: &str) {
        self.search = query.to_string();
    }

    /// 恢复默认状态（清除所有筛选）
    pub fn reset(&mut self) {
        *self = Self::with_bounds(self.bounds);
    }

    /// 没有任何有效限制时返回 true
    pub fn is_default(&self) -> bool {
        *self == Self::with_bounds(self.bounds)
    }
}
