use std::collections::BTreeMap;
use tracing::debug;
use utils_common::Product;

use crate::builder::collect_facets;
use crate::error::CatalogResult;
use crate::models::{CatalogIndex, CatalogView, Dimension, Facets, FilterParams, PriceBounds, SortMode};
use crate::state::FilterState;
use crate::view::recompute;

/// 一次页面浏览的筛选会话
///
/// 持有不可变的商品目录、当前筛选状态和排序方式。所有修改都通过这里串行进行，
/// 每次修改后调用 [`CatalogSession::view`] 得到新的可见列表。
#[derive(Debug, Clone)]
pub struct CatalogSession {
    catalog: Vec<Product>,
    facets: Facets,
    state: FilterState,
    sort: SortMode,
}

impl CatalogSession {
    pub fn new(catalog: Vec<Product>) -> Self {
        Self::with_bounds(catalog, PriceBounds::default())
    }

    pub fn with_bounds(catalog: Vec<Product>, bounds: PriceBounds) -> Self {
        let facets = collect_facets(&catalog);
        Self {
            catalog,
            facets,
            state: FilterState::with_bounds(bounds),
            sort: SortMode::default(),
        }
    }

    pub fn from_index(index: CatalogIndex, bounds: PriceBounds) -> Self {
        Self {
            catalog: index.products,
            facets: index.facets,
            state: FilterState::with_bounds(bounds),
            sort: SortMode::default(),
        }
    }

    pub fn catalog(&self) -> &[Product] {
        &self.catalog
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort
    }

    /// 某个维度在目录中出现过的取值，按字典序
    pub fn facet_values(&self, dimension: Dimension) -> Vec<String> {
        self.facets
            .get(&dimension)
            .map(|counts| counts.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn facet_counts(&self, dimension: Dimension) -> BTreeMap<String, usize> {
        self.facets.get(&dimension).cloned().unwrap_or_default()
    }

    pub fn toggle(&mut self, dimension: &str, value: &str, selected: bool) -> CatalogResult<()> {
        self.state.toggle_named(dimension, value, selected)
    }

    pub fn set_min_price(&mut self, value: i64) {
        self.state.set_min_price(value);
    }

    pub fn set_max_price(&mut self, value: i64) {
        self.state.set_max_price(value);
    }

    pub fn set_sort_mode(&mut self, mode: &str) -> CatalogResult<()> {
        self.sort = mode.parse()?;
        Ok(())
    }

    pub fn set_search(&mut self, query: &str) {
        self.state.set_search(query);
    }

    /// 批量应用筛选参数
    ///
    /// 先校验排序方式，出错时状态保持不变。
    pub fn apply_params(&mut self, params: &FilterParams) -> CatalogResult<()> {
        let sort = params
            .sort
            .as_deref()
            .map(|mode| mode.parse::<SortMode>())
            .transpose()?;

        for (dimension, values) in params.selections() {
            if let Some(values) = values {
                self.state.replace_selection(dimension, values.iter().cloned());
            }
        }
        if let Some(min) = params.min_price {
            self.state.set_min_price(min);
        }
        if let Some(max) = params.max_price {
            self.state.set_max_price(max);
        }
        if let Some(query) = &params.search {
            self.state.set_search(query);
        }
        if let Some(sort) = sort {
            self.sort = sort;
        }

        Ok(())
    }

    /// 清除所有筛选并恢复默认排序
    pub fn reset(&mut self) {
        self.state.reset();
        self.sort = SortMode::default();
        debug!("catalog filters cleared");
    }

    pub fn view(&self) -> CatalogView {
        recompute(&self.catalog, &self.state, self.sort)
    }
}
