use tracing::debug;
use utils_common::Product;

use crate::models::{CatalogView, SortMode};
use crate::predicate::matches;
use crate::sort::sort_products;
use crate::state::FilterState;

/// 筛选并排序整个目录，得到可见商品、数量和是否为空
///
/// 纯函数：相同的输入总是得到相同的输出。
pub fn recompute(catalog: &[Product], filters: &FilterState, mode: SortMode) -> CatalogView {
    let mut visible: Vec<Product> = catalog
        .iter()
        .filter(|product| matches(product, filters))
        .cloned()
        .collect();

    sort_products(&mut visible, mode);

    debug!(
        catalog = catalog.len(),
        visible = visible.len(),
        sort = %mode,
        "recomputed catalog view"
    );

    CatalogView::new(visible)
}
