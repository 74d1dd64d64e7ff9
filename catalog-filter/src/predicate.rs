use utils_common::Product;

use crate::models::Dimension;
use crate::search;
use crate::state::FilterState;

/// 判断商品是否满足当前筛选条件
///
/// 价格在 `[min_price, max_price]` 闭区间内，且每个非空维度至少有一个
/// 标签被选中（尺码是集合，取交集），并且满足文本搜索。
pub fn matches(product: &Product, filters: &FilterState) -> bool {
    let price = i64::from(product.price);
    if price < filters.min_price() || price > filters.max_price() {
        return false;
    }

    let dimensions_match = Dimension::ALL.iter().all(|&dimension| {
        let selected = filters.selected(dimension);
        selected.is_empty()
            || dimension
                .values_of(product)
                .any(|value| selected.contains(value))
    });

    dimensions_match && search::matches_query(product, filters.search())
}
