use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;
use utils_common::Product;

use crate::models::SortMode;

/// 按排序方式比较两个商品
pub fn compare(a: &Product, b: &Product, mode: SortMode) -> Ordering {
    match mode {
        SortMode::PriceLow => a.price.cmp(&b.price),
        SortMode::PriceHigh => b.price.cmp(&a.price),
        SortMode::Name => compare_names(&a.name, &b.name),
        SortMode::Newest => b.id.cmp(&a.id),
        SortMode::Featured => a.id.cmp(&b.id),
    }
}

// 忽略大小写和重音比较名称，只有这些差别的商品视为相等
fn compare_names(a: &str, b: &str) -> Ordering {
    collation_key(a).cmp(collation_key(b))
}

// 分解为 NFD 后去掉组合附加符号，再转小写："Éclair" -> "eclair"
fn collation_key(name: &str) -> impl Iterator<Item = char> + '_ {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// 稳定排序：键相同的商品保持原有相对顺序
pub fn sort_products(products: &mut [Product], mode: SortMode) {
    products.sort_by(|a, b| compare(a, b, mode));
}
