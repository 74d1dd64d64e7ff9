use utils_common::Product;

/// 规范化查询：去掉首尾空白并转小写
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase()
}

/// 名称或品牌包含查询词即为匹配，空查询匹配所有商品
pub fn matches_query(product: &Product, query: &str) -> bool {
    let query = normalize_query(query);
    if query.is_empty() {
        return true;
    }

    product.name.to_lowercase().contains(&query) || product.brand.to_lowercase().contains(&query)
}
