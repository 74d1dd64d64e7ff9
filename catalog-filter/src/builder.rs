use chrono::Utc;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::info;
use utils_common::{CatalogMetadata, PriceSpan, Product};

use crate::error::CatalogResult;
use crate::models::{CatalogIndex, Dimension, Facets};

/// 目录索引构建器
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    products: Vec<Product>,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按加载顺序加入商品，id 改写为加载顺序索引
    pub fn add_product(&mut self, mut product: Product) -> usize {
        let id = self.products.len();
        product.id = id;
        self.products.push(product);
        id
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// 构建目录索引，空目录也是合法的索引
    pub fn build_catalog_index(&self) -> CatalogIndex {
        let facets = collect_facets(&self.products);
        let facet_count: usize = facets.values().map(BTreeMap::len).sum();

        info!(
            products = self.products.len(),
            facets = facet_count,
            "built catalog index"
        );

        CatalogIndex {
            products: self.products.clone(),
            metadata: CatalogMetadata {
                product_count: self.products.len(),
                facet_count,
                price_span: PriceSpan::of(&self.products),
                created_at: Utc::now(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            facets,
        }
    }

    /// 保存目录索引到文件，返回写入的字节数
    pub fn save_catalog_index(&self, path: impl AsRef<Path>) -> CatalogResult<usize> {
        let path = path.as_ref();
        let data = self.build_catalog_index().to_compressed()?;
        fs::write(path, &data)?;

        info!(path = %path.display(), bytes = data.len(), "catalog index written");
        Ok(data.len())
    }
}

/// 统计每个维度出现的取值及对应的商品数量，忽略空标签
pub fn collect_facets(products: &[Product]) -> Facets {
    let mut facets: Facets = Dimension::ALL
        .iter()
        .map(|&dimension| (dimension, BTreeMap::new()))
        .collect();

    for product in products {
        for dimension in Dimension::ALL {
            let counts = facets.entry(dimension).or_default();
            for value in dimension.values_of(product) {
                if !value.is_empty() {
                    *counts.entry(value.to_string()).or_insert(0) += 1;
                }
            }
        }
    }

    facets
}
