use catalog_filter::{compare, recompute, sort_products, Dimension, FilterState, Product, SortMode};
use proptest::prelude::*;
use std::cmp::Ordering;

const CATEGORIES: [&str; 3] = ["dresses", "shirts", "pants"];
const SIZES: [&str; 4] = ["S", "M", "L", "XL"];
const COLORS: [&str; 3] = ["blue", "white", "black"];
const BRANDS: [&str; 3] = ["EliteShop", "Premium", "Luxury"];
const MODES: [SortMode; 5] = [
    SortMode::PriceLow,
    SortMode::PriceHigh,
    SortMode::Name,
    SortMode::Newest,
    SortMode::Featured,
];

fn product_strategy() -> impl Strategy<Value = (String, usize, Vec<usize>, usize, usize, u32)> {
    (
        "[A-Za-z]{1,8}",
        0..CATEGORIES.len(),
        proptest::collection::vec(0..SIZES.len(), 0..3),
        0..COLORS.len(),
        0..BRANDS.len(),
        0u32..600,
    )
}

fn catalog_strategy() -> impl Strategy<Value = Vec<Product>> {
    proptest::collection::vec(product_strategy(), 0..24).prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(id, (name, category, sizes, color, brand, price))| {
                Product::new(id, name, CATEGORIES[category], price)
                    .with_sizes(sizes.into_iter().map(|s| SIZES[s]))
                    .with_color(COLORS[color])
                    .with_brand(BRANDS[brand])
            })
            .collect()
    })
}

fn filters_strategy() -> impl Strategy<Value = FilterState> {
    (
        proptest::collection::vec(0..CATEGORIES.len(), 0..3),
        proptest::collection::vec(0..SIZES.len(), 0..3),
        proptest::collection::vec(0..COLORS.len(), 0..3),
        proptest::collection::vec(0..BRANDS.len(), 0..3),
        0i64..600,
        0i64..600,
    )
        .prop_map(|(categories, sizes, colors, brands, min, max)| {
            let mut filters = FilterState::default();
            for c in categories {
                filters.toggle(Dimension::Category, CATEGORIES[c], true);
            }
            for s in sizes {
                filters.toggle(Dimension::Size, SIZES[s], true);
            }
            for c in colors {
                filters.toggle(Dimension::Color, COLORS[c], true);
            }
            for b in brands {
                filters.toggle(Dimension::Brand, BRANDS[b], true);
            }
            filters.set_min_price(min);
            filters.set_max_price(max);
            filters
        })
}

fn ids(products: &[Product]) -> Vec<usize> {
    products.iter().map(|p| p.id).collect()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    /// 默认筛选下返回完整目录且保持原始顺序
    #[test]
    fn default_filters_keep_catalog(catalog in catalog_strategy()) {
        let view = recompute(&catalog, &FilterState::default(), SortMode::Featured);
        let in_range: Vec<usize> = catalog.iter().filter(|p| p.price <= 500).map(|p| p.id).collect();
        prop_assert_eq!(view.ids(), in_range);
    }

    /// 增加限制不会让可见集合变大
    #[test]
    fn adding_a_constraint_never_grows_the_view(
        catalog in catalog_strategy(),
        filters in filters_strategy(),
        dim in 0..Dimension::ALL.len(),
        tag in 0..SIZES.len(),
    ) {
        let dimension = Dimension::ALL[dim];
        let value = match dimension {
            Dimension::Category => CATEGORIES[tag % CATEGORIES.len()],
            Dimension::Size => SIZES[tag],
            Dimension::Color => COLORS[tag % COLORS.len()],
            Dimension::Brand => BRANDS[tag % BRANDS.len()],
        };
        let before = recompute(&catalog, &filters, SortMode::Featured);

        let mut narrowed = filters.clone();
        if !narrowed.selected(dimension).is_empty() {
            narrowed.toggle(dimension, value, false);
            if narrowed.selected(dimension).is_empty() {
                return Ok(());
            }
        } else {
            narrowed.toggle(dimension, value, true);
        }
        let after = recompute(&catalog, &narrowed, SortMode::Featured);

        prop_assert!(after.ids().iter().all(|id| before.ids().contains(id)));
    }

    /// 去掉某个标签后，只靠该标签匹配的商品被移除
    #[test]
    fn removing_a_tag_removes_only_its_products(
        catalog in catalog_strategy(),
        keep in 0..COLORS.len(),
        drop in 0..COLORS.len(),
    ) {
        prop_assume!(keep != drop);
        let mut filters = FilterState::default();
        filters.toggle(Dimension::Color, COLORS[keep], true);
        filters.toggle(Dimension::Color, COLORS[drop], true);
        let before = recompute(&catalog, &filters, SortMode::Featured);

        filters.toggle(Dimension::Color, COLORS[drop], false);
        let after = recompute(&catalog, &filters, SortMode::Featured);

        let expected: Vec<usize> = before
            .visible
            .iter()
            .filter(|p| p.color != COLORS[drop])
            .map(|p| p.id)
            .collect();
        prop_assert_eq!(after.ids(), expected);
    }

    /// 价格区间始终满足 min <= max，最高价不会越过最低价
    #[test]
    fn price_handles_never_cross(v in -1000i64..1000, ops in proptest::collection::vec((any::<bool>(), -1000i64..1000), 0..16)) {
        let mut filters = FilterState::default();
        filters.set_min_price(v);
        filters.set_max_price(v - 1);
        prop_assert_eq!(filters.max_price(), v);

        for (is_min, value) in ops {
            if is_min {
                filters.set_min_price(value);
            } else {
                filters.set_max_price(value);
            }
            prop_assert!(filters.min_price() <= filters.max_price());
        }
    }

    /// 对已排序序列再次排序结果不变
    #[test]
    fn sorting_is_idempotent(catalog in catalog_strategy(), mode in 0..MODES.len()) {
        let mode = MODES[mode];
        let mut once = catalog.clone();
        sort_products(&mut once, mode);
        let mut twice = once.clone();
        sort_products(&mut twice, mode);
        prop_assert_eq!(ids(&once), ids(&twice));
    }

    /// 价格相同的商品保持输入中的相对顺序
    #[test]
    fn price_sort_is_stable(catalog in catalog_strategy(), shuffle_seed in any::<u64>()) {
        let mut input = catalog.clone();
        // 打乱输入顺序，确保稳定性不依赖 id 恰好有序
        let len = input.len();
        if len > 1 {
            input.rotate_left((shuffle_seed as usize) % len);
        }
        let mut sorted = input.clone();
        sort_products(&mut sorted, SortMode::PriceLow);

        for (i, a) in sorted.iter().enumerate() {
            for b in &sorted[i + 1..] {
                prop_assert!(a.price <= b.price);
                if a.price == b.price {
                    let pos_a = input.iter().position(|p| p.id == a.id).unwrap();
                    let pos_b = input.iter().position(|p| p.id == b.id).unwrap();
                    prop_assert!(pos_a < pos_b);
                }
            }
        }
    }

    /// 同样的输入得到同样的视图
    #[test]
    fn recompute_is_deterministic(catalog in catalog_strategy(), filters in filters_strategy(), mode in 0..MODES.len()) {
        let first = recompute(&catalog, &filters, MODES[mode]);
        let second = recompute(&catalog, &filters, MODES[mode]);
        prop_assert_eq!(first, second);
    }

    /// 视图中的每个商品都按排序方式有序，且数量与是否为空一致
    #[test]
    fn view_is_ordered_and_counted(catalog in catalog_strategy(), filters in filters_strategy(), mode in 0..MODES.len()) {
        let mode = MODES[mode];
        let view = recompute(&catalog, &filters, mode);

        prop_assert_eq!(view.count, view.visible.len());
        prop_assert_eq!(view.is_empty, view.visible.is_empty());
        for pair in view.visible.windows(2) {
            prop_assert_ne!(compare(&pair[0], &pair[1], mode), Ordering::Greater);
        }
    }
}
