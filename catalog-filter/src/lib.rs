use serde::Serialize;
use std::fmt::Display;
use wasm_bindgen::prelude::*;
use web_sys::console;

// 导出模块
pub mod builder;
pub mod cart;
pub mod error;
pub mod models;
pub mod predicate;
pub mod search;
pub mod session;
pub mod sort;
pub mod state;
pub mod view;

pub use builder::CatalogBuilder;
pub use cart::CartCounter;
pub use error::{CatalogError, CatalogResult};
pub use models::{CatalogIndex, CatalogView, Dimension, FilterParams, PriceBounds, SortMode};
pub use predicate::matches;
pub use session::CatalogSession;
pub use sort::{compare, sort_products};
pub use state::FilterState;
pub use utils_common::Product;
pub use view::recompute;

#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

/// 初始化函数 - 设置错误处理
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();
}

/// 版本信息
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

// 记录到浏览器控制台并转换为 JS 错误
fn js_error(context: &str, err: impl Display) -> JsValue {
    let message = format!("{}: {}", context, err);
    console::log_1(&JsValue::from_str(&message));
    JsValue::from_str(&message)
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| js_error("序列化结果失败", e))
}

/// 商品筛选器JS接口 - 每个实例持有一次页面浏览的筛选会话
#[wasm_bindgen]
pub struct CatalogFilterJS {
    session: CatalogSession,
}

#[wasm_bindgen]
impl CatalogFilterJS {
    /// 加载目录索引，使用默认价格范围 0..=500
    #[wasm_bindgen(constructor)]
    pub fn new(index_data: &[u8]) -> Result<CatalogFilterJS, JsValue> {
        Self::with_price_bounds(index_data, 0, 500)
    }

    /// 加载目录索引并指定价格滑块范围
    pub fn with_price_bounds(index_data: &[u8], min: i32, max: i32) -> Result<CatalogFilterJS, JsValue> {
        console_error_panic_hook::set_once();

        let index = CatalogIndex::from_compressed(index_data)
            .map_err(|e| js_error("初始化筛选器失败", e))?;
        let bounds = PriceBounds::new(i64::from(min), i64::from(max));

        Ok(CatalogFilterJS {
            session: CatalogSession::from_index(index, bounds),
        })
    }

    /// 勾选或取消某个筛选项，返回新的视图
    pub fn toggle(&mut self, dimension: &str, value: &str, selected: bool) -> Result<JsValue, JsValue> {
        self.session
            .toggle(dimension, value, selected)
            .map_err(|e| js_error("切换筛选失败", e))?;
        self.view()
    }

    pub fn set_min_price(&mut self, value: i32) -> Result<JsValue, JsValue> {
        self.session.set_min_price(i64::from(value));
        self.view()
    }

    pub fn set_max_price(&mut self, value: i32) -> Result<JsValue, JsValue> {
        self.session.set_max_price(i64::from(value));
        self.view()
    }

    pub fn set_sort_mode(&mut self, mode: &str) -> Result<JsValue, JsValue> {
        self.session
            .set_sort_mode(mode)
            .map_err(|e| js_error("设置排序失败", e))?;
        self.view()
    }

    pub fn set_search(&mut self, query: &str) -> Result<JsValue, JsValue> {
        self.session.set_search(query);
        self.view()
    }

    /// 一次性应用 JSON 格式的筛选参数
    pub fn apply_params(&mut self, params_json: &str) -> Result<JsValue, JsValue> {
        let params = FilterParams::from_json(params_json)
            .map_err(|e| js_error("解析参数失败", e))?;
        self.session
            .apply_params(&params)
            .map_err(|e| js_error("应用筛选失败", e))?;
        self.view()
    }

    /// 清除所有筛选
    pub fn reset(&mut self) -> Result<JsValue, JsValue> {
        self.session.reset();
        self.view()
    }

    pub fn view(&self) -> Result<JsValue, JsValue> {
        to_js(&self.session.view())
    }

    pub fn results_label(&self) -> String {
        self.session.view().results_label()
    }

    /// 当前筛选状态，用于同步页面上的控件
    pub fn filter_state(&self) -> Result<JsValue, JsValue> {
        to_js(self.session.state())
    }

    /// 获取某个维度的所有取值
    pub fn facet_values(&self, dimension: &str) -> Result<JsValue, JsValue> {
        let dimension = dimension
            .parse::<Dimension>()
            .map_err(|e| js_error("获取筛选项失败", e))?;
        to_js(&self.session.facet_values(dimension))
    }

    pub fn product_count(&self) -> usize {
        self.session.catalog().len()
    }
}

/// 购物车计数JS接口
#[wasm_bindgen]
pub struct CartCounterJS {
    inner: CartCounter,
}

#[wasm_bindgen]
impl CartCounterJS {
    /// 从页面当前显示的计数创建
    #[wasm_bindgen(constructor)]
    pub fn new(label: &str) -> CartCounterJS {
        CartCounterJS {
            inner: CartCounter::from_label(label),
        }
    }

    pub fn add_item(&mut self) -> u32 {
        self.inner.add_item()
    }

    pub fn count(&self) -> u32 {
        self.inner.count()
    }

    pub fn label(&self) -> String {
        self.inner.label()
    }
}
