use anyhow::{Context, Result};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use regex::Regex;
use std::collections::BTreeSet;
use tracing::warn;

use utils_common::Product;

const CARD_CLASS: &str = "product-card";
const NAME_CLASS: &str = "product-name";

/// 单个页面的提取结果
#[derive(Debug, Default)]
pub struct PageProducts {
    /// 按文档顺序排列的商品，id 暂为页面内序号
    pub products: Vec<Product>,
    /// 缺少名称或价格而被跳过的卡片数
    pub skipped: usize,
}

/// 商品卡片提取器
pub struct CardExtractor {
    price_pattern: Regex,
}

impl CardExtractor {
    pub fn new() -> Result<Self> {
        // 与浏览器 parseInt 一致：只取开头的整数部分
        let price_pattern = Regex::new(r"^\s*([+-]?\d+)").context("编译价格正则失败")?;
        Ok(Self { price_pattern })
    }

    /// 解析 HTML 并提取所有商品卡片
    pub fn extract_from_html(&self, html: &str) -> Result<PageProducts> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .context("解析HTML时出错")?;

        let mut cards = Vec::new();
        find_cards(&dom.document, &mut cards);

        let mut page = PageProducts::default();
        for card in cards {
            match self.card_to_product(&card, page.products.len()) {
                Some(product) => page.products.push(product),
                None => page.skipped += 1,
            }
        }
        Ok(page)
    }

    fn card_to_product(&self, card: &Handle, id: usize) -> Option<Product> {
        let name = find_class_text(card, NAME_CLASS).filter(|name| !name.is_empty());
        let Some(name) = name else {
            warn!("跳过缺少商品名称的卡片");
            return None;
        };

        let raw_price = attr(card, "data-price").unwrap_or_default();
        let Some(price) = self.parse_price(&raw_price) else {
            warn!(product = %name, price = %raw_price, "跳过价格无效的卡片");
            return None;
        };

        let sizes: BTreeSet<String> = attr(card, "data-size")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|size| !size.is_empty())
            .map(str::to_string)
            .collect();

        Some(Product {
            id,
            name,
            category: attr(card, "data-category").unwrap_or_default(),
            sizes,
            color: attr(card, "data-color").unwrap_or_default(),
            brand: attr(card, "data-brand").unwrap_or_default(),
            price,
        })
    }

    /// 负数或无法解析的价格返回 None
    pub fn parse_price(&self, raw: &str) -> Option<u32> {
        let captures = self.price_pattern.captures(raw)?;
        let value: i64 = captures[1].parse().ok()?;
        u32::try_from(value).ok()
    }
}

fn has_class(handle: &Handle, class: &str) -> bool {
    attr(handle, "class")
        .map(|value| value.split_whitespace().any(|c| c == class))
        .unwrap_or(false)
}

fn attr(handle: &Handle, attr_name: &str) -> Option<String> {
    match handle.data {
        NodeData::Element { ref attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|a| a.name.local.as_ref() == attr_name)
            .map(|a| a.value.trim().to_string()),
        _ => None,
    }
}

// 收集所有商品卡片，不进入卡片内部
fn find_cards(handle: &Handle, cards: &mut Vec<Handle>) {
    if has_class(handle, CARD_CLASS) {
        cards.push(handle.clone());
        return;
    }
    for child in handle.children.borrow().iter() {
        find_cards(child, cards);
    }
}

// 查找第一个带指定 class 的后代元素并返回其文本
fn find_class_text(handle: &Handle, class: &str) -> Option<String> {
    for child in handle.children.borrow().iter() {
        if has_class(child, class) {
            let mut text = String::new();
            extract_text_from_node(child, &mut text);
            return Some(text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
        if let Some(text) = find_class_text(child, class) {
            return Some(text);
        }
    }
    None
}

fn extract_text_from_node(handle: &Handle, text: &mut String) {
    match handle.data {
        NodeData::Text { ref contents } => {
            text.push_str(&contents.borrow());
            text.push(' ');
        }
        _ => {
            for child in handle.children.borrow().iter() {
                extract_text_from_node(child, text);
            }
        }
    }
}
