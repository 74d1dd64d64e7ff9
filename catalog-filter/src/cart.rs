use serde::Serialize;

/// 购物车计数 - 本次浏览中加入购物车的商品数
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartCounter {
    count: u32,
}

impl CartCounter {
    pub fn new(count: u32) -> Self {
        Self { count }
    }

    /// 从页面上显示的计数恢复；无法解析时从 0 开始
    pub fn from_label(label: &str) -> Self {
        Self::new(parse_leading_int(label).unwrap_or(0))
    }

    /// 加入一件商品，返回新的计数
    pub fn add_item(&mut self) -> u32 {
        self.count = self.count.saturating_add(1);
        self.count
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn label(&self) -> String {
        self.count.to_string()
    }
}

// 只读取开头的整数部分，"3 items" -> 3
// 允许一个正负号：负数计为 0，超出范围取 u32::MAX
fn parse_leading_int(text: &str) -> Option<u32> {
    let text = text.trim_start();
    let (negative, rest) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..end];
    if digits.is_empty() {
        return None;
    }

    if negative {
        return Some(0);
    }
    Some(digits.parse().unwrap_or(u32::MAX))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_added_items() {
        let mut cart = CartCounter::default();
        assert_eq!(cart.add_item(), 1);
        assert_eq!(cart.add_item(), 2);
        assert_eq!(cart.label(), "2");
    }

    #[test]
    fn label_parsing_is_lenient() {
        assert_eq!(CartCounter::from_label(" 3").count(), 3);
        assert_eq!(CartCounter::from_label("7 items").count(), 7);
        assert_eq!(CartCounter::from_label("").count(), 0);
        assert_eq!(CartCounter::from_label("abc").count(), 0);
    }

    #[test]
    fn signed_labels_follow_leading_integer() {
        assert_eq!(CartCounter::from_label("+3").count(), 3);
        assert_eq!(CartCounter::from_label(" +12 in cart").count(), 12);
        assert_eq!(CartCounter::from_label("-3").count(), 0);
        assert_eq!(CartCounter::from_label("+").count(), 0);
        assert_eq!(CartCounter::from_label("- 3").count(), 0);
        assert_eq!(CartCounter::from_label("99999999999").count(), u32::MAX);

        let mut cart = CartCounter::from_label("+4");
        assert_eq!(cart.add_item(), 5);
    }

    #[test]
    fn saturates_at_max() {
        let mut cart = CartCounter::new(u32::MAX);
        assert_eq!(cart.add_item(), u32::MAX);
    }
}
