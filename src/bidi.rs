//! 双向文本包装 - 用于号码/句柄
//!
//! 电话号码和 SIP 地址不是自然语言文本，即使在从右到左的通知里也始终从左到右排列。

/// 从左到右嵌入
pub const LRE: char = '\u{202A}';
/// 结束方向嵌入
pub const PDF: char = '\u{202C}';
/// 从左到右标记
pub const LRM: char = '\u{200E}';
/// 从右到左标记
pub const RLM: char = '\u{200F}';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Ltr,
    Rtl,
}

/// 单个字符的强方向；数字、标点、空白等中性字符返回 `None`
fn strong_direction(c: char) -> Option<Direction> {
    let cp = c as u32;
    let rtl = matches!(cp,
        0x0590..=0x08FF      // Hebrew, Arabic, Syriac, Thaana, NKo, Samaritan
        | 0xFB1D..=0xFDFF    // Hebrew/Arabic presentation forms A
        | 0xFE70..=0xFEFF    // Arabic presentation forms B
        | 0x10800..=0x10FFF
        | 0x1E800..=0x1EFFF);
    if rtl {
        Some(Direction::Rtl)
    } else if c.is_alphabetic() {
        Some(Direction::Ltr)
    } else {
        None
    }
}

fn entry_direction(text: &str) -> Option<Direction> {
    text.chars().find_map(strong_direction)
}

fn exit_direction(text: &str) -> Option<Direction> {
    text.chars().rev().find_map(strong_direction)
}

/// 包装文本，使其在外部上下文中保持自身方向
#[derive(Debug, Clone, Copy, Default)]
pub struct BidiFormatter {
    rtl_context: bool,
}

impl BidiFormatter {
    pub fn new(rtl_context: bool) -> Self {
        Self { rtl_context }
    }

    pub fn is_rtl_context(&self) -> bool {
        self.rtl_context
    }

    /// 按 LTR 方向包装 `text`，并在两侧重置方向
    ///
    /// LTR 上下文：只有首/尾强字符为 RTL 时才在对应一侧加 LRM。
    /// RTL 上下文：用 LRE/PDF 嵌入，两侧加 RLM。
    pub fn unicode_wrap_ltr(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let mut out = String::with_capacity(text.len() + 8);

        if self.rtl_context {
            out.push(RLM);
            out.push(LRE);
            out.push_str(text);
            out.push(PDF);
            out.push(RLM);
            return out;
        }

        if entry_direction(text) == Some(Direction::Rtl) {
            out.push(LRM);
        }
        out.push_str(text);
        if exit_direction(text) == Some(Direction::Rtl) {
            out.push(LRM);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ltr_context_number_unchanged() {
        let bidi = BidiFormatter::new(false);
        assert_eq!(bidi.unicode_wrap_ltr("555-9999"), "555-9999");
        assert_eq!(bidi.unicode_wrap_ltr("alice@example.com"), "alice@example.com");
    }

    #[test]
    fn test_ltr_context_rtl_text_gets_marks() {
        let bidi = BidiFormatter::new(false);
        let wrapped = bidi.unicode_wrap_ltr("שלום");
        assert!(wrapped.starts_with(LRM));
        assert!(wrapped.ends_with(LRM));
    }

    #[test]
    fn test_rtl_context_embeds_ltr() {
        let bidi = BidiFormatter::new(true);
        let wrapped = bidi.unicode_wrap_ltr("555-9999");
        assert_eq!(wrapped, format!("{}{}555-9999{}{}", RLM, LRE, PDF, RLM));
    }

    #[test]
    fn test_empty() {
        assert_eq!(BidiFormatter::new(true).unicode_wrap_ltr(""), "");
        assert_eq!(BidiFormatter::new(false).unicode_wrap_ltr(""), "");
    }

    #[test]
    fn test_strong_direction() {
        assert_eq!(strong_direction('a'), Some(Direction::Ltr));
        assert_eq!(strong_direction('ب'), Some(Direction::Rtl));
        assert_eq!(strong_direction('5'), None);
        assert_eq!(strong_direction('-'), None);
    }
}
