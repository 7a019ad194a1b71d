//! 呼叫句柄 URI - `tel:` / `sip:` / `smsto:` 等不透明 URI
//!
//! 只区分 scheme 和 scheme-specific part，不做层级解析。

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

pub const SCHEME_TEL: &str = "tel";
pub const SCHEME_SIP: &str = "sip";
pub const SCHEME_SMSTO: &str = "smsto";

fn scheme_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9+.\-]*):(.*)$").unwrap())
}

/// 不透明 URI（句柄）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Uri {
    scheme: Option<String>,
    scheme_specific_part: String,
}

impl Uri {
    /// 解析 URI 字符串；没有 scheme 时整段视为 scheme-specific part
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        match scheme_regex().captures(s) {
            Some(caps) => Self {
                scheme: Some(caps[1].to_ascii_lowercase()),
                scheme_specific_part: caps[2].to_string(),
            },
            None => Self {
                scheme: None,
                scheme_specific_part: s.to_string(),
            },
        }
    }

    /// 由 scheme 和 scheme-specific part 组装
    pub fn from_parts(scheme: &str, scheme_specific_part: impl Into<String>) -> Self {
        Self {
            scheme: Some(scheme.to_ascii_lowercase()),
            scheme_specific_part: scheme_specific_part.into(),
        }
    }

    /// `tel:` 号码
    pub fn tel(number: impl Into<String>) -> Self {
        Self::from_parts(SCHEME_TEL, number)
    }

    pub fn scheme(&self) -> Option<&str> {
        self.scheme.as_deref()
    }

    pub fn scheme_specific_part(&self) -> &str {
        &self.scheme_specific_part
    }

    pub fn is_empty(&self) -> bool {
        self.scheme_specific_part.trim().is_empty()
    }

    /// 日志用的脱敏形式：保留 scheme 和末两位
    pub fn redacted(&self) -> String {
        let ssp: Vec<char> = self.scheme_specific_part.chars().collect();
        let masked = if ssp.len() <= 2 {
            "*".repeat(ssp.len())
        } else {
            let tail: String = ssp[ssp.len() - 2..].iter().collect();
            format!("{}{}", "*".repeat(ssp.len() - 2), tail)
        };
        match &self.scheme {
            Some(scheme) => format!("{}:{}", scheme, masked),
            None => masked,
        }
    }
}

impl fmt::Display for Uri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scheme {
            Some(scheme) => write!(f, "{}:{}", scheme, self.scheme_specific_part),
            None => write!(f, "{}", self.scheme_specific_part),
        }
    }
}

impl From<String> for Uri {
    fn from(s: String) -> Self {
        Uri::parse(&s)
    }
}

impl From<&str> for Uri {
    fn from(s: &str) -> Self {
        Uri::parse(s)
    }
}

impl From<Uri> for String {
    fn from(uri: Uri) -> Self {
        uri.to_string()
    }
}
