//! 本地化模块
//!
//! 两种界面语言（英语、乌克兰语），键 → 显示字符串的查找，
//! 词典内嵌在二进制中。语言值持久化在配置里；
//! 首次启动（无持久化值）时根据系统区域设置推断。

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

/// 界面语言
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Language {
    /// 英语（默认）
    #[default]
    #[serde(rename = "en")]
    English,

    /// 乌克兰语
    #[serde(rename = "uk")]
    Ukrainian,
}

impl Language {
    /// 语言代码
    pub fn code(&self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Ukrainian => "uk",
        }
    }

    /// 规范化语言代码
    ///
    /// 去除空白、忽略大小写；不在支持集合内返回 None。
    pub fn normalize(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" => Some(Self::English),
            "uk" => Some(Self::Ukrainian),
            _ => None,
        }
    }

    /// 根据系统区域设置推断语言
    ///
    /// 区域以 `en` 开头取英语，其余一律取乌克兰语。
    pub fn from_system() -> Self {
        let locale = sys_locale::get_locale().unwrap_or_default().to_lowercase();
        if locale.starts_with("en") {
            Self::English
        } else {
            Self::Ukrainian
        }
    }
}

/// 内嵌的语言词典
fn dictionaries() -> &'static HashMap<Language, HashMap<String, String>> {
    static DICTIONARIES: OnceLock<HashMap<Language, HashMap<String, String>>> = OnceLock::new();

    DICTIONARIES.get_or_init(|| {
        let mut map = HashMap::new();
        map.insert(
            Language::English,
            parse_dictionary(include_str!("../../locales/en.json"), Language::English),
        );
        map.insert(
            Language::Ukrainian,
            parse_dictionary(include_str!("../../locales/uk.json"), Language::Ukrainian),
        );
        map
    })
}

/// 解析单个词典文件，失败时返回空词典（查找回退到调用方的兜底文案）
fn parse_dictionary(raw: &str, language: Language) -> HashMap<String, String> {
    match serde_json::from_str(raw) {
        Ok(dict) => dict,
        Err(e) => {
            tracing::warn!(
                language = language.code(),
                error = %e,
                "Locale dictionary is invalid, falling back to empty"
            );
            HashMap::new()
        }
    }
}

/// 查找词条
pub fn lookup(language: Language, key: &str) -> Option<&'static str> {
    dictionaries()
        .get(&language)
        .and_then(|dict| dict.get(key))
        .map(String::as_str)
}

/// 查找词条，缺失时使用兜底文案
pub fn translate(language: Language, key: &str, fallback: &str) -> String {
    lookup(language, key).unwrap_or(fallback).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(Language::normalize("en"), Some(Language::English));
        assert_eq!(Language::normalize("uk"), Some(Language::Ukrainian));
        assert_eq!(Language::normalize(" EN "), Some(Language::English));
        assert_eq!(Language::normalize("Uk"), Some(Language::Ukrainian));
        assert_eq!(Language::normalize("de"), None);
        assert_eq!(Language::normalize(""), None);
    }

    #[test]
    fn test_language_code_roundtrip() {
        for lang in [Language::English, Language::Ukrainian] {
            assert_eq!(Language::normalize(lang.code()), Some(lang));
        }
    }

    #[test]
    fn test_language_serde() {
        assert_eq!(
            serde_json::to_string(&Language::Ukrainian).unwrap(),
            "\"uk\""
        );
        let lang: Language = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(lang, Language::English);
    }

    #[test]
    fn test_both_dictionaries_parse() {
        for lang in [Language::English, Language::Ukrainian] {
            assert!(
                !dictionaries().get(&lang).unwrap().is_empty(),
                "dictionary for {} should not be empty",
                lang.code()
            );
        }
    }

    #[test]
    fn test_required_keys_present_in_both_locales() {
        let required = [
            "tray_tooltip",
            "tray_open",
            "tray_hide",
            "tray_quit",
            "unlock_hint",
        ];

        for lang in [Language::English, Language::Ukrainian] {
            for key in required {
                assert!(
                    lookup(lang, key).is_some(),
                    "key '{}' missing in locale '{}'",
                    key,
                    lang.code()
                );
            }
        }
    }

    #[test]
    fn test_translate_falls_back() {
        let text = translate(Language::English, "no_such_key", "fallback text");
        assert_eq!(text, "fallback text");

        let text = translate(Language::English, "tray_quit", "Quit");
        assert!(!text.is_empty());
    }

    #[test]
    fn test_locales_differ() {
        // 两种语言的词条确实不同（抽查退出菜单项）
        assert_ne!(
            lookup(Language::English, "tray_quit"),
            lookup(Language::Ukrainian, "tray_quit")
        );
    }
}
