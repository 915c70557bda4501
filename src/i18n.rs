use std::sync::OnceLock;
use std::sync::RwLock;

/// Supported languages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    English,
    Chinese,
}

impl Language {
    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Chinese => "zh",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::English => "English",
            Language::Chinese => "中文",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code.to_lowercase().as_str() {
            "zh" | "zh-cn" | "zh-tw" | "chinese" => Language::Chinese,
            _ => Language::English,
        }
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Global language state
fn language_store() -> &'static RwLock<Language> {
    static STORE: OnceLock<RwLock<Language>> = OnceLock::new();
    STORE.get_or_init(|| {
        // Keep unit tests deterministic regardless of the host locale.
        let lang = if cfg!(test) {
            Language::English
        } else {
            Language::Chinese
        };
        RwLock::new(lang)
    })
}

/// Get current language
pub fn current_language() -> Language {
    *language_store().read().expect("Failed to read language")
}

/// Set current language (the host passes its locale on panel startup)
pub fn set_language(lang: Language) {
    let mut guard = language_store().write().expect("Failed to write language");
    *guard = lang;
}

/// Check if current language is Chinese
pub fn is_chinese() -> bool {
    current_language() == Language::Chinese
}

/// Get localized text based on current language
#[macro_export]
macro_rules! t {
    ($en:expr, $zh:expr) => {
        if $crate::i18n::is_chinese() {
            $zh
        } else {
            $en
        }
    };
}

// Re-export for convenience
pub use t;

// ============================================================================
// Common UI Texts
// ============================================================================

pub mod texts {
    use super::is_chinese;

    // ============================================
    // WORKFLOW ERRORS (工作流错误)
    // ============================================

    pub fn load_failed() -> &'static str {
        if is_chinese() {
            "加载失败"
        } else {
            "Failed to load settings"
        }
    }

    pub fn submit_failed() -> &'static str {
        if is_chinese() {
            "提交失败"
        } else {
            "Failed to save settings"
        }
    }

    pub fn fetch_failed() -> &'static str {
        if is_chinese() {
            "获取失败"
        } else {
            "Failed to fetch models"
        }
    }

    pub fn models_not_found() -> &'static str {
        if is_chinese() {
            "未找到默认模型"
        } else {
            "No default models found"
        }
    }

    pub fn base_url_required() -> &'static str {
        if is_chinese() {
            "请先填写 Base URL"
        } else {
            "Please fill in the Base URL first"
        }
    }

    pub fn admin_only() -> &'static str {
        if is_chinese() {
            "仅管理员可配置助手。"
        } else {
            "Only administrators can configure assistants."
        }
    }

    pub fn bot_unsupported() -> &'static str {
        if is_chinese() {
            "该助手暂不支持配置。"
        } else {
            "This assistant does not support configuration."
        }
    }

    pub fn bot_not_found() -> &'static str {
        if is_chinese() {
            "未找到助手信息"
        } else {
            "Assistant not found"
        }
    }

    pub fn bot_unavailable() -> &'static str {
        if is_chinese() {
            "助手暂未开启"
        } else {
            "Assistant is not enabled"
        }
    }

    // ============================================
    // WORKFLOW SUCCESS (工作流成功)
    // ============================================

    pub fn save_success() -> &'static str {
        if is_chinese() {
            "修改成功"
        } else {
            "Settings saved"
        }
    }

    pub fn fetch_success() -> &'static str {
        if is_chinese() {
            "获取成功"
        } else {
            "Models fetched"
        }
    }

    // ============================================
    // FIELD HELP (字段说明)
    // ============================================

    pub fn tip_prefix() -> &'static str {
        if is_chinese() {
            "获取方式"
        } else {
            "Get it from"
        }
    }
}
