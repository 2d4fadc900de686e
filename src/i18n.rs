// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库，翻译文件位于 locales/
// 作用范围: 列标题（ID 标记 / 序号列）、对话框标题、表头匹配警告
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// ==========================================

use tracing::warn;

/// 已提供翻译的语言
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 规范化语言代码；无翻译的语言回退到 "en"
///
/// 接受 "zh"、"zh_CN"、"ZH-cn" 等写法
pub fn resolve_locale(locale: &str) -> &'static str {
    let normalized = locale.trim().replace('_', "-").to_lowercase();
    if normalized == "zh" || normalized.starts_with("zh-") {
        return "zh-CN";
    }
    if normalized == "en" || normalized.starts_with("en-") {
        return "en";
    }
    warn!(locale, "不支持的语言，回退到 en");
    "en"
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码，经 resolve_locale 规范化
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(resolve_locale(locale));
}

/// 翻译消息（无参数）
///
/// # 示例
/// ```no_run
/// use import_preview::i18n::t;
/// let marker = t("preview.identifier");
/// ```
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// 翻译消息（带参数）
///
/// # 示例
/// ```no_run
/// use import_preview::i18n::t_with_args;
/// let title = t_with_args("preview.remap_title", &[("name", "Item Code")]);
/// ```
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
