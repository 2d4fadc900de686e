// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 输出: stderr（stdout 留给导出的 CSV）
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 未设置 RUST_LOG 时的默认过滤器
const DEFAULT_FILTER: &str = "import_preview=info,warn";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: import_preview=info,warn）
///   例如: RUST_LOG=debug 或 RUST_LOG=import_preview=trace
///
/// # 示例
/// ```no_run
/// use import_preview::logging;
/// logging::init();
/// ```
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_target(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();
}

/// 以 JSON 格式初始化日志系统（供外围程序采集）
pub fn init_json() {
    fmt()
        .json()
        .with_current_span(true)
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .init();
}

/// 初始化测试环境的日志系统（可重复调用）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("import_preview=debug"))
        .with_test_writer()
        .try_init();
}
