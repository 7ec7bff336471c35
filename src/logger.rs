use tracing_subscriber::EnvFilter;

/// 初始化日志（`RUST_LOG` 优先，否则按 verbose 选择 debug / info）
///
/// 重复调用是安全的，测试中可以随意调用。
pub fn init_with(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 使用默认级别初始化日志
pub fn init() {
    init_with(false);
}
