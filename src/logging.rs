// ==========================================
// ログシステム初期化
// ==========================================
// tracing + tracing-subscriber を使用
// 環境変数によるログレベル設定に対応
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// ログシステムを初期化する
///
/// # 環境変数
/// - RUST_LOG: ログレベルフィルタ（デフォルト: info）
///   例: RUST_LOG=debug や RUST_LOG=ceramic_estimate=trace
///
/// # 例
/// ```no_run
/// use ceramic_estimate::logging;
/// logging::init();
/// ```
pub fn init() {
    // 環境変数からログレベルを読み取り、デフォルトは info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // ログ出力形式の設定
    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// テスト環境向けのログ初期化
///
/// デバッグしやすいよう詳細なログレベルを使う
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
