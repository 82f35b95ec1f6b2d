// 機能モジュール構造
pub mod features;
pub mod shared;

// 機能モジュールからコマンドをインポート
use features::{
    analytics::commands as analytics_commands, auth::commands as auth_commands,
    subscriptions::api_commands as subscription_api_commands,
};
use log::info;
use shared::config::environment::{
    initialize_logging_system, load_environment_variables, ApiConfig,
};

#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .setup(|_app| {
            // 環境に応じた.envファイルを読み込み（ログシステム初期化前に実行）
            load_environment_variables();

            // ログシステムを初期化（.envファイル読み込み後）
            initialize_logging_system();

            info!("アプリケーション初期化を開始します...");

            // API設定を読み込み・検証
            let api_config = ApiConfig::from_env();
            if let Err(e) = api_config.validate() {
                eprintln!("API設定の検証に失敗しました: {e}");
                return Err(format!("API設定の検証に失敗しました: {e}").into());
            }

            info!(
                "アプリケーション初期化が完了しました: api_server={}",
                api_config.base_url
            );

            Ok(())
        })
        .invoke_handler(tauri::generate_handler![
            // 認証コマンド
            auth_commands::register_user,
            auth_commands::login_user,
            // サブスクリプションコマンド（APIサーバー経由）
            subscription_api_commands::fetch_subscriptions_via_api,
            subscription_api_commands::create_subscription_via_api,
            subscription_api_commands::renew_subscription_via_api,
            subscription_api_commands::delete_subscription_via_api,
            // 分析コマンド
            analytics_commands::fetch_portfolio_summary_via_api,
            analytics_commands::fetch_renewal_overview_via_api,
        ])
        .run(tauri::generate_context!())
        .expect("Tauriアプリケーションの実行中にエラーが発生しました");
}
