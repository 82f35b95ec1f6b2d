use std::env;

fn main() {
    // ビルド時に環境変数を設定
    // 環境変数は外部（スクリプトや `pnpm tauri dev` 実行時の .env ファイル）から提供されることを前提とする
    // 開発環境（pnpm tauri dev）では .env ファイルが自動的に読み込まれる

    let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

    println!("cargo:rustc-env=ENVIRONMENT={}", environment);

    // API設定
    let api_server_url = env::var("API_SERVER_URL")
        .unwrap_or_else(|_| "https://subs-back.onrender.com".to_string());

    let api_timeout = env::var("API_TIMEOUT_SECONDS").unwrap_or_else(|_| "30".to_string());
    let api_max_retries = env::var("API_MAX_RETRIES").unwrap_or_else(|_| "3".to_string());

    println!("cargo:rustc-env=API_SERVER_URL={}", api_server_url);
    println!("cargo:rustc-env=API_TIMEOUT_SECONDS={}", api_timeout);
    println!("cargo:rustc-env=API_MAX_RETRIES={}", api_max_retries);

    // ログレベル
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    println!("cargo:rustc-env=LOG_LEVEL={}", log_level);

    tauri_build::build()
}
