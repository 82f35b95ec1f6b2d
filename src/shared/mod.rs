/// 共有モジュール
///
/// 機能モジュール間で共有されるコード（APIクライアント、設定、エラー型）を提供します。
pub mod api_client;
pub mod config;
pub mod errors;
