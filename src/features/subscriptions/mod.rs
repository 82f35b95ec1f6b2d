/// サブスクリプション機能モジュール
///
/// このモジュールは、サブスクリプション管理に関連するすべての機能を提供します：
/// - APIサーバー経由でのサブスクリプションの取得、作成、更新（リニュー）、削除
/// - 契約期間の更新日・残り日数・経過率の計算（純粋関数）
pub mod api_commands;
pub mod models;
pub mod renewal;

// 公開インターフェース
pub use api_commands::{
    create_subscription_via_api, delete_subscription_via_api, fetch_subscriptions_via_api,
    renew_subscription_via_api,
};

pub use models::{CreateSubscriptionDto, Subscription};

pub use renewal::{compute, RenewalView};
