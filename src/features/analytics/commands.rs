/// API Server経由での分析コマンド
///
/// サブスクリプション一覧をAPIサーバーから取得し、クライアント側で集計して返す。
/// 分析用のサーバーサイドエンドポイントは存在しないため、集計はすべてローカルで行う。
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};

use crate::features::analytics::aggregator::{self, AlertWindow, PortfolioSummary, SkippedRecord};
use crate::features::subscriptions::models::Subscription;
use crate::features::subscriptions::renewal::{self, RenewalView};
use crate::shared::api_client::ApiClient;

/// サブスクリプション1件とその更新予定のペア
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriptionRenewal {
    pub subscription: Subscription,
    pub renewal: RenewalView,
}

/// 更新予定一覧のレスポンス
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenewalOverviewResponse {
    /// 更新予定を計算できたサブスクリプション
    pub items: Vec<SubscriptionRenewal>,
    /// 計算から除外されたレコード（理由付き）
    pub skipped: Vec<SkippedRecord>,
}

/// ポートフォリオ集計を取得する（API Server経由）
///
/// # 引数
/// * `alert_window` - 更新アラートの残り日数範囲（省略時は7〜15日）
/// * `session_token` - セッショントークン
///
/// # 戻り値
/// ポートフォリオ集計結果、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn fetch_portfolio_summary_via_api(
    alert_window: Option<AlertWindow>,
    session_token: Option<String>,
) -> Result<PortfolioSummary, String> {
    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverからサブスクリプション一覧を取得
    let subscriptions: Vec<Subscription> = api_client
        .get("/api/subscriptions", session_token.as_deref())
        .await
        .map_err(|e| format!("サブスクリプション一覧取得APIエラー: {e}"))?;

    // 現在時刻を基準にクライアント側で集計
    let summary = aggregator::aggregate(
        &subscriptions,
        Utc::now(),
        alert_window.unwrap_or_default(),
    );

    info!(
        "ポートフォリオ集計成功: active_count={} skipped={} upcoming={}",
        summary.active_count,
        summary.skipped.len(),
        summary.upcoming_renewals.len()
    );
    Ok(summary)
}

/// 全サブスクリプションの更新予定一覧を取得する（API Server経由）
///
/// # 引数
/// * `session_token` - セッショントークン
///
/// # 戻り値
/// 更新予定一覧（計算不能なレコードは理由付きで分離）、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn fetch_renewal_overview_via_api(
    session_token: Option<String>,
) -> Result<RenewalOverviewResponse, String> {
    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverからサブスクリプション一覧を取得
    let subscriptions: Vec<Subscription> = api_client
        .get("/api/subscriptions", session_token.as_deref())
        .await
        .map_err(|e| format!("サブスクリプション一覧取得APIエラー: {e}"))?;

    let as_of = Utc::now();
    let mut items = Vec::new();
    let mut skipped = Vec::new();

    // 不正なレコードは一覧全体を失敗させず、理由付きで分離する
    for subscription in subscriptions {
        match renewal::compute(&subscription, as_of) {
            Ok(view) => items.push(SubscriptionRenewal {
                subscription,
                renewal: view,
            }),
            Err(e) => skipped.push(SkippedRecord {
                id: subscription.id.clone(),
                app_name: subscription.app_name.clone(),
                reason: e.to_string(),
            }),
        }
    }

    info!(
        "更新予定一覧取得成功: items={} skipped={}",
        items.len(),
        skipped.len()
    );
    Ok(RenewalOverviewResponse { items, skipped })
}
