/// API Server経由でのサブスクリプション操作コマンド
///
/// サブスクリプションの永続化はすべてAPIサーバー側で行われ、
/// このモジュールはREST呼び出しを仲介するだけです。
use crate::features::subscriptions::models::{CreateSubscriptionDto, Subscription};
use crate::shared::api_client::ApiClient;
use log::info;

/// サブスクリプション一覧を取得する（API Server経由）
///
/// # 引数
/// * `session_token` - セッショントークン
///
/// # 戻り値
/// サブスクリプション一覧、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn fetch_subscriptions_via_api(
    session_token: Option<String>,
) -> Result<Vec<Subscription>, String> {
    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverにサブスクリプション一覧取得リクエストを送信
    // バックエンドはエンベロープなしのJSON配列を返す
    let subscriptions: Vec<Subscription> = api_client
        .get("/api/subscriptions", session_token.as_deref())
        .await
        .map_err(|e| format!("サブスクリプション一覧取得APIエラー: {e}"))?;

    info!(
        "サブスクリプション一覧取得成功: count={}",
        subscriptions.len()
    );
    Ok(subscriptions)
}

/// サブスクリプションを作成する（API Server経由）
///
/// # 引数
/// * `dto` - サブスクリプション作成用DTO
/// * `session_token` - セッショントークン
///
/// # 戻り値
/// 作成されたサブスクリプション、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn create_subscription_via_api(
    dto: CreateSubscriptionDto,
    session_token: Option<String>,
) -> Result<Subscription, String> {
    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverにサブスクリプション作成リクエストを送信
    let subscription: Subscription = api_client
        .post("/api/subscriptions", &dto, session_token.as_deref())
        .await
        .map_err(|e| format!("サブスクリプション作成APIエラー: {e}"))?;

    info!(
        "サブスクリプション作成成功: subscription_id={}",
        subscription.id
    );
    Ok(subscription)
}

/// サブスクリプションを更新（リニュー）する（API Server経由）
///
/// サーバー側で契約期間が次の期間に繰り越される。ローカルの導出値
/// （更新日・残り日数）は次回取得時に再計算される。
///
/// # 引数
/// * `id` - サブスクリプションID
/// * `session_token` - セッショントークン
///
/// # 戻り値
/// 更新されたサブスクリプション、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn renew_subscription_via_api(
    id: String,
    session_token: Option<String>,
) -> Result<Subscription, String> {
    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverにリニューリクエストを送信（ボディは空オブジェクト）
    let endpoint = format!("/api/subscriptions/{id}/renew");
    let subscription: Subscription = api_client
        .put(&endpoint, &serde_json::json!({}), session_token.as_deref())
        .await
        .map_err(|e| format!("サブスクリプション更新APIエラー: {e}"))?;

    info!("サブスクリプション更新成功: subscription_id={id}");
    Ok(subscription)
}

/// サブスクリプションを削除（停止）する（API Server経由）
///
/// # 引数
/// * `id` - サブスクリプションID
/// * `session_token` - セッショントークン
///
/// # 戻り値
/// 成功時はOk(())、失敗時はエラーメッセージ
#[tauri::command]
pub async fn delete_subscription_via_api(
    id: String,
    session_token: Option<String>,
) -> Result<(), String> {
    info!("サブスクリプション削除処理開始: subscription_id={id}");

    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverにサブスクリプション削除リクエストを送信
    let endpoint = format!("/api/subscriptions/{id}");
    api_client
        .delete(&endpoint, session_token.as_deref())
        .await
        .map_err(|e| format!("サブスクリプション削除APIエラー: {e}"))?;

    info!("サブスクリプション削除成功: subscription_id={id}");
    Ok(())
}
