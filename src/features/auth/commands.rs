/// API Server経由での認証コマンド
///
/// ユーザー登録とログインをAPIサーバーに委譲します。
/// 取得したセッショントークンはフロントエンドに返却され、以降のコマンド呼び出しで
/// 明示的に渡されます。
use crate::features::auth::models::{AuthResponse, LoginDto, RegisterDto};
use crate::shared::api_client::ApiClient;
use log::info;

/// ユーザーを登録する（API Server経由）
///
/// # 引数
/// * `dto` - ユーザー登録用DTO
///
/// # 戻り値
/// JWTトークンとユーザー情報、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn register_user(dto: RegisterDto) -> Result<AuthResponse, String> {
    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverにユーザー登録リクエストを送信（認証不要の公開エンドポイント）
    let response: AuthResponse = api_client
        .post("/api/auth/register", &dto, None)
        .await
        .map_err(|e| format!("ユーザー登録APIエラー: {e}"))?;

    info!("ユーザー登録成功: email={}", dto.email);
    Ok(response)
}

/// ログインする（API Server経由）
///
/// # 引数
/// * `dto` - ログイン用DTO
///
/// # 戻り値
/// JWTトークンとユーザー情報、または失敗時はエラーメッセージ
#[tauri::command]
pub async fn login_user(dto: LoginDto) -> Result<AuthResponse, String> {
    // APIクライアントを作成
    let api_client = ApiClient::new().map_err(|e| format!("APIクライアント作成エラー: {e}"))?;

    // API Serverにログインリクエストを送信（認証不要の公開エンドポイント）
    let response: AuthResponse = api_client
        .post("/api/auth/login", &dto, None)
        .await
        .map_err(|e| format!("ログインAPIエラー: {e}"))?;

    info!("ログイン成功: email={}", dto.email);
    Ok(response)
}
