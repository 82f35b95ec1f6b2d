use serde::{Deserialize, Serialize};

/// ユーザーデータモデル
///
/// APIサーバーが返すユーザー情報。ログイン画面が参照するフィールドのみを保持し、
/// その他のフィールドは無視する。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>, // 登録日時（RFC3339形式）
}

/// ユーザー登録用DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterDto {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// ログイン用DTO
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginDto {
    pub email: String,
    pub password: String,
}

/// 認証レスポンス
///
/// 登録・ログイン成功時にAPIサーバーが返すJWTトークンとユーザー情報。
/// 登録エンドポイントはユーザー情報を返さない場合がある。
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}
