/// 認証機能のモジュール
///
/// APIサーバーに対するユーザー登録とログインを提供します。
/// セッショントークンは呼び出し元（フロントエンド）に返却され、
/// 各コマンドに明示的に渡されます（グローバルなセッション状態は持ちません）。
pub mod commands;
pub mod models;

pub use commands::{login_user, register_user};
pub use models::{AuthResponse, LoginDto, RegisterDto, User};
