use serde::{Deserialize, Serialize};

/// サブスクリプションデータモデル
///
/// APIサーバーが返すサブスクリプションレコード。ローカルには永続化しない。
/// `start_date`は文字列のまま保持し、更新日計算時に解析する
/// （不正なレコードが1件あっても一覧全体の取得を失敗させないため）。
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: String,
    pub app_name: String,         // サービス名（例: Netflix）
    pub amount: f64,              // 月額料金（単一通貨、非負）
    #[serde(default)]
    pub category: Option<String>, // カテゴリ名（未設定の場合あり）
    pub start_date: String,       // 契約開始日（RFC3339 または YYYY-MM-DD形式）
    pub validity_months: i64,     // 契約期間（月数、正の整数）
}

/// サブスクリプション作成用DTO
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubscriptionDto {
    pub app_name: String,
    pub amount: f64,
    pub start_date: String,
    pub validity_months: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscription_deserialization() {
        // バックエンド形式のJSON（camelCase、Mongo形式の_id、未知フィールド付き）を
        // 解析できることを確認
        let json = r#"{
            "_id": "66a1b2c3d4e5f6a7b8c9d0e1",
            "appName": "Netflix",
            "amount": 649,
            "startDate": "2024-05-01T00:00:00.000Z",
            "validityMonths": 1,
            "user": "66a0000000000000000000aa",
            "createdAt": "2024-05-01T09:12:34.000Z",
            "__v": 0
        }"#;

        let subscription: Subscription = serde_json::from_str(json).unwrap();
        assert_eq!(subscription.id, "66a1b2c3d4e5f6a7b8c9d0e1");
        assert_eq!(subscription.app_name, "Netflix");
        assert_eq!(subscription.amount, 649.0);
        assert_eq!(subscription.category, None);
        assert_eq!(subscription.start_date, "2024-05-01T00:00:00.000Z");
        assert_eq!(subscription.validity_months, 1);
    }

    #[test]
    fn test_subscription_serialization_keys() {
        // フロントエンドへ返す際もバックエンドと同じキー名になることを確認
        let subscription = Subscription {
            id: "abc123".to_string(),
            app_name: "Spotify".to_string(),
            amount: 980.0,
            category: Some("音楽".to_string()),
            start_date: "2024-04-15".to_string(),
            validity_months: 12,
        };

        let json = serde_json::to_string(&subscription).unwrap();
        assert!(json.contains("\"_id\""));
        assert!(json.contains("\"appName\""));
        assert!(json.contains("\"startDate\""));
        assert!(json.contains("\"validityMonths\""));
    }

    #[test]
    fn test_create_dto_omits_empty_category() {
        // カテゴリ未指定の場合はリクエストボディにキー自体を含めない
        let dto = CreateSubscriptionDto {
            app_name: "Netflix".to_string(),
            amount: 649.0,
            start_date: "2024-05-01T00:00:00.000Z".to_string(),
            validity_months: 1,
            category: None,
        };

        let json = serde_json::to_string(&dto).unwrap();
        assert!(!json.contains("category"));
    }
}
