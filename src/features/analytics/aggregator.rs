/// ポートフォリオ集計ロジック
///
/// サブスクリプション一覧のスナップショットから支出サマリーを導出する純粋関数。
/// 不正なレコードは集計から除外し、理由付きでスキップ一覧に報告する
/// （部分的成功ポリシー。集計自体は決して失敗しない）。
use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::features::subscriptions::models::Subscription;
use crate::features::subscriptions::renewal;

/// 更新アラートの対象となる残り日数の範囲（両端を含む）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct AlertWindow {
    /// 残り日数の下限（0を含む）
    pub min_days: i64,
    /// 残り日数の上限
    pub max_days: i64,
}

impl Default for AlertWindow {
    /// 既定のアラートウィンドウは更新7〜15日前
    fn default() -> Self {
        Self {
            min_days: 7,
            max_days: 15,
        }
    }
}

impl AlertWindow {
    /// 残り日数がウィンドウ内かどうかを判定する（両端を含む）
    pub fn contains(&self, days_left: i64) -> bool {
        days_left >= self.min_days && days_left <= self.max_days
    }
}

/// カテゴリ別の支出合計
///
/// 表示順は入力中でカテゴリが最初に現れた順序を維持する。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CategoryTotal {
    pub category: String,
    pub total: f64,
}

/// 前月と当月の支出比較
///
/// 開始日の「月」が基準時刻の前月と一致するかどうかで判定する粗いヒューリスティック。
/// 年は比較しない（月をまたぐ契約期間も考慮しない）ため請求ベースの正確な値ではないが、
/// 元の挙動をそのまま維持している。
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct MonthOverMonth {
    pub previous_month_total: f64,
    pub current_month_total: f64,
}

/// 更新期限が近いサブスクリプション
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UpcomingRenewal {
    pub id: String,
    pub app_name: String,
    pub amount: f64,
    pub renewal_date: DateTime<Utc>,
    pub days_left: i64,
}

/// 集計から除外されたレコードの診断情報
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedRecord {
    pub id: String,
    pub app_name: String,
    pub reason: String,
}

/// ポートフォリオ集計結果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PortfolioSummary {
    /// 有効なサブスクリプションの月額合計
    pub total_monthly_spend: f64,
    /// 有効なサブスクリプション件数
    pub active_count: usize,
    /// カテゴリ別内訳（初出順）
    pub category_breakdown: Vec<CategoryTotal>,
    /// 前月比
    pub month_over_month: MonthOverMonth,
    /// アラートウィンドウ内のサブスクリプション
    pub upcoming_renewals: Vec<UpcomingRenewal>,
    /// 集計から除外されたレコード
    pub skipped: Vec<SkippedRecord>,
}

/// サブスクリプション一覧を集計する
///
/// # 引数
/// * `subscriptions` - APIサーバーから取得した一覧のスナップショット
/// * `as_of` - 基準時刻
/// * `alert_window` - 更新アラートの残り日数範囲
///
/// # 戻り値
/// ポートフォリオ集計結果。バリデーションに失敗したレコードは全集計から除外され、
/// `skipped`に理由付きで報告される
pub fn aggregate(
    subscriptions: &[Subscription],
    as_of: DateTime<Utc>,
    alert_window: AlertWindow,
) -> PortfolioSummary {
    let previous_month = previous_month_of(as_of);

    let mut total_monthly_spend = 0.0;
    let mut active_count = 0;
    let mut category_breakdown: Vec<CategoryTotal> = Vec::new();
    let mut previous_month_total = 0.0;
    let mut upcoming_renewals = Vec::new();
    let mut skipped = Vec::new();

    for subscription in subscriptions {
        let view = match renewal::compute(subscription, as_of) {
            Ok(view) => view,
            Err(e) => {
                skipped.push(SkippedRecord {
                    id: subscription.id.clone(),
                    app_name: subscription.app_name.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        total_monthly_spend += subscription.amount;
        active_count += 1;

        // カテゴリ未設定の場合はサービス名の頭文字を疑似カテゴリとして使う
        // （頭文字が同じ無関係のサービスが合算される既知の制限）
        let category = category_key(subscription);
        if let Some(entry) = category_breakdown
            .iter_mut()
            .find(|entry| entry.category == category)
        {
            entry.total += subscription.amount;
        } else {
            category_breakdown.push(CategoryTotal {
                category,
                total: subscription.amount,
            });
        }

        // 前月判定は開始日の「月」のみを比較する（computeで解析済みのため失敗しない）
        if let Ok(start) = renewal::parse_start_date(&subscription.start_date) {
            if start.month() == previous_month {
                previous_month_total += subscription.amount;
            }
        }

        if alert_window.contains(view.days_left) {
            upcoming_renewals.push(UpcomingRenewal {
                id: subscription.id.clone(),
                app_name: subscription.app_name.clone(),
                amount: subscription.amount,
                renewal_date: view.renewal_date,
                days_left: view.days_left,
            });
        }
    }

    PortfolioSummary {
        total_monthly_spend,
        active_count,
        category_breakdown,
        month_over_month: MonthOverMonth {
            previous_month_total,
            current_month_total: total_monthly_spend,
        },
        upcoming_renewals,
        skipped,
    }
}

/// カテゴリキーを決定する（明示カテゴリ、なければサービス名の頭文字）
fn category_key(subscription: &Subscription) -> String {
    subscription
        .category
        .as_deref()
        .filter(|category| !category.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| {
            subscription
                .app_name
                .chars()
                .next()
                .map(|c| c.to_string())
                .unwrap_or_default()
        })
}

/// 基準時刻の前月を返す（1月の前月は12月）
fn previous_month_of(as_of: DateTime<Utc>) -> u32 {
    match as_of.month() {
        1 => 12,
        month => month - 1,
    }
}
