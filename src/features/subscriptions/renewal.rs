/// 契約更新の計算ロジック
///
/// サブスクリプション1件から更新日・経過率・残り日数を導出する純粋関数。
/// 入出力は`as_of`（基準時刻）に対して決定的で、I/Oや状態を持たない。
use crate::shared::errors::AppError;
use chrono::{DateTime, Months, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use super::models::Subscription;

const MILLISECONDS_PER_DAY: f64 = 86_400_000.0;

/// 更新予定ビュー（導出値、保存しない）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct RenewalView {
    /// 次回更新日時（開始日 + 契約月数、月末クランプあり）
    pub renewal_date: DateTime<Utc>,
    /// 契約期間の経過率（0.0〜1.0にクランプ）
    pub progress_ratio: f64,
    /// 更新日までの残り日数（切り上げ、負にならない）
    pub days_left: i64,
}

/// サブスクリプションの更新予定を計算する
///
/// # 引数
/// * `subscription` - 対象のサブスクリプション
/// * `as_of` - 基準時刻
///
/// # 戻り値
/// 更新予定ビュー、または入力が不正な場合はバリデーションエラー
///
/// # 暦月加算について
/// 月の加算は対象月の日数にクランプされる（1月31日 + 1ヶ月 → 2月28日/29日）。
/// 日数換算による加算（30日×N）は行わない。
pub fn compute(subscription: &Subscription, as_of: DateTime<Utc>) -> Result<RenewalView, AppError> {
    let months = validate(subscription)?;
    let start = parse_start_date(&subscription.start_date)?;

    // 月末クランプ付きの暦月加算。開始時刻の時分秒は維持する
    let renewal_day = start
        .date_naive()
        .checked_add_months(Months::new(months))
        .ok_or_else(|| AppError::validation(format!("契約期間が大きすぎます: {months}ヶ月")))?;
    let renewal_date = renewal_day.and_time(start.time()).and_utc();

    let total_millis = (renewal_date - start).num_milliseconds();
    if total_millis <= 0 {
        // 期間ゼロの縮退ケースはゼロ除算せず「期限到来済み」に正規化する
        return Ok(RenewalView {
            renewal_date,
            progress_ratio: 1.0,
            days_left: 0,
        });
    }

    let elapsed_millis = (as_of - start).num_milliseconds();
    let progress_ratio = (elapsed_millis as f64 / total_millis as f64).clamp(0.0, 1.0);

    let remaining_millis = (renewal_date - as_of).num_milliseconds();
    let days_left = ((remaining_millis as f64 / MILLISECONDS_PER_DAY).ceil() as i64).max(0);

    Ok(RenewalView {
        renewal_date,
        progress_ratio,
        days_left,
    })
}

/// 開始日文字列を解析する
///
/// APIサーバーはRFC3339形式（`2024-05-01T00:00:00.000Z`）を返すが、
/// 日付のみの`YYYY-MM-DD`形式も受け付ける（この場合はUTC 0時として扱う）。
pub(crate) fn parse_start_date(raw: &str) -> Result<DateTime<Utc>, AppError> {
    if let Ok(datetime) = DateTime::parse_from_rfc3339(raw) {
        return Ok(datetime.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| AppError::validation(format!("開始日を解釈できません: {raw}")))
}

/// サブスクリプションの入力制約を検証する
///
/// 検証済みの契約月数を返す。不正なレコードは呼び出し元の判断で
/// スキップまたは表示される（集計側は部分的成功ポリシーを採る）。
fn validate(subscription: &Subscription) -> Result<u32, AppError> {
    if subscription.app_name.trim().is_empty() {
        return Err(AppError::validation("サービス名が空です"));
    }

    if subscription.amount < 0.0 {
        return Err(AppError::validation(format!(
            "金額が負の値です: {}",
            subscription.amount
        )));
    }

    u32::try_from(subscription.validity_months)
        .ok()
        .filter(|months| *months >= 1)
        .ok_or_else(|| {
            AppError::validation(format!(
                "契約期間は1ヶ月以上の整数が必要です: {}",
                subscription.validity_months
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use quickcheck::TestResult;
    use quickcheck_macros::quickcheck;

    fn subscription(start_date: &str, validity_months: i64) -> Subscription {
        Subscription {
            id: "sub-1".to_string(),
            app_name: "Netflix".to_string(),
            amount: 649.0,
            category: None,
            start_date: start_date.to_string(),
            validity_months,
        }
    }

    #[test]
    fn test_leap_year_end_of_month_clamp() {
        // 2024年1月31日 + 1ヶ月 → 2024年2月29日（うるう年）。3月2日にはならない
        let sub = subscription("2024-01-31", 1);
        let as_of = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let view = compute(&sub, as_of).unwrap();
        assert_eq!(
            view.renewal_date,
            Utc.with_ymd_and_hms(2024, 2, 29, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_non_leap_year_end_of_month_clamp() {
        // 2023年1月31日 + 1ヶ月 → 2023年2月28日
        let sub = subscription("2023-01-31", 1);
        let as_of = Utc.with_ymd_and_hms(2023, 2, 1, 0, 0, 0).unwrap();

        let view = compute(&sub, as_of).unwrap();
        assert_eq!(
            view.renewal_date,
            Utc.with_ymd_and_hms(2023, 2, 28, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_year_rollover() {
        // 年をまたぐ加算
        let sub = subscription("2024-11-15", 3);
        let as_of = Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap();

        let view = compute(&sub, as_of).unwrap();
        assert_eq!(
            view.renewal_date,
            Utc.with_ymd_and_hms(2025, 2, 15, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_rfc3339_start_date_preserves_time_of_day() {
        // RFC3339形式の開始日時は時分秒を維持したまま月加算される
        let sub = subscription("2024-01-31T10:30:00.000Z", 1);
        let as_of = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let view = compute(&sub, as_of).unwrap();
        assert_eq!(
            view.renewal_date,
            Utc.with_ymd_and_hms(2024, 2, 29, 10, 30, 0).unwrap()
        );
    }

    #[test]
    fn test_days_left_reaches_zero_exactly_at_renewal() {
        let sub = subscription("2024-05-01", 1);
        let renewal = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        // 更新日時ちょうどで0になる
        let at_renewal = compute(&sub, renewal).unwrap();
        assert_eq!(at_renewal.days_left, 0);

        // 1秒前は切り上げで1日
        let just_before = compute(&sub, renewal - Duration::seconds(1)).unwrap();
        assert_eq!(just_before.days_left, 1);

        // 更新日時を過ぎても負にはならない
        let after = compute(&sub, renewal + Duration::days(10)).unwrap();
        assert_eq!(after.days_left, 0);
    }

    #[test]
    fn test_days_left_exact_week() {
        // 残りちょうど7日（切り上げ後も7のまま）
        let sub = subscription("2024-05-08", 1);
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let view = compute(&sub, as_of).unwrap();
        assert_eq!(view.days_left, 7);
    }

    #[test]
    fn test_progress_ratio_clamping() {
        let sub = subscription("2024-05-01", 1);

        // 開始前は0.0
        let before = compute(&sub, Utc.with_ymd_and_hms(2024, 4, 1, 0, 0, 0).unwrap()).unwrap();
        assert_eq!(before.progress_ratio, 0.0);

        // 更新日以降は1.0
        let after = compute(&sub, Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap()).unwrap();
        assert_eq!(after.progress_ratio, 1.0);
    }

    #[test]
    fn test_progress_ratio_midpoint() {
        // 2024年5月は31日間 → 開始から15.5日経過でちょうど中間
        let sub = subscription("2024-05-01", 1);
        let as_of = Utc.with_ymd_and_hms(2024, 5, 16, 12, 0, 0).unwrap();

        let view = compute(&sub, as_of).unwrap();
        assert!((view.progress_ratio - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_validation_rejects_non_positive_months() {
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        assert!(compute(&subscription("2024-05-01", 0), as_of).is_err());
        assert!(compute(&subscription("2024-05-01", -3), as_of).is_err());
    }

    #[test]
    fn test_validation_rejects_unparseable_start_date() {
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        assert!(compute(&subscription("こんにちは", 1), as_of).is_err());
        assert!(compute(&subscription("2024/05/01", 1), as_of).is_err());
        assert!(compute(&subscription("", 1), as_of).is_err());
    }

    #[test]
    fn test_validation_rejects_empty_app_name_and_negative_amount() {
        let as_of = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let mut no_name = subscription("2024-05-01", 1);
        no_name.app_name = "  ".to_string();
        assert!(compute(&no_name, as_of).is_err());

        let mut negative = subscription("2024-05-01", 1);
        negative.amount = -100.0;
        assert!(compute(&negative, as_of).is_err());
    }

    #[test]
    fn test_renewal_date_strictly_after_start() {
        // 月末クランプ後でも更新日は必ず開始日より後になる
        let sub = subscription("2024-01-31", 1);
        let as_of = Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap();

        let view = compute(&sub, as_of).unwrap();
        let start = parse_start_date(&sub.start_date).unwrap();
        assert!(view.renewal_date > start);
    }

    #[quickcheck]
    fn prop_progress_ratio_and_days_left_in_range(day_offset: i16, months: u8) -> TestResult {
        if months == 0 {
            return TestResult::discard();
        }

        let sub = subscription("2024-03-15", i64::from(months));
        let base = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let as_of = base + Duration::days(i64::from(day_offset));

        let view = match compute(&sub, as_of) {
            Ok(view) => view,
            Err(_) => return TestResult::failed(),
        };

        TestResult::from_bool(
            (0.0..=1.0).contains(&view.progress_ratio) && view.days_left >= 0,
        )
    }

    #[quickcheck]
    fn prop_progress_is_monotonic_in_as_of(offset_a: i16, offset_b: i16, months: u8) -> TestResult {
        if months == 0 {
            return TestResult::discard();
        }

        let sub = subscription("2024-03-15", i64::from(months));
        let base = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let early = base + Duration::days(i64::from(offset_a.min(offset_b)));
        let late = base + Duration::days(i64::from(offset_a.max(offset_b)));

        let view_early = compute(&sub, early).unwrap();
        let view_late = compute(&sub, late).unwrap();

        // 時刻が進むと経過率は減らず、残り日数は増えない
        TestResult::from_bool(
            view_early.progress_ratio <= view_late.progress_ratio
                && view_early.days_left >= view_late.days_left,
        )
    }

    #[quickcheck]
    fn prop_days_left_zero_iff_past_renewal(day_offset: i16, months: u8) -> TestResult {
        if months == 0 {
            return TestResult::discard();
        }

        let sub = subscription("2024-03-15", i64::from(months));
        let base = Utc.with_ymd_and_hms(2024, 3, 15, 0, 0, 0).unwrap();
        let as_of = base + Duration::days(i64::from(day_offset));

        let view = compute(&sub, as_of).unwrap();
        TestResult::from_bool((view.days_left == 0) == (as_of >= view.renewal_date))
    }
}
