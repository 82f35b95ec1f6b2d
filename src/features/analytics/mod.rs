/// 分析機能モジュール
///
/// このモジュールは、取得済みのサブスクリプション一覧に対する支出分析を提供します：
/// - 月額合計・カテゴリ別内訳・前月比の集計
/// - 更新期限が近いサブスクリプションの抽出（アラートウィンドウ）
/// - 画面表示用の更新予定一覧
///
/// 集計はすべてクライアント側の純粋計算で、APIサーバーへの書き込みは行いません。
pub mod aggregator;
pub mod commands;

// 公開インターフェース
pub use aggregator::{
    aggregate, AlertWindow, CategoryTotal, MonthOverMonth, PortfolioSummary, SkippedRecord,
    UpcomingRenewal,
};

pub use commands::{fetch_portfolio_summary_via_api, fetch_renewal_overview_via_api};
