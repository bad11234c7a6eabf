pub mod bands;
pub mod growth;

pub use bands::{bands, score_value, ScoreBands};
pub use growth::{cagr, cagr_series};

use radar_core::{
    Axis, AxisScore, DerivedMetric, DerivedMetrics, LineItem, MemberScore, RadarError,
    ScoredMetric, StatementTable,
};

/// Converts derived metrics and growth rates into the five axis scores.
///
/// Ratio-type members use the most recent fiscal year; growth-type members
/// use the annualized rate over the full table. An undefined member is
/// excluded from its axis mean rather than coerced to a score.
pub struct ScoreEngine;

impl ScoreEngine {
    pub fn new() -> Self {
        Self
    }

    fn member(metric: ScoredMetric, value: Option<f64>) -> MemberScore {
        let score = value.map(|v| bands::score_value(metric, v));
        if score.is_none() {
            tracing::warn!(metric = metric.name(), "axis member undefined, excluded from scoring");
        }
        MemberScore {
            metric,
            value,
            score,
        }
    }

    fn mean(members: &[MemberScore]) -> Option<f64> {
        let defined: Vec<f64> = members.iter().filter_map(|m| m.score).map(f64::from).collect();
        if defined.is_empty() {
            None
        } else {
            Some(defined.iter().sum::<f64>() / defined.len() as f64)
        }
    }

    fn axis(axis: Axis, members: Vec<MemberScore>) -> AxisScore {
        AxisScore {
            axis,
            score: Self::mean(&members),
            members,
        }
    }

    /// Score the five radar axes for one company.
    ///
    /// Needs the raw table alongside the derived metrics because growth
    /// rates for revenue, EBIT, net income and operating cash flow are
    /// taken over raw line-item series.
    pub fn score(
        &self,
        table: &StatementTable,
        derived: &DerivedMetrics,
    ) -> Result<Vec<AxisScore>, RadarError> {
        if table.n_years() < 2 {
            return Err(RadarError::InsufficientHistory {
                needed: 2,
                got: table.n_years(),
            });
        }

        let growth = Self::axis(
            Axis::Growth,
            vec![
                Self::member(
                    ScoredMetric::RevenueGrowth,
                    growth::cagr(table.row(LineItem::TotalRevenue)),
                ),
                Self::member(
                    ScoredMetric::EbitGrowth,
                    growth::cagr(table.row(LineItem::Ebit)),
                ),
                Self::member(
                    ScoredMetric::NetIncomeGrowth,
                    growth::cagr(table.row(LineItem::NetIncome)),
                ),
                Self::member(
                    ScoredMetric::FreeCashFlowGrowth,
                    growth::cagr_series(derived.series(DerivedMetric::FreeCashFlow)),
                ),
            ],
        );

        let profitability = Self::axis(
            Axis::Profitability,
            vec![
                Self::member(
                    ScoredMetric::GrossMargin,
                    derived.latest(DerivedMetric::GrossMargin),
                ),
                Self::member(
                    ScoredMetric::EbitMargin,
                    derived.latest(DerivedMetric::EbitMargin),
                ),
                Self::member(
                    ScoredMetric::NetMargin,
                    derived.latest(DerivedMetric::NetMargin),
                ),
            ],
        );

        // Operating cash flow growth is scored for the breakdown but does
        // not enter the Liquidity mean; only quality of earnings does.
        let quality_of_earnings = Self::member(
            ScoredMetric::QualityOfEarnings,
            derived.latest(DerivedMetric::QualityOfEarnings),
        );
        let ocf_growth = Self::member(
            ScoredMetric::OperatingCashFlowGrowth,
            growth::cagr(table.row(LineItem::OperatingCashFlow)),
        );
        let liquidity = AxisScore {
            axis: Axis::Liquidity,
            score: Self::mean(std::slice::from_ref(&quality_of_earnings)),
            members: vec![quality_of_earnings, ocf_growth],
        };

        let efficiency = Self::axis(
            Axis::Efficiency,
            vec![
                Self::member(
                    ScoredMetric::ReturnOnEquity,
                    derived.latest(DerivedMetric::ReturnOnEquity),
                ),
                Self::member(
                    ScoredMetric::CashConversionCycle,
                    derived.latest(DerivedMetric::CashConversionCycle),
                ),
            ],
        );

        let health = Self::axis(
            Axis::Health,
            vec![
                Self::member(
                    ScoredMetric::DebtEquity,
                    derived.latest(DerivedMetric::DebtEquityRatio),
                ),
                Self::member(
                    ScoredMetric::NetDebt,
                    derived.latest(DerivedMetric::NetDebtRatio),
                ),
                Self::member(
                    ScoredMetric::CurrentRatio,
                    derived.latest(DerivedMetric::CurrentRatio),
                ),
                Self::member(
                    ScoredMetric::CashRatio,
                    derived.latest(DerivedMetric::CashRatio),
                ),
            ],
        );

        Ok(vec![growth, profitability, liquidity, efficiency, health])
    }
}

impl Default for ScoreEngine {
    fn default() -> Self {
        Self::new()
    }
}
