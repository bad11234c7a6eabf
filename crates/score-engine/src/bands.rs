//! Static score-band registry.
//!
//! Each scored metric maps to five interior boundaries carving the real
//! line into six open-ended buckets labeled 0..=5, or 5..=0 for inverted
//! metrics where lower raw values are better. The tables are process-wide
//! constants so the scoring rules stay auditable in one place.

use radar_core::ScoredMetric;

/// Bucketization table for one metric
#[derive(Debug, Clone, Copy)]
pub struct ScoreBands {
    bounds: [f64; 5],
    inverted: bool,
}

impl ScoreBands {
    const fn new(bounds: [f64; 5], inverted: bool) -> Self {
        Self { bounds, inverted }
    }

    /// Interior bucket boundaries in ascending order
    pub fn bounds(&self) -> &[f64; 5] {
        &self.bounds
    }

    /// Whether lower raw values earn higher scores
    pub fn inverted(&self) -> bool {
        self.inverted
    }

    /// Bucketize a value into its ordinal score.
    ///
    /// A value exactly on a boundary takes the higher score of the two
    /// adjacent buckets; values beyond the outermost boundaries land in the
    /// open-ended buckets.
    pub fn score(&self, value: f64) -> u8 {
        if self.inverted {
            5 - self.bounds.iter().filter(|b| value > **b).count() as u8
        } else {
            self.bounds.iter().filter(|b| value >= **b).count() as u8
        }
    }
}

const GROWTH: ScoreBands = ScoreBands::new([0.0, 5.0, 10.0, 15.0, 20.0], false);
const GROSS_MARGIN: ScoreBands = ScoreBands::new([0.0, 10.0, 20.0, 30.0, 40.0], false);
const EBIT_MARGIN: ScoreBands = ScoreBands::new([0.0, 2.0, 4.0, 6.0, 8.0], false);
const NET_MARGIN: ScoreBands = ScoreBands::new([0.0, 2.5, 5.0, 7.5, 10.0], false);
const QUALITY_OF_EARNINGS: ScoreBands = ScoreBands::new([0.0, 0.25, 0.5, 0.75, 1.0], false);
const ROE: ScoreBands = ScoreBands::new([0.0, 5.0, 10.0, 15.0, 20.0], false);
const CASH_CONVERSION_CYCLE: ScoreBands = ScoreBands::new([0.0, 32.5, 65.0, 97.5, 130.0], true);
const DEBT_EQUITY: ScoreBands = ScoreBands::new([0.0, 0.375, 0.75, 1.125, 1.5], true);
const NET_DEBT: ScoreBands = ScoreBands::new([0.0, 0.125, 0.25, 0.375, 0.5], true);
const CURRENT_RATIO: ScoreBands = ScoreBands::new([0.0, 0.5, 1.0, 1.5, 2.0], false);
const CASH_RATIO: ScoreBands = ScoreBands::new([0.0, 0.25, 0.5, 0.75, 1.0], false);

/// Band table for a scored metric. All growth rates share one table.
pub fn bands(metric: ScoredMetric) -> &'static ScoreBands {
    match metric {
        ScoredMetric::RevenueGrowth
        | ScoredMetric::EbitGrowth
        | ScoredMetric::NetIncomeGrowth
        | ScoredMetric::FreeCashFlowGrowth
        | ScoredMetric::OperatingCashFlowGrowth => &GROWTH,
        ScoredMetric::GrossMargin => &GROSS_MARGIN,
        ScoredMetric::EbitMargin => &EBIT_MARGIN,
        ScoredMetric::NetMargin => &NET_MARGIN,
        ScoredMetric::QualityOfEarnings => &QUALITY_OF_EARNINGS,
        ScoredMetric::ReturnOnEquity => &ROE,
        ScoredMetric::CashConversionCycle => &CASH_CONVERSION_CYCLE,
        ScoredMetric::DebtEquity => &DEBT_EQUITY,
        ScoredMetric::NetDebt => &NET_DEBT,
        ScoredMetric::CurrentRatio => &CURRENT_RATIO,
        ScoredMetric::CashRatio => &CASH_RATIO,
    }
}

/// Score a raw value against its metric's bands
pub fn score_value(metric: ScoredMetric, value: f64) -> u8 {
    bands(metric).score(value)
}
