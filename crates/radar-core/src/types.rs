use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

use crate::error::RadarError;

/// Which financial report a line item comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Statement {
    Income,
    CashFlow,
    BalanceSheet,
}

/// Raw statement line items used by the engines.
///
/// Required items abort ingestion when absent; optional ones are filled
/// with an all-zero series of the table length.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum LineItem {
    TotalRevenue,
    Ebit,
    NetIncome,
    GrossProfit,
    OperatingCashFlow,
    CapitalExpenditures,
    Cash,
    ShortTermInvestments,
    ShortLongTermDebt,
    LongTermDebt,
    TotalStockholderEquity,
    TotalCurrentAssets,
    TotalCurrentLiabilities,
    NetReceivables,
    AccountsPayable,
    Inventory,
}

impl LineItem {
    pub const ALL: [LineItem; 16] = [
        LineItem::TotalRevenue,
        LineItem::Ebit,
        LineItem::NetIncome,
        LineItem::GrossProfit,
        LineItem::OperatingCashFlow,
        LineItem::CapitalExpenditures,
        LineItem::Cash,
        LineItem::ShortTermInvestments,
        LineItem::ShortLongTermDebt,
        LineItem::LongTermDebt,
        LineItem::TotalStockholderEquity,
        LineItem::TotalCurrentAssets,
        LineItem::TotalCurrentLiabilities,
        LineItem::NetReceivables,
        LineItem::AccountsPayable,
        LineItem::Inventory,
    ];

    /// Row name as it appears in provider statement tables
    pub fn name(&self) -> &'static str {
        match self {
            LineItem::TotalRevenue => "Total Revenue",
            LineItem::Ebit => "Ebit",
            LineItem::NetIncome => "Net Income",
            LineItem::GrossProfit => "Gross Profit",
            LineItem::OperatingCashFlow => "Total Cash From Operating Activities",
            LineItem::CapitalExpenditures => "Capital Expenditures",
            LineItem::Cash => "Cash",
            LineItem::ShortTermInvestments => "Short Term Investments",
            LineItem::ShortLongTermDebt => "Short Long Term Debt",
            LineItem::LongTermDebt => "Long Term Debt",
            LineItem::TotalStockholderEquity => "Total Stockholder Equity",
            LineItem::TotalCurrentAssets => "Total Current Assets",
            LineItem::TotalCurrentLiabilities => "Total Current Liabilities",
            LineItem::NetReceivables => "Net Receivables",
            LineItem::AccountsPayable => "Accounts Payable",
            LineItem::Inventory => "Inventory",
        }
    }

    pub fn statement(&self) -> Statement {
        match self {
            LineItem::TotalRevenue
            | LineItem::Ebit
            | LineItem::NetIncome
            | LineItem::GrossProfit => Statement::Income,
            LineItem::OperatingCashFlow | LineItem::CapitalExpenditures => Statement::CashFlow,
            LineItem::Cash
            | LineItem::ShortTermInvestments
            | LineItem::ShortLongTermDebt
            | LineItem::LongTermDebt
            | LineItem::TotalStockholderEquity
            | LineItem::TotalCurrentAssets
            | LineItem::TotalCurrentLiabilities
            | LineItem::NetReceivables
            | LineItem::AccountsPayable
            | LineItem::Inventory => Statement::BalanceSheet,
        }
    }

    pub fn is_required(&self) -> bool {
        matches!(
            self,
            LineItem::TotalRevenue
                | LineItem::Ebit
                | LineItem::NetIncome
                | LineItem::GrossProfit
                | LineItem::OperatingCashFlow
                | LineItem::TotalStockholderEquity
                | LineItem::TotalCurrentAssets
                | LineItem::TotalCurrentLiabilities
        )
    }

    pub fn from_name(name: &str) -> Option<LineItem> {
        LineItem::ALL.iter().copied().find(|item| item.name() == name)
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Year-indexed table of raw statement line items, most-recent-first.
///
/// Presence and alignment are validated once here; after construction every
/// line item resolves to a full-length series and no formula site re-checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatementTable {
    n_years: usize,
    fiscal_years: Option<Vec<i32>>,
    rows: BTreeMap<LineItem, Vec<f64>>,
}

impl StatementTable {
    /// Build a table from provider rows keyed by statement row name.
    ///
    /// Rows the engines do not use are ignored. Every present row must have
    /// the same length, each line item may appear at most once, and all
    /// required items must be present.
    pub fn from_rows<I>(rows: I, fiscal_years: Option<Vec<i32>>) -> Result<Self, RadarError>
    where
        I: IntoIterator<Item = (String, Vec<f64>)>,
    {
        let mut parsed: BTreeMap<LineItem, Vec<f64>> = BTreeMap::new();
        let mut n_years: Option<usize> = None;

        for (name, values) in rows {
            let Some(item) = LineItem::from_name(&name) else {
                tracing::debug!(row = %name, "ignoring unused statement row");
                continue;
            };
            if parsed.contains_key(&item) {
                return Err(RadarError::DuplicateLineItem(name));
            }
            match n_years {
                None => n_years = Some(values.len()),
                Some(expected) if values.len() != expected => {
                    return Err(RadarError::LengthMismatch {
                        item: name,
                        expected,
                        got: values.len(),
                    });
                }
                Some(_) => {}
            }
            parsed.insert(item, values);
        }

        let n_years = n_years.unwrap_or(0);
        if n_years == 0 {
            return Err(RadarError::EmptyTable);
        }
        if let Some(years) = &fiscal_years {
            if years.len() != n_years {
                return Err(RadarError::LengthMismatch {
                    item: "fiscal years".to_string(),
                    expected: n_years,
                    got: years.len(),
                });
            }
        }

        for item in LineItem::ALL {
            if parsed.contains_key(&item) {
                continue;
            }
            if item.is_required() {
                return Err(RadarError::MissingLineItem(item));
            }
            parsed.insert(item, vec![0.0; n_years]);
        }

        Ok(Self {
            n_years,
            fiscal_years,
            rows: parsed,
        })
    }

    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Calendar labels for the fiscal years, most-recent-first, if known
    pub fn fiscal_years(&self) -> Option<&[i32]> {
        self.fiscal_years.as_deref()
    }

    /// Year series for a line item, most-recent-first
    pub fn row(&self, item: LineItem) -> &[f64] {
        self.rows.get(&item).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Most recent fiscal year's value for a line item
    pub fn latest(&self, item: LineItem) -> f64 {
        self.row(item).first().copied().unwrap_or(0.0)
    }
}

/// Secondary metrics derived from a statement table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DerivedMetric {
    FreeCashFlow,
    CashRatio,
    DebtEquityRatio,
    NetDebtRatio,
    CurrentRatio,
    ReturnOnEquity,
    DaysReceivables,
    DaysPayables,
    InventoryDays,
    CashConversionCycle,
    GrossMargin,
    NetMargin,
    EbitMargin,
    QualityOfEarnings,
    FcfMargin,
}

impl DerivedMetric {
    pub const ALL: [DerivedMetric; 15] = [
        DerivedMetric::FreeCashFlow,
        DerivedMetric::CashRatio,
        DerivedMetric::DebtEquityRatio,
        DerivedMetric::NetDebtRatio,
        DerivedMetric::CurrentRatio,
        DerivedMetric::ReturnOnEquity,
        DerivedMetric::DaysReceivables,
        DerivedMetric::DaysPayables,
        DerivedMetric::InventoryDays,
        DerivedMetric::CashConversionCycle,
        DerivedMetric::GrossMargin,
        DerivedMetric::NetMargin,
        DerivedMetric::EbitMargin,
        DerivedMetric::QualityOfEarnings,
        DerivedMetric::FcfMargin,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            DerivedMetric::FreeCashFlow => "Free Cash Flow",
            DerivedMetric::CashRatio => "Cash Ratio",
            DerivedMetric::DebtEquityRatio => "Debt-Equity Ratio",
            DerivedMetric::NetDebtRatio => "Net-Debt Ratio",
            DerivedMetric::CurrentRatio => "Current Ratio",
            DerivedMetric::ReturnOnEquity => "ROE",
            DerivedMetric::DaysReceivables => "Days Receivables",
            DerivedMetric::DaysPayables => "Days Payables",
            DerivedMetric::InventoryDays => "Inventory Days",
            DerivedMetric::CashConversionCycle => "Cash Conversion Cycle",
            DerivedMetric::GrossMargin => "Gross Margin",
            DerivedMetric::NetMargin => "Net Margin",
            DerivedMetric::EbitMargin => "EBIT Margin",
            DerivedMetric::QualityOfEarnings => "Quality of Earnings",
            DerivedMetric::FcfMargin => "FCF Margin",
        }
    }
}

impl fmt::Display for DerivedMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Derived metric series, year-aligned with the source table.
///
/// An undefined cell (division by zero that year) is `None`; it never
/// suppresses the rest of the series or any other metric.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DerivedMetrics {
    n_years: usize,
    series: BTreeMap<DerivedMetric, Vec<Option<f64>>>,
}

impl DerivedMetrics {
    pub fn new(n_years: usize) -> Self {
        Self {
            n_years,
            series: BTreeMap::new(),
        }
    }

    pub fn n_years(&self) -> usize {
        self.n_years
    }

    /// Insert a series. Callers must supply one value per fiscal year.
    pub fn insert(&mut self, metric: DerivedMetric, series: Vec<Option<f64>>) {
        debug_assert_eq!(series.len(), self.n_years);
        self.series.insert(metric, series);
    }

    /// Year series for a metric, most-recent-first; empty if never derived
    pub fn series(&self, metric: DerivedMetric) -> &[Option<f64>] {
        self.series
            .get(&metric)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Most recent fiscal year's value, `None` when undefined
    pub fn latest(&self, metric: DerivedMetric) -> Option<f64> {
        self.series(metric).first().copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DerivedMetric, &[Option<f64>])> {
        self.series.iter().map(|(m, s)| (*m, s.as_slice()))
    }
}

/// Metrics that carry a score-band entry and feed an axis mean
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum ScoredMetric {
    RevenueGrowth,
    EbitGrowth,
    NetIncomeGrowth,
    FreeCashFlowGrowth,
    OperatingCashFlowGrowth,
    GrossMargin,
    EbitMargin,
    NetMargin,
    QualityOfEarnings,
    ReturnOnEquity,
    CashConversionCycle,
    DebtEquity,
    NetDebt,
    CurrentRatio,
    CashRatio,
}

impl ScoredMetric {
    pub fn name(&self) -> &'static str {
        match self {
            ScoredMetric::RevenueGrowth => "Revenue Growth",
            ScoredMetric::EbitGrowth => "EBIT Growth",
            ScoredMetric::NetIncomeGrowth => "Net Income Growth",
            ScoredMetric::FreeCashFlowGrowth => "Free Cash Flow Growth",
            ScoredMetric::OperatingCashFlowGrowth => "Operating Cash Flow Growth",
            ScoredMetric::GrossMargin => "Gross Margin",
            ScoredMetric::EbitMargin => "EBIT Margin",
            ScoredMetric::NetMargin => "Net Margin",
            ScoredMetric::QualityOfEarnings => "Quality of Earnings",
            ScoredMetric::ReturnOnEquity => "ROE",
            ScoredMetric::CashConversionCycle => "Cash Conversion Cycle",
            ScoredMetric::DebtEquity => "Debt-Equity Ratio",
            ScoredMetric::NetDebt => "Net-Debt Ratio",
            ScoredMetric::CurrentRatio => "Current Ratio",
            ScoredMetric::CashRatio => "Cash Ratio",
        }
    }
}

impl fmt::Display for ScoredMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Radar chart axes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Axis {
    Growth,
    Profitability,
    Liquidity,
    Efficiency,
    Health,
}

impl Axis {
    pub const ALL: [Axis; 5] = [
        Axis::Growth,
        Axis::Profitability,
        Axis::Liquidity,
        Axis::Efficiency,
        Axis::Health,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Axis::Growth => "Growth",
            Axis::Profitability => "Profitability",
            Axis::Liquidity => "Liquidity",
            Axis::Efficiency => "Efficiency",
            Axis::Health => "Health",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One scored axis member. `score` is `None` when the underlying value is
/// undefined; such members are excluded from the axis mean.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberScore {
    pub metric: ScoredMetric,
    pub value: Option<f64>,
    pub score: Option<u8>,
}

/// One radar axis with its aggregate score and member breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AxisScore {
    pub axis: Axis,
    /// Mean of the defined member scores, in [0, 5]; `None` when no member
    /// is defined
    pub score: Option<f64>,
    pub members: Vec<MemberScore>,
}

/// Rating output handed to the presentation layer: five named axis scores
/// plus a display label and the raw per-metric breakdown for tooltips
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RadarProfile {
    pub label: String,
    pub computed_at: DateTime<Utc>,
    pub axes: Vec<AxisScore>,
    pub metrics: serde_json::Value,
}

impl RadarProfile {
    pub fn axis(&self, axis: Axis) -> Option<&AxisScore> {
        self.axes.iter().find(|a| a.axis == axis)
    }
}
