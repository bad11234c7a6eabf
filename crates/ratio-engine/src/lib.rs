use radar_core::{DerivedMetric, DerivedMetrics, LineItem, StatementTable};

#[cfg(test)]
mod ratios_tests;

/// Derives every secondary metric series from a statement table.
///
/// Each formula is applied independently per fiscal year. A division by
/// zero makes that metric undefined for that year only; other years and
/// other metrics are unaffected.
pub struct RatioEngine;

impl RatioEngine {
    pub fn new() -> Self {
        Self
    }

    fn ratio(num: f64, den: f64) -> Option<f64> {
        if den == 0.0 {
            None
        } else {
            Some(num / den)
        }
    }

    fn pct(num: f64, den: f64) -> Option<f64> {
        Self::ratio(num, den).map(|v| v * 100.0)
    }

    /// Working-capital position expressed as days of annual revenue
    fn days_of_revenue(num: f64, revenue: f64) -> Option<f64> {
        Self::ratio(num, revenue).map(|v| v * 365.0)
    }

    pub fn derive(&self, table: &StatementTable) -> DerivedMetrics {
        let n = table.n_years();
        let revenue = table.row(LineItem::TotalRevenue);
        let ebit = table.row(LineItem::Ebit);
        let net_income = table.row(LineItem::NetIncome);
        let gross_profit = table.row(LineItem::GrossProfit);
        let ocf = table.row(LineItem::OperatingCashFlow);
        let capex = table.row(LineItem::CapitalExpenditures);
        let cash = table.row(LineItem::Cash);
        let short_term_investments = table.row(LineItem::ShortTermInvestments);
        let short_term_debt = table.row(LineItem::ShortLongTermDebt);
        let long_term_debt = table.row(LineItem::LongTermDebt);
        let equity = table.row(LineItem::TotalStockholderEquity);
        let current_assets = table.row(LineItem::TotalCurrentAssets);
        let current_liabilities = table.row(LineItem::TotalCurrentLiabilities);
        let receivables = table.row(LineItem::NetReceivables);
        let payables = table.row(LineItem::AccountsPayable);
        let inventory = table.row(LineItem::Inventory);

        let mut out = DerivedMetrics::new(n);

        // Capital expenditures are reported as negative outflows, so adding
        // them to operating cash flow subtracts their magnitude.
        out.insert(
            DerivedMetric::FreeCashFlow,
            (0..n).map(|y| Some(ocf[y] + capex[y])).collect(),
        );
        out.insert(
            DerivedMetric::CashRatio,
            (0..n)
                .map(|y| Self::ratio(cash[y], current_liabilities[y]))
                .collect(),
        );
        out.insert(
            DerivedMetric::DebtEquityRatio,
            (0..n)
                .map(|y| Self::ratio(short_term_debt[y] + long_term_debt[y], equity[y]))
                .collect(),
        );
        out.insert(
            DerivedMetric::NetDebtRatio,
            (0..n)
                .map(|y| {
                    let debt = short_term_debt[y] + long_term_debt[y];
                    let liquid = cash[y] + short_term_investments[y];
                    Self::ratio(debt - liquid, equity[y])
                })
                .collect(),
        );
        out.insert(
            DerivedMetric::CurrentRatio,
            (0..n)
                .map(|y| Self::ratio(current_assets[y], current_liabilities[y]))
                .collect(),
        );
        out.insert(
            DerivedMetric::ReturnOnEquity,
            (0..n)
                .map(|y| Self::pct(net_income[y], equity[y]))
                .collect(),
        );

        let days_receivables: Vec<Option<f64>> = (0..n)
            .map(|y| Self::days_of_revenue(receivables[y], revenue[y]))
            .collect();
        let days_payables: Vec<Option<f64>> = (0..n)
            .map(|y| Self::days_of_revenue(payables[y], revenue[y]))
            .collect();
        let inventory_days: Vec<Option<f64>> = (0..n)
            .map(|y| Self::days_of_revenue(inventory[y], revenue[y]))
            .collect();
        out.insert(
            DerivedMetric::CashConversionCycle,
            (0..n)
                .map(|y| match (days_receivables[y], days_payables[y], inventory_days[y]) {
                    (Some(r), Some(p), Some(i)) => Some(r + p - i),
                    _ => None,
                })
                .collect(),
        );
        out.insert(DerivedMetric::DaysReceivables, days_receivables);
        out.insert(DerivedMetric::DaysPayables, days_payables);
        out.insert(DerivedMetric::InventoryDays, inventory_days);

        out.insert(
            DerivedMetric::GrossMargin,
            (0..n)
                .map(|y| Self::pct(gross_profit[y], revenue[y]))
                .collect(),
        );
        out.insert(
            DerivedMetric::NetMargin,
            (0..n)
                .map(|y| Self::pct(net_income[y], revenue[y]))
                .collect(),
        );
        out.insert(
            DerivedMetric::EbitMargin,
            (0..n).map(|y| Self::pct(ebit[y], revenue[y])).collect(),
        );
        out.insert(
            DerivedMetric::QualityOfEarnings,
            (0..n)
                .map(|y| Self::ratio(ocf[y], net_income[y]))
                .collect(),
        );
        out.insert(
            DerivedMetric::FcfMargin,
            (0..n)
                .map(|y| Self::pct(ocf[y] + capex[y], revenue[y]))
                .collect(),
        );

        let undefined: usize = out
            .iter()
            .map(|(_, series)| series.iter().filter(|v| v.is_none()).count())
            .sum();
        if undefined > 0 {
            tracing::debug!(undefined_cells = undefined, "derived metrics contain undefined cells");
        }

        out
    }
}

impl Default for RatioEngine {
    fn default() -> Self {
        Self::new()
    }
}
