#[cfg(test)]
mod tests {
    use super::super::RatioEngine;
    use approx::assert_relative_eq;
    use radar_core::{DerivedMetric, StatementTable};

    fn row(name: &str, values: &[f64]) -> (String, Vec<f64>) {
        (name.to_string(), values.to_vec())
    }

    // Four fiscal years, most-recent-first. Latest year lines up with the
    // hand-computed expectations below (revenue 120, equity 80).
    fn sample_rows() -> Vec<(String, Vec<f64>)> {
        vec![
            row("Total Revenue", &[120.0, 110.0, 100.0, 90.0]),
            row("Gross Profit", &[30.0, 27.5, 25.0, 22.5]),
            row("Ebit", &[6.0, 5.5, 5.0, 4.5]),
            row("Net Income", &[14.4, 12.0, 10.0, 9.0]),
            row("Total Cash From Operating Activities", &[20.0, 18.0, 16.0, 15.0]),
            row("Capital Expenditures", &[-5.0, -4.0, -3.0, -2.0]),
            row("Cash", &[10.0, 9.0, 8.0, 7.0]),
            row("Short Term Investments", &[2.0, 2.0, 2.0, 2.0]),
            row("Short Long Term Debt", &[12.0, 12.0, 12.0, 12.0]),
            row("Long Term Debt", &[60.0, 62.0, 64.0, 66.0]),
            row("Total Stockholder Equity", &[80.0, 75.0, 70.0, 65.0]),
            row("Total Current Assets", &[45.0, 43.0, 41.0, 39.0]),
            row("Total Current Liabilities", &[25.0, 24.0, 23.0, 22.0]),
            row("Net Receivables", &[12.0, 11.0, 10.0, 9.0]),
            row("Accounts Payable", &[8.0, 7.5, 7.0, 6.5]),
            row("Inventory", &[6.0, 5.5, 5.0, 4.5]),
        ]
    }

    fn sample_table() -> StatementTable {
        StatementTable::from_rows(sample_rows(), None).unwrap()
    }

    #[test]
    fn test_derive_produces_every_metric_year_aligned() {
        let derived = RatioEngine::new().derive(&sample_table());
        for metric in DerivedMetric::ALL {
            assert_eq!(
                derived.series(metric).len(),
                4,
                "{} should have one value per fiscal year",
                metric
            );
        }
    }

    #[test]
    fn test_free_cash_flow_adds_negative_capex() {
        let derived = RatioEngine::new().derive(&sample_table());
        let fcf = derived.series(DerivedMetric::FreeCashFlow);
        assert_eq!(fcf[0], Some(15.0)); // 20 + (-5)
        assert_eq!(fcf[3], Some(13.0)); // 15 + (-2)
    }

    #[test]
    fn test_margins_latest_year() {
        let derived = RatioEngine::new().derive(&sample_table());
        assert_relative_eq!(
            derived.latest(DerivedMetric::GrossMargin).unwrap(),
            25.0
        );
        assert_relative_eq!(derived.latest(DerivedMetric::EbitMargin).unwrap(), 5.0);
        assert_relative_eq!(derived.latest(DerivedMetric::NetMargin).unwrap(), 12.0);
        assert_relative_eq!(
            derived.latest(DerivedMetric::FcfMargin).unwrap(),
            12.5
        );
    }

    #[test]
    fn test_balance_sheet_ratios_latest_year() {
        let derived = RatioEngine::new().derive(&sample_table());
        assert_relative_eq!(
            derived.latest(DerivedMetric::DebtEquityRatio).unwrap(),
            0.9 // (12 + 60) / 80
        );
        assert_relative_eq!(
            derived.latest(DerivedMetric::NetDebtRatio).unwrap(),
            0.75 // (72 - 12) / 80
        );
        assert_relative_eq!(derived.latest(DerivedMetric::CurrentRatio).unwrap(), 1.8);
        assert_relative_eq!(derived.latest(DerivedMetric::CashRatio).unwrap(), 0.4);
        assert_relative_eq!(derived.latest(DerivedMetric::ReturnOnEquity).unwrap(), 18.0);
    }

    #[test]
    fn test_cash_conversion_cycle_components() {
        let derived = RatioEngine::new().derive(&sample_table());
        let dr = derived.latest(DerivedMetric::DaysReceivables).unwrap();
        let dp = derived.latest(DerivedMetric::DaysPayables).unwrap();
        let di = derived.latest(DerivedMetric::InventoryDays).unwrap();
        assert_relative_eq!(dr, 36.5, epsilon = 1e-9); // 12 / 120 * 365
        assert_relative_eq!(dp, 8.0 / 120.0 * 365.0, epsilon = 1e-9);
        assert_relative_eq!(di, 18.25, epsilon = 1e-9);
        assert_relative_eq!(
            derived.latest(DerivedMetric::CashConversionCycle).unwrap(),
            dr + dp - di,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_quality_of_earnings() {
        let derived = RatioEngine::new().derive(&sample_table());
        assert_relative_eq!(
            derived.latest(DerivedMetric::QualityOfEarnings).unwrap(),
            20.0 / 14.4,
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_zero_revenue_year_degrades_only_revenue_ratios() {
        let mut rows = sample_rows();
        rows[0] = row("Total Revenue", &[120.0, 110.0, 0.0, 90.0]);
        let table = StatementTable::from_rows(rows, None).unwrap();
        let derived = RatioEngine::new().derive(&table);

        // Year with zero revenue is undefined for revenue-denominated series
        assert_eq!(derived.series(DerivedMetric::GrossMargin)[2], None);
        assert_eq!(derived.series(DerivedMetric::DaysReceivables)[2], None);
        assert_eq!(derived.series(DerivedMetric::CashConversionCycle)[2], None);

        // Other years and other metrics still compute
        assert!(derived.series(DerivedMetric::GrossMargin)[0].is_some());
        assert!(derived.series(DerivedMetric::CurrentRatio)[2].is_some());
        assert_eq!(derived.series(DerivedMetric::FreeCashFlow)[2], Some(13.0));
    }

    #[test]
    fn test_zero_equity_degrades_equity_ratios() {
        let mut rows = sample_rows();
        rows[10] = row("Total Stockholder Equity", &[0.0, 75.0, 70.0, 65.0]);
        let table = StatementTable::from_rows(rows, None).unwrap();
        let derived = RatioEngine::new().derive(&table);

        assert_eq!(derived.latest(DerivedMetric::DebtEquityRatio), None);
        assert_eq!(derived.latest(DerivedMetric::NetDebtRatio), None);
        assert_eq!(derived.latest(DerivedMetric::ReturnOnEquity), None);
        assert!(derived.latest(DerivedMetric::GrossMargin).is_some());
    }

    #[test]
    fn test_zero_net_income_degrades_quality_of_earnings() {
        let mut rows = sample_rows();
        rows[3] = row("Net Income", &[0.0, 12.0, 10.0, 9.0]);
        let table = StatementTable::from_rows(rows, None).unwrap();
        let derived = RatioEngine::new().derive(&table);

        assert_eq!(derived.latest(DerivedMetric::QualityOfEarnings), None);
        assert_eq!(derived.latest(DerivedMetric::NetMargin), Some(0.0));
    }

    #[test]
    fn test_missing_debt_rows_default_to_zero_ratio() {
        let rows: Vec<_> = sample_rows()
            .into_iter()
            .filter(|(name, _)| name != "Short Long Term Debt" && name != "Long Term Debt")
            .collect();
        let table = StatementTable::from_rows(rows, None).unwrap();
        let derived = RatioEngine::new().derive(&table);

        assert_eq!(derived.latest(DerivedMetric::DebtEquityRatio), Some(0.0));
        assert_relative_eq!(
            derived.latest(DerivedMetric::NetDebtRatio).unwrap(),
            -12.0 / 80.0 // no debt, net of cash and short-term investments
        );
    }
}
