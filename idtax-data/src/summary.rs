//! Per-client tax assessments and dashboard totals.

use chrono::{Datelike, NaiveDate};
use idtax_core::{CorporateTaxResult, TaxCalculator};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::loader::ClientRecord;

/// Tax figures for a single client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientAssessment {
    pub company_name: String,
    pub corporate: CorporateTaxResult,

    /// `None` when the client has no monthly gross income on file.
    pub monthly_withholding: Option<Decimal>,
}

/// Aggregate figures shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DashboardTaxSummary {
    pub as_of: NaiveDate,
    pub total_clients: usize,
    pub annual_corporate_tax: Decimal,

    /// Sum of monthly withholding across clients with a monthly income.
    pub this_month_tax: Decimal,

    /// Clients whose next payment falls in the same month as `as_of`.
    pub upcoming_payments: usize,

    pub assessments: Vec<ClientAssessment>,
}

/// Assesses every client and totals the results.
pub fn assess_clients(
    calculator: &TaxCalculator<'_>,
    records: &[ClientRecord],
    as_of: NaiveDate,
) -> DashboardTaxSummary {
    let assessments: Vec<ClientAssessment> = records
        .iter()
        .map(|record| assess_client(calculator, record))
        .collect();

    let annual_corporate_tax: Decimal = assessments.iter().map(|a| a.corporate.total_tax).sum();
    let this_month_tax: Decimal = assessments
        .iter()
        .filter_map(|a| a.monthly_withholding)
        .sum();
    let upcoming_payments = records
        .iter()
        .filter_map(|r| r.next_payment)
        .filter(|date| same_month(*date, as_of))
        .count();

    debug!(
        clients = records.len(),
        annual_corporate_tax = %annual_corporate_tax,
        this_month_tax = %this_month_tax,
        "Client assessments totalled"
    );

    DashboardTaxSummary {
        as_of,
        total_clients: records.len(),
        annual_corporate_tax,
        this_month_tax,
        upcoming_payments,
        assessments,
    }
}

fn assess_client(
    calculator: &TaxCalculator<'_>,
    record: &ClientRecord,
) -> ClientAssessment {
    ClientAssessment {
        company_name: record.company_name.clone(),
        corporate: calculator
            .calculate_corporate_tax(&record.legal_entity_type, record.annual_revenue),
        monthly_withholding: record
            .monthly_gross_income
            .map(|income| calculator.calculate_monthly_withholding(income)),
    }
}

fn same_month(
    date: NaiveDate,
    as_of: NaiveDate,
) -> bool {
    date.year() == as_of.year() && date.month() == as_of.month()
}
