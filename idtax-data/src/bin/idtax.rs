use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use idtax_core::format::{format_bracket_label, format_currency, format_percentage};
use idtax_core::{CorporateTaxResult, TaxCalculator, TaxResult, TaxRules, WithholdingType};
use idtax_data::{ClientLoader, DashboardTaxSummary, assess_clients, parse_amount};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Indonesian tax calculator for the 2025 tax year.
///
/// Amounts are in rupiah and may use `,` or `_` as digit separators.
#[derive(Debug, Parser)]
#[command(name = "idtax")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print results as JSON instead of formatted text.
    #[arg(long, global = true, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Progressive personal income tax (PPh21).
    Personal {
        /// Annual gross income.
        #[arg(long, value_parser = parse_amount)]
        gross: Decimal,

        /// Deductions subtracted before the brackets are applied.
        #[arg(long, value_parser = parse_amount, default_value = "0")]
        deductions: Decimal,
    },

    /// Value-added tax (PPN).
    Vat {
        #[arg(long, value_parser = parse_amount)]
        amount: Decimal,

        /// Apply the statutory rate for luxury goods.
        #[arg(long, default_value_t = false)]
        luxury: bool,
    },

    /// Withholding tax (PPh23) by payment type.
    Withholding {
        /// One of: dividend, interest, royalty, service.
        #[arg(long)]
        kind: String,

        #[arg(long, value_parser = parse_amount)]
        amount: Decimal,
    },

    /// Corporate income tax by legal entity type.
    Corporate {
        /// PT, PT_PMA, CV, FIRMA, UD or PERORANGAN. Other tags use the standard rate.
        #[arg(long)]
        entity: String,

        /// Annual revenue.
        #[arg(long, value_parser = parse_amount)]
        revenue: Decimal,
    },

    /// Monthly effective-rate withholding (TER).
    Monthly {
        /// Monthly gross income.
        #[arg(long, value_parser = parse_amount)]
        income: Decimal,
    },

    /// Assess every client in a CSV file and print dashboard totals.
    Clients {
        /// Path to the client CSV file.
        #[arg(short, long)]
        file: PathBuf,

        /// Reference date for "this month" (defaults to today).
        #[arg(long)]
        as_of: Option<NaiveDate>,
    },

    /// Print the built-in rule table.
    Rules,
}

// ─── tracing ─────────────────────────────────────────────────────────────────

/// Initialise the tracing subscriber.
///
/// * Honours `RUST_LOG` when set.
/// * Falls back to `info` so normal runs are quiet.
/// * Strips timestamps and target names to keep CLI output clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::from("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

// ─── output ──────────────────────────────────────────────────────────────────

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("Failed to serialise result")?;
    println!("{json}");
    Ok(())
}

fn print_personal(result: &TaxResult) {
    println!("Gross income:    {}", format_currency(result.gross_income));
    println!("Deductions:      {}", format_currency(result.deductions));
    println!("Taxable income:  {}", format_currency(result.taxable_income));
    for line in &result.breakdown {
        println!(
            "  {:<36} {:>7}  {}",
            line.bracket,
            format_percentage(line.rate),
            format_currency(line.tax)
        );
    }
    println!("Total tax:       {}", format_currency(result.total_tax));
    println!("Net income:      {}", format_currency(result.net_income));
    println!(
        "Effective rate:  {}",
        format_percentage(result.effective_rate / Decimal::ONE_HUNDRED)
    );
}

fn print_corporate(result: &CorporateTaxResult) {
    println!("Entity type:     {}", result.legal_entity_type);
    println!("Revenue:         {}", format_currency(result.revenue));
    println!("Tax rate:        {}", format_percentage(result.tax_rate));
    println!("Total tax:       {}", format_currency(result.total_tax));
    println!("Net revenue:     {}", format_currency(result.net_revenue));
}

fn print_summary(summary: &DashboardTaxSummary) {
    for assessment in &summary.assessments {
        let monthly = assessment
            .monthly_withholding
            .map(format_currency)
            .unwrap_or_else(|| "—".to_string());
        println!(
            "{:<32} {:<10} {:>24} {:>16}",
            assessment.company_name,
            assessment.corporate.legal_entity_type,
            format_currency(assessment.corporate.total_tax),
            monthly
        );
    }
    println!();
    println!("Total clients:         {}", summary.total_clients);
    println!(
        "Annual corporate tax:  {}",
        format_currency(summary.annual_corporate_tax)
    );
    println!("This month tax:        {}", format_currency(summary.this_month_tax));
    println!(
        "Upcoming payments:     {} (month of {})",
        summary.upcoming_payments, summary.as_of
    );
}

fn print_rules(rules: &TaxRules<'_>) -> Result<()> {
    write_rules(&mut std::io::stdout().lock(), rules).context("Failed to print rules")
}

fn write_rules(
    out: &mut impl Write,
    rules: &TaxRules<'_>,
) -> io::Result<()> {
    writeln!(out, "Tax year {}", rules.tax_year)?;
    writeln!(out, "Personal brackets:")?;
    let mut previous = Decimal::ZERO;
    for bracket in rules.personal_brackets {
        writeln!(
            out,
            "  {:<36} {}",
            format_bracket_label(previous, bracket.max_income),
            format_percentage(bracket.tax_rate)
        )?;
        if let Some(max) = bracket.max_income {
            previous = max;
        }
    }
    writeln!(
        out,
        "VAT:             {} effective, {} luxury",
        format_percentage(rules.vat_effective_rate),
        format_percentage(rules.vat_standard_rate)
    )?;
    writeln!(out, "Withholding (PPh23):")?;
    for kind in WithholdingType::ALL {
        writeln!(
            out,
            "  {:<36} {}",
            kind.as_str(),
            format_percentage(rules.withholding.rate_for(kind))
        )?;
    }
    writeln!(
        out,
        "Corporate:       {} ({} below {})",
        format_percentage(rules.corporate_rate),
        format_percentage(rules.small_business_rate),
        format_currency(rules.small_business_threshold)
    )?;
    writeln!(out, "Monthly bands (TER):")?;
    for band in rules.monthly_bands {
        let range = match band.max_income {
            Some(max) => format!(
                "{} - {}",
                format_currency(band.min_income),
                format_currency(max)
            ),
            None => format!("{} and above", format_currency(band.min_income)),
        };
        writeln!(out, "  {:<36} {}", range, format_percentage(band.rate))?;
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let calculator = TaxCalculator::default();
    debug!(tax_year = calculator.rules().tax_year, "using built-in rules");

    match cli.command {
        Command::Personal { gross, deductions } => {
            let result = calculator.calculate_personal_tax(gross, deductions);
            if cli.json {
                print_json(&result)?;
            } else {
                print_personal(&result);
            }
        }
        Command::Vat { amount, luxury } => {
            let vat = calculator.calculate_vat(amount, luxury);
            if cli.json {
                print_json(&vat)?;
            } else {
                println!("VAT: {}", format_currency(vat));
            }
        }
        Command::Withholding { kind, amount } => {
            let withholding = calculator
                .calculate_withholding(&kind, amount)
                .with_context(|| format!("Cannot calculate withholding for '{kind}'"))?;
            if cli.json {
                print_json(&withholding)?;
            } else {
                println!("Withholding ({kind}): {}", format_currency(withholding));
            }
        }
        Command::Corporate { entity, revenue } => {
            let result = calculator.calculate_corporate_tax(&entity, revenue);
            if cli.json {
                print_json(&result)?;
            } else {
                print_corporate(&result);
            }
        }
        Command::Monthly { income } => {
            let withholding = calculator.calculate_monthly_withholding(income);
            if cli.json {
                print_json(&withholding)?;
            } else {
                println!("Monthly withholding: {}", format_currency(withholding));
            }
        }
        Command::Clients { file, as_of } => {
            info!("Loading clients from: {}", file.display());

            let reader =
                File::open(&file).with_context(|| format!("Failed to open: {}", file.display()))?;
            let records = ClientLoader::load(reader)
                .with_context(|| format!("Failed to load clients: {}", file.display()))?;

            info!("Loaded {} clients", records.len());

            let as_of = as_of.unwrap_or_else(|| Local::now().date_naive());
            let summary = assess_clients(&calculator, &records, as_of);
            if cli.json {
                print_json(&summary)?;
            } else {
                print_summary(&summary);
            }
        }
        Command::Rules => {
            if cli.json {
                print_json(calculator.rules())?;
            } else {
                print_rules(calculator.rules())?;
            }
        }
    }

    Ok(())
}
