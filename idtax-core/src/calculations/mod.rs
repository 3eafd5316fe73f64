//! Tax calculation modules for Indonesian income tax, VAT and withholding.
//!
//! Every operation is a method on [`TaxCalculator`], split by tax type:
//!
//! | Module        | Operation |
//! |---------------|-----------|
//! | `personal`    | Progressive PPh21 with per-bracket breakdown |
//! | `vat`         | PPN at the effective or statutory rate |
//! | `withholding` | PPh23 by payment type |
//! | `corporate`   | Entity-type dispatch between flat and progressive rules |
//! | `monthly`     | Monthly effective-rate (TER) band lookup |

pub mod common;

mod calculator;
mod corporate;
mod monthly;
mod personal;
mod vat;
mod withholding;

pub use calculator::{TaxCalculationError, TaxCalculator};
