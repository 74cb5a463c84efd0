use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use payplan_core::plans::balance::{self, Balance80Input};
use payplan_core::plans::deferred::{self, DeferredInput};
use payplan_core::plans::spot_cash::{self, SpotCashInput};
use payplan_core::plans::spot_down::{self, SpotDownInput};
use payplan_core::plans::twenty_eighty::{self, TwentyEightyInput};

use crate::input;

/// Arguments for a spot cash quote
#[derive(Args)]
pub struct SpotCashArgs {
    /// Total contract price
    #[arg(long)]
    pub tcp: Option<Decimal>,

    /// Term discount percentage (e.g. 5 for 5%)
    #[arg(long)]
    pub discount: Option<Decimal>,

    /// Reservation fee amount
    #[arg(long, default_value = "0")]
    pub reservation_fee: Decimal,

    /// Registration fee percentage
    #[arg(long, default_value = "0")]
    pub registration_fee_percent: Decimal,

    /// Move-in fee percentage
    #[arg(long, default_value = "0")]
    pub move_in_fee_percent: Decimal,

    /// Charge the registration fee on the gross (pre-VAT) price instead of the TLP
    #[arg(long)]
    pub gross_of_vat_reg_fee: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a spot down payment quote
#[derive(Args)]
pub struct SpotDownArgs {
    /// Total contract price
    #[arg(long)]
    pub tcp: Option<Decimal>,

    /// Discount percentage applied to the 20% down payment
    #[arg(long)]
    pub discount: Option<Decimal>,

    /// Reservation fee amount
    #[arg(long, default_value = "0")]
    pub reservation_fee: Decimal,

    /// Registration fee percentage
    #[arg(long, default_value = "0")]
    pub registration_fee_percent: Decimal,

    /// Move-in fee percentage
    #[arg(long, default_value = "0")]
    pub move_in_fee_percent: Decimal,

    /// Charge the registration fee on the gross (pre-VAT) price instead of the TLP
    #[arg(long)]
    pub gross_of_vat_reg_fee: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a deferred payment quote
#[derive(Args)]
pub struct DeferredArgs {
    /// Total contract price
    #[arg(long)]
    pub tcp: Option<Decimal>,

    /// Term lengths in months (e.g. 12,18,24)
    #[arg(long, value_delimiter = ',')]
    pub terms: Vec<i32>,

    /// Reservation fee amount
    #[arg(long, default_value = "0")]
    pub reservation_fee: Decimal,

    /// Registration fee percentage
    #[arg(long, default_value = "0")]
    pub registration_fee_percent: Decimal,

    /// Move-in fee percentage
    #[arg(long, default_value = "0")]
    pub move_in_fee_percent: Decimal,

    /// Charge the registration fee on the gross (pre-VAT) price instead of the TLP
    #[arg(long)]
    pub gross_of_vat_reg_fee: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a 20/80 quote
#[derive(Args)]
pub struct TwentyEightyArgs {
    /// Total contract price
    #[arg(long)]
    pub tcp: Option<Decimal>,

    /// Term lengths in months for the 20% down payment (e.g. 12,18,24)
    #[arg(long, value_delimiter = ',')]
    pub terms: Vec<i32>,

    /// Reservation fee amount
    #[arg(long, default_value = "0")]
    pub reservation_fee: Decimal,

    /// Registration fee percentage
    #[arg(long, default_value = "0")]
    pub registration_fee_percent: Decimal,

    /// Move-in fee percentage
    #[arg(long, default_value = "0")]
    pub move_in_fee_percent: Decimal,

    /// Charge the registration fee on the gross (pre-VAT) price instead of the TLP
    #[arg(long)]
    pub gross_of_vat_reg_fee: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for an 80%-balance amortization quote
#[derive(Args)]
pub struct Balance80Args {
    /// Total contract price
    #[arg(long)]
    pub tcp: Option<Decimal>,

    /// Term length in years (supported brackets: 1-10)
    #[arg(long)]
    pub years: Option<u32>,

    /// Nominal annual interest rate percentage quoted with the term
    #[arg(long, default_value = "0")]
    pub rate: Decimal,

    /// Registration fee amount folded into the with-registration column
    #[arg(long, default_value = "0")]
    pub registration_fee: Decimal,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_spot_cash(args: SpotCashArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: SpotCashInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SpotCashInput {
            tcp: args.tcp.ok_or("--tcp is required (or provide --input)")?,
            discount_percent: args
                .discount
                .ok_or("--discount is required (or provide --input)")?,
            reservation_fee: args.reservation_fee,
            registration_fee_percent: args.registration_fee_percent,
            move_in_fee_percent: args.move_in_fee_percent,
            use_net_of_vat: !args.gross_of_vat_reg_fee,
        }
    };
    let result = spot_cash::compute(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_spot_down(args: SpotDownArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: SpotDownInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        SpotDownInput {
            tcp: args.tcp.ok_or("--tcp is required (or provide --input)")?,
            discount_percent: args
                .discount
                .ok_or("--discount is required (or provide --input)")?,
            reservation_fee: args.reservation_fee,
            registration_fee_percent: args.registration_fee_percent,
            move_in_fee_percent: args.move_in_fee_percent,
            use_net_of_vat: !args.gross_of_vat_reg_fee,
        }
    };
    let result = spot_down::compute(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_deferred(args: DeferredArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: DeferredInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        DeferredInput {
            tcp: args.tcp.ok_or("--tcp is required (or provide --input)")?,
            reservation_fee: args.reservation_fee,
            registration_fee_percent: args.registration_fee_percent,
            move_in_fee_percent: args.move_in_fee_percent,
            terms: args.terms,
            use_net_of_vat: !args.gross_of_vat_reg_fee,
        }
    };
    let result = deferred::compute(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_twenty_eighty(args: TwentyEightyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: TwentyEightyInput = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        TwentyEightyInput {
            tcp: args.tcp.ok_or("--tcp is required (or provide --input)")?,
            reservation_fee: args.reservation_fee,
            registration_fee_percent: args.registration_fee_percent,
            move_in_fee_percent: args.move_in_fee_percent,
            terms_20: args.terms,
            use_net_of_vat: !args.gross_of_vat_reg_fee,
        }
    };
    let result = twenty_eighty::compute(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_balance_80(args: Balance80Args) -> Result<Value, Box<dyn std::error::Error>> {
    let plan_input: Balance80Input = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        Balance80Input {
            tcp: args.tcp.ok_or("--tcp is required (or provide --input)")?,
            years: args.years.ok_or("--years is required (or provide --input)")?,
            rate: args.rate,
            registration_fee: args.registration_fee,
        }
    };
    let result = balance::compute(&plan_input)?;
    Ok(serde_json::to_value(result)?)
}
