//! Output helpers shared by the subcommands.

use anyhow::{Context as _, Result};
use serde::Serialize;

use dlb_core::Fine;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{rendered}");
    Ok(())
}

/// Render a fine amount held in minor units, e.g. `INR 1000.00`.
pub fn format_amount(fine: &Fine) -> String {
    format!("{} {}.{:02}", fine.currency, fine.amount / 100, fine.amount % 100)
}

/// Section label as shown in listings, e.g. `§ 39A`.
pub fn section_label(number: &str) -> String {
    format!("§ {number}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use dlb_core::Timestamp;

    #[test]
    fn amount_uses_minor_units() {
        let fine = Fine {
            id: "fine-1".parse().unwrap(),
            amount: 150_005,
            currency: "INR".into(),
            description: "late filing".into(),
            jurisdiction_id: "jur-1".parse().unwrap(),
            last_updated: Timestamp::now(),
        };
        assert_eq!(format_amount(&fine), "INR 1500.05");
    }
}
