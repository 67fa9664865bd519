//! `webcrypto usages`: show which usages each algorithm's keys get by default.

use crate::alg::Algorithm;
use crate::cli::output;
use crate::errors::Result;
use crate::usages::{infer_usages, infer_usages_by_name};

/// Execute the `usages` command.
pub fn execute(alg: Option<&str>) -> Result<()> {
    match alg {
        Some(name) => {
            let pair = infer_usages_by_name(name)?;
            println!("{pair}");
        }
        None => {
            let rows: Vec<_> = Algorithm::ALL
                .iter()
                .map(|alg| (*alg, infer_usages(*alg)))
                .collect();
            output::print_usages_table(&rows);
        }
    }
    Ok(())
}
