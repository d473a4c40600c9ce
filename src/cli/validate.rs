use colored::Colorize;

use qbmigrate::settings::load_settings;
use qbmigrate::validator::validate;

use super::{load_input, InputArgs};

pub fn run(input: &InputArgs) -> anyhow::Result<()> {
    let data = load_input(input, &load_settings())?;
    let result = validate(&data);

    if result.is_valid {
        println!(
            "{} {} records, no integrity problems",
            "OK".green().bold(),
            data.total_records()
        );
        return Ok(());
    }
    for e in &result.errors {
        println!("{} {e}", "\u{2717}".red());
    }
    anyhow::bail!("{} integrity problems found", result.errors.len())
}
