//! Holiday lookup command
//!
//! Handles `crier holiday`: shows which holiday, if any, a date resolves to
//! under the configured calendar. Purely local, no network access.

use anyhow::Result;
use chrono::NaiveDate;
use crier_core::holiday::HolidayCalendar;

use crate::app::{self, InitOptions};

/// Print the holiday resolution for the given date
pub fn run(date: NaiveDate) -> Result<()> {
    let ctx = app::initialize(InitOptions::command())?;
    let calendar = HolidayCalendar::new(ctx.config.holidays.clone());

    match calendar.resolve(date) {
        Some(holiday) => {
            println!("{} is {}", date, holiday.name);
            if !holiday.hashtags.is_empty() {
                println!("Hashtags: {}", holiday.hashtags.join(" "));
            }
        }
        None => println!("{} is not a configured holiday", date),
    }

    Ok(())
}
