//! Prints the lunisolar date and rokuyō advice for today or a given date.
//!
//! ```text
//! cargo run --example quickstart -- 2017-06-24
//! RUST_LOG=qreki=debug cargo run --example quickstart -- "2023/03/22 12:00"
//! ```

use flexi_logger::Logger;
use qreki::{civil, Calendar, CalendarConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _logger = Logger::try_with_env_or_str("warn")?.start()?;

    let calendar = Calendar::new(CalendarConfig::default())?;

    let Some(arg) = std::env::args().nth(1) else {
        let q = calendar.today()?;
        println!("今日は旧暦の{q}です。{}", q.rokuyou().explanation());
        return Ok(());
    };

    let datetime = match civil::parse_datetime(&arg, calendar.offset()) {
        Ok(datetime) => datetime,
        Err(err) => {
            log::info!("{err}");
            println!("日付を入力して下さい");
            return Ok(());
        }
    };
    let q = calendar.convert(&datetime)?;
    println!(
        "{}は旧暦の{q}です。{}",
        datetime.format("%Y-%m-%d"),
        q.rokuyou().explanation()
    );
    Ok(())
}
