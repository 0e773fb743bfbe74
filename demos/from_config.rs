//! Build dashboard URIs from a YAML config file.
//!
//! Run with:
//! ```sh
//! INKDASH_SERVER_URL=http://localhost:8000 \
//!   cargo run --example from_config --features config -- demos/dashboard.yaml
//! ```

use inkdash::{BatteryReading, DashboardConfig, DashboardUri, UriBuffer};

fn main() -> Result<(), inkdash::Error> {
    let config = match std::env::args().nth(1) {
        Some(path) => DashboardConfig::load(path)?,
        None => DashboardConfig::default(),
    }
    .with_env_overrides();

    let builder = DashboardUri::from_config(&config);
    let mut uri = UriBuffer::new();

    // Sweep a discharge curve
    for millivolts in (2900..=4300).step_by(200) {
        let reading = BatteryReading::from_voltage(f64::from(millivolts) / 1000.0);
        builder.write_reading(&reading, &mut uri)?;
        println!("{:>3}%  {}", reading.percentage, uri);
    }

    Ok(())
}
