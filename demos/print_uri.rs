//! Print the dashboard URI for a simulated battery voltage.
//!
//! Run with:
//! ```sh
//! cargo run --example print_uri -- 3.75
//! ```

use inkdash::{write_uri_string, UriBuffer};

fn main() -> Result<(), inkdash::Error> {
    let voltage: f64 = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(3.75);

    // Stands in for the display driver's battery read
    let mut read_battery = || voltage;

    let mut uri = UriBuffer::new();
    let reading = write_uri_string(&mut read_battery, &mut uri)?;

    println!("Battery: {} ({}%)", reading.voltage_label(), reading.percentage);
    println!("{}", uri);
    Ok(())
}
