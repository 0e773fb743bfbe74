//! Battery sampling.

use serde::Serialize;

use crate::battery_percentage;

/// Source of battery voltage samples.
///
/// On an Inkplate this wraps the display driver's battery read. Any
/// `FnMut() -> f64` closure is a sensor, which keeps tests and demos free of
/// hardware.
///
/// # Example
///
/// ```
/// use inkdash::{BatteryReading, BatterySensor};
///
/// struct Inkplate {
///     adc_volts: f64,
/// }
///
/// impl BatterySensor for Inkplate {
///     fn read_battery_voltage(&mut self) -> f64 {
///         self.adc_volts
///     }
/// }
///
/// let mut display = Inkplate { adc_volts: 4.0 };
/// let reading = BatteryReading::sample(&mut display);
/// assert_eq!(reading.percentage, 83);
/// ```
pub trait BatterySensor {
    /// Read the current battery voltage in volts.
    fn read_battery_voltage(&mut self) -> f64;
}

impl<F> BatterySensor for F
where
    F: FnMut() -> f64,
{
    fn read_battery_voltage(&mut self) -> f64 {
        self()
    }
}

/// A single battery sample: the raw voltage and its estimated percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatteryReading {
    /// Battery voltage in volts
    pub voltage: f64,

    /// Estimated remaining charge (0-100)
    pub percentage: u8,
}

impl BatteryReading {
    /// Build a reading from a known voltage.
    pub fn from_voltage(voltage: f64) -> Self {
        Self {
            voltage,
            percentage: battery_percentage(voltage),
        }
    }

    /// Take one sample from the sensor.
    pub fn sample<S: BatterySensor + ?Sized>(sensor: &mut S) -> Self {
        let reading = Self::from_voltage(sensor.read_battery_voltage());
        tracing::debug!(
            "Battery sample: {:.3}V -> {}%",
            reading.voltage,
            reading.percentage
        );
        reading
    }

    /// Voltage as shown on the dashboard, one decimal place (e.g. "3.8V").
    pub fn voltage_label(&self) -> String {
        voltage_label(self.voltage)
    }

    /// Whether the battery is fully drained by the estimate.
    pub fn is_empty(&self) -> bool {
        self.percentage == 0
    }
}

/// Format volts with one decimal place and a unit suffix.
pub(crate) fn voltage_label(voltage: f64) -> String {
    format!("{:.1}V", voltage)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_voltage() {
        let reading = BatteryReading::from_voltage(3.75);
        assert_eq!(reading.voltage, 3.75);
        assert_eq!(reading.percentage, 62);
        assert!(!reading.is_empty());

        assert!(BatteryReading::from_voltage(2.8).is_empty());
    }

    #[test]
    fn test_sample_from_closure() {
        let mut calls = 0;
        let mut sensor = || {
            calls += 1;
            3.6
        };

        let reading = BatteryReading::sample(&mut sensor);
        assert_eq!(reading.percentage, 50);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_sample_from_trait_object() {
        let mut sensor = || 4.5;
        let dyn_sensor: &mut dyn BatterySensor = &mut sensor;

        let reading = BatteryReading::sample(dyn_sensor);
        assert_eq!(reading.percentage, 100);
    }

    #[test]
    fn test_voltage_label_one_decimal() {
        assert_eq!(BatteryReading::from_voltage(3.75).voltage_label(), "3.8V");
        assert_eq!(BatteryReading::from_voltage(4.0).voltage_label(), "4.0V");
        assert_eq!(BatteryReading::from_voltage(3.14159).voltage_label(), "3.1V");
        assert_eq!(BatteryReading::from_voltage(3.96).voltage_label(), "4.0V");
    }

    #[test]
    fn test_reading_serialization() {
        let reading = BatteryReading::from_voltage(3.6);
        let json = serde_json::to_string(&reading).unwrap();
        assert!(json.contains("\"voltage\":3.6"));
        assert!(json.contains("\"percentage\":50"));
    }
}
