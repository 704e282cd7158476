//! Sensor configuration: pin wiring, ADC characteristics and gain settings.
//!
//! [`SensorConfig`] is the runtime view the reader works from. The firmware
//! builds it from [`board::CONFIG`], which `toml_cfg` bakes in from `cfg.toml`
//! at compile time.

use crate::hal::PinId;

/// Fixed gain of the MyoWare RAW output stage.
pub const RAW_GAIN: f64 = 200.0;

pub mod board {
    /// Board wiring and sensor settings, read from the `[esp_myoware_emg]`
    /// section of `cfg.toml`. Defaults match an ESP32-C6 DevKit with the
    /// sensor on ADC1.
    #[toml_cfg::toml_config]
    pub struct Config {
        #[default(2)]
        env_pin: u8,

        #[default(3)]
        raw_pin: u8,

        #[default(4)]
        ref_pin: u8,

        #[default(5)]
        rect_pin: u8,

        // RECT is left floating on the Wireless Shield.
        #[default(false)]
        rect_connected: bool,

        // On-board WS2812
        #[default(8)]
        status_led_pin: u8,

        #[default(12)]
        adc_bits: u8,

        #[default(3300)]
        adc_reference_mv: u16,

        // Measure the potentiometer after trimming so peak readings stay below the reference.
        #[default(50000)]
        gain_potentiometer_ohms: u32,

        #[default(true)]
        convert_output: bool,

        #[default(10)]
        sample_period_ms: u32,

        #[default(1000)]
        blink_period_ms: u32,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("ADC resolution must be at least one bit")]
    ZeroResolution,
    #[error("ADC reference voltage must be positive, got {0} V")]
    NonPositiveReference(f64),
    #[error("gain potentiometer resistance must not be negative, got {0} kOhm")]
    NegativePotentiometer(f64),
}

/// Wiring and conversion parameters of one MyoWare sensor.
///
/// Setters accept any value; use [`SensorConfig::validate`] to check the
/// invariants the conversion relies on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorConfig {
    env_pin: PinId,
    raw_pin: PinId,
    ref_pin: PinId,
    rect_pin: Option<PinId>,
    status_led_pin: PinId,
    convert_output: bool,
    adc_bits: u8,
    adc_voltage: f64,
    gain_potentiometer: f64,
}

impl Default for SensorConfig {
    /// MyoWare Wireless Shield: ENV on A3, RAW on A4, REF on A5, RECT not
    /// connected, status LED on pin 13, 12-bit ADC at 3.3 V.
    fn default() -> Self {
        Self {
            env_pin: 3,
            raw_pin: 4,
            ref_pin: 5,
            rect_pin: None,
            status_led_pin: 13,
            convert_output: false,
            adc_bits: 12,
            adc_voltage: 3.3,
            gain_potentiometer: 50.0,
        }
    }
}

impl From<&board::Config> for SensorConfig {
    fn from(board: &board::Config) -> Self {
        Self {
            env_pin: board.env_pin,
            raw_pin: board.raw_pin,
            ref_pin: board.ref_pin,
            rect_pin: board.rect_connected.then_some(board.rect_pin),
            status_led_pin: board.status_led_pin,
            convert_output: board.convert_output,
            adc_bits: board.adc_bits,
            adc_voltage: f64::from(board.adc_reference_mv) / 1000.0,
            gain_potentiometer: f64::from(board.gain_potentiometer_ohms) / 1000.0,
        }
    }
}

impl SensorConfig {
    pub fn with_env_pin(mut self, pin: PinId) -> Self {
        self.env_pin = pin;
        self
    }

    pub fn with_raw_pin(mut self, pin: PinId) -> Self {
        self.raw_pin = pin;
        self
    }

    pub fn with_ref_pin(mut self, pin: PinId) -> Self {
        self.ref_pin = pin;
        self
    }

    pub fn with_rect_pin(mut self, pin: Option<PinId>) -> Self {
        self.rect_pin = pin;
        self
    }

    pub fn with_status_led_pin(mut self, pin: PinId) -> Self {
        self.status_led_pin = pin;
        self
    }

    pub fn with_convert_output(mut self, convert: bool) -> Self {
        self.convert_output = convert;
        self
    }

    pub fn with_adc_resolution(mut self, bits: u8) -> Self {
        self.adc_bits = bits;
        self
    }

    pub fn with_adc_voltage(mut self, volts: f64) -> Self {
        self.adc_voltage = volts;
        self
    }

    pub fn with_gain_potentiometer(mut self, kilo_ohms: f64) -> Self {
        self.gain_potentiometer = kilo_ohms;
        self
    }

    pub fn env_pin(&self) -> PinId {
        self.env_pin
    }

    pub fn set_env_pin(&mut self, pin: PinId) {
        self.env_pin = pin;
    }

    pub fn raw_pin(&self) -> PinId {
        self.raw_pin
    }

    pub fn set_raw_pin(&mut self, pin: PinId) {
        self.raw_pin = pin;
    }

    pub fn ref_pin(&self) -> PinId {
        self.ref_pin
    }

    pub fn set_ref_pin(&mut self, pin: PinId) {
        self.ref_pin = pin;
    }

    /// `None` when the RECT output is not wired to the board.
    pub fn rect_pin(&self) -> Option<PinId> {
        self.rect_pin
    }

    pub fn set_rect_pin(&mut self, pin: Option<PinId>) {
        self.rect_pin = pin;
    }

    pub fn status_led_pin(&self) -> PinId {
        self.status_led_pin
    }

    pub fn set_status_led_pin(&mut self, pin: PinId) {
        self.status_led_pin = pin;
    }

    /// Whether readings are converted to millivolts at the electrodes
    /// instead of being returned as ADC codes.
    pub fn convert_output(&self) -> bool {
        self.convert_output
    }

    pub fn set_convert_output(&mut self, convert: bool) {
        self.convert_output = convert;
    }

    /// ADC resolution in bits.
    pub fn adc_resolution(&self) -> u8 {
        self.adc_bits
    }

    pub fn set_adc_resolution(&mut self, bits: u8) {
        self.adc_bits = bits;
    }

    /// ADC reference voltage in volts.
    pub fn adc_voltage(&self) -> f64 {
        self.adc_voltage
    }

    pub fn set_adc_voltage(&mut self, volts: f64) {
        self.adc_voltage = volts;
    }

    /// Gain potentiometer resistance in kOhm.
    pub fn gain_potentiometer(&self) -> f64 {
        self.gain_potentiometer
    }

    pub fn set_gain_potentiometer(&mut self, kilo_ohms: f64) {
        self.gain_potentiometer = kilo_ohms;
    }

    pub fn raw_gain(&self) -> f64 {
        RAW_GAIN
    }

    /// Gain of the ENV output, which depends on the potentiometer setting.
    pub fn env_gain(&self) -> f64 {
        RAW_GAIN * (1.0 + self.gain_potentiometer)
    }

    /// Volts represented by one ADC code.
    pub fn volts_per_code(&self) -> f64 {
        let max_code = 1u64
            .checked_shl(u32::from(self.adc_bits))
            .map_or(u64::MAX, |full_scale| full_scale - 1);
        self.adc_voltage / max_code as f64
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.adc_bits == 0 {
            return Err(ConfigError::ZeroResolution);
        }
        if !(self.adc_voltage > 0.0) {
            return Err(ConfigError::NonPositiveReference(self.adc_voltage));
        }
        if !(self.gain_potentiometer >= 0.0) {
            return Err(ConfigError::NegativePotentiometer(self.gain_potentiometer));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tolerance: f64) -> bool {
        (a - b).abs() <= tolerance
    }

    #[test]
    fn defaults_describe_wireless_shield() {
        let config = SensorConfig::default();
        assert_eq!(config.env_pin(), 3);
        assert_eq!(config.raw_pin(), 4);
        assert_eq!(config.ref_pin(), 5);
        assert_eq!(config.rect_pin(), None);
        assert_eq!(config.status_led_pin(), 13);
        assert!(!config.convert_output());
        assert_eq!(config.adc_resolution(), 12);
        assert_eq!(config.adc_voltage(), 3.3);
        assert_eq!(config.gain_potentiometer(), 50.0);
        assert_eq!(config.raw_gain(), 200.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn volts_per_code_for_12_bit_3v3() {
        let config = SensorConfig::default();
        assert!(close(config.volts_per_code(), 3.3 / 4095.0, 1e-15));
        assert!(close(config.volts_per_code(), 0.000_805_8, 1e-7));
    }

    #[test]
    fn volts_per_code_tracks_resolution_and_reference() {
        let config = SensorConfig::default()
            .with_adc_resolution(10)
            .with_adc_voltage(5.0);
        assert!(close(config.volts_per_code(), 5.0 / 1023.0, 1e-15));
    }

    #[test]
    fn zero_bits_gives_garbage_not_panic() {
        let config = SensorConfig::default().with_adc_resolution(0);
        assert!(config.volts_per_code().is_infinite());
        assert_eq!(config.validate(), Err(ConfigError::ZeroResolution));

        let wide = SensorConfig::default().with_adc_resolution(200);
        assert!(wide.volts_per_code() > 0.0);
    }

    #[test]
    fn env_gain_follows_potentiometer() {
        let mut config = SensorConfig::default();
        assert_eq!(config.env_gain(), 10_200.0);

        config.set_gain_potentiometer(0.0);
        assert_eq!(config.env_gain(), 200.0);
    }

    #[test]
    fn setters_round_trip_without_validation() {
        let mut config = SensorConfig::default();
        config.set_env_pin(30);
        config.set_raw_pin(31);
        config.set_ref_pin(32);
        config.set_rect_pin(Some(33));
        config.set_status_led_pin(2);
        config.set_convert_output(true);
        config.set_adc_resolution(16);
        config.set_adc_voltage(-1.0);
        config.set_gain_potentiometer(10.0);

        assert_eq!(config.env_pin(), 30);
        assert_eq!(config.raw_pin(), 31);
        assert_eq!(config.ref_pin(), 32);
        assert_eq!(config.rect_pin(), Some(33));
        assert_eq!(config.status_led_pin(), 2);
        assert!(config.convert_output());
        assert_eq!(config.adc_resolution(), 16);
        assert_eq!(config.adc_voltage(), -1.0);
        assert_eq!(config.gain_potentiometer(), 10.0);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NonPositiveReference(-1.0))
        );
    }

    #[test]
    fn validate_rejects_negative_potentiometer() {
        let config = SensorConfig::default().with_gain_potentiometer(-0.5);
        assert_eq!(
            config.validate(),
            Err(ConfigError::NegativePotentiometer(-0.5))
        );
    }

    #[test]
    fn board_config_converts_units() {
        let board = board::Config {
            env_pin: 2,
            raw_pin: 3,
            ref_pin: 4,
            rect_pin: 5,
            rect_connected: false,
            status_led_pin: 8,
            adc_bits: 12,
            adc_reference_mv: 3300,
            gain_potentiometer_ohms: 47_000,
            convert_output: true,
            sample_period_ms: 10,
            blink_period_ms: 1000,
        };

        let config = SensorConfig::from(&board);
        assert_eq!(config.env_pin(), 2);
        assert_eq!(config.raw_pin(), 3);
        assert_eq!(config.ref_pin(), 4);
        assert_eq!(config.rect_pin(), None);
        assert_eq!(config.status_led_pin(), 8);
        assert!(config.convert_output());
        assert!(close(config.adc_voltage(), 3.3, 1e-12));
        assert!(close(config.gain_potentiometer(), 47.0, 1e-12));

        let wired = board::Config {
            rect_connected: true,
            ..board
        };
        assert_eq!(SensorConfig::from(&wired).rect_pin(), Some(5));
    }
}
