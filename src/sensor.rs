//! MyoWare 2.0 muscle sensor reader.
//!
//! Reads the ENV, RAW and RECT outputs through an [`AnalogRead`] and, when
//! conversion is enabled, scales the ADC codes back to the amplitude of the
//! muscle activity at the electrodes in millivolts.

use log::{debug, warn};

use crate::config::SensorConfig;
use crate::hal::{AnalogRead, DigitalWrite, Millis, PinId};
use crate::led::StatusBlink;

/// Value returned by the sentinel-style read calls when a reading fails.
pub const SENSOR_ERROR: f64 = -9999.0;

/// Output pins of the MyoWare sensor.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "esp32c6", derive(defmt::Format))]
pub enum OutputType {
    /// EMG envelope (ENV pin)
    #[default]
    Envelope = 0,
    /// Amplified and filtered EMG (RAW pin), reference offset removed
    Raw = 1,
    /// Full-wave rectified, amplified and filtered EMG (RECT pin)
    Rectified = 2,
}

impl TryFrom<u8> for OutputType {
    type Error = u8;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Envelope),
            1 => Ok(Self::Raw),
            2 => Ok(Self::Rectified),
            other => Err(other),
        }
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum Error<E> {
    #[error("unknown sensor output {0}")]
    UnknownOutput(u8),
    #[error("{0:?} output is not wired to the board")]
    PinNotConnected(OutputType),
    #[error("ADC read on pin {pin} failed")]
    Adc { pin: PinId, error: E },
}

pub struct MyoWare<A> {
    adc: A,
    config: SensorConfig,
    blink: StatusBlink,
}

impl<A: AnalogRead> MyoWare<A> {
    pub fn new(adc: A, config: SensorConfig) -> Self {
        Self {
            adc,
            config,
            blink: StatusBlink::new(),
        }
    }

    pub fn config(&self) -> &SensorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut SensorConfig {
        &mut self.config
    }

    pub fn blink_state(&self) -> &StatusBlink {
        &self.blink
    }

    /// Gives back the ADC, e.g. to share it with another driver.
    pub fn release(self) -> A {
        self.adc
    }

    /// Reads one sensor output.
    ///
    /// Returns the ADC code (RAW minus REF for [`OutputType::Raw`]) or, with
    /// conversion enabled, the amplitude at the electrodes in millivolts.
    pub fn read_output(&mut self, output: OutputType) -> Result<f64, Error<A::Error>> {
        let (code, gain) = match output {
            OutputType::Envelope => {
                let env = f64::from(self.read_pin(self.config.env_pin())?);
                (env, self.config.env_gain())
            }
            OutputType::Raw => {
                let raw = i32::from(self.read_pin(self.config.raw_pin())?);
                let reference = i32::from(self.read_pin(self.config.ref_pin())?);
                (f64::from(raw - reference), self.config.raw_gain())
            }
            OutputType::Rectified => {
                let pin = self
                    .config
                    .rect_pin()
                    .ok_or(Error::PinNotConnected(OutputType::Rectified))?;
                (f64::from(self.read_pin(pin)?), self.config.raw_gain())
            }
        };

        if !self.config.convert_output() {
            debug!("{:?} output: {} codes", output, code);
            return Ok(code);
        }

        let millivolts = code * self.config.volts_per_code() / gain * 1000.0;
        debug!("{:?} output: {} mV", output, millivolts);
        Ok(millivolts)
    }

    /// Like [`MyoWare::read_output`], but looks the output up by its numeric
    /// code (0 ENV, 1 RAW, 2 RECT).
    pub fn read_output_by_code(&mut self, code: u8) -> Result<f64, Error<A::Error>> {
        let output = OutputType::try_from(code).map_err(Error::UnknownOutput)?;
        self.read_output(output)
    }

    /// Reads an output, collapsing any failure into [`SENSOR_ERROR`].
    pub fn read_output_or_sentinel(&mut self, output: OutputType) -> f64 {
        self.read_output(output).unwrap_or_else(|e| {
            warn!("sensor read failed: {:?}", e);
            SENSOR_ERROR
        })
    }

    /// Reads an output by numeric code; an unrecognized code or a failed read
    /// yields [`SENSOR_ERROR`].
    pub fn read_output_code(&mut self, code: u8) -> f64 {
        self.read_output_by_code(code).unwrap_or_else(|e| {
            warn!("sensor read failed: {:?}", e);
            SENSOR_ERROR
        })
    }

    /// Toggles the status LED once more than `period_ms` has passed since the
    /// previous toggle. Never blocks; call it from the main loop.
    ///
    /// Returns whether the LED was toggled. A failed write leaves the timer
    /// untouched so the next call retries.
    pub fn blink_status_led<W, C>(
        &mut self,
        out: &mut W,
        clock: &C,
        period_ms: u32,
    ) -> Result<bool, W::Error>
    where
        W: DigitalWrite,
        C: Millis,
    {
        let now = clock.millis();
        let Some(level) = self.blink.due(now, period_ms) else {
            return Ok(false);
        };
        out.digital_write(self.config.status_led_pin(), level)?;
        self.blink.mark_toggled(now);
        Ok(true)
    }

    fn read_pin(&mut self, pin: PinId) -> Result<u16, Error<A::Error>> {
        self.adc
            .analog_read(pin)
            .map_err(|error| Error::Adc { pin, error })
    }
}
