// ─────────────────────────────────────────────────────────────────────────────
// Platform seams the sensor driver is written against, plus the shims that let
// concrete HALs satisfy them. The driver only ever talks to numbered pins, so
// every shim maps a `PinId` onto whatever typed pin the HAL hands out.

use embedded_hal::digital::{OutputPin, PinState};

/// Board pin number as wired to the sensor (GPIO number on ESP targets).
pub type PinId = u8;

/// One-shot conversion of an analog pin into an ADC code.
pub trait AnalogRead {
    type Error: core::fmt::Debug;

    fn analog_read(&mut self, pin: PinId) -> Result<u16, Self::Error>;
}

/// Drives a numbered digital output to a level.
pub trait DigitalWrite {
    type Error: core::fmt::Debug;

    fn digital_write(&mut self, pin: PinId, level: PinState) -> Result<(), Self::Error>;
}

/// Monotonic millisecond counter. Allowed to wrap at `u32::MAX`.
pub trait Millis {
    fn millis(&self) -> u32;
}

impl<T: AnalogRead + ?Sized> AnalogRead for &mut T {
    type Error = T::Error;

    fn analog_read(&mut self, pin: PinId) -> Result<u16, Self::Error> {
        (**self).analog_read(pin)
    }
}

impl<T: DigitalWrite + ?Sized> DigitalWrite for &mut T {
    type Error = T::Error;

    fn digital_write(&mut self, pin: PinId, level: PinState) -> Result<(), Self::Error> {
        (**self).digital_write(pin, level)
    }
}

impl<T: Millis + ?Sized> Millis for &T {
    fn millis(&self) -> u32 {
        (**self).millis()
    }
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BindError<E> {
    #[error("pin {0} is not bound to this output")]
    Unbound(PinId),
    #[error("output pin driver failed")]
    Pin(E),
}

/// An `embedded-hal` output pin answering to a single pin number.
pub struct BoundOutput<P> {
    id: PinId,
    pin: P,
}

impl<P: OutputPin> BoundOutput<P> {
    pub fn new(id: PinId, pin: P) -> Self {
        Self { id, pin }
    }

    pub fn id(&self) -> PinId {
        self.id
    }

    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> DigitalWrite for BoundOutput<P> {
    type Error = BindError<P::Error>;

    fn digital_write(&mut self, pin: PinId, level: PinState) -> Result<(), Self::Error> {
        if pin != self.id {
            return Err(BindError::Unbound(pin));
        }
        self.pin.set_state(level).map_err(BindError::Pin)
    }
}

#[cfg(feature = "esp32c6")]
pub use self::esp::{EmbassyMillis, ShieldAdc, ShieldAdcError};

#[cfg(feature = "esp32c6")]
mod esp {
    use esp_hal::analog::adc::{Adc, AdcChannel, AdcPin, RegisterAccess};
    use esp_hal::Blocking;

    use super::{AnalogRead, Millis, PinId};

    #[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format, thiserror::Error)]
    pub enum ShieldAdcError {
        #[error("pin {0} is not wired to the ADC")]
        UnmappedPin(PinId),
        #[error("ADC conversion on pin {0} failed")]
        Conversion(PinId),
    }

    /// ADC1 with the four MyoWare outputs enabled on it.
    pub struct ShieldAdc<'d, ADCI, ENV, RAW, REF, RECT> {
        adc: Adc<'d, ADCI, Blocking>,
        env: (PinId, AdcPin<ENV, ADCI>),
        raw: (PinId, AdcPin<RAW, ADCI>),
        reference: (PinId, AdcPin<REF, ADCI>),
        rect: (PinId, AdcPin<RECT, ADCI>),
    }

    impl<'d, ADCI, ENV, RAW, REF, RECT> ShieldAdc<'d, ADCI, ENV, RAW, REF, RECT> {
        pub fn new(
            adc: Adc<'d, ADCI, Blocking>,
            env: (PinId, AdcPin<ENV, ADCI>),
            raw: (PinId, AdcPin<RAW, ADCI>),
            reference: (PinId, AdcPin<REF, ADCI>),
            rect: (PinId, AdcPin<RECT, ADCI>),
        ) -> Self {
            Self {
                adc,
                env,
                raw,
                reference,
                rect,
            }
        }
    }

    impl<'d, ADCI, ENV, RAW, REF, RECT> AnalogRead for ShieldAdc<'d, ADCI, ENV, RAW, REF, RECT>
    where
        ADCI: RegisterAccess + 'd,
        ENV: AdcChannel,
        RAW: AdcChannel,
        REF: AdcChannel,
        RECT: AdcChannel,
    {
        type Error = ShieldAdcError;

        fn analog_read(&mut self, pin: PinId) -> Result<u16, Self::Error> {
            let code = if pin == self.env.0 {
                nb::block!(self.adc.read_oneshot(&mut self.env.1))
            } else if pin == self.raw.0 {
                nb::block!(self.adc.read_oneshot(&mut self.raw.1))
            } else if pin == self.reference.0 {
                nb::block!(self.adc.read_oneshot(&mut self.reference.1))
            } else if pin == self.rect.0 {
                nb::block!(self.adc.read_oneshot(&mut self.rect.1))
            } else {
                return Err(ShieldAdcError::UnmappedPin(pin));
            };
            code.map_err(|_| ShieldAdcError::Conversion(pin))
        }
    }

    /// Millisecond clock backed by the embassy time driver.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct EmbassyMillis;

    impl Millis for EmbassyMillis {
        fn millis(&self) -> u32 {
            // Truncation gives the wrapping counter the blink timer expects.
            embassy_time::Instant::now().as_millis() as u32
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal_mock::eh1::digital::{Mock as PinMock, State, Transaction};

    #[test]
    fn bound_output_drives_its_own_pin() {
        let expectations = [
            Transaction::set(State::High),
            Transaction::set(State::Low),
        ];
        let mut out = BoundOutput::new(13, PinMock::new(&expectations));

        out.digital_write(13, PinState::High).unwrap();
        out.digital_write(13, PinState::Low).unwrap();

        out.release().done();
    }

    #[test]
    fn bound_output_rejects_other_pins() {
        let no_writes: [Transaction; 0] = [];
        let mut out = BoundOutput::new(13, PinMock::new(&no_writes));

        assert!(matches!(
            out.digital_write(12, PinState::High),
            Err(BindError::Unbound(12))
        ));
        assert_eq!(out.id(), 13);

        out.release().done();
    }
}
