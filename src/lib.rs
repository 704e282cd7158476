#![cfg_attr(not(test), no_std)]

//! MyoWare 2.0 EMG sensor driver with status LED heartbeat and the BLE
//! identifiers used by MyoWare peripherals.
//!
//! The driver is written against the small traits in [`hal`]; the `esp32c6`
//! feature adds the esp-hal shims, the embassy sampling task and the firmware
//! binary.

pub mod ble;
pub mod config;
pub mod hal;
pub mod led;
pub mod sensor;
#[cfg(feature = "esp32c6")]
pub mod tasks;

pub use config::SensorConfig;
pub use sensor::{Error, MyoWare, OutputType, SENSOR_ERROR};
