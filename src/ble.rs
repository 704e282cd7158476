//! BLE identifiers published by MyoWare peripherals.
//!
//! Only the identifiers live here; advertising and GATT registration belong
//! to the firmware that embeds the sensor.

use trouble_host::prelude::Uuid as GattUuid;
use uuid::{uuid, Uuid};

// ── Nordic UART service ──────────────────────────────────────────────────────

pub const UART_SERVICE: &str = "6E400001-B5A3-F393-E0A9-E50E24DCCA9E";
pub const UART_RX_CHARACTERISTIC: &str = "6E400002-B5A3-F393-E0A9-E50E24DCCA9E";
pub const UART_TX_CHARACTERISTIC: &str = "6E400003-B5A3-F393-E0A9-E50E24DCCA9E";

pub const UART_SERVICE_UUID: Uuid = uuid!("6E400001-B5A3-F393-E0A9-E50E24DCCA9E");
pub const UART_RX_CHARACTERISTIC_UUID: Uuid = uuid!("6E400002-B5A3-F393-E0A9-E50E24DCCA9E");
pub const UART_TX_CHARACTERISTIC_UUID: Uuid = uuid!("6E400003-B5A3-F393-E0A9-E50E24DCCA9E");

// ── MyoWare sensor service ───────────────────────────────────────────────────

pub const MYOWARE_SERVICE: &str = "EC3AF789-2154-49F4-A9FC-BC6C88E9E930";
pub const MYOWARE_CHARACTERISTIC: &str = "F3A56EDF-8F1E-4533-93BF-5601B2E91308";

pub const MYOWARE_SERVICE_UUID: Uuid = uuid!("EC3AF789-2154-49F4-A9FC-BC6C88E9E930");
pub const MYOWARE_CHARACTERISTIC_UUID: Uuid = uuid!("F3A56EDF-8F1E-4533-93BF-5601B2E91308");

// ── Over-the-air (little-endian) byte order ──────────────────────────────────

pub const UART_SERVICE_LE: [u8; 16] = UART_SERVICE_UUID.as_u128().to_le_bytes();
pub const UART_RX_CHARACTERISTIC_LE: [u8; 16] = UART_RX_CHARACTERISTIC_UUID.as_u128().to_le_bytes();
pub const UART_TX_CHARACTERISTIC_LE: [u8; 16] = UART_TX_CHARACTERISTIC_UUID.as_u128().to_le_bytes();
pub const MYOWARE_SERVICE_LE: [u8; 16] = MYOWARE_SERVICE_UUID.as_u128().to_le_bytes();
pub const MYOWARE_CHARACTERISTIC_LE: [u8; 16] = MYOWARE_CHARACTERISTIC_UUID.as_u128().to_le_bytes();

pub fn uart_service() -> GattUuid {
    GattUuid::new_long(UART_SERVICE_LE)
}

pub fn uart_rx_characteristic() -> GattUuid {
    GattUuid::new_long(UART_RX_CHARACTERISTIC_LE)
}

pub fn uart_tx_characteristic() -> GattUuid {
    GattUuid::new_long(UART_TX_CHARACTERISTIC_LE)
}

pub fn myoware_service() -> GattUuid {
    GattUuid::new_long(MYOWARE_SERVICE_LE)
}

pub fn myoware_characteristic() -> GattUuid {
    GattUuid::new_long(MYOWARE_CHARACTERISTIC_LE)
}
