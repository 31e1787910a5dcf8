//! LetraTag identification on the BLE side.
//!
//! Scanning and connecting are left to the transport; these are the values
//! and checks it needs to pick the right device and characteristics.

use crate::error::{Error, Result};

/// Primary GATT service advertised by the printer.
pub const SERVICE_UUID: &str = "be3dd650-2b3d-42f1-99c1-f0f749dd0678";

/// Characteristic that print requests are written to.
pub const PRINT_REQUEST_UUID: &str = "be3dd651-2b3d-42f1-99c1-f0f749dd0678";

/// Characteristic that status notifications arrive on.
pub const PRINT_REPLY_UUID: &str = "be3dd652-2b3d-42f1-99c1-f0f749dd0678";

/// Present on the device but not used by the vendor app.
pub const UNKNOWN_UUID: &str = "be3dd653-2b3d-42f1-99c1-f0f749dd0678";

/// Espressif OUI blocks seen on LetraTag printers.
pub const MAC_PREFIXES: [[u8; 3]; 3] = [
    [0x58, 0xCF, 0x79],
    [0xDC, 0x54, 0x75],
    [0x34, 0x85, 0x18],
];

const NAME_PREFIX: &str = "Letratag ";

fn parse_mac(mac: &str) -> Result<[u8; 6]> {
    let invalid = || Error::InvalidArgument(format!("invalid MAC address {:?}", mac));

    let mut bytes = [0u8; 6];
    let mut parts = mac.split(':');
    for byte in bytes.iter_mut() {
        let part = parts.next().ok_or_else(invalid)?;
        if part.len() != 2 {
            return Err(invalid());
        }
        *byte = u8::from_str_radix(part, 16).map_err(|_| invalid())?;
    }
    if parts.next().is_some() {
        return Err(invalid());
    }
    Ok(bytes)
}

/// Whether `mac` (`AA:BB:CC:DD:EE:FF`) belongs to one of the OUI blocks
/// LetraTag printers ship with.
pub fn is_espressif(mac: &str) -> Result<bool> {
    let bytes = parse_mac(mac)?;
    Ok(MAC_PREFIXES.iter().any(|prefix| bytes[..3] == prefix[..]))
}

/// Whether an advertised name is the one a LetraTag uses for `mac`, which is
/// `Letratag ` followed by the address without colons. DYMO sells other BLE
/// products, so the service UUID alone is not enough.
pub fn is_letratag_name(name: &str, mac: &str) -> bool {
    match name.strip_prefix(NAME_PREFIX) {
        Some(rest) => rest == mac.replace(':', ""),
        None => false,
    }
}
