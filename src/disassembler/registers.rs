//! Well-known memory-mapped registers used to annotate listings.
//!
//! Annotations are cosmetic: they never influence how bytes are decoded.

/// A named hardware register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownRegister {
    pub address: u16,
    pub name: &'static str,
}

/// NES PPU and controller registers that show up in the routines under analysis.
pub const KNOWN_REGISTERS: &[KnownRegister] = &[
    KnownRegister { address: 0x2000, name: "PPU_CTRL" },
    KnownRegister { address: 0x2001, name: "PPU_MASK" },
    KnownRegister { address: 0x2002, name: "PPU_STATUS" },
    KnownRegister { address: 0x2006, name: "PPU_ADDR" },
    KnownRegister { address: 0x2007, name: "PPU_DATA" },
    KnownRegister { address: 0x4016, name: "JOY1" },
];

/// Returns the register name for `address`, if it is a known register.
pub fn register_name(address: u16) -> Option<&'static str> {
    KNOWN_REGISTERS
        .iter()
        .find(|reg| reg.address == address)
        .map(|reg| reg.name)
}
