//! Bit-field register editing
//!
//! Most chip settings are narrower than a byte and share a register with
//! other settings. [`update_field`] reads the register, replaces only the
//! bits under the field's mask and writes the merged byte back. Nothing is
//! cached; the register is read again on every update.

use crate::interface::RegisterBus;

/// Location of a setting inside an 8-bit register
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BitField {
    /// Bits owned by the field, already in register position
    pub mask: u8,
    /// Position of the field's least significant bit
    pub shift: u8,
}

impl BitField {
    /// Create a field descriptor
    #[must_use]
    pub const fn new(mask: u8, shift: u8) -> Self {
        Self { mask, shift }
    }

    /// Merge `value` into `current`, leaving every bit outside the mask untouched
    ///
    /// Bits of `value` that land outside the mask after shifting are dropped.
    #[must_use]
    pub const fn merge(self, current: u8, value: u8) -> u8 {
        let shifted = if self.shift < 8 { value << self.shift } else { 0 };
        (current & !self.mask) | (shifted & self.mask)
    }

    /// Extract the field's value from a full register byte
    #[must_use]
    pub const fn extract(self, register: u8) -> u8 {
        if self.shift < 8 {
            (register & self.mask) >> self.shift
        } else {
            0
        }
    }
}

/// Read-modify-write a single field of a chip register
///
/// If the read fails the transport error is returned and nothing is written.
/// The update is not atomic with respect to other bus masters.
///
/// # Errors
///
/// Returns the transport error from the read or the write.
pub fn update_field<B>(
    bus: &mut B,
    address: u8,
    register: u8,
    field: BitField,
    value: u8,
) -> Result<(), B::Error>
where
    B: RegisterBus + ?Sized,
{
    let current = bus.read_register(address, register)?;
    bus.write_register(address, register, field.merge(current, value))
}
