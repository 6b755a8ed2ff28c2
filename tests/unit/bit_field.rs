//! Unit tests for the shared read-modify-write primitive

use crate::common::{MockBus, Operation};
use gy85::{update_field, BitField, RegisterBus};

const CHIP: u8 = 0x42;
const REGISTER: u8 = 0x10;

#[test]
fn test_update_field_preserves_bits_outside_mask() {
    let field = BitField::new(0b0011_0000, 4);

    for initial in 0..=u8::MAX {
        let mut bus = MockBus::new();
        bus.set_register(CHIP, REGISTER, initial);

        update_field(&mut bus, CHIP, REGISTER, field, 0b10).unwrap();

        let after = bus.get_register(CHIP, REGISTER);
        assert_eq!(after & !field.mask, initial & !field.mask);
        assert_eq!(field.extract(after), 0b10);
    }
}

#[test]
fn test_update_field_reads_then_writes_once() {
    let mut bus = MockBus::new();
    bus.set_register(CHIP, REGISTER, 0xF0);

    update_field(&mut bus, CHIP, REGISTER, BitField::new(0x0F, 0), 0x05).unwrap();

    assert_eq!(
        bus.operations(),
        vec![
            Operation::Read {
                chip: CHIP,
                register: REGISTER,
                len: 1,
            },
            Operation::Write {
                chip: CHIP,
                register: REGISTER,
                value: 0xF5,
            },
        ]
    );
}

#[test]
fn test_update_field_skips_write_when_read_fails() {
    let mut bus = MockBus::new();
    bus.fail_next_read();

    let result = update_field(&mut bus, CHIP, REGISTER, BitField::new(0x01, 0), 1);

    assert!(result.is_err());
    assert_eq!(bus.write_count(), 0);
}

#[test]
fn test_update_field_drops_bits_that_do_not_fit() {
    let mut bus = MockBus::new();
    bus.set_register(CHIP, REGISTER, 0x00);

    update_field(&mut bus, CHIP, REGISTER, BitField::new(0b1100_0000, 6), 0b111).unwrap();

    assert_eq!(bus.read_register(CHIP, REGISTER).unwrap(), 0b1100_0000);
}
