//! Register storage round-trip tests across the supported widths.

use proptest::prelude::*;
use rstest::rstest;

use renamesim_core::core::phys_regfile::PhysRegFile;
use renamesim_core::core::reg_class::{
    CAP_REG_CLASS_NAME, PhysRegRef, RegClass, RegClassType, RegVal,
};
use renamesim_core::debug;

fn class_with_width(width: usize) -> RegClass {
    let base = RegClass::new(
        RegClassType::Capability,
        CAP_REG_CLASS_NAME,
        4,
        &debug::CAP_REGS,
    );
    match width {
        1 => base.with_reg_type::<u8>(),
        2 => base.with_reg_type::<u16>(),
        4 => base.with_reg_type::<u32>(),
        8 => base.with_reg_type::<u64>(),
        _ => panic!("unsupported register width {width}"),
    }
}

const fn width_mask(width: usize) -> RegVal {
    if width == size_of::<RegVal>() {
        RegVal::MAX
    } else {
        (1 as RegVal).wrapping_shl(8 * width as u32) - 1
    }
}

/// A value no wider than the register reads back bit-identical.
#[rstest]
#[case::one_byte(1)]
#[case::two_bytes(2)]
#[case::four_bytes(4)]
#[case::eight_bytes(8)]
fn value_round_trip_is_bit_identical(#[case] width: usize) {
    let class = class_with_width(width);
    let mut file = PhysRegFile::for_class(&class);
    let refs: Vec<PhysRegRef> = file.reg_refs().collect();

    let val = 0xA5C3_96F0_0F69_3C5A & width_mask(width);
    file.set_reg(refs[1], val);
    assert_eq!(file.get_reg(refs[1]), val);

    // Neighbors are untouched.
    assert_eq!(file.get_reg(refs[0]), 0);
    assert_eq!(file.get_reg(refs[2]), 0);
}

/// The raw byte interface moves exactly `reg_bytes` bytes.
#[rstest]
#[case::one_byte(1)]
#[case::two_bytes(2)]
#[case::four_bytes(4)]
#[case::eight_bytes(8)]
fn byte_interface_matches_value_interface(#[case] width: usize) {
    let class = class_with_width(width);
    let mut file = PhysRegFile::for_class(&class);
    let refs: Vec<PhysRegRef> = file.reg_refs().collect();

    let val = 0x1122_3344_5566_7788 & width_mask(width);
    file.set_bytes(refs[0], &val.to_le_bytes()[..width]);
    assert_eq!(file.get_reg(refs[0]), val);

    let mut out = vec![0u8; width];
    file.get_bytes(refs[0], &mut out);
    assert_eq!(&out[..], &val.to_le_bytes()[..width]);
}

proptest! {
    /// Any value masked to the register width survives a round trip,
    /// for every supported width.
    #[test]
    fn any_value_survives_round_trip(val in any::<u64>(), width_pow in 0_u32..4) {
        let width = 1_usize << width_pow;
        let class = class_with_width(width);
        let mut file = PhysRegFile::for_class(&class);
        let refs: Vec<PhysRegRef> = file.reg_refs().collect();

        let masked = val & width_mask(width);
        file.set_reg(refs[3], masked);
        prop_assert_eq!(file.get_reg(refs[3]), masked);
    }
}
