//! Register data-processing group.

/// ADD / SUB (shifted or extended register).
pub mod add_sub_shift_ext {
    use crate::common::bits::B30;

    sub_operations!(AddSubShiftExt {
        /// Add.
        ADD = 0,
        /// Subtract.
        SUB = B30,
    });
}

/// ADC / SBC.
pub mod add_sub_with_carry {
    use crate::common::bits::B30;

    sub_operations!(AddSubWithCarry {
        /// Add with carry.
        ADC = 0,
        /// Subtract with carry.
        SBC = B30,
    });
}

/// Conditional select.
pub mod conditional_select {
    use crate::common::bits::{B10, B30};

    sub_operations!(ConditionalSelect {
        /// Select.
        CSEL = 0,
        /// Select, incrementing the second operand.
        CSINC = B10,
        /// Select, inverting the second operand.
        CSINV = B30,
        /// Select, negating the second operand.
        CSNEG = B10 | B30,
    });
}

/// One-source data processing.
pub mod misc_dp_1_source {
    use crate::common::bits::B12;

    sub_operations!(MiscDp1Source {
        /// Count leading zeros.
        CLZ = B12,
        /// Reverse bits.
        RBIT = 0,
    });
}

/// Two-source data processing.
pub mod misc_dp_2_source {
    use crate::common::bits::{B10, B11, B13};

    sub_operations!(MiscDp2Source {
        /// Unsigned divide.
        UDIV = B11,
        /// Signed divide.
        SDIV = B11 | B10,
        /// Logical shift left (variable).
        LSLV = B13,
        /// Logical shift right (variable).
        LSRV = B13 | B10,
        /// Arithmetic shift right (variable).
        ASRV = B13 | B11,
    });
}

/// Three-source data processing.
pub mod misc_dp_3_source {
    use crate::common::bits::{B15, B21, B22, B23, B31};

    sub_operations!(MiscDp3Source {
        /// 32-bit multiply-add.
        MADDW = 0,
        /// 64-bit multiply-add.
        MADD = B31,
        /// 32-bit multiply-subtract.
        MSUBW = B15,
        /// 64-bit multiply-subtract.
        MSUB = B31 | B15,
        /// Signed multiply high.
        SMULH = B31 | B22,
        /// Unsigned multiply high.
        UMULH = B31 | B23 | B22,
        /// Signed multiply-add long.
        SMADDL = B31 | B21,
        /// Unsigned multiply-add long.
        UMADDL = B31 | B23 | B21,
        /// Signed multiply-subtract long.
        SMSUBL = B31 | B21 | B15,
        /// Unsigned multiply-subtract long.
        UMSUBL = B31 | B23 | B21 | B15,
    });
}

/// Logical (shifted register).
pub mod logical_shift {
    use crate::common::bits::{B21, B29, B30};

    sub_operations!(LogicalShift {
        /// Bitwise AND.
        AND = 0,
        /// Bit clear.
        BIC = B21,
        /// Bitwise OR.
        ORR = B29,
        /// Bitwise OR NOT.
        ORN = B29 | B21,
        /// Bitwise exclusive OR.
        EOR = B30,
        /// Bitwise exclusive OR NOT.
        EON = B30 | B21,
        /// Bitwise AND, setting flags.
        ANDS = B30 | B29,
        /// Bit clear, setting flags.
        BICS = B30 | B29 | B21,
    });
}
