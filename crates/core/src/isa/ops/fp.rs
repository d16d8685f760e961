//! Scalar floating-point group.

/// Compare.
pub mod fp_compare {
    use crate::common::bits::{B3, B22};

    sub_operations!(FpCompare {
        /// Compare two doubles.
        FCMPD = B22,
        /// Compare a double with zero.
        FCMPZD = B22 | B3,
    });
}

/// One-source operations.
pub mod fp_one_source {
    use crate::common::bits::{B15, B16, B17, B22};

    sub_operations!(FpOneSource {
        /// Move double.
        FMOVDD = B22,
        /// Absolute value.
        FABSD = B22 | B15,
        /// Negate.
        FNEGD = B22 | B16,
        /// Square root.
        FSQRTD = B22 | B16 | B15,
        /// Convert single to double.
        FCVTDS = B15 | B17,
        /// Convert double to single.
        FCVTSD = B22 | B17,
    });
}

/// Two-source arithmetic.
pub mod fp_two_source {
    use crate::common::bits::{B12, B13, B22};

    sub_operations!(FpTwoSource {
        /// Multiply.
        FMULD = B22,
        /// Divide.
        FDIVD = B22 | B12,
        /// Add.
        FADDD = B22 | B13,
        /// Subtract.
        FSUBD = B22 | B13 | B12,
    });
}

/// Move immediate.
pub mod fp_imm {
    use crate::common::bits::B22;

    sub_operations!(FpImm {
        /// Move single-precision immediate.
        FMOVSI = 0,
        /// Move double-precision immediate.
        FMOVDI = B22,
    });
}

/// Conversions and moves between FP and general registers.
pub mod fp_int_cvt {
    use crate::common::bits::{B16, B17, B18, B19, B20, B22};

    sub_operations!(FpIntCvt {
        /// Move single to 32-bit register.
        FMOVRS = B18 | B17,
        /// Move 32-bit register to single.
        FMOVSR = B18 | B17 | B16,
        /// Move double to 64-bit register.
        FMOVRD = B22 | B18 | B17,
        /// Move 64-bit register to double.
        FMOVDR = B22 | B18 | B17 | B16,
        /// Convert double to signed integer, rounding toward zero.
        FCVTZS_D = B22 | B20 | B19,
        /// Convert double to signed integer, rounding toward minus infinity.
        FCVTMS_D = B22 | B20,
        /// Convert double to signed integer, rounding toward plus infinity.
        FCVTPS_D = B22 | B19,
        /// Convert signed integer to double.
        SCVTFD = B22 | B17,
    });
}
