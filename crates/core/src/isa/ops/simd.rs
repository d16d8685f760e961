//! SIMD group (the subset the code generator emits).

/// Element copy (DUP / INS / UMOV).
pub mod simd_copy {
    use crate::common::bits::{B11, B12, B13, B29, B30};

    sub_operations!(SimdCopy {
        /// Duplicate an element into every lane.
        VDUPI = B30 | B11,
        /// Insert an element from another vector.
        VINSI = B30 | B12 | B11,
        /// Move a 32-bit element to a general register.
        VMOVW = B13 | B12 | B11,
        /// Move a 64-bit element to a general register.
        VMOVX = B30 | B13 | B12 | B11,
        /// Duplicate a general register into every lane.
        VDUP = B30,
        /// Insert a general register into a lane.
        VINS = B30 | B29,
    });
}

/// Three registers of the same arrangement.
pub mod simd_three_same {
    use crate::common::bits::{B11, B12, B13, B14, B15, B22, B23, B29, B30};

    sub_operations!(SimdThreeSame {
        /// Bitwise AND.
        VAND = B30 | B12 | B11,
        /// Bitwise OR.
        VORR = B30 | B23 | B12 | B11,
        /// Bitwise exclusive OR.
        VEOR = B30 | B29 | B12 | B11,
        /// Add 32-bit lanes.
        VADDW = B30 | B23 | B15,
        /// Add 64-bit lanes.
        VADDX = B30 | B23 | B22 | B15,
        /// Subtract 32-bit lanes.
        VSUBW = B30 | B29 | B23 | B15,
        /// Subtract 64-bit lanes.
        VSUBX = B30 | B29 | B23 | B22 | B15,
        /// Add single-precision lanes.
        VADDS = B30 | B15 | B14 | B12,
        /// Add double-precision lanes.
        VADDD = B30 | B22 | B15 | B14 | B12,
        /// Subtract single-precision lanes.
        VSUBS = B30 | B23 | B15 | B14 | B12,
        /// Subtract double-precision lanes.
        VSUBD = B30 | B23 | B22 | B15 | B14 | B12,
        /// Multiply single-precision lanes.
        VMULS = B30 | B29 | B15 | B14 | B12 | B11,
        /// Multiply double-precision lanes.
        VMULD = B30 | B29 | B22 | B15 | B14 | B12 | B11,
        /// Divide single-precision lanes.
        VDIVS = B30 | B29 | B15 | B14 | B13 | B12 | B11,
        /// Divide double-precision lanes.
        VDIVD = B30 | B29 | B22 | B15 | B14 | B13 | B12 | B11,
        /// Compare equal, single precision.
        VCEQS = B30 | B15 | B14 | B13,
        /// Compare equal, double precision.
        VCEQD = B30 | B22 | B15 | B14 | B13,
        /// Compare greater or equal, single precision.
        VCGES = B30 | B29 | B15 | B14 | B13,
        /// Compare greater or equal, double precision.
        VCGED = B30 | B29 | B22 | B15 | B14 | B13,
        /// Compare greater than, single precision.
        VCGTS = B30 | B29 | B23 | B15 | B14 | B13,
        /// Compare greater than, double precision.
        VCGTD = B30 | B29 | B23 | B22 | B15 | B14 | B13,
        /// Maximum, single precision.
        VMAXS = B30 | B15 | B14 | B13 | B12,
        /// Maximum, double precision.
        VMAXD = B30 | B22 | B15 | B14 | B13 | B12,
        /// Minimum, single precision.
        VMINS = B30 | B23 | B15 | B14 | B13 | B12,
        /// Minimum, double precision.
        VMIND = B30 | B23 | B22 | B15 | B14 | B13 | B12,
        /// Reciprocal step, single precision.
        VRECPSS = B30 | B15 | B14 | B13 | B12 | B11,
        /// Reciprocal square root step, single precision.
        VRSQRTSS = B30 | B23 | B15 | B14 | B13 | B12 | B11,
    });
}

/// Two-register miscellaneous.
pub mod simd_two_reg {
    use crate::common::bits::{B12, B13, B14, B15, B16, B22, B23, B29, B30};

    sub_operations!(SimdTwoReg {
        /// Bitwise NOT.
        VNOT = B30 | B29 | B14 | B12,
        /// Absolute value, single precision.
        VABSS = B30 | B23 | B15 | B14 | B13 | B12,
        /// Negate, single precision.
        VNEGS = B30 | B29 | B23 | B15 | B14 | B13 | B12,
        /// Absolute value, double precision.
        VABSD = B30 | B23 | B22 | B15 | B14 | B13 | B12,
        /// Negate, double precision.
        VNEGD = B30 | B29 | B23 | B22 | B15 | B14 | B13 | B12,
        /// Square root, single precision.
        VSQRTS = B30 | B29 | B23 | B16 | B15 | B14 | B13 | B12,
        /// Square root, double precision.
        VSQRTD = B30 | B29 | B23 | B22 | B16 | B15 | B14 | B13 | B12,
        /// Reciprocal estimate, single precision.
        VRECPES = B30 | B23 | B16 | B15 | B14 | B12,
        /// Reciprocal square root estimate, single precision.
        VRSQRTES = B30 | B29 | B23 | B16 | B15 | B14 | B12,
    });
}
