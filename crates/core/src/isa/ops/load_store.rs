//! Load/store group.

/// PC-relative literal load.
pub mod load_reg_literal {
    sub_operations!(LoadRegLiteral {
        /// Load register (literal).
        LDRPC = 0,
    });
}

/// Exclusive and ordered accesses.
pub mod load_store_exclusive {
    use crate::common::bits::{B15, B22, B23};

    sub_operations!(LoadStoreExclusive {
        /// Load exclusive.
        LDXR = B22,
        /// Store exclusive.
        STXR = 0,
        /// Load-acquire.
        LDAR = B23 | B22 | B15,
        /// Store-release.
        STLR = B23 | B15,
    });
}

/// Atomic read-modify-write.
pub mod atomic_memory {
    use crate::common::bits::{B12, B13};

    sub_operations!(AtomicMemory {
        /// Atomic bit clear.
        LDCLR = B12,
        /// Atomic bit set.
        LDSET = B13 | B12,
    });
}

/// Single-register loads and stores.
pub mod load_store_reg {
    use crate::common::bits::{B22, B23, B26};

    sub_operations!(LoadStoreReg {
        /// Store register.
        STR = 0,
        /// Load register.
        LDR = B22,
        /// Load register, sign-extending.
        LDRS = B23,
        /// Store FP register.
        FSTR = B26,
        /// Load FP register.
        FLDR = B22 | B26,
        /// Store 128-bit FP register.
        FSTRQ = B26 | B23,
        /// Load 128-bit FP register.
        FLDRQ = B26 | B23 | B22,
    });
}

/// Register-pair loads and stores.
pub mod load_store_reg_pair {
    use crate::common::bits::{B22, B26};

    sub_operations!(LoadStoreRegPair {
        /// Store pair.
        STP = 0,
        /// Load pair.
        LDP = B22,
        /// Store FP pair.
        FSTP = B26,
        /// Load FP pair.
        FLDP = B22 | B26,
    });
}
