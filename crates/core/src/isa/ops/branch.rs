//! Compare-and-branch group: branches, exception generation and hints.

/// CBZ / CBNZ.
pub mod compare_and_branch {
    use crate::common::bits::B24;

    sub_operations!(CompareAndBranch {
        /// Compare and branch if zero.
        CBZ = 0,
        /// Compare and branch if not zero.
        CBNZ = B24,
    });
}

/// B.cond.
pub mod conditional_branch {
    sub_operations!(ConditionalBranch {
        /// Branch on condition.
        BCOND = 0,
    });
}

/// Exception generation.
pub mod exception_gen {
    use crate::common::bits::{B0, B21, B22};

    sub_operations!(ExceptionGen {
        /// Supervisor call.
        SVC = B0,
        /// Breakpoint.
        BRK = B21,
        /// Halt (used by the simulator for redirections).
        HLT = B22,
    });
}

/// Hints and barriers.
pub mod system {
    use crate::common::bits::{B0, B1, B2, B3, B4, B6, B8, B9, B10, B11, B12, B13, B16, B17};

    sub_operations!(System {
        /// Hint space (NOP when CRm:op2 is zero).
        HINT = B17 | B16 | B13 | B4 | B3 | B2 | B1 | B0,
        /// Clear exclusive monitor.
        CLREX = B17 | B16 | B13 | B12 | B11 | B10 | B9 | B8 | B6 | B4 | B3 | B2 | B1 | B0,
    });
}

/// TBZ / TBNZ.
pub mod test_and_branch {
    use crate::common::bits::B24;

    sub_operations!(TestAndBranch {
        /// Test bit and branch if zero.
        TBZ = 0,
        /// Test bit and branch if not zero.
        TBNZ = B24,
    });
}

/// B / BL.
pub mod unconditional_branch {
    use crate::common::bits::B31;

    sub_operations!(UnconditionalBranch {
        /// Branch.
        B = 0,
        /// Branch with link.
        BL = B31,
    });
}

/// BR / BLR / RET.
pub mod unconditional_branch_reg {
    use crate::common::bits::{B16, B17, B18, B19, B20, B21, B22};

    const BR_BITS: u32 = B20 | B19 | B18 | B17 | B16;

    sub_operations!(UnconditionalBranchReg {
        /// Branch to register.
        BR = BR_BITS,
        /// Branch with link to register.
        BLR = BR_BITS | B21,
        /// Return.
        RET = BR_BITS | B22,
    });
}
