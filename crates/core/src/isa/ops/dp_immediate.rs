//! Immediate data-processing group.

/// ADD / SUB (immediate).
pub mod add_sub_imm {
    use crate::common::bits::B30;

    sub_operations!(AddSubImm {
        /// Add immediate.
        ADDI = 0,
        /// Subtract immediate.
        SUBI = B30,
    });
}

/// Bitfield moves.
pub mod bitfield {
    use crate::common::bits::{B22, B29, B30, B31};

    /// `sf` and `N` together select the 64-bit form.
    pub const BITFIELD_64: u32 = B31 | B22;

    sub_operations!(Bitfield {
        /// Signed bitfield move.
        SBFM = 0,
        /// Bitfield move.
        BFM = B29,
        /// Unsigned bitfield move.
        UBFM = B30,
    });
}

/// Logical (bitmask immediate).
pub mod logical_imm {
    use crate::common::bits::{B29, B30};

    sub_operations!(LogicalImm {
        /// Bitwise AND immediate.
        ANDI = 0,
        /// Bitwise OR immediate.
        ORRI = B29,
        /// Bitwise exclusive OR immediate.
        EORI = B30,
        /// Bitwise AND immediate, setting flags.
        ANDIS = B30 | B29,
    });
}

/// Move wide.
pub mod move_wide {
    use crate::common::bits::{B29, B30};

    sub_operations!(MoveWide {
        /// Move wide with NOT.
        MOVN = 0,
        /// Move wide with zero.
        MOVZ = B30,
        /// Move wide with keep.
        MOVK = B30 | B29,
    });
}

/// PC-relative addressing.
pub mod pc_rel {
    use crate::common::bits::B31;

    sub_operations!(PcRel {
        /// Address of a label.
        ADR = 0,
        /// Address of a 4KB page.
        ADRP = B31,
    });
}
