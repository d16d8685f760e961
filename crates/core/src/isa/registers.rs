//! General-purpose and vector register identifiers.
//!
//! Provides:
//! 1. **Identifiers:** [`Register`] (`R0`..`R31` except the link register, plus
//!    the `Csp`/`Zr` aliases) and
//!    [`VRegister`] (`V0`..`V31`). The two types never convert into each other.
//! 2. **Encoding:** The single map from an identifier to its 5-bit hardware field,
//!    and the reverse map that resolves field value 31 through an [`R31Type`].
//! 3. **Role Aliases:** Names for registers with a fixed job in generated code
//!    (thread, object pool, null object, heap bits, scratch temporaries, ...).
//! 4. **Link Register:** An opaque [`LinkRegister`] token; the concrete register is
//!    only reachable through [`LinkRegister::access`], which names the purpose.

use std::fmt;

/// Number of general-purpose register encodings.
pub const NUMBER_OF_CPU_REGISTERS: usize = 32;

/// Number of vector/floating-point registers.
pub const NUMBER_OF_V_REGISTERS: usize = 32;

/// Size of a vector register in bytes.
pub const FPU_REGISTER_SIZE: usize = 16;

/// Hardware field value shared by the zero register and the stack pointer.
pub const R31_ENCODING: u8 = 31;

/// How a register field holding 31 is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum R31Type {
    /// Field value 31 names the machine stack pointer.
    StackPointer,
    /// Field value 31 names the zero register.
    ZeroRegister,
}

/// General-purpose register identifier.
///
/// `Csp` and `Zr` are distinct identifiers that share hardware encoding 31;
/// which one a field means depends on the instruction (see
/// [`destination_register_mode`](crate::isa::instruction::destination_register_mode)).
///
/// Encoding 30 has no named constant. The link register is obtained from
/// [`LINK_REGISTER`], or from a decoded field:
///
/// ```compile_fail
/// use arm64_vm_core::Register;
///
/// let lr = Register::R30;
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Register(u8);

/// Identifier of the link register. Only [`LinkRegister`] and the decoding
/// paths hand it out.
const LR_ID: u8 = 30;

/// Identifier of the stack pointer alias.
const CSP_ID: u8 = 32;

/// Identifier of the zero register alias.
const ZR_ID: u8 = 33;

/// Display names, indexed by identifier.
const CPU_REG_NAMES: [&str; NUMBER_OF_CPU_REGISTERS + 2] = [
    "r0", "r1", "r2", "r3", "r4", "r5", "r6", "r7", "r8", "r9", "r10", "r11", "r12", "r13", "r14",
    "sp", "tmp", "tmp2", "r18", "r19", "r20", "dt", "nr", "r23", "r24", "r25", "thr", "pp", "hb",
    "fp", "lr", "r31", "csp", "zr",
];

/// Procedure-call-standard names, indexed by encoding.
const CPU_REG_ABI_NAMES: [&str; NUMBER_OF_CPU_REGISTERS] = [
    "x0", "x1", "x2", "x3", "x4", "x5", "x6", "x7", "x8", "x9", "x10", "x11", "x12", "x13", "x14",
    "x15", "ip0", "ip1", "x18", "x19", "x20", "x21", "x22", "x23", "x24", "x25", "x26", "x27",
    "x28", "fp", "lr", "sp",
];

impl Register {
    /// r0.
    pub const R0: Self = Self(0);
    /// r1.
    pub const R1: Self = Self(1);
    /// r2.
    pub const R2: Self = Self(2);
    /// r3.
    pub const R3: Self = Self(3);
    /// r4.
    pub const R4: Self = Self(4);
    /// r5.
    pub const R5: Self = Self(5);
    /// r6.
    pub const R6: Self = Self(6);
    /// r7.
    pub const R7: Self = Self(7);
    /// r8.
    pub const R8: Self = Self(8);
    /// r9.
    pub const R9: Self = Self(9);
    /// r10.
    pub const R10: Self = Self(10);
    /// r11.
    pub const R11: Self = Self(11);
    /// r12.
    pub const R12: Self = Self(12);
    /// r13.
    pub const R13: Self = Self(13);
    /// r14.
    pub const R14: Self = Self(14);
    /// r15, the stack pointer of VM-generated code.
    pub const R15: Self = Self(15);
    /// r16 (IP0), assembler scratch.
    pub const R16: Self = Self(16);
    /// r17 (IP1), second assembler scratch.
    pub const R17: Self = Self(17);
    /// r18, platform register (reserved on every target).
    pub const R18: Self = Self(18);
    /// r19.
    pub const R19: Self = Self(19);
    /// r20.
    pub const R20: Self = Self(20);
    /// r21, dispatch table register.
    pub const R21: Self = Self(21);
    /// r22, cached null object.
    pub const R22: Self = Self(22);
    /// r23.
    pub const R23: Self = Self(23);
    /// r24, code object register.
    pub const R24: Self = Self(24);
    /// r25.
    pub const R25: Self = Self(25);
    /// r26, current thread.
    pub const R26: Self = Self(26);
    /// r27, object pool pointer.
    pub const R27: Self = Self(27);
    /// r28, heap base and write barrier mask.
    pub const R28: Self = Self(28);
    /// r29, frame pointer.
    pub const R29: Self = Self(29);
    /// r31, raw encoding 31 (the native stack pointer when used as a register number).
    pub const R31: Self = Self(31);
    /// Machine stack pointer alias of encoding 31.
    #[allow(non_upper_case_globals)]
    pub const Csp: Self = Self(CSP_ID);
    /// Zero register alias of encoding 31.
    #[allow(non_upper_case_globals)]
    pub const Zr: Self = Self(ZR_ID);

    /// Identifier value (0..=33); distinct for `Csp` and `Zr`.
    #[inline(always)]
    pub const fn id(self) -> u8 {
        self.0
    }

    /// Hardware 5-bit field value. Identity for plain registers; both aliases map to 31.
    #[inline(always)]
    pub const fn encoding(self) -> u8 {
        if self.is_alias() { R31_ENCODING } else { self.0 }
    }

    /// Returns whether this identifier is one of the encoding-31 aliases.
    #[inline]
    pub const fn is_alias(self) -> bool {
        self.0 == CSP_ID || self.0 == ZR_ID
    }

    /// Returns the register with encoding `code`, or `None` past 31.
    ///
    /// Encoding 30 yields the link register; this is how decoded words and
    /// register sets name it.
    #[inline]
    pub const fn from_encoding(code: u8) -> Option<Register> {
        if (code as usize) < NUMBER_OF_CPU_REGISTERS {
            Some(Self(code))
        } else {
            None
        }
    }

    /// Register named by the low 5 bits of `field`, with 31 left as raw `R31`.
    #[inline]
    pub const fn from_field(field: u32) -> Register {
        Self((field & 0x1F) as u8)
    }

    /// Resolves a 5-bit register field, mapping 31 to the alias selected by `mode`.
    #[inline]
    pub const fn decode(field: u32, mode: R31Type) -> Register {
        let code = (field & 0x1F) as u8;
        if code == R31_ENCODING {
            match mode {
                R31Type::StackPointer => Register::Csp,
                R31Type::ZeroRegister => Register::Zr,
            }
        } else {
            Self(code)
        }
    }

    /// Short diagnostic name (`r0`, `thr`, `csp`, ...).
    pub const fn name(self) -> &'static str {
        CPU_REG_NAMES[self.0 as usize]
    }

    /// Procedure-call-standard name of the hardware encoding (`x0`, `ip0`, `lr`, ...).
    pub const fn abi_name(self) -> &'static str {
        if self.0 == ZR_ID {
            "xzr"
        } else {
            CPU_REG_ABI_NAMES[self.encoding() as usize]
        }
    }
}

impl fmt::Debug for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Register::Csp => f.write_str("Csp"),
            Register::Zr => f.write_str("Zr"),
            Register(id) => write!(f, "R{id}"),
        }
    }
}

impl fmt::Display for Register {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Vector / floating-point register identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum VRegister {
    /// v0, first FP argument and FP result.
    V0 = 0,
    /// v1.
    V1 = 1,
    /// v2.
    V2 = 2,
    /// v3.
    V3 = 3,
    /// v4.
    V4 = 4,
    /// v5.
    V5 = 5,
    /// v6.
    V6 = 6,
    /// v7, last FP argument register.
    V7 = 7,
    /// v8, first callee-saved (low 64 bits only).
    V8 = 8,
    /// v9.
    V9 = 9,
    /// v10.
    V10 = 10,
    /// v11.
    V11 = 11,
    /// v12.
    V12 = 12,
    /// v13.
    V13 = 13,
    /// v14.
    V14 = 14,
    /// v15, last callee-saved.
    V15 = 15,
    /// v16.
    V16 = 16,
    /// v17.
    V17 = 17,
    /// v18.
    V18 = 18,
    /// v19.
    V19 = 19,
    /// v20.
    V20 = 20,
    /// v21.
    V21 = 21,
    /// v22.
    V22 = 22,
    /// v23.
    V23 = 23,
    /// v24.
    V24 = 24,
    /// v25.
    V25 = 25,
    /// v26.
    V26 = 26,
    /// v27.
    V27 = 27,
    /// v28.
    V28 = 28,
    /// v29.
    V29 = 29,
    /// v30.
    V30 = 30,
    /// v31, FP scratch.
    V31 = 31,
}

const FPU_REG_NAMES: [&str; NUMBER_OF_V_REGISTERS] = [
    "v0", "v1", "v2", "v3", "v4", "v5", "v6", "v7", "v8", "v9", "v10", "v11", "v12", "v13", "v14",
    "v15", "v16", "v17", "v18", "v19", "v20", "v21", "v22", "v23", "v24", "v25", "v26", "v27",
    "v28", "v29", "v30", "v31",
];

impl VRegister {
    /// All vector registers in encoding order.
    pub const ALL: [VRegister; NUMBER_OF_V_REGISTERS] = [
        VRegister::V0,
        VRegister::V1,
        VRegister::V2,
        VRegister::V3,
        VRegister::V4,
        VRegister::V5,
        VRegister::V6,
        VRegister::V7,
        VRegister::V8,
        VRegister::V9,
        VRegister::V10,
        VRegister::V11,
        VRegister::V12,
        VRegister::V13,
        VRegister::V14,
        VRegister::V15,
        VRegister::V16,
        VRegister::V17,
        VRegister::V18,
        VRegister::V19,
        VRegister::V20,
        VRegister::V21,
        VRegister::V22,
        VRegister::V23,
        VRegister::V24,
        VRegister::V25,
        VRegister::V26,
        VRegister::V27,
        VRegister::V28,
        VRegister::V29,
        VRegister::V30,
        VRegister::V31,
    ];

    /// Hardware 5-bit field value.
    #[inline(always)]
    pub const fn encoding(self) -> u8 {
        self as u8
    }

    /// Returns the vector register with encoding `code`, or `None` past 31.
    #[inline]
    pub const fn from_encoding(code: u8) -> Option<VRegister> {
        if (code as usize) < NUMBER_OF_V_REGISTERS {
            Some(Self::ALL[code as usize])
        } else {
            None
        }
    }

    /// Diagnostic name (`v0`..`v31`).
    pub const fn name(self) -> &'static str {
        FPU_REG_NAMES[self as usize]
    }
}

impl fmt::Display for VRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ── Role aliases ────────────────────────────────────────────

/// Intra-procedure-call scratch register 0.
pub const IP0: Register = Register::R16;
/// Intra-procedure-call scratch register 1.
pub const IP1: Register = Register::R17;
/// Scratch register used by the assembler.
pub const TMP: Register = IP0;
/// Second assembler scratch register.
pub const TMP2: Register = IP1;
/// Caches the object pool pointer in generated code.
pub const PP: Register = Register::R27;
/// Dispatch table base (AOT only).
pub const DISPATCH_TABLE_REG: Register = Register::R21;
/// Code object of the current function.
pub const CODE_REG: Register = Register::R24;
/// Function object, set when calling functions in JIT mode.
pub const FUNCTION_REG: Register = Register::R0;
/// Frame pointer.
pub const FP: Register = Register::R29;
/// Frame pointer register.
pub const FPREG: Register = FP;
/// Stack pointer of VM-generated code.
pub const SP: Register = Register::R15;
/// Stack pointer register.
pub const SPREG: Register = SP;
/// Inline cache data / megamorphic cache register.
pub const IC_DATA_REG: Register = Register::R5;
/// Arguments descriptor register.
pub const ARGS_DESC_REG: Register = Register::R4;
/// Caches the current thread in generated code.
pub const THR: Register = Register::R26;
/// Callee-saved temporary.
pub const CALLEE_SAVED_TEMP: Register = Register::R19;
/// Second callee-saved temporary.
pub const CALLEE_SAVED_TEMP2: Register = Register::R20;
/// `write_barrier_mask << 32 | heap_base >> 32`.
pub const HEAP_BITS: Register = Register::R28;
/// Caches the null object.
pub const NULL_REG: Register = Register::R22;

/// Floating-point scratch register.
pub const VTMP: VRegister = VRegister::V31;
/// Architecture-independent name of the FP scratch register.
pub const FPU_TMP: VRegister = VTMP;

/// Exception object on entry to a catch clause.
pub const EXCEPTION_OBJECT_REG: Register = Register::R0;
/// Stack trace object on entry to a catch clause.
pub const STACK_TRACE_OBJECT_REG: Register = Register::R1;

// ── Link register ───────────────────────────────────────────

/// Opaque stand-in for the link register.
///
/// Generated code must not treat the link register as an ordinary register:
/// it may hold a live return address. Code that needs the concrete register
/// goes through [`LinkRegister::access`] and states why.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LinkRegister {
    _private: (),
}

/// The link register token.
pub const LINK_REGISTER: LinkRegister = LinkRegister { _private: () };

/// Reason for touching the link register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkRegisterUse {
    /// The emitted sequence overwrites the link register (e.g. a call).
    Clobber,
    /// The return address is moved from the link register into another register.
    SpillToRegister,
    /// The return address is moved back into the link register.
    RestoreFromRegister,
    /// The link register is stored into the frame.
    SpillToFrame,
    /// The link register is reloaded from the frame.
    RestoreFromFrame,
    /// The return address is read without moving it.
    ReadReturnAddress,
    /// A new return address is written.
    WriteReturnAddress,
}

impl LinkRegister {
    /// Returns the concrete register for the stated `purpose`.
    #[inline]
    pub const fn access(self, purpose: LinkRegisterUse) -> Register {
        let _ = purpose;
        Register(LR_ID)
    }

    /// Hardware encoding, for comparisons against decoded fields.
    #[inline]
    pub const fn encoding(self) -> u8 {
        LR_ID
    }
}

impl PartialEq<LinkRegister> for Register {
    fn eq(&self, other: &LinkRegister) -> bool {
        self.encoding() == other.encoding() && !self.is_alias()
    }
}

impl fmt::Display for LinkRegister {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("lr")
    }
}
