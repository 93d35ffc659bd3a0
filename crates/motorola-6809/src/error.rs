use std::fmt;

use thiserror::Error;

/// Which postbyte failed to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandKind {
    /// Indexed-addressing postbyte.
    Indexed,
    /// EXG/TFR register pair.
    RegisterPair,
}

impl fmt::Display for OperandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Indexed => "indexed",
            Self::RegisterPair => "register pair",
        })
    }
}

/// Errors that abort a single instruction step.
///
/// When `step()` returns one of these, PC is back at `pc` and no other
/// register or memory location has been changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// Opcode (with any 0x10/0x11 prefix in the high byte) has no entry.
    #[error("illegal opcode ${opcode:04X} at ${pc:04X}")]
    Decode { opcode: u16, pc: u16 },

    #[error("malformed {kind} postbyte ${postbyte:02X} at ${pc:04X}")]
    MalformedOperand {
        kind: OperandKind,
        postbyte: u8,
        pc: u16,
    },
}

impl Error {
    /// Address of the instruction that failed.
    #[must_use]
    pub const fn pc(&self) -> u16 {
        match self {
            Self::Decode { pc, .. } | Self::MalformedOperand { pc, .. } => *pc,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_use_hex_addresses() {
        let err = Error::Decode {
            opcode: 0x1001,
            pc: 0xC000,
        };
        assert_eq!(err.to_string(), "illegal opcode $1001 at $C000");

        let err = Error::MalformedOperand {
            kind: OperandKind::Indexed,
            postbyte: 0x87,
            pc: 0x0100,
        };
        assert_eq!(err.to_string(), "malformed indexed postbyte $87 at $0100");
        assert_eq!(err.pc(), 0x0100);
    }
}
