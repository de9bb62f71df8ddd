//! The canonical compiled form of an operator command.

use std::fmt;

/// Sentinel argument: no distance/angle limit (drive until an explicit
/// `stop`), or for `wait`, no condition at all.
pub const NO_LIMIT: i32 = -1;

/// Sentinel argument for `wait`: block until the push button is released.
pub const PUSH_BUTTON: i32 = 0x1111;

/// The discrete command kind carried by an [`Instruction`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Opcode {
    Forward,
    Reverse,
    RotateCw,
    RotateCcw,
    Wait,
    Pause,
    Stop,
}

impl Opcode {
    /// The keyword an operator types to issue this opcode.
    pub fn keyword(self) -> &'static str {
        match self {
            Opcode::Forward => "forward",
            Opcode::Reverse => "reverse",
            Opcode::RotateCw => "cw",
            Opcode::RotateCcw => "ccw",
            Opcode::Wait => "wait",
            Opcode::Pause => "pause",
            Opcode::Stop => "stop",
        }
    }
}

/// One compiled command: an opcode plus its integer argument.
///
/// Argument semantics depend on the opcode: a distance in centimetres for
/// `Forward`/`Reverse`, an angle in degrees for the rotations, a duration in
/// milliseconds for `Pause`, a sentinel for `Wait`, and unused for `Stop`.
/// Instructions are plain values, copied into and out of the log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instruction {
    pub opcode: Opcode,
    pub argument: i32,
}

impl Instruction {
    pub const fn new(opcode: Opcode, argument: i32) -> Self {
        Self { opcode, argument }
    }
}

/// Renders in the grammar the compiler accepts, so a listed entry can be
/// retyped verbatim: sentinel arguments print as `none` / `pb`, and `stop`
/// prints bare.
impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.opcode {
            Opcode::Stop => write!(f, "stop"),
            Opcode::Wait if self.argument == PUSH_BUTTON => write!(f, "wait pb"),
            Opcode::Wait => write!(f, "wait none"),
            op if self.argument == NO_LIMIT => write!(f, "{} none", op.keyword()),
            op => write!(f, "{} {}", op.keyword(), self.argument),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_numeric_arguments() {
        assert_eq!(Instruction::new(Opcode::Forward, 10).to_string(), "forward 10");
        assert_eq!(Instruction::new(Opcode::Reverse, 5).to_string(), "reverse 5");
        assert_eq!(Instruction::new(Opcode::RotateCw, 90).to_string(), "cw 90");
        assert_eq!(Instruction::new(Opcode::RotateCcw, 45).to_string(), "ccw 45");
        assert_eq!(Instruction::new(Opcode::Pause, 500).to_string(), "pause 500");
    }

    #[test]
    fn test_display_sentinels() {
        assert_eq!(Instruction::new(Opcode::Forward, NO_LIMIT).to_string(), "forward none");
        assert_eq!(Instruction::new(Opcode::Wait, PUSH_BUTTON).to_string(), "wait pb");
        assert_eq!(Instruction::new(Opcode::Wait, NO_LIMIT).to_string(), "wait none");
        assert_eq!(Instruction::new(Opcode::Stop, 0).to_string(), "stop");
    }
}
