//! A serial-style command console for a small mobile robot.
//!
//! Operator lines are read byte-at-a-time with destructive backspace
//! editing, tokenized in place into typed fields, compiled into canonical
//! instructions, dispatched to motion/sensor capabilities, and recorded in a
//! bounded, editable instruction log.
//!
//! # Example
//!
//! ```rust
//! use rover::{Instruction, LineBuffer, Opcode, Request, compile, tokenize};
//!
//! let mut line = LineBuffer::from_str("forward 10");
//! tokenize(&mut line);
//!
//! let request = compile(&line).unwrap();
//! assert_eq!(request, Request::Execute(Instruction::new(Opcode::Forward, 10)));
//! ```

mod compiler;
mod console;
mod error;
mod hardware;
mod instruction;
mod instruction_log;
mod line_buffer;
mod line_reader;
mod tokenizer;
mod transport;

pub use compiler::{Request, compile, compile_instruction};
pub use console::Console;
pub use error::CommandError;
pub use hardware::{
    DistanceSensor, MotionActuator, SignalSensor, SimButton, SimMotion, SimRange, Travel,
};
pub use instruction::{Instruction, NO_LIMIT, Opcode, PUSH_BUTTON};
pub use instruction_log::{InstructionLog, MAX_INSTRUCTIONS};
pub use line_buffer::{FieldKind, LineBuffer, MAX_CHARS, MAX_FIELDS};
pub use line_reader::read_line;
pub use tokenizer::tokenize;
pub use transport::{ConsoleTransport, ScriptTransport, Transport};
