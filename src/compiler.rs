//! Classifies a tokenized line and compiles it into a [`Request`].
//!
//! Exactly one classification is made per line: field 0 is looked up
//! (case-sensitively) in a static keyword table and the line compiles to a
//! single tagged request, or to an explicit error. No keyword is ever tested
//! twice and no partially-built instruction can escape.

use phf::{Map, phf_map};

use crate::error::CommandError;
use crate::instruction::{Instruction, NO_LIMIT, Opcode, PUSH_BUTTON};
use crate::line_buffer::LineBuffer;

/// One fully classified line: either a drive instruction to execute and
/// record, or a log meta-command. Positions are 1-based as typed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request {
    Execute(Instruction),
    List,
    Insert(i32),
    Delete(i32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    Forward,
    Reverse,
    Cw,
    Ccw,
    Wait,
    Pause,
    Stop,
    List,
    Insert,
    Delete,
}

struct CommandSpec {
    keyword: Keyword,
    min_args: usize,
}

/// The command vocabulary with the minimum argument count each keyword
/// requires. Commands whose argument defaults to a sentinel require none.
static COMMANDS: Map<&'static str, CommandSpec> = phf_map! {
    "forward" => CommandSpec { keyword: Keyword::Forward, min_args: 0 },
    "reverse" => CommandSpec { keyword: Keyword::Reverse, min_args: 0 },
    "cw" => CommandSpec { keyword: Keyword::Cw, min_args: 0 },
    "ccw" => CommandSpec { keyword: Keyword::Ccw, min_args: 0 },
    "wait" => CommandSpec { keyword: Keyword::Wait, min_args: 0 },
    "pause" => CommandSpec { keyword: Keyword::Pause, min_args: 1 },
    "stop" => CommandSpec { keyword: Keyword::Stop, min_args: 0 },
    "list" => CommandSpec { keyword: Keyword::List, min_args: 0 },
    "insert" => CommandSpec { keyword: Keyword::Insert, min_args: 1 },
    "delete" => CommandSpec { keyword: Keyword::Delete, min_args: 1 },
};

/// Compile a tokenized line into one [`Request`].
pub fn compile(data: &LineBuffer) -> Result<Request, CommandError> {
    let typed = data.field_str(0);
    let (&name, spec) =
        COMMANDS
            .get_entry(typed)
            .ok_or_else(|| CommandError::UnrecognizedCommand {
                keyword: typed.to_string(),
            })?;
    if data.field_count().saturating_sub(1) < spec.min_args {
        return Err(CommandError::MissingArgument { keyword: name });
    }

    let request = match spec.keyword {
        Keyword::Forward => drive(Opcode::Forward, data),
        Keyword::Reverse => drive(Opcode::Reverse, data),
        Keyword::Cw => drive(Opcode::RotateCw, data),
        Keyword::Ccw => drive(Opcode::RotateCcw, data),
        Keyword::Wait => {
            let argument = if data.field_str(1) == "pb" { PUSH_BUTTON } else { NO_LIMIT };
            Request::Execute(Instruction::new(Opcode::Wait, argument))
        }
        Keyword::Pause => Request::Execute(Instruction::new(Opcode::Pause, numeric(data, name)?)),
        Keyword::Stop => Request::Execute(Instruction::new(Opcode::Stop, 0)),
        Keyword::List => Request::List,
        Keyword::Insert => Request::Insert(numeric(data, name)?),
        Keyword::Delete => Request::Delete(numeric(data, name)?),
    };
    Ok(request)
}

/// Compile a line that must be a drive instruction — the nested `insert`
/// entry point. The log meta-commands are not instructions and report as
/// unrecognized here.
pub fn compile_instruction(data: &LineBuffer) -> Result<Instruction, CommandError> {
    match compile(data)? {
        Request::Execute(instruction) => Ok(instruction),
        _ => Err(CommandError::UnrecognizedCommand {
            keyword: data.field_str(0).to_string(),
        }),
    }
}

// Movement and rotation: an absent or non-numeric field 1 means "no limit".
fn drive(opcode: Opcode, data: &LineBuffer) -> Request {
    Request::Execute(Instruction::new(opcode, data.field_int(1).unwrap_or(NO_LIMIT)))
}

fn numeric(data: &LineBuffer, keyword: &'static str) -> Result<i32, CommandError> {
    data.field_int(1)
        .ok_or(CommandError::NonNumericArgument { keyword })
}
