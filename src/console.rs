//! The operator console loop.
//!
//! Ties the line reader, tokenizer, compiler, instruction log, and hardware
//! capabilities into the top-level dispatch loop: prompt, read a line,
//! classify it once, then execute-and-record a drive instruction or perform
//! a log meta-command. All per-iteration state lives here; only the log
//! persists across lines.

use anyhow::Result;
use itertools::Itertools;
use log::{Level, debug, log_enabled};

use crate::compiler::{Request, compile, compile_instruction};
use crate::hardware::{DistanceSensor, MotionActuator, SignalSensor, Travel};
use crate::instruction::{Instruction, Opcode, PUSH_BUTTON};
use crate::instruction_log::InstructionLog;
use crate::line_buffer::LineBuffer;
use crate::line_reader::read_line;
use crate::tokenizer::tokenize;
use crate::transport::Transport;

/// The console state: the instruction log plus the three hardware
/// capabilities drive commands dispatch to.
pub struct Console<M: MotionActuator, D: DistanceSensor, S: SignalSensor> {
    pub log: InstructionLog,
    pub motion: M,
    pub range: D,
    pub button: S,
}

impl<M: MotionActuator, D: DistanceSensor, S: SignalSensor> Console<M, D, S> {
    pub fn new(motion: M, range: D, button: S) -> Self {
        Self {
            log: InstructionLog::new(),
            motion,
            range,
            button,
        }
    }

    /// Startup range gate: block until the range sensor reports an object
    /// within `threshold_cm`, then write the measured reading.
    pub fn gate(&mut self, transport: &mut dyn Transport, threshold_cm: u32) {
        let reading = self.range.wait_until_within(threshold_cm);
        transport.write_line(&reading.to_string());
    }

    /// Run the dispatch loop until the transport closes. Reading the next
    /// line is the single suspension point; every diagnostic returns control
    /// here rather than aborting.
    pub fn run(&mut self, transport: &mut dyn Transport) -> Result<()> {
        let mut data = LineBuffer::new();
        loop {
            transport.write_byte(b'>');
            data.clear();
            if !read_line(transport, &mut data)? {
                return Ok(());
            }
            transport.write_line("");
            tokenize(&mut data);
            if log_enabled!(Level::Debug) && data.field_count() > 0 {
                debug!(
                    "fields: {}",
                    data.fields().map(|(kind, text)| format!("{:?}:{:?}", kind, text)).join(" ")
                );
            }
            if data.field_count() == 0 {
                continue;
            }
            match compile(&data) {
                Ok(Request::Execute(instruction)) => {
                    // Recording and actuation are independent effects; the
                    // append happens first and is never skipped.
                    self.log.append(instruction);
                    self.execute(instruction);
                }
                Ok(Request::List) => self.list(transport),
                Ok(Request::Insert(position)) => {
                    if !self.insert(transport, position)? {
                        return Ok(());
                    }
                }
                Ok(Request::Delete(position)) => {
                    if let Err(err) = self.log.delete_at(position) {
                        transport.write_line(&err.to_string());
                    }
                }
                Err(err) => transport.write_line(&err.to_string()),
            }
        }
    }

    fn execute(&mut self, instruction: Instruction) {
        match instruction.opcode {
            Opcode::Forward => self.motion.drive_forward(Travel::from_argument(instruction.argument)),
            Opcode::Reverse => self.motion.drive_reverse(Travel::from_argument(instruction.argument)),
            Opcode::RotateCw => self.motion.rotate_cw(instruction.argument),
            Opcode::RotateCcw => self.motion.rotate_ccw(instruction.argument),
            Opcode::Wait => {
                if instruction.argument == PUSH_BUTTON {
                    self.button.wait_for_release();
                }
            }
            Opcode::Pause => self.motion.pause(instruction.argument.max(0) as u32),
            Opcode::Stop => self.motion.stop(),
        }
    }

    fn list(&self, transport: &mut dyn Transport) {
        for (index, instruction) in self.log.entries().iter().enumerate() {
            transport.write_line(&format!("{}. {}", index + 1, instruction));
        }
    }

    // The nested read uses a fresh scoped buffer so no state leaks into the
    // outer loop. Returns false when the transport closed mid-insert.
    fn insert(&mut self, transport: &mut dyn Transport, position: i32) -> Result<bool> {
        transport.write_str("insert command: ");
        let mut data = LineBuffer::new();
        if !read_line(transport, &mut data)? {
            return Ok(false);
        }
        transport.write_line("");
        tokenize(&mut data);
        let inserted = compile_instruction(&data)
            .and_then(|instruction| self.log.insert_at(position, instruction));
        if let Err(err) = inserted {
            transport.write_line(&err.to_string());
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{MockButton, MockMotion, MockRange, MotionCall};
    use crate::transport::MockTransport;

    fn console() -> Console<MockMotion, MockRange, MockButton> {
        Console::new(MockMotion::default(), MockRange::default(), MockButton::default())
    }

    fn run_script(script: &str) -> (Console<MockMotion, MockRange, MockButton>, MockTransport) {
        let mut console = console();
        let mut transport = MockTransport::script(script);
        console.run(&mut transport).unwrap();
        (console, transport)
    }

    #[test]
    fn test_drive_command_appends_and_actuates() {
        let (console, _) = run_script("forward 10\n");
        assert_eq!(console.motion.calls, vec![MotionCall::Forward(Travel::Distance(10))]);
        assert_eq!(console.log.entries(), &[Instruction::new(Opcode::Forward, 10)]);
    }

    #[test]
    fn test_unlimited_forward_then_stop() {
        let (console, _) = run_script("forward\nstop\n");
        assert_eq!(console.motion.calls, vec![
            MotionCall::Forward(Travel::Unlimited),
            MotionCall::Stop,
        ]);
        assert_eq!(console.log.len(), 2);
    }

    #[test]
    fn test_wait_pb_blocks_on_button() {
        let (console, _) = run_script("wait pb\nwait xyz\n");
        assert_eq!(console.button.releases, 1);
        assert_eq!(console.log.entries()[0], Instruction::new(Opcode::Wait, PUSH_BUTTON));
    }

    #[test]
    fn test_list_renders_one_based_entries() {
        let (_, transport) = run_script("forward 10\ncw 90\nwait pb\nlist\n");
        assert!(transport.output.contains("1. forward 10\n2. cw 90\n3. wait pb\n"));
    }

    #[test]
    fn test_blank_lines_are_reprompted() {
        let (console, transport) = run_script("\n\nstop\n");
        assert_eq!(console.motion.calls, vec![MotionCall::Stop]);
        assert_eq!(transport.output.matches('>').count(), 4);
    }

    #[test]
    fn test_unrecognized_command_reports_and_continues() {
        let (console, transport) = run_script("jump 3\nstop\n");
        assert!(transport.output.contains("unrecognized command: jump\n"));
        assert_eq!(console.motion.calls, vec![MotionCall::Stop]);
        assert_eq!(console.log.len(), 1);
    }

    #[test]
    fn test_pause_diagnostics() {
        let (console, transport) = run_script("pause\npause xx\npause 250\n");
        assert!(transport.output.contains("pause: missing argument\n"));
        assert!(transport.output.contains("pause: argument must be numeric\n"));
        assert_eq!(console.motion.calls, vec![MotionCall::Pause(250)]);
    }

    #[test]
    fn test_insert_reads_a_nested_line() {
        let (console, transport) = run_script("forward 10\nreverse 20\ninsert 1\ncw 45\nlist\n");
        assert!(transport.output.contains("insert command: "));
        assert!(transport.output.contains("1. cw 45\n2. forward 10\n3. reverse 20\n"));
        // The inserted instruction is recorded without being actuated.
        assert_eq!(console.motion.calls, vec![
            MotionCall::Forward(Travel::Distance(10)),
            MotionCall::Reverse(Travel::Distance(20)),
        ]);
    }

    #[test]
    fn test_insert_rejects_meta_commands() {
        let (console, transport) = run_script("forward 10\ninsert 1\nlist\n");
        assert!(transport.output.contains("unrecognized command: list\n"));
        assert_eq!(console.log.len(), 1);
    }

    #[test]
    fn test_delete_shifts_entries() {
        let (console, transport) = run_script("forward 10\nreverse 20\ndelete 1\nlist\n");
        assert!(transport.output.contains("1. reverse 20\n"));
        assert!(!transport.output.contains("forward 10\n2."));
        assert_eq!(console.log.len(), 1);
    }

    #[test]
    fn test_delete_out_of_range_reports() {
        let (console, transport) = run_script("forward 10\ndelete 9\nlist\n");
        assert!(transport.output.contains("log position out of range: 9\n"));
        assert_eq!(console.log.len(), 1);
    }

    #[test]
    fn test_overflowing_appends_keep_newest_five() {
        let script = (1..=6).map(|i| format!("pause {}\n", i)).collect::<String>() + "list\n";
        let (console, transport) = run_script(&script);
        assert!(console.log.is_full());
        assert!(transport.output.contains("1. pause 2\n"));
        assert!(transport.output.contains("5. pause 6\n"));
    }

    #[test]
    fn test_run_ends_when_script_is_exhausted() {
        let (_, transport) = run_script("stop\n");
        assert!(transport.output.ends_with('>'));
    }

    #[test]
    fn test_gate_reports_the_reading() {
        let mut console = console();
        console.range.reading = 12;
        let mut transport = MockTransport::script("");
        console.gate(&mut transport, 15);
        assert_eq!(console.range.thresholds, vec![15]);
        assert_eq!(transport.output, "12\n");
    }
}
