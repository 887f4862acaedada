// Session loop for the swapper

use super::constants::*;
use super::diagnostics::{Diagnostics, Severity};
use super::display::{display, print_int};
use super::errors::SessionError;
use super::input::{Confirmation, InputReader};
use crate::memory::scratch::{ScratchAllocator, ScratchStats};
use crate::memory::stack::StackFrame;
use crate::memory::swap::swap_slots;
use crate::memory::value::SlotRef;
use crate::snapshot::{FrameSnapshot, SwapSnapshot};
use crate::ui::memory_view::{render_to_buffer, write_buffer, MEMORY_VIEW_WIDTH};
use std::io::{BufRead, Write};

/// Where the session is in its prompt/swap cycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Prompting,
    Swapping,
    Done,
}

/// How a session ended without error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The operator answered `n` to the repeat prompt
    Declined,
    /// Input ended at a prompt
    InputClosed,
}

/// Knobs for a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Cap on malformed answers per prompt; `None` retries forever
    pub max_retries: Option<usize>,
    /// Cap on live scratch bytes
    pub scratch_limit: usize,
    /// Print the stack frame pane after each swap
    pub memory_view: bool,
    /// Color diagnostics and the memory view
    pub color: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            max_retries: None,
            scratch_limit: crate::memory::constants::DEFAULT_SCRATCH_LIMIT,
            memory_view: false,
            color: false,
        }
    }
}

/// The interactive swap session
pub struct Session<R: BufRead, W: Write, E: Write> {
    /// Tokenizing operator input
    input: InputReader<R>,

    /// Prompts and result lines
    out: W,

    /// Diagnostics stream
    diagnostics: Diagnostics<E>,

    /// Frame holding the two value slots
    frame: StackFrame,
    num1: SlotRef<i32>,
    num2: SlotRef<i32>,

    /// Source of scratch buffers for swaps
    scratch: ScratchAllocator,

    state: SessionState,

    /// Completed swap cycles
    cycles: usize,

    /// Frame state around the most recent swap
    last_swap: Option<SwapSnapshot>,

    memory_view: bool,
    color: bool,
}

impl<R: BufRead, W: Write, E: Write> Session<R, W, E> {
    /// Create a session reading from `input`, printing to `out`, reporting to `err`
    pub fn new(input: R, out: W, err: E, config: SessionConfig) -> Self {
        let mut frame = StackFrame::new(FRAME_NAME);
        let num1 = frame
            .declare::<i32>("num1")
            .expect("fresh frame already has a num1 slot");
        let num2 = frame
            .declare::<i32>("num2")
            .expect("fresh frame already has a num2 slot");

        Session {
            input: InputReader::new(input, config.max_retries),
            out,
            diagnostics: Diagnostics::new(err, config.color),
            frame,
            num1,
            num2,
            scratch: ScratchAllocator::new(config.scratch_limit),
            state: SessionState::Prompting,
            cycles: 0,
            last_swap: None,
            memory_view: config.memory_view,
            color: config.color,
        }
    }

    /// Run until the operator declines, input closes, or a fatal error occurs
    pub fn run(&mut self) -> Result<SessionOutcome, SessionError> {
        log::debug!("session started");
        while self.state != SessionState::Done {
            match self.step() {
                Ok(()) => {}
                Err(SessionError::InputClosed { prompt }) => {
                    log::info!("input closed at prompt {:?}", prompt.trim_end());
                    self.state = SessionState::Done;
                    return Ok(SessionOutcome::InputClosed);
                }
                Err(e) => {
                    if let SessionError::Swap(swap_error) = &e {
                        self.diagnostics
                            .report(Severity::Fatal, &swap_error.to_string())?;
                    }
                    self.state = SessionState::Done;
                    return Err(e);
                }
            }
        }
        log::debug!("session finished after {} cycle(s)", self.cycles);
        Ok(SessionOutcome::Declined)
    }

    /// Advance the state machine by one transition
    pub fn step(&mut self) -> Result<(), SessionError> {
        match self.state {
            SessionState::Prompting => self.prompt_values(),
            SessionState::Swapping => self.swap_and_confirm(),
            SessionState::Done => Ok(()),
        }
    }

    fn prompt_values(&mut self) -> Result<(), SessionError> {
        let a: i32 = self
            .input
            .read_value(NUM1_PROMPT, &mut self.out, &mut self.diagnostics)?;
        let b: i32 = self
            .input
            .read_value(NUM2_PROMPT, &mut self.out, &mut self.diagnostics)?;

        self.store(a, b);
        self.show(BEFORE_SWAP)?;

        self.transition(SessionState::Swapping);
        Ok(())
    }

    fn swap_and_confirm(&mut self) -> Result<(), SessionError> {
        let before = FrameSnapshot::capture(&self.frame);

        if let Err(e) = swap_slots(&mut self.frame, self.num1, self.num2, &mut self.scratch) {
            if e.is_fatal() {
                return Err(e.into());
            }
            log::warn!("swap skipped: {}", e);
            self.diagnostics.report(Severity::Error, &e.to_string())?;
        }

        self.cycles += 1;
        let snapshot = SwapSnapshot {
            cycle: self.cycles,
            before,
            after: FrameSnapshot::capture(&self.frame),
        };

        self.show(AFTER_SWAP)?;
        if self.memory_view {
            let buf = render_to_buffer(&snapshot, self.scratch.stats(), MEMORY_VIEW_WIDTH);
            write_buffer(&mut self.out, &buf, self.color)?;
        }
        self.last_swap = Some(snapshot);

        let answer = self.input.read_confirmation(
            REPEAT_PROMPT,
            &mut self.out,
            &mut self.diagnostics,
        )?;
        self.transition(match answer {
            Confirmation::Yes => SessionState::Prompting,
            Confirmation::No => SessionState::Done,
        });
        Ok(())
    }

    fn store(&mut self, a: i32, b: i32) {
        self.frame
            .write(self.num1, a)
            .expect("num1 slot was issued by this frame");
        self.frame
            .write(self.num2, b)
            .expect("num2 slot was issued by this frame");
    }

    // Only called after `store`, so both slots are initialized.
    fn show(&mut self, message: &str) -> Result<(), SessionError> {
        let a = self
            .frame
            .read(self.num1)
            .expect("num1 is written before it is shown");
        let b = self
            .frame
            .read(self.num2)
            .expect("num2 is written before it is shown");
        display(&mut self.out, message, &a, &b, &print_int)?;
        Ok(())
    }

    fn transition(&mut self, next: SessionState) {
        log::trace!("state {:?} -> {:?}", self.state, next);
        self.state = next;
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of swap cycles completed so far
    pub fn cycles(&self) -> usize {
        self.cycles
    }

    pub fn last_swap(&self) -> Option<&SwapSnapshot> {
        self.last_swap.as_ref()
    }

    pub fn scratch_stats(&self) -> ScratchStats {
        self.scratch.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_swap_is_reported_and_session_continues() {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let (outcome, cycles, acquisitions) = {
            let mut session = Session::new(
                "5 10 y 1 2 n\n".as_bytes(),
                &mut stdout,
                &mut stderr,
                SessionConfig::default(),
            );
            // Both handles name the same bytes, so the swap sees an overlap.
            session.num2 = session.num1;
            let outcome = session.run();
            (outcome, session.cycles(), session.scratch_stats().acquisitions)
        };

        assert!(matches!(outcome, Ok(SessionOutcome::Declined)));
        assert_eq!(cycles, 2);
        assert_eq!(acquisitions, 0);

        let stdout = String::from_utf8(stdout).unwrap();
        assert!(stdout.contains("Before swap (integers): 10, 10\n"));
        assert!(stdout.contains("After swap (integers): 10, 10\n"));
        assert!(stdout.contains("After swap (integers): 2, 2\n"));
        assert_eq!(
            String::from_utf8(stderr).unwrap(),
            "Error: Cannot swap overlapping regions: 4 bytes at 0x4 and 0x4.\n\
             Error: Cannot swap overlapping regions: 4 bytes at 0x4 and 0x4.\n"
        );
    }
}
