//! The turn driver.
//!
//! Init blocks run once, in order. Repeat blocks then run in passes: each
//! pass runs the blocks in order until one ends the turn, and the next pass
//! starts again from the first block.

use std::sync::Arc;

use gdesc_foundation::{ErrorKind, Result};
use gdesc_world::JumpTarget;
use tracing::{debug, error, warn};

use crate::console::Console;
use crate::engine::Engine;
use crate::signal::Flow;

/// How a pass over the repeat blocks ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// Every block ran to completion.
    Completed,
    /// A block ended the turn; the remaining blocks were skipped.
    Restarted,
    /// The engine halted.
    Halted,
}

impl<C: Console> Engine<C> {
    /// Runs every init block once.
    ///
    /// A `return` in any init block skips the remaining ones; `break` and
    /// `continue` just end the block they occur in.
    ///
    /// # Errors
    ///
    /// Returns the first runtime fault raised.
    pub fn run_inits(&mut self) -> Result<()> {
        let world = Arc::clone(&self.world);
        for (index, block) in world.inits().iter().enumerate() {
            let flow = self
                .in_function(|engine| engine.exec_seq(&block.statements))
                .map_err(|err| err.in_frame(format!("init {index}")))?;
            if self.halted {
                break;
            }
            match flow {
                Flow::Return(_) => {
                    debug!(index, "init returned, skipping the rest");
                    break;
                }
                Flow::Break(JumpTarget::Label(label)) | Flow::Continue(JumpTarget::Label(label)) => {
                    warn!(index, %label, "unmatched label in init block");
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Runs one pass over the repeat blocks.
    ///
    /// # Errors
    ///
    /// Returns the runtime fault that aborted the pass.
    pub fn run_pass(&mut self) -> Result<PassOutcome> {
        let world = Arc::clone(&self.world);
        for (index, block) in world.repeats().iter().enumerate() {
            let flow = self
                .in_function(|engine| engine.exec_seq(&block.statements))
                .map_err(|err| err.in_frame(format!("repeat {index}")))?;
            if self.halted {
                return Ok(PassOutcome::Halted);
            }
            match flow {
                Flow::Normal | Flow::Break(JumpTarget::Innermost | JumpTarget::Proc) => {}
                Flow::Break(JumpTarget::Repeat) => {
                    debug!(index, "turn ended, restarting");
                    return Ok(PassOutcome::Restarted);
                }
                Flow::Break(JumpTarget::Label(label)) => {
                    warn!(index, %label, "unmatched break label reached the turn driver");
                }
                Flow::Continue(target) => {
                    if let JumpTarget::Label(label) = &target {
                        warn!(index, %label, "unmatched continue label reached the turn driver");
                    }
                    debug!(index, "continue, restarting");
                    return Ok(PassOutcome::Restarted);
                }
                Flow::Return(value) => {
                    debug!(index, value, "return, restarting");
                    return Ok(PassOutcome::Restarted);
                }
            }
        }
        Ok(PassOutcome::Completed)
    }

    /// Runs passes until the engine halts or the configured pass limit is reached.
    ///
    /// Runtime faults abort only the current pass; they are logged and, if
    /// configured, printed to the console. Returns the number of passes run.
    ///
    /// # Errors
    ///
    /// Returns console failures, which cannot be recovered from.
    pub fn run_forever(&mut self) -> Result<u64> {
        if self.world.repeats().is_empty() {
            warn!("world has no repeat blocks");
            return Ok(0);
        }
        let mut passes = 0u64;
        while !self.halted {
            if self.config.pass_limit.is_some_and(|limit| passes >= limit) {
                debug!(passes, "pass limit reached");
                break;
            }
            passes += 1;
            match self.run_pass() {
                Ok(PassOutcome::Halted) => break,
                Ok(_) => {}
                Err(err) if matches!(err.kind, ErrorKind::Io(_)) => return Err(err),
                Err(err) => {
                    error!(error = %err, context = ?err.context, "runtime fault");
                    if self.config.echo_faults {
                        self.report_fault(&err)?;
                    }
                }
            }
        }
        Ok(passes)
    }

    fn report_fault(&mut self, err: &gdesc_foundation::Error) -> Result<()> {
        let mut message = format!("Error: {err}");
        if let Some(context) = &err.context {
            let context = context.to_string();
            if !context.is_empty() {
                message.push(' ');
                message.push_str(&context);
            }
        }
        for line in message.lines() {
            self.console.write_line(line)?;
        }
        Ok(())
    }
}
