//! The driver shared by every edit operation.

use std::io::{self, Write};
use std::rc::Rc;

use log::debug;

use keyedit_core::{Error, Result, StatusCode};

use crate::engine::Exchange;
use crate::passphrase::PassphraseHandler;

/// Callback invoked exactly once with a session's final result.
pub type DoneCallback = Box<dyn FnOnce(Result<()>)>;

/// A state machine that can drive one edit operation.
///
/// Implementations are Moore machines. [`Interactor::transit`] consumes one
/// status event and advances the state; [`Interactor::action`] derives the
/// command to send from the state alone and must not advance it. The driver
/// in [`EditSession`] sequences the two and owns the sticky error.
pub trait Interactor {
    /// Advances the machine on a status event.
    ///
    /// Returns an error if the event has no valid transition from the current
    /// state. Even then the machine must move to a state from which it
    /// reaches its quit command the next time the operation's main prompt is
    /// shown, so that the exchange terminates.
    fn transit(&mut self, status: StatusCode, args: &str) -> Result<()>;

    /// The command to send for the current state, if any.
    ///
    /// An empty command means "accept the engine's default" and is sent as a
    /// bare line terminator. `None` means the state requires no response.
    fn action(&self) -> Result<Option<&str>>;

    /// The name of the current state, for tracing.
    fn state(&self) -> &'static str;
}

/// One in-flight edit operation.
///
/// A session owns the command channel for the duration of the exchange. The
/// engine-communication layer delivers every status event to
/// [`EditSession::on_status`] in the order the engine emits them, then calls
/// [`EditSession::complete`] exactly once; the channel is released when the
/// session is consumed. Sessions do not nest: one key-edit exchange, one
/// session.
pub struct EditSession<W: Write> {
    interactor: Box<dyn Interactor>,
    /// First error recorded this session. Never cleared, never overwritten.
    sticky: Option<Error>,
    output: W,
    on_done: DoneCallback,
    /// Whether `NeedPassphraseSym` events reach the interactor. Only the
    /// passphrase-change operation wants them.
    forward_sym: bool,
    /// Passphrase handler to reinstall when the session completes.
    previous_handler: Option<Rc<dyn PassphraseHandler>>,
}

impl<W: Write> EditSession<W> {
    /// Creates a session that drives `interactor` against `output`.
    ///
    /// `on_done` receives the final sticky error when the session completes.
    pub fn new(interactor: Box<dyn Interactor>, output: W, on_done: DoneCallback) -> Self {
        EditSession {
            interactor,
            sticky: None,
            output,
            on_done,
            forward_sym: false,
            previous_handler: None,
        }
    }

    /// Forwards `NeedPassphraseSym` events to the interactor instead of
    /// filtering them.
    pub(crate) fn forwarding_sym_events(mut self) -> Self {
        self.forward_sym = true;
        self
    }

    /// Reinstalls `handler` on the engine when the session completes.
    pub(crate) fn restoring(mut self, handler: Rc<dyn PassphraseHandler>) -> Self {
        self.previous_handler = Some(handler);
        self
    }

    /// Feeds one status event to the session.
    ///
    /// Status events that never require a response are answered with the
    /// current sticky error unchanged. Everything else goes through the
    /// interactor's transit function and, when that reports no new error, its
    /// action function; any command produced is written to the channel with a
    /// line terminator appended.
    ///
    /// Returns the current sticky error. Callers use this to observe how the
    /// session is going, not to abort it: the interactor keeps answering
    /// until the exchange reaches its natural end.
    pub fn on_status(&mut self, status: StatusCode, args: &str) -> Result<()> {
        if ignored(status, self.forward_sym) {
            return self.current();
        }

        debug!(
            "edit: state={} input={} ({})",
            self.interactor.state(),
            status,
            args
        );
        match self.interactor.transit(status, args) {
            Ok(()) => match self.interactor.action() {
                Ok(Some(command)) => {
                    debug!("edit: state={} send {:?}", self.interactor.state(), command);
                    if let Err(e) = write_command(&mut self.output, command) {
                        if self.sticky.is_none() {
                            self.sticky = Some(Error::Io(e));
                        }
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    if self.sticky.is_none() {
                        self.sticky = Some(e);
                    }
                }
            },
            Err(e) => {
                debug!(
                    "edit: state={} transit failed: {}",
                    self.interactor.state(),
                    e
                );
                if self.sticky.is_none() {
                    self.sticky = Some(e);
                }
            }
        }
        self.current()
    }

    /// Concludes the session once the engine signals that the exchange has
    /// ended.
    ///
    /// Reinstalls the passphrase handler that was active before a
    /// passphrase-change session, invokes the completion callback with the
    /// final sticky error, and releases the command channel. Returns the same
    /// result the callback received.
    pub fn complete<E>(self, engine: &mut E) -> Result<()>
    where
        E: Exchange<Output = W>,
    {
        if let Some(previous) = self.previous_handler {
            engine.set_passphrase_handler(previous);
        }
        let result = match self.sticky {
            Some(e) => Err(e),
            None => Ok(()),
        };
        (self.on_done)(result.clone());
        result
    }

    fn current(&self) -> Result<()> {
        match &self.sticky {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

/// Returns whether `status` is answered without consulting the interactor.
///
/// These codes never request input from the edit state machines; passphrase
/// traffic in particular is handled on the passphrase callback path, not the
/// command channel. The symmetric variant is the one exception, and only when
/// the session opted in.
fn ignored(status: StatusCode, forward_sym: bool) -> bool {
    match status {
        StatusCode::Eof
        | StatusCode::GotIt
        | StatusCode::NeedPassphrase
        | StatusCode::GoodPassphrase
        | StatusCode::BadPassphrase
        | StatusCode::UseridHint
        | StatusCode::SigExpired
        | StatusCode::KeyExpired => true,
        StatusCode::NeedPassphraseSym => !forward_sym,
        _ => false,
    }
}

fn write_command(out: &mut impl Write, command: &str) -> io::Result<()> {
    if !command.is_empty() {
        out.write_all(command.as_bytes())?;
    }
    out.write_all(b"\n")?;
    out.flush()
}
