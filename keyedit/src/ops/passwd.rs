//! Changing a key's passphrase.

use std::cell::Cell;
use std::rc::Rc;

use keyedit_core::status::{command, prompt};
use keyedit_core::{Error, Result, StatusCode};

use crate::session::Interactor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Command,
    EnterNew,
    Quit,
    Save,
    Error,
}

/// Interactor that changes the passphrase of a key.
///
/// The passphrase itself never crosses the command channel: the engine asks
/// for it through the passphrase callback path. This machine only tracks
/// whether the engine has moved on to requesting the new passphrase, raising
/// the shared `entering_new` flag that
/// [`PassphraseRouter`](crate::PassphraseRouter) routes on.
pub(crate) struct Passwd {
    state: State,
    entering_new: Rc<Cell<bool>>,
}

impl Passwd {
    pub(crate) fn new(entering_new: Rc<Cell<bool>>) -> Self {
        Passwd {
            state: State::Start,
            entering_new,
        }
    }
}

impl Interactor for Passwd {
    fn transit(&mut self, status: StatusCode, args: &str) -> Result<()> {
        let next = match self.state {
            State::Start => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Command),
                _ => Err(Error::Protocol),
            },
            State::Command | State::EnterNew => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Quit),
                // The old passphrase was accepted; the next request on the
                // passphrase callback path is for the new one.
                (StatusCode::NeedPassphraseSym, _) => Ok(State::EnterNew),
                _ => Err(Error::Protocol),
            },
            State::Quit => match (status, args) {
                (StatusCode::GetBool, prompt::SAVE_OKAY) => Ok(State::Save),
                _ => Err(Error::Protocol),
            },
            State::Error => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Quit),
                _ => Ok(State::Error),
            },
            State::Save => Err(Error::Protocol),
        };
        let result = match next {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(err) => {
                self.state = State::Error;
                Err(err)
            }
        };
        self.entering_new.set(self.state == State::EnterNew);
        result
    }

    fn action(&self) -> Result<Option<&str>> {
        match self.state {
            State::Command => Ok(Some(command::PASSWD)),
            // The response travels on the passphrase callback path.
            State::EnterNew => Ok(None),
            State::Quit => Ok(Some(command::QUIT)),
            State::Save => Ok(Some(command::YES)),
            State::Error => Ok(None),
            State::Start => Err(Error::Bug),
        }
    }

    fn state(&self) -> &'static str {
        match self.state {
            State::Start => "passwd.start",
            State::Command => "passwd.command",
            State::EnterNew => "passwd.enternew",
            State::Quit => "passwd.quit",
            State::Save => "passwd.save",
            State::Error => "passwd.error",
        }
    }
}
