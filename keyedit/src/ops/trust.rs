//! Changing a key's ownertrust.

use keyedit_core::status::{command, prompt};
use keyedit_core::{Error, Ownertrust, Result, StatusCode};

use crate::session::Interactor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Command,
    Value,
    ReallyUltimate,
    Quit,
    Save,
    Error,
}

/// Interactor that changes the ownertrust of a key.
pub(crate) struct Trust {
    state: State,
    trust: Ownertrust,
}

impl Trust {
    pub(crate) fn new(trust: Ownertrust) -> Self {
        Trust {
            state: State::Start,
            trust,
        }
    }
}

impl Interactor for Trust {
    fn transit(&mut self, status: StatusCode, args: &str) -> Result<()> {
        let next = match self.state {
            State::Start => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Command),
                _ => Err(Error::Protocol),
            },
            State::Command => match (status, args) {
                (StatusCode::GetLine, prompt::OWNERTRUST_VALUE) => Ok(State::Value),
                _ => Err(Error::Protocol),
            },
            State::Value => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Quit),
                // Ultimate trust needs an extra confirmation.
                (StatusCode::GetBool, prompt::OWNERTRUST_SET_ULTIMATE) => {
                    Ok(State::ReallyUltimate)
                }
                _ => Err(Error::Protocol),
            },
            State::ReallyUltimate => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Quit),
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
        match next {
            Ok(state) => {
                self.state = state;
                Ok(())
            }
            Err(err) => {
                self.state = State::Error;
                Err(err)
            }
        }
    }

    fn action(&self) -> Result<Option<&str>> {
        match self.state {
            State::Command => Ok(Some(command::TRUST)),
            State::Value => Ok(Some(self.trust.code())),
            State::ReallyUltimate => Ok(Some(command::YES)),
            State::Quit => Ok(Some(command::QUIT)),
            State::Save => Ok(Some(command::YES)),
            State::Error => Ok(None),
            State::Start => Err(Error::Bug),
        }
    }

    fn state(&self) -> &'static str {
        match self.state {
            State::Start => "trust.start",
            State::Command => "trust.command",
            State::Value => "trust.value",
            State::ReallyUltimate => "trust.really_ultimate",
            State::Quit => "trust.quit",
            State::Save => "trust.save",
            State::Error => "trust.error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(op: &mut Trust, status: StatusCode, args: &str) -> Option<String> {
        op.transit(status, args).unwrap();
        op.action().unwrap().map(str::to_owned)
    }

    #[test]
    fn documented_sequence() {
        let mut op = Trust::new(Ownertrust::Marginal);
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT).as_deref(),
            Some("trust")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::OWNERTRUST_VALUE).as_deref(),
            Some("2")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT).as_deref(),
            Some("quit")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetBool, prompt::SAVE_OKAY).as_deref(),
            Some("Y")
        );
    }

    #[test]
    fn ultimate_trust_is_confirmed() {
        let mut op = Trust::new(Ownertrust::Ultimate);
        advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT);
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::OWNERTRUST_VALUE).as_deref(),
            Some("4")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetBool, prompt::OWNERTRUST_SET_ULTIMATE).as_deref(),
            Some("Y")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT).as_deref(),
            Some("quit")
        );
    }

    #[test]
    fn unexpected_event_parks_in_error() {
        let mut op = Trust::new(Ownertrust::Full);
        advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT);
        assert!(matches!(
            op.transit(StatusCode::KeyCreated, ""),
            Err(Error::Protocol)
        ));
        op.transit(StatusCode::GetLine, prompt::KEYEDIT).unwrap();
        assert_eq!(op.action().unwrap(), Some("quit"));
    }
}
