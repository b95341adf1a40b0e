//! Changing a key's expiration date.

use keyedit_core::status::{command, prompt};
use keyedit_core::{Error, Result, StatusCode};

use crate::session::Interactor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Command,
    Date,
    Quit,
    Save,
    Error,
}

/// Interactor that changes the expiration date of a key.
pub(crate) struct Expire {
    state: State,
    /// `"YYYY-MM-DD"`, or `"0"` for a key that never expires.
    date: String,
}

impl Expire {
    pub(crate) fn new(date: String) -> Self {
        Expire {
            state: State::Start,
            date,
        }
    }
}

impl Interactor for Expire {
    fn transit(&mut self, status: StatusCode, args: &str) -> Result<()> {
        let next = match self.state {
            State::Start => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Command),
                _ => Err(Error::Protocol),
            },
            State::Command => match (status, args) {
                (StatusCode::GetLine, prompt::KEYGEN_VALID) => Ok(State::Date),
                _ => Err(Error::Protocol),
            },
            State::Date => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Quit),
                // The engine re-shows the validity prompt when it rejects
                // the date it was given.
                (StatusCode::GetLine, prompt::KEYGEN_VALID) => Err(Error::InvalidTime),
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
            State::Command => Ok(Some(command::EXPIRE)),
            State::Date => Ok(Some(&self.date)),
            State::Quit => Ok(Some(command::QUIT)),
            State::Save => Ok(Some(command::YES)),
            State::Error => Ok(None),
            State::Start => Err(Error::Bug),
        }
    }

    fn state(&self) -> &'static str {
        match self.state {
            State::Start => "expire.start",
            State::Command => "expire.command",
            State::Date => "expire.date",
            State::Quit => "expire.quit",
            State::Save => "expire.save",
            State::Error => "expire.error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(op: &mut Expire, status: StatusCode, args: &str) -> Option<String> {
        op.transit(status, args).unwrap();
        op.action().unwrap().map(str::to_owned)
    }

    #[test]
    fn documented_sequence() {
        let mut op = Expire::new("2031-01-01".into());
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT).as_deref(),
            Some("expire")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYGEN_VALID).as_deref(),
            Some("2031-01-01")
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
    fn rejected_date_is_invalid_time() {
        let mut op = Expire::new("garbage".into());
        op.transit(StatusCode::GetLine, prompt::KEYEDIT).unwrap();
        op.transit(StatusCode::GetLine, prompt::KEYGEN_VALID).unwrap();
        // Re-shown validity prompt: the engine rejected the date.
        assert!(matches!(
            op.transit(StatusCode::GetLine, prompt::KEYGEN_VALID),
            Err(Error::InvalidTime)
        ));
        // The error state stays quiet until the main prompt reappears.
        assert_eq!(op.action().unwrap(), None);
        op.transit(StatusCode::GetLine, prompt::KEYEDIT).unwrap();
        assert_eq!(op.action().unwrap(), Some("quit"));
    }

    #[test]
    fn error_state_absorbs_unexpected_input() {
        let mut op = Expire::new("0".into());
        assert!(op.transit(StatusCode::GetBool, "bogus.prompt").is_err());
        // Anything that is not the main prompt leaves the machine parked.
        op.transit(StatusCode::GetLine, "other.prompt").unwrap();
        assert_eq!(op.action().unwrap(), None);
        op.transit(StatusCode::GetLine, prompt::KEYEDIT).unwrap();
        assert_eq!(op.action().unwrap(), Some("quit"));
    }
}
