//! Signing a key.

use keyedit_core::status::{command, prompt};
use keyedit_core::{CheckLevel, Error, Result, StatusCode};

use crate::session::Interactor;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Command,
    Uids,
    SetExpire,
    SetCheckLevel,
    Confirm,
    Quit,
    Save,
    Error,
}

/// Interactor that signs a key with the selected signing key.
///
/// The engine's prompts after the sign command vary with its configuration
/// (how many user IDs the key has, whether a check level or signature expiry
/// is asked for), so `Command` and `Uids` branch on whichever prompt shows
/// up next.
pub(crate) struct Sign {
    state: State,
    check: CheckLevel,
    /// Emit a local, non-exportable signature.
    local: bool,
}

impl Sign {
    pub(crate) fn new(check: CheckLevel, local: bool) -> Self {
        Sign {
            state: State::Start,
            check,
            local,
        }
    }
}

impl Interactor for Sign {
    fn transit(&mut self, status: StatusCode, args: &str) -> Result<()> {
        let next = match self.state {
            State::Start => match (status, args) {
                (StatusCode::GetLine, prompt::KEYEDIT) => Ok(State::Command),
                _ => Err(Error::Protocol),
            },
            State::Command => match (status, args) {
                (StatusCode::GetBool, prompt::SIGN_ALL_OKAY) => Ok(State::Uids),
                (StatusCode::GetBool, prompt::SIGN_UID_OKAY) => Ok(State::Confirm),
                (StatusCode::GetLine, prompt::SIGN_UID_EXPIRE) => Ok(State::SetExpire),
                (StatusCode::GetLine, prompt::SIGN_UID_CLASS) => Ok(State::SetCheckLevel),
                (StatusCode::AlreadySigned, _) => Err(Error::Conflict),
                // The main prompt coming straight back means the sign
                // command was refused: the key is expired.
                (StatusCode::GetLine, prompt::KEYEDIT) => Err(Error::UnusableKey),
                _ => Err(Error::Protocol),
            },
            State::Uids => match (status, args) {
                (StatusCode::GetLine, prompt::SIGN_UID_EXPIRE) => Ok(State::SetExpire),
                (StatusCode::GetLine, prompt::SIGN_UID_CLASS) => Ok(State::SetCheckLevel),
                (StatusCode::GetBool, prompt::SIGN_UID_OKAY) => Ok(State::Confirm),
                (StatusCode::GetLine, prompt::KEYEDIT) => Err(Error::UnusableKey),
                _ => Err(Error::Protocol),
            },
            State::SetExpire => match (status, args) {
                (StatusCode::GetLine, prompt::SIGN_UID_CLASS) => Ok(State::SetCheckLevel),
                _ => Err(Error::Protocol),
            },
            State::SetCheckLevel => match (status, args) {
                (StatusCode::GetBool, prompt::SIGN_UID_OKAY) => Ok(State::Confirm),
                _ => Err(Error::Protocol),
            },
            State::Confirm => match (status, args) {
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
            State::Command => Ok(Some(if self.local {
                command::LSIGN
            } else {
                command::SIGN
            })),
            State::Uids => Ok(Some(command::YES)),
            // The signature expires together with the key.
            State::SetExpire => Ok(Some(command::YES)),
            State::SetCheckLevel => Ok(Some(self.check.code())),
            State::Confirm => Ok(Some(command::YES)),
            State::Quit => Ok(Some(command::QUIT)),
            State::Save => Ok(Some(command::YES)),
            State::Error => Ok(None),
            State::Start => Err(Error::Bug),
        }
    }

    fn state(&self) -> &'static str {
        match self.state {
            State::Start => "sign.start",
            State::Command => "sign.command",
            State::Uids => "sign.uids",
            State::SetExpire => "sign.set_expire",
            State::SetCheckLevel => "sign.set_check_level",
            State::Confirm => "sign.confirm",
            State::Quit => "sign.quit",
            State::Save => "sign.save",
            State::Error => "sign.error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn advance(op: &mut Sign, status: StatusCode, args: &str) -> Option<String> {
        op.transit(status, args).unwrap();
        op.action().unwrap().map(str::to_owned)
    }

    #[test]
    fn full_sequence_with_every_prompt() {
        let mut op = Sign::new(CheckLevel::Casual, false);
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT).as_deref(),
            Some("sign")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetBool, prompt::SIGN_ALL_OKAY).as_deref(),
            Some("Y")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::SIGN_UID_EXPIRE).as_deref(),
            Some("Y")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::SIGN_UID_CLASS).as_deref(),
            Some("2")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetBool, prompt::SIGN_UID_OKAY).as_deref(),
            Some("Y")
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
    fn local_signature_uses_lsign() {
        let mut op = Sign::new(CheckLevel::default(), true);
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT).as_deref(),
            Some("lsign")
        );
    }

    #[test]
    fn short_sequence_single_uid() {
        // A key with one user ID can go straight to the confirmation.
        let mut op = Sign::new(CheckLevel::default(), false);
        advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT);
        assert_eq!(
            advance(&mut op, StatusCode::GetBool, prompt::SIGN_UID_OKAY).as_deref(),
            Some("Y")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT).as_deref(),
            Some("quit")
        );
    }

    #[test]
    fn already_signed_is_a_conflict() {
        let mut op = Sign::new(CheckLevel::default(), false);
        advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT);
        assert!(matches!(
            op.transit(StatusCode::AlreadySigned, ""),
            Err(Error::Conflict)
        ));
        // Still terminates through quit.
        op.transit(StatusCode::GetLine, prompt::KEYEDIT).unwrap();
        assert_eq!(op.action().unwrap(), Some("quit"));
    }

    #[test]
    fn expired_key_is_unusable() {
        let mut op = Sign::new(CheckLevel::default(), false);
        advance(&mut op, StatusCode::GetLine, prompt::KEYEDIT);
        assert!(matches!(
            op.transit(StatusCode::GetLine, prompt::KEYEDIT),
            Err(Error::UnusableKey)
        ));
    }
}
