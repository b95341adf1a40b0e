//! Generating keys on a smartcard.
//!
//! Key generation is the one card operation that has to go through the edit
//! interface, because it touches OpenPGP key management as well as the card.
//! The prompts the card-edit menu shows vary between engine versions (a
//! backup-encryption-key question may or may not appear, for example), so
//! this machine carries a `Default` pass-through state: an unrecognized
//! prompt is answered with the engine's default, and the machine resumes
//! from the state that recorded it on the following event.

use keyedit_core::status::{command, prompt};
use keyedit_core::{Error, Result, StatusCode};

use crate::expiry::Expiry;
use crate::session::Interactor;

/// Parameters for generating keys on a smartcard.
#[derive(Clone, Debug, Default)]
pub struct CardKeyParams {
    /// Real name for the generated user ID.
    pub name: String,
    /// Email address for the generated user ID.
    pub email: String,
    /// Comment for the generated user ID.
    pub comment: String,
    /// When the generated keys expire.
    pub expiry: Expiry,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum State {
    Start,
    Command,
    AdminCommand,
    GenerateBackup,
    GenerateReplaceKeys,
    GenerateValidity,
    GenerateName,
    GenerateEmail,
    GenerateComment,
    GenerateDone,
    Quit,
    Default,
    Error,
}

/// Interactor that generates keys on the connected smartcard.
pub(crate) struct CardGenKey {
    state: State,
    /// Where to resume after a `Default` round answered an optional prompt.
    post_default_state: State,
    /// Precomputed answer for the validity prompt.
    expiration_day: String,
    name: String,
    email: String,
    comment: String,
}

impl CardGenKey {
    pub(crate) fn new(params: CardKeyParams, expiration_day: String) -> Self {
        CardGenKey {
            state: State::Start,
            post_default_state: State::Start,
            expiration_day,
            name: params.name,
            email: params.email,
            comment: params.comment,
        }
    }

    /// Transition for the states that tolerate optional prompts. A prompt in
    /// `expected` advances; the main menu reappearing mid-generation is an
    /// abort; anything else is answered with the engine's default and
    /// resumed from `from`.
    fn or_default(
        &mut self,
        status: StatusCode,
        args: &str,
        from: State,
        expected: &[(&str, State)],
    ) -> std::result::Result<State, Error> {
        if !matches!(status, StatusCode::GetLine | StatusCode::GetBool) {
            return Err(Error::Protocol);
        }
        if let Some((_, next)) = expected.iter().find(|(p, _)| *p == args) {
            return Ok(*next);
        }
        if args == prompt::CARDEDIT {
            return Err(Error::Protocol);
        }
        self.post_default_state = from;
        Ok(State::Default)
    }
}

impl Interactor for CardGenKey {
    fn transit(&mut self, status: StatusCode, args: &str) -> Result<()> {
        // A Default round answered an optional prompt; pick up from the
        // state that recorded it.
        let current = if self.state == State::Default {
            self.post_default_state
        } else {
            self.state
        };
        let next = match current {
            State::Start => match (status, args) {
                (StatusCode::GetLine, prompt::CARDEDIT) => Ok(State::Command),
                _ => Err(Error::Protocol),
            },
            State::Command => match (status, args) {
                (StatusCode::GetLine, prompt::CARDEDIT) => Ok(State::AdminCommand),
                _ => Err(Error::Protocol),
            },
            State::AdminCommand => self.or_default(
                status,
                args,
                current,
                &[(prompt::CARD_BACKUP_ENC, State::GenerateBackup)],
            ),
            State::GenerateBackup => self.or_default(
                status,
                args,
                current,
                &[
                    (prompt::CARD_REPLACE_KEYS, State::GenerateReplaceKeys),
                    (prompt::KEYGEN_VALID, State::GenerateValidity),
                ],
            ),
            State::GenerateReplaceKeys => self.or_default(
                status,
                args,
                current,
                &[(prompt::KEYGEN_VALID, State::GenerateValidity)],
            ),
            State::GenerateValidity => self.or_default(
                status,
                args,
                current,
                &[(prompt::KEYGEN_NAME, State::GenerateName)],
            ),
            State::GenerateName => self.or_default(
                status,
                args,
                current,
                &[(prompt::KEYGEN_EMAIL, State::GenerateEmail)],
            ),
            State::GenerateEmail => self.or_default(
                status,
                args,
                current,
                &[(prompt::KEYGEN_COMMENT, State::GenerateComment)],
            ),
            State::GenerateComment => match status {
                StatusCode::KeyCreated => Ok(State::GenerateDone),
                _ => Err(Error::Protocol),
            },
            State::GenerateDone => match (status, args) {
                (StatusCode::GetLine | StatusCode::GetBool, prompt::CARDEDIT) => Ok(State::Quit),
                (StatusCode::GetLine | StatusCode::GetBool, _) => {
                    self.post_default_state = current;
                    Ok(State::Default)
                }
                _ => Err(Error::Protocol),
            },
            State::Error => match (status, args) {
                (StatusCode::GetLine, prompt::CARDEDIT) => Ok(State::Quit),
                _ => Ok(State::Error),
            },
            // Card edit ends at quit; there is no save prompt.
            State::Quit | State::Default => Err(Error::Protocol),
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
            // An empty line tells the engine to use its default.
            State::Default => Ok(Some(command::DEFAULT)),
            State::Command => Ok(Some(command::ADMIN)),
            State::AdminCommand => Ok(Some(command::GENERATE)),
            // Off-card backups of the encryption key are disabled.
            State::GenerateBackup => Ok(Some(command::NO)),
            State::GenerateReplaceKeys => Ok(Some(command::YES)),
            State::GenerateValidity => Ok(Some(&self.expiration_day)),
            State::GenerateName => Ok(Some(&self.name)),
            State::GenerateEmail => Ok(Some(&self.email)),
            State::GenerateComment => Ok(Some(&self.comment)),
            State::GenerateDone => Ok(None),
            State::Quit => Ok(Some(command::QUIT)),
            State::Error => Ok(None),
            State::Start => Err(Error::Bug),
        }
    }

    fn state(&self) -> &'static str {
        match self.state {
            State::Start => "card.start",
            State::Command => "card.command",
            State::AdminCommand => "card.admin_command",
            State::GenerateBackup => "card.generate_backup",
            State::GenerateReplaceKeys => "card.generate_replace_keys",
            State::GenerateValidity => "card.generate_validity",
            State::GenerateName => "card.generate_name",
            State::GenerateEmail => "card.generate_email",
            State::GenerateComment => "card.generate_comment",
            State::GenerateDone => "card.generate_done",
            State::Quit => "card.quit",
            State::Default => "card.default",
            State::Error => "card.error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn genkey() -> CardGenKey {
        CardGenKey::new(
            CardKeyParams {
                name: "Heinrich Heine".into(),
                email: "heinrichh@example.org".into(),
                comment: "Der Dichter".into(),
                expiry: Expiry::Never,
            },
            "0".into(),
        )
    }

    fn advance(op: &mut CardGenKey, status: StatusCode, args: &str) -> Option<String> {
        op.transit(status, args).unwrap();
        op.action().unwrap().map(str::to_owned)
    }

    #[test]
    fn documented_sequence() {
        let mut op = genkey();
        let script = [
            (StatusCode::GetLine, prompt::CARDEDIT, Some("admin")),
            (StatusCode::GetLine, prompt::CARDEDIT, Some("generate")),
            (StatusCode::GetBool, prompt::CARD_BACKUP_ENC, Some("N")),
            (StatusCode::GetBool, prompt::CARD_REPLACE_KEYS, Some("Y")),
            (StatusCode::GetLine, prompt::KEYGEN_VALID, Some("0")),
            (StatusCode::GetLine, prompt::KEYGEN_NAME, Some("Heinrich Heine")),
            (
                StatusCode::GetLine,
                prompt::KEYGEN_EMAIL,
                Some("heinrichh@example.org"),
            ),
            (StatusCode::GetLine, prompt::KEYGEN_COMMENT, Some("Der Dichter")),
            (StatusCode::KeyCreated, "B", None),
            (StatusCode::GetLine, prompt::CARDEDIT, Some("quit")),
        ];
        for (status, args, expected) in script {
            assert_eq!(advance(&mut op, status, args).as_deref(), expected);
        }
    }

    #[test]
    fn optional_prompt_is_answered_with_default() {
        let mut op = genkey();
        advance(&mut op, StatusCode::GetLine, prompt::CARDEDIT);
        advance(&mut op, StatusCode::GetLine, prompt::CARDEDIT);
        advance(&mut op, StatusCode::GetBool, prompt::CARD_BACKUP_ENC);
        // An engine version that asks an extra question here gets the
        // default, and the machine resumes as if it had not happened.
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, "cardedit.genkeys.size").as_deref(),
            Some("")
        );
        assert_eq!(
            advance(&mut op, StatusCode::GetBool, prompt::CARD_REPLACE_KEYS).as_deref(),
            Some("Y")
        );
    }

    #[test]
    fn fresh_card_skips_replace_keys() {
        let mut op = genkey();
        advance(&mut op, StatusCode::GetLine, prompt::CARDEDIT);
        advance(&mut op, StatusCode::GetLine, prompt::CARDEDIT);
        advance(&mut op, StatusCode::GetBool, prompt::CARD_BACKUP_ENC);
        // No keys on the card: the engine goes straight to validity.
        assert_eq!(
            advance(&mut op, StatusCode::GetLine, prompt::KEYGEN_VALID).as_deref(),
            Some("0")
        );
    }

    #[test]
    fn menu_reappearing_mid_generation_is_an_error() {
        let mut op = genkey();
        advance(&mut op, StatusCode::GetLine, prompt::CARDEDIT);
        advance(&mut op, StatusCode::GetLine, prompt::CARDEDIT);
        assert!(matches!(
            op.transit(StatusCode::GetLine, prompt::CARDEDIT),
            Err(Error::Protocol)
        ));
        // The error state still drains to quit on the next menu prompt.
        op.transit(StatusCode::GetLine, prompt::CARDEDIT).unwrap();
        assert_eq!(op.action().unwrap(), Some("quit"));
    }
}
