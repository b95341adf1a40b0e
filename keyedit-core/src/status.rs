//! The engine's status vocabulary.
//!
//! An edit exchange is a sequence of status events, each a [`StatusCode`]
//! paired with an argument string. For the codes that request a response, the
//! argument is a dotted identifier naming the prompt being shown (see
//! [`prompt`]). Prompt identifiers are matched byte-for-byte; the engine's
//! vocabulary is case sensitive.

use std::fmt;
use std::str::FromStr;

/// A status event code emitted by the engine during an edit exchange.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusCode {
    /// The key is already signed by the selected signing key.
    AlreadySigned,
    /// The supplied passphrase was rejected.
    BadPassphrase,
    /// A smartcard event occurred.
    CardCtrl,
    /// The engine closed the status channel.
    Eof,
    /// The engine is requesting a boolean answer.
    GetBool,
    /// The engine is requesting a line that must not be echoed.
    GetHidden,
    /// The engine is requesting a line of input.
    GetLine,
    /// The supplied passphrase was accepted.
    GoodPassphrase,
    /// The engine acknowledged the previous command.
    GotIt,
    /// A key was created.
    KeyCreated,
    /// The key being edited has expired.
    KeyExpired,
    /// A passphrase is needed to unlock a secret key.
    NeedPassphrase,
    /// A symmetric passphrase is needed.
    NeedPassphraseSym,
    /// A signature on the key has expired.
    SigExpired,
    /// A hint naming the key a passphrase is requested for.
    UseridHint,
}

impl StatusCode {
    /// The keyword used for this code on the engine's status lines.
    pub fn keyword(self) -> &'static str {
        match self {
            StatusCode::AlreadySigned => "ALREADY_SIGNED",
            StatusCode::BadPassphrase => "BAD_PASSPHRASE",
            StatusCode::CardCtrl => "CARDCTRL",
            StatusCode::Eof => "EOF",
            StatusCode::GetBool => "GET_BOOL",
            StatusCode::GetHidden => "GET_HIDDEN",
            StatusCode::GetLine => "GET_LINE",
            StatusCode::GoodPassphrase => "GOOD_PASSPHRASE",
            StatusCode::GotIt => "GOT_IT",
            StatusCode::KeyCreated => "KEY_CREATED",
            StatusCode::KeyExpired => "KEYEXPIRED",
            StatusCode::NeedPassphrase => "NEED_PASSPHRASE",
            StatusCode::NeedPassphraseSym => "NEED_PASSPHRASE_SYM",
            StatusCode::SigExpired => "SIGEXPIRED",
            StatusCode::UseridHint => "USERID_HINT",
        }
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

impl FromStr for StatusCode {
    type Err = &'static str;

    /// Parses a status keyword as it appears on the engine's status lines.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ALREADY_SIGNED" => Ok(StatusCode::AlreadySigned),
            "BAD_PASSPHRASE" => Ok(StatusCode::BadPassphrase),
            "CARDCTRL" => Ok(StatusCode::CardCtrl),
            "EOF" => Ok(StatusCode::Eof),
            "GET_BOOL" => Ok(StatusCode::GetBool),
            "GET_HIDDEN" => Ok(StatusCode::GetHidden),
            "GET_LINE" => Ok(StatusCode::GetLine),
            "GOOD_PASSPHRASE" => Ok(StatusCode::GoodPassphrase),
            "GOT_IT" => Ok(StatusCode::GotIt),
            "KEY_CREATED" => Ok(StatusCode::KeyCreated),
            "KEYEXPIRED" => Ok(StatusCode::KeyExpired),
            "NEED_PASSPHRASE" => Ok(StatusCode::NeedPassphrase),
            "NEED_PASSPHRASE_SYM" => Ok(StatusCode::NeedPassphraseSym),
            "SIGEXPIRED" => Ok(StatusCode::SigExpired),
            "USERID_HINT" => Ok(StatusCode::UseridHint),
            _ => Err("unknown status keyword"),
        }
    }
}

pub mod prompt {
    //! Dotted identifiers naming the prompts an edit exchange can show.

    /// The main key-edit menu.
    pub const KEYEDIT: &str = "keyedit.prompt";
    /// Save pending changes before quitting?
    pub const SAVE_OKAY: &str = "keyedit.save.okay";
    /// Sign all user IDs?
    pub const SIGN_ALL_OKAY: &str = "keyedit.sign_all.okay";
    /// Really sign this user ID?
    pub const SIGN_UID_OKAY: &str = "sign_uid.okay";
    /// Should the signature expire with the key?
    pub const SIGN_UID_EXPIRE: &str = "sign_uid.expire";
    /// How thoroughly was the key holder's identity verified?
    pub const SIGN_UID_CLASS: &str = "sign_uid.class";
    /// New ownertrust value, as a numeric code.
    pub const OWNERTRUST_VALUE: &str = "edit_ownertrust.value";
    /// Really assign ultimate trust?
    pub const OWNERTRUST_SET_ULTIMATE: &str = "edit_ownertrust.set_ultimate.okay";
    /// Validity period for a key.
    pub const KEYGEN_VALID: &str = "keygen.valid";
    /// Real name for a generated user ID.
    pub const KEYGEN_NAME: &str = "keygen.name";
    /// Email address for a generated user ID.
    pub const KEYGEN_EMAIL: &str = "keygen.email";
    /// Comment for a generated user ID.
    pub const KEYGEN_COMMENT: &str = "keygen.comment";
    /// The main card-edit menu.
    pub const CARDEDIT: &str = "cardedit.prompt";
    /// Make an off-card backup of the encryption key?
    pub const CARD_BACKUP_ENC: &str = "cardedit.genkeys.backup_enc";
    /// Replace the keys already stored on the card?
    pub const CARD_REPLACE_KEYS: &str = "cardedit.genkeys.replace_keys";
}

pub mod command {
    //! Commands written back to the engine in response to prompts.

    /// Leave the edit menu.
    pub const QUIT: &str = "quit";
    /// Affirmative answer to a boolean prompt.
    pub const YES: &str = "Y";
    /// Negative answer to a boolean prompt.
    pub const NO: &str = "N";
    /// Change the expiration date.
    pub const EXPIRE: &str = "expire";
    /// Change the ownertrust.
    pub const TRUST: &str = "trust";
    /// Sign the key.
    pub const SIGN: &str = "sign";
    /// Sign the key with a non-exportable signature.
    pub const LSIGN: &str = "lsign";
    /// Change the passphrase.
    pub const PASSWD: &str = "passwd";
    /// Enter the card's admin menu.
    pub const ADMIN: &str = "admin";
    /// Generate keys on the card.
    pub const GENERATE: &str = "generate";
    /// The empty command: accept the engine's default.
    pub const DEFAULT: &str = "";
}

#[cfg(test)]
mod tests {
    use super::StatusCode;

    #[test]
    fn keyword_round_trip() {
        for code in [
            StatusCode::AlreadySigned,
            StatusCode::BadPassphrase,
            StatusCode::CardCtrl,
            StatusCode::Eof,
            StatusCode::GetBool,
            StatusCode::GetHidden,
            StatusCode::GetLine,
            StatusCode::GoodPassphrase,
            StatusCode::GotIt,
            StatusCode::KeyCreated,
            StatusCode::KeyExpired,
            StatusCode::NeedPassphrase,
            StatusCode::NeedPassphraseSym,
            StatusCode::SigExpired,
            StatusCode::UseridHint,
        ] {
            assert_eq!(code.keyword().parse(), Ok(code));
        }
    }

    #[test]
    fn unknown_keyword() {
        assert!("PLAINTEXT".parse::<StatusCode>().is_err());
        assert!("get_line".parse::<StatusCode>().is_err());
    }
}
