//! Key-related value types.

use std::fmt;

/// A handle identifying a key to the engine, by fingerprint.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct KeyHandle(String);

impl KeyHandle {
    /// Creates a handle from a key fingerprint.
    pub fn new(fingerprint: impl Into<String>) -> Self {
        KeyHandle(fingerprint.into())
    }

    /// The fingerprint this handle carries.
    pub fn fingerprint(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The confidence a key's owner places in the key holder as an introducer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ownertrust {
    /// No ownertrust assigned.
    Unknown,
    /// The key holder is not trusted to sign other keys.
    Never,
    /// The key holder is marginally trusted to sign other keys.
    Marginal,
    /// The key holder is fully trusted to sign other keys.
    Full,
    /// Signatures by this key are as good as one's own.
    Ultimate,
}

impl Ownertrust {
    /// The numeric code the engine's trust-value prompt expects.
    ///
    /// `Unknown` and `Never` share a code.
    pub fn code(self) -> &'static str {
        match self {
            Ownertrust::Unknown | Ownertrust::Never => "1",
            Ownertrust::Marginal => "2",
            Ownertrust::Full => "3",
            Ownertrust::Ultimate => "4",
        }
    }
}

/// How thoroughly a signer verified the key holder's identity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CheckLevel {
    /// Decline to answer.
    #[default]
    Default,
    /// The identity was not verified at all.
    NotChecked,
    /// The identity was casually verified.
    Casual,
    /// The identity was carefully verified.
    Careful,
}

impl CheckLevel {
    /// The numeric code the engine's check-level prompt expects.
    pub fn code(self) -> &'static str {
        match self {
            CheckLevel::Default => "0",
            CheckLevel::NotChecked => "1",
            CheckLevel::Casual => "2",
            CheckLevel::Careful => "3",
        }
    }
}
