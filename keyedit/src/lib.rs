//! *Edit-command interaction engine for an OpenPGP key-management engine.*
//!
//! The engine's "edit" interface is line oriented: the engine shows a prompt,
//! expects a textual answer on its command channel, and reports progress as
//! status events. Every supported operation (changing a key's expiration date
//! or ownertrust, signing a key, changing a passphrase, generating keys on a
//! smartcard) is modelled as a Moore machine. A *transit* function picks the
//! next state from the current state and the incoming status event, and an
//! *action* function picks the answer to send from the new state alone.
//! [`EditSession`] drives any such machine against a command channel, and the
//! entry points in this crate construct sessions for the built-in operations.
//!
//! Errors are sticky: the first error recorded during a session is its final
//! result. An erroring machine still steers itself to the quit command the
//! next time the main menu is shown, so a failed exchange always terminates
//! instead of leaving the engine waiting for input.
//!
//! # Example
//!
//! Driving an ownertrust change against an engine-communication layer:
//!
//! ```
//! use std::cell::RefCell;
//! use std::io::{self, Write};
//! use std::rc::Rc;
//!
//! use keyedit::secrecy::SecretString;
//! use keyedit::{
//!     change_ownertrust, prompt, Exchange, KeyHandle, Ownertrust, PassphraseHandler,
//!     StatusCode,
//! };
//!
//! // Command channel backed by a shared buffer.
//! #[derive(Clone, Default)]
//! struct Channel(Rc<RefCell<Vec<u8>>>);
//!
//! impl Write for Channel {
//!     fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
//!         self.0.borrow_mut().extend_from_slice(buf);
//!         Ok(buf.len())
//!     }
//!
//!     fn flush(&mut self) -> io::Result<()> {
//!         Ok(())
//!     }
//! }
//!
//! struct NoPassphrase;
//!
//! impl PassphraseHandler for NoPassphrase {
//!     fn request_passphrase(&self, _uid_hint: &str, _prev_was_bad: bool) -> Option<SecretString> {
//!         None
//!     }
//! }
//!
//! struct Engine {
//!     channel: Channel,
//!     passphrase: Rc<dyn PassphraseHandler>,
//! }
//!
//! impl Exchange for Engine {
//!     type Output = Channel;
//!
//!     fn begin_key_edit(&mut self, _key: &KeyHandle) -> keyedit::Result<Channel> {
//!         Ok(self.channel.clone())
//!     }
//!
//!     fn begin_card_edit(&mut self) -> keyedit::Result<Channel> {
//!         Ok(self.channel.clone())
//!     }
//!
//!     fn select_signer(&mut self, _signer: &KeyHandle) -> keyedit::Result<()> {
//!         Ok(())
//!     }
//!
//!     fn passphrase_handler(&self) -> Rc<dyn PassphraseHandler> {
//!         self.passphrase.clone()
//!     }
//!
//!     fn set_passphrase_handler(&mut self, handler: Rc<dyn PassphraseHandler>) {
//!         self.passphrase = handler;
//!     }
//! }
//!
//! let mut engine = Engine {
//!     channel: Channel::default(),
//!     passphrase: Rc::new(NoPassphrase),
//! };
//! let key = KeyHandle::new("ECAF7590EB3443B5C7CF3ACB6C7EE1B8621CC013");
//!
//! let mut session = change_ownertrust(
//!     &mut engine,
//!     &key,
//!     Ownertrust::Full,
//!     Box::new(|result| assert!(result.is_ok())),
//! )?;
//!
//! // The engine-communication layer forwards each status event as it
//! // arrives, then signals completion.
//! session.on_status(StatusCode::GetLine, prompt::KEYEDIT)?;
//! session.on_status(StatusCode::GetLine, prompt::OWNERTRUST_VALUE)?;
//! session.on_status(StatusCode::GetLine, prompt::KEYEDIT)?;
//! session.on_status(StatusCode::GetBool, prompt::SAVE_OKAY)?;
//! session.complete(&mut engine)?;
//!
//! assert_eq!(&*engine.channel.0.borrow(), b"trust\n3\nquit\nY\n");
//! # Ok::<(), keyedit::Error>(())
//! ```

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod engine;
mod expiry;
mod ops;
mod passphrase;
mod session;

// Re-export crates that are used in our public API.
pub use secrecy;

pub use keyedit_core::{
    error::{Error, Result},
    key::{CheckLevel, KeyHandle, Ownertrust},
    status::{command, prompt, StatusCode},
};

pub use engine::{
    change_expiry, change_ownertrust, change_passphrase, generate_card_key, sign_key, Exchange,
};
pub use expiry::{expiration_day, Expiry, IntervalUnit};
pub use ops::card::CardKeyParams;
pub use passphrase::{PassphraseHandler, PassphraseRouter};
pub use session::{DoneCallback, EditSession, Interactor};
