//! Entry points for starting edit operations.

use std::cell::Cell;
use std::io::Write;
use std::rc::Rc;

use chrono::Local;

use keyedit_core::{CheckLevel, KeyHandle, Ownertrust, Result};

use crate::expiry::{expiration_day, Expiry};
use crate::ops::card::{CardGenKey, CardKeyParams};
use crate::ops::expire::Expire;
use crate::ops::passwd::Passwd;
use crate::ops::sign::Sign;
use crate::ops::trust::Trust;
use crate::passphrase::{PassphraseHandler, PassphraseRouter};
use crate::session::{DoneCallback, EditSession};

/// Interface to the engine-communication layer.
///
/// The layer that owns the engine process implements this trait; the entry
/// points in this module use it to set an exchange up. After an entry point
/// returns a session, the implementation delivers every status event to
/// [`EditSession::on_status`] in the order the engine emits them, and calls
/// [`EditSession::complete`] exactly once when the exchange has ended.
pub trait Exchange {
    /// The channel that commands are written to.
    type Output: Write;

    /// Begins an edit exchange on `key`, returning the command channel.
    fn begin_key_edit(&mut self, key: &KeyHandle) -> Result<Self::Output>;

    /// Begins an edit exchange with the connected smartcard.
    fn begin_card_edit(&mut self) -> Result<Self::Output>;

    /// Makes `signer` the only signing key for subsequent exchanges.
    fn select_signer(&mut self, signer: &KeyHandle) -> Result<()>;

    /// The currently installed passphrase handler.
    fn passphrase_handler(&self) -> Rc<dyn PassphraseHandler>;

    /// Installs `handler` as the passphrase handler.
    fn set_passphrase_handler(&mut self, handler: Rc<dyn PassphraseHandler>);
}

/// Starts changing the expiration date of `key`.
pub fn change_expiry<E: Exchange>(
    engine: &mut E,
    key: &KeyHandle,
    expiry: Expiry,
    on_done: DoneCallback,
) -> Result<EditSession<E::Output>> {
    let output = engine.begin_key_edit(key)?;
    let date = expiration_day(expiry, Local::now().date_naive());
    Ok(EditSession::new(Box::new(Expire::new(date)), output, on_done))
}

/// Starts changing the ownertrust of `key`.
pub fn change_ownertrust<E: Exchange>(
    engine: &mut E,
    key: &KeyHandle,
    trust: Ownertrust,
    on_done: DoneCallback,
) -> Result<EditSession<E::Output>> {
    let output = engine.begin_key_edit(key)?;
    Ok(EditSession::new(Box::new(Trust::new(trust)), output, on_done))
}

/// Starts signing `key` with `signer`.
///
/// With `local` set the signature is non-exportable and stays in the local
/// keyring.
pub fn sign_key<E: Exchange>(
    engine: &mut E,
    key: &KeyHandle,
    signer: &KeyHandle,
    check: CheckLevel,
    local: bool,
    on_done: DoneCallback,
) -> Result<EditSession<E::Output>> {
    engine.select_signer(signer)?;
    let output = engine.begin_key_edit(key)?;
    Ok(EditSession::new(
        Box::new(Sign::new(check, local)),
        output,
        on_done,
    ))
}

/// Starts changing the passphrase of `key`.
///
/// The engine requests the old and the new passphrase on the same callback
/// path, so for the lifetime of this session the engine's passphrase handler
/// is replaced with a [`PassphraseRouter`] that sends the new-passphrase
/// request to `enter_new` and everything else to the handler that was
/// installed before. Completing the session reinstalls the previous handler.
pub fn change_passphrase<E: Exchange>(
    engine: &mut E,
    key: &KeyHandle,
    enter_new: Rc<dyn PassphraseHandler>,
    on_done: DoneCallback,
) -> Result<EditSession<E::Output>> {
    let entering_new = Rc::new(Cell::new(false));
    let previous = engine.passphrase_handler();
    engine.set_passphrase_handler(Rc::new(PassphraseRouter::new(
        entering_new.clone(),
        previous.clone(),
        enter_new,
    )));

    let output = match engine.begin_key_edit(key) {
        Ok(output) => output,
        Err(err) => {
            engine.set_passphrase_handler(previous);
            return Err(err);
        }
    };

    Ok(
        EditSession::new(Box::new(Passwd::new(entering_new)), output, on_done)
            .forwarding_sym_events()
            .restoring(previous),
    )
}

/// Starts generating keys on the connected smartcard.
///
/// Existing keys on the card are replaced, and no off-card backup of the
/// encryption key is made.
pub fn generate_card_key<E: Exchange>(
    engine: &mut E,
    params: CardKeyParams,
    on_done: DoneCallback,
) -> Result<EditSession<E::Output>> {
    let output = engine.begin_card_edit()?;
    let expiration_day = expiration_day(params.expiry, Local::now().date_naive());
    Ok(EditSession::new(
        Box::new(CardGenKey::new(params, expiration_day)),
        output,
        on_done,
    ))
}
