//! Passphrase requests.

use std::cell::Cell;
use std::rc::Rc;

use secrecy::SecretString;

/// Supplies passphrases to the engine.
///
/// The engine asks for a passphrase whenever it needs to unlock a secret
/// key, passing along a hint naming the key and whether the previous attempt
/// was rejected. Returning `None` cancels the request.
pub trait PassphraseHandler {
    /// Requests a passphrase from the user.
    fn request_passphrase(&self, uid_hint: &str, prev_was_bad: bool) -> Option<SecretString>;
}

/// Routes passphrase requests during a passphrase-change session.
///
/// The engine still needs the old passphrase to unlock the key before it
/// asks for a new one, and both requests arrive on the same callback path.
/// While the session's state machine reports that the engine has moved on to
/// the new passphrase, requests go to the `enter_new` handler; at every
/// other point they go to the handler that was installed before the session
/// began. [`EditSession::complete`](crate::EditSession::complete) reinstalls
/// that handler, so sessions of other kinds are unaffected.
pub struct PassphraseRouter {
    entering_new: Rc<Cell<bool>>,
    previous: Rc<dyn PassphraseHandler>,
    enter_new: Rc<dyn PassphraseHandler>,
}

impl PassphraseRouter {
    pub(crate) fn new(
        entering_new: Rc<Cell<bool>>,
        previous: Rc<dyn PassphraseHandler>,
        enter_new: Rc<dyn PassphraseHandler>,
    ) -> Self {
        PassphraseRouter {
            entering_new,
            previous,
            enter_new,
        }
    }
}

impl PassphraseHandler for PassphraseRouter {
    fn request_passphrase(&self, uid_hint: &str, prev_was_bad: bool) -> Option<SecretString> {
        if self.entering_new.get() {
            self.enter_new.request_passphrase(uid_hint, prev_was_bad)
        } else {
            self.previous.request_passphrase(uid_hint, prev_was_bad)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(&'static str);

    impl PassphraseHandler for Fixed {
        fn request_passphrase(&self, _uid_hint: &str, _prev_was_bad: bool) -> Option<SecretString> {
            Some(SecretString::new(self.0.to_owned()))
        }
    }

    #[test]
    fn routes_on_the_shared_flag() {
        use secrecy::ExposeSecret;

        let flag = Rc::new(Cell::new(false));
        let router = PassphraseRouter::new(
            flag.clone(),
            Rc::new(Fixed("old")),
            Rc::new(Fixed("new")),
        );

        let got = router.request_passphrase("", false).unwrap();
        assert_eq!(got.expose_secret(), "old");

        flag.set(true);
        let got = router.request_passphrase("", false).unwrap();
        assert_eq!(got.expose_secret(), "new");
    }
}
