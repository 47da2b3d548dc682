use actix_session::Session;

const SESSION_KEY: &str = "flash";

/// Queue a one-shot message for the next rendered page.
pub fn set_flash(session: &Session, message: impl Into<String>) {
    let message = message.into();
    if let Err(e) = session.insert(SESSION_KEY, &message) {
        log::warn!("Dropped flash message {message:?}: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(SESSION_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(SESSION_KEY);
    }
    flash
}
