use crate::error::EngineError;

/// Answers whether a user is signed in. Identity itself is out of scope; the
/// engine only needs a yes or no before it lets callers in.
pub trait PresenceCheck {
    fn is_user_present(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserPresence {
    Present,
    Absent,
}

impl UserPresence {
    /// Present when the host has any user record at all.
    #[must_use]
    pub fn from_user<T>(user: Option<&T>) -> Self {
        if user.is_some() {
            Self::Present
        } else {
            Self::Absent
        }
    }
}

impl PresenceCheck for UserPresence {
    fn is_user_present(&self) -> bool {
        matches!(self, Self::Present)
    }
}

/// # Errors
///
/// Returns `EngineError::UserAbsent` when `check` reports no user.
pub fn require_presence(check: &dyn PresenceCheck) -> Result<(), EngineError> {
    if check.is_user_present() {
        Ok(())
    } else {
        Err(EngineError::UserAbsent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct HostSession {
        signed_in: bool,
    }

    impl PresenceCheck for HostSession {
        fn is_user_present(&self) -> bool {
            self.signed_in
        }
    }

    #[test]
    fn presence_follows_user_record() {
        assert_eq!(UserPresence::from_user(Some(&"ada")), UserPresence::Present);
        assert_eq!(UserPresence::from_user::<String>(None), UserPresence::Absent);
    }

    #[test]
    fn require_presence_rejects_absent_user() {
        assert!(require_presence(&UserPresence::Present).is_ok());
        assert!(matches!(
            require_presence(&UserPresence::Absent),
            Err(EngineError::UserAbsent)
        ));
        assert!(require_presence(&HostSession { signed_in: true }).is_ok());
        assert!(require_presence(&HostSession { signed_in: false }).is_err());
    }
}
