use crate::error::{Error, Result};

/// Wallet screen session. Process-lifetime only; there is no log-out.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    LoggedOut,
    LoggedIn {
        address: String,
    },
}

impl Session {
    /// Any non-empty address opens the session. No credential is checked.
    pub fn log_in(&mut self, address: &str) -> Result<()> {
        if let Session::LoggedIn { address } = self {
            return Err(Error::AlreadyLoggedIn(address.clone()));
        }

        let address = address.trim();
        if address.is_empty() {
            return Err(Error::EmptyAddress);
        }

        *self = Session::LoggedIn {
            address: address.to_string(),
        };
        Ok(())
    }

    pub fn is_logged_in(&self) -> bool {
        matches!(self, Session::LoggedIn { .. })
    }

    pub fn address(&self) -> Option<&str> {
        match self {
            Session::LoggedIn { address } => Some(address),
            Session::LoggedOut => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_in_is_one_shot() {
        let mut session = Session::default();
        assert!(!session.is_logged_in());

        assert!(matches!(session.log_in("   "), Err(Error::EmptyAddress)));
        assert!(!session.is_logged_in());

        session.log_in(" 4f3s...8e9k ").unwrap();
        assert_eq!(session.address(), Some("4f3s...8e9k"));

        assert!(matches!(session.log_in("other"), Err(Error::AlreadyLoggedIn(_))));
        assert_eq!(session.address(), Some("4f3s...8e9k"));
    }
}
