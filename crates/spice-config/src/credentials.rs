//! Registry credentials
//!
//! An opaque (client id, secret) pair handed to the feature registry. The
//! secret never appears in `Debug` or `Display` output.

use std::fmt;

/// Client credentials for the feature registry service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    client_id: String,
    secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, secret: impl Into<String>) -> Self {
        Credentials {
            client_id: client_id.into(),
            secret: secret.into(),
        }
    }

    pub fn client_id(&self) -> &str {
        &self.client_id
    }

    /// Raw secret, for clients that have to put it on the wire
    pub fn secret(&self) -> &str {
        &self.secret
    }

    /// Secret with everything but the first four characters masked
    pub fn masked_secret(&self) -> String {
        let visible: String = self.secret.chars().take(4).collect();
        if self.secret.chars().count() <= 4 {
            "****".to_string()
        } else {
            format!("{}****", visible)
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("secret", &"<redacted>")
            .finish()
    }
}

impl fmt::Display for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.client_id, self.masked_secret())
    }
}
