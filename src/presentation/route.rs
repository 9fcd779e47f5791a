//! Chat routing strings as produced by the chat client, e.g.
//! `"Alice to Everyone"` or `"Alice to Me (Direct Message)"`.

use crate::utils::error::{Error, Result};

pub const EVERYONE: &str = "Everyone";

const TO_EVERYONE: &str = " to Everyone";
const DIRECT_MESSAGE: &str = " (Direct Message)";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRoute {
    pub sender: String,
    pub recipient: String,
}

impl ChatRoute {
    /// Parses `route` for a presenter named `self_name`.
    ///
    /// Returns `Ok(None)` for the presenter's own direct messages to someone
    /// else, which take part in no topic.
    pub fn parse(route: &str, self_name: &str) -> Result<Option<Self>> {
        let to_self = format!(" to {self_name}{DIRECT_MESSAGE}");

        if let Some(sender) = route.strip_suffix(&to_self) {
            return Ok(Some(Self::new(sender, self_name)));
        }
        if let Some(sender) = route.strip_suffix(TO_EVERYONE) {
            return Ok(Some(Self::new(sender, EVERYONE)));
        }
        if route
            .strip_prefix(self_name)
            .is_some_and(|rest| rest.starts_with(" to "))
        {
            return Ok(None);
        }

        Err(Error::BadRequest(format!("malformed route: {route:?}")))
    }

    fn new(sender: &str, recipient: &str) -> Self {
        Self {
            sender: sender.to_string(),
            recipient: recipient.to_string(),
        }
    }
}
