//! Shared utilities and strongly-typed common values for workspace crates.
//!
//! ```rust
//! use rcommon::{HeaderMap, SessionId};
//!
//! let session = SessionId::from("session-1");
//! let mut headers = HeaderMap::new();
//! headers.insert("x-tenant".to_string(), "acme".to_string());
//!
//! assert_eq!(session.as_str(), "session-1");
//! assert_eq!(headers.len(), 1);
//! ```

pub mod future {
    //! Shared async future aliases.
    //!
    //! ```rust
    //! use rcommon::BoxFuture;
    //!
    //! fn str_len<'a>(value: &'a str) -> BoxFuture<'a, usize> {
    //!     Box::pin(async move { value.len() })
    //! }
    //!
    //! let _future = str_len("hello");
    //! ```

    use std::future::Future;
    use std::pin::Pin;

    pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;
}

pub mod context {
    //! Header maps and session identifier newtypes.
    //!
    //! ```rust
    //! use rcommon::SessionId;
    //!
    //! let fixed = SessionId::new("session-42");
    //! let fresh = SessionId::generate();
    //!
    //! assert_eq!(fixed.to_string(), "session-42");
    //! assert_ne!(fresh, SessionId::generate());
    //! ```

    use std::collections::HashMap;
    use std::fmt::{Display, Formatter};

    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    /// Extra transport headers, name to value.
    pub type HeaderMap = HashMap<String, String>;

    #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct SessionId(String);

    impl SessionId {
        pub fn new(value: impl Into<String>) -> Self {
            Self(value.into())
        }

        /// Creates a random (v4) session identifier.
        pub fn generate() -> Self {
            Self(Uuid::new_v4().to_string())
        }

        pub fn as_str(&self) -> &str {
            self.0.as_str()
        }
    }

    impl Display for SessionId {
        fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
            f.write_str(&self.0)
        }
    }

    impl From<String> for SessionId {
        fn from(value: String) -> Self {
            Self(value)
        }
    }

    impl From<&str> for SessionId {
        fn from(value: &str) -> Self {
            Self(value.to_string())
        }
    }
}

pub use context::{HeaderMap, SessionId};
pub use future::BoxFuture;

#[cfg(test)]
mod tests {
    use super::SessionId;

    #[test]
    fn session_id_round_trips_strings() {
        let session = SessionId::new("session-1");
        let from_str = SessionId::from("session-1");

        assert_eq!(session, from_str);
        assert_eq!(session.as_str(), "session-1");
        assert_eq!(session.to_string(), "session-1");
    }

    #[test]
    fn generated_session_ids_are_uuid_shaped_and_unique() {
        let first = SessionId::generate();
        let second = SessionId::generate();

        assert_ne!(first, second);
        assert_eq!(first.as_str().len(), 36);
        assert_eq!(first.as_str().matches('-').count(), 4);
    }

    #[test]
    fn session_id_serializes_as_plain_string() {
        let session = SessionId::new("abc");
        let value = serde_json::to_value(&session).expect("session id should serialize");
        assert_eq!(value, serde_json::json!("abc"));
    }
}
