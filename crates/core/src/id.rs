// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Opaque entity identifiers.
//!
//! Every entity id in this system (goal, action, work item) is a random
//! v4 uuid string, exactly 36 bytes (32 hex digits + 4 hyphens). See
//! spec §3 "Identity: opaque 36-character string."

/// Fixed byte length of every id: `xxxxxxxx-xxxx-xxxx-xxxx-xxxxxxxxxxxx`.
pub const ID_LEN: usize = 36;

/// Returns a string slice truncated to at most `n` characters.
pub fn short(s: &str, n: usize) -> &str {
    if s.len() <= n {
        s
    } else {
        &s[..n]
    }
}

/// Fixed-size inline id buffer. Always exactly [`ID_LEN`] ASCII bytes, `Copy`.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct IdBuf {
    buf: [u8; ID_LEN],
}

impl std::hash::Hash for IdBuf {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.as_str().hash(state);
    }
}

impl IdBuf {
    pub fn new(s: &str) -> Self {
        debug_assert!(
            s.len() == ID_LEN,
            "id must be exactly {} bytes ({} bytes): {:?}",
            ID_LEN,
            s.len(),
            s,
        );
        let mut buf = [0u8; ID_LEN];
        let len = s.len().min(ID_LEN);
        buf[..len].copy_from_slice(&s.as_bytes()[..len]);
        Self { buf }
    }

    pub fn as_str(&self) -> &str {
        // Invariant: only constructed from &str, always valid UTF-8.
        match std::str::from_utf8(&self.buf) {
            Ok(s) => s,
            Err(_) => unreachable!("IdBuf constructed from non-UTF-8"),
        }
    }
}

impl std::borrow::Borrow<str> for IdBuf {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Debug for IdBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.as_str())
    }
}

impl std::fmt::Display for IdBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl serde::Serialize for IdBuf {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for IdBuf {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = <&str>::deserialize(deserializer)?;
        if s.len() != ID_LEN {
            return Err(serde::de::Error::custom(format!(
                "id must be exactly {} bytes: {:?}",
                ID_LEN, s
            )));
        }
        Ok(IdBuf::new(s))
    }
}

/// Define a newtype id wrapper around [`IdBuf`].
///
/// Generates `new()` (random uuid v4), `from_string()` (wrap an existing
/// id), `as_str()`, `Display`, `From<String>`/`From<&str>`, `Borrow<str>`,
/// and `Deref` implementations.
///
/// ```ignore
/// define_id! {
///     /// Doc comment for the id type.
///     pub struct GoalId;
/// }
/// ```
#[macro_export]
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        pub struct $name:ident;
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub $crate::id::IdBuf);

        impl $name {
            /// Generate a new random id (uuid v4).
            pub fn new() -> Self {
                Self($crate::id::IdBuf::new(&uuid::Uuid::new_v4().to_string()))
            }

            /// Wrap an existing id string (e.g. one loaded back from the store).
            pub fn from_string(id: impl AsRef<str>) -> Self {
                Self($crate::id::IdBuf::new(id.as_ref()))
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0.as_str())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::from_string(s)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::from_string(s)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.0.as_str()
            }
        }

        impl std::ops::Deref for $name {
            type Target = str;

            fn deref(&self) -> &str {
                self.0.as_str()
            }
        }
    };
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
