//! Slot-backed Credential Store
//!
//! Keeps the token and the cached identity in two named slots of a
//! [`KeyValueStore`]. The identity slot holds a versioned JSON envelope;
//! a bare identity object written by older clients is still accepted.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex, MutexGuard};

use platform::storage::{KeyValueStore, StorageError};

use crate::application::config::ClientConfig;
use crate::domain::entity::identity::Identity;
use crate::domain::repository::{CredentialStore, SessionReset, StoredCredentials};
use crate::domain::value_object::access_token::AccessToken;
use crate::error::AuthResult;

const SCHEMA_VERSION: u32 = 1;

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    schema_version: u32,
    identity: &'a Identity,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredIdentity {
    Envelope {
        schema_version: u32,
        identity: Identity,
    },
    Legacy(Identity),
}

/// Credential store over two named slots
pub struct SlotCredentialStore<K>
where
    K: KeyValueStore,
{
    slots: Arc<K>,
    token_slot: String,
    identity_slot: String,
    // Serializes multi-slot operations so compare-and-clear is atomic
    guard: Mutex<()>,
}

impl<K> SlotCredentialStore<K>
where
    K: KeyValueStore,
{
    pub fn new(slots: Arc<K>, token_slot: impl Into<String>, identity_slot: impl Into<String>) -> Self {
        Self {
            slots,
            token_slot: token_slot.into(),
            identity_slot: identity_slot.into(),
            guard: Mutex::new(()),
        }
    }

    /// Create a store using the slot names from config
    pub fn from_config(slots: Arc<K>, config: &ClientConfig) -> Self {
        Self::new(slots, &config.token_slot, &config.identity_slot)
    }

    fn lock(&self) -> Result<MutexGuard<'_, ()>, StorageError> {
        self.guard.lock().map_err(|_| StorageError::Poisoned)
    }

    fn encode_identity(identity: &Identity) -> Result<String, StorageError> {
        let envelope = EnvelopeRef {
            schema_version: SCHEMA_VERSION,
            identity,
        };
        Ok(serde_json::to_string(&envelope)?)
    }

    fn decode_identity(raw: &str) -> Option<Identity> {
        match serde_json::from_str::<StoredIdentity>(raw) {
            Ok(StoredIdentity::Envelope {
                schema_version: SCHEMA_VERSION,
                identity,
            }) => Some(identity),
            Ok(StoredIdentity::Envelope { schema_version, .. }) => {
                tracing::warn!(schema_version, "Cached identity has unsupported schema version");
                None
            }
            Ok(StoredIdentity::Legacy(identity)) => {
                tracing::debug!("Read cached identity without envelope");
                Some(identity)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Cached identity is malformed");
                None
            }
        }
    }

    fn read_token(&self) -> Option<AccessToken> {
        let raw = self
            .slots
            .get(&self.token_slot)
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to read token slot"))
            .ok()??;
        AccessToken::new(raw).ok()
    }

    fn read_identity(&self) -> Option<Identity> {
        let raw = self
            .slots
            .get(&self.identity_slot)
            .inspect_err(|e| tracing::warn!(error = %e, "Failed to read identity slot"))
            .ok()??;
        Self::decode_identity(&raw)
    }

    fn remove_both(&self) -> Result<(), StorageError> {
        // Token first: a half-finished clear must not leave a usable credential
        self.slots.remove(&self.token_slot)?;
        self.slots.remove(&self.identity_slot)
    }
}

impl<K> CredentialStore for SlotCredentialStore<K>
where
    K: KeyValueStore,
{
    fn save(&self, token: &AccessToken, identity: &Identity) -> AuthResult<()> {
        let encoded = Self::encode_identity(identity)?;
        let _guard = self.lock()?;
        // Identity first: a token is never persisted without its identity
        self.slots.set(&self.identity_slot, &encoded)?;
        self.slots.set(&self.token_slot, token.expose())?;
        Ok(())
    }

    fn save_identity(&self, identity: &Identity) -> AuthResult<()> {
        let encoded = Self::encode_identity(identity)?;
        let _guard = self.lock()?;
        self.slots.set(&self.identity_slot, &encoded)?;
        Ok(())
    }

    fn load(&self) -> StoredCredentials {
        let _guard = self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        StoredCredentials {
            token: self.read_token(),
            identity: self.read_identity(),
        }
    }

    fn load_token(&self) -> Option<AccessToken> {
        let _guard = self.guard.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        self.read_token()
    }

    fn clear(&self) -> AuthResult<()> {
        let _guard = self.lock()?;
        self.remove_both()?;
        Ok(())
    }

    fn clear_if_token(&self, expected: &AccessToken) -> AuthResult<bool> {
        let _guard = self.lock()?;
        if self.read_token().as_ref() != Some(expected) {
            return Ok(false);
        }
        self.remove_both()?;
        Ok(true)
    }
}

impl<K> SessionReset for SlotCredentialStore<K>
where
    K: KeyValueStore,
{
    fn reset_if_current(&self, token: &AccessToken) -> bool {
        self.clear_if_token(token).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "Failed to clear credential store");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_role::UserRole;
    use kernel::id::UserId;
    use platform::storage::{FileStore, MemoryStore};

    fn identity() -> Identity {
        Identity::new(UserId::new(3), "ana@example.edu", "Ana Lima", UserRole::Student)
    }

    fn token(raw: &str) -> AccessToken {
        AccessToken::new(raw).unwrap()
    }

    fn store() -> (Arc<MemoryStore>, SlotCredentialStore<MemoryStore>) {
        let slots = Arc::new(MemoryStore::new());
        (slots.clone(), SlotCredentialStore::new(slots, "token", "userData"))
    }

    #[test]
    fn test_save_then_load() {
        let (_, store) = store();
        store.save(&token("abc"), &identity()).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.token, Some(token("abc")));
        assert_eq!(loaded.identity, Some(identity()));
    }

    #[test]
    fn test_clear_then_load_is_empty() {
        let (slots, store) = store();
        store.save(&token("abc"), &identity()).unwrap();
        store.clear().unwrap();

        assert!(store.load().is_empty());
        assert_eq!(slots.get("token").unwrap(), None);
        assert_eq!(slots.get("userData").unwrap(), None);
        // Clearing an empty store is fine
        store.clear().unwrap();
    }

    #[test]
    fn test_identity_slot_is_versioned() {
        let (slots, store) = store();
        store.save(&token("abc"), &identity()).unwrap();

        let raw = slots.get("userData").unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["schema_version"], 1);
        assert_eq!(value["identity"]["role"], "student");
        assert_eq!(slots.get("token").unwrap().as_deref(), Some("abc"));
    }

    #[test]
    fn test_legacy_identity_accepted() {
        let (slots, store) = store();
        slots.set("token", "abc").unwrap();
        slots
            .set(
                "userData",
                r#"{"id":3,"email":"ana@example.edu","full_name":"Ana Lima","role":"student","created_at":"2024-09-01T10:00:00"}"#,
            )
            .unwrap();

        assert_eq!(store.load().identity, Some(identity()));
    }

    #[test]
    fn test_unreadable_identity_is_absent() {
        let (slots, store) = store();
        slots.set("token", "abc").unwrap();

        for raw in [
            "{broken",
            r#"{"schema_version":2,"identity":{"id":3,"email":"a","full_name":"A","role":"student"}}"#,
            r#"{"id":3,"email":"a","full_name":"A","role":"janitor"}"#,
        ] {
            slots.set("userData", raw).unwrap();
            let loaded = store.load();
            assert_eq!(loaded.token, Some(token("abc")));
            assert_eq!(loaded.identity, None, "payload {raw}");
        }
    }

    #[test]
    fn test_blank_token_slot_is_absent() {
        let (slots, store) = store();
        slots.set("token", "  ").unwrap();
        assert_eq!(store.load_token(), None);
    }

    #[test]
    fn test_clear_if_token_only_matches_current() {
        let (_, store) = store();
        store.save(&token("new"), &identity()).unwrap();

        assert!(!store.clear_if_token(&token("old")).unwrap());
        assert_eq!(store.load_token(), Some(token("new")));

        assert!(store.clear_if_token(&token("new")).unwrap());
        assert!(store.load().is_empty());
        assert!(!store.reset_if_current(&token("new")));
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("session.json");

        let store = SlotCredentialStore::new(Arc::new(FileStore::open(&path)), "token", "userData");
        store.save(&token("abc"), &identity()).unwrap();
        drop(store);

        let reopened = SlotCredentialStore::new(Arc::new(FileStore::open(&path)), "token", "userData");
        assert_eq!(reopened.load_token(), Some(token("abc")));
        assert_eq!(reopened.load().identity, Some(identity()));
    }
}
