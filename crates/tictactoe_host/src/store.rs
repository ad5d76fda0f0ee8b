//! In-memory record store.
//!
//! Stands in for the ledger that owns game records. Records are kept as
//! encoded bytes, and every instruction runs under the store lock from load to
//! commit, so instructions against a record are applied one at a time, in
//! order, and either fully or not at all.

use crate::error::{HostError, HostErrorKind};
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tictactoe_program::{GameRecord, Identity, Instruction, process_instruction};
use tracing::{debug, info, instrument, warn};

/// Opaque key naming a record in the store.
#[derive(
    Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display, From,
)]
#[serde(transparent)]
pub struct RecordHandle(String);

impl RecordHandle {
    /// Creates a handle.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl From<&str> for RecordHandle {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

type Records = HashMap<RecordHandle, Vec<u8>>;

/// Shared, mutex-guarded record store.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<Records>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[instrument]
    pub fn new() -> Self {
        info!("Creating record store");
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Records>, HostError> {
        self.records.lock().map_err(|_| {
            warn!("Record store lock poisoned");
            HostError::new(HostErrorKind::LockPoisoned)
        })
    }

    /// Runs one instruction against the record at `handle`.
    ///
    /// The lock is held across load, execution and commit. A rejected
    /// instruction leaves the stored bytes untouched.
    ///
    /// # Errors
    ///
    /// Returns `HostErrorKind::Rejected` with the program's rejection, or an
    /// encoding/lock error from the store itself.
    #[instrument(skip(self))]
    pub fn execute(
        &self,
        handle: &RecordHandle,
        signer: &Identity,
        instruction: &Instruction,
    ) -> Result<GameRecord, HostError> {
        let mut records = self.lock()?;

        let current = records.get(handle).map(|bytes| decode(bytes)).transpose()?;
        let next = process_instruction(current.as_ref(), signer, instruction)?;

        let bytes = encode(&next)?;
        debug!(%handle, len = bytes.len(), "Committing record");
        records.insert(handle.clone(), bytes);

        Ok(next)
    }

    /// Reads the record at `handle`.
    #[instrument(skip(self))]
    pub fn get(&self, handle: &RecordHandle) -> Result<Option<GameRecord>, HostError> {
        let records = self.lock()?;
        let record = records.get(handle).map(|bytes| decode(bytes)).transpose()?;
        if record.is_none() {
            debug!(%handle, "Record not found");
        }
        Ok(record)
    }

    /// Raw committed bytes at `handle`.
    #[instrument(skip(self))]
    pub fn raw(&self, handle: &RecordHandle) -> Result<Option<Vec<u8>>, HostError> {
        Ok(self.lock()?.get(handle).cloned())
    }

    /// Lists every handle holding a record.
    #[instrument(skip(self))]
    pub fn handles(&self) -> Result<Vec<RecordHandle>, HostError> {
        let mut handles: Vec<_> = self.lock()?.keys().cloned().collect();
        handles.sort();
        debug!(count = handles.len(), "Listed records");
        Ok(handles)
    }
}

/// Encodes a record for storage.
pub fn encode(record: &GameRecord) -> Result<Vec<u8>, HostError> {
    Ok(bincode::serialize(record)?)
}

/// Decodes a stored record.
pub fn decode(bytes: &[u8]) -> Result<GameRecord, HostError> {
    Ok(bincode::deserialize(bytes)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tictactoe_program::{GameState, ProgramError, Tile};

    fn alice() -> Identity {
        Identity::new("alice")
    }

    fn bob() -> Identity {
        Identity::new("bob")
    }

    fn setup(store: &MemoryStore, handle: &RecordHandle) -> GameRecord {
        store
            .execute(handle, &alice(), &Instruction::SetupGame { player_two: bob() })
            .unwrap()
    }

    #[test]
    fn test_setup_commits_record() {
        let store = MemoryStore::new();
        let handle = RecordHandle::new("game-1");
        let record = setup(&store, &handle);

        assert_eq!(store.get(&handle).unwrap(), Some(record));
        assert_eq!(store.handles().unwrap(), vec![handle]);
    }

    #[test]
    fn test_setup_twice_rejected() {
        let store = MemoryStore::new();
        let handle = RecordHandle::new("game-1");
        setup(&store, &handle);

        let err = store
            .execute(&handle, &alice(), &Instruction::SetupGame { player_two: bob() })
            .unwrap_err();
        assert!(matches!(
            err.rejection(),
            Some(ProgramError::InvalidSetup { .. })
        ));
    }

    #[test]
    fn test_rejection_leaves_bytes_identical() {
        let store = MemoryStore::new();
        let handle = RecordHandle::new("game-1");
        setup(&store, &handle);
        let before = store.raw(&handle).unwrap();

        let err = store
            .execute(
                &handle,
                &bob(),
                &Instruction::Play {
                    tile: Tile::new(0, 0),
                },
            )
            .unwrap_err();
        assert!(matches!(
            err.rejection(),
            Some(ProgramError::NotPlayersTurn { .. })
        ));
        assert_eq!(store.raw(&handle).unwrap(), before);
    }

    #[test]
    fn test_play_on_missing_handle() {
        let store = MemoryStore::new();
        let err = store
            .execute(
                &RecordHandle::new("nowhere"),
                &alice(),
                &Instruction::Play {
                    tile: Tile::new(0, 0),
                },
            )
            .unwrap_err();
        assert_eq!(err.rejection(), Some(&ProgramError::AccountNotInitialized));
        assert!(store.handles().unwrap().is_empty());
    }

    #[test]
    fn test_encoding_round_trips_won_record() {
        let store = MemoryStore::new();
        let handle = RecordHandle::new("game-1");
        setup(&store, &handle);
        for (signer, row, column) in [
            (alice(), 0, 0),
            (bob(), 1, 0),
            (alice(), 0, 1),
            (bob(), 1, 1),
            (alice(), 0, 2),
        ] {
            store
                .execute(&handle, &signer, &Instruction::Play { tile: Tile::new(row, column) })
                .unwrap();
        }

        let record = store.get(&handle).unwrap().unwrap();
        assert_eq!(record.state(), &GameState::Won { winner: alice() });
        assert_eq!(decode(&encode(&record).unwrap()).unwrap(), record);
    }

    #[test]
    fn test_decode_garbage_is_encoding_error() {
        let err = decode(&[0xff, 0x01]).unwrap_err();
        assert!(matches!(err.kind, HostErrorKind::Encoding(_)));
    }

    #[test]
    fn test_concurrent_plays_are_serialized() {
        let store = MemoryStore::new();
        let handle = RecordHandle::new("game-1");
        setup(&store, &handle);

        // Both players race for the same square; exactly one play can land,
        // and it must be alice's since it is her turn.
        let threads: Vec<_> = [alice(), bob()]
            .into_iter()
            .map(|signer| {
                let store = store.clone();
                let handle = handle.clone();
                std::thread::spawn(move || {
                    store.execute(&handle, &signer, &Instruction::Play { tile: Tile::new(1, 1) })
                })
            })
            .collect();

        let results: Vec<_> = threads.into_iter().map(|t| t.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);

        let record = store.get(&handle).unwrap().unwrap();
        assert_eq!(record.turn(), 2);
        assert_eq!(record.board().filled(), 1);
    }
}
