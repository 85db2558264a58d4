//! Backend doubles for failure-path tests.

use shelf_storage::{InMemoryBackend, StorageBackend, StorageError, StorageResult};
use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-memory backend whose reads or writes can be switched to fail with
/// an I/O error.
#[derive(Debug, Default)]
pub(crate) struct FailingBackend {
    inner: InMemoryBackend,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
}

impl FailingBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn fail_reads(&self, value: bool) {
        self.fail_reads.store(value, Ordering::SeqCst);
    }

    pub(crate) fn fail_writes(&self, value: bool) {
        self.fail_writes.store(value, Ordering::SeqCst);
    }

    pub(crate) fn slot(&self, name: &str) -> Option<Vec<u8>> {
        self.inner.slot(name)
    }
}

fn injected(op: &str) -> StorageError {
    StorageError::Io(io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("{op} refused"),
    ))
}

impl StorageBackend for FailingBackend {
    fn read(&self, name: &str) -> StorageResult<Vec<u8>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(injected("read"));
        }
        self.inner.read(name)
    }

    fn replace(&self, name: &str, data: &[u8]) -> StorageResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("replace"));
        }
        self.inner.replace(name, data)
    }

    fn remove(&self, name: &str) -> StorageResult<bool> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(injected("remove"));
        }
        self.inner.remove(name)
    }

    fn exists(&self, name: &str) -> StorageResult<bool> {
        self.inner.exists(name)
    }

    fn locate(&self, name: &str) -> Option<PathBuf> {
        self.inner.locate(name)
    }
}
