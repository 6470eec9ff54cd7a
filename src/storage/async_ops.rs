//! Async Operations
//!
//! Runs remote uploads on background threads. The frame loop polls the
//! handle once per frame and never blocks on the network.

use super::StorageError;

#[cfg(not(target_arch = "wasm32"))]
use std::sync::mpsc::{channel, Receiver, TryRecvError};
#[cfg(not(target_arch = "wasm32"))]
use std::thread;
#[cfg(not(target_arch = "wasm32"))]
use super::remote::RemoteSave;
#[cfg(not(target_arch = "wasm32"))]
use crate::save::Save;

/// Result type for async operations
pub type AsyncResult<T> = Result<T, StorageError>;

/// A handle to a pending async operation that can be polled
#[cfg(not(target_arch = "wasm32"))]
pub struct AsyncOp<T> {
    receiver: Receiver<AsyncResult<T>>,
    result: Option<AsyncResult<T>>,
}

#[cfg(not(target_arch = "wasm32"))]
impl<T> AsyncOp<T> {
    fn from_receiver(receiver: Receiver<AsyncResult<T>>) -> Self {
        Self {
            receiver,
            result: None,
        }
    }

    /// Check if the operation has completed (polls the channel)
    pub fn is_complete(&mut self) -> bool {
        if self.result.is_some() {
            return true;
        }

        match self.receiver.try_recv() {
            Ok(result) => {
                self.result = Some(result);
                true
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                // Thread panicked or dropped sender
                self.result = Some(Err(StorageError::Network("upload thread died".into())));
                true
            }
        }
    }

    /// Take the result if complete
    pub fn take(mut self) -> Option<AsyncResult<T>> {
        if self.result.is_none() {
            if let Ok(result) = self.receiver.try_recv() {
                self.result = Some(result);
            }
        }
        self.result
    }
}

/// Upload in flight; `name` is the save's player name for logging
pub struct PendingUpload {
    pub op: AsyncOp<u16>,
    pub name: String,
}

/// Start posting a save on a background thread
#[cfg(not(target_arch = "wasm32"))]
pub fn upload_async(remote: RemoteSave, save: Save) -> PendingUpload {
    let (sender, receiver) = channel();
    let name = save.name.clone();

    thread::spawn(move || {
        let result = remote.post(&save);
        let _ = sender.send(result);
    });

    PendingUpload {
        op: AsyncOp::from_receiver(receiver),
        name,
    }
}

// WASM: no background threads and no remote client; uploads never start

#[cfg(target_arch = "wasm32")]
pub struct AsyncOp<T> {
    result: Option<AsyncResult<T>>,
}

#[cfg(target_arch = "wasm32")]
impl<T> AsyncOp<T> {
    pub fn is_complete(&mut self) -> bool {
        true
    }

    pub fn take(self) -> Option<AsyncResult<T>> {
        self.result
    }
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn test_disconnected_sender_completes_with_error() {
        let (sender, receiver) = channel::<AsyncResult<u16>>();
        drop(sender);
        let mut op = AsyncOp::from_receiver(receiver);
        assert!(op.is_complete());
        assert!(matches!(op.take(), Some(Err(StorageError::Network(_)))));
    }

    #[test]
    fn test_result_arrives() {
        let (sender, receiver) = channel();
        let mut op = AsyncOp::from_receiver(receiver);
        assert!(!op.is_complete());
        sender.send(Ok(200)).unwrap();
        assert!(op.is_complete());
        assert_eq!(op.take(), Some(Ok(200)));
    }
}
