use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use digest::DynDigest;
use rand_core::{OsRng, RngCore};

use crate::error::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Lifecycle {
    Idle,
    Running,
    Finished,
}

struct State {
    bytes_remaining: usize,
    lifecycle: Lifecycle,
    result: Option<Vec<u8>>,
}

struct Shared {
    state: Mutex<State>,
    cond: Condvar,
}

impl Shared {
    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

pub struct EntropyAccumulator {
    requested: usize,
    shared: Arc<Shared>,
    hasher: Option<Box<dyn DynDigest + Send>>,
    worker: Option<JoinHandle<()>>,
}

impl EntropyAccumulator {
    pub fn new(byte_count: usize, hasher: Box<dyn DynDigest + Send>) -> Self {
        Self {
            requested: byte_count,
            shared: Arc::new(Shared {
                state: Mutex::new(State {
                    bytes_remaining: byte_count,
                    lifecycle: Lifecycle::Idle,
                    result: None,
                }),
                cond: Condvar::new(),
            }),
            hasher: Some(hasher),
            worker: None,
        }
    }

    pub fn requested_bytes(&self) -> usize {
        self.requested
    }

    pub fn start(&mut self) -> Result<(), Error> {
        {
            let mut state = self.shared.lock();
            match state.lifecycle {
                Lifecycle::Running => return Err(Error::AlreadyStarted),
                Lifecycle::Finished => return Err(Error::AlreadyFinished),
                Lifecycle::Idle => state.lifecycle = Lifecycle::Running,
            }
        }

        let hasher = self.hasher.take().ok_or(Error::AlreadyStarted)?;
        let shared = Arc::clone(&self.shared);
        let worker = thread::Builder::new()
            .name("entropy-worker".to_string())
            .spawn(move || collect(&shared, hasher))
            .map_err(Error::WorkerSpawn)?;

        self.worker = Some(worker);
        Ok(())
    }

    pub fn bytes_remaining(&self) -> usize {
        self.shared.lock().bytes_remaining
    }

    pub fn is_finished(&self) -> bool {
        self.shared.lock().lifecycle == Lifecycle::Finished
    }

    // Bounded wait that re-arms on timeout; returns a consistent
    // (bytes_remaining, finished) snapshot taken under the state lock.
    pub fn wait(&self, timeout: Duration) -> (usize, bool) {
        let state = self.shared.lock();
        if state.lifecycle == Lifecycle::Finished {
            return (state.bytes_remaining, true);
        }

        let (state, _) = self
            .shared
            .cond
            .wait_timeout(state, timeout)
            .unwrap_or_else(PoisonError::into_inner);

        (state.bytes_remaining, state.lifecycle == Lifecycle::Finished)
    }

    pub fn result(&mut self) -> Result<Vec<u8>, Error> {
        {
            let state = self.shared.lock();
            if state.lifecycle != Lifecycle::Finished {
                return Err(Error::ResultNotReady);
            }
        }

        if let Some(worker) = self.worker.take() {
            worker.join().map_err(|_| Error::WorkerFailed)?;
        }

        let state = self.shared.lock();
        state.result.clone().ok_or(Error::ResultNotReady)
    }
}

fn collect(shared: &Shared, mut hasher: Box<dyn DynDigest + Send>) {
    let mut rng = OsRng;
    let mut byte = [0u8; 1];

    loop {
        if shared.lock().bytes_remaining == 0 {
            break;
        }

        rng.fill_bytes(&mut byte);
        shared.lock().bytes_remaining -= 1;
        hasher.update(&byte);
    }

    let digest = hasher.finalize();

    // Finished and the result are published in the same critical section,
    // so a poller can never observe one without the other.
    {
        let mut state = shared.lock();
        state.result = Some(digest.to_vec());
        state.lifecycle = Lifecycle::Finished;
    }
    shared.cond.notify_all();
}
