//! Process-wide client with explicit setup and teardown.
//!
//! For programs that want a single shared client instead of passing one
//! around. Nothing is created implicitly: [`init`] must run before
//! [`with_client`], and [`teardown`] releases the client again.

use crate::client::ClarifyClient;
use crate::error::{ClarifyError, Result};
use crate::types::ClientConfig;
use std::cell::Cell;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::info;

static CLIENT: Mutex<Option<ClarifyClient>> = Mutex::new(None);

thread_local! {
    /// Set while this thread runs an operation inside [`with_client`].
    static IN_OPERATION: Cell<bool> = const { Cell::new(false) };
}

/// Clears [`IN_OPERATION`] when the operation returns or panics.
struct OperationScope;

impl OperationScope {
    fn enter() -> Result<Self> {
        if IN_OPERATION.with(Cell::get) {
            return Err(ClarifyError::Configuration(
                "global::with_client() cannot be nested".into(),
            ));
        }
        IN_OPERATION.with(|active| active.set(true));
        Ok(Self)
    }
}

impl Drop for OperationScope {
    fn drop(&mut self) {
        IN_OPERATION.with(|active| active.set(false));
    }
}

fn slot() -> MutexGuard<'static, Option<ClarifyClient>> {
    CLIENT.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Create the process-wide client, replacing any previous one.
pub fn init(config: ClientConfig) -> Result<()> {
    let client = ClarifyClient::new(config)?;
    *slot() = Some(client);
    info!("Process-wide Clarify client initialized");
    Ok(())
}

/// Install an already built client, replacing any previous one.
pub fn install(client: ClarifyClient) {
    *slot() = Some(client);
}

/// Drop the process-wide client. Returns whether one was installed.
pub fn teardown() -> bool {
    slot().take().is_some()
}

pub fn is_initialized() -> bool {
    slot().is_some()
}

/// Run `operation` against the process-wide client.
///
/// The client is locked for the duration of the call, so operations from
/// different threads run one at a time. The lock is not re-entrant: a
/// nested `with_client` from inside `operation` fails with
/// [`ClarifyError::Configuration`], and calling [`init`], [`install`],
/// [`teardown`] or [`is_initialized`] from inside it deadlocks.
pub fn with_client<T>(operation: impl FnOnce(&ClarifyClient) -> Result<T>) -> Result<T> {
    let _scope = OperationScope::enter()?;
    let guard = slot();
    let client = guard.as_ref().ok_or_else(|| {
        ClarifyError::Configuration(
            "global::init() must be called before any API operation".into(),
        )
    })?;
    operation(client)
}
