use soroban_sdk::{contracterror, symbol_short, Env, Symbol};

use crate::ttl;

const TRANSITION_LOCK: Symbol = symbol_short!("TX_LOCK");

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(u32)]
pub enum GuardError {
    TransitionInProgress = 99,
}

/// Lock held in instance storage for the span of one state transition.
///
/// The host already refuses a contract that calls back into itself, so the
/// lock is never contended across invocations. It marks the transition span
/// for code running inside it and rejects a transition started from within
/// another one.
pub struct TransitionGuard<'a> {
    env: &'a Env,
}

impl<'a> TransitionGuard<'a> {
    /// # Panics
    ///
    /// Panics with `GuardError::TransitionInProgress` if the lock is already held.
    pub fn acquire(env: &'a Env) -> Self {
        if Self::is_held(env) {
            env.panic_with_error(GuardError::TransitionInProgress);
        }
        env.storage().instance().set(&TRANSITION_LOCK, &true);
        Self { env }
    }

    pub fn is_held(env: &Env) -> bool {
        env.storage().instance().has(&TRANSITION_LOCK)
    }
}

impl Drop for TransitionGuard<'_> {
    fn drop(&mut self) {
        self.env.storage().instance().remove(&TRANSITION_LOCK);
    }
}

/// Runs `apply` as one state transition.
///
/// The lock is held while `apply` runs and released afterwards whatever the
/// outcome. On success the contract instance lifetime is extended.
pub fn transition<T, E, F>(env: &Env, apply: F) -> Result<T, E>
where
    F: FnOnce() -> Result<T, E>,
{
    let result = {
        let _guard = TransitionGuard::acquire(env);
        apply()
    };
    if result.is_ok() {
        ttl::extend_instance(env);
    }
    result
}
