use soroban_sdk::{Env, IntoVal, Val};

/// Remaining ledgers below which an entry's lifetime is extended.
pub const TTL_THRESHOLD: u32 = 5184000;
/// Lifetime, in ledgers, an entry is extended to.
pub const TTL_EXTEND_TO: u32 = 10368000;

/// Extends the time-to-live (TTL) of a persistent storage entry.
pub fn extend_persistent<K>(env: &Env, key: &K)
where
    K: IntoVal<Env, Val>,
{
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

/// Extends the time-to-live (TTL) of the contract instance and its storage.
pub fn extend_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(TTL_THRESHOLD, TTL_EXTEND_TO);
}
