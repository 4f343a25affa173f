use soroban_sdk::{symbol_short, Address, Env, Symbol, Vec};

// ── Storage Keys ─────────────────────────────────────────────────────────────

const OWNER: Symbol = symbol_short!("OWNER");
const ADMIN_PREFIX: Symbol = symbol_short!("ADM");
const ADMIN_LIST: Symbol = symbol_short!("ADM_LIST");

const TTL_THRESHOLD: u32 = 5184000;
const TTL_EXTEND_TO: u32 = 10368000;

// ── Storage Helpers ──────────────────────────────────────────────────────────

fn admin_key(admin: &Address) -> (Symbol, Address) {
    (ADMIN_PREFIX, admin.clone())
}

fn extend_ttl(env: &Env, key: &(Symbol, Address)) {
    env.storage()
        .persistent()
        .extend_ttl(key, TTL_THRESHOLD, TTL_EXTEND_TO);
}

// ── Owner ────────────────────────────────────────────────────────────────────

/// Records the contract owner. Called once during initialisation; callers
/// must verify authorization beforehand.
pub fn set_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&OWNER, owner);
}

pub fn get_owner(env: &Env) -> Option<Address> {
    env.storage().instance().get(&OWNER)
}

/// Returns true if `who` is the stored owner.
pub fn is_owner(env: &Env, who: &Address) -> bool {
    match get_owner(env) {
        Some(owner) => owner == *who,
        None => false,
    }
}

// ── Admin registry ───────────────────────────────────────────────────────────

/// Registers `admin` in the admin set and tracks it in the enumeration list.
/// Only callable internally — callers must verify authorization beforehand.
pub fn add_admin(env: &Env, admin: &Address) {
    let key = admin_key(admin);
    env.storage().persistent().set(&key, &true);
    extend_ttl(env, &key);

    let mut list: Vec<Address> = env
        .storage()
        .instance()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env));
    if !list.contains(admin) {
        list.push_back(admin.clone());
        env.storage().instance().set(&ADMIN_LIST, &list);
    }
}

/// Removes `admin` from the admin set and the enumeration list.
pub fn remove_admin(env: &Env, admin: &Address) {
    env.storage().persistent().remove(&admin_key(admin));

    let list: Vec<Address> = env
        .storage()
        .instance()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env));
    if let Some(index) = list.first_index_of(admin) {
        let mut updated = list;
        updated.remove(index);
        env.storage().instance().set(&ADMIN_LIST, &updated);
    }
}

/// Returns true if `who` is a registered admin.
pub fn is_admin(env: &Env, who: &Address) -> bool {
    let key = admin_key(who);
    let registered: bool = env.storage().persistent().get(&key).unwrap_or(false);
    if registered {
        extend_ttl(env, &key);
    }
    registered
}

/// Returns every registered admin address.
pub fn get_all_admins(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&ADMIN_LIST)
        .unwrap_or(Vec::new(env))
}

/// Guard helper: true when `who` may exercise operator privileges
/// (halt / resume). The owner always qualifies.
pub fn is_operator(env: &Env, who: &Address) -> bool {
    is_owner(env, who) || is_admin(env, who)
}
