// ── cache_backend.rs ────────────────────────────────────────────────────────

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use uuid::Uuid;

use crate::time::calendar::holidaymap::HolidayMap;
use crate::time::holidayerror::HolidayError;

/// Identity of one query result.
///
/// Holiday maps are pure functions of these four values, so cached entries
/// never need invalidating.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HolidayCacheKey {
    catalog: Uuid,
    year: i32,
    subdivision: String,
    observed: bool
}

impl HolidayCacheKey {
    pub fn new(catalog: Uuid, year: i32, subdivision: &str, observed: bool) -> HolidayCacheKey {
        HolidayCacheKey { catalog, year, subdivision: subdivision.to_owned(), observed }
    }
}

/// Lookup plus compute-and-store. Failed computations are not cached.
pub trait CacheBackend {
    fn get_or_compute<F>(&self, key: HolidayCacheKey, compute: F) -> Result<HolidayMap, HolidayError>
        where F: FnOnce() -> Result<HolidayMap, HolidayError>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ── single-threaded: RefCell ────────────────────────────────────────────────

#[derive(Default)]
pub struct RefCellBackend {
    cache: RefCell<HashMap<HolidayCacheKey, HolidayMap>>,
}

impl RefCellBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for RefCellBackend {
    fn get_or_compute<F>(&self, key: HolidayCacheKey, compute: F) -> Result<HolidayMap, HolidayError>
        where F: FnOnce() -> Result<HolidayMap, HolidayError> {
        if let Some(holidays) = self.cache.borrow().get(&key) {
            return Ok(holidays.clone());
        }
        let holidays = compute()?;
        self.cache.borrow_mut().insert(key, holidays.clone());
        Ok(holidays)
    }

    fn len(&self) -> usize {
        self.cache.borrow().len()
    }
}

// ── multi-threaded: RwLock ──────────────────────────────────────────────────
//
// Two threads missing the same key may both compute it; the results are
// identical, so the second write is harmless.

#[derive(Default)]
pub struct RwLockBackend {
    cache: RwLock<HashMap<HolidayCacheKey, HolidayMap>>,
}

impl RwLockBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

impl CacheBackend for RwLockBackend {
    fn get_or_compute<F>(&self, key: HolidayCacheKey, compute: F) -> Result<HolidayMap, HolidayError>
        where F: FnOnce() -> Result<HolidayMap, HolidayError> {
        if let Some(holidays) = self.cache.read().unwrap_or_else(PoisonError::into_inner).get(&key) {
            return Ok(holidays.clone());
        }

        // compute outside the lock so other readers are not blocked
        let holidays = compute()?;
        self.cache.write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, holidays.clone());
        Ok(holidays)
    }

    fn len(&self) -> usize {
        self.cache.read().unwrap_or_else(PoisonError::into_inner).len()
    }
}
