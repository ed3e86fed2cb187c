// ── cached_holiday_engine.rs ────────────────────────────────────────────────

use std::sync::Arc;

use crate::time::calendar::cachebackend::{
    CacheBackend,
    HolidayCacheKey,
    RefCellBackend,
    RwLockBackend
};
use crate::time::calendar::holidaycalendar::HolidayCalendar;
use crate::time::calendar::holidaycatalog::HolidayCatalog;
use crate::time::calendar::holidayengine::HolidayEngine;
use crate::time::calendar::holidaymap::HolidayMap;
use crate::time::holidayerror::HolidayError;

/// Engine that memoizes holiday maps; `C` decides thread safety.
pub struct CachedHolidayEngine<C: CacheBackend> {
    catalog: Arc<HolidayCatalog>,
    backend: C,
}

impl<C: CacheBackend> CachedHolidayEngine<C> {
    fn new_with_backend(catalog: Arc<HolidayCatalog>, backend: C) -> Self {
        Self { catalog, backend }
    }

    pub fn cached_entries(&self) -> usize {
        self.backend.len()
    }
}

impl CachedHolidayEngine<RefCellBackend> {
    pub fn new(catalog: Arc<HolidayCatalog>) -> Self {
        Self::new_with_backend(catalog, RefCellBackend::new())
    }
}

impl CachedHolidayEngine<RwLockBackend> {
    pub fn new_threadsafe(catalog: Arc<HolidayCatalog>) -> Self {
        Self::new_with_backend(catalog, RwLockBackend::new())
    }
}

impl<C: CacheBackend> HolidayCalendar for CachedHolidayEngine<C> {
    fn catalog(&self) -> &HolidayCatalog {
        &self.catalog
    }

    fn holidays_for_year(&self, year: i32, subdivision: &str, observed: bool) -> Result<HolidayMap, HolidayError> {
        let key = HolidayCacheKey::new(*self.catalog.uuid(), year, subdivision, observed);
        self.backend.get_or_compute(key, || {
            HolidayEngine::new(&self.catalog).holidays_for_year(year, subdivision, observed)
        })
    }
}

pub type SingleThreadedHolidayEngine = CachedHolidayEngine<RefCellBackend>;
pub type MultiThreadedHolidayEngine  = CachedHolidayEngine<RwLockBackend>;
