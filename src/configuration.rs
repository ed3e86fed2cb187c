use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use crate::countries::isleofman::isle_of_man;
use crate::countries::unitedkingdom::united_kingdom;
use crate::manager::manager::IManager;
use crate::manager::managererror::ManagerError;
use crate::time::calendar::holidaycatalog::HolidayCatalog;
use crate::time::calendar::holidaycatalogmanager::HolidayCatalogManager;
use crate::time::recurringholiday::recurringholidayloader::CustomHolidayRegistry;

#[derive(Deserialize)]
struct ConfigurationJsonProp {
    #[serde(default)]
    holiday_catalogs: Vec<serde_json::Value>
}

/// Catalogs loaded from JSON (and optionally the built-in ones), plus the
/// custom holiday functions the JSON may refer to.
#[derive(Default)]
pub struct Configuration {
    custom_holidays: CustomHolidayRegistry,
    holiday_catalog_manager: HolidayCatalogManager
}

impl Configuration {
    pub fn new() -> Configuration {
        Configuration::default()
    }

    pub fn with_custom_holidays(custom_holidays: CustomHolidayRegistry) -> Configuration {
        Configuration {
            custom_holidays,
            holiday_catalog_manager: HolidayCatalogManager::new()
        }
    }

    /// Registers the United Kingdom ("GB") and Isle of Man ("IM") catalogs.
    pub fn with_builtin_catalogs(self) -> Result<Configuration, ManagerError> {
        for catalog in [united_kingdom()?, isle_of_man()?] {
            self.holiday_catalog_manager.insert(catalog.country().to_owned(), Arc::new(catalog));
        }
        Ok(self)
    }

    pub fn custom_holidays(&self) -> &CustomHolidayRegistry {
        &self.custom_holidays
    }

    pub fn holiday_catalog_manager(&self) -> &HolidayCatalogManager {
        &self.holiday_catalog_manager
    }

    pub fn catalog(&self, name: &str) -> Result<Arc<HolidayCatalog>, ManagerError> {
        self.holiday_catalog_manager.get(name)
    }

    pub fn from_reader<P: AsRef<Path>>(&self, file_path: P) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_prop: ConfigurationJsonProp = serde_json::from_reader(reader)?;
        self.load(json_prop)
    }

    pub fn from_json_str(&self, json: &str) -> Result<(), ManagerError> {
        let json_prop: ConfigurationJsonProp = serde_json::from_str(json)?;
        self.load(json_prop)
    }

    fn load(&self, json_prop: ConfigurationJsonProp) -> Result<(), ManagerError> {
        self.holiday_catalog_manager.insert_obj_from_json_vec(&json_prop.holiday_catalogs, &self.custom_holidays)
    }
}
