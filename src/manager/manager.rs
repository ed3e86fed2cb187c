use std::cell::RefMut;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde_json;

use super::managererror::ManagerError;

/// Name → object registry populated from JSON.
///
/// `S` carries whatever the loader needs besides the JSON itself.
pub trait IManager<V, S> where
    V: Clone {
    fn map(&self) -> RefMut<'_, HashMap<String, V>>;

    fn insert_obj_from_json(&self,
                            json_value: serde_json::Value,
                            supports: &S) -> Result<(), ManagerError>;

    fn get(&self, name: &str) -> Result<V, ManagerError> {
        let map = self.map();
        map.get(name).map_or(
            Err(ManagerError::map_elem_not_found(name)),
            |elem| Ok(elem.clone())
        )
    }

    fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.map().keys().cloned().collect();
        names.sort();
        names
    }

    fn insert_obj_from_json_vec(&self,
                                json_vec: &[serde_json::Value],
                                supports: &S) -> Result<(), ManagerError> {
        for j in json_vec.iter() {
            self.insert_obj_from_json(j.clone(), supports)?;
        }
        Ok(())
    }

    fn insert_from_json_value(&self,
                              json_value: serde_json::Value,
                              supports: &S) -> Result<(), ManagerError> {
        match json_value {
            serde_json::Value::Array(json_array) => self.insert_obj_from_json_vec(&json_array, supports),
            json_value => self.insert_obj_from_json(json_value, supports)
        }
    }

    fn from_reader<P: AsRef<Path>>(&self,
                                    file_path: P,
                                    supports: &S) -> Result<(), ManagerError> {
        let file = File::open(file_path)?;
        let reader = BufReader::new(file);
        let json_value: serde_json::Value = serde_json::from_reader(reader)?;
        self.insert_from_json_value(json_value, supports)
    }

    fn from_json_str(&self,
                     json: &str,
                     supports: &S) -> Result<(), ManagerError> {
        let json_value: serde_json::Value = serde_json::from_str(json)?;
        self.insert_from_json_value(json_value, supports)
    }
}
