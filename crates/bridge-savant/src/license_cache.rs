//! `LicenseCache`: `"group:id"` → `Vec<License>`, populated on first
//! encounter and reused across the traversal (SPEC_FULL.md §3, §4.4).

use std::collections::HashMap;

use crate::license::License;

#[derive(Debug, Default)]
pub struct LicenseCache {
    map: HashMap<String, Vec<License>>,
}

impl LicenseCache {
    pub fn key(group: &str, id: &str) -> String {
        format!("{group}:{id}")
    }

    pub fn get(&self, group: &str, id: &str) -> Option<&Vec<License>> {
        self.map.get(&Self::key(group, id))
    }

    pub fn insert(&mut self, group: &str, id: &str, licenses: Vec<License>) {
        self.map.insert(Self::key(group, id), licenses);
    }
}
