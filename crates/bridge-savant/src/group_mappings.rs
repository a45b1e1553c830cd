//! `GroupMappings`: MavenGroup → SavantGroup, loaded at startup and
//! persisted on successful exit as a flat `key=value` properties file
//! (SPEC_FULL.md §6, "Persisted state"). The load/parse shape is grounded
//! on this codebase's `kargo-core::properties::load_env_file`.

use std::collections::BTreeMap;
use std::path::Path;

use bridge_util::errors::BridgeError;

#[derive(Debug, Clone, Default)]
pub struct GroupMappings {
    map: BTreeMap<String, String>,
}

impl GroupMappings {
    pub fn load(path: &Path) -> miette::Result<Self> {
        let mut map = BTreeMap::new();
        if !path.is_file() {
            return Ok(Self { map });
        }
        let content = std::fs::read_to_string(path).map_err(BridgeError::Io)?;
        for line in content.lines() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('!') {
                continue;
            }
            if let Some((key, value)) = split_key_value(trimmed) {
                map.insert(key, value);
            }
        }
        Ok(Self { map })
    }

    /// Look up `group`; per §4.4 step 1, only a *different* mapped value is
    /// used — an identity mapping behaves as "not present".
    pub fn get(&self, group: &str) -> Option<&str> {
        self.map.get(group).map(String::as_str).filter(|v| *v != group)
    }

    pub fn insert(&mut self, maven_group: impl Into<String>, savant_group: impl Into<String>) {
        self.map.insert(maven_group.into(), savant_group.into());
    }

    pub fn save(&self, path: &Path) -> miette::Result<()> {
        let mut body = String::new();
        for (k, v) in &self.map {
            body.push_str(&escape(k));
            body.push('=');
            body.push_str(&escape(v));
            body.push('\n');
        }
        std::fs::write(path, body).map_err(BridgeError::Io)?;
        Ok(())
    }
}

fn split_key_value(line: &str) -> Option<(String, String)> {
    let sep = line.find(|c| c == '=' || c == ':')?;
    let key = unescape(line[..sep].trim());
    let value = unescape(line[sep + 1..].trim());
    Some((key, value))
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('=', "\\=").replace(':', "\\:")
}

fn unescape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            out.push(c);
        }
    }
    out
}
