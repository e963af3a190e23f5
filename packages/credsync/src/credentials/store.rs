use crate::credentials::atomic::atomic_replace;
use crate::error::CredentialsFileError;
use ini::{EscapePolicy, Ini, ParseOption, WriteOption};
use std::collections::HashSet;
use std::path::PathBuf;

pub const ACCESS_KEY_ID: &str = "aws_access_key_id";
pub const SECRET_ACCESS_KEY: &str = "aws_secret_access_key";

/// A loaded credentials file.
///
/// Values are read and written verbatim: no quote or escape processing, so
/// secret keys containing `/`, `+` or `\` survive a round trip.
#[derive(Debug)]
pub struct CredentialsFile {
    path: PathBuf,
    ini: Ini,
}

fn parse_option() -> ParseOption {
    ParseOption {
        enabled_quote: false,
        enabled_escape: false,
        ..ParseOption::default()
    }
}

fn write_option() -> WriteOption {
    WriteOption {
        escape_policy: EscapePolicy::Nothing,
        kv_separator: " = ",
        ..WriteOption::default()
    }
}

/// Every content line must be a section header or a `key = value` pair
fn check_lines(raw: &str) -> Result<(), String> {
    for (n, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(['#', ';']) {
            continue;
        }
        if line.starts_with('[') {
            if !line.contains(']') {
                return Err(format!("line {}: unterminated section header", n + 1));
            }
        } else if !line.contains(['=', ':']) {
            return Err(format!("line {}: expected `key = value`", n + 1));
        }
    }
    Ok(())
}

/// Section names are unique per file, key names (ignoring ASCII case) per section
fn check_unique(ini: &Ini) -> Result<(), String> {
    let mut sections = HashSet::new();
    for (name, properties) in ini.iter() {
        if let Some(name) = name {
            if !sections.insert(name) {
                return Err(format!("duplicate section [{name}]"));
            }
        }
        let mut keys = HashSet::new();
        for (key, _) in properties.iter() {
            if !keys.insert(key.to_ascii_lowercase()) {
                return Err(format!("duplicate key {key:?} in section [{}]", name.unwrap_or("")));
            }
        }
    }
    Ok(())
}

impl CredentialsFile {
    /// Read and parse the file at `path`
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, CredentialsFileError> {
        let path = path.into();
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| CredentialsFileError::io(&path, e))?;
        let parse_error = |message: String| CredentialsFileError::Parse {
            path: path.clone(),
            message,
        };
        check_lines(&raw).map_err(parse_error)?;
        let ini = Ini::load_from_str_opt(&raw, parse_option())
            .map_err(|e| parse_error(e.to_string()))?;
        check_unique(&ini).map_err(parse_error)?;
        Ok(Self { path, ini })
    }

    pub fn has_section(&self, section: &str) -> bool {
        self.ini.section(Some(section)).is_some()
    }

    pub fn sections(&self) -> impl Iterator<Item = &str> {
        self.ini.sections().flatten()
    }

    pub fn get(&self, section: &str, key: &str) -> Result<&str, CredentialsFileError> {
        self.ini
            .section(Some(section))
            .ok_or_else(|| CredentialsFileError::SectionMissing(section.to_string()))?
            .iter()
            .find_map(|(k, v)| k.eq_ignore_ascii_case(key).then_some(v))
            .ok_or_else(|| CredentialsFileError::KeyMissing {
                section: section.to_string(),
                key: key.to_string(),
            })
    }

    /// Set `key` in an existing section; never creates sections
    pub fn set(&mut self, section: &str, key: &str, value: &str) -> Result<(), CredentialsFileError> {
        let properties = self
            .ini
            .section_mut(Some(section))
            .ok_or_else(|| CredentialsFileError::SectionMissing(section.to_string()))?;
        let existing: Vec<String> = properties
            .iter()
            .filter(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(k, _)| k.to_string())
            .collect();
        for k in existing {
            properties.remove_all(&k).for_each(drop);
        }
        properties.insert(key, value);
        Ok(())
    }

    /// Set both key fields of a profile together
    pub fn set_key_pair(
        &mut self,
        section: &str,
        access_key_id: &str,
        secret_access_key: &str,
    ) -> Result<(), CredentialsFileError> {
        if !self.has_section(section) {
            return Err(CredentialsFileError::SectionMissing(section.to_string()));
        }
        self.set(section, ACCESS_KEY_ID, access_key_id)?;
        self.set(section, SECRET_ACCESS_KEY, secret_access_key)
    }

    /// Serialized file contents
    pub fn render(&self) -> Result<Vec<u8>, CredentialsFileError> {
        let mut buf = Vec::new();
        self.ini
            .write_to_opt(&mut buf, write_option())
            .map_err(|e| CredentialsFileError::io(&self.path, e))?;
        Ok(buf)
    }

    /// Atomically overwrite the file this was loaded from
    pub fn persist(&self) -> Result<(), CredentialsFileError> {
        let data = self.render()?;
        atomic_replace(&self.path, &data)
    }
}
