/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

use serde_json::Value;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::fs;
use std::path::PathBuf;
use tracing::{debug, warn};
use upstream_monitor::SettingsStore;

/// Failure to obtain a value from the settings file.
pub enum SettingsFileError {
    Read(PathBuf, std::io::Error),
    Parse(PathBuf, serde_json::Error),
    NotAnObject(PathBuf),
    NotABoolean(String, Value),
}

impl Debug for SettingsFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsFileError::Read(path, err) => write!(f, "Read({path:?}, {err:?})"),
            SettingsFileError::Parse(path, err) => write!(f, "Parse({path:?}, {err:?})"),
            SettingsFileError::NotAnObject(path) => write!(f, "NotAnObject({path:?})"),
            SettingsFileError::NotABoolean(key, value) => {
                write!(f, "NotABoolean({key:?}, {value:?})")
            }
        }
    }
}

impl Display for SettingsFileError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SettingsFileError::Read(path, err) => {
                write!(f, "Unable to read settings file {}: {err}", path.display())
            }
            SettingsFileError::Parse(path, err) => {
                write!(f, "Unable to parse settings file {}: {err}", path.display())
            }
            SettingsFileError::NotAnObject(path) => {
                write!(f, "Settings file {} is not a JSON object", path.display())
            }
            SettingsFileError::NotABoolean(key, value) => {
                write!(f, "Setting '{key}' is not a boolean: {value}")
            }
        }
    }
}

impl Error for SettingsFileError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SettingsFileError::Read(_, err) => Some(err),
            SettingsFileError::Parse(_, err) => Some(err),
            _ => None,
        }
    }
}

/// [`SettingsStore`] backed by a flat JSON object.
///
/// The file is read on every query, so edits are picked up without a restart.
/// Values may be JSON booleans or integers, where only `1` counts as enabled.
/// A missing file or key yields the caller's default.
pub struct SettingsStaticFile {
    static_file: PathBuf,
}

impl SettingsStaticFile {
    pub fn new(static_file: impl Into<PathBuf>) -> Self {
        SettingsStaticFile {
            static_file: static_file.into(),
        }
    }

    /// Looks `key` up. `Ok(None)` when the file or the key does not exist.
    pub fn read_bool(&self, key: &str) -> Result<Option<bool>, SettingsFileError> {
        debug!("reading setting '{key}' from {:?}", self.static_file);

        let data = match fs::read_to_string(&self.static_file) {
            Ok(data) => data,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!("settings file {:?} not found", self.static_file);
                return Ok(None);
            }
            Err(err) => return Err(SettingsFileError::Read(self.static_file.clone(), err)),
        };

        let res: Value = serde_json::from_str(&data)
            .map_err(|err| SettingsFileError::Parse(self.static_file.clone(), err))?;
        let obj = res
            .as_object()
            .ok_or_else(|| SettingsFileError::NotAnObject(self.static_file.clone()))?;

        match obj.get(key) {
            None => Ok(None),
            Some(Value::Bool(value)) => Ok(Some(*value)),
            Some(Value::Number(number)) if number.as_i64().is_some() => {
                Ok(Some(number.as_i64() == Some(1)))
            }
            Some(other) => Err(SettingsFileError::NotABoolean(
                key.to_string(),
                other.clone(),
            )),
        }
    }
}

impl SettingsStore for SettingsStaticFile {
    fn get_bool(&self, key: &str, default: bool) -> bool {
        match self.read_bool(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                warn!("{err}; using default {default} for '{key}'");
                default
            }
        }
    }
}
