// Netswitch - Profile Storage
// Copyright (C) 2026 Christos A. Daggas
// SPDX-License-Identifier: MIT

//! Durable profile storage.
//!
//! One TOML file per profile, keyed by profile name. File stems are the name
//! with every byte outside `[a-z0-9_-]` percent-encoded, so any valid name
//! maps to a safe, reversible filename. Uppercase letters are encoded too:
//! `Home` and `home` must not share a file on case-insensitive filesystems.
//! A name whose encoded stem would not fit in one filename is rejected on
//! save and treated as absent on load and delete.
//!
//! Writes go to a temporary file that is then renamed over the target, so an
//! interrupted save never leaves a half-written record. Access is assumed to
//! be single-process and synchronous.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::models::validation::validate_profile_name;
use crate::models::{AdapterConfiguration, AppConfig, Error, Profile, Result, ValidationError};

const PROFILE_EXT: &str = "toml";
const TEMP_SUFFIX: &str = ".tmp";

/// Longest filename most filesystems accept, in bytes.
const MAX_FILE_NAME_LEN: usize = 255;

/// Longest encoded stem that still leaves room for `.toml.tmp`.
const MAX_STEM_LEN: usize = MAX_FILE_NAME_LEN - PROFILE_EXT.len() - 1 - TEMP_SUFFIX.len();

/// File-per-profile store rooted at one directory.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Create a store rooted at `dir`. Nothing is touched on disk until the
    /// first save.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create a store at the configured profile directory.
    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.profiles_dir())
    }

    /// Get the profile directory path.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Write (or overwrite) the profile `name`.
    pub fn save(&self, name: &str, configuration: &AdapterConfiguration) -> Result<Profile> {
        let name = validate_profile_name(name)?;
        let Some(path) = self.path_for(&name) else {
            return Err(ValidationError::InvalidProfileName(format!(
                "{:?} is too long to store as a file name",
                name
            ))
            .into());
        };
        let profile = Profile::new(name, configuration.clone());
        let content = profile.to_toml()?;

        self.ensure_dir().map_err(|e| Error::persistence(profile.name(), e))?;
        write_atomic(&path, content.as_bytes()).map_err(|e| Error::persistence(profile.name(), e))?;

        info!("Saved profile {:?} to {:?}", profile.name(), path);
        Ok(profile)
    }

    /// Load the configuration stored under `name`, or `None` if there is none.
    pub fn load(&self, name: &str) -> Result<Option<AdapterConfiguration>> {
        Ok(self.load_profile(name)?.map(|p| p.configuration))
    }

    /// Load the full profile, including metadata.
    pub fn load_profile(&self, name: &str) -> Result<Option<Profile>> {
        let Ok(name) = validate_profile_name(name) else {
            return Ok(None);
        };
        let Some(path) = self.path_for(&name) else {
            return Ok(None);
        };
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(Error::persistence(name, e)),
        };
        let profile = Profile::from_toml(&content)?;
        debug!("Loaded profile {:?} from {:?}", name, path);
        Ok(Some(profile))
    }

    /// Names of all stored profiles, sorted.
    pub fn list(&self) -> Result<Vec<String>> {
        let entries = match fs::read_dir(&self.dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Error::persistence("*", e)),
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(PROFILE_EXT) {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            match decode_name(stem) {
                Some(name) => names.push(name),
                None => warn!("Skipping unrecognized file in profile directory: {:?}", path),
            }
        }
        names.sort();
        Ok(names)
    }

    /// Remove the profile `name`. Removing a missing profile is not an error.
    pub fn delete(&self, name: &str) -> Result<()> {
        let Ok(name) = validate_profile_name(name) else {
            return Ok(());
        };
        let Some(path) = self.path_for(&name) else {
            return Ok(());
        };
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Deleted profile {:?}", name);
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Error::persistence(name, e)),
        }
    }

    /// `None` when the encoded name cannot be a filename; no such profile
    /// can have been saved.
    fn path_for(&self, name: &str) -> Option<PathBuf> {
        let stem = encode_name(name);
        if stem.len() > MAX_STEM_LEN {
            debug!("Profile name {:?} encodes to {} bytes", name, stem.len());
            return None;
        }
        Some(self.dir.join(format!("{}.{}", stem, PROFILE_EXT)))
    }

    fn ensure_dir(&self) -> io::Result<()> {
        fs::create_dir_all(&self.dir)?;
        // Set restrictive permissions on the profile directory (0700)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let _ = fs::set_permissions(&self.dir, fs::Permissions::from_mode(0o700));
        }
        Ok(())
    }
}

/// Write to `<path>.tmp`, flush to disk, then rename over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(TEMP_SUFFIX);
    let tmp = PathBuf::from(tmp_name);

    let result = (|| {
        let mut file = fs::File::create(&tmp)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(fs::Permissions::from_mode(0o600))?;
        }
        file.write_all(bytes)?;
        file.sync_all()?;
        fs::rename(&tmp, path)
    })();

    if result.is_err() {
        let _ = fs::remove_file(&tmp);
    }
    result
}

fn is_plain(byte: u8) -> bool {
    byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'_' || byte == b'-'
}

fn encode_name(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        if is_plain(byte) {
            out.push(byte as char);
        } else {
            out.push_str(&format!("%{:02X}", byte));
        }
    }
    out
}

fn decode_name(stem: &str) -> Option<String> {
    let bytes = stem.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b'%' => {
                let hex = stem.get(i + 1..i + 3)?;
                out.push(u8::from_str_radix(hex, 16).ok()?);
                i += 3;
            }
            b if is_plain(b) => {
                out.push(b);
                i += 1;
            }
            _ => return None,
        }
    }
    let name = String::from_utf8(out).ok()?;
    (!name.is_empty()).then_some(name)
}
