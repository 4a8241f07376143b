//! # Environment Registry
//!
//! Maps versioned ids such as `MedicineSortEnv-v1` to a factory and the
//! registration metadata (the episode step cap). Environments are created by
//! id through [`Registry::make`].

use std::collections::BTreeMap;
use std::fmt;

use tracing::debug;

use crate::config::EnvConfig;
use crate::env::Env;
use crate::error::EnvError;

/// Factory producing a boxed environment from its configuration.
pub type EnvFactory = Box<dyn Fn(EnvConfig) -> Result<Box<dyn Env>, EnvError>>;

/// Registration metadata of an environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvSpec {
    pub id: String,
    pub name: String,
    pub version: u32,
    pub max_episode_steps: u32,
}

impl EnvSpec {
    /// # Errors
    ///
    /// Returns [`EnvError::MalformedId`] unless `id` has the form `Name-vN`.
    pub fn new(id: &str, max_episode_steps: u32) -> Result<Self, EnvError> {
        let (name, version) = parse_env_id(id)?;
        Ok(Self {
            id: id.to_owned(),
            name,
            version,
            max_episode_steps,
        })
    }
}

impl fmt::Display for EnvSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (max_episode_steps={})", self.id, self.max_episode_steps)
    }
}

/// Split `Name-vN` into its name and version number.
///
/// # Errors
///
/// Returns [`EnvError::MalformedId`] for any other shape.
pub fn parse_env_id(id: &str) -> Result<(String, u32), EnvError> {
    let malformed = || EnvError::MalformedId(id.to_owned());
    let (name, version) = id.rsplit_once("-v").ok_or_else(malformed)?;
    if name.is_empty() {
        return Err(malformed());
    }
    let version = version.parse().map_err(|_| malformed())?;
    Ok((name.to_owned(), version))
}

struct Entry {
    spec: EnvSpec,
    factory: EnvFactory,
}

/// Collection of registered environments.
#[derive(Default)]
pub struct Registry {
    entries: BTreeMap<String, Entry>,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns [`EnvError::DuplicateEnv`] if `spec.id` is already registered.
    pub fn register<F>(&mut self, spec: EnvSpec, factory: F) -> Result<(), EnvError>
    where
        F: Fn(EnvConfig) -> Result<Box<dyn Env>, EnvError> + 'static,
    {
        if self.entries.contains_key(&spec.id) {
            return Err(EnvError::DuplicateEnv(spec.id));
        }
        debug!("Registering environment {spec}");
        self.entries.insert(
            spec.id.clone(),
            Entry {
                spec,
                factory: Box::new(factory),
            },
        );
        Ok(())
    }

    #[must_use]
    pub fn spec(&self, id: &str) -> Option<&EnvSpec> {
        self.entries.get(id).map(|e| &e.spec)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Create a registered environment. The registered step cap applies
    /// unless `config` overrides it.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::UnknownEnv`] for an unregistered id, or whatever
    /// the factory reports.
    pub fn make(&self, id: &str, mut config: EnvConfig) -> Result<Box<dyn Env>, EnvError> {
        let entry = self
            .entries
            .get(id)
            .ok_or_else(|| EnvError::UnknownEnv(id.to_owned()))?;
        config.max_episode_steps.get_or_insert(entry.spec.max_episode_steps);
        (entry.factory)(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_name_and_version() {
        assert_eq!(parse_env_id("MedicineSortEnv-v1").unwrap(), ("MedicineSortEnv".to_owned(), 1));
        assert_eq!(parse_env_id("Pick-Cube-v12").unwrap(), ("Pick-Cube".to_owned(), 12));
    }

    #[test]
    fn rejects_malformed_ids() {
        for id in ["MedicineSortEnv", "-v1", "MedicineSortEnv-vX"] {
            assert!(matches!(parse_env_id(id), Err(EnvError::MalformedId(_))), "{id}");
        }
    }

    #[test]
    fn unknown_id_is_an_error() {
        let registry = Registry::new();
        assert!(matches!(
            registry.make("Nope-v0", EnvConfig::default()),
            Err(EnvError::UnknownEnv(_))
        ));
    }
}
