//! The merged configuration and its query API.
//!
//! Responsibilities:
//! - Hold the merged tree built by [`ConfigLoader::load`] together with its provenance.
//! - Resolve path expressions and convert the addressed values to Rust types.
//! - Rebuild from scratch on `reload`, swapping state only on success.
//!
//! Does NOT handle:
//! - File discovery, parsing, merging, or overrides (see `loader`).
//! - Synchronizing reloads with concurrent readers; callers needing hot reload
//!   wrap the `Config` in their own lock.
//!
//! Invariants:
//! - Queries never mutate the tree.
//! - A missing path is always `PathNotFound`, never a default value.
//! - Conversion failures are `TypeMismatch` errors that name the queried path.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::cast::{self, CastError};
use crate::environment::Environment;
use crate::loader::{ConfigError, ConfigLoader, LoadedTree, SourceFile};
use crate::overrides::OverrideBinding;
use crate::path::ConfigPath;

/// A fully initialized, read-only configuration.
#[derive(Debug, Clone)]
pub struct Config {
    loader: ConfigLoader,
    environment: Environment,
    tree: Value,
    sources: Vec<SourceFile>,
    overrides: Vec<OverrideBinding>,
}

/// Generates a `must_*` twin for each fallible accessor.
macro_rules! must_accessors {
    ($($must:ident => $get:ident -> $ty:ty;)*) => {
        $(
            #[doc = concat!("Like [`Config::", stringify!($get), "`], but panics on error.")]
            #[track_caller]
            pub fn $must(&self, path: &str) -> $ty {
                match self.$get(path) {
                    Ok(value) => value,
                    Err(err) => panic!("{err}"),
                }
            }
        )*
    };
}

impl Config {
    pub(crate) fn from_parts(
        loader: ConfigLoader,
        environment: Environment,
        loaded: LoadedTree,
    ) -> Self {
        Self {
            loader,
            environment,
            tree: loaded.tree,
            sources: loaded.sources,
            overrides: loaded.overrides,
        }
    }

    /// The whole merged tree.
    pub fn tree(&self) -> &Value {
        &self.tree
    }

    /// Files merged into the tree, in merge order.
    pub fn sources(&self) -> &[SourceFile] {
        &self.sources
    }

    /// Override bindings declared by the `env` file, with whether each applied.
    pub fn overrides(&self) -> &[OverrideBinding] {
        &self.overrides
    }

    /// The environment descriptor the ladder was expanded with.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Rebuild from the same loader settings.
    ///
    /// On error the current state is kept and the error returned.
    pub fn reload(&mut self) -> Result<(), ConfigError> {
        let environment = self.loader.environment()?;
        let loaded = self.loader.load_tree(&environment)?;
        *self = Self::from_parts(self.loader.clone(), environment, loaded);
        Ok(())
    }

    /// Raw value at `path`.
    pub fn get(&self, path: &str) -> Result<&Value, ConfigError> {
        ConfigPath::parse(path)?.resolve(&self.tree)
    }

    /// Raw value at an already parsed path.
    pub fn get_path(&self, path: &ConfigPath) -> Result<&Value, ConfigError> {
        path.resolve(&self.tree)
    }

    fn cast<T>(
        &self,
        path: &str,
        convert: impl FnOnce(&Value) -> Result<T, CastError>,
    ) -> Result<T, ConfigError> {
        let value = self.get(path)?;
        convert(value).map_err(|err| ConfigError::TypeMismatch {
            path: path.to_string(),
            expected: err.expected,
            message: err.message,
        })
    }

    pub fn get_string(&self, path: &str) -> Result<String, ConfigError> {
        self.cast(path, cast::to_string)
    }

    pub fn get_bool(&self, path: &str) -> Result<bool, ConfigError> {
        self.cast(path, cast::to_bool)
    }

    pub fn get_int(&self, path: &str) -> Result<isize, ConfigError> {
        self.cast(path, cast::to_isize)
    }

    pub fn get_int32(&self, path: &str) -> Result<i32, ConfigError> {
        self.cast(path, cast::to_i32)
    }

    pub fn get_int64(&self, path: &str) -> Result<i64, ConfigError> {
        self.cast(path, cast::to_i64)
    }

    pub fn get_uint(&self, path: &str) -> Result<usize, ConfigError> {
        self.cast(path, cast::to_usize)
    }

    pub fn get_uint32(&self, path: &str) -> Result<u32, ConfigError> {
        self.cast(path, cast::to_u32)
    }

    pub fn get_uint64(&self, path: &str) -> Result<u64, ConfigError> {
        self.cast(path, cast::to_u64)
    }

    pub fn get_float64(&self, path: &str) -> Result<f64, ConfigError> {
        self.cast(path, cast::to_f64)
    }

    /// Unix epoch seconds or a timestamp string, in UTC.
    pub fn get_time(&self, path: &str) -> Result<DateTime<Utc>, ConfigError> {
        self.cast(path, cast::to_time)
    }

    /// Human-readable duration (`10h`, `1h 30m`) or a number of seconds.
    pub fn get_duration(&self, path: &str) -> Result<Duration, ConfigError> {
        self.cast(path, cast::to_duration)
    }

    pub fn get_int_slice(&self, path: &str) -> Result<Vec<i64>, ConfigError> {
        self.cast(path, cast::to_int_slice)
    }

    /// Sequence of strings; a single string is split on whitespace.
    pub fn get_string_slice(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        self.cast(path, cast::to_string_slice)
    }

    pub fn get_string_map(&self, path: &str) -> Result<Map<String, Value>, ConfigError> {
        self.cast(path, cast::to_string_map)
    }

    /// Deserialize the subtree at `path` into `T`.
    pub fn deserialize<T: DeserializeOwned>(&self, path: &str) -> Result<T, ConfigError> {
        let value = self.get(path)?;
        T::deserialize(value).map_err(|err| ConfigError::TypeMismatch {
            path: path.to_string(),
            expected: std::any::type_name::<T>(),
            message: err.to_string(),
        })
    }

    /// Like [`Config::get`], but panics on error.
    #[track_caller]
    pub fn must_get(&self, path: &str) -> &Value {
        match self.get(path) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    /// Like [`Config::deserialize`], but panics on error.
    #[track_caller]
    pub fn must_deserialize<T: DeserializeOwned>(&self, path: &str) -> T {
        match self.deserialize(path) {
            Ok(value) => value,
            Err(err) => panic!("{err}"),
        }
    }

    must_accessors! {
        must_get_string => get_string -> String;
        must_get_bool => get_bool -> bool;
        must_get_int => get_int -> isize;
        must_get_int32 => get_int32 -> i32;
        must_get_int64 => get_int64 -> i64;
        must_get_uint => get_uint -> usize;
        must_get_uint32 => get_uint32 -> u32;
        must_get_uint64 => get_uint64 -> u64;
        must_get_float64 => get_float64 -> f64;
        must_get_time => get_time -> DateTime<Utc>;
        must_get_duration => get_duration -> Duration;
        must_get_int_slice => get_int_slice -> Vec<i64>;
        must_get_string_slice => get_string_slice -> Vec<String>;
        must_get_string_map => get_string_map -> Map<String, Value>;
    }
}
