//! Environment variable lookup used as the override layer.
//!
//! `Config::get("app.namespace")` consults the variable `app_namespace` before
//! any stored section. The lookup is a capability held by the `Config` so
//! tests can supply their own variables instead of touching the process
//! environment.

use std::collections::HashMap;

/// Source of override variables.
pub trait VariableLookup: Send + Sync {
    /// Return the value of `name`, or `None` when it is not set.
    fn lookup(&self, name: &str) -> Option<String>;
}

/// Reads the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl VariableLookup for ProcessEnv {
    fn lookup(&self, name: &str) -> Option<String> {
        // Names containing '=' or NUL make std::env::var panic on some platforms.
        if name.is_empty() || name.contains(['=', '\0']) {
            return None;
        }
        std::env::var(name).ok()
    }
}

/// Never finds a variable. Useful for reading stored values only.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoEnv;

impl VariableLookup for NoEnv {
    fn lookup(&self, _name: &str) -> Option<String> {
        None
    }
}

impl VariableLookup for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl<F> VariableLookup for F
where
    F: Fn(&str) -> Option<String> + Send + Sync,
{
    fn lookup(&self, name: &str) -> Option<String> {
        self(name)
    }
}

/// Variable name consulted for a dotted path: every `.` becomes `_`.
pub fn env_name_for(path: &str) -> String {
    path.replace('.', "_")
}
