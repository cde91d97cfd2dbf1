//! Integration tests for the config store contract.
//!
//! Covers dotted-path resolution, environment precedence, typed access and
//! the immutable merge. Environment variables are injected through lookups
//! except in the single process-environment test.

use layered_config::config::{Config, NoEnv, Section, TypedGetter};
use std::collections::HashMap;
use std::io::Write;
use std::sync::{Arc, Mutex};
use tracing_subscriber::fmt::MakeWriter;

fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn original() -> Config {
    Config::new([
        Section::new("app", [("namespace", "ExampleAppOriginal")]),
        Section::new("db", [("host", "localhost")]),
    ])
    .with_lookup(NoEnv)
}

fn override_config() -> Config {
    Config::new([
        Section::new("app", [("namespace", "Override"), ("extra", "value")]),
        Section::new("cache", [("enabled", "1")]),
    ])
    .with_lookup(NoEnv)
}

#[test]
fn test_missing_path_is_absent() {
    let config = original();
    assert_eq!(config.get("nothing"), None);
    assert_eq!(config.get("app.nothing"), None);
    assert_eq!(config.get("nothing.namespace"), None);
    assert_eq!(config.get_int("app.nothing"), None);
}

#[test]
fn test_environment_precedence() {
    let config = Config::new([Section::new("app", [("namespace", "X")])])
        .with_lookup(vars(&[("app_namespace", "Y")]));
    assert_eq!(config.get("app.namespace").as_deref(), Some("Y"));
    assert_eq!(config.get_string("app.namespace").as_deref(), Some("Y"));
}

#[test]
fn test_process_environment_override() {
    let name = format!("layeredcfgtest{}", std::process::id());
    let key = format!("{name}_namespace");
    // SAFETY: the variable name is unique to this test process and test.
    unsafe { std::env::set_var(&key, "FromEnv") };

    let config = Config::new([Section::new(name.as_str(), [("namespace", "Stored")])]);
    assert_eq!(
        config.get(&format!("{name}.namespace")).as_deref(),
        Some("FromEnv")
    );

    unsafe { std::env::remove_var(&key) };
    assert_eq!(
        config.get(&format!("{name}.namespace")).as_deref(),
        Some("Stored")
    );
}

#[test]
fn test_with_merge_fills_gaps_without_mutation() {
    let original = original();
    let override_config = override_config();
    let before_original = original.clone();
    let before_override = override_config.clone();

    let merged = original.with_merge(&override_config);

    // Operands unchanged
    assert_eq!(original, before_original);
    assert_eq!(override_config, before_override);
    assert_eq!(
        original.get_section("app").unwrap().get("namespace"),
        Some("ExampleAppOriginal")
    );
    assert_eq!(original.get_section("app").unwrap().get("extra"), None);
    assert!(original.get_section("cache").is_none());

    // Merged result
    assert_eq!(merged.get("app.namespace").as_deref(), Some("ExampleAppOriginal"));
    assert_eq!(merged.get("app.extra").as_deref(), Some("value"));
    assert_eq!(merged.get("cache.enabled").as_deref(), Some("1"));
    assert_eq!(merged.get("db.host").as_deref(), Some("localhost"));
    assert_eq!(merged.section_names(), vec!["app", "db", "cache"]);
}

#[test]
fn test_with_merge_blank_value_is_fillable() {
    let base = Config::new([Section::new("app", [("namespace", ""), ("debug", "0")])])
        .with_lookup(NoEnv);
    let other = Config::new([Section::new("app", [("namespace", "Filled"), ("debug", "1")])]);
    let merged = base.with_merge(&other);
    assert_eq!(merged.get("app.namespace").as_deref(), Some("Filled"));
    assert_eq!(merged.get("app.debug").as_deref(), Some("0"));
}

#[test]
fn test_with_merge_is_deterministic() {
    let a = original().with_merge(&override_config());
    let b = original().with_merge(&override_config());
    assert_eq!(a, b);
    assert_eq!(a.section_names(), b.section_names());
}

#[test]
fn test_with_merge_from_many_threads() {
    let base = Arc::new(original());
    let other = Arc::new(override_config());

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let base = Arc::clone(&base);
            let other = Arc::clone(&other);
            std::thread::spawn(move || base.with_merge(&other))
        })
        .collect();

    for handle in handles {
        let merged = handle.join().unwrap();
        assert_eq!(merged.get("app.extra").as_deref(), Some("value"));
    }
    assert!(base.get_section("cache").is_none());
}

#[test]
fn test_typed_getters_on_section() {
    let section = Section::new(
        "example",
        [
            ("number", "123"),
            ("decimal", "123.456"),
            ("birthday", "1988-04-05"),
            ("word", "abc"),
        ],
    );
    assert_eq!(section.get_int("number"), Some(123));
    assert_eq!(section.get_int("decimal"), Some(123));
    assert_eq!(section.get_float("decimal"), Some(123.456));
    assert_eq!(section.get_int("word"), None);
    assert_eq!(
        section
            .get_date_time("birthday")
            .map(|d| d.format("%B %-d %Y").to_string())
            .as_deref(),
        Some("April 5 1988")
    );
    assert_eq!(section.get_int("missing"), None);
    assert_eq!(section.get_float("missing"), None);
    assert_eq!(section.get_date_time("missing"), None);
}

#[test]
fn test_section_mutation_rejected() {
    let section = Section::new("example", [("a", "1")]);
    assert!(section.set("a", "2").unwrap_err().is_immutable_mutation());
    assert!(section.unset("a").unwrap_err().is_immutable_mutation());
    assert_eq!(section.iter().collect::<Vec<_>>(), vec![("a", "1")]);
}

/// Collects formatted tracing output for assertions.
#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for Captured {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
#[allow(deprecated)]
fn test_merge_warns_and_mutates() {
    let mut original = Config::new([Section::new("app", [("namespace", "ExampleAppOriginal")])])
        .with_lookup(NoEnv);
    let other = Config::new([Section::new("app", [("extra", "value")])]);

    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(captured.clone())
        .with_ansi(false)
        .finish();
    tracing::subscriber::with_default(subscriber, || original.merge(&other));

    let warnings = captured
        .contents()
        .lines()
        .filter(|line| line.contains("Config::merge() is deprecated"))
        .count();
    assert_eq!(warnings, 1);
    assert_eq!(original.get("app.extra").as_deref(), Some("value"));
    assert_eq!(original.get("app.namespace").as_deref(), Some("ExampleAppOriginal"));
}
