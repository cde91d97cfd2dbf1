//! Integration tests for loading tiered configuration from disk.

use layered_config::config::{
    Config, ConfigLoader, ConfigPaths, ConfigTier, DEFAULTS_FILE, NoEnv, PROJECT_FILE, TypedGetter,
};
use layered_config::format::{OutputFormat, render_config};
use std::fs;
use tempfile::TempDir;

/// Helper to create a loader over a temp project and user directory.
fn load(project: &TempDir, user: Option<&TempDir>, profile: Option<&str>) -> ConfigLoader {
    let mut paths = ConfigPaths::with_dirs(
        Some(project.path().to_path_buf()),
        user.map(|u| u.path().to_path_buf()),
    );
    if let Some(profile) = profile {
        paths = paths.with_profile(profile);
    }
    ConfigLoader::load_with_paths(paths).expect("Failed to load config")
}

fn defaults_yaml() -> &'static str {
    r#"
app:
  namespace: DefaultApp
  timeout: 30
  debug: false
database:
  host: localhost
  port: 3306
"#
}

#[test]
fn test_empty_project_loads_nothing() {
    let project = TempDir::new().unwrap();
    let loader = load(&project, None, None);
    assert!(loader.config().is_empty());
    assert!(loader.loaded_files().is_empty());
}

#[test]
fn test_tiers_combine_highest_first() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(project.path().join(DEFAULTS_FILE), defaults_yaml()).unwrap();
    fs::write(
        project.path().join(PROJECT_FILE),
        "app:\n  namespace: MyApp\n  debug: ''\nmail:\n  from: noreply@example.com\n",
    )
    .unwrap();
    fs::write(
        project.path().join("config.dev.yaml"),
        "app:\n  debug: true\ndatabase:\n  host: dev-db\n",
    )
    .unwrap();
    fs::write(user.path().join(PROJECT_FILE), "database:\n  port: 3307\n").unwrap();

    let loader = load(&project, Some(&user), Some("dev"));
    let tiers: Vec<_> = loader.loaded_files().iter().map(|(t, _)| *t).collect();
    assert_eq!(
        tiers,
        vec![
            ConfigTier::User,
            ConfigTier::Profile,
            ConfigTier::Project,
            ConfigTier::Defaults
        ]
    );

    let config = loader.into_config().with_lookup(NoEnv);
    assert_eq!(config.get("app.namespace").as_deref(), Some("MyApp"));
    assert_eq!(config.get_bool("app.debug"), Some(true));
    assert_eq!(config.get_int("app.timeout"), Some(30));
    assert_eq!(config.get("database.host").as_deref(), Some("dev-db"));
    assert_eq!(config.get_int("database.port"), Some(3307));
    assert_eq!(
        config.get("mail.from").as_deref(),
        Some("noreply@example.com")
    );
    assert_eq!(config.section_names(), vec!["app", "database", "mail"]);
}

#[test]
fn test_section_order_follows_defaults_regardless_of_tiers() {
    let project = TempDir::new().unwrap();
    let user = TempDir::new().unwrap();
    fs::write(project.path().join(DEFAULTS_FILE), defaults_yaml()).unwrap();
    let without_user = load(&project, Some(&user), None).into_config();

    fs::write(
        user.path().join(PROJECT_FILE),
        "database:\n  port: 3307\ncache:\n  enabled: 1\n",
    )
    .unwrap();
    let with_user = load(&project, Some(&user), None).into_config();

    assert_eq!(without_user.section_names(), vec!["app", "database"]);
    assert_eq!(with_user.section_names(), vec!["app", "database", "cache"]);
}

#[test]
fn test_numeric_looking_values_survive_load_and_dump() {
    let project = TempDir::new().unwrap();
    fs::write(
        project.path().join(PROJECT_FILE),
        "app:\n  version: 1.10\n  hex: 0x1F\n  exp: 1e3\n  port: 08080\n",
    )
    .unwrap();
    let config = load(&project, None, None).into_config().with_lookup(NoEnv);
    assert_eq!(config.get("app.version").as_deref(), Some("1.10"));
    assert_eq!(config.get("app.hex").as_deref(), Some("0x1F"));
    assert_eq!(config.get("app.exp").as_deref(), Some("1e3"));
    assert_eq!(config.get("app.port").as_deref(), Some("08080"));
    assert_eq!(config.get_int("app.exp"), Some(1000));

    let rendered = render_config(&config, OutputFormat::Yaml).unwrap();
    let out = TempDir::new().unwrap();
    fs::write(out.path().join(PROJECT_FILE), rendered).unwrap();
    let reloaded = load(&out, None, None).into_config().with_lookup(NoEnv);
    assert_eq!(reloaded.get("app.version").as_deref(), Some("1.10"));
    assert_eq!(reloaded, config);
}

#[test]
fn test_missing_profile_file_is_skipped() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(PROJECT_FILE), defaults_yaml()).unwrap();
    let loader = load(&project, None, Some("staging"));
    assert_eq!(loader.loaded_files().len(), 1);
    assert_eq!(loader.loaded_files()[0].0, ConfigTier::Project);
}

#[test]
fn test_env_overrides_loaded_values() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(PROJECT_FILE), defaults_yaml()).unwrap();
    let config = load(&project, None, None)
        .into_config()
        .with_lookup(|name: &str| (name == "database_host").then(|| "db.example".to_string()));
    assert_eq!(config.get("database.host").as_deref(), Some("db.example"));
    assert_eq!(config.get("app.namespace").as_deref(), Some("DefaultApp"));
}

#[test]
fn test_dump_round_trips_through_loader() {
    let project = TempDir::new().unwrap();
    fs::write(project.path().join(PROJECT_FILE), defaults_yaml()).unwrap();
    let config = load(&project, None, None).into_config();

    let rendered = render_config(&config, OutputFormat::Yaml).unwrap();
    let out = TempDir::new().unwrap();
    fs::write(out.path().join(PROJECT_FILE), rendered).unwrap();
    let reloaded: Config = load(&out, None, None).into_config();

    assert_eq!(reloaded, config);
}
