//! Precedence between configuration files and environment variables.

use std::fs;

use attachments_config::{ConfigProvider, PostTypes};
use serial_test::serial;
use tempfile::TempDir;

fn project_with_yaml(yaml: &str) -> TempDir {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(".attachments");
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("attachments.yaml"), yaml).unwrap();
    tmp
}

#[test]
fn yaml_instances_keep_declaration_order() {
    let project = project_with_yaml(
        r#"
instances:
  - name: gallery
    post_type: [product, page]
    fields:
      - name: caption
        type: text
        label: Caption
  - name: downloads
    post_type: post
    note: PDF only
"#,
    );

    let config = ConfigProvider::new()
        .without_env()
        .with_project_root(project.path())
        .load()
        .unwrap();

    let names: Vec<_> = config.instances.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["gallery", "downloads"]);

    let gallery = &config.instances[0];
    assert_eq!(
        gallery.post_type,
        Some(PostTypes::Many(vec!["product".into(), "page".into()]))
    );
    let fields = gallery.fields.as_ref().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_type.as_deref(), Some("text"));

    let downloads = &config.instances[1];
    assert_eq!(downloads.post_type, Some(PostTypes::One("post".into())));
    assert_eq!(downloads.note.as_deref(), Some("PDF only"));
    assert!(downloads.fields.is_none());
}

#[test]
fn toml_field_types_keep_declaration_order() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join(".attachments");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("attachments.toml"),
        r#"
[[field_types]]
key = "zeta"
path = "defs/zeta.yaml"

[[field_types]]
key = "alpha"
path = "defs/alpha.yaml"
"#,
    )
    .unwrap();

    let config = ConfigProvider::new()
        .without_env()
        .with_project_root(tmp.path())
        .load()
        .unwrap();

    let keys: Vec<_> = config.field_types.iter().map(|t| t.key.as_str()).collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
    assert_eq!(config.field_types[0].path, tmp.path().join("defs/zeta.yaml"));
}

#[test]
fn explicit_file_overrides_project_file() {
    let project = project_with_yaml("register_default_instance: true\n");
    let explicit = project.path().join("override.json");
    fs::write(&explicit, r#"{ "register_default_instance": false }"#).unwrap();

    let config = ConfigProvider::new()
        .without_env()
        .with_project_root(project.path())
        .with_file(&explicit)
        .load()
        .unwrap();

    assert!(!config.register_default_instance);
}

#[test]
fn invalid_limit_in_file_is_rejected() {
    let project = project_with_yaml("instances:\n  - name: gallery\n    limit: -2\n");

    let result = ConfigProvider::new()
        .without_env()
        .with_project_root(project.path())
        .load();

    assert!(result.is_err());
}

#[test]
#[serial]
fn environment_overrides_files() {
    let project = project_with_yaml("register_default_instance: true\n");

    std::env::set_var("ATTACHMENTS_REGISTER_DEFAULT_INSTANCE", "false");
    let result = ConfigProvider::new()
        .with_project_root(project.path())
        .load();
    std::env::remove_var("ATTACHMENTS_REGISTER_DEFAULT_INSTANCE");

    let config = result.unwrap();
    assert!(!config.register_default_instance);
}

#[test]
#[serial]
fn environment_known_categories() {
    std::env::set_var("ATTACHMENTS_KNOWN_CATEGORIES", "[post, product]");
    let result = ConfigProvider::new().load();
    std::env::remove_var("ATTACHMENTS_KNOWN_CATEGORIES");

    let config = result.unwrap();
    assert_eq!(config.known_categories, vec!["post", "product"]);
}
