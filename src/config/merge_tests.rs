//! Tests for the import precedence and fill-gaps merge.

use super::merge::{import_defaults, merged_network, merged_service, merged_volume};
use super::Config;
use crate::catalog;
use crate::runtime::{Network, Volume};
use crate::service::{labels, PortBinding, Service};
use std::collections::HashMap;

fn labels_map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn custom_service() -> Service {
    Service {
        image: "custom/image".to_string(),
        labels: labels_map(&[(labels::NAME, "custom"), (labels::WEIGHT, "99")]),
        port_bindings: Some(
            [("80/tcp".to_string(), vec![PortBinding::port("8888")])]
                .into_iter()
                .collect(),
        ),
        ..Service::default()
    }
}

#[test]
fn test_path1_label_opt_in_replaces_entire_entry() {
    let mut config = Config::default();
    let mut existing = custom_service();
    existing
        .labels
        .insert(labels::DEFAULTS.to_string(), "1".to_string());
    config
        .services
        .insert(catalog::HAPROXY_KEY.to_string(), existing);

    let imported = import_defaults(&mut config, catalog::HAPROXY_KEY, catalog::haproxy());

    assert!(imported);
    let merged = &config.services[catalog::HAPROXY_KEY];
    // Full overwrite: the user's custom fields are discarded.
    assert_eq!(merged.image, "pygmystack/haproxy");
    assert_eq!(merged.name().as_deref(), Some(catalog::HAPROXY_KEY));
    assert!(merged.port_bindings.is_none());
}

#[test]
fn test_path1_accepts_true_as_well_as_1() {
    for value in ["1", "true"] {
        let mut config = Config::default();
        let mut existing = custom_service();
        existing
            .labels
            .insert(labels::DEFAULTS.to_string(), value.to_string());
        config
            .services
            .insert(catalog::HAPROXY_KEY.to_string(), existing);

        assert!(import_defaults(
            &mut config,
            catalog::HAPROXY_KEY,
            catalog::haproxy()
        ));
        assert_eq!(
            config.services[catalog::HAPROXY_KEY].image,
            "pygmystack/haproxy"
        );
    }
}

#[test]
fn test_path2_field_opt_in_fills_gaps_only() {
    let mut config = Config::default();
    let mut existing = custom_service();
    existing.defaults = true;
    config
        .services
        .insert(catalog::HAPROXY_KEY.to_string(), existing);

    let imported = import_defaults(&mut config, catalog::HAPROXY_KEY, catalog::haproxy());

    assert!(imported);
    let merged = &config.services[catalog::HAPROXY_KEY];
    // User values survive; gaps are filled from the catalog.
    assert_eq!(merged.image, "custom/image");
    assert_eq!(merged.name().as_deref(), Some("custom"));
    assert_eq!(merged.weight(), 99);
    assert_eq!(
        merged.restart_policy.as_ref().map(|p| p.name.as_str()),
        Some("always")
    );
}

#[test]
fn test_path3_catalog_label_opt_in_fills_gaps() {
    let mut config = Config::default();
    config
        .services
        .insert("third-party".to_string(), custom_service());

    let mut default = Service {
        image: "vendor/tool".to_string(),
        labels: labels_map(&[
            (labels::NAME, "third-party"),
            (labels::DEFAULTS, "true"),
        ]),
        ..Service::default()
    };
    default.defaults = false;

    let imported = import_defaults(&mut config, "third-party", default);

    assert!(imported);
    let merged = &config.services["third-party"];
    assert_eq!(merged.image, "custom/image");
    assert_eq!(merged.name().as_deref(), Some("custom"));
}

#[test]
fn test_path4_absent_entry_imports_catalog_default() {
    let mut config = Config::default();

    let imported = import_defaults(&mut config, catalog::HAPROXY_KEY, catalog::haproxy());

    assert!(imported);
    assert_eq!(config.services[catalog::HAPROXY_KEY], catalog::haproxy());
}

#[test]
fn test_path5_no_opt_in_anywhere_skips() {
    let mut config = Config::default();
    config
        .services
        .insert(catalog::HAPROXY_KEY.to_string(), custom_service());

    let mut default = catalog::haproxy();
    default.defaults = false;

    let imported = import_defaults(&mut config, catalog::HAPROXY_KEY, default);

    assert!(!imported);
    assert_eq!(config.services[catalog::HAPROXY_KEY], custom_service());
}

#[test]
fn test_path5_absent_entry_and_no_catalog_flag_skips() {
    let mut config = Config::default();

    // The shower never asks to be imported.
    let imported = import_defaults(&mut config, "show-keys", catalog::ssh_key_shower());

    assert!(!imported);
    assert!(config.services.is_empty());
}

#[test]
fn test_import_is_idempotent() {
    let mut config = Config::default();
    import_defaults(&mut config, catalog::HAPROXY_KEY, catalog::haproxy());
    let after_first = config.services[catalog::HAPROXY_KEY].clone();

    let imported_again = import_defaults(&mut config, catalog::HAPROXY_KEY, catalog::haproxy());

    assert!(imported_again);
    assert_eq!(config.services[catalog::HAPROXY_KEY], after_first);
}

#[test]
fn test_import_twice_keeps_user_fields() {
    let mut config = Config::default();
    let mut existing = custom_service();
    existing.defaults = true;
    config
        .services
        .insert(catalog::HAPROXY_KEY.to_string(), existing);

    import_defaults(&mut config, catalog::HAPROXY_KEY, catalog::haproxy());
    let after_first = config.services[catalog::HAPROXY_KEY].clone();
    import_defaults(&mut config, catalog::HAPROXY_KEY, catalog::haproxy());

    assert_eq!(config.services[catalog::HAPROXY_KEY], after_first);
    assert_eq!(after_first.image, "custom/image");
}

#[test]
fn test_fully_populated_entry_is_unchanged_by_fill_gaps() {
    let full = Service {
        image: "user/everything".to_string(),
        labels: labels_map(&[
            (labels::NAME, "everything"),
            (labels::PURPOSE, "cache"),
            (labels::WEIGHT, "42"),
            (labels::OUTPUT, "true"),
        ]),
        port_bindings: Some(
            [("80/tcp".to_string(), vec![PortBinding::port("8080")])]
                .into_iter()
                .collect(),
        ),
        restart_policy: Some(crate::service::RestartPolicy::always()),
        command: vec!["run".to_string()],
        defaults: true,
        image_override: Some("user/override".to_string()),
    };

    let merged = merged_service(&catalog::haproxy(), &full);

    assert_eq!(merged.image, full.image);
    assert_eq!(merged.port_bindings, full.port_bindings);
    assert_eq!(merged.command, full.command);
    assert_eq!(merged.image_override, full.image_override);
    assert_eq!(merged.name(), full.name());
    assert_eq!(merged.weight(), full.weight());
}

#[test]
fn test_merged_service_fills_label_gaps_key_by_key() {
    let existing = Service {
        labels: labels_map(&[(labels::NAME, "mine"), (labels::WEIGHT, "")]),
        ..Service::default()
    };

    let merged = merged_service(&catalog::haproxy(), &existing);

    // Existing non-empty value wins; empty value is a gap.
    assert_eq!(merged.name().as_deref(), Some("mine"));
    assert_eq!(merged.weight(), 14);
}

#[test]
fn test_merged_network_fills_gaps() {
    let existing = Network {
        name: String::new(),
        driver: "overlay".to_string(),
        labels: HashMap::new(),
    };

    let merged = merged_network(&catalog::network(), &existing);

    assert_eq!(merged.name, catalog::NETWORK_KEY);
    assert_eq!(merged.driver, "overlay");
    assert_eq!(merged.labels.get("pygmy").map(String::as_str), Some("pygmy"));
}

#[test]
fn test_merged_volume_prefers_existing_fields() {
    let live = Volume {
        name: "data".to_string(),
        driver: "local".to_string(),
        labels: labels_map(&[("pygmy", "pygmy")]),
    };
    let configured = Volume {
        name: "data".to_string(),
        driver: String::new(),
        labels: HashMap::new(),
    };

    let merged = merged_volume(&live, &configured);

    assert_eq!(merged.driver, "local");
    assert_eq!(merged.labels.get("pygmy").map(String::as_str), Some("pygmy"));
}
