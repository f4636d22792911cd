use std::sync::Arc;
use std::thread;

use audience_permissions::{conf, AudiencePermissions, Config, Entry, Permission};

///////////////////////////////////////////////////////////////////////////////

const EXPECTED: &[(&str, &str)] = &[
    ("https://momsrecipebox-api", "*"),
    ("https://momsrecipebox-admin-api", "admin"),
    ("https://cruise-admin-api", "admin"),
    ("https://cruise-viewer-api", "*"),
];

#[test]
fn builtin_table_matches_deployed_literal() {
    let config = Config::builtin();

    assert_eq!(config.domain().to_string(), "dev-jdsnf3lqod8nxlnv.us.auth0.com");
    assert_eq!(config.audiences().len(), EXPECTED.len());

    for (audience, permission) in EXPECTED {
        let actual = config
            .permission(audience)
            .unwrap_or_else(|| panic!("Missing audience {}", audience));
        assert_eq!(actual.to_string(), *permission);
    }
}

#[test]
fn builtin_table_survives_toml_round_trip() {
    let builtin = Config::builtin();

    let mut toml = format!("domain = \"{}\"\n", builtin.domain());
    for (audience, permission) in builtin.audiences().iter() {
        toml.push_str(&format!(
            "\n[[audiences]]\naudience = \"{}\"\npermission = \"{}\"\n",
            audience, permission
        ));
    }

    let parsed = conf::parse(&toml).expect("Failed to parse config");
    assert_eq!(parsed.domain(), builtin.domain());
    assert_eq!(parsed.audiences(), builtin.audiences());
}

#[test]
fn unknown_audience_is_left_to_the_caller() {
    let config = Config::builtin();

    assert_eq!(config.permission("https://momsrecipebox-api/"), None);
    assert_eq!(config.permission("https://MOMSRECIPEBOX-API"), None);
    assert_eq!(config.permission(""), None);
}

#[test]
fn shared_between_threads() {
    let config = Arc::new(Config::builtin());

    let handles = (0..4)
        .map(|_| {
            let config = config.clone();
            thread::spawn(move || config.permission("https://cruise-admin-api"))
        })
        .collect::<Vec<_>>();

    for handle in handles {
        let permission = handle.join().expect("Lookup thread panicked");
        assert_eq!(permission, Some(Permission::Admin));
    }
}

#[test]
fn custom_table() {
    let entries = vec![
        Entry::new("https://reports-api", Permission::Any),
        Entry::new("https://reports-admin-api", Permission::Admin),
    ];
    assert_eq!(entries[1].audience(), "https://reports-admin-api");
    assert_eq!(entries[1].permission(), Permission::Admin);

    let table = AudiencePermissions::from_entries(entries.clone()).expect("Failed to build table");
    for entry in &entries {
        assert_eq!(table.get(entry.audience()), Some(entry.permission()));
    }

    let config = Config::new("tenant.example.com".parse().unwrap(), table);
    assert_eq!(
        config.audiences().audiences(),
        vec!["https://reports-admin-api", "https://reports-api"]
    );
    assert!(config.permission("https://reports-admin-api").unwrap().is_admin());
}

#[test]
fn demo_config_matches_builtin() {
    // Overrides are covered in `env_override.rs`.
    std::env::remove_var("APP_DOMAIN");

    let config = conf::load("demos/App.toml").expect("Failed to load demo config");
    let builtin = Config::builtin();

    assert_eq!(config.domain(), builtin.domain());
    assert_eq!(config.audiences(), builtin.audiences());
}
