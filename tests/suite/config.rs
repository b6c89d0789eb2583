//! Configuration resolution feeding app startup.

use std::fs;
use std::path::PathBuf;

use wallet_engine::{App, DeckSource, StackTimings, WalletConfig, load_deck};

use crate::common::SAMPLE_DECK;

#[test]
fn configured_deck_and_options_build_an_app() {
    let dir = tempfile::tempdir().unwrap();
    let deck_path = dir.path().join("cards.toml");
    fs::write(&deck_path, SAMPLE_DECK).unwrap();

    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        format!(
            "[app]\nreduced_motion = true\nascii_only = true\n\n[deck]\npath = {:?}\nselected_index = 5\n",
            deck_path.display().to_string()
        ),
    )
    .unwrap();

    let config = WalletConfig::load_from(config_path).unwrap();
    let source = WalletConfig::deck_source(config.as_ref(), None);
    let DeckSource::File(path) = source else {
        panic!("expected a deck file, got {source:?}");
    };
    assert_eq!(path, deck_path);

    let app = App::new(
        load_deck(&path).unwrap(),
        WalletConfig::selected_index(config.as_ref()),
        WalletConfig::ui_options(config.as_ref()),
    )
    .unwrap();
    assert_eq!(app.stack().selected_card().unwrap().title, "Air Miles");
    assert!(app.ui_options().ascii_only);
    assert_eq!(app.stack().timings(), StackTimings::INSTANT);
}

#[test]
fn env_override_beats_configured_path() {
    let config: WalletConfig = toml_config("[deck]\npath = \"a.toml\"\n");
    assert_eq!(
        WalletConfig::deck_source(Some(&config), Some("b.toml".to_string())),
        DeckSource::File(PathBuf::from("b.toml"))
    );
}

#[test]
fn missing_config_uses_built_in_deck() {
    let dir = tempfile::tempdir().unwrap();
    let config = WalletConfig::load_from(dir.path().join("config.toml")).unwrap();
    assert!(config.is_none());
    assert_eq!(
        WalletConfig::deck_source(config.as_ref(), None),
        DeckSource::BuiltIn
    );
    assert_eq!(WalletConfig::selected_index(config.as_ref()), 0);
}

fn toml_config(content: &str) -> WalletConfig {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    WalletConfig::load_from(path).unwrap().unwrap()
}
