use super::*;

#[test]
fn defaults_to_dark_without_storage() {
    let ui = UiStore::init(MemoryStore::new());
    assert_eq!(ui.state(), UiState::default());
    assert_eq!(ui.state().theme, Theme::Dark);
    assert_eq!(ui.revision(), 0);
}

#[test]
fn loads_persisted_values() {
    let store = MemoryStore::new()
        .with(THEME_KEY, "light")
        .with(INTRO_SEEN_KEY, "true");
    let ui = UiStore::init(store);
    assert_eq!(ui.state().theme, Theme::Light);
    assert!(ui.state().intro_seen);
}

#[test]
fn unknown_theme_falls_back_to_dark() {
    let ui = UiStore::init(MemoryStore::new().with(THEME_KEY, "sepia"));
    assert_eq!(ui.state().theme, Theme::Dark);
}

#[test]
fn apply_persists_and_counts_changes() {
    let mut ui = UiStore::init(MemoryStore::new());
    let s = ui.apply(UiChange::ToggleTheme).unwrap();
    assert_eq!(s.theme, Theme::Light);
    assert_eq!(ui.store().load(THEME_KEY).as_deref(), Some("light"));
    assert_eq!(ui.revision(), 1);

    ui.apply(UiChange::SetTheme(Theme::Light)).unwrap();
    assert_eq!(ui.revision(), 1);

    ui.apply(UiChange::MarkIntroSeen).unwrap();
    assert_eq!(ui.store().load(INTRO_SEEN_KEY).as_deref(), Some("true"));
    assert_eq!(ui.revision(), 2);
}

#[test]
fn state_survives_a_reload() {
    let mut ui = UiStore::init(MemoryStore::new());
    ui.apply(UiChange::SetTheme(Theme::Light)).unwrap();
    ui.apply(UiChange::MarkIntroSeen).unwrap();
    let reloaded = UiStore::init(ui.store().clone());
    assert_eq!(reloaded.state(), ui.state());
}

#[test]
fn theme_text_form() {
    assert_eq!("light".parse::<Theme>().unwrap(), Theme::Light);
    assert!("".parse::<Theme>().is_err());
    assert_eq!(Theme::Dark.to_string(), "dark");
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
}
