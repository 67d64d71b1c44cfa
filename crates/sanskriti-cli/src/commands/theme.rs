use sanskriti_application::PreferenceStore;
use sanskriti_core::theme::{DisplayPreference, ThemeMode};

fn describe(preference: &DisplayPreference) -> String {
    let rendered = if preference.is_dark() { "dark" } else { "light" };
    match preference.mode() {
        ThemeMode::System => format!("system (rendering {})", rendered),
        mode => mode.to_string(),
    }
}

pub fn show(preferences: &PreferenceStore) {
    println!("Theme: {}", describe(&preferences.preference()));
}

pub async fn set(preferences: &PreferenceStore, mode: ThemeMode) {
    let preference = preferences.set_theme(mode).await;
    report(mode, &preference);
}

pub async fn toggle(preferences: &PreferenceStore) {
    let target = ThemeMode::opposite_of(preferences.is_dark());
    let preference = preferences.toggle_theme().await;
    report(target, &preference);
}

fn report(requested: ThemeMode, preference: &DisplayPreference) {
    if preference.mode() == requested {
        println!("Theme set to {}", describe(preference));
    } else {
        println!(
            "Could not save theme, still {}. See log for details",
            describe(preference)
        );
    }
}
