use qbmigrate::settings::{load_settings, save_settings, settings_path};

pub fn show() -> anyhow::Result<()> {
    let settings = load_settings();
    println!("# {}", settings_path().display());
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

pub fn set(key: &str, value: &str) -> anyhow::Result<()> {
    let mut settings = load_settings();
    settings.set(key, value)?;
    save_settings(&settings)?;
    println!("Set {key} = {value}");
    Ok(())
}
