use super::*;

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn defaults_apply_without_file_or_env() {
    let settings = load_settings_from(None, env_from(&[]));
    assert_eq!(settings, Settings::default());
    assert_eq!(settings.tts_voice_id, DEFAULT_TTS_VOICE_ID);
    assert!(settings.tts_api_key.is_none());
}

#[test]
fn file_values_are_overridden_by_env() {
    let file = r#"
bind_addr = "0.0.0.0:9000"
tts_api_base_url = "http://file.example"
tts_voice_id = "file-voice"
tts_timeout_seconds = "12"
"#;
    let settings = load_settings_from(
        Some(file),
        env_from(&[
            ("TTS_VOICE_ID", "env-voice"),
            ("APP__TTS_VOICE_ID", "app-voice"),
        ]),
    );
    assert_eq!(settings.server_bind, "0.0.0.0:9000");
    assert_eq!(settings.tts_api_base_url, "http://file.example");
    assert_eq!(settings.tts_voice_id, "app-voice");
    assert_eq!(settings.tts_timeout_seconds, 12);
}

#[test]
fn credential_comes_from_voice_eleven_and_blank_is_ignored() {
    let settings = load_settings_from(None, env_from(&[("VOICE_ELEVEN", " secret ")]));
    assert_eq!(settings.tts_api_key.as_deref(), Some("secret"));

    let settings = load_settings_from(None, env_from(&[("VOICE_ELEVEN", "   ")]));
    assert!(settings.tts_api_key.is_none());
}

#[test]
fn malformed_file_and_numbers_fall_back_to_defaults() {
    let settings = load_settings_from(
        Some("this is not toml ="),
        env_from(&[("APP__TTS_TIMEOUT_SECONDS", "soon")]),
    );
    assert_eq!(settings.tts_timeout_seconds, 30);
    assert_eq!(settings.server_bind, "127.0.0.1:8080");
}

#[test]
fn timeout_is_at_least_one_second() {
    let settings = Settings {
        tts_timeout_seconds: 0,
        ..Settings::default()
    };
    assert_eq!(settings.tts_timeout(), Duration::from_secs(1));
}
