use std::{
    env, fs,
    path::{Path, PathBuf},
};

use crate::{errors::Error, notes::crypto::SecretKey, Result};

/// Typed configuration, read from the environment (and an optional `.env`).
#[derive(Clone, Debug)]
pub struct Config {
    pub telegram_bot_token: String,
    pub encryption_key: SecretKey,

    // Notes
    pub notes_file: PathBuf,
    pub notes_list_limit: usize,

    // Telegram limits
    pub telegram_safe_limit: usize,
}

impl Config {
    pub fn load() -> Result<Self> {
        load_dotenv_if_present(Path::new(".env"));
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup (the process environment in `load`).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).and_then(non_empty);

        let telegram_bot_token = get("TELEGRAM_BOT_TOKEN")
            .or_else(|| get("BOT_TOKEN"))
            .ok_or_else(|| {
                Error::Config("TELEGRAM_BOT_TOKEN environment variable is required".to_string())
            })?;

        let key_b64 = get("ENC_KEY_B64").ok_or_else(|| {
            Error::Config("ENC_KEY_B64 environment variable is required".to_string())
        })?;
        let encryption_key = SecretKey::from_base64(&key_b64)?;

        let notes_file = get("NOTES_FILE")
            .or_else(|| get("DB_PATH"))
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("/tmp/calcbot-notes.json"));
        let notes_list_limit = parse_usize(get("NOTES_LIST_LIMIT"))
            .unwrap_or(20)
            .max(1);

        let telegram_safe_limit = parse_usize(get("TELEGRAM_SAFE_LIMIT"))
            .unwrap_or(4000)
            .max(200);

        Ok(Self {
            telegram_bot_token,
            encryption_key,
            notes_file,
            notes_list_limit,
            telegram_safe_limit,
        })
    }
}

fn load_dotenv_if_present(path: &Path) {
    let Ok(contents) = fs::read_to_string(path) else {
        return;
    };

    for raw in contents.lines() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let Some((k, v)) = line.split_once('=') else {
            continue;
        };

        let key = k.trim();
        if key.is_empty() {
            continue;
        }
        if env::var_os(key).is_some() {
            continue; // do not override existing env
        }

        env::set_var(key, strip_quotes(v.trim()));
    }
}

fn strip_quotes(val: &str) -> &str {
    if val.len() >= 2
        && ((val.starts_with('"') && val.ends_with('"'))
            || (val.starts_with('\'') && val.ends_with('\'')))
    {
        return &val[1..val.len() - 1];
    }
    val
}

fn parse_usize(v: Option<String>) -> Option<usize> {
    v.and_then(|s| s.trim().parse::<usize>().ok())
}

fn non_empty(s: String) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    // 32 bytes of 0x01.
    const KEY_B64: &str = "AQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQEBAQE=";

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn loads_defaults() {
        let cfg =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("ENC_KEY_B64", KEY_B64)])).unwrap();
        assert_eq!(cfg.telegram_bot_token, "t");
        assert_eq!(cfg.encryption_key.as_bytes(), &[1u8; 32]);
        assert_eq!(cfg.notes_file, PathBuf::from("/tmp/calcbot-notes.json"));
        assert_eq!(cfg.notes_list_limit, 20);
        assert_eq!(cfg.telegram_safe_limit, 4000);
    }

    #[test]
    fn explicit_values_win() {
        let cfg = Config::from_lookup(lookup(&[
            ("TELEGRAM_BOT_TOKEN", "primary"),
            ("BOT_TOKEN", "alias"),
            ("ENC_KEY_B64", KEY_B64),
            ("DB_PATH", "/tmp/legacy.db"),
            ("NOTES_LIST_LIMIT", " 5 "),
        ]))
        .unwrap();
        assert_eq!(cfg.telegram_bot_token, "primary");
        assert_eq!(cfg.notes_file, PathBuf::from("/tmp/legacy.db"));
        assert_eq!(cfg.notes_list_limit, 5);
    }

    #[test]
    fn missing_token_is_an_error() {
        let err = Config::from_lookup(lookup(&[("ENC_KEY_B64", KEY_B64)])).unwrap_err();
        assert!(err.to_string().contains("TELEGRAM_BOT_TOKEN"));
    }

    #[test]
    fn short_or_garbled_key_is_an_error() {
        let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("ENC_KEY_B64", "AAAA")]))
            .unwrap_err();
        assert!(err.to_string().contains("ENC_KEY_B64"));

        let err = Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("ENC_KEY_B64", "%%%")]))
            .unwrap_err();
        assert!(err.to_string().contains("ENC_KEY_B64"));
    }

    #[test]
    fn debug_output_hides_the_key() {
        let cfg =
            Config::from_lookup(lookup(&[("BOT_TOKEN", "t"), ("ENC_KEY_B64", KEY_B64)])).unwrap();
        let dbg = format!("{cfg:?}");
        assert!(dbg.contains("redacted"));
        assert!(!dbg.contains("[1, 1"));
    }

    #[test]
    fn strips_matching_quotes_only() {
        assert_eq!(strip_quotes("\"abc\""), "abc");
        assert_eq!(strip_quotes("'abc'"), "abc");
        assert_eq!(strip_quotes("\"abc'"), "\"abc'");
    }
}
