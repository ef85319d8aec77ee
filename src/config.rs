use std::env;

/// Default edit window: 24 hours.
pub const DEFAULT_EDIT_WINDOW_SECS: i64 = 86_400;

/// Upper bound for the edit window: 30 days.
pub const MAX_EDIT_WINDOW_SECS: i64 = 30 * 86_400;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub frontend_url: String,
    pub cors_extra_origins: Vec<String>,

    /// How long after creation a mood log may still be edited
    pub mood_edit_window_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "20".into())
                .parse()
                .unwrap_or(20),
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".into())
                .parse()
                .expect("PORT must be a number"),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:3000".into()),
            cors_extra_origins: env::var("CORS_EXTRA_ORIGINS")
                .map(|extra| parse_origin_list(&extra))
                .unwrap_or_default(),

            mood_edit_window_secs: parse_edit_window_secs(
                env::var("MOOD_EDIT_WINDOW_SECS").ok().as_deref(),
            )
            .expect("MOOD_EDIT_WINDOW_SECS must be between 1 and 2592000"),
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn mood_edit_window(&self) -> chrono::Duration {
        chrono::Duration::seconds(self.mood_edit_window_secs.clamp(0, MAX_EDIT_WINDOW_SECS))
    }
}

/// Unset means the default; anything else must parse into `1..=MAX_EDIT_WINDOW_SECS`.
fn parse_edit_window_secs(raw: Option<&str>) -> Result<i64, String> {
    let Some(raw) = raw else {
        return Ok(DEFAULT_EDIT_WINDOW_SECS);
    };
    let secs: i64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("not a number: {:?}", raw))?;
    if !(1..=MAX_EDIT_WINDOW_SECS).contains(&secs) {
        return Err(format!("out of range: {}", secs));
    }
    Ok(secs)
}

fn parse_origin_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Self {
        Self {
            database_url: "postgres://localhost/moodzone_test".into(),
            db_max_connections: 1,
            host: "127.0.0.1".into(),
            port: 0,
            frontend_url: "http://localhost:3000".into(),
            cors_extra_origins: vec![],
            mood_edit_window_secs: DEFAULT_EDIT_WINDOW_SECS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origin_list() {
        assert_eq!(
            parse_origin_list(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origin_list("").is_empty());
    }

    #[test]
    fn test_listen_addr_and_window() {
        let config = Config::for_tests();
        assert_eq!(config.listen_addr(), "127.0.0.1:0");
        assert_eq!(config.mood_edit_window(), chrono::Duration::hours(24));
    }

    #[test]
    fn test_edit_window_defaults_when_unset() {
        assert_eq!(parse_edit_window_secs(None), Ok(DEFAULT_EDIT_WINDOW_SECS));
        assert_eq!(parse_edit_window_secs(Some(" 3600 ")), Ok(3600));
        assert_eq!(
            parse_edit_window_secs(Some("2592000")),
            Ok(MAX_EDIT_WINDOW_SECS)
        );
    }

    #[test]
    fn test_edit_window_rejects_out_of_range() {
        for raw in ["0", "-5", "2592001", "9223372036854775807", "abc", ""] {
            assert!(
                parse_edit_window_secs(Some(raw)).is_err(),
                "{:?} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn test_mood_edit_window_never_panics() {
        let mut config = Config::for_tests();
        config.mood_edit_window_secs = i64::MAX;
        assert_eq!(
            config.mood_edit_window(),
            chrono::Duration::seconds(MAX_EDIT_WINDOW_SECS)
        );
        config.mood_edit_window_secs = -5;
        assert_eq!(config.mood_edit_window(), chrono::Duration::zero());
    }
}
