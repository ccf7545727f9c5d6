use chrono::{FixedOffset, NaiveDate, Utc};

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8600`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Directory uploaded PDFs are written to.
    pub upload_dir: String,
    /// Fixed UTC offset used to resolve "today" for date-less generation
    /// requests. The warehouse runs on local time, not UTC.
    pub timezone_offset: FixedOffset,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `8600`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `UPLOAD_DIR`           | `data/uploads`             |
    /// | `TIMEZONE_OFFSET`      | `-04:00`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8600".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "data/uploads".into());

        let raw_offset = std::env::var("TIMEZONE_OFFSET").unwrap_or_else(|_| "-04:00".into());
        let timezone_offset = parse_offset(&raw_offset)
            .unwrap_or_else(|| panic!("TIMEZONE_OFFSET must look like '-04:00', got '{raw_offset}'"));

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            upload_dir,
            timezone_offset,
        }
    }

    /// Today's date in the configured offset.
    pub fn today(&self) -> NaiveDate {
        Utc::now().with_timezone(&self.timezone_offset).date_naive()
    }
}

/// Parse a `±HH:MM` offset string into a [`FixedOffset`].
fn parse_offset(raw: &str) -> Option<FixedOffset> {
    let (sign, rest) = match raw.as_bytes().first()? {
        b'+' => (1, &raw[1..]),
        b'-' => (-1, &raw[1..]),
        _ => (1, raw),
    };
    let (hours, minutes) = rest.split_once(':')?;
    let hours: i32 = hours.parse().ok()?;
    let minutes: i32 = minutes.parse().ok()?;
    if hours > 23 || minutes > 59 {
        return None;
    }
    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
