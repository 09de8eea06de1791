pub mod domain;
pub mod evaluate;
pub mod outcome;
pub mod recurrence;
pub mod time;

pub mod config {
    /// Runtime settings, all optional. Missing values fall back to built-in
    /// defaults so the batch evaluator can run with no environment at all.
    #[derive(Debug, Clone)]
    pub struct Settings {
        pub sentry_dsn: Option<String>,
        pub urgency_window_days: Option<i64>,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            let urgency_window_days = match std::env::var("URGENCY_WINDOW_DAYS") {
                Ok(s) => Some(
                    s.trim()
                        .parse::<i64>()
                        .map_err(|_| anyhow::anyhow!("URGENCY_WINDOW_DAYS must be an integer (got {s:?})"))?,
                ),
                Err(_) => None,
            };

            Ok(Self {
                sentry_dsn: std::env::var("SENTRY_DSN").ok(),
                urgency_window_days,
            })
        }

        pub fn urgency_window_days(&self) -> i64 {
            self.urgency_window_days
                .unwrap_or(crate::recurrence::URGENCY_WINDOW_DAYS)
        }
    }

}
