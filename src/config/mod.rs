use serde::Deserialize;
use std::env;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    pub scoring: ScoringConfig,
    pub jobs: JobsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    pub service_name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoringConfig {
    /// Trailing window for activity counters, in days.
    pub recent_window_days: u32,
    /// Upper bound on recent follower/content queries. Counts beyond this
    /// are deliberately undercounted to bound query cost.
    pub recent_query_limit: usize,
    /// Upper bound on the follower sample used for the social effect.
    pub follower_query_limit: usize,
    /// Independent timeout applied to each counter-source call.
    pub call_timeout_ms: u64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            recent_window_days: 7,
            recent_query_limit: 100,
            follower_query_limit: 100,
            call_timeout_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct JobsConfig {
    /// Bounded worker pool size for per-tag scoring.
    pub workers: usize,
    /// Timeout applied to each score-store call.
    pub store_timeout_ms: u64,
    pub hourly_interval_secs: u64,
    pub daily_interval_secs: u64,
    pub weekly_interval_secs: u64,
}

impl Default for JobsConfig {
    fn default() -> Self {
        Self {
            workers: 8,
            store_timeout_ms: 2000,
            hourly_interval_secs: 3600,
            daily_interval_secs: 86400,
            weekly_interval_secs: 604800,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, crate::error::AppError> {
        dotenv::dotenv().ok();

        Ok(Config {
            service: ServiceConfig {
                service_name: env::var("SERVICE_NAME")
                    .unwrap_or_else(|_| "tag-hotness-service".to_string()),
            },
            scoring: ScoringConfig {
                recent_window_days: env::var("RECENT_WINDOW_DAYS")
                    .unwrap_or_else(|_| "7".to_string())
                    .parse()
                    .expect("RECENT_WINDOW_DAYS must be a valid u32"),
                recent_query_limit: env::var("RECENT_QUERY_LIMIT")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .expect("RECENT_QUERY_LIMIT must be a valid usize"),
                follower_query_limit: env::var("FOLLOWER_QUERY_LIMIT")
                    .unwrap_or_else(|_| "100".to_string())
                    .parse()
                    .expect("FOLLOWER_QUERY_LIMIT must be a valid usize"),
                call_timeout_ms: env::var("CALL_TIMEOUT_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .expect("CALL_TIMEOUT_MS must be a valid u64"),
            },
            jobs: JobsConfig {
                workers: env::var("RECOMPUTE_WORKERS")
                    .unwrap_or_else(|_| "8".to_string())
                    .parse()
                    .expect("RECOMPUTE_WORKERS must be a valid usize"),
                store_timeout_ms: env::var("STORE_TIMEOUT_MS")
                    .unwrap_or_else(|_| "2000".to_string())
                    .parse()
                    .expect("STORE_TIMEOUT_MS must be a valid u64"),
                hourly_interval_secs: env::var("HOURLY_INTERVAL_SECS")
                    .unwrap_or_else(|_| "3600".to_string())
                    .parse()
                    .expect("HOURLY_INTERVAL_SECS must be a valid u64"),
                daily_interval_secs: env::var("DAILY_INTERVAL_SECS")
                    .unwrap_or_else(|_| "86400".to_string())
                    .parse()
                    .expect("DAILY_INTERVAL_SECS must be a valid u64"),
                weekly_interval_secs: env::var("WEEKLY_INTERVAL_SECS")
                    .unwrap_or_else(|_| "604800".to_string())
                    .parse()
                    .expect("WEEKLY_INTERVAL_SECS must be a valid u64"),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.recent_window_days, 7);
        assert_eq!(scoring.recent_query_limit, 100);

        let jobs = JobsConfig::default();
        assert_eq!(jobs.workers, 8);
        assert_eq!(jobs.hourly_interval_secs, 3600);
    }
}
