use std::str::FromStr;

const PROBE_URL: &str = "PROBE_URL";

const PROBE_INTERVAL_MS: &str = "PROBE_INTERVAL_MS";

const PROBE_TIMEOUT_MS: &str = "PROBE_TIMEOUT_MS";

const PROBE_MAX_ERRORS: &str = "PROBE_MAX_ERRORS";

fn parse_env<T: FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.trim().parse().ok()
}

pub fn get_url() -> Option<String> {
    std::env::var(PROBE_URL).ok().filter(|url| !url.trim().is_empty())
}

pub fn get_interval_ms() -> Option<u64> {
    parse_env(PROBE_INTERVAL_MS)
}

pub fn get_timeout_ms() -> Option<u64> {
    parse_env(PROBE_TIMEOUT_MS)
}

pub fn get_max_errors() -> Option<usize> {
    parse_env(PROBE_MAX_ERRORS)
}
