use clap::Parser;

use crate::hiscores::official::DEFAULT_HISCORES_URL;

#[derive(Parser, Debug, Clone)]
pub struct RunConfiguration {
    #[arg(long, env, default_value = "api")]
    pub app_component: String,
    #[arg(long, env, default_value_t = 8080)]
    pub port: u16,
    #[arg(long, env, default_value = DEFAULT_HISCORES_URL)]
    pub hiscores_url: String,
    #[arg(long, env)]
    pub scrape_activity: Option<String>,
    #[arg(long, env, default_value_t = 10_000)]
    pub scrape_page_goal: i64,
    #[arg(long, env, default_value = "http://localhost:8080")]
    pub scrape_api_url: String,
    #[arg(long, env, default_value = "data/hiscores")]
    pub scrape_data_dir: String,
    #[arg(long, env, default_value_t = 60)]
    pub scrape_pause_secs: u64,
}

#[cfg(test)]
impl RunConfiguration {
    /// Defaults as if nothing was passed on the command line.
    pub fn for_tests() -> Self {
        RunConfiguration::parse_from(["osrs-hiscores-api"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let config = RunConfiguration::parse_from([
            "osrs-hiscores-api",
            "--app-component",
            "scrape",
            "--port",
            "9000",
            "--scrape-activity",
            "zulrah",
        ]);

        assert_eq!(config.app_component, "scrape");
        assert_eq!(config.port, 9000);
        assert_eq!(config.scrape_activity.as_deref(), Some("zulrah"));
        assert_eq!(config.scrape_page_goal, 10_000);
        assert_eq!(config.hiscores_url, DEFAULT_HISCORES_URL);
    }
}
