pub mod domain;
pub mod ingest;
pub mod pipeline;
pub mod planning;
pub mod portfolio;
pub mod scoring;
pub mod screen;
pub mod storage;
pub mod time;

pub mod config {
    use anyhow::Context;
    use std::path::PathBuf;

    const DEFAULT_STARTING_CAPITAL: f64 = 100_000.0;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub data_provider_base_url: Option<String>,
        pub data_provider_api_key: Option<String>,
        pub sentry_dsn: Option<String>,
        pub data_dir: PathBuf,
        pub reports_dir: PathBuf,
        pub starting_capital: f64,
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_lookup(|key| std::env::var(key).ok())
        }

        /// Builds settings from any key lookup; `from_env` passes the process environment.
        pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let starting_capital = match lookup("STARTING_CAPITAL") {
                Some(s) => s
                    .trim()
                    .parse::<f64>()
                    .with_context(|| format!("STARTING_CAPITAL is not a number: {s}"))?,
                None => DEFAULT_STARTING_CAPITAL,
            };
            anyhow::ensure!(
                starting_capital.is_finite() && starting_capital >= 0.0,
                "STARTING_CAPITAL must be a non-negative amount (got {starting_capital})"
            );

            Ok(Self {
                data_provider_base_url: lookup("DATA_PROVIDER_BASE_URL"),
                data_provider_api_key: lookup("DATA_PROVIDER_API_KEY"),
                sentry_dsn: lookup("SENTRY_DSN"),
                data_dir: path_or(lookup("INVESTOR_DATA_DIR"), "data"),
                reports_dir: path_or(lookup("INVESTOR_REPORTS_DIR"), "reports"),
                starting_capital,
            })
        }

        pub fn require_data_provider_base_url(&self) -> anyhow::Result<&str> {
            self.data_provider_base_url
                .as_deref()
                .context("DATA_PROVIDER_BASE_URL is required")
        }

        pub fn profile_path(&self) -> PathBuf {
            self.data_dir.join("user_profile.json")
        }

        pub fn holdings_path(&self) -> PathBuf {
            self.data_dir.join("holdings.csv")
        }

        pub fn universe_path(&self) -> PathBuf {
            self.data_dir.join("nifty500.csv")
        }
    }

    fn path_or(value: Option<String>, default: &str) -> PathBuf {
        value
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(default))
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use std::collections::HashMap;

        fn settings(vars: &[(&str, &str)]) -> anyhow::Result<Settings> {
            let vars: HashMap<String, String> = vars
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect();
            Settings::from_lookup(|key| vars.get(key).cloned())
        }

        #[test]
        fn defaults_apply_when_unset() {
            let s = settings(&[]).unwrap();
            assert_eq!(s.starting_capital, DEFAULT_STARTING_CAPITAL);
            assert_eq!(s.profile_path(), PathBuf::from("data/user_profile.json"));
            assert_eq!(s.reports_dir, PathBuf::from("reports"));
            assert!(s.require_data_provider_base_url().is_err());
        }

        #[test]
        fn reads_capital_and_dirs() {
            let s = settings(&[
                ("STARTING_CAPITAL", " 250000 "),
                ("INVESTOR_DATA_DIR", "/srv/investor"),
                ("INVESTOR_REPORTS_DIR", "  "),
            ])
            .unwrap();
            assert_eq!(s.starting_capital, 250_000.0);
            assert_eq!(s.universe_path(), PathBuf::from("/srv/investor/nifty500.csv"));
            assert_eq!(s.reports_dir, PathBuf::from("reports"));
        }

        #[test]
        fn rejects_bad_starting_capital() {
            let err = settings(&[("STARTING_CAPITAL", "1 lakh")]).unwrap_err();
            assert!(err.to_string().contains("STARTING_CAPITAL is not a number"));

            assert!(settings(&[("STARTING_CAPITAL", "-5")]).is_err());
            assert!(settings(&[("STARTING_CAPITAL", "NaN")]).is_err());
        }
    }
}
