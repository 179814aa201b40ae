//! INI file configuration adapter.

use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let mut config = Ini::new();
        config.load(path).map_err(std::io::Error::other)?;
        Ok(Self { config })
    }

    pub fn from_string(content: &str) -> Result<Self, String> {
        let mut config = Ini::new();
        config.read(content.to_string())?;
        Ok(Self { config })
    }
}

impl ConfigPort for FileConfigAdapter {
    fn get_string(&self, section: &str, key: &str) -> Option<String> {
        self.config.get(section, key)
    }

    fn get_int(&self, section: &str, key: &str, default: i64) -> i64 {
        self.config
            .getint(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::config_validation::{configured_pair, validate_session_config};
    use crate::domain::error::PairviewError;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn section_and_key_names_are_case_insensitive() {
        let adapter =
            FileConfigAdapter::from_string("[Tickers]\nTicker1 = intc\nTICKER2 = Yhoo\n").unwrap();
        assert_eq!(adapter.get_string("tickers", "ticker1"), Some("intc".to_string()));
        assert_eq!(
            configured_pair(&adapter),
            ("INTC".to_string(), "YHOO".to_string())
        );
    }

    #[test]
    fn negative_precision_is_read_and_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[data]\ndir = /d\n[display]\nprecision = -3\n")
                .unwrap();
        assert_eq!(adapter.get_int("display", "precision", 6), -3);
        assert!(matches!(
            validate_session_config(&adapter),
            Err(PairviewError::ConfigInvalid { section, key, .. })
                if section == "display" && key == "precision"
        ));
    }

    #[test]
    fn precision_bounds_are_inclusive() {
        for (value, ok) in [("0", true), ("12", true), ("13", false)] {
            let content = format!("[data]\ndir = /d\n[display]\nprecision = {}\n", value);
            let adapter = FileConfigAdapter::from_string(&content).unwrap();
            assert_eq!(validate_session_config(&adapter).is_ok(), ok, "precision {}", value);
        }
    }

    #[test]
    fn non_numeric_precision_is_rejected() {
        let adapter =
            FileConfigAdapter::from_string("[data]\ndir = /d\n[display]\nprecision = six\n")
                .unwrap();
        assert_eq!(adapter.get_int("display", "precision", 6), 6);
        assert!(matches!(
            validate_session_config(&adapter),
            Err(PairviewError::ConfigInvalid { key, .. }) if key == "precision"
        ));
    }

    #[test]
    fn quantquote_data_dir_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[data]\ndir = /home/user/DATA/quantquote_daily_sp500_83986/daily\n\
             [tickers]\nsymbols = AAPL,GOOG,INTC,BRCM,YHOO\n"
        )
        .unwrap();

        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(
            adapter.get_string("data", "dir"),
            Some("/home/user/DATA/quantquote_daily_sp500_83986/daily".to_string())
        );
        assert_eq!(adapter.get_string("logging", "level"), None);
        assert!(validate_session_config(&adapter).is_ok());
    }

    #[test]
    fn missing_ini_file_is_an_io_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/pairview.ini");
        assert!(result.is_err());
    }
}
