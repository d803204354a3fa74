//! INI file configuration adapter.

use crate::domain::error::BarsimError;
use crate::ports::config_port::ConfigPort;
use configparser::ini::Ini;
use std::path::Path;

pub struct FileConfigAdapter {
    config: Ini,
}

impl FileConfigAdapter {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, BarsimError> {
        let path = path.as_ref();
        let mut config = Ini::new();
        config.load(path).map_err(|reason| BarsimError::ConfigParse {
            file: path.display().to_string(),
            reason,
        })?;
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

    fn get_double(&self, section: &str, key: &str, default: f64) -> f64 {
        self.config
            .getfloat(section, key)
            .ok()
            .flatten()
            .unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const RUN_INI: &str = r#"
[data]
path = ./data/eth_usdt_med.csv
base_volume_column = Volume ETH

[agent]
buy_len = 3
sell_len = 2
amount = 0.01

[simulation]
max_iterations = 50000
"#;

    #[test]
    fn from_string_parses_sections() {
        let adapter = FileConfigAdapter::from_string(RUN_INI).unwrap();
        assert_eq!(
            adapter.get_string("data", "path"),
            Some("./data/eth_usdt_med.csv".to_string())
        );
        assert_eq!(adapter.get_int("agent", "buy_len", 0), 3);
        assert_eq!(adapter.get_int("agent", "sell_len", 0), 2);
        assert_eq!(adapter.get_double("agent", "amount", 0.0), 0.01);
        assert_eq!(adapter.get_int("simulation", "max_iterations", 0), 50000);
    }

    #[test]
    fn values_keep_case_and_spaces() {
        let adapter = FileConfigAdapter::from_string(RUN_INI).unwrap();
        assert_eq!(
            adapter.get_string("data", "base_volume_column"),
            Some("Volume ETH".to_string())
        );
    }

    #[test]
    fn get_string_returns_none_for_missing_key() {
        let adapter = FileConfigAdapter::from_string("[agent]\nbuy_len = 3\n").unwrap();
        assert_eq!(adapter.get_string("agent", "missing"), None);
        assert_eq!(adapter.get_string("missing_section", "key"), None);
    }

    #[test]
    fn get_int_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[agent]\nbuy_len = abc\n").unwrap();
        assert_eq!(adapter.get_int("agent", "buy_len", 42), 42);
        assert_eq!(adapter.get_int("agent", "sell_len", 7), 7);
    }

    #[test]
    fn get_double_returns_default_for_missing_or_non_numeric() {
        let adapter = FileConfigAdapter::from_string("[agent]\namount = lots\n").unwrap();
        assert_eq!(adapter.get_double("agent", "amount", 99.9), 99.9);
        assert_eq!(adapter.get_double("simulation", "amount", 0.5), 0.5);
    }

    #[test]
    fn from_file_reads_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[agent]\nbuy_len = 5\n").unwrap();
        let adapter = FileConfigAdapter::from_file(file.path()).unwrap();
        assert_eq!(adapter.get_int("agent", "buy_len", 0), 5);
    }

    #[test]
    fn from_file_missing_file_is_config_parse_error() {
        let result = FileConfigAdapter::from_file("/nonexistent/path/barsim.ini");
        match result {
            Err(BarsimError::ConfigParse { file, .. }) => {
                assert_eq!(file, "/nonexistent/path/barsim.ini");
            }
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("expected an error"),
        }
    }
}
