use crate::config::PanelConfig;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliFlags {
    pub help: bool,
    pub version: bool,
    pub urandom: bool,
    pub no_special: bool,
    pub length: Option<usize>,
    pub number: Option<usize>,
    pub special: Option<String>,
    pub log_level: Option<String>,
}

impl CliFlags {
    /// Apply the flags on top of the defaults.
    pub fn config(&self) -> PanelConfig {
        let mut config = PanelConfig::default();
        if let Some(len) = self.length {
            config.length = len;
            config.max_length = config.max_length.max(len);
        }
        if let Some(num) = self.number {
            config.number_of_passwords = num.max(1);
        }
        if let Some(ref chars) = self.special {
            config.set_special(chars);
        }
        if self.no_special {
            config.disable("special");
        }
        config
    }
}
