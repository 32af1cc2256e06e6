// BearPixel
// copyright bear_pixel developers 2025

//! Log module provides the log bootstrap, reference
//! https://docs.rs/log4rs

use log::LevelFilter;
use std::error::Error;

#[cfg(feature = "log4rs")]
use log4rs::{
    append::file::FileAppender,
    config::{Appender, Config, Root},
    encode::pattern::PatternEncoder,
    filter::threshold::ThresholdFilter,
};

/// parse a level name from config, unknown names fall back to Info
pub fn level_from_str(s: &str) -> LevelFilter {
    s.parse().unwrap_or(LevelFilter::Info)
}

/// init logs system, all records go to file_path
#[allow(unused)]
pub fn init_log(level: LevelFilter, file_path: &str) -> Result<(), Box<dyn Error>> {
    #[cfg(feature = "log4rs")]
    {
        let logfile = FileAppender::builder()
            .encoder(Box::new(PatternEncoder::new(
                "{d(%Y-%m-%d %H:%M:%S)} {l} {t} {m}{n}",
            )))
            .build(file_path)?;
        let config = Config::builder()
            .appender(
                Appender::builder()
                    .filter(Box::new(ThresholdFilter::new(level)))
                    .build("logfile", Box::new(logfile)),
            )
            .build(Root::builder().appender("logfile").build(level))?;
        log4rs::init_config(config)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names() {
        assert_eq!(level_from_str("debug"), LevelFilter::Debug);
        assert_eq!(level_from_str("WARN"), LevelFilter::Warn);
        assert_eq!(level_from_str("loud"), LevelFilter::Info);
    }
}
