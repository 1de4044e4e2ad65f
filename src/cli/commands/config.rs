//! Config command handlers

use crate::config::Config;

pub fn cmd_check_config(config: &Config) -> anyhow::Result<()> {
    config.validate()?;
    println!("Configuration is valid.");
    println!();
    println!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

pub fn cmd_init() -> anyhow::Result<()> {
    if Config::create_default_if_missing()? {
        println!("Created config.toml with default settings.");
    } else {
        println!("config.toml already exists; left unchanged.");
    }
    Ok(())
}
