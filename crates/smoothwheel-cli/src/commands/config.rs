use std::path::Path;

use anyhow::{bail, Result};

use smoothwheel_core::AppConfig;

pub fn show(config: &AppConfig) -> Result<()> {
    print!("{}", config.to_toml()?);
    Ok(())
}

pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!(
            "Config file already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    AppConfig::default().save_to(path)?;
    println!("Wrote default config to {}", path.display());

    Ok(())
}
