use super::Context;
use crate::error::{PriceError, Result};
use crate::settings::save_settings;

pub fn run(ctx: &Context, init: bool) -> Result<()> {
    if init {
        save_settings(&ctx.settings, &ctx.settings_path)?;
        println!("Wrote {}", ctx.settings_path.display());
    }
    let json = serde_json::to_string_pretty(&ctx.settings)
        .map_err(|e| PriceError::Settings(e.to_string()))?;
    println!("Settings: {}", ctx.settings_path.display());
    println!("{json}");
    Ok(())
}
