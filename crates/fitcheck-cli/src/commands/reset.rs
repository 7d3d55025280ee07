//! The `fitcheck reset` command.

use std::path::PathBuf;

use anyhow::Result;

use fitcheck_core::config::load_config_from;
use fitcheck_core::store::ResponseStore;

pub fn execute(store_dir: Option<PathBuf>, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let store = ResponseStore::new(store_dir.unwrap_or(config.store_dir));

    if store.clear()? {
        println!("Discarded stored responses: {}", store.path().display());
    } else {
        println!("No stored responses to discard.");
    }
    Ok(())
}
