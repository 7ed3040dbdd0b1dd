//! `ledgerkit login` / `ledgerkit profile` — account API calls.

use std::path::Path;

use ledgerkit::{Configuration, Error, Sdk, load_config};

use super::print_json;

/// Load the configuration into `holder` and build an [`Sdk`] from it.
fn connect(config_path: &Path, holder: &Configuration) -> Result<Sdk, Error> {
    let loaded = load_config(config_path)?;
    let config = holder
        .get_instance(Some(loaded))
        .ok_or_else(|| Error::config("configuration was not initialised"))?;
    Sdk::from_config(config)
}

/// Execute the `login` command.
///
/// # Errors
///
/// Returns configuration errors and the client's error unchanged.
pub async fn login(
    config_path: &Path,
    holder: &Configuration,
    username: &str,
    password: &str,
) -> Result<(), Error> {
    let sdk = connect(config_path, holder)?;
    let response = sdk.auth().login(username, password).await?;
    print_json(&response)
}

/// Execute the `profile` command.
///
/// # Errors
///
/// Returns configuration errors and the client's error unchanged.
pub async fn profile(config_path: &Path, holder: &Configuration, user_id: &str) -> Result<(), Error> {
    let sdk = connect(config_path, holder)?;
    let response = sdk.users().get_profile(user_id).await?;
    print_json(&response)
}
