use anyhow::{Result, bail};
use base64::Engine;
use log::debug;
use std::{fs, path::Path};

/// Load init data from a file path, a hex string or a base64 string, in that order.
pub fn read(input: &str) -> Result<Vec<u8>> {
    let path = Path::new(input);

    if path.is_file() {
        debug!("reading init data from {}", path.display());
        return Ok(fs::read(path)?);
    }

    let value = input.split_whitespace().collect::<String>();

    if value.is_empty() {
        bail!("INPUT is empty.");
    }

    if let Ok(data) = hex::decode(&value) {
        debug!("decoded {} bytes of hex input", data.len());
        Ok(data)
    } else if let Ok(data) = base64::engine::general_purpose::STANDARD.decode(&value) {
        debug!("decoded {} bytes of base64 input", data.len());
        Ok(data)
    } else {
        bail!("Unable to determine the INPUT type.");
    }
}
