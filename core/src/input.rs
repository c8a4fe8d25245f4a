//! Loading the inventory from disk.

use std::fs;
use std::io;
use std::path::Path;

use dnscover_common::model::Inventory;
use tracing::{debug, info};

use crate::error::{DecodeError, Error, Result};

/// Reads and decodes the YAML inventory at `path`.
///
/// Decoding failures surface as [`Error::InputMalformed`]; no partial
/// inventory is ever returned.
pub fn load_inventory(path: &Path) -> Result<Inventory> {
    info!("Parsing YAML file: {}", path.display());

    let text = fs::read_to_string(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => Error::InputNotFound {
            path: path.to_path_buf(),
        },
        _ => Error::InputUnreadable {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let inventory = parse_inventory(&text).map_err(|source| Error::InputMalformed {
        path: path.to_path_buf(),
        source,
    })?;

    debug!(
        properties = inventory.properties.len(),
        records = inventory.record_count(),
        "inventory loaded"
    );
    Ok(inventory)
}

/// Decodes an inventory from YAML text.
pub fn parse_inventory(text: &str) -> std::result::Result<Inventory, DecodeError> {
    let inventory: Inventory = serde_yaml_ng::from_str(text)?;
    inventory.validate()?;
    Ok(inventory)
}
