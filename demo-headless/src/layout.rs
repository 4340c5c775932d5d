//! Building layout files

use anyhow::{bail, Context, Result};
use firefly_core::{CellGrid, HazardMask, TtiField};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A building record: raw floor map plus optional live fire and stored
/// time-to-ignite field, all of the same shape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingLayout {
    pub floor_map: CellGrid,
    #[serde(default)]
    pub fire: Option<HazardMask>,
    #[serde(default)]
    pub tti: Option<TtiField>,
}

impl BuildingLayout {
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read layout {}", path.display()))?;
        let layout: Self = serde_json::from_str(&text)
            .with_context(|| format!("failed to parse layout {}", path.display()))?;
        layout.check_shapes()?;
        tracing::info!(
            "Loaded layout {} ({} grid, fire={}, tti={})",
            path.display(),
            layout.floor_map.shape(),
            layout.fire.is_some(),
            layout.tti.is_some()
        );
        Ok(layout)
    }

    fn check_shapes(&self) -> Result<()> {
        let shape = self.floor_map.shape();
        if let Some(fire) = &self.fire {
            if fire.shape() != shape {
                bail!("fire mask shape {} does not match floor map {}", fire.shape(), shape);
            }
        }
        if let Some(tti) = &self.tti {
            if tti.shape() != shape {
                bail!("tti field shape {} does not match floor map {}", tti.shape(), shape);
            }
        }
        Ok(())
    }
}
