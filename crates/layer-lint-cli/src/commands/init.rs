//! Init command implementation.

use anyhow::{bail, Result};
use std::path::Path;

const DEFAULT_CONFIG: &str = r#"# layer-lint configuration
#
# Layers from most foundational to least. A module may depend on modules of
# its own layer or of earlier layers, never on a later one.
# A nested list groups peer layers that share a rank.
order = ["L1", "L2", "L3", "L4", "L5", "app"]

# Optional boundary layer. Edges whose dependency ranks at or below it and
# whose origin ranks at or above it are exempt from the rank rule.
# boundary = "L3"
# ...or name it through one of its modules:
# boundary_module = ":common:bridge"

# Log every evaluated edge
debug = false

# Report each violation once (true) or every occurrence (false)
dedup = true

# Modules of each layer (bare ids, as in `project ':core:network'`)
[modules]
L1 = [":core:common"]
L2 = [":core:network", ":core:database"]
L3 = [":domain"]
L4 = [":data"]
L5 = [":feature:home", ":feature:profile"]
app = [":app"]

# Per-layer boundary, overriding the global one for edges leaving that layer
[boundaries]
# app = "L4"

# Modules a layer must never depend on, whatever their rank
[forbid]
# L5 = [":core:database"]
"#;

/// Runs the init command.
pub fn run(force: bool) -> Result<()> {
    let config_path = Path::new("layer-lint.toml");

    if config_path.exists() && !force {
        bail!(
            "Configuration file already exists at {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    std::fs::write(config_path, DEFAULT_CONFIG)?;

    println!("Created layer-lint.toml");
    println!("\nNext steps:");
    println!("  1. Edit order and [modules] for your project");
    println!("  2. Export the module graph to build/dependency-graph.json");
    println!("  3. Run: layer-lint check");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use layer_lint_core::LayerConfig;

    #[test]
    fn template_is_valid_config() {
        let config = LayerConfig::parse(DEFAULT_CONFIG).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.order.len(), 6);
        assert!(config.dedup);
    }
}
