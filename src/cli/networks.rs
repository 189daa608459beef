//! Networks command implementation.

use crate::cli::OutputOptions;
use crate::core::network::NetworkRegistry;
use crate::error::Result;
use crate::render;

/// List every supported network.
pub fn execute(output: OutputOptions) -> Result<()> {
    let registry = NetworkRegistry::new();
    let networks: Vec<_> = registry.iter().collect();
    let rendered = render::render_networks(&networks, output.format, output.pretty, output.no_color)?;
    print!("{rendered}");
    Ok(())
}
