//! Wallets command implementation.

use crate::cli::OutputOptions;
use crate::core::service::WalletService;
use crate::error::Result;
use crate::render;

/// List saved wallets in label order.
pub fn execute(service: &WalletService, output: OutputOptions) -> Result<()> {
    let wallets = service.list_saved_wallets();
    let rendered = render::render_wallets(&wallets, output.format, output.pretty, output.no_color)?;
    print!("{rendered}");
    Ok(())
}
