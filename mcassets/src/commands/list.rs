use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::Result;
use clap::Args;
use colored::Colorize;
use mcassets_lib::download_client::DownloadClient;
use mcassets_lib::mojang::MojangClient;

#[derive(Args)]
pub struct ListCommand {
    /// Show at most this many versions
    #[arg(long, short = 'n', default_value_t = 20)]
    pub limit: usize,

    /// Include snapshots and other non-release versions
    #[arg(long)]
    pub snapshots: bool,
}

impl ListCommand {
    pub async fn run(self, _global_args: GlobalArgs) -> Result<()> {
        let client = MojangClient::new();
        let manifest = client.version_manifest().await?;

        ui::info(&format!(
            "{}",
            "Versions known to the Mojang manifest:".underline().green()
        ));

        let versions: Vec<_> = manifest
            .versions
            .iter()
            .filter(|v| self.snapshots || v.kind == "release")
            .take(self.limit)
            .collect();

        let width = versions.iter().map(|v| v.id.len()).max().unwrap_or(0);
        for version in &versions {
            let latest_str = if version.id == manifest.latest.release {
                " (latest release)".green()
            } else if version.id == manifest.latest.snapshot {
                " (latest snapshot)".yellow()
            } else {
                "".to_string().normal()
            };
            ui::info(
                format!(
                    "{:width$}  {}  {}{}",
                    version.id,
                    version.release_time.format("%Y-%m-%d"),
                    version.kind.dimmed(),
                    latest_str,
                    width = width,
                )
                .trim_end(),
            );
        }

        tracing::info!("");
        ui::info(&format!(
            "Showing {} of {} versions",
            versions.len(),
            manifest.versions.len()
        ));
        ui::tip("Use `mcassets list --snapshots` to include snapshots.");
        ui::tip("Use `mcassets fetch <version>` to download an asset set.");

        Ok(())
    }
}
