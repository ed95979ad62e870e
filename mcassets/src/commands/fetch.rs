use crate::cli::GlobalArgs;
use crate::ui;
use anyhow::{Context, Result};
use clap::Args;
use indicatif::HumanBytes;
use mcassets_lib::events::{Event, Notifier};
use mcassets_lib::fetcher::{self, FetchRequest, FetchSummary};
use mcassets_lib::logging::progress_bar_style;
use mcassets_lib::mojang::MojangClient;
use mcassets_lib::store::AssetStore;
use tracing::instrument;
use tracing_indicatif::span_ext::IndicatifSpanExt;

#[derive(Args)]
pub struct FetchCommand {
    /// The Minecraft version to fetch assets for (e.g., 1.16.5)
    pub version: String,

    /// Download objects from this base URL instead of Mojang's CDN
    #[arg(long)]
    pub base_url: Option<String>,
}

impl FetchCommand {
    pub async fn run(self, global_args: GlobalArgs) -> Result<()> {
        let root = global_args.root.unwrap_or_else(AssetStore::default_root);
        let store = AssetStore::setup(&root)
            .with_context(|| format!("Failed to set up assets root at {}", root.display()))?;

        let mut request = FetchRequest::new(&self.version);
        if let Some(base_url) = self.base_url {
            request = request.with_base_url(base_url);
        }

        let summary = download_with_progress(store.clone(), request)
            .await
            .context(format!("Failed to fetch assets for version {}", self.version))?;

        ui::success(&format!(
            "Fetched {} objects ({}) for {}",
            summary.objects,
            HumanBytes(summary.bytes),
            summary.version_id,
        ));
        ui::info(&format!(
            "Asset index '{}' saved under {}",
            summary.index_id,
            store.indexes_dir.display()
        ));
        ui::tip("Point your launcher's assets directory at this root.");

        Ok(())
    }
}

#[instrument(skip_all)]
async fn download_with_progress(store: AssetStore, request: FetchRequest) -> Result<FetchSummary> {
    let current_span = tracing::Span::current();
    current_span.pb_set_style(&progress_bar_style()?);
    current_span.pb_set_message(&format!("Fetching assets for {}...", request.version));
    current_span.pb_set_finish_message(&format!(
        "Fetching assets for {}... Complete!",
        request.version
    ));

    let (notifier, mut events) = Notifier::channel();
    let worker = tokio::spawn(async move {
        let client = MojangClient::new();
        fetcher::fetch_assets(&store, &request, &client, &notifier).await
    });

    // The worker owns the sending half; the channel drains when it finishes.
    while let Some(event) = events.recv().await {
        match event {
            Event::Progress(progress) => {
                current_span.pb_set_length(progress.total as u64);
                current_span.pb_set_position(progress.current as u64);
            }
            Event::Done => {}
            Event::Error(message) => ui::error(&message),
        }
    }

    Ok(worker.await??)
}
