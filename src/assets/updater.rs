use super::manager::{CHARACTERS_FILE, TEXT_MAP_FILE};
use crate::transport::HttpTransport;
use crate::Result;
use std::path::Path;
use tracing::info;

const ASSET_SOURCE: &str =
    "https://raw.githubusercontent.com/seriaati/enka-py-assets/main/data";

/// Downloads the published asset files into the local asset directory.
pub(crate) struct AssetUpdater<'a> {
    transport: &'a HttpTransport,
    dir: &'a Path,
}

impl<'a> AssetUpdater<'a> {
    pub(crate) fn new(transport: &'a HttpTransport, dir: &'a Path) -> Self {
        Self { transport, dir }
    }

    pub(crate) async fn update(&self) -> Result<()> {
        tokio::fs::create_dir_all(self.dir).await?;
        futures::future::try_join(
            self.download(CHARACTERS_FILE),
            self.download(TEXT_MAP_FILE),
        )
        .await?;
        info!(dir = %self.dir.display(), "assets updated");
        Ok(())
    }

    async fn download(&self, file: &str) -> Result<()> {
        let url = format!("{ASSET_SOURCE}/{file}");
        let bytes = self.transport.get_bytes(&url).await?;

        // Write-then-rename so a failed download never clobbers a good file.
        let target = self.dir.join(file);
        let tmp = self.dir.join(format!("{file}.tmp"));
        tokio::fs::write(&tmp, &bytes).await?;
        tokio::fs::rename(&tmp, &target).await?;
        Ok(())
    }
}
