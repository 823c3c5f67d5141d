use std::sync::Arc;

use calcbot_core::{config::Config, notes::NoteStore};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), calcbot_core::Error> {
    calcbot_core::logging::init("calcbot")?;

    let cfg = Arc::new(Config::load()?);
    let notes = Arc::new(NoteStore::open(&cfg.notes_file, &cfg.encryption_key)?);

    calcbot_telegram::router::run_polling(cfg, notes)
        .await
        .map_err(|e| {
            error!(error = %e, "telegram bot failed");
            calcbot_core::Error::External(format!("telegram bot failed: {e}"))
        })?;

    Ok(())
}
