use anyhow::Result;
use booktoc::recent::{JsonRecentStore, RecentStore};
use booktoc::util::emit_json;
use chrono::Local;
use tracing::info;

use crate::cli::RecentArgs;

pub fn run(args: RecentArgs) -> Result<()> {
    let store = JsonRecentStore::new(&args.store);

    if let Some(key) = &args.touch {
        store.record(key, Local::now())?;
        info!(document = %key, store = %store.path().display(), "recorded open");
    }

    emit_json(None, &store.load()?)
}
