use anyhow::Result;
use leadgen_core::history::SearchHistoryRepository;

use crate::context::AppContext;

pub async fn run(ctx: &AppContext, clear: bool) -> Result<()> {
    if clear {
        ctx.history.clear().await?;
        println!("Search history cleared.");
        return Ok(());
    }

    let history = ctx.history.list().await;
    if history.is_empty() {
        println!("No recent searches.");
    }
    for item in history {
        println!(
            "{}  {} in {}",
            item.timestamp.format("%Y-%m-%d %H:%M"),
            item.industry,
            item.location
        );
    }
    Ok(())
}
