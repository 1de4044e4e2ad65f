//! Usage statistics command handler

use crate::config::Config;
use crate::db::{Store, UsageRow};

pub async fn cmd_stats(config: &Config) -> anyhow::Result<()> {
    let store = Store::from_config(&config.database).await?;

    print_table("Clients", &store.client_usage().await?);
    println!();
    print_table("Servers", &store.server_usage().await?);

    Ok(())
}

fn print_table(title: &str, rows: &[UsageRow]) {
    println!("{title} ({} total)", rows.len());
    println!("{:-<50}", "");

    if rows.is_empty() {
        println!("No logins recorded.");
        return;
    }

    for row in rows {
        println!("{:<40} {:>9}", row.name, row.count);
    }
}
