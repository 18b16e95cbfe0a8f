//! Example: query the EOS mainnet Hyperion instance.
//!
//! Run with: cargo run --example mainnet

use hyperion_client::{ActionsQuery, HyperionClient, Page, ProducersQuery, Result};

#[tokio::main]
async fn main() -> Result<()> {
    let client = HyperionClient::eos_mainnet();

    println!("=== Hyperion client: {} ===\n", client.base_url());

    // 1. Chain info
    println!("1. Fetching chain info...");
    let info = client.chain().get_info().await?;
    println!("   Chain ID: {}", info.chain_id);
    println!("   Head block: {} by {}", info.head_block_num, info.head_block_producer);
    println!(
        "   Irreversible: {} ({} behind head)",
        info.last_irreversible_block_num,
        info.irreversibility_lag()
    );
    println!();

    // 2. Indexer health
    println!("2. Fetching indexer health...");
    let health = client.status().health().await?;
    println!("   Version: {}", health.version);
    for service in &health.health {
        println!("   {}: {}", service.service, service.status);
    }
    if let Some(block) = health.last_indexed_block() {
        println!("   Last indexed block: {block}");
    }
    println!();

    // 3. Account creator
    println!("3. Looking up the creator of eosio.token...");
    match client.accounts().get_creator("eosio.token").await? {
        Some(creator) => println!(
            "   Created by {} in block {} (trx {})",
            creator.creator, creator.block_num, creator.trx_id
        ),
        None => println!("   Creator not found"),
    }
    println!();

    // 4. Token balances
    println!("4. Fetching token balances of eosio.rex...");
    let tokens = client.accounts().get_tokens("eosio.rex", Page::limit(5)).await?;
    for token in &tokens.tokens {
        println!("   {} {} ({})", token.amount, token.symbol, token.contract);
    }
    println!();

    // 5. Recent transfers
    println!("5. Fetching recent eosio.token transfers...");
    let query = ActionsQuery::for_account("eosio.token")
        .filter("eosio.token:transfer")
        .limit(3);
    let transfers = client.accounts().get_actions(&query).await?;
    for action in &transfers.actions {
        let quantity = action.act.data.get("quantity").and_then(|q| q.as_str()).unwrap_or("?");
        println!("   block {}: {} {}", action.block_num, action.qualified_name(), quantity);
    }
    println!();

    // 6. Top producers
    println!("6. Fetching top producers...");
    let producers = client
        .chain()
        .get_producers(&ProducersQuery {
            limit: 5,
            ..Default::default()
        })
        .await?;
    for producer in &producers.rows {
        println!("   {} ({})", producer.owner, producer.url);
    }

    println!("\n=== Done ===");
    Ok(())
}
