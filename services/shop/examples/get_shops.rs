//! List authorized shops, then read one product from the first shop.
//!
//! ```bash
//! export TIKTOK_SHOP_APP_KEY=...
//! export TIKTOK_SHOP_APP_SECRET=...
//! export TIKTOK_SHOP_ACCESS_TOKEN=...
//! cargo run --example get_shops -- <product_id>
//! ```

use anyhow::{anyhow, Result};
use log::info;
use tiktokshop_api::{Client, Config};
use tiktokshop_core::{Context, OsEnv};
use tiktokshop_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();
    let _ = dotenv::dotenv();

    let ctx = Context::new()
        .with_http_send(ReqwestHttpSend::default())
        .with_env(OsEnv);
    let client = Client::from_config(ctx, Config::new()).await?;

    let data = client.get_authorized_shops().await?.into_data()?;
    let shop = data["shops"]
        .get(0)
        .ok_or_else(|| anyhow!("no authorized shop"))?;
    let id = shop["id"].as_str().unwrap_or_default();
    let cipher = shop["cipher"].as_str().unwrap_or_default();
    info!("using shop {id} ({})", shop["name"]);
    client.set_shop(id, cipher);

    if let Some(product_id) = std::env::args().nth(1) {
        let product = client.get_product(&product_id).await?;
        println!("{}", serde_json::to_string_pretty(&product)?);
    }

    Ok(())
}
