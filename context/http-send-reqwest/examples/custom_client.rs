use anyhow::Result;
use bytes::Bytes;
use reqwest::Client;
use std::time::Duration;
use tiktokshop_core::Context;
use tiktokshop_http_send_reqwest::ReqwestHttpSend;

#[tokio::main]
async fn main() -> Result<()> {
    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .pool_max_idle_per_host(10)
        .user_agent("tiktokshop-example/0.1")
        .build()?;

    let ctx = Context::new().with_http_send(ReqwestHttpSend::new(client));

    let req = http::Request::builder()
        .method("GET")
        .uri("https://open-api.tiktokglobalshop.com/")
        .body(Bytes::new())?;

    match ctx.http_send(req).await {
        Ok(resp) => {
            println!("status: {}", resp.status());
            println!("body: {}", String::from_utf8_lossy(resp.body()));
        }
        Err(e) => eprintln!("request failed: {e}"),
    }

    Ok(())
}
