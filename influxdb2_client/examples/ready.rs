#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let influx_url = "http://localhost:8086";

    // ready and health need no token
    let client = influxdb2_client::Client::new(influx_url, "")?;

    println!("ready: {}", client.ready().await?);
    let health = client.health().await?;
    println!("health: {:?} {}", health.status, health.message.unwrap_or_default());

    Ok(())
}
