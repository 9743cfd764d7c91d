use futures::future::try_join_all;
use influxdb2_client::{Client, DataPoint, Options, Precision};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let org = "my-org";
    let influx_url = "http://localhost:8086";
    let token = "my-token";

    let client = Client::with_options(
        influx_url,
        token,
        Options::default()
            .with_batch_size(100)
            .with_precision(Precision::Seconds)
            .with_default_tag("region", "us-west"),
    )?;

    // buffered, sent in the background
    let write_api = client.write_api(org, "cpu").await;
    for load in [0.64, 0.27, 0.93] {
        write_api.write_point(
            &DataPoint::builder("cpu_load_short")
                .tag("host", "server01")
                .field("value", load)
                .build()?,
        )?;
    }

    // one request per call, to several buckets at once
    let client = &client;
    let writers = try_join_all(["mem", "disk"].map(|bucket| async move {
        let write_api = client.write_api_blocking(org, bucket).await;
        write_api
            .write_record([format!("{bucket},host=server01 used=42i")])
            .await
    }));
    writers.await?;

    // sends whatever the write_api still buffers
    client.close().await;

    Ok(())
}
