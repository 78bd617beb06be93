use reqwest::multipart::{Form, Part};
use reqwest::Client;
use std::env;

// Usage: cargo run -p api --example client -- [question] [image path]
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::new();
    let base_url = env::var("API_BASE_URL").unwrap_or_else(|_| "http://127.0.0.1:3000".to_string());
    let mut args = env::args().skip(1);
    let question = args
        .next()
        .unwrap_or_else(|| "Why do I see two charges for the same purchase?".to_string());
    let image_path = args.next();

    println!("🔍 Testing Transaction Assistance API");

    println!("\n📋 Health Check:");
    let health_response = client.get(format!("{}/health", base_url)).send().await?;
    println!("Status: {}", health_response.status());
    let health_json: serde_json::Value = health_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&health_json)?);

    println!("\n🔍 Query Test:");
    let mut form = Form::new().text("query", question);
    if let Some(path) = image_path {
        let bytes = tokio::fs::read(&path).await?;
        let filename = std::path::Path::new(&path)
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "upload.png".to_string());
        form = form.part("image", Part::bytes(bytes).file_name(filename));
    }

    let query_response = client
        .post(format!("{}/api/query", base_url))
        .multipart(form)
        .send()
        .await?;

    println!("Status: {}", query_response.status());
    let query_json: serde_json::Value = query_response.json().await?;
    println!("Response: {}", serde_json::to_string_pretty(&query_json)?);

    println!("\n✅ Client test completed!");
    Ok(())
}
