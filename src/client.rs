use anyhow::{Result, anyhow};
use serde_json::Value;

use crate::config::ClientConfig;
use crate::dto::TranscriptParams;

pub async fn send_transcript_request(config: &ClientConfig) -> Result<Value> {
    let client = reqwest::Client::new();

    println!("🚀 Requesting transcript from: {}", config.transcript_url());
    println!("   Input: {}", config.input);

    let params = TranscriptParams {
        url: Some(config.input.clone()),
        video_id: None,
    };

    let response = client
        .post(config.transcript_url())
        .json(&params)
        .send()
        .await
        .map_err(|e| anyhow!("Failed to send request: {}", e))?;

    let status = response.status();
    let response_text = response
        .text()
        .await
        .map_err(|e| anyhow!("Failed to read response: {}", e))?;

    if !status.is_success() {
        let message = serde_json::from_str::<Value>(&response_text)
            .ok()
            .and_then(|body| body["error"].as_str().map(str::to_string))
            .unwrap_or(response_text);
        return Err(anyhow!("Server returned error {}: {}", status, message));
    }

    let json: Value = serde_json::from_str(&response_text)
        .map_err(|e| anyhow!("Failed to parse JSON response: {}", e))?;

    Ok(json)
}

pub async fn check_server_health(config: &ClientConfig) -> Result<()> {
    let client = reqwest::Client::new();

    println!("🔍 Checking server health at: {}", config.health_url());

    let response = client
        .get(config.health_url())
        .send()
        .await
        .map_err(|e| anyhow!("Failed to connect to server: {}", e))?;

    if response.status().is_success() {
        println!("✅ Server is healthy");
        Ok(())
    } else {
        Err(anyhow!("Server health check failed: {}", response.status()))
    }
}

pub async fn run_client(config: ClientConfig) -> Result<()> {
    println!("📺 YouTube Transcript Client");
    println!("============================");

    if let Err(e) = check_server_health(&config).await {
        eprintln!("❌ {e}");
        eprintln!("💡 Make sure the server is running: yt-summarizer-backend serve");
        return Err(e);
    }

    match send_transcript_request(&config).await {
        Ok(result) => {
            println!("\n✅ Transcript fetched!");
            if config.text_only {
                println!("{}", result["transcript"].as_str().unwrap_or_default());
            } else {
                println!("📝 Result:");
                println!("{}", serde_json::to_string_pretty(&result)?);
            }
        }
        Err(e) => {
            eprintln!("❌ Transcript request failed: {e}");
            return Err(e);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn config_for(server: &MockServer, input: &str) -> ClientConfig {
        ClientConfig::new(server.uri(), input.to_string(), false)
    }

    #[tokio::test]
    async fn posts_input_as_url() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transcript"))
            .and(body_json(serde_json::json!({ "url": "https://youtu.be/abc123" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "video_id": "abc123",
                "transcript": "hi there",
                "segments": [],
                "duration": 0
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = send_transcript_request(&config_for(&server, "https://youtu.be/abc123"))
            .await
            .unwrap();

        assert_eq!(result["video_id"], "abc123");
        assert_eq!(result["transcript"], "hi there");
    }

    #[tokio::test]
    async fn surfaces_server_error_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/transcript"))
            .respond_with(ResponseTemplate::new(400).set_body_json(serde_json::json!({
                "error": "Invalid YouTube URL or video ID"
            })))
            .mount(&server)
            .await;

        let err = send_transcript_request(&config_for(&server, "https://youtube.com/nope"))
            .await
            .unwrap_err();

        assert!(err.to_string().contains("Invalid YouTube URL or video ID"));
    }

    #[tokio::test]
    async fn health_check_requires_success() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        assert!(check_server_health(&config_for(&server, "abc")).await.is_err());
    }
}
