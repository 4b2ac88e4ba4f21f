//! 生成服务 API 客户端
//!
//! 封装所有与图片生成服务相关的调用逻辑。
//! 每个提示词对应一次请求，不重试，非 200 状态码原样透传。

use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::GenerationResponse;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// 生成服务 API 客户端
///
/// 内部的 `reqwest::Client` 是引用计数的，clone 之后共享同一个连接池。
#[derive(Clone)]
pub struct CraiyonClient {
    http: reqwest::Client,
    endpoint: String,
}

impl CraiyonClient {
    /// 创建新的生成客户端
    ///
    /// 固定请求头在这里一次性装好：服务端的访问策略要求
    /// origin 和浏览器 user-agent 等伪装头。
    pub fn new(config: &Config) -> AppResult<Self> {
        let headers = build_headers(config)?;

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::ClientBuildFailed)?;

        Ok(Self {
            http,
            endpoint: config.generate_endpoint.clone(),
        })
    }

    /// 发起一次生成请求
    ///
    /// 请求体只有 `prompt` 一个字段。返回服务端给出的状态码和
    /// 原始响应体，状态码的解释交给调用方。
    pub async fn generate(&self, prompt: &str) -> AppResult<GenerationResponse> {
        debug!("请求生成: {}", prompt);

        let response = self
            .http
            .post(&self.endpoint)
            .json(&json!({ "prompt": prompt }))
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: self.endpoint.clone(),
                source: e,
            })?;

        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| ApiError::RequestFailed {
            endpoint: self.endpoint.clone(),
            source: e,
        })?;

        debug!("请求完成: 状态码 {}", status);

        Ok(GenerationResponse { status, body })
    }

    /// 当前使用的接口地址
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

fn build_headers(config: &Config) -> AppResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    headers.insert(
        HeaderName::from_static("accept"),
        HeaderValue::from_static("application/json"),
    );
    headers.insert(
        HeaderName::from_static("accept-language"),
        HeaderValue::from_static("en-ZA,en;q=0.9,en-GB;q=0.8,en-US;q=0.7,af;q=0.6,es;q=0.5"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua"),
        HeaderValue::from_static(
            "\".Not/A)Brand\";v=\"99\", \"Google Chrome\";v=\"103\", \"Chromium\";v=\"103\"",
        ),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-mobile"),
        HeaderValue::from_static("?0"),
    );
    headers.insert(
        HeaderName::from_static("sec-ch-ua-platform"),
        HeaderValue::from_static("\"Windows\""),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-dest"),
        HeaderValue::from_static("empty"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-mode"),
        HeaderValue::from_static("cors"),
    );
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-site"),
    );
    headers.insert(
        HeaderName::from_static("origin"),
        HeaderValue::from_str(&config.origin).map_err(|_| ApiError::InvalidHeaderValue {
            name: "origin".to_string(),
        })?,
    );
    headers.insert(
        HeaderName::from_static("user-agent"),
        HeaderValue::from_str(&config.user_agent).map_err(|_| ApiError::InvalidHeaderValue {
            name: "user-agent".to_string(),
        })?,
    );

    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_headers_contains_impersonation_set() {
        let config = Config::default();
        let headers = build_headers(&config).unwrap();

        assert_eq!(headers.get("accept").unwrap(), "application/json");
        assert_eq!(headers.get("origin").unwrap(), "https://www.craiyon.com");
        assert!(headers.get("user-agent").unwrap().to_str().unwrap().contains("Chrome"));
        assert_eq!(headers.get("sec-fetch-mode").unwrap(), "cors");
    }

    /// 需要真实网络环境，手动运行：cargo test -- --ignored
    #[tokio::test]
    #[ignore]
    async fn test_generate_against_live_service() {
        let config = Config::default();
        let client = CraiyonClient::new(&config).unwrap();

        let response = client.generate("chocolate toad").await.unwrap();
        println!("状态码: {}", response.status);
        assert!(response.status == 200 || response.status >= 400);
    }
}
