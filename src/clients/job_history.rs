//! 任务历史 API 客户端（derived 提示词模式）
//!
//! 只读查询最近的任务运行记录，按预期开始时间倒序。

use crate::config::Config;
use crate::error::{ApiError, AppResult};
use crate::models::JobRun;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// 任务历史 API 客户端
#[derive(Clone)]
pub struct JobHistoryClient {
    http: reqwest::Client,
    base_url: String,
}

impl JobHistoryClient {
    pub fn new(config: &Config) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(ApiError::ClientBuildFailed)?;

        Ok(Self {
            http,
            base_url: config.job_api_base_url.trim_end_matches('/').to_string(),
        })
    }

    /// 查询最近的任务运行记录
    ///
    /// `name_filter` 为空时不过滤名称。返回顺序即服务端的倒序结果，
    /// 这里不再排序。
    pub async fn recent_runs(&self, limit: usize, name_filter: &str) -> AppResult<Vec<JobRun>> {
        let endpoint = format!("{}/flow_runs/filter", self.base_url);

        let mut filter = json!({
            "limit": limit,
            "sort": "EXPECTED_START_TIME_DESC",
        });
        if !name_filter.is_empty() {
            filter["flow_runs"] = json!({ "name": { "like_": name_filter } });
        }

        debug!("查询任务历史: limit={} filter={:?}", limit, name_filter);

        let response = self
            .http
            .post(&endpoint)
            .json(&filter)
            .send()
            .await
            .map_err(|e| ApiError::RequestFailed {
                endpoint: endpoint.clone(),
                source: e,
            })?;

        let status = response.status().as_u16();
        if status != 200 {
            return Err(ApiError::BadResponse { endpoint, status }.into());
        }

        let body = response.text().await.map_err(|e| ApiError::RequestFailed {
            endpoint: endpoint.clone(),
            source: e,
        })?;

        let runs: Vec<JobRun> = serde_json::from_str(&body).map_err(ApiError::JsonParseFailed)?;

        debug!("任务历史返回 {} 条记录", runs.len());

        Ok(runs)
    }
}
