//! PostgREST 仓储
//!
//! 表地址为 `{url}/rest/v1/{table}`，表名取自记录结构描述：
//! - 读取：`GET ?select=*`
//! - 新增：`POST`，请求体为单元素数组
//! - 更新：`PATCH ?id=eq.{id}`，请求体不含 `id`
//! - 删除：`DELETE ?id=eq.{id}`，`Prefer: return=representation`，按返回行数判断是否删除
//!
//! 每个请求携带 `apikey` 与 `Authorization: Bearer`。非 2xx 响应转换为 `DomainError::Remote`。
//!
use super::{RecordRepository, RemoteConfig};
use crate::error::{DomainError, DomainResult};
use crate::record::Record;
use crate::value_object::RecordId;
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder, Response};
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;

pub struct PostgrestRepository<R> {
    client: reqwest::Client,
    endpoint: String,
    api_key: String,
    _record: PhantomData<fn() -> R>,
}

impl<R: Record> PostgrestRepository<R> {
    pub fn new(config: &RemoteConfig) -> DomainResult<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: reqwest::Client, config: &RemoteConfig) -> Self {
        let base = config.url.trim_end_matches('/');
        Self {
            client,
            endpoint: format!("{base}/rest/v1/{}", R::schema().table),
            api_key: config.api_key.clone(),
            _record: PhantomData,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request(&self, method: Method) -> RequestBuilder {
        self.client
            .request(method, &self.endpoint)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
    }

    fn id_filter(id: &RecordId) -> [(&'static str, String); 1] {
        [("id", format!("eq.{id}"))]
    }
}

/// 非 2xx 时带上状态码与响应体
async fn ensure_success(operation: &'static str, response: Response) -> DomainResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(DomainError::remote(operation, format!("{status}: {body}")))
}

#[async_trait]
impl<R: Record> RecordRepository<R> for PostgrestRepository<R> {
    async fn list(&self) -> DomainResult<Vec<R>> {
        tracing::debug!(endpoint = %self.endpoint, "remote list");
        let response = self
            .request(Method::GET)
            .query(&[("select", "*")])
            .send()
            .await?;
        let rows = ensure_success("list", response).await?.json::<Vec<R>>().await?;
        Ok(rows)
    }

    async fn insert(&self, record: &R) -> DomainResult<()> {
        tracing::debug!(endpoint = %self.endpoint, id = %record.id(), "remote insert");
        let response = self
            .request(Method::POST)
            .header("Prefer", "return=minimal")
            .json(&[record])
            .send()
            .await?;
        ensure_success("insert", response).await?;
        Ok(())
    }

    async fn update(&self, id: &RecordId, record: &R) -> DomainResult<()> {
        tracing::debug!(endpoint = %self.endpoint, %id, "remote update");
        let mut body = serde_json::to_value(record)?;
        if let Value::Object(map) = &mut body {
            map.remove("id");
        }
        let response = self
            .request(Method::PATCH)
            .query(&Self::id_filter(id))
            .header("Prefer", "return=minimal")
            .json(&body)
            .send()
            .await?;
        ensure_success("update", response).await?;
        Ok(())
    }

    async fn delete(&self, id: &RecordId) -> DomainResult<bool> {
        tracing::debug!(endpoint = %self.endpoint, %id, "remote delete");
        let response = self
            .request(Method::DELETE)
            .query(&Self::id_filter(id))
            .header("Prefer", "return=representation")
            .send()
            .await?;
        let removed = ensure_success("delete", response)
            .await?
            .json::<Vec<Value>>()
            .await?;
        Ok(!removed.is_empty())
    }
}
