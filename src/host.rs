//! 宿主应用接口
//!
//! The panel consumes the host collaboration app through a narrow gateway:
//! settings read/write, the assistant-models catalog, default-model
//! discovery, session identity, chat opening, and the back-navigation
//! interceptor. [`HostClient`] is the HTTP implementation; tests supply
//! their own gateway.

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use crate::bots::AiBot;
use crate::error::AppError;
use crate::i18n::texts;

const HTTP_REQUEST_TIMEOUT_SECS: u64 = 30;

/// 宿主会话用户信息
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UserInfo {
    #[serde(default)]
    pub identity: Vec<String>,
}

impl UserInfo {
    pub fn is_admin(&self) -> bool {
        self.identity.iter().any(|role| role == "admin")
    }
}

/// 保存设置的响应
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SaveResponse {
    #[serde(default)]
    pub data: IndexMap<String, String>,
    #[serde(default)]
    pub msg: Option<String>,
}

/// 默认模型发现的查询参数
#[derive(Debug, Clone, Default)]
pub struct ModelsQuery {
    pub base_url: Option<String>,
    pub key: Option<String>,
    pub agency: Option<String>,
}

/// 默认模型发现的响应
#[derive(Debug, Clone, Deserialize)]
pub struct ModelsListResponse {
    pub code: i64,
    #[serde(default)]
    pub data: Option<ModelsListData>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModelsListData {
    #[serde(default)]
    pub models: Vec<String>,
}

/// 返回拦截句柄
///
/// Holds the single outstanding back-navigation registration. Dropping the
/// guard releases the registration, so every exit path (save, cancel,
/// teardown) releases exactly once.
pub struct InterceptGuard {
    release: Option<Box<dyn FnOnce() + Send>>,
}

impl InterceptGuard {
    pub fn new(release: impl FnOnce() + Send + 'static) -> Self {
        Self {
            release: Some(Box::new(release)),
        }
    }

    pub fn release(mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl Drop for InterceptGuard {
    fn drop(&mut self) {
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for InterceptGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InterceptGuard")
            .field("active", &self.release.is_some())
            .finish()
    }
}

/// 宿主网关
#[async_trait]
pub trait HostGateway {
    /// Best-effort readiness signal; failures are logged, never surfaced.
    async fn app_ready(&self) -> Result<(), AppError>;

    async fn user_info(&self) -> Result<UserInfo, AppError>;

    /// Current namespaced key/value pairs for one bot.
    async fn load_settings(&self, bot: AiBot) -> Result<IndexMap<String, String>, AppError>;

    /// Persist one bot's settings; the response echoes canonical values.
    async fn save_settings(
        &self,
        bot: AiBot,
        payload: &IndexMap<String, String>,
    ) -> Result<SaveResponse, AppError>;

    /// `{bot}_models` / `{bot}_model` pairs for every bot, for tag display.
    async fn assistant_models(&self) -> Result<IndexMap<String, String>, AppError>;

    /// Discover the provider's default model list.
    async fn models_list(
        &self,
        bot: AiBot,
        query: &ModelsQuery,
    ) -> Result<ModelsListResponse, AppError>;

    /// Resolve the host user id backing a bot's chat dialog.
    async fn search_ai_user(&self, bot: AiBot) -> Result<Option<i64>, AppError>;

    async fn open_dialog(&self, userid: i64) -> Result<(), AppError>;

    /// Register a back-navigation interceptor. Implementations without a
    /// navigation surface return an error; the caller degrades silently.
    fn intercept_back(&self) -> Result<InterceptGuard, AppError>;
}

/// HTTP 实现
#[derive(Debug, Clone)]
pub struct HostClient {
    http: reqwest::Client,
    base_url: Url,
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    data: Option<T>,
    #[serde(default)]
    msg: Option<String>,
}

impl HostClient {
    pub fn new(base_url: &str) -> Result<Self, AppError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| AppError::Message(format!("Invalid host URL '{base_url}': {e}")))?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(HTTP_REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Message(format!("Failed to initialize HTTP client: {e}")))?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AppError> {
        self.base_url
            .join(path)
            .map_err(|e| AppError::Message(format!("Invalid endpoint '{path}': {e}")))
    }

    /// Decode a success body, or map a failure body to `Remote` with the
    /// best-available message and the given localized fallback.
    async fn expect_json<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
        fallback: &str,
    ) -> Result<T, AppError> {
        let status = response.status();
        if !status.is_success() {
            let payload = response.json::<Value>().await.ok();
            return Err(AppError::remote_from_payload(payload.as_ref(), fallback));
        }
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl HostGateway for HostClient {
    async fn app_ready(&self) -> Result<(), AppError> {
        let url = self.endpoint("system/get/info")?;
        self.http.get(url).send().await?.error_for_status()?;
        Ok(())
    }

    async fn user_info(&self) -> Result<UserInfo, AppError> {
        let url = self.endpoint("users/info")?;
        let response = self.http.get(url).send().await?;
        let envelope: Envelope<UserInfo> =
            Self::expect_json(response, texts::load_failed()).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn load_settings(&self, bot: AiBot) -> Result<IndexMap<String, String>, AppError> {
        let url = self.endpoint("system/setting/aibot")?;
        let response = self
            .http
            .get(url)
            .query(&[("type", "get"), ("filter", bot.key())])
            .send()
            .await?;
        let envelope: Envelope<IndexMap<String, String>> =
            Self::expect_json(response, texts::load_failed()).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn save_settings(
        &self,
        bot: AiBot,
        payload: &IndexMap<String, String>,
    ) -> Result<SaveResponse, AppError> {
        let url = self.endpoint("system/setting/aibot")?;
        let mut body = serde_json::Map::new();
        for (key, value) in payload {
            body.insert(key.clone(), Value::String(value.clone()));
        }
        body.insert("type".to_string(), Value::String("save".to_string()));
        body.insert("filter".to_string(), Value::String(bot.key().to_string()));

        let response = self.http.post(url).json(&body).send().await?;
        let envelope: Envelope<IndexMap<String, String>> =
            Self::expect_json(response, texts::submit_failed()).await?;
        Ok(SaveResponse {
            data: envelope.data.unwrap_or_default(),
            msg: envelope.msg,
        })
    }

    async fn assistant_models(&self) -> Result<IndexMap<String, String>, AppError> {
        let url = self.endpoint("system/setting/aibot_models")?;
        let response = self.http.get(url).send().await?;
        let envelope: Envelope<IndexMap<String, String>> =
            Self::expect_json(response, texts::load_failed()).await?;
        Ok(envelope.data.unwrap_or_default())
    }

    async fn models_list(
        &self,
        bot: AiBot,
        query: &ModelsQuery,
    ) -> Result<ModelsListResponse, AppError> {
        let url = self.endpoint("ai/models/list")?;
        let mut params: Vec<(&str, &str)> = vec![("type", bot.key())];
        if let Some(base_url) = query.base_url.as_deref() {
            params.push(("base_url", base_url));
        }
        if let Some(key) = query.key.as_deref() {
            params.push(("key", key));
        }
        if let Some(agency) = query.agency.as_deref() {
            params.push(("agency", agency));
        }

        let response = self.http.get(url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            let payload = response.json::<Value>().await.ok();
            return Err(AppError::remote_from_payload(
                payload.as_ref(),
                texts::fetch_failed(),
            ));
        }
        Ok(response.json::<ModelsListResponse>().await?)
    }

    async fn search_ai_user(&self, bot: AiBot) -> Result<Option<i64>, AppError> {
        #[derive(Debug, Default, Deserialize)]
        struct AiUser {
            #[serde(default)]
            userid: Option<i64>,
        }

        let url = self.endpoint("users/search/ai")?;
        let response = self
            .http
            .get(url)
            .query(&[("type", bot.key())])
            .send()
            .await?;
        let envelope: Envelope<AiUser> =
            Self::expect_json(response, texts::bot_unavailable()).await?;
        Ok(envelope.data.and_then(|user| user.userid))
    }

    async fn open_dialog(&self, userid: i64) -> Result<(), AppError> {
        let url = self.endpoint("dialog/open/user")?;
        let response = self
            .http
            .get(url)
            .query(&[("userid", userid.to_string())])
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let payload = response.json::<Value>().await.ok();
            return Err(AppError::remote_from_payload(
                payload.as_ref(),
                texts::bot_unavailable(),
            ));
        }
        Ok(())
    }

    fn intercept_back(&self) -> Result<InterceptGuard, AppError> {
        // Navigation gestures live in the host shell, not on the HTTP API.
        Err(AppError::Message(
            "back-navigation interception is not available over HTTP".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_info_admin_detection() {
        let admin = UserInfo {
            identity: vec!["member".to_string(), "admin".to_string()],
        };
        assert!(admin.is_admin());
        assert!(!UserInfo::default().is_admin());
    }

    #[test]
    fn intercept_guard_releases_exactly_once() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let released = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&released);
        let guard = InterceptGuard::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });
        guard.release();
        assert_eq!(released.load(Ordering::SeqCst), 1);

        let counter = Arc::clone(&released);
        {
            let _guard = InterceptGuard::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        assert_eq!(released.load(Ordering::SeqCst), 2, "drop releases too");
    }

    #[test]
    fn host_client_rejects_invalid_base_url() {
        assert!(HostClient::new("not a url").is_err());
    }
}
