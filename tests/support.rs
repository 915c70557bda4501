use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use indexmap::IndexMap;

use aibot_panel::{
    AiBot, AppError, HostGateway, InterceptGuard, ModelsListData, ModelsListResponse, ModelsQuery,
    SaveResponse, UserInfo,
};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// 可配置的内存网关，记录每次调用
#[derive(Clone, Default)]
pub struct MockGateway {
    inner: Arc<MockInner>,
}

#[derive(Default)]
struct MockInner {
    identity: Mutex<Vec<String>>,
    user_info_fails: Mutex<bool>,
    settings: Mutex<IndexMap<String, IndexMap<String, String>>>,
    load_fails: Mutex<bool>,
    save_fails: Mutex<bool>,
    save_msg: Mutex<Option<String>>,
    assistant_models: Mutex<IndexMap<String, String>>,
    models_response: Mutex<Option<ModelsListResponse>>,
    last_models_query: Mutex<Option<ModelsQuery>>,
    ai_userid: Mutex<Option<i64>>,
    calls: Mutex<Vec<String>>,
    active_intercepts: Arc<AtomicUsize>,
    total_intercepts: Arc<AtomicUsize>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn admin() -> Self {
        let mock = Self::default();
        mock.set_identity(vec!["admin".to_string()]);
        mock
    }

    pub fn set_identity(&self, identity: Vec<String>) {
        *self.inner.identity.lock().unwrap() = identity;
    }

    pub fn fail_user_info(&self) {
        *self.inner.user_info_fails.lock().unwrap() = true;
    }

    pub fn fail_loads(&self, fails: bool) {
        *self.inner.load_fails.lock().unwrap() = fails;
    }

    pub fn fail_saves(&self, fails: bool) {
        *self.inner.save_fails.lock().unwrap() = fails;
    }

    pub fn set_save_msg(&self, msg: Option<&str>) {
        *self.inner.save_msg.lock().unwrap() = msg.map(str::to_string);
    }

    pub fn seed_settings(&self, bot: AiBot, pairs: &[(&str, &str)]) {
        let mut settings = self.inner.settings.lock().unwrap();
        let entry = settings.entry(bot.key().to_string()).or_default();
        for (key, value) in pairs {
            entry.insert(key.to_string(), value.to_string());
        }
    }

    pub fn stored_settings(&self, bot: AiBot) -> IndexMap<String, String> {
        self.inner
            .settings
            .lock()
            .unwrap()
            .get(bot.key())
            .cloned()
            .unwrap_or_default()
    }

    pub fn seed_assistant_models(&self, pairs: &[(&str, &str)]) {
        let mut catalog = self.inner.assistant_models.lock().unwrap();
        for (key, value) in pairs {
            catalog.insert(key.to_string(), value.to_string());
        }
    }

    pub fn set_models_response(&self, response: ModelsListResponse) {
        *self.inner.models_response.lock().unwrap() = Some(response);
    }

    pub fn set_models_ok(&self, models: &[&str]) {
        self.set_models_response(ModelsListResponse {
            code: 200,
            data: Some(ModelsListData {
                models: models.iter().map(|m| m.to_string()).collect(),
            }),
            error: None,
        });
    }

    pub fn last_models_query(&self) -> Option<ModelsQuery> {
        self.inner.last_models_query.lock().unwrap().clone()
    }

    pub fn set_ai_userid(&self, userid: Option<i64>) {
        *self.inner.ai_userid.lock().unwrap() = userid;
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self, name: &str) -> usize {
        self.calls().iter().filter(|call| *call == name).count()
    }

    pub fn active_intercepts(&self) -> usize {
        self.inner.active_intercepts.load(Ordering::SeqCst)
    }

    pub fn total_intercepts(&self) -> usize {
        self.inner.total_intercepts.load(Ordering::SeqCst)
    }

    fn record(&self, name: &str) {
        self.inner.calls.lock().unwrap().push(name.to_string());
    }
}

#[async_trait]
impl HostGateway for MockGateway {
    async fn app_ready(&self) -> Result<(), AppError> {
        self.record("app_ready");
        Ok(())
    }

    async fn user_info(&self) -> Result<UserInfo, AppError> {
        self.record("user_info");
        if *self.inner.user_info_fails.lock().unwrap() {
            return Err(AppError::remote("session expired"));
        }
        Ok(UserInfo {
            identity: self.inner.identity.lock().unwrap().clone(),
        })
    }

    async fn load_settings(&self, bot: AiBot) -> Result<IndexMap<String, String>, AppError> {
        self.record("load_settings");
        if *self.inner.load_fails.lock().unwrap() {
            return Err(AppError::remote("load failed"));
        }
        Ok(self.stored_settings(bot))
    }

    async fn save_settings(
        &self,
        bot: AiBot,
        payload: &IndexMap<String, String>,
    ) -> Result<SaveResponse, AppError> {
        self.record("save_settings");
        if *self.inner.save_fails.lock().unwrap() {
            return Err(AppError::remote("save failed"));
        }
        self.inner
            .settings
            .lock()
            .unwrap()
            .insert(bot.key().to_string(), payload.clone());
        Ok(SaveResponse {
            data: payload.clone(),
            msg: self.inner.save_msg.lock().unwrap().clone(),
        })
    }

    async fn assistant_models(&self) -> Result<IndexMap<String, String>, AppError> {
        self.record("assistant_models");
        Ok(self.inner.assistant_models.lock().unwrap().clone())
    }

    async fn models_list(
        &self,
        _bot: AiBot,
        query: &ModelsQuery,
    ) -> Result<ModelsListResponse, AppError> {
        self.record("models_list");
        *self.inner.last_models_query.lock().unwrap() = Some(query.clone());
        self.inner
            .models_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| AppError::remote("no models response configured"))
    }

    async fn search_ai_user(&self, _bot: AiBot) -> Result<Option<i64>, AppError> {
        self.record("search_ai_user");
        Ok(*self.inner.ai_userid.lock().unwrap())
    }

    async fn open_dialog(&self, userid: i64) -> Result<(), AppError> {
        self.record(&format!("open_dialog:{userid}"));
        Ok(())
    }

    fn intercept_back(&self) -> Result<InterceptGuard, AppError> {
        self.inner.active_intercepts.fetch_add(1, Ordering::SeqCst);
        self.inner.total_intercepts.fetch_add(1, Ordering::SeqCst);
        let active = Arc::clone(&self.inner.active_intercepts);
        Ok(InterceptGuard::new(move || {
            active.fetch_sub(1, Ordering::SeqCst);
        }))
    }
}
