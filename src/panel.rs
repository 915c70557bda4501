//! 设置面板编排
//!
//! Per-bot load/save/reset/reload workflows, change detection, default
//! model discovery, chat launch, and the admin edit-session lifecycle
//! (including the single back-navigation interceptor registration). All
//! operations run on the host UI event loop; network calls suspend only
//! their own workflow. There is no mutual exclusion against re-entrant
//! calls: the per-bot busy flags exist so callers can disable triggers.

use indexmap::IndexMap;

use crate::bot_config::generated_fields;
use crate::bots::{bot_catalog, AiBot, BotItem};
use crate::error::AppError;
use crate::fields::GeneratedField;
use crate::host::{HostGateway, InterceptGuard, ModelsQuery};
use crate::i18n::texts;
use crate::models::parse_model_names;

/// 单个助手的表单状态
#[derive(Debug, Clone, Default)]
pub struct BotForm {
    values: IndexMap<String, String>,
    baseline: IndexMap<String, String>,
    loaded: bool,
    pub loading: bool,
    pub saving: bool,
    pub fetching_defaults: bool,
    pub chat_loading: bool,
}

impl BotForm {
    pub fn value(&self, prop: &str) -> &str {
        self.values.get(prop).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &IndexMap<String, String> {
        &self.values
    }

    pub fn baseline(&self) -> &IndexMap<String, String> {
        &self.baseline
    }

    /// True iff any property present in either map differs between the
    /// two, with missing entries treated as empty strings.
    pub fn has_changes(&self) -> bool {
        self.values
            .keys()
            .chain(self.baseline.keys())
            .any(|key| {
                self.values.get(key).map(String::as_str).unwrap_or("")
                    != self.baseline.get(key).map(String::as_str).unwrap_or("")
            })
    }
}

/// 设置面板
pub struct SettingsPanel<G: HostGateway> {
    gateway: G,
    bots: Vec<BotItem>,
    forms: IndexMap<AiBot, BotForm>,
    is_admin: bool,
    settings_open: bool,
    active_bot: AiBot,
    intercept: Option<InterceptGuard>,
}

impl<G: HostGateway> SettingsPanel<G> {
    pub fn new(gateway: G) -> Self {
        let forms = AiBot::ALL
            .into_iter()
            .map(|bot| (bot, BotForm::default()))
            .collect();
        Self {
            gateway,
            bots: bot_catalog(),
            forms,
            is_admin: false,
            settings_open: false,
            active_bot: AiBot::OpenAi,
            intercept: None,
        }
    }

    pub fn bots(&self) -> &[BotItem] {
        &self.bots
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn active_bot(&self) -> AiBot {
        self.active_bot
    }

    pub fn form(&self, bot: AiBot) -> &BotForm {
        &self.forms[&bot]
    }

    fn form_mut(&mut self, bot: AiBot) -> &mut BotForm {
        self.forms.entry(bot).or_default()
    }

    /// 面板字段列表（每个助手的具体字段）
    pub fn fields(&self, bot: AiBot) -> Vec<GeneratedField> {
        generated_fields(bot)
    }

    /// 初始化：就绪信号、管理员身份、标签缓存
    ///
    /// Every step is best effort; failures are logged and the panel
    /// proceeds with safe defaults (non-admin, no tags).
    pub async fn init(&mut self) {
        if let Err(err) = self.gateway.app_ready().await {
            log::debug!("host readiness signal failed: {err}");
        }

        match self.gateway.user_info().await {
            Ok(user) => self.is_admin = user.is_admin(),
            Err(err) => log::warn!("cannot determine admin state, defaulting to non-admin: {err}"),
        }

        self.refresh_bot_tags().await;
    }

    /// 刷新助手卡片上的模型标签
    ///
    /// Pulls `{bot}_models` / `{bot}_model` from the host catalog and
    /// recomputes each bot's tag list and short tag label. Best effort.
    pub async fn refresh_bot_tags(&mut self) {
        let catalog = match self.gateway.assistant_models().await {
            Ok(catalog) => catalog,
            Err(err) => {
                log::warn!("failed to fetch assistant model catalog: {err}");
                return;
            }
        };

        for item in &mut self.bots {
            let models_raw = catalog
                .get(&item.bot.prefixed("models"))
                .map(String::as_str)
                .unwrap_or("");
            let default_model = catalog
                .get(&item.bot.prefixed("model"))
                .map(String::as_str)
                .unwrap_or("");

            let options: Vec<_> = parse_model_names(models_raw).collect();
            let tag_label = options
                .iter()
                .find(|option| option.value == default_model)
                .map(|option| option.label.clone())
                .or_else(|| {
                    if default_model.is_empty() {
                        None
                    } else {
                        Some(default_model.to_string())
                    }
                })
                .or_else(|| options.first().map(|option| option.label.clone()));

            item.tags = options.into_iter().map(|option| option.label).collect();
            item.tag_label = tag_label;
        }
    }

    /// 打开配置抽屉（仅管理员）
    ///
    /// Acquires the back-navigation interceptor for the edit session and
    /// triggers a non-forced load of the selected bot.
    pub async fn open_settings(&mut self, bot: AiBot) -> Result<(), AppError> {
        if !self.is_admin {
            return Err(AppError::validation(texts::admin_only()));
        }
        self.active_bot = bot;
        self.settings_open = true;
        self.ensure_intercept();
        self.load(bot, false).await
    }

    /// 关闭配置抽屉，释放返回拦截
    pub fn close_settings(&mut self) {
        self.settings_open = false;
        self.intercept = None;
    }

    /// 宿主返回手势：抽屉打开时消费手势并关闭抽屉
    pub fn handle_back(&mut self) -> bool {
        if self.settings_open {
            self.close_settings();
            return true;
        }
        false
    }

    /// 切换助手标签页
    pub async fn set_active_bot(&mut self, bot: AiBot) -> Result<(), AppError> {
        self.active_bot = bot;
        self.load(bot, false).await
    }

    fn ensure_intercept(&mut self) {
        if self.intercept.is_some() {
            return;
        }
        match self.gateway.intercept_back() {
            Ok(guard) => self.intercept = Some(guard),
            Err(err) => log::warn!("failed to register back interceptor: {err}"),
        }
    }

    pub fn has_intercept(&self) -> bool {
        self.intercept.is_some()
    }

    /// 加载助手设置
    ///
    /// No-op when already loaded unless `force`; on failure the cached
    /// values stay untouched.
    pub async fn load(&mut self, bot: AiBot, force: bool) -> Result<(), AppError> {
        if !force && self.form(bot).loaded {
            return Ok(());
        }
        self.form_mut(bot).loading = true;
        let result = self.gateway.load_settings(bot).await;
        let form = self.form_mut(bot);
        form.loading = false;

        let payload = result?;
        form.values = payload.clone();
        form.baseline = payload;
        form.loaded = true;
        Ok(())
    }

    pub async fn reload(&mut self, bot: AiBot) -> Result<(), AppError> {
        self.load(bot, true).await
    }

    /// 修改字段值（不影响基线）
    pub fn change_field(&mut self, bot: AiBot, prop: &str, value: impl Into<String>) {
        self.form_mut(bot)
            .values
            .insert(prop.to_string(), value.into());
    }

    pub fn has_changes(&self, bot: AiBot) -> bool {
        self.form(bot).has_changes()
    }

    /// 重置为最近一次从服务端加载的值
    pub fn reset(&mut self, bot: AiBot) {
        let form = self.form_mut(bot);
        form.values = form.baseline.clone();
    }

    /// 提交助手设置
    ///
    /// Only the properties of the bot's generated field list are sent,
    /// missing values as empty strings. On success the baseline and
    /// current values both take the server-returned canonical values and
    /// the tag cache is refreshed; on failure nothing changes.
    pub async fn submit(&mut self, bot: AiBot) -> Result<String, AppError> {
        let fields = generated_fields(bot);
        if fields.is_empty() {
            return Err(AppError::validation(texts::bot_unsupported()));
        }

        let form = self.form(bot);
        let payload: IndexMap<String, String> = fields
            .iter()
            .map(|field| (field.prop.clone(), form.value(&field.prop).to_string()))
            .collect();

        self.form_mut(bot).saving = true;
        let result = self.gateway.save_settings(bot, &payload).await;
        self.form_mut(bot).saving = false;

        let response = result?;
        let form = self.form_mut(bot);
        form.values = response.data.clone();
        form.baseline = response.data;
        form.loaded = true;

        self.refresh_bot_tags().await;
        Ok(response
            .msg
            .filter(|msg| !msg.trim().is_empty())
            .unwrap_or_else(|| texts::save_success().to_string()))
    }

    /// 获取提供方的默认模型列表
    ///
    /// Builds the discovery query from the bot's base URL/key/proxy fields
    /// where the provider requires them, and returns the newline-joined
    /// list. Stored form state is not mutated; the caller decides where to
    /// apply the result.
    pub async fn fetch_default_models(&mut self, bot: AiBot) -> Result<String, AppError> {
        let mut query = ModelsQuery::default();
        if bot.requires_base_url() {
            let form = self.form(bot);
            let base_url = form.value(&bot.prefixed("base_url")).trim().to_string();
            if base_url.is_empty() {
                return Err(AppError::validation(texts::base_url_required()));
            }
            query.base_url = Some(base_url);
            let key = form.value(&bot.prefixed("key")).trim();
            if !key.is_empty() {
                query.key = Some(key.to_string());
            }
            let agency = form.value(&bot.prefixed("agency")).trim();
            if !agency.is_empty() {
                query.agency = Some(agency.to_string());
            }
        }

        self.form_mut(bot).fetching_defaults = true;
        let result = self.gateway.models_list(bot, &query).await;
        self.form_mut(bot).fetching_defaults = false;

        let response = result?;
        if response.code != 200 {
            let message = response
                .error
                .filter(|error| !error.trim().is_empty())
                .unwrap_or_else(|| texts::fetch_failed().to_string());
            return Err(AppError::remote(message));
        }

        let models = response.data.map(|data| data.models).unwrap_or_default();
        if models.is_empty() {
            return Err(AppError::remote(texts::models_not_found()));
        }
        Ok(models.join("\n"))
    }

    /// 发起与助手的会话
    pub async fn start_chat(&mut self, bot: AiBot) -> Result<(), AppError> {
        self.form_mut(bot).chat_loading = true;
        let result = self.start_chat_inner(bot).await;
        self.form_mut(bot).chat_loading = false;
        result
    }

    async fn start_chat_inner(&self, bot: AiBot) -> Result<(), AppError> {
        let userid = self
            .gateway
            .search_ai_user(bot)
            .await?
            .ok_or_else(|| AppError::remote(texts::bot_not_found()))?;
        self.gateway.open_dialog(userid).await
    }
}
