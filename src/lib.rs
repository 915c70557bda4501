// Core modules
mod bot_config;
mod bots;
mod error;
mod fields;
mod host;
mod models;
mod panel;
mod table;

// i18n module
pub mod i18n;

// Public exports
pub use bot_config::{base_fields, bot_config, generated_fields};
pub use bots::{bot_catalog, AiBot, BotItem};
pub use error::AppError;
pub use fields::{
    merge_fields, BotConfig, ExtraFieldConfig, FieldConfig, FieldControl, GeneratedField,
};
pub use host::{
    HostClient, HostGateway, InterceptGuard, ModelsListData, ModelsListResponse, ModelsQuery,
    SaveResponse, UserInfo,
};
pub use models::{parse_model_names, serialize_models, ModelEntry};
pub use panel::{BotForm, SettingsPanel};
pub use table::{ModelColumn, ModelRow, ModelTableState, RowId};
