//! 助手字段配置表
//!
//! The generic base schema plus the per-assistant overrides, mirroring the
//! host's settings storage keys. Built fresh on demand; the merged output
//! is owned by the caller and never mutated in place.

use crate::bots::AiBot;
use crate::fields::{merge_fields, BotConfig, ExtraFieldConfig, FieldConfig, FieldControl, GeneratedField};

/// 通用基础字段
pub fn base_fields() -> Vec<FieldConfig> {
    vec![
        FieldConfig {
            label: "API Key".to_string(),
            prop: "key".to_string(),
            control: FieldControl::Password,
            ..Default::default()
        },
        FieldConfig {
            label: "模型列表".to_string(),
            prop: "models".to_string(),
            control: FieldControl::Textarea,
            maxlength: Some(1000),
            show_word_limit: Some(0.9),
            placeholder: Some("一行一个模型名称".to_string()),
            action: Some("使用默认模型列表".to_string()),
            ..Default::default()
        },
        FieldConfig {
            label: "默认模型".to_string(),
            prop: "model".to_string(),
            control: FieldControl::Model,
            placeholder: Some("请选择默认模型".to_string()),
            tip: Some("可选数据来自模型列表".to_string()),
            ..Default::default()
        },
        FieldConfig {
            label: "Base URL".to_string(),
            prop: "base_url".to_string(),
            placeholder: Some("Enter base URL...".to_string()),
            tip: Some("API请求的基础URL路径，如果没有请留空".to_string()),
            ..Default::default()
        },
        FieldConfig {
            label: "使用代理".to_string(),
            prop: "agency".to_string(),
            placeholder: Some("支持 http 或 socks 代理".to_string()),
            tip: Some("例如：http://proxy.com 或 socks5://proxy.com".to_string()),
            ..Default::default()
        },
        FieldConfig {
            label: "Temperature".to_string(),
            prop: "temperature".to_string(),
            placeholder: Some("模型温度，低则保守，高则多样".to_string()),
            tip: Some("例如：0.7，范围：0-1，默认：0.7".to_string()),
            ..Default::default()
        },
        FieldConfig {
            label: "默认提示词".to_string(),
            prop: "system".to_string(),
            control: FieldControl::Textarea,
            maxlength: Some(20000),
            show_word_limit: Some(0.9),
            placeholder: Some("请输入默认提示词".to_string()),
            tip: Some("例如：你是一个人开发的AI助手".to_string()),
            ..Default::default()
        },
    ]
}

fn key_override(placeholder: &str, link: &str) -> ExtraFieldConfig {
    ExtraFieldConfig {
        prop: "key".to_string(),
        placeholder: Some(placeholder.to_string()),
        link: Some(link.to_string()),
        ..Default::default()
    }
}

fn models_link(link: &str) -> ExtraFieldConfig {
    ExtraFieldConfig {
        prop: "models".to_string(),
        link: Some(link.to_string()),
        ..Default::default()
    }
}

/// 单个助手的字段覆盖
pub fn bot_config(bot: AiBot) -> BotConfig {
    let extra_fields = match bot {
        AiBot::OpenAi => vec![
            key_override(
                "OpenAI API Key",
                "https://platform.openai.com/account/api-keys",
            ),
            models_link("https://platform.openai.com/docs/models"),
        ],
        AiBot::Claude => vec![
            key_override(
                "Claude API Key",
                "https://docs.anthropic.com/en/api/getting-started",
            ),
            models_link("https://docs.anthropic.com/en/docs/about-claude/models"),
        ],
        AiBot::DeepSeek => vec![
            key_override("DeepSeek API Key", "https://platform.deepseek.com/api_keys"),
            models_link("https://api-docs.deepseek.com/zh-cn/quick_start/pricing"),
        ],
        AiBot::Gemini => vec![
            key_override("Gemini API Key", "https://makersuite.google.com/app/apikey"),
            models_link("https://ai.google.dev/models/gemini"),
            ExtraFieldConfig {
                prop: "agency".to_string(),
                placeholder: Some("仅支持 http 代理".to_string()),
                tip: Some("例如：http://proxy.com".to_string()),
                ..Default::default()
            },
        ],
        AiBot::Grok => vec![
            key_override("Grok API Key", "https://docs.x.ai/docs/tutorial"),
            models_link("https://docs.x.ai/docs/models"),
        ],
        AiBot::Ollama => vec![
            ExtraFieldConfig {
                prop: "base_url".to_string(),
                placeholder: Some("http://localhost:11434".to_string()),
                tip: Some("例如：http://localhost:11434".to_string()),
                ..Default::default()
            },
            ExtraFieldConfig {
                prop: "models".to_string(),
                tip: Some("点击下方按钮可获取默认模型列表".to_string()),
                ..Default::default()
            },
        ],
        AiBot::Zhipu => vec![
            key_override(
                "智谱 API Key",
                "https://open.bigmodel.cn/usercenter/apikeys",
            ),
            models_link("https://open.bigmodel.cn/dev/api"),
        ],
        AiBot::Qianwen => vec![
            key_override("通义千问 API Key", "https://bailian.console.aliyun.com/"),
            models_link("https://help.aliyun.com/zh/dashscope/developer-reference/the-models"),
        ],
        AiBot::Wenxin => vec![
            key_override(
                "文心一言 API Key",
                "https://console.bce.baidu.com/ai/#/ai/wenxinworkshop/overview/index",
            ),
            models_link("https://cloud.baidu.com/doc/WENXINWORKSHOP/s/Nlks5zkzu"),
        ],
    };

    BotConfig { extra_fields }
}

/// 生成某个助手的完整字段列表
pub fn generated_fields(bot: AiBot) -> Vec<GeneratedField> {
    merge_fields(&base_fields(), Some(&bot_config(bot)), bot)
}
