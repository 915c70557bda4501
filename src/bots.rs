use serde::{Deserialize, Serialize};

/// 助手类型（封闭枚举，新增助手需同时补充字段覆盖表）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiBot {
    OpenAi,
    Claude,
    DeepSeek,
    Gemini,
    Grok,
    Ollama,
    Zhipu,
    Qianwen,
    Wenxin,
}

impl AiBot {
    pub const ALL: [AiBot; 9] = [
        AiBot::OpenAi,
        AiBot::Claude,
        AiBot::DeepSeek,
        AiBot::Gemini,
        AiBot::Grok,
        AiBot::Ollama,
        AiBot::Zhipu,
        AiBot::Qianwen,
        AiBot::Wenxin,
    ];

    /// Wire key, also used as the per-bot settings namespace prefix
    pub fn key(self) -> &'static str {
        match self {
            AiBot::OpenAi => "openai",
            AiBot::Claude => "claude",
            AiBot::DeepSeek => "deepseek",
            AiBot::Gemini => "gemini",
            AiBot::Grok => "grok",
            AiBot::Ollama => "ollama",
            AiBot::Zhipu => "zhipu",
            AiBot::Qianwen => "qianwen",
            AiBot::Wenxin => "wenxin",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        AiBot::ALL.into_iter().find(|bot| bot.key() == key)
    }

    pub fn display_name(self) -> &'static str {
        match self {
            AiBot::OpenAi => "ChatGPT",
            AiBot::Claude => "Claude",
            AiBot::DeepSeek => "DeepSeek",
            AiBot::Gemini => "Gemini",
            AiBot::Grok => "Grok",
            AiBot::Ollama => "Ollama",
            AiBot::Zhipu => "智谱清言",
            AiBot::Qianwen => "通义千问",
            AiBot::Wenxin => "文心一言",
        }
    }

    /// Namespace a field property with this bot's key, e.g. `openai_models`
    pub fn prefixed(self, prop: &str) -> String {
        format!("{}_{}", self.key(), prop)
    }

    /// Local-network providers need an explicit base URL before
    /// default-model discovery can be attempted.
    pub fn requires_base_url(self) -> bool {
        matches!(self, AiBot::Ollama)
    }
}

impl std::fmt::Display for AiBot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// 助手目录条目
#[derive(Debug, Clone)]
pub struct BotItem {
    pub bot: AiBot,
    pub label: &'static str,
    pub desc: &'static str,
    /// Display labels of all configured models, refreshed from the host
    pub tags: Vec<String>,
    /// Short tag shown on the card, derived from the stored default model
    pub tag_label: Option<String>,
}

impl BotItem {
    fn new(bot: AiBot, desc: &'static str) -> Self {
        Self {
            bot,
            label: bot.display_name(),
            desc,
            tags: Vec::new(),
            tag_label: None,
        }
    }
}

/// 内置助手目录
pub fn bot_catalog() -> Vec<BotItem> {
    vec![
        BotItem::new(
            AiBot::OpenAi,
            "我是一个人工智能助手，为用户提供问题解答和指导。我没有具体的身份，只是一个程序。您有什么问题可以问我哦？",
        ),
        BotItem::new(
            AiBot::Claude,
            "我是 Claude，由 Anthropic 公司创造出来的 AI 助手机器人。我的工作是帮助人类，与人对话并给出解答。",
        ),
        BotItem::new(
            AiBot::DeepSeek,
            "DeepSeek 大语言模型算法是北京深度求索人工智能基础技术研究有限公司推出的深度合成服务算法。",
        ),
        BotItem::new(
            AiBot::Gemini,
            "我是由 Google 开发的生成式人工智能聊天机器人。它基于同名的 Gemini 系列大型语言模型，是应对 ChatGPT 崛起而开发的。",
        ),
        BotItem::new(
            AiBot::Grok,
            "Grok 是由 xAI 开发的生成式人工智能聊天机器人，旨在通过实时回答用户问题来提供帮助。",
        ),
        BotItem::new(
            AiBot::Ollama,
            "Ollama 是一个轻量级、可扩展的框架，旨在让用户能够在本地机器上构建和运行大型语言模型。",
        ),
        BotItem::new(
            AiBot::Zhipu,
            "我是智谱清言，是智谱 AI 公司训练的语言模型。我的任务是针对用户的问题和要求提供适当的答复和支持。",
        ),
        BotItem::new(
            AiBot::Qianwen,
            "我是达摩院自主研发的超大规模语言模型，能够回答问题、创作文字，还能表达观点、撰写代码。",
        ),
        BotItem::new(
            AiBot::Wenxin,
            "我是文心一言，英文名是 ERNIE Bot。我能够与人对话互动，回答问题，协助创作，高效便捷地帮助人们获取信息、知识和灵感。",
        ),
    ]
}
