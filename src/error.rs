use serde_json::Value;
use thiserror::Error;

/// 面板错误类型
///
/// `Validation` is reported before any state mutation or network call,
/// `Remote` carries the best-available message from a failed host request,
/// and the transport/serde variants wrap their sources unchanged.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Message(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Remote(String),

    #[error("HTTP 请求失败: {source}")]
    Http {
        #[from]
        source: reqwest::Error,
    },

    #[error("JSON 解析失败: {source}")]
    Json {
        #[from]
        source: serde_json::Error,
    },
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn remote(message: impl Into<String>) -> Self {
        AppError::Remote(message.into())
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, AppError::Validation(_))
    }

    /// 从错误响应中提取可展示的消息
    ///
    /// Looks for a `msg` field first, then `message`, falling back to the
    /// provided localized default when the payload carries neither.
    pub fn remote_from_payload(payload: Option<&Value>, fallback: &str) -> Self {
        let extracted = payload.and_then(|value| {
            value
                .get("msg")
                .or_else(|| value.get("message"))
                .and_then(|v| v.as_str())
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| s.to_string())
        });
        AppError::Remote(extracted.unwrap_or_else(|| fallback.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn remote_from_payload_prefers_msg_over_message() {
        let payload = json!({ "msg": "quota exceeded", "message": "other" });
        let err = AppError::remote_from_payload(Some(&payload), "加载失败");
        assert_eq!(err.to_string(), "quota exceeded");
    }

    #[test]
    fn remote_from_payload_falls_back_on_blank_fields() {
        let payload = json!({ "msg": "   " });
        let err = AppError::remote_from_payload(Some(&payload), "加载失败");
        assert_eq!(err.to_string(), "加载失败");

        let err = AppError::remote_from_payload(None, "提交失败");
        assert_eq!(err.to_string(), "提交失败");
    }
}
