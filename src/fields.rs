//! 字段模式合并
//!
//! A generic base schema is combined with per-bot overrides into the
//! concrete, ordered field list shown for one assistant. Field property
//! names are namespaced with the bot key so one flat settings map can hold
//! every assistant's values side by side.

use crate::bots::AiBot;

/// Synthetic sort values start above this base so explicit low `sort`
/// values always win, and unsorted fields keep insertion order.
const UNSORTED_SORT_BASE: u32 = 999_999;

/// 字段控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldControl {
    #[default]
    Text,
    Password,
    Textarea,
    Model,
}

/// 基础字段定义（静态模式数据）
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FieldConfig {
    pub label: String,
    pub prop: String,
    pub control: FieldControl,
    pub placeholder: Option<String>,
    pub maxlength: Option<usize>,
    /// Show the remaining-length hint once usage crosses this ratio
    pub show_word_limit: Option<f32>,
    pub tip: Option<String>,
    pub tip_prefix: Option<String>,
    pub link: Option<String>,
    /// Caption for an inline action button (e.g. fetch default models)
    pub action: Option<String>,
    pub sort: Option<u32>,
}

/// 针对某个助手的字段覆盖
///
/// Keyed by the unprefixed property name; only fields that are `Some`
/// replace the base value. `after` anchors a brand-new field right behind
/// an existing one.
#[derive(Debug, Clone, Default)]
pub struct ExtraFieldConfig {
    pub prop: String,
    pub after: Option<String>,
    pub label: Option<String>,
    pub control: Option<FieldControl>,
    pub placeholder: Option<String>,
    pub maxlength: Option<usize>,
    pub show_word_limit: Option<f32>,
    pub tip: Option<String>,
    pub tip_prefix: Option<String>,
    pub link: Option<String>,
    pub action: Option<String>,
    pub sort: Option<u32>,
}

/// 每个助手的覆盖配置
#[derive(Debug, Clone, Default)]
pub struct BotConfig {
    pub extra_fields: Vec<ExtraFieldConfig>,
}

/// 合并产物：带命名空间前缀的具体字段
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedField {
    /// Namespaced property name, `{bot}_{prop}`
    pub prop: String,
    /// Unprefixed key, used for override matching and UI special-casing
    pub original_prop: String,
    pub label: String,
    pub control: FieldControl,
    pub placeholder: Option<String>,
    pub maxlength: Option<usize>,
    pub show_word_limit: Option<f32>,
    pub tip: Option<String>,
    pub tip_prefix: Option<String>,
    pub link: Option<String>,
    pub action: Option<String>,
    pub sort: Option<u32>,
}

impl GeneratedField {
    fn from_base(field: &FieldConfig, bot: AiBot) -> Self {
        Self {
            prop: bot.prefixed(&field.prop),
            original_prop: field.prop.clone(),
            label: field.label.clone(),
            control: field.control,
            placeholder: field.placeholder.clone(),
            maxlength: field.maxlength,
            show_word_limit: field.show_word_limit,
            tip: field.tip.clone(),
            tip_prefix: field.tip_prefix.clone(),
            link: field.link.clone(),
            action: field.action.clone(),
            sort: field.sort,
        }
    }

    fn from_extra(extra: &ExtraFieldConfig, bot: AiBot) -> Self {
        Self {
            prop: bot.prefixed(&extra.prop),
            original_prop: extra.prop.clone(),
            label: extra.label.clone().unwrap_or_else(|| extra.prop.clone()),
            control: extra.control.unwrap_or_default(),
            placeholder: extra.placeholder.clone(),
            maxlength: extra.maxlength,
            show_word_limit: extra.show_word_limit,
            tip: extra.tip.clone(),
            tip_prefix: extra.tip_prefix.clone(),
            link: extra.link.clone(),
            action: extra.action.clone(),
            sort: extra.sort,
        }
    }

    /// Shallow-merge: only keys the override provides replace existing ones.
    fn apply_override(&mut self, extra: &ExtraFieldConfig) {
        if let Some(label) = &extra.label {
            self.label = label.clone();
        }
        if let Some(control) = extra.control {
            self.control = control;
        }
        if let Some(placeholder) = &extra.placeholder {
            self.placeholder = Some(placeholder.clone());
        }
        if let Some(maxlength) = extra.maxlength {
            self.maxlength = Some(maxlength);
        }
        if let Some(show_word_limit) = extra.show_word_limit {
            self.show_word_limit = Some(show_word_limit);
        }
        if let Some(tip) = &extra.tip {
            self.tip = Some(tip.clone());
        }
        if let Some(tip_prefix) = &extra.tip_prefix {
            self.tip_prefix = Some(tip_prefix.clone());
        }
        if let Some(link) = &extra.link {
            self.link = Some(link.clone());
        }
        if let Some(action) = &extra.action {
            self.action = Some(action.clone());
        }
        if let Some(sort) = extra.sort {
            self.sort = Some(sort);
        }
    }
}

/// 合并基础字段与助手覆盖，生成有序字段列表
///
/// Overrides matching an existing (namespaced) field merge into it in
/// place; new fields splice in after their `after` anchor or append at the
/// end. Fields without an explicit `sort` receive strictly increasing
/// synthetic values above [`UNSORTED_SORT_BASE`], then the whole list is
/// stable-sorted ascending. Identical inputs always yield identical order.
pub fn merge_fields(
    base_fields: &[FieldConfig],
    bot_config: Option<&BotConfig>,
    bot: AiBot,
) -> Vec<GeneratedField> {
    let mut fields: Vec<GeneratedField> = base_fields
        .iter()
        .map(|field| GeneratedField::from_base(field, bot))
        .collect();

    if let Some(config) = bot_config {
        for extra in &config.extra_fields {
            let target_prop = bot.prefixed(&extra.prop);
            if let Some(existing) = fields.iter_mut().find(|field| field.prop == target_prop) {
                existing.apply_override(extra);
                continue;
            }

            let new_field = GeneratedField::from_extra(extra, bot);
            let anchor = extra
                .after
                .as_deref()
                .map(|after| bot.prefixed(after))
                .and_then(|anchor_prop| {
                    fields.iter().position(|field| field.prop == anchor_prop)
                });
            match anchor {
                Some(index) => fields.insert(index + 1, new_field),
                None => fields.push(new_field),
            }
        }
    }

    let mut next_sort = UNSORTED_SORT_BASE;
    for field in &mut fields {
        if field.sort.is_none() {
            next_sort += 1;
            field.sort = Some(next_sort);
        }
    }

    fields.sort_by_key(|field| field.sort.unwrap_or(0));
    fields
}
