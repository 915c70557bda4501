//! 模型列表表格状态机
//!
//! Bridges one serialized model-list text value and an interactive,
//! per-cell-editable, reorderable row table. Row identity survives
//! re-parses of unchanged content so the UI never remounts an input that
//! is being typed into, and the last committed text is tracked so the
//! machine ignores echoes of its own emissions.

use crate::models::{parse_model_names, serialize_models, ModelEntry};

/// Opaque stable row identifier, minted per table instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RowId(u64);

/// 可编辑列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelColumn {
    Value,
    Label,
}

/// 一行模型配置
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelRow {
    pub id: RowId,
    pub value: String,
    pub label: String,
}

impl ModelRow {
    fn matches(&self, entry: &ModelEntry) -> bool {
        self.value == entry.value && self.label == entry.label
    }
}

/// 表格状态机
#[derive(Debug)]
pub struct ModelTableState {
    rows: Vec<ModelRow>,
    last_committed_text: String,
    active_cell: Option<(RowId, ModelColumn)>,
    next_id: u64,
}

impl ModelTableState {
    pub fn new(text: &str) -> Self {
        let mut state = Self {
            rows: Vec::new(),
            last_committed_text: text.to_string(),
            active_cell: None,
            next_id: 0,
        };
        state.rows = state.reconcile(text, &[]);
        state
    }

    pub fn rows(&self) -> &[ModelRow] {
        &self.rows
    }

    pub fn active_cell(&self) -> Option<(RowId, ModelColumn)> {
        self.active_cell
    }

    pub fn last_committed_text(&self) -> &str {
        &self.last_committed_text
    }

    fn mint_id(&mut self) -> RowId {
        self.next_id += 1;
        RowId(self.next_id)
    }

    /// 接收外部推送的文本
    ///
    /// An echo of the machine's own last emission is a no-op; anything else
    /// re-parses the text and carries row identities over where possible.
    pub fn receive_text(&mut self, text: &str) {
        if text == self.last_committed_text {
            return;
        }
        let previous = std::mem::take(&mut self.rows);
        self.rows = self.reconcile(text, &previous);
        self.last_committed_text = text.to_string();

        // A focused row that no longer exists cannot keep focus.
        if let Some((row_id, _)) = self.active_cell {
            if !self.rows.iter().any(|row| row.id == row_id) {
                self.active_cell = None;
            }
        }
    }

    /// Rebuild rows from parsed entries, reusing previous identifiers.
    ///
    /// Three passes, each previous id claimed at most once:
    /// 1. positional, only when the row at the same index has equal
    ///    `(value, label)` content (the row did not move);
    /// 2. leftmost unclaimed previous row with equal content (identity
    ///    follows content across reorders);
    /// 3. unclaimed previous row at the same index (an in-place content
    ///    edit keeps its identity).
    /// Anything left over gets a fresh identifier.
    fn reconcile(&mut self, text: &str, previous: &[ModelRow]) -> Vec<ModelRow> {
        let entries: Vec<ModelEntry> = parse_model_names(text).collect();
        let mut claimed = vec![false; previous.len()];
        let mut assigned: Vec<Option<RowId>> = vec![None; entries.len()];

        for (i, entry) in entries.iter().enumerate() {
            if let Some(prev) = previous.get(i) {
                if prev.matches(entry) && !claimed[i] {
                    claimed[i] = true;
                    assigned[i] = Some(prev.id);
                }
            }
        }

        for (i, entry) in entries.iter().enumerate() {
            if assigned[i].is_some() {
                continue;
            }
            if let Some(j) =
                (0..previous.len()).find(|&j| !claimed[j] && previous[j].matches(entry))
            {
                claimed[j] = true;
                assigned[i] = Some(previous[j].id);
            }
        }

        for (i, slot) in assigned.iter_mut().enumerate() {
            if slot.is_none() && i < previous.len() && !claimed[i] {
                claimed[i] = true;
                *slot = Some(previous[i].id);
            }
        }

        entries
            .into_iter()
            .zip(assigned)
            .map(|(entry, id)| ModelRow {
                id: id.unwrap_or_else(|| self.mint_id()),
                value: entry.value,
                label: entry.label,
            })
            .collect()
    }

    fn serialize(&self) -> String {
        serialize_models(
            self.rows
                .iter()
                .map(|row| (row.value.as_str(), row.label.as_str())),
        )
    }

    /// Serialize and, when the text actually changed, record and emit it.
    pub fn commit(&mut self) -> Option<String> {
        let text = self.serialize();
        if text == self.last_committed_text {
            return None;
        }
        self.last_committed_text = text.clone();
        Some(text)
    }

    /// 编辑单元格，不立即对外提交
    ///
    /// Free-text edits commit on blur only, so intermediate keystrokes
    /// never force a reparse that could reset unrelated row identities.
    pub fn edit_cell(&mut self, row_id: RowId, column: ModelColumn, value: impl Into<String>) {
        if let Some(row) = self.rows.iter_mut().find(|row| row.id == row_id) {
            match column {
                ModelColumn::Value => row.value = value.into(),
                ModelColumn::Label => row.label = value.into(),
            }
        }
    }

    pub fn focus_cell(&mut self, row_id: RowId, column: ModelColumn) {
        self.active_cell = Some((row_id, column));
    }

    pub fn blur_cell(&mut self) -> Option<String> {
        self.active_cell = None;
        self.commit()
    }

    /// 新增空行并立即提交
    pub fn add_row(&mut self) -> RowId {
        let id = self.mint_id();
        self.rows.push(ModelRow {
            id,
            value: String::new(),
            label: String::new(),
        });
        // An empty row serializes to nothing, so this is usually a no-op
        // commit; it still normalizes any pending structural state.
        self.commit();
        id
    }

    pub fn remove_row(&mut self, row_id: RowId) -> Option<String> {
        let before = self.rows.len();
        self.rows.retain(|row| row.id != row_id);
        if self.rows.len() == before {
            return None;
        }
        if let Some((active_id, _)) = self.active_cell {
            if active_id == row_id {
                self.active_cell = None;
            }
        }
        self.commit()
    }

    /// 上移/下移一行；越界则不动
    pub fn move_row(&mut self, row_id: RowId, delta: i32) -> Option<String> {
        let index = self.rows.iter().position(|row| row.id == row_id)?;
        let target = index as i64 + delta as i64;
        if target < 0 || target as usize >= self.rows.len() {
            return None;
        }
        let row = self.rows.remove(index);
        self.rows.insert(target as usize, row);
        self.commit()
    }
}
