//! セッション状態（表示中のビューと検査履歴）
//!
//! 単方向の状態コンテナ。変更は `SessionAction` を `apply` する以外にない。
//! 履歴は先頭に追加するだけで、既存の要素を書き換えたり削除したりはしない。

use crate::error::Result;
use crate::stats::Statistics;
use crate::types::{InspectionResult, ViewMode};

/// 状態を変える操作
#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    Navigate(ViewMode),
    Record(InspectionResult),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    view: ViewMode,
    history: Vec<InspectionResult>,
}

impl SessionState {
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Navigate(view) => self.view = view,
            SessionAction::Record(result) => self.history.insert(0, result),
        }
    }

    /// 解析結果を反映する
    ///
    /// 成功なら先頭に記録し、失敗ならエラーをそのまま返して履歴には触れない。
    pub fn record_outcome(&mut self, outcome: Result<InspectionResult>) -> Result<()> {
        let result = outcome?;
        self.apply(SessionAction::Record(result));
        Ok(())
    }

    pub fn view(&self) -> ViewMode {
        self.view
    }

    /// 新しい順の履歴
    pub fn history(&self) -> &[InspectionResult] {
        &self.history
    }

    pub fn latest(&self) -> Option<&InspectionResult> {
        self.history.first()
    }

    pub fn statistics(&self) -> Statistics {
        Statistics::from_history(&self.history)
    }
}
