//! 解析セッション（アップロード〜解析〜結果/エラーの状態管理）
//!
//! 状態遷移:
//! - Idle / Ready / Failed → Busy: `begin`（画像が渡された）
//! - Busy → Ready / Failed: `finish`（チケットが現在のものと一致する場合のみ）
//! - 任意 → Idle: `retry`（フィルタ保持）/ `reset`（フィルタもクリア）/ `cancel`（Busyのみ）
//!
//! Busy中の新規アップロードは拒否する。取消・リトライ後に届いた古い結果は
//! チケット番号で判別して捨てる。

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::filters::DietaryFilterSet;
use crate::types::{AnalysisResult, DietaryType, LabelImage};

/// 解析1回ごとに発行する番号
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

impl Ticket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// セッションの状態
#[derive(Debug, Clone, PartialEq)]
pub enum Phase {
    Idle,
    Busy(Ticket),
    Ready(AnalysisResult),
    Failed(String),
}

/// 画面向けのスナップショット（uploading/analyzing は常に同値）
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadState {
    pub is_uploading: bool,
    pub is_analyzing: bool,
    pub has_result: bool,
    pub error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AnalysisSession {
    phase: Phase,
    filters: DietaryFilterSet,
    last_ticket: u64,
}

impl Default for AnalysisSession {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            filters: DietaryFilterSet::new(),
            last_ticket: 0,
        }
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, Phase::Busy(_))
    }

    pub fn upload_state(&self) -> UploadState {
        let busy = self.is_busy();
        UploadState {
            is_uploading: busy,
            is_analyzing: busy,
            has_result: matches!(self.phase, Phase::Ready(_)),
            error: self.error().map(str::to_string),
        }
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        match &self.phase {
            Phase::Ready(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.phase {
            Phase::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// 解析開始
    pub fn begin(&mut self, image: &LabelImage) -> Result<Ticket> {
        if self.is_busy() {
            return Err(Error::Busy);
        }
        if !image.is_image() {
            return Err(Error::NotAnImage(image.mime_type.clone()));
        }

        self.last_ticket += 1;
        let ticket = Ticket(self.last_ticket);
        debug!(file = %image.file_name, ticket = ticket.id(), "analysis started");
        self.phase = Phase::Busy(ticket);
        Ok(ticket)
    }

    /// 解析完了（結果を反映した場合 true）
    pub fn finish(&mut self, ticket: Ticket, outcome: Result<AnalysisResult>) -> bool {
        if self.phase != Phase::Busy(ticket) {
            warn!(ticket = ticket.id(), "ignoring stale analysis outcome");
            return false;
        }

        self.phase = match outcome {
            Ok(result) => {
                debug!(ticket = ticket.id(), rating = %result.overall_rating, "analysis succeeded");
                Phase::Ready(result)
            }
            Err(err) => {
                debug!(ticket = ticket.id(), error = %err, "analysis failed");
                Phase::Failed(err.to_string())
            }
        };
        true
    }

    /// 進行中の解析を取り消して Idle に戻す
    pub fn cancel(&mut self) -> bool {
        if let Phase::Busy(ticket) = self.phase {
            debug!(ticket = ticket.id(), "analysis cancelled");
            self.phase = Phase::Idle;
            true
        } else {
            false
        }
    }

    /// エラー後の再試行（フィルタは保持）
    pub fn retry(&mut self) {
        debug!("retry requested");
        self.phase = Phase::Idle;
    }

    /// 新しい製品を解析（フィルタもクリア）
    pub fn reset(&mut self) {
        debug!("session reset");
        self.phase = Phase::Idle;
        self.filters.clear();
    }

    pub fn filters(&self) -> &DietaryFilterSet {
        &self.filters
    }

    pub fn toggle_filter(&mut self, diet: DietaryType) {
        self.filters.toggle(diet);
    }

    pub fn replace_filters(&mut self, filters: DietaryFilterSet) {
        self.filters = filters;
    }

    /// 表示する対応状況の行（結果がなければ空）
    pub fn visible_compatibility(&self) -> Vec<(DietaryType, bool)> {
        self.result()
            .map(|r| self.filters.project(&r.dietary_compatibility))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FAILURE_MESSAGE;
    use crate::fixtures::fixtures;

    fn label() -> LabelImage {
        LabelImage::new("label.png", "image/png", 4096)
    }

    fn state(uploading: bool, has_result: bool, error: Option<&str>) -> UploadState {
        UploadState {
            is_uploading: uploading,
            is_analyzing: uploading,
            has_result,
            error: error.map(str::to_string),
        }
    }

    fn failure() -> Error {
        Error::AnalysisFailed(FAILURE_MESSAGE.to_string())
    }

    #[test]
    fn test_initial_state_is_idle() {
        let session = AnalysisSession::new();
        assert_eq!(session.phase(), &Phase::Idle);
        assert_eq!(session.upload_state(), UploadState::default());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_upload_sets_busy() {
        let mut session = AnalysisSession::new();
        session.begin(&label()).unwrap();
        assert_eq!(session.upload_state(), state(true, false, None));
    }

    #[test]
    fn test_resolve_sets_result() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&label()).unwrap();
        assert!(session.finish(ticket, Ok(fixtures()[1].clone())));

        assert_eq!(session.upload_state(), state(false, true, None));
        assert_eq!(session.result(), Some(&fixtures()[1]));
    }

    #[test]
    fn test_reject_sets_error() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&label()).unwrap();
        assert!(session.finish(ticket, Err(failure())));

        assert_eq!(session.upload_state(), state(false, false, Some(FAILURE_MESSAGE)));
        assert!(session.result().is_none());
    }

    #[test]
    fn test_retry_from_error_returns_idle() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&label()).unwrap();
        session.finish(ticket, Err(Error::Timeout(15000)));

        session.retry();
        assert_eq!(session.upload_state(), UploadState::default());
        assert!(session.result().is_none());
    }

    #[test]
    fn test_retry_keeps_filters() {
        let mut session = AnalysisSession::new();
        session.toggle_filter(DietaryType::Keto);
        session.retry();
        assert!(session.filters().contains(DietaryType::Keto));
    }

    #[test]
    fn test_reset_from_result_clears_everything() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&label()).unwrap();
        session.finish(ticket, Ok(fixtures()[0].clone()));
        session.toggle_filter(DietaryType::Vegan);
        session.toggle_filter(DietaryType::DairyFree);

        session.reset();
        assert_eq!(session.upload_state(), UploadState::default());
        assert!(session.result().is_none());
        assert!(session.filters().is_empty());
    }

    #[test]
    fn test_upload_while_busy_is_rejected() {
        let mut session = AnalysisSession::new();
        let first = session.begin(&label()).unwrap();
        assert!(matches!(session.begin(&label()), Err(Error::Busy)));
        assert_eq!(session.phase(), &Phase::Busy(first));
    }

    #[test]
    fn test_non_image_is_rejected_without_state_change() {
        let mut session = AnalysisSession::new();
        let pdf = LabelImage::new("label.pdf", "application/pdf", 100);
        assert!(matches!(session.begin(&pdf), Err(Error::NotAnImage(_))));
        assert_eq!(session.phase(), &Phase::Idle);
    }

    #[test]
    fn test_stale_outcome_after_cancel_is_ignored() {
        let mut session = AnalysisSession::new();
        let stale = session.begin(&label()).unwrap();
        assert!(session.cancel());

        let current = session.begin(&label()).unwrap();
        assert_ne!(stale, current);
        assert!(!session.finish(stale, Ok(fixtures()[2].clone())));
        assert_eq!(session.phase(), &Phase::Busy(current));

        assert!(session.finish(current, Err(failure())));
        assert_eq!(session.error(), Some(FAILURE_MESSAGE));
    }

    #[test]
    fn test_outcome_after_reset_is_ignored() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&label()).unwrap();
        session.reset();
        assert!(!session.finish(ticket, Ok(fixtures()[0].clone())));
        assert_eq!(session.phase(), &Phase::Idle);
    }

    #[test]
    fn test_cancel_when_not_busy_is_noop() {
        let mut session = AnalysisSession::new();
        assert!(!session.cancel());
    }

    #[test]
    fn test_begin_from_result_discards_previous_result() {
        let mut session = AnalysisSession::new();
        let ticket = session.begin(&label()).unwrap();
        session.finish(ticket, Ok(fixtures()[0].clone()));

        session.begin(&label()).unwrap();
        assert!(session.result().is_none());
        assert!(session.is_busy());
    }

    #[test]
    fn test_visible_compatibility_follows_filters() {
        let mut session = AnalysisSession::new();
        assert!(session.visible_compatibility().is_empty());

        let ticket = session.begin(&label()).unwrap();
        session.finish(ticket, Ok(fixtures()[1].clone()));
        assert_eq!(session.visible_compatibility().len(), 7);

        session.toggle_filter(DietaryType::NutFree);
        assert_eq!(session.visible_compatibility(), vec![(DietaryType::NutFree, false)]);
    }

    #[test]
    fn test_upload_state_serializes_camel_case() {
        let json = serde_json::to_string(&UploadState::default()).unwrap();
        assert_eq!(
            json,
            r#"{"isUploading":false,"isAnalyzing":false,"hasResult":false,"error":null}"#
        );
    }
}
