//! Site session: one loaded page with its search bridge and progress
//! tracker, driven by IPC messages.

use chrono::Utc;
use kepailitan_config::SiteConfig;
use kepailitan_search::Page;
use kepailitan_web::ipc::js_dispatch_message;
use kepailitan_web::{IpcMessage, KeyValueStore, ProgressTracker, QuizResult, SearchBridge};
use serde_json::json;
use tokio::io::{AsyncBufRead, Lines};
use tracing::{debug, info, warn};

pub struct Site<S: KeyValueStore> {
    page: Page,
    bridge: SearchBridge,
    progress: ProgressTracker<S>,
}

impl<S: KeyValueStore> Site<S> {
    pub fn new(mut page: Page, config: &SiteConfig, store: S) -> Self {
        page.set_searchable_tags(&config.search.searchable_tags);
        let mut progress = ProgressTracker::new(store, config.progress.clone());
        let restored = progress.restore().len();
        info!(restored, "progress restored");
        Self {
            page,
            bridge: SearchBridge::new(config.search.clone(), config.bindings.clone()),
            progress,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Scripts to run once the page loads.
    pub fn init_scripts(&self) -> Vec<String> {
        vec![
            self.bridge.bindings_script(),
            kepailitan_web::ipc::IPC_INIT_SCRIPT.trim().to_string(),
        ]
    }

    /// Serve IPC lines until the input closes, passing every outgoing
    /// script to `emit`.
    ///
    /// Pending scrolls run from the same loop, so a message that arrives
    /// before the reveal delay elapses supersedes the scroll it replaces.
    pub async fn serve<R>(
        &mut self,
        mut lines: Lines<R>,
        mut emit: impl FnMut(String),
    ) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
    {
        loop {
            let due = self.bridge.scroll_due();
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line? else { break };
                    for script in self.handle_line(&line) {
                        emit(script);
                    }
                }
                _ = tokio::time::sleep_until(due.unwrap_or_else(tokio::time::Instant::now)), if due.is_some() => {
                    if let Some(script) = self.run_due_scroll() {
                        emit(script);
                    }
                }
            }
        }

        // Input closed: the last scroll still lands.
        if let Some(due) = self.bridge.scroll_due() {
            tokio::time::sleep_until(due).await;
            if let Some(script) = self.run_due_scroll() {
                emit(script);
            }
        }
        Ok(())
    }

    /// Handle one raw IPC line and return the scripts to send back.
    ///
    /// Never waits: a scroll scheduled by a search or navigation runs
    /// later through [`Site::run_due_scroll`].
    pub fn handle_line(&mut self, raw: &str) -> Vec<String> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Vec::new();
        }
        let Some(msg) = IpcMessage::from_json(raw) else {
            warn!("malformed IPC message: {raw}");
            return Vec::new();
        };

        match msg.kind.as_str() {
            "section_visit" => self.visit(&msg).into_iter().collect(),
            "quiz_result" => self.quiz(&msg).into_iter().collect(),
            _ => self
                .bridge
                .handle(&msg, &mut self.page)
                .map(|update| update.to_script())
                .into_iter()
                .collect(),
        }
    }

    /// Run the pending scroll if it is due and report where it landed.
    pub fn run_due_scroll(&mut self) -> Option<String> {
        if !self.bridge.poll(&mut self.page) {
            return None;
        }
        Some(js_dispatch_message(
            "search_scrolled",
            &json!({
                "scroll_top": self.page.scroll_top(),
                "focused": self.page.focused().map(|n| n.0),
            }),
        ))
    }

    fn visit(&mut self, msg: &IpcMessage) -> Option<String> {
        let section = match &msg.payload {
            kepailitan_web::IpcPayload::Text(id) => id.clone(),
            payload => payload.str_field("section")?.to_string(),
        };
        if let Err(e) = self.page.open(&section) {
            debug!(section = %section, "visit of unknown section: {e}");
            return None;
        }
        match self.progress.track(&section) {
            Ok(percent) => Some(js_dispatch_message(
                "progress_update",
                &json!({ "percent": percent, "visited": self.progress.visited() }),
            )),
            Err(e) => {
                warn!(section = %section, "failed to save progress: {e}");
                None
            }
        }
    }

    fn quiz(&mut self, msg: &IpcMessage) -> Option<String> {
        let kepailitan_web::IpcPayload::Json(value) = &msg.payload else {
            return None;
        };
        let score = value.get("score")?.as_u64()?;
        let total = value.get("total")?.as_u64()?;
        let (Ok(score), Ok(total)) = (u32::try_from(score), u32::try_from(total)) else {
            return None;
        };
        let result = QuizResult::new(score, total, Utc::now());
        if let Err(e) = self.progress.save_quiz_result(&result) {
            warn!("failed to save quiz result: {e}");
        }
        Some(js_dispatch_message(
            "quiz_feedback",
            &json!({
                "score": result.score,
                "total": result.total,
                "feedback": result.feedback(),
            }),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kepailitan_web::MemoryStore;
    use tokio::io::{AsyncBufReadExt, BufReader};

    const OUTLINE: &str = r#"{
        "sections": [
            { "id": "beranda", "title": "Beranda", "active": true, "items": [
                { "kind": "block", "tag": "p", "html": "Kreditor separatis adalah..." },
                { "kind": "block", "tag": "p", "html": "Debitor pailit wajib..." }
            ]},
            { "id": "kurator", "title": "Kurator", "items": [
                { "kind": "block", "tag": "p", "html": "Kreditor lain dapat..." }
            ]}
        ]
    }"#;

    fn site_with_delay(reveal_delay_ms: u32) -> Site<MemoryStore> {
        let mut config = SiteConfig::default();
        config.search.reveal_delay_ms = reveal_delay_ms;
        Site::new(Page::from_json(OUTLINE).unwrap(), &config, MemoryStore::new())
    }

    fn site() -> Site<MemoryStore> {
        site_with_delay(0)
    }

    async fn serve(site: &mut Site<MemoryStore>, script: &str) -> Vec<String> {
        let mut out = Vec::new();
        site.serve(BufReader::new(script.as_bytes()).lines(), |s| out.push(s))
            .await
            .unwrap();
        out
    }

    #[test]
    fn search_then_next_scrolls_to_hidden_section() {
        let mut site = site();
        let out = site.handle_line(
            r#"{"kind":"search","payload":{"input":"search-input-desktop","query":"kreditor"}}"#,
        );
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("\"position\":\"1 dari 2\""));
        let scrolled = site.run_due_scroll().unwrap();
        assert!(scrolled.contains("search_scrolled"));
        assert!(scrolled.contains("\"focused\":0"));
        assert!(site.run_due_scroll().is_none());

        let out = site.handle_line(r#"{"kind":"search_next"}"#);
        assert!(out[0].contains("\"position\":\"2 dari 2\""));
        assert!(site.page().is_open("kurator"));
        assert!(!site.page().is_open("beranda"));
    }

    #[test]
    fn handle_line_does_not_wait_for_reveal_delay() {
        let mut site = site_with_delay(5_000);
        let started = std::time::Instant::now();
        let out = site.handle_line(r#"{"kind":"search","payload":"kreditor"}"#);
        assert_eq!(out.len(), 1);
        assert!(started.elapsed() < std::time::Duration::from_millis(1_000));
        assert!(site.run_due_scroll().is_none());
    }

    #[tokio::test]
    async fn newer_search_supersedes_pending_scroll() {
        let mut site = site_with_delay(50);
        let script = concat!(
            r#"{"kind":"search","payload":"kreditor"}"#,
            "\n",
            r#"{"kind":"search","payload":"debitor"}"#,
            "\n",
        );

        let out = serve(&mut site, script).await;

        let scrolled: Vec<&String> = out.iter().filter(|s| s.contains("search_scrolled")).collect();
        assert_eq!(scrolled.len(), 1);
        assert!(scrolled[0].contains("\"focused\":1"));
        assert_eq!(site.page().focused().map(|n| n.0), Some(1));
        assert_eq!(out.len(), 3);
    }

    #[tokio::test]
    async fn search_without_results_cancels_pending_scroll() {
        let mut site = site_with_delay(50);
        let script = concat!(
            r#"{"kind":"search","payload":"kreditor"}"#,
            "\n",
            r#"{"kind":"search","payload":"xyz-not-present"}"#,
            "\n",
        );

        let out = serve(&mut site, script).await;

        assert!(out.iter().all(|s| !s.contains("search_scrolled")));
        assert_eq!(site.page().focused(), None);
    }

    #[test]
    fn blank_and_malformed_lines_produce_nothing() {
        let mut site = site();
        assert!(site.handle_line("   ").is_empty());
        assert!(site.handle_line("{nope").is_empty());
    }

    #[test]
    fn section_visits_track_progress() {
        let mut site = site();
        let out = site.handle_line(r#"{"kind":"section_visit","payload":{"section":"kurator"}}"#);
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("\"percent\":13"));
        assert!(site.page().is_open("kurator"));

        assert!(site
            .handle_line(r#"{"kind":"section_visit","payload":"tidak-ada"}"#)
            .is_empty());
    }

    #[test]
    fn quiz_result_returns_feedback() {
        let mut site = site();
        let out = site.handle_line(r#"{"kind":"quiz_result","payload":{"score":3,"total":5}}"#);
        assert_eq!(out.len(), 1);
        assert!(out[0].contains("Cukup baik!"));
    }

    #[tokio::test]
    async fn demo_session_replays() {
        let mut config = SiteConfig::default();
        config.search.reveal_delay_ms = 0;
        let page = Page::from_json(include_str!("../../../demos/site.json")).unwrap();
        let mut site = Site::new(page, &config, MemoryStore::new());

        let out = serve(&mut site, include_str!("../../../demos/session.jsonl")).await;

        assert!(out.iter().any(|s| s.contains("Ditemukan 4 hasil untuk")));
        assert!(out.iter().any(|s| s.contains("Ditemukan 1 hasil untuk \\\"Rp1.000\\\".")));
        assert!(out.iter().any(|s| s.contains("\"status_kind\":\"too_short\"")));
        assert!(out.iter().any(|s| s.contains("Sangat baik!")));
        assert!(site.page().nodes_with_class("search-highlight-active").is_empty());
    }

    #[test]
    fn init_scripts_bind_inputs_first() {
        let site = site();
        let scripts = site.init_scripts();
        assert!(scripts[0].contains("window.kepailitan.bindings"));
        assert!(scripts[1].contains("window.kepailitan.ipc"));
    }
}
