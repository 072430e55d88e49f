//! Background search jobs to keep the UI thread responsive.
//!
//! Each query is tagged with the generation token it was issued under; the
//! main loop applies a response only when its token still matches the latest
//! issued one, so a slow early query can never overwrite the results of a
//! later one.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::core::search::{DocumentHit, DocumentSearcher, SearchError};

use super::state::{AppState, SearchPhase};

pub type SearchReply = (u64, Result<Vec<DocumentHit>, SearchError>);

/// Run one query on a worker thread and send the reply back tagged with its
/// generation.
pub fn spawn_search(
    tx: mpsc::UnboundedSender<SearchReply>,
    generation: u64,
    searcher: Arc<dyn DocumentSearcher>,
    keyword: String,
    limit: usize,
) {
    std::thread::spawn(move || {
        let t0 = std::time::Instant::now();
        let result = searcher.search(&keyword, limit);
        tracing::debug!("search {keyword:?}: {:.2?}", t0.elapsed());
        let _ = tx.send((generation, result));
    });
}

/// Apply one search reply to the modal state. Replies from superseded
/// queries are discarded.
pub fn apply_search_reply(
    state: &mut AppState,
    generation: u64,
    result: Result<Vec<DocumentHit>, SearchError>,
) {
    if generation != state.search.generation {
        return; // stale — a newer query was issued since
    }
    match result {
        Ok(hits) => {
            state.search.results = hits;
            state.search.selected = None;
            state.search.phase = SearchPhase::Loaded;
        }
        Err(err) => {
            state.search.results.clear();
            state.search.selected = None;
            state.search.phase = SearchPhase::Failed(err.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::grid::GridDims;
    use chrono::Local;

    struct NoDocs;

    impl DocumentSearcher for NoDocs {
        fn search(&self, _: &str, _: usize) -> Result<Vec<DocumentHit>, SearchError> {
            Ok(Vec::new())
        }
    }

    fn test_state() -> AppState {
        AppState::new(
            GridDims::default(),
            2,
            false,
            Arc::new(NoDocs),
            10,
            AppConfig::defaults(),
        )
    }

    fn hit(title: &str) -> DocumentHit {
        DocumentHit {
            id: format!("{title}.md"),
            title: title.to_string(),
            workspace: "/".to_string(),
            author: None,
            updated_at: Local::now(),
            path: format!("{title}.md").into(),
        }
    }

    #[test]
    fn stale_reply_is_discarded() {
        let mut state = test_state();
        let first = state.search.issue();
        let second = state.search.issue();

        apply_search_reply(&mut state, first, Ok(vec![hit("old")]));
        assert_eq!(state.search.phase, SearchPhase::Loading);
        assert!(state.search.results.is_empty());

        apply_search_reply(&mut state, second, Ok(vec![hit("new")]));
        assert_eq!(state.search.phase, SearchPhase::Loaded);
        assert_eq!(state.search.results[0].title, "new");
    }

    #[test]
    fn latest_reply_out_of_order_wins() {
        let mut state = test_state();
        let first = state.search.issue();
        let second = state.search.issue();

        // Replies arrive newest-first; the late old reply must not clobber.
        apply_search_reply(&mut state, second, Ok(vec![hit("new")]));
        apply_search_reply(&mut state, first, Ok(vec![hit("old")]));
        assert_eq!(state.search.results.len(), 1);
        assert_eq!(state.search.results[0].title, "new");
    }

    #[test]
    fn failed_reply_surfaces_message() {
        let mut state = test_state();
        let generation = state.search.issue();
        apply_search_reply(
            &mut state,
            generation,
            Err(SearchError::Io(std::io::Error::other("disk on fire"))),
        );
        match &state.search.phase {
            SearchPhase::Failed(msg) => assert!(msg.contains("disk on fire")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
