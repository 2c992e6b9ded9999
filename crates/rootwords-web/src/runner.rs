use rootwords::{
    pack_events, Dictionary, GameEvent, InputEvent, InputQueue, NodeId, RenderSnapshot,
    SelectionController, SessionConfig, WordValidator,
};

/// Wires one session to the host page.
///
/// The page pushes input as it arrives and calls `tick` once per animation
/// frame; every queued event is handled in order before the frame's events
/// and snapshot are read back.
pub struct SessionRunner {
    session: SelectionController<Dictionary>,
    input: InputQueue,
    /// Events from the last tick, kept alive for raw-pointer reads.
    frame_events: Vec<GameEvent>,
    /// Commits accepted over the runner's lifetime.
    accepted: u32,
    /// Commits rejected over the runner's lifetime.
    rejected: u32,
}

impl SessionRunner {
    pub fn new(config: SessionConfig, letters: &str) -> Self {
        Self {
            session: SelectionController::new(config, letters, Dictionary::new()),
            input: InputQueue::new(),
            frame_events: Vec::with_capacity(32),
            accepted: 0,
            rejected: 0,
        }
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Handle all queued input and publish this frame's events.
    pub fn tick(&mut self) {
        for outcome in self.session.process(&self.input) {
            match outcome {
                Ok(_) => self.accepted += 1,
                Err(err) if err.is_player_facing() => self.rejected += 1,
                Err(err) => log::error!("rootwords: {err}"),
            }
        }
        self.input.drain();
        self.frame_events = self.session.drain_events();
    }

    /// Apply a new `letters` attribute. Pending input for the old ring is dropped.
    pub fn reconfigure(&mut self, letters: &str) {
        self.input.drain();
        self.session.reconfigure(letters);
    }

    /// Ingest the word list fetched by the page. Returns the word count, or 0 on error.
    pub fn load_dictionary(&mut self, text: &str) -> u32 {
        match self.session.validator_mut().load(text) {
            Ok(count) => count as u32,
            Err(err) => {
                log::error!("rootwords: {err}");
                0
            }
        }
    }

    pub fn dictionary_ready(&self) -> bool {
        self.session.validator().is_ready()
    }

    pub fn dictionary_url(&self) -> &str {
        &self.session.config().dictionary_url
    }

    /// Render snapshot as JSON. Empty object if serialization fails.
    pub fn snapshot_json(&self) -> String {
        match RenderSnapshot::capture(&self.session).to_json() {
            Ok(json) => json,
            Err(err) => {
                log::error!("rootwords: snapshot failed: {err}");
                "{}".to_string()
            }
        }
    }

    pub fn used_words(&self) -> Vec<String> {
        let mut words: Vec<String> = self.session.used_words().iter().cloned().collect();
        words.sort_unstable();
        words
    }

    /// Words from the dictionary that can be spelled with the current ring letters.
    pub fn hint_words(&self, min_len: usize) -> Vec<String> {
        let letters = self.session.ring().letters();
        self.session
            .validator()
            .words_from_letters(&letters, min_len)
            .into_iter()
            .map(str::to_uppercase)
            .collect()
    }

    pub fn session(&self) -> &SelectionController<Dictionary> {
        &self.session
    }

    // ---- Accessors read by the page via wasm_bindgen exports ----

    pub fn score(&self) -> f64 {
        self.session.score() as f64
    }

    pub fn current_node(&self) -> u32 {
        self.session.current().0
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        pack_events(&self.frame_events).as_ptr()
    }

    pub fn game_events_len(&self) -> u32 {
        self.frame_events.len() as u32
    }

    pub fn accepted(&self) -> u32 {
        self.accepted
    }

    pub fn rejected(&self) -> u32 {
        self.rejected
    }
}

/// Parse the page's config JSON, falling back to defaults on error.
pub fn config_from_json(json: &str) -> SessionConfig {
    if json.trim().is_empty() {
        return SessionConfig::default();
    }
    SessionConfig::from_json(json).unwrap_or_else(|err| {
        log::warn!("rootwords: {err}, using default config");
        SessionConfig::default()
    })
}

/// Convenience for the page: node ids cross the boundary as plain numbers.
pub fn select_node_event(node: u32) -> InputEvent {
    InputEvent::SelectNode { node: NodeId(node) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rootwords::{EVENT_WORD_ACCEPTED, EVENT_WORD_REJECTED};

    fn runner() -> SessionRunner {
        let mut r = SessionRunner::new(SessionConfig::default(), "S,T,O,N,E");
        assert_eq!(r.load_dictionary("stone\nnote\nnotes\none\n"), 4);
        r
    }

    fn push_swipe(r: &mut SessionRunner, indices: &[usize]) {
        let slots = r.session().ring().slots().to_vec();
        for (i, &idx) in indices.iter().enumerate() {
            let p = slots[idx].pos;
            let event = if i == 0 {
                InputEvent::PointerDown { x: p.x, y: p.y }
            } else {
                InputEvent::PointerMove { x: p.x, y: p.y }
            };
            r.push_input(event);
        }
        let last = slots[*indices.last().unwrap()].pos;
        r.push_input(InputEvent::PointerUp { x: last.x, y: last.y });
        r.push_input(InputEvent::ActivateCommit);
    }

    #[test]
    fn tick_processes_queued_swipe() {
        let mut r = runner();
        push_swipe(&mut r, &[3, 2, 1, 4]);
        r.tick();

        assert_eq!(r.accepted(), 1);
        assert_eq!(r.used_words(), vec!["NOTE".to_string()]);
        assert!(r.game_events_len() > 0);
        let floats = pack_events(&r.frame_events);
        assert!(floats.chunks(4).any(|e| e[0] == EVENT_WORD_ACCEPTED));
    }

    #[test]
    fn rejections_are_counted_not_fatal() {
        let mut r = runner();
        push_swipe(&mut r, &[1, 2]);
        r.tick();
        assert_eq!(r.rejected(), 1);
        assert_eq!(r.accepted(), 0);
        assert!(r.frame_events.iter().any(|e| e.kind == EVENT_WORD_REJECTED));
    }

    #[test]
    fn events_last_one_frame() {
        let mut r = runner();
        push_swipe(&mut r, &[2, 3, 4]);
        r.tick();
        assert!(r.game_events_len() > 0);
        r.tick();
        assert_eq!(r.game_events_len(), 0);
    }

    #[test]
    fn dictionary_ready_after_first_load() {
        let mut r = SessionRunner::new(SessionConfig::default(), "STONE");
        assert!(!r.dictionary_ready());
        assert_eq!(r.load_dictionary("stone\n"), 1);
        assert!(r.dictionary_ready());
    }

    #[test]
    fn second_dictionary_load_is_refused() {
        let mut r = runner();
        assert_eq!(r.load_dictionary("other\n"), 0);
        assert!(r.dictionary_ready());
    }

    #[test]
    fn reconfigure_drops_pending_input() {
        let mut r = runner();
        push_swipe(&mut r, &[2, 3, 4]);
        r.reconfigure("cat");
        r.tick();
        assert_eq!(r.accepted(), 0);
        assert!(r.snapshot_json().contains("\"CAT\""));
    }

    #[test]
    fn hint_words_use_ring_letters() {
        let r = runner();
        assert_eq!(r.hint_words(4), vec!["STONE", "NOTE", "NOTES"]);
    }

    #[test]
    fn bad_config_falls_back_to_default() {
        assert_eq!(config_from_json("not json"), SessionConfig::default());
        assert_eq!(config_from_json(""), SessionConfig::default());
        assert_eq!(config_from_json(r#"{"ring_radius": 90}"#).ring_radius, 90.0);
    }
}
