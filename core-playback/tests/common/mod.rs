//! Scripted host fakes shared by the playback integration tests.
//!
//! Nothing here fires on its own: tests drive every host event explicitly
//! (`fire`, `fire_window`, `finish_script`), which makes the event-loop
//! interleavings deterministic.

#![allow(dead_code)]

use bridge_traits::{
    error::Result as BridgeResult, BridgeError, CanPlayType, EmbedRequest, HostEnvironment,
    MediaElement, MediaEvent, MediaListener, OneShotListener, PluginHost, ScriptRequest, SoundId,
};
use core_playback::{CallbackKind, SoundOptions};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

// ============================================================================
// Media element
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MediaCommand {
    Load,
    Play,
    Pause,
    Seek(f64),
}

enum Entry {
    Persistent(MediaListener),
    Once(OneShotListener),
}

pub struct FakeMediaElement {
    pub url: String,
    listeners: RefCell<Vec<(MediaEvent, Entry)>>,
    commands: RefCell<Vec<MediaCommand>>,
    listeners_at_load: Cell<usize>,
    position: Cell<f64>,
    playing: Cell<bool>,
}

impl FakeMediaElement {
    pub fn new(url: &str) -> Rc<Self> {
        Rc::new(Self {
            url: url.to_string(),
            listeners: RefCell::new(Vec::new()),
            commands: RefCell::new(Vec::new()),
            listeners_at_load: Cell::new(0),
            position: Cell::new(0.0),
            playing: Cell::new(false),
        })
    }

    /// Deliver `event` to matching listeners in registration order.
    pub fn fire(&self, event: MediaEvent) {
        let entries = std::mem::take(&mut *self.listeners.borrow_mut());
        let mut kept = Vec::with_capacity(entries.len());

        for (registered, entry) in entries {
            match entry {
                Entry::Persistent(mut listener) => {
                    if registered == event {
                        listener();
                    }
                    kept.push((registered, Entry::Persistent(listener)));
                }
                Entry::Once(listener) => {
                    if registered == event {
                        listener();
                    } else {
                        kept.push((registered, Entry::Once(listener)));
                    }
                }
            }
        }

        let mut listeners = self.listeners.borrow_mut();
        let added = std::mem::take(&mut *listeners);
        *listeners = kept;
        listeners.extend(added);
    }

    /// Simulate playback progress.
    pub fn advance(&self, seconds: f64) {
        if self.playing.get() {
            self.position.set(self.position.get() + seconds);
        }
    }

    pub fn commands(&self) -> Vec<MediaCommand> {
        self.commands.borrow().clone()
    }

    pub fn count(&self, command: MediaCommand) -> usize {
        self.commands
            .borrow()
            .iter()
            .filter(|c| **c == command)
            .count()
    }

    pub fn listener_count(&self, event: MediaEvent) -> usize {
        self.listeners
            .borrow()
            .iter()
            .filter(|(registered, _)| *registered == event)
            .count()
    }

    pub fn listeners_at_load(&self) -> usize {
        self.listeners_at_load.get()
    }

    pub fn is_playing(&self) -> bool {
        self.playing.get()
    }
}

impl MediaElement for FakeMediaElement {
    fn add_listener(&self, event: MediaEvent, listener: MediaListener) {
        self.listeners
            .borrow_mut()
            .push((event, Entry::Persistent(listener)));
    }

    fn add_one_shot_listener(&self, event: MediaEvent, listener: OneShotListener) {
        self.listeners.borrow_mut().push((event, Entry::Once(listener)));
    }

    fn load(&self) {
        self.listeners_at_load.set(self.listeners.borrow().len());
        self.commands.borrow_mut().push(MediaCommand::Load);
    }

    fn play(&self) {
        self.playing.set(true);
        self.commands.borrow_mut().push(MediaCommand::Play);
    }

    fn pause(&self) {
        self.playing.set(false);
        self.commands.borrow_mut().push(MediaCommand::Pause);
    }

    fn current_time(&self) -> f64 {
        self.position.get()
    }

    fn set_current_time(&self, seconds: f64) {
        self.position.set(seconds);
        self.commands.borrow_mut().push(MediaCommand::Seek(seconds));
    }
}

// ============================================================================
// Plugin host
// ============================================================================

#[derive(Default)]
pub struct RecordingPluginHost {
    pub played: RefCell<Vec<(String, SoundId)>>,
    pub pauses: Cell<usize>,
    pub stops: Cell<usize>,
    pub time: Cell<f64>,
}

impl RecordingPluginHost {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn play_count(&self) -> usize {
        self.played.borrow().len()
    }
}

impl PluginHost for RecordingPluginHost {
    fn play_track(&self, url: &str, uid: SoundId) {
        self.played.borrow_mut().push((url.to_string(), uid));
    }

    fn pause_track(&self) {
        self.pauses.set(self.pauses.get() + 1);
    }

    fn stop_track(&self) {
        self.stops.set(self.stops.get() + 1);
    }

    fn get_time(&self) -> f64 {
        self.time.get()
    }
}

// ============================================================================
// Host environment
// ============================================================================

pub struct FakeHost {
    has_document: bool,
    can_play: Option<CanPlayType>,
    fail_media: Cell<bool>,
    fail_embed: Cell<bool>,
    elements: RefCell<Vec<Rc<FakeMediaElement>>>,
    plugin_hosts: RefCell<HashMap<String, Rc<dyn PluginHost>>>,
    host_on_embed: RefCell<Option<Rc<dyn PluginHost>>>,
    window_listeners: RefCell<Vec<(MediaEvent, OneShotListener)>>,
    pending_script: RefCell<Option<OneShotListener>>,
    pub scripts: RefCell<Vec<ScriptRequest>>,
    pub embeds: RefCell<Vec<EmbedRequest>>,
}

impl FakeHost {
    fn build(has_document: bool, can_play: Option<CanPlayType>) -> Rc<Self> {
        Rc::new(Self {
            has_document,
            can_play,
            fail_media: Cell::new(false),
            fail_embed: Cell::new(false),
            elements: RefCell::new(Vec::new()),
            plugin_hosts: RefCell::new(HashMap::new()),
            host_on_embed: RefCell::new(None),
            window_listeners: RefCell::new(Vec::new()),
            pending_script: RefCell::new(None),
            scripts: RefCell::new(Vec::new()),
            embeds: RefCell::new(Vec::new()),
        })
    }

    /// Host with native `audio/mpeg` support.
    pub fn streaming() -> Rc<Self> {
        Self::build(true, Some(CanPlayType::Probably))
    }

    /// Host whose canPlayType answers with `answer`.
    pub fn with_can_play(answer: Option<CanPlayType>) -> Rc<Self> {
        Self::build(true, answer)
    }

    /// Host without native support, forcing the plugin backend.
    pub fn plugin() -> Rc<Self> {
        Self::build(true, Some(CanPlayType::No))
    }

    pub fn without_document() -> Rc<Self> {
        Self::build(false, None)
    }

    pub fn fail_media(&self) {
        self.fail_media.set(true);
    }

    pub fn fail_embed(&self) {
        self.fail_embed.set(true);
    }

    /// Make `host` findable under `element_id` right away.
    pub fn install_plugin_host(&self, element_id: &str, host: Rc<dyn PluginHost>) {
        self.plugin_hosts
            .borrow_mut()
            .insert(element_id.to_string(), host);
    }

    /// Make `host` appear under the embedded element id once embedding runs.
    pub fn provide_on_embed(&self, host: Rc<dyn PluginHost>) {
        *self.host_on_embed.borrow_mut() = Some(host);
    }

    /// Complete the pending loader script. Returns `false` if none is pending.
    pub fn finish_script(&self) -> bool {
        let pending = self.pending_script.borrow_mut().take();
        match pending {
            Some(on_done) => {
                on_done();
                true
            }
            None => false,
        }
    }

    pub fn fire_window(&self, event: MediaEvent) {
        let listeners = std::mem::take(&mut *self.window_listeners.borrow_mut());
        let mut kept = Vec::new();
        for (registered, listener) in listeners {
            if registered == event {
                listener();
            } else {
                kept.push((registered, listener));
            }
        }
        let mut current = self.window_listeners.borrow_mut();
        let added = std::mem::take(&mut *current);
        *current = kept;
        current.extend(added);
    }

    pub fn window_listener_count(&self) -> usize {
        self.window_listeners.borrow().len()
    }

    pub fn last_element(&self) -> Rc<FakeMediaElement> {
        Rc::clone(self.elements.borrow().last().expect("no media element created"))
    }

    pub fn element_count(&self) -> usize {
        self.elements.borrow().len()
    }
}

impl HostEnvironment for FakeHost {
    fn has_document(&self) -> bool {
        self.has_document
    }

    fn can_play_type(&self, _mime: &str) -> Option<CanPlayType> {
        self.can_play
    }

    fn create_media_element(&self, url: &str) -> BridgeResult<Rc<dyn MediaElement>> {
        if self.fail_media.get() {
            return Err(BridgeError::OperationFailed("audio element".to_string()));
        }
        let element = FakeMediaElement::new(url);
        self.elements.borrow_mut().push(Rc::clone(&element));
        Ok(element)
    }

    fn plugin_host(&self, element_id: &str) -> Option<Rc<dyn PluginHost>> {
        self.plugin_hosts.borrow().get(element_id).cloned()
    }

    fn add_window_listener(&self, event: MediaEvent, listener: OneShotListener) {
        self.window_listeners.borrow_mut().push((event, listener));
    }

    fn load_script(&self, request: ScriptRequest, on_done: OneShotListener) -> BridgeResult<()> {
        self.scripts.borrow_mut().push(request);
        *self.pending_script.borrow_mut() = Some(on_done);
        Ok(())
    }

    fn embed_plugin(&self, request: &EmbedRequest) -> BridgeResult<()> {
        if self.fail_embed.get() {
            return Err(BridgeError::NotAvailable("loader".to_string()));
        }
        self.embeds.borrow_mut().push(request.clone());
        if let Some(host) = self.host_on_embed.borrow_mut().take() {
            self.install_plugin_host(&request.element_id, host);
        }
        Ok(())
    }
}

// ============================================================================
// Callback recording
// ============================================================================

/// Counts every callback invocation by kind.
#[derive(Default)]
pub struct CallbackLog {
    counts: RefCell<HashMap<CallbackKind, usize>>,
    order: RefCell<Vec<CallbackKind>>,
}

impl CallbackLog {
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    pub fn count(&self, kind: CallbackKind) -> usize {
        self.counts.borrow().get(&kind).copied().unwrap_or(0)
    }

    pub fn order(&self) -> Vec<CallbackKind> {
        self.order.borrow().clone()
    }

    fn record(&self, kind: CallbackKind) {
        *self.counts.borrow_mut().entry(kind).or_insert(0) += 1;
        self.order.borrow_mut().push(kind);
    }

    /// Options wiring every callback slot to this log.
    pub fn options(self: &Rc<Self>) -> SoundOptions {
        CallbackKind::ALL
            .into_iter()
            .fold(SoundOptions::new(), |options, kind| {
                let log = Rc::clone(self);
                options.with_callback(kind, move |_| log.record(kind))
            })
    }
}
