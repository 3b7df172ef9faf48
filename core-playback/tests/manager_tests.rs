//! Integration tests for backend selection, plugin bootstrap and sound
//! construction through the manager.

mod common;

use bridge_traits::{CanPlayType, HostEnvironment, MediaEvent, PluginHost};
use common::{CallbackLog, FakeHost, MediaCommand, RecordingPluginHost};
use core_playback::manager::detect_backend;
use core_playback::{AudioManager, Backend, CallbackKind, PlaybackError, SoundOptions};
use core_runtime::config::ManagerConfig;
use core_runtime::PlaybackContext;
use std::rc::Rc;

fn manager(host: &Rc<FakeHost>) -> AudioManager {
    AudioManager::new(Rc::clone(host) as Rc<dyn HostEnvironment>, ManagerConfig::default())
        .unwrap()
}

#[test]
fn test_missing_document_is_fatal() {
    let host = FakeHost::without_document();
    let err = AudioManager::new(host as Rc<dyn HostEnvironment>, ManagerConfig::default())
        .unwrap_err();

    assert!(matches!(err, PlaybackError::Configuration(_)));
    assert!(err.is_fatal());
}

#[test]
fn test_can_play_answers_select_backend() {
    let cases = [
        (Some(CanPlayType::Probably), Backend::Streaming),
        (Some(CanPlayType::Maybe), Backend::Streaming),
        (Some(CanPlayType::No), Backend::Plugin),
        (None, Backend::Plugin),
    ];

    for (answer, expected) in cases {
        let host = FakeHost::with_can_play(answer);
        assert_eq!(detect_backend(host.as_ref()).unwrap(), expected, "{answer:?}");
    }
}

#[test]
fn test_streaming_manager_skips_bootstrap() {
    let host = FakeHost::streaming();
    let manager = manager(&host);

    assert_eq!(manager.backend(), Backend::Streaming);
    assert!(host.scripts.borrow().is_empty());
    assert!(!host.finish_script());
}

#[test]
fn test_streaming_load_creates_element_per_sound() {
    let host = FakeHost::streaming();
    let manager = manager(&host);
    let log = CallbackLog::new();

    let sound = manager.load("a.mp3", log.options()).unwrap();
    let element = host.last_element();
    assert_eq!(element.url, "a.mp3");
    assert_eq!(sound.url(), "a.mp3");

    sound.play();
    element.fire(MediaEvent::LoadedData);
    assert_eq!(log.count(CallbackKind::Play), 1);
    assert_eq!(element.count(MediaCommand::Play), 1);

    manager.load("b.mp3", SoundOptions::new()).unwrap();
    assert_eq!(host.element_count(), 2);
}

#[test]
fn test_streaming_load_surfaces_bridge_error() {
    let host = FakeHost::streaming();
    host.fail_media();
    let manager = manager(&host);

    let err = manager.load("a.mp3", SoundOptions::new()).unwrap_err();
    assert!(matches!(err, PlaybackError::Bridge(_)));
}

#[test]
fn test_plugin_bootstrap_requests_use_config() {
    let host = FakeHost::plugin();
    let config = ManagerConfig::builder()
        .plugin_path("/assets/player.swf")
        .plugin_element_id("my-player")
        .plugin_host_element_id("my-host")
        .build()
        .unwrap();
    let manager = AudioManager::new(Rc::clone(&host) as Rc<dyn HostEnvironment>, config).unwrap();
    assert_eq!(manager.backend(), Backend::Plugin);

    {
        let scripts = host.scripts.borrow();
        assert_eq!(scripts.len(), 1);
        assert_eq!(scripts[0].src, manager.config().loader_script_path);
        assert_eq!(scripts[0].element_id, manager.config().loader_script_element_id);
    }
    assert!(host.embeds.borrow().is_empty());
    assert!(!manager.is_plugin_ready());

    assert!(host.finish_script());

    let embeds = host.embeds.borrow();
    assert_eq!(embeds.len(), 1);
    assert_eq!(embeds[0].plugin_path, "/assets/player.swf");
    assert_eq!(embeds[0].element_id, "my-player");
    assert_eq!(embeds[0].host_element_id, "my-host");
    assert_eq!((embeds[0].width, embeds[0].height), (0, 0));
    assert!(manager.is_plugin_ready());
}

#[test]
fn test_plugin_flow_end_to_end() {
    let host = FakeHost::plugin();
    let player = RecordingPluginHost::new();
    host.provide_on_embed(Rc::clone(&player) as Rc<dyn PluginHost>);
    let manager = manager(&host);
    let log = CallbackLog::new();

    let sound = manager.load("a.mp3", log.options()).unwrap();
    sound.play();
    assert_eq!(player.play_count(), 0);
    assert_eq!(manager.context().plugin_ready().pending(), 1);

    host.finish_script();
    assert_eq!(player.play_count(), 1);

    host.fire_window(MediaEvent::LoadedData);
    assert_eq!(log.count(CallbackKind::Play), 1);

    manager
        .context()
        .dispatch_named(&format!("mzSoundEnd:{}", sound.uid()))
        .unwrap();
    assert_eq!(log.count(CallbackKind::Finish), 1);
}

#[test]
fn test_plugin_embed_failure_leaves_runtime_unready() {
    let host = FakeHost::plugin();
    host.fail_embed();
    let manager = manager(&host);

    let sound = manager.load("a.mp3", SoundOptions::new()).unwrap();
    sound.play();
    host.finish_script();

    assert!(!manager.is_plugin_ready());
    assert_eq!(manager.context().plugin_ready().pending(), 1);
}

#[test]
fn test_plugin_ready_from_bridge_event() {
    let host = FakeHost::plugin();
    let manager = manager(&host);

    let sound = manager.load("a.mp3", SoundOptions::new()).unwrap();
    sound.play();
    let player = RecordingPluginHost::new();
    host.install_plugin_host(
        &manager.config().plugin_element_id,
        Rc::clone(&player) as Rc<dyn PluginHost>,
    );
    manager.context().dispatch_named("mzPluginReady").unwrap();

    assert!(manager.is_plugin_ready());
    assert_eq!(player.play_count(), 1);
}

#[test]
fn test_managers_share_context() {
    let ctx = Rc::new(PlaybackContext::new());
    let first_host = FakeHost::streaming();
    let second_host = FakeHost::streaming();
    let first = AudioManager::with_context(
        Rc::clone(&first_host) as Rc<dyn HostEnvironment>,
        ManagerConfig::default(),
        Rc::clone(&ctx),
    )
    .unwrap();
    let second = AudioManager::with_context(
        Rc::clone(&second_host) as Rc<dyn HostEnvironment>,
        ManagerConfig::default(),
        Rc::clone(&ctx),
    )
    .unwrap();

    let a = first.load("a.mp3", SoundOptions::new()).unwrap();
    let b = second.load("b.mp3", SoundOptions::new()).unwrap();
    assert!(a.uid() < b.uid());
}

#[test]
fn test_invalid_config_is_rejected() {
    let host = FakeHost::streaming();
    let config = ManagerConfig {
        plugin_element_id: "  ".to_string(),
        ..ManagerConfig::default()
    };

    let err = AudioManager::new(host as Rc<dyn HostEnvironment>, config).unwrap_err();
    assert!(matches!(err, PlaybackError::Configuration(_)));
}

#[test]
fn test_plugin_ready_future_completes_after_embed() {
    let host = FakeHost::plugin();
    let manager = manager(&host);

    let ready = manager.context().plugin_ready().wait();
    assert_eq!(manager.context().plugin_ready().pending(), 1);

    host.finish_script();
    assert!(futures::executor::block_on(ready).is_ok());
    assert!(manager.is_plugin_ready());
}

#[test]
fn test_from_json_applies_overrides() {
    let host = FakeHost::plugin();
    let manager = AudioManager::from_json(
        Rc::clone(&host) as Rc<dyn HostEnvironment>,
        r#"{"loaderScriptPath": "/js/loader.js", "pluginElementId": ""}"#,
    )
    .unwrap();

    assert_eq!(manager.config().loader_script_path, "/js/loader.js");
    assert_eq!(
        manager.config().plugin_element_id,
        ManagerConfig::default().plugin_element_id
    );
    assert_eq!(host.scripts.borrow()[0].src, "/js/loader.js");
}

#[test]
fn test_from_json_surfaces_runtime_error() {
    let host = FakeHost::streaming();
    let err = AudioManager::from_json(host as Rc<dyn HostEnvironment>, "{not json")
        .err()
        .expect("malformed config must be rejected");

    assert!(matches!(
        err,
        PlaybackError::Runtime(core_runtime::Error::Config(_))
    ));
    assert!(!err.is_fatal());
}
