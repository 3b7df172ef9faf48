//! Plugin player bridge.
//!
//! The fallback backend talks to an embedded plugin object hosted in a page
//! element. The element is looked up by id and may not exist until the
//! plugin runtime finishes bootstrapping.

use crate::media::SoundId;

/// Command surface exposed by the embedded plugin player once it is ready.
pub trait PluginHost {
    /// Load and play `url`; completion is reported back tagged with `uid`.
    fn play_track(&self, url: &str, uid: SoundId);

    /// Pause the current track.
    fn pause_track(&self);

    /// Stop the current track.
    fn stop_track(&self);

    /// Current playback position in seconds.
    fn get_time(&self) -> f64;
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockall::mock;
    use std::rc::Rc;

    mock! {
        pub Player {}

        impl PluginHost for Player {
            fn play_track(&self, url: &str, uid: SoundId);
            fn pause_track(&self);
            fn stop_track(&self);
            fn get_time(&self) -> f64;
        }
    }

    #[test]
    fn test_plugin_host_as_trait_object() {
        let mut player = MockPlayer::new();
        player
            .expect_play_track()
            .withf(|url, uid| url == "a.mp3" && *uid == SoundId::new(5))
            .times(1)
            .return_const(());
        player.expect_get_time().return_const(1.5);

        let host: Rc<dyn PluginHost> = Rc::new(player);
        host.play_track("a.mp3", SoundId::new(5));
        assert_eq!(host.get_time(), 1.5);
    }

    #[test]
    fn test_stop_after_pause() {
        let mut player = MockPlayer::new();
        let mut seq = mockall::Sequence::new();
        player
            .expect_pause_track()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());
        player
            .expect_stop_track()
            .times(1)
            .in_sequence(&mut seq)
            .return_const(());

        player.pause_track();
        player.stop_track();
    }
}
