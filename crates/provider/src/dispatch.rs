//! Playback command dispatch.
//!
//! Every command follows the same shape: fetch the live device list, make
//! sure the target is in it (and, for `play`, active), then issue exactly one
//! provider call. The device list is never cached between requests.

use meowseek_types::{
    Device, DeviceSummary, MeowError, PlaybackCommand, PlaybackProvider, traits::Result,
};

/// Result of `GET /device`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceListing {
    /// The provider reported no devices.
    Empty,
    Devices(Vec<DeviceSummary>),
}

/// Validates `device_id` against the current device list and runs `command`.
///
/// Returns the fixed confirmation message for the command.
///
/// # Errors
///
/// - [`MeowError::DeviceNotFound`] if no listed device has `device_id`;
///   no mutating call is made.
/// - [`MeowError::DeviceInactive`] for `play` on an inactive device.
/// - Whatever the provider call returns otherwise.
pub async fn dispatch(
    provider: &dyn PlaybackProvider,
    command: PlaybackCommand,
    device_id: Option<&str>,
) -> Result<&'static str> {
    let devices = provider.devices().await?;
    tracing::info!(%command, ?devices, "available devices");

    let device = find_device(&devices, device_id).ok_or(MeowError::DeviceNotFound)?;
    if command.requires_active_device() && !device.is_active {
        return Err(MeowError::DeviceInactive);
    }

    tracing::info!(%command, device_id = device_id.unwrap_or(""), "forwarding playback command");
    match command {
        PlaybackCommand::Play => provider.start_playback(device_id).await?,
        PlaybackCommand::Pause => provider.pause_playback(device_id).await?,
        PlaybackCommand::Next => provider.skip_to_next(device_id).await?,
        PlaybackCommand::Previous => provider.skip_to_previous(device_id).await?,
    }
    Ok(command.confirmation())
}

fn find_device<'a>(devices: &'a [Device], device_id: Option<&str>) -> Option<&'a Device> {
    devices.iter().find(|d| d.matches(device_id))
}

/// Fetches the device list and projects it to `{id, name, type}`.
///
/// # Errors
///
/// Propagates the provider's error.
pub async fn list_devices(provider: &dyn PlaybackProvider) -> Result<DeviceListing> {
    let devices = provider.devices().await?;
    tracing::info!(?devices, "available devices");
    if devices.is_empty() {
        return Ok(DeviceListing::Empty);
    }
    Ok(DeviceListing::Devices(
        devices.into_iter().map(DeviceSummary::from).collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Scripted provider that records every mutating call.
    struct FakeProvider {
        devices: std::result::Result<Vec<Device>, fn() -> MeowError>,
        fail_command: Option<fn() -> MeowError>,
        calls: Mutex<Vec<String>>,
    }

    impl FakeProvider {
        fn with_devices(devices: Vec<Device>) -> Self {
            Self {
                devices: Ok(devices),
                fail_command: None,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn record(&self, name: &str, device_id: Option<&str>) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("{name}:{}", device_id.unwrap_or("-")));
            match self.fail_command {
                Some(make) => Err(make()),
                None => Ok(()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PlaybackProvider for FakeProvider {
        async fn devices(&self) -> Result<Vec<Device>> {
            match &self.devices {
                Ok(d) => Ok(d.clone()),
                Err(make) => Err(make()),
            }
        }
        async fn start_playback(&self, device_id: Option<&str>) -> Result<()> {
            self.record("start_playback", device_id)
        }
        async fn pause_playback(&self, device_id: Option<&str>) -> Result<()> {
            self.record("pause_playback", device_id)
        }
        async fn skip_to_next(&self, device_id: Option<&str>) -> Result<()> {
            self.record("skip_to_next", device_id)
        }
        async fn skip_to_previous(&self, device_id: Option<&str>) -> Result<()> {
            self.record("skip_to_previous", device_id)
        }
    }

    fn device(id: &str, active: bool) -> Device {
        Device {
            id: Some(id.to_string()),
            name: format!("{id}-name"),
            kind: "Speaker".to_string(),
            is_active: active,
            is_private_session: false,
            is_restricted: false,
            volume_percent: None,
        }
    }

    const ALL: [PlaybackCommand; 4] = [
        PlaybackCommand::Play,
        PlaybackCommand::Pause,
        PlaybackCommand::Next,
        PlaybackCommand::Previous,
    ];

    #[tokio::test]
    async fn test_unknown_device_never_mutates() {
        for command in ALL {
            let p = FakeProvider::with_devices(vec![device("dev1", true)]);
            let err = dispatch(&p, command, Some("devX")).await.unwrap_err();
            assert!(matches!(err, MeowError::DeviceNotFound), "{command}");
            assert!(p.calls().is_empty(), "{command}");
        }
    }

    #[tokio::test]
    async fn test_missing_and_empty_device_id_not_found() {
        let p = FakeProvider::with_devices(vec![device("dev1", true)]);
        assert!(matches!(
            dispatch(&p, PlaybackCommand::Pause, None).await,
            Err(MeowError::DeviceNotFound)
        ));
        assert!(matches!(
            dispatch(&p, PlaybackCommand::Pause, Some("")).await,
            Err(MeowError::DeviceNotFound)
        ));
        assert!(p.calls().is_empty());
    }

    #[tokio::test]
    async fn test_each_command_issues_one_call() {
        let expected = [
            (PlaybackCommand::Play, "start_playback:dev1", "Playback started."),
            (PlaybackCommand::Pause, "pause_playback:dev1", "Playback paused."),
            (PlaybackCommand::Next, "skip_to_next:dev1", "Skipped to the next song."),
            (
                PlaybackCommand::Previous,
                "skip_to_previous:dev1",
                "Went back to the previous song.",
            ),
        ];
        for (command, call, message) in expected {
            let p = FakeProvider::with_devices(vec![device("dev0", false), device("dev1", true)]);
            let msg = dispatch(&p, command, Some("dev1")).await.unwrap();
            assert_eq!(msg, message);
            assert_eq!(p.calls(), vec![call.to_string()]);
        }
    }

    #[tokio::test]
    async fn test_play_requires_active_device() {
        let p = FakeProvider::with_devices(vec![device("dev1", false)]);
        let err = dispatch(&p, PlaybackCommand::Play, Some("dev1"))
            .await
            .unwrap_err();
        assert!(matches!(err, MeowError::DeviceInactive));
        assert!(p.calls().is_empty());
    }

    #[tokio::test]
    async fn test_other_commands_accept_inactive_device() {
        for command in [
            PlaybackCommand::Pause,
            PlaybackCommand::Next,
            PlaybackCommand::Previous,
        ] {
            let p = FakeProvider::with_devices(vec![device("dev1", false)]);
            assert!(dispatch(&p, command, Some("dev1")).await.is_ok(), "{command}");
            assert_eq!(p.calls().len(), 1);
        }
    }

    #[tokio::test]
    async fn test_device_list_failure_propagates() {
        let p = FakeProvider {
            devices: Err(|| MeowError::Http("timed out".into())),
            fail_command: None,
            calls: Mutex::new(Vec::new()),
        };
        let err = dispatch(&p, PlaybackCommand::Next, Some("dev1"))
            .await
            .unwrap_err();
        assert!(matches!(err, MeowError::Http(_)));
        assert!(p.calls().is_empty());
    }

    #[tokio::test]
    async fn test_command_failure_propagates() {
        let p = FakeProvider {
            devices: Ok(vec![device("dev1", true)]),
            fail_command: Some(|| MeowError::Provider {
                status: 404,
                message: "Player command failed: No active device found".into(),
            }),
            calls: Mutex::new(Vec::new()),
        };
        let err = dispatch(&p, PlaybackCommand::Pause, Some("dev1"))
            .await
            .unwrap_err();
        assert!(matches!(err, MeowError::Provider { status: 404, .. }));
        assert_eq!(p.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_list_devices_empty() {
        let p = FakeProvider::with_devices(Vec::new());
        assert_eq!(list_devices(&p).await.unwrap(), DeviceListing::Empty);
    }

    #[tokio::test]
    async fn test_list_devices_projection() {
        let p = FakeProvider::with_devices(vec![device("dev1", true), device("dev2", false)]);
        let DeviceListing::Devices(list) = list_devices(&p).await.unwrap() else {
            panic!("expected devices");
        };
        assert_eq!(
            list,
            vec![
                DeviceSummary {
                    id: Some("dev1".into()),
                    name: "dev1-name".into(),
                    kind: "Speaker".into(),
                },
                DeviceSummary {
                    id: Some("dev2".into()),
                    name: "dev2-name".into(),
                    kind: "Speaker".into(),
                },
            ]
        );
    }
}
