use crate::events::AppEvent;
use async_channel::Sender;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Sends [`AppEvent::ConfigReload`] whenever `config_path` is written, created or removed.
pub async fn run_async_watcher(tx: Sender<AppEvent>, config_path: PathBuf) {
    let Some(config_dir) = config_path.parent().map(|p| p.to_path_buf()) else {
        return;
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", e);
            return;
        }
    };

    // watch the directory, editors often replace the file instead of writing it
    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                if is_config_change(&event, &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}

fn is_config_change(event: &notify::Event, config_path: &Path) -> bool {
    let meaningful = matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    );
    meaningful && event.paths.iter().any(|p| p == config_path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{AccessKind, CreateKind, ModifyKind};

    #[test]
    fn test_only_config_writes_trigger_reload() {
        let config = Path::new("/tmp/raymenu/config.toml");
        let other = Path::new("/tmp/raymenu/other.toml");

        let cases = vec![
            (EventKind::Modify(ModifyKind::Any), config, true),
            (EventKind::Create(CreateKind::File), config, true),
            (EventKind::Access(AccessKind::Any), config, false),
            (EventKind::Modify(ModifyKind::Any), other, false),
        ];

        for (kind, path, expected) in cases {
            let event = notify::Event::new(kind).add_path(path.to_path_buf());
            assert_eq!(is_config_change(&event, config), expected, "{:?}", event);
        }
    }
}
