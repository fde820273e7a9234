//! llhook entry point.
//!
//! Hooks the devices selected in the config file and prints every event until
//! Escape is released while Control is held, or Ctrl-C is pressed.
//!
//! # Architecture
//!
//! ```text
//! main()                      (hook thread)
//!  ├─ load_or_create_config()
//!  ├─ Ctrl-C watcher          (own thread, current-thread Tokio runtime)
//!  │    └─ QuitHandle::request_quit()  → WM_QUIT to the hook thread
//!  └─ Hook::hook()            blocks in the message loop
//!       └─ handler            prints the event, watches for the stop chord
//! ```

use tracing_subscriber::EnvFilter;

use llhook::infrastructure::storage::config::OutputFormat;
use llhook::{InputEvent, Key, KeyAction};

#[cfg(target_os = "windows")]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use llhook::infrastructure::hook_backend::windows::WindowsBackend;
    use llhook::infrastructure::storage::config;
    use llhook::{Hook, HookOptions};
    use tracing::info;

    let cfg = config::load_or_create_config().context("failed to load configuration")?;
    init_logging(&cfg.output.log_level);
    info!(config = ?config::config_file_path().ok(), "llhook starting");

    // The backend binds to this thread, which also runs the message loop.
    let backend = WindowsBackend::new();
    watch_ctrl_c(backend.quit_handle())?;

    let format = cfg.output.format;
    let mut hook = Hook::new(backend);
    hook.set_handler(move |event, control| {
        print_event(event, format)?;
        if is_stop_chord(event) {
            info!("stop chord released, removing hooks");
            control.uninstall_all();
        }
        Ok(())
    });

    info!("listening. Release Escape while holding Control, or press Ctrl-C, to exit");
    let exit = hook
        .hook(HookOptions::from(&cfg.hooks))
        .context("input hook failed")?;

    info!(?exit, "llhook stopped");
    Ok(())
}

#[cfg(not(target_os = "windows"))]
fn main() -> anyhow::Result<()> {
    init_logging("info");
    anyhow::bail!(
        "llhook needs Windows low-level hooks; {} is not supported",
        std::env::consts::OS
    )
}

/// Initialises structured logging. `RUST_LOG` overrides `default_level`.
fn init_logging(default_level: &str) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

/// Posts a quit message to the hook thread when Ctrl-C is pressed.
#[cfg(target_os = "windows")]
fn watch_ctrl_c(
    quit: llhook::infrastructure::hook_backend::windows::QuitHandle,
) -> anyhow::Result<()> {
    use anyhow::Context;
    use tracing::{info, warn};

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to build signal runtime")?;

    std::thread::Builder::new()
        .name("ctrl-c".to_string())
        .spawn(move || {
            runtime.block_on(async {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("shutdown signal received");
                    if let Err(e) = quit.request_quit() {
                        warn!(error = %e, "failed to post quit message");
                    }
                }
            });
        })
        .context("failed to spawn Ctrl-C watcher")?;
    Ok(())
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn print_event(event: &InputEvent, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => println!("{event}"),
        OutputFormat::Json => println!("{}", serde_json::to_string(event)?),
    }
    Ok(())
}

/// Escape released while a Control key is still held.
#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
fn is_stop_chord(event: &InputEvent) -> bool {
    matches!(
        event,
        InputEvent::Keyboard(k)
            if k.key == Key::Escape
                && k.action == KeyAction::Up
                && k.pressed.iter().any(|key| key.is_control())
    )
}
