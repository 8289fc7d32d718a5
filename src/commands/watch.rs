use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use patternkit::{default_engines, LocalSite, WatchEvent, WatchOptions, WatchUseCase};

use super::CommandContext;

pub fn cmd_watch(
    context: &CommandContext,
    interval_ms: Option<u64>,
    max_passes: Option<usize>,
    json: bool,
) -> Result<()> {
    let mut options = WatchOptions::from_config(&context.config, &context.project_root)
        .with_max_passes(max_passes);
    if let Some(ms) = interval_ms {
        options = options.with_interval(Duration::from_millis(ms));
    }

    let site = LocalSite::from_config(&context.config, &context.project_root, default_engines());
    let mut use_case = WatchUseCase::new(options, site);

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to set Ctrl+C handler")?;

    let stamped = !json && std::io::stdout().is_terminal();

    use_case.start(running, |event| {
        if json {
            println!("{}", event.to_json());
            return;
        }

        let line = match &event {
            WatchEvent::Error { message } => {
                eprintln!("error: {message}");
                return;
            }
            _ => match render_event(&event) {
                Some(line) => line,
                None => return,
            },
        };

        if stamped {
            println!("[{}] {line}", chrono::Local::now().format("%H:%M:%S"));
        } else {
            println!("{line}");
        }
    })?;

    Ok(())
}

fn render_event(event: &WatchEvent) -> Option<String> {
    if let Some(message) = event.message() {
        return Some(message);
    }
    match event {
        WatchEvent::WatchStarted {
            source,
            interval_ms,
        } => Some(format!("Watching {source} every {interval_ms}ms (Ctrl+C to stop)")),
        WatchEvent::RebuildComplete {
            full,
            rendered,
            files_moved,
            ..
        } => {
            let mut parts = Vec::new();
            if *full {
                parts.push(format!("{rendered} patterns rendered"));
            }
            if *files_moved > 0 {
                parts.push(format!("{files_moved} files moved"));
            }
            Some(format!("Rebuilt: {}", parts.join(", ")))
        }
        WatchEvent::Shutdown => Some("Stopped watching".to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rebuild_line_lists_what_ran() {
        let line = render_event(&WatchEvent::RebuildComplete {
            full: true,
            main_pages: false,
            rendered: 3,
            files_moved: 1,
        });
        assert_eq!(line.as_deref(), Some("Rebuilt: 3 patterns rendered, 1 files moved"));
    }

    #[test]
    fn change_events_use_their_notice() {
        let line = render_event(&WatchEvent::PatternRemoved {
            entry: "button".into(),
        });
        assert_eq!(line.as_deref(), Some("button removed from Pattern Lab..."));
    }
}
