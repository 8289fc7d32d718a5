use anyhow::Result;
use patternkit::application::RebuildDispatcher;
use patternkit::default_engines;
use patternkit::LocalSite;

use super::CommandContext;

pub fn cmd_build(context: &CommandContext, json: bool) -> Result<()> {
    let site = LocalSite::from_config(&context.config, &context.project_root, default_engines());
    let public_dir = site.public_dir().to_path_buf();
    let mut dispatcher = RebuildDispatcher::new(site).with_build_lock(public_dir.clone());

    let report = dispatcher.full_build()?;
    let site = dispatcher.into_builder();

    if json {
        for skipped in site.skipped() {
            let event = serde_json::json!({
                "command": "build",
                "event": "skipped",
                "file": skipped.relative_path,
                "error": skipped.error.to_string(),
            });
            println!("{event}");
        }
        let event = serde_json::json!({
            "command": "build",
            "event": "complete",
            "rendered": report.rendered,
            "skipped": site.skipped().len(),
            "public": public_dir.display().to_string(),
        });
        println!("{event}");
    } else {
        for skipped in site.skipped() {
            eprintln!("skipped {}: {}", skipped.relative_path, skipped.error);
        }
        println!(
            "Built {} patterns into {}",
            report.rendered,
            public_dir.display()
        );
    }
    Ok(())
}
