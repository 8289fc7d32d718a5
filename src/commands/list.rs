use anyhow::Result;
use patternkit::domain::entities::outline;
use patternkit::domain::ports::PatternRenderer;
use patternkit::default_engines;
use patternkit::LocalSite;

use super::CommandContext;

pub fn cmd_list(context: &CommandContext, json: bool) -> Result<()> {
    let mut site = LocalSite::from_config(&context.config, &context.project_root, default_engines());
    site.gather_data()?;
    let registry = site.registry();

    if json {
        for pattern in registry.iter() {
            let event = serde_json::json!({
                "command": "list",
                "unique_name": pattern.unique_name(),
                "partial": pattern.partial_identifier(),
                "group": pattern.group_key(),
                "sub_group": pattern.sub_group_key(),
                "link": pattern.pattern_link(),
                "pseudo": pattern.is_pseudo_pattern(),
                "lineage": pattern.lineage(),
            });
            println!("{event}");
        }
        return Ok(());
    }

    if registry.is_empty() {
        println!("No patterns found");
        return Ok(());
    }
    print!("{}", outline(&registry.build_navigation()));
    Ok(())
}
