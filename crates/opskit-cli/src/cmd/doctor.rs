use crate::output::{print_json, print_table};
use anyhow::Result;
use opskit_core::prereq;
use serde_json::json;

pub fn run(json: bool) -> Result<()> {
    let tools = prereq::survey();
    let files = prereq::config_files();

    if json {
        let doc = json!({
            "tools": tools.iter().map(|t| json!({
                "tool": t.tool,
                "found": t.path.as_ref().map(|p| p.display().to_string()),
            })).collect::<Vec<_>>(),
            "config_files": files.iter().map(|(label, path, exists)| json!({
                "label": label,
                "path": path.display().to_string(),
                "exists": exists,
            })).collect::<Vec<_>>(),
        });
        return print_json(&doc);
    }

    print_table(
        &["TOOL", "STATUS"],
        tools
            .iter()
            .map(|t| {
                let status = match &t.path {
                    Some(path) => path.display().to_string(),
                    None => format!("missing — {}", t.hint),
                };
                vec![t.tool.to_string(), status]
            })
            .collect(),
    );

    println!();
    print_table(
        &["CONFIG", "PATH", "PRESENT"],
        files
            .into_iter()
            .map(|(label, path, exists)| {
                vec![
                    label.to_string(),
                    path.display().to_string(),
                    if exists { "yes".into() } else { "no".into() },
                ]
            })
            .collect(),
    );
    Ok(())
}
