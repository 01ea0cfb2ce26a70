use crate::output::print_json;
use anyhow::Result;
use opskit_core::dburl;
use opskit_core::render::PLACEHOLDER;

pub fn run(url: &str, json: bool) -> Result<()> {
    let parsed = dburl::parse(url)?;

    if json {
        return print_json(&parsed);
    }

    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| PLACEHOLDER.into());
    println!("  Scheme    {}", parsed.scheme);
    println!("  User      {}", or_na(&parsed.user));
    println!(
        "  Password  {}",
        match &parsed.password {
            Some(_) => "********",
            None => PLACEHOLDER,
        }
    );
    println!("  Host      {}", parsed.host);
    println!(
        "  Port      {}",
        parsed
            .port
            .map(|p| p.to_string())
            .unwrap_or_else(|| PLACEHOLDER.into())
    );
    println!("  Database  {}", or_na(&parsed.database));
    if !parsed.params.is_empty() {
        let rendered: Vec<String> = parsed
            .params
            .iter()
            .map(|(k, v)| format!("{k}={v}"))
            .collect();
        println!("  Params    {}", rendered.join(" "));
    }
    Ok(())
}
