use anyhow::Result;
use meteo::OutputFormat;
use serde::Serialize;

#[derive(Serialize)]
struct FormatInfo {
    format: &'static str,
    mime: &'static str,
}

pub fn run(json: bool) -> Result<()> {
    let formats: Vec<FormatInfo> = OutputFormat::all()
        .iter()
        .map(|f| FormatInfo {
            format: f.as_str(),
            mime: f.typical_mime(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string(&formats)?);
        return Ok(());
    }

    println!("{:<10} {}", "FORMAT", "TYPICAL MIME");
    println!("{}", "-".repeat(30));
    for info in &formats {
        println!("{:<10} {}", info.format, info.mime);
    }

    Ok(())
}
