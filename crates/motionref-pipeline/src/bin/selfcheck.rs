use std::process::Command;

use motionref_pipeline::PipelineConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = PipelineConfig::from_env();

    println!(
        "motionref-selfcheck: starting with sample_count={}",
        config.sample_count
    );
    ensure_tool("ffmpeg")?;
    ensure_tool("ffprobe")?;
    ensure_env_present(&["GEMINI_API_KEY"])?;

    println!("motionref-selfcheck: ok");
    Ok(())
}

fn ensure_tool(tool: &str) -> anyhow::Result<()> {
    let output = Command::new(tool)
        .arg("-version")
        .output()
        .map_err(|e| anyhow::anyhow!("{} not available: {}", tool, e))?;

    if !output.status.success() {
        return Err(anyhow::anyhow!(
            "{} -version failed: {:?}",
            tool,
            output.status
        ));
    }
    Ok(())
}

fn ensure_env_present(vars: &[&str]) -> anyhow::Result<()> {
    for var in vars {
        if std::env::var(var).is_err() {
            return Err(anyhow::anyhow!("missing required env var {}", var));
        }
    }
    Ok(())
}
