/**
 * This module contains all logic for loading external files from the
 * `assets/` directory (the font, in this demo).
 */

pub async fn load_binary(file_name: &str) -> anyhow::Result<Vec<u8>> {
    // TODO: pass env for absolute path from lib caller
    let path = std::path::Path::new("./").join("assets").join(file_name);
    let data = tokio::fs::read(path).await?;

    Ok(data)
}
