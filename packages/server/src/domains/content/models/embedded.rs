use anyhow::{Context, Result};
use rust_embed::RustEmbed;

// Site content compiled into the binary
#[derive(RustEmbed)]
#[folder = "content/"]
pub struct SiteContent;

/// UTF-8 text of an embedded content file
pub fn embedded_text(name: &str) -> Result<String> {
    let file = SiteContent::get(name).with_context(|| format!("Missing content file {}", name))?;
    String::from_utf8(file.data.into_owned())
        .with_context(|| format!("Content file {} is not valid UTF-8", name))
}
