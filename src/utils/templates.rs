use anyhow::{Context as _, Result, anyhow};
use rust_embed::RustEmbed;
use tera::{Context, Tera};

#[derive(RustEmbed)]
#[folder = "src/assets/templates/"]
struct Templates;

/// Renders one of the embedded templates.
pub fn render(template_name: &str, context: &Context) -> Result<String> {
    let file = Templates::get(template_name)
        .ok_or_else(|| anyhow!("Failed to find template: {}", template_name))?;

    let template_str =
        std::str::from_utf8(file.data.as_ref()).context("Failed to parse template as UTF-8")?;

    Tera::default()
        .render_str(template_str, context)
        .context(format!("Failed to render template {}", template_name))
}
