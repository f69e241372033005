//! Kotobuki - A data-driven wedding invitation renderer
//!
//! Kotobuki renders invitation templates authored as JSON against per-couple
//! wedding data:
//! - Placeholders in section props resolve against the data, with defaults,
//!   conditional text, transforms and loops
//! - Sections can be shown or hidden by conditions on the data
//! - Output is a typed page tree that serializes to escaped HTML
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//!
//! let template = r#"{
//!     "sections": [
//!         {"id": "title", "type": "header", "props": {"title": "{{couple.groom.name}} & {{couple.bride.name}}"}}
//!     ]
//! }"#;
//!
//! let html = kotobuki::render(
//!     template,
//!     json!({"couple": {"groom": {"name": "Ken"}, "bride": {"name": "Mio"}}}),
//! ).unwrap();
//!
//! assert!(html.contains("<h1 class=\"title\">Ken &amp; Mio</h1>"));
//! ```

pub mod content;
pub mod document;
pub mod error;
pub mod html_escape;
pub mod options;
pub mod path;
pub mod placeholder;
pub mod renderer;
pub mod section;
pub mod stylesheet;
pub mod template;
pub mod template_loader;
pub mod units;
pub mod value;
pub mod wedding;

pub use content::{ContentConfig, ContentKind, ContentStyle, ContentValidation, InteractionMode};
pub use document::{Element, Markup, RenderedBlock, RenderedPage};
pub use error::{KotobukiError, Result};
pub use options::{Locale, RenderOptions};
pub use placeholder::PlaceholderParser;
pub use renderer::TemplateRenderer;
pub use section::SectionFactory;
pub use stylesheet::Stylesheet;
pub use template::{Section, SectionKind, Template, Theme};
pub use template_loader::TemplateLoader;
pub use wedding::WeddingData;

/// A parsed template, ready to render any number of times
pub struct Kotobuki {
    template: Template,
    renderer: TemplateRenderer,
}

impl Kotobuki {
    /// Parse a template from JSON source
    ///
    /// # Example
    ///
    /// ```rust
    /// use serde_json::json;
    ///
    /// let invitation = kotobuki::Kotobuki::from_json(
    ///     r#"{"sections": [{"id": "b", "type": "blessing", "props": {"text": "{{blessing.text||Welcome}}"}}]}"#,
    /// ).unwrap();
    /// let page = invitation.render(&json!({}));
    /// assert_eq!(page.find("b").unwrap().content.text_content(), "Welcome");
    /// ```
    pub fn from_json(source: &str) -> Result<Self> {
        Ok(Self::from_template(Template::from_json(source)?))
    }

    /// Wrap an already decoded template
    pub fn from_template(template: Template) -> Self {
        Self {
            template,
            renderer: TemplateRenderer::new(),
        }
    }

    /// Replace the render options
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.renderer = TemplateRenderer::with_options(options);
        self
    }

    /// Render the template against JSON data
    pub fn render(&self, data: &serde_json::Value) -> RenderedPage {
        self.renderer.render(&self.template, data)
    }

    /// Render the template against JSON data and serialize it as HTML
    pub fn render_html(&self, data: &serde_json::Value) -> String {
        self.render(data).to_html()
    }

    /// Render the template against typed wedding data
    pub fn render_wedding(&self, data: &WeddingData) -> Result<RenderedPage> {
        self.renderer.render_wedding(&self.template, data)
    }

    /// Get a reference to the parsed template
    pub fn template(&self) -> &Template {
        &self.template
    }

    pub fn options(&self) -> &RenderOptions {
        self.renderer.options()
    }
}

/// Convenience function: parse a template and render it to HTML in one call
pub fn render(template_source: &str, data: serde_json::Value) -> Result<String> {
    Ok(Kotobuki::from_json(template_source)?.render_html(&data))
}

/// Convenience function: render a decoded template against typed wedding data
pub fn render_wedding(template: &Template, data: &WeddingData) -> Result<RenderedPage> {
    TemplateRenderer::new().render_wedding(template, data)
}
