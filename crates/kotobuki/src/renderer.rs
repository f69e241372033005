//! Template renderer: turns a template plus data into a rendered page.
//!
//! Rendering is pure and synchronous. The same template and data always
//! produce the same page, and neither input is modified.

use crate::document::RenderedPage;
use crate::error::Result;
use crate::options::RenderOptions;
use crate::placeholder::PlaceholderParser;
use crate::section::SectionFactory;
use crate::stylesheet::Stylesheet;
use crate::template::Template;
use crate::wedding::WeddingData;
use log::debug;
use serde_json::Value;

/// Renderer for invitation templates
#[derive(Debug, Clone, Default)]
pub struct TemplateRenderer {
    parser: PlaceholderParser,
}

impl TemplateRenderer {
    /// Create a renderer with default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a renderer with the given options
    pub fn with_options(options: RenderOptions) -> Self {
        Self {
            parser: PlaceholderParser::new(options),
        }
    }

    pub fn options(&self) -> &RenderOptions {
        self.parser.options()
    }

    /// Render a template against raw JSON data
    pub fn render(&self, template: &Template, data: &Value) -> RenderedPage {
        let factory = SectionFactory::new(&self.parser);
        let blocks = template
            .sections
            .iter()
            .filter(|section| {
                let visible = section.is_visible(data);
                if !visible {
                    debug!("skipping section '{}': condition not met", section.id);
                }
                visible
            })
            .filter_map(|section| factory.render(section, data))
            .collect();

        RenderedPage {
            stylesheet: Stylesheet::from_theme(&template.theme, &template.page),
            max_width: template.page.max_width.clone(),
            blocks,
        }
    }

    /// Render a template against typed wedding data
    pub fn render_wedding(&self, template: &Template, data: &WeddingData) -> Result<RenderedPage> {
        let data = data.to_value()?;
        Ok(self.render(template, &data))
    }
}
