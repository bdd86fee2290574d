/// HTML page rendering.
///
/// The template environment is built once per `Renderer` and reused for
/// every render, so a long-lived caller can keep one around instead of
/// reloading the template each time.
///
/// Template variables:
///   city, date, read_time        — target city and general feed stamp
///   general_data                 — ordered map of label → value
///   uv_index, uv_read_time       — current UV reading
///   sea_temp, sea_read_time      — current sea temperature reading

use std::fs;
use std::path::{Path, PathBuf};

use minijinja::Environment;
use serde::Serialize;
use thiserror::Error;

use crate::model::Measurements;

/// Everything the page template consumes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageContext {
    pub city: String,
    pub date: String,
    pub read_time: String,
    pub general_data: Measurements,
    pub uv_index: String,
    pub uv_read_time: String,
    pub sea_temp: String,
    pub sea_read_time: String,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

pub struct Renderer {
    env: Environment<'static>,
    template_name: String,
}

impl Renderer {
    /// Builds the environment and checks that the template loads and compiles.
    pub fn new(template_dir: impl AsRef<Path>, template_name: &str) -> Result<Self, RenderError> {
        let mut env = Environment::new();
        env.set_loader(minijinja::path_loader(template_dir.as_ref()));

        env.get_template(template_name)?;
        tracing::debug!(
            "loaded template {} from {}",
            template_name,
            template_dir.as_ref().display()
        );

        Ok(Self {
            env,
            template_name: template_name.to_string(),
        })
    }

    pub fn render(&self, page: &PageContext) -> Result<String, RenderError> {
        let template = self.env.get_template(&self.template_name)?;
        Ok(template.render(page)?)
    }

    /// Renders the page and writes it to `path`, replacing any existing file.
    ///
    /// Rendering finishes before the file is touched, so a template error
    /// leaves the previous page in place.
    pub fn write_page(&self, page: &PageContext, path: &Path) -> Result<(), RenderError> {
        let html = self.render(page)?;

        let io_err = |source| RenderError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, html).map_err(io_err)?;

        tracing::info!("wrote {}", path.display());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
