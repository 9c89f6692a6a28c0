//! Template rendering service
//!
//! Renders a Jinja2-style template against the environment snapshot and writes
//! the result to a file.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use minijinja::{context, Environment, ErrorKind, Value};
use tracing::{debug, info, warn};

use crate::application::{ApplicationError, ApplicationResult, IoResultExt};
use crate::domain::{env_to_props, EnvSnapshot};
use crate::infrastructure::traits::FileSystem;

/// Service for rendering configuration files from templates.
///
/// Template names are resolved below `root` (`/` by default, so absolute paths
/// address files directly).
pub struct TemplateService {
    fs: Arc<dyn FileSystem>,
    root: PathBuf,
}

impl TemplateService {
    /// Create a new template service.
    pub fn new(fs: Arc<dyn FileSystem>, root: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            root: root.into(),
        }
    }

    /// Render the template `name` with `env` bound as `env` and the
    /// `env_to_props(prefix, exclude=[])` helper.
    pub fn render(&self, name: &str, env: &EnvSnapshot) -> ApplicationResult<String> {
        debug!("render: name={}, root={}", name, self.root.display());
        if !self.fs.is_dir(&self.root) {
            warn!("template root is not a directory: {}", self.root.display());
        }

        let environment = self.environment(env);
        let template = environment
            .get_template(name)
            .map_err(|e| ApplicationError::Template {
                context: format!("load template {}", name),
                source: e,
            })?;
        template
            .render(context! { env => env })
            .map_err(|e| ApplicationError::Template {
                context: format!("render template {}", name),
                source: e,
            })
    }

    /// Render `name` and write the result to `output`, replacing its content.
    ///
    /// Nothing is written unless rendering succeeds. The write itself is not
    /// atomic.
    pub fn render_to_file(
        &self,
        name: &str,
        output: &Path,
        env: &EnvSnapshot,
    ) -> ApplicationResult<()> {
        let rendered = self.render(name, env)?;
        self.fs
            .write(output, &rendered)
            .with_path_context("write output", output)?;
        info!(
            "rendered {} -> {} ({} bytes)",
            name,
            output.display(),
            rendered.len()
        );
        Ok(())
    }

    fn environment(&self, env: &EnvSnapshot) -> Environment<'static> {
        let mut environment = Environment::new();
        environment.set_trim_blocks(true);

        let fs = Arc::clone(&self.fs);
        let root = self.root.clone();
        environment.set_loader(move |name| load_template(fs.as_ref(), &root, name));

        let snapshot = env.clone();
        environment.add_function(
            "env_to_props",
            move |prefix: String, exclude: Option<Vec<String>>| {
                Value::from_serialize(env_to_props(
                    &snapshot,
                    &prefix,
                    exclude.as_deref().unwrap_or_default(),
                ))
            },
        );
        environment
    }
}

/// Map a template name onto a path below `root`.
///
/// Empty and `.` segments are dropped; a `..` segment yields `None`.
pub fn resolve_template_path(root: &Path, name: &str) -> Option<PathBuf> {
    let mut path = root.to_path_buf();
    for segment in name.split('/') {
        match segment {
            "" | "." => continue,
            ".." => return None,
            segment => path.push(segment),
        }
    }
    Some(path)
}

fn load_template(
    fs: &dyn FileSystem,
    root: &Path,
    name: &str,
) -> Result<Option<String>, minijinja::Error> {
    let Some(path) = resolve_template_path(root, name) else {
        debug!("rejecting template name with parent segment: {}", name);
        return Ok(None);
    };
    debug!("loading template from {}", path.display());
    match fs.read_to_string(&path) {
        Ok(source) => Ok(Some(source)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(minijinja::Error::new(
            ErrorKind::InvalidOperation,
            format!("could not read template {}", path.display()),
        )
        .with_source(e)),
    }
}
