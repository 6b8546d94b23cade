use crate::{
    catalog::{Catalog, Theme},
    compositor::Compositor,
    error::ThemeError,
    gradient::apply_gradient,
    report::{BatchReport, ItemReport},
};
use log::{error, info, warn};
use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
};

pub const DEFAULT_TEMPLATES: [&str; 2] = ["bottom-button.png", "top-button.png"];

/// A template image and the optional label drawn on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRole {
    pub file_name: String,
    pub label: Option<String>,
}

impl InputRole {
    pub fn new(file_name: impl Into<String>) -> Self {
        InputRole {
            file_name: file_name.into(),
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    /// Directory holding the template images
    pub images_dir: PathBuf,
    /// Root directory; one subdirectory is created per theme
    pub output_dir: PathBuf,
    pub roles: Vec<InputRole>,
    /// Stop at the first failed item instead of carrying on
    pub fail_fast: bool,
}

impl BatchConfig {
    pub fn new(images_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        BatchConfig {
            images_dir: images_dir.into(),
            output_dir: output_dir.into(),
            roles: DEFAULT_TEMPLATES.iter().map(|f| InputRole::new(*f)).collect(),
            fail_fast: false,
        }
    }
}

/// Generate every template for every theme in `catalog`.
///
/// Item failures are recorded in the returned report and do not stop the
/// batch unless `config.fail_fast` is set. Only failing to create the output
/// root is returned as an error.
pub fn generate_themes(
    catalog: &Catalog,
    config: &BatchConfig,
    compositor: Option<&dyn Compositor>,
) -> Result<BatchReport, ThemeError> {
    create_dir_all(&config.output_dir).map_err(|source| ThemeError::DirectoryCreate {
        path: config.output_dir.clone(),
        source,
    })?;

    if compositor.is_none() {
        for role in config.roles.iter().filter(|r| r.label.is_some()) {
            warn!(
                "No font configured, {} will be generated without its label",
                role.file_name
            );
        }
    }

    let mut report = BatchReport::new();

    for theme in &catalog.themes {
        info!("Generating theme {}...", theme.name);
        let stop = generate_theme(theme, config, compositor, &mut report);
        if stop {
            warn!("Stopping batch after first failure");
            break;
        }
    }

    info!(
        "Done: {} generated, {} failed",
        report.summary.succeeded, report.summary.failed
    );
    Ok(report)
}

/// Returns true when the batch should stop.
fn generate_theme(
    theme: &Theme,
    config: &BatchConfig,
    compositor: Option<&dyn Compositor>,
    report: &mut BatchReport,
) -> bool {
    let theme_dir = config.output_dir.join(&theme.name);
    let dir_error = create_dir_all(&theme_dir).err();

    for role in &config.roles {
        let result = match &dir_error {
            None => generate_item(theme, role, &config.images_dir, &theme_dir, compositor),
            // io::Error isn't Clone; every role of the theme reports the same failure.
            Some(e) => Err(ThemeError::DirectoryCreate {
                path: theme_dir.clone(),
                source: std::io::Error::new(e.kind(), e.to_string()),
            }),
        };

        match result {
            Ok(output) => {
                info!("  ✓ Generated {}/{}", theme.name, role.file_name);
                report.push(ItemReport::succeeded(&theme.name, &role.file_name, output));
            }
            Err(e) => {
                error!("  ✗ {}/{}: {}", theme.name, role.file_name, e);
                report.push(ItemReport::failed(&theme.name, &role.file_name, &e));
                if config.fail_fast {
                    return true;
                }
            }
        }
    }

    false
}

fn generate_item(
    theme: &Theme,
    role: &InputRole,
    images_dir: &Path,
    theme_dir: &Path,
    compositor: Option<&dyn Compositor>,
) -> Result<PathBuf, ThemeError> {
    let input = images_dir.join(&role.file_name);
    let output = theme_dir.join(&role.file_name);

    let overlay = match (compositor, role.label.as_deref()) {
        (Some(compositor), Some(text)) => Some((compositor, text)),
        _ => None,
    };

    apply_gradient(&input, &output, &theme.palette, overlay)?;
    Ok(output)
}
