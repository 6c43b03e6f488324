//! JetBrains IDE diagnostics: product info, recent logs and preferences.
//!
//! Every product goes through the same code path; only the directory name
//! markers differ.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use anyhow::Context as _;
use serde::Deserialize;

use super::files::{children_matching, copy_dir_filtered, copy_file, mkdir, modified_before};
use crate::api::{Context, Platform};
use crate::error::{InspectorError, Result};

/// Naming markers for one IDE.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JetBrainsProduct {
    /// Display name, also the archive subdirectory (lowercased).
    pub name: &'static str,
    /// Case-insensitive prefixes of installation directory names.
    pub app_prefixes: &'static [&'static str],
    /// Substring of log directory names.
    pub log_segment: &'static str,
    /// Substring of preference directory names.
    pub pref_segment: &'static str,
}

pub const PRODUCTS: &[JetBrainsProduct] = &[
    JetBrainsProduct {
        name: "IntelliJ",
        app_prefixes: &["intellij", "idea-"],
        log_segment: "Idea",
        pref_segment: "Idea",
    },
    JetBrainsProduct {
        name: "WebStorm",
        app_prefixes: &["webstorm"],
        log_segment: "WebStorm",
        pref_segment: "WebStorm",
    },
    JetBrainsProduct {
        name: "GoLand",
        app_prefixes: &["goland"],
        log_segment: "GoLand",
        pref_segment: "GoLand",
    },
    JetBrainsProduct {
        name: "PyCharm",
        app_prefixes: &["pycharm"],
        log_segment: "PyCharm",
        pref_segment: "PyCharm",
    },
];

/// Where JetBrains products keep things on a given platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JetBrainsLayout {
    /// Directories holding installations.
    pub app_dirs: Vec<PathBuf>,
    /// `product-info.json` location relative to an installation.
    pub product_info: PathBuf,
    /// Directories holding per-version log directories.
    pub log_dirs: Vec<PathBuf>,
    /// Directories holding per-version preference directories.
    pub pref_dirs: Vec<PathBuf>,
}

impl JetBrainsLayout {
    pub fn for_platform(platform: Platform, home: &Path) -> Result<Self> {
        match platform {
            Platform::MacOS => Ok(Self {
                app_dirs: vec![
                    PathBuf::from("/Applications"),
                    home.join("Applications"),
                ],
                product_info: PathBuf::from("Contents/Resources/product-info.json"),
                log_dirs: vec![home.join("Library/Logs"), home.join("Library/Logs/JetBrains")],
                pref_dirs: vec![
                    home.join("Library/Preferences"),
                    home.join("Library/Application Support/JetBrains"),
                ],
            }),
            Platform::Linux => Ok(Self {
                app_dirs: vec![
                    PathBuf::from("/opt"),
                    home.join(".local/share/JetBrains/Toolbox/apps"),
                ],
                product_info: PathBuf::from("product-info.json"),
                log_dirs: vec![home.join(".cache/JetBrains")],
                pref_dirs: vec![home.join(".config/JetBrains")],
            }),
            other => Err(InspectorError::UnsupportedPlatform {
                platform: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ProductInfo {
    version: String,
    product_code: String,
}

fn read_product_info(path: &Path) -> anyhow::Result<ProductInfo> {
    let content =
        fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("parsing {}", path.display()))
}

/// What was copied for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProductSummary {
    pub product_infos: usize,
    pub log_files: usize,
    pub pref_files: usize,
}

/// Copies one product's files into `target_dir`.
#[derive(Debug)]
pub struct JetBrainsProductDataCollector<'a> {
    product: &'a JetBrainsProduct,
    layout: &'a JetBrainsLayout,
    target_dir: PathBuf,
    max_log_age: Duration,
}

impl<'a> JetBrainsProductDataCollector<'a> {
    pub fn new(
        product: &'a JetBrainsProduct,
        layout: &'a JetBrainsLayout,
        target_dir: &Path,
        max_log_age: Duration,
    ) -> Self {
        Self {
            product,
            layout,
            target_dir: target_dir.to_path_buf(),
            max_log_age,
        }
    }

    pub fn collect(&self, ctx: &Context) -> Result<ProductSummary> {
        let logger = ctx.logger();
        logger.info(&format!("Collecting {} product(s) info...", self.product.name));
        mkdir(&self.target_dir)?;

        let mut summary = ProductSummary {
            product_infos: self.copy_product_infos()?,
            ..Default::default()
        };

        logger.info(&format!(
            "  - Collecting logs... (files older than {} days will be ignored)",
            self.max_log_age.as_secs() / (24 * 60 * 60)
        ));
        let cutoff = SystemTime::now()
            .checked_sub(self.max_log_age)
            .unwrap_or(SystemTime::UNIX_EPOCH);
        for dir in self.matching(&self.layout.log_dirs, self.product.log_segment)? {
            let dst = self.target_dir.join("logs").join(file_name(&dir));
            summary.log_files += copy_dir_filtered(&dir, &dst, modified_before(cutoff))?;
        }

        logger.info("  - Collecting configuration files...");
        for dir in self.matching(&self.layout.pref_dirs, self.product.pref_segment)? {
            let dst = self.target_dir.join("configs").join(file_name(&dir));
            summary.pref_files += copy_dir_filtered(&dir, &dst, |_, _| false)?;
        }

        logger.debug(&format!("{}: {:?}", self.product.name, summary));
        Ok(summary)
    }

    fn copy_product_infos(&self) -> Result<usize> {
        let mut copied = 0;
        for app_dir in &self.layout.app_dirs {
            let installs = children_matching(app_dir, |name| {
                let lower = name.to_lowercase();
                self.product.app_prefixes.iter().any(|p| lower.starts_with(p))
            })?;

            for install in installs {
                let info_path = install.join(&self.layout.product_info);
                if !info_path.is_file() {
                    continue;
                }
                let info = read_product_info(&info_path)?;
                let name = format!("{}-{}-product-info.json", info.product_code, info.version);
                copy_file(&info_path, &self.target_dir.join(name))?;
                copied += 1;
            }
        }
        Ok(copied)
    }

    fn matching(&self, roots: &[PathBuf], segment: &str) -> Result<Vec<PathBuf>> {
        let mut found = Vec::new();
        for root in roots {
            for dir in children_matching(root, |name| name.contains(segment))? {
                if dir.is_dir() {
                    found.push(dir);
                }
            }
        }
        Ok(found)
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
