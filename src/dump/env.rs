//! Environment snapshot: variables, platform facts and shell startup files.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::files::{copy_file, mkdir};
use super::redact::SecretMatcher;
use crate::api::Context;
use crate::error::Result;
use crate::shell::{detect_shell, is_ci, shell_config_files};

/// Render `KEY=value` lines sorted by key, with secrets redacted.
pub fn render_env<I, K, V>(vars: I, matcher: &SecretMatcher) -> String
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    let sorted: BTreeMap<String, String> = vars
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect();

    let mut out = String::new();
    for (key, value) in &sorted {
        out.push_str(key);
        out.push('=');
        out.push_str(matcher.redact(key, value));
        out.push('\n');
    }
    out
}

/// Platform facts worth having in a support archive.
pub fn platform_summary(ctx: &Context) -> String {
    let mut lines = vec![
        format!("platform: {}", ctx.platform()),
        format!("os: {}", std::env::consts::OS),
        format!("arch: {}", std::env::consts::ARCH),
        format!("family: {}", std::env::consts::FAMILY),
        format!("shell: {}", detect_shell().name()),
        format!("ci: {}", is_ci()),
        format!("{}: {}", ctx.name(), env!("CARGO_PKG_VERSION")),
    ];
    if let Some(home) = dirs::home_dir() {
        lines.push(format!("home: {}", home.display()));
    }
    lines.join("\n") + "\n"
}

/// Writes `env.txt`, `platform.txt` and copies of shell rc files.
#[derive(Debug)]
pub struct EnvDataCollector {
    home: PathBuf,
    target_dir: PathBuf,
    matcher: SecretMatcher,
}

impl EnvDataCollector {
    pub fn new(home: &Path, target_dir: &Path, matcher: SecretMatcher) -> Self {
        Self {
            home: home.to_path_buf(),
            target_dir: target_dir.to_path_buf(),
            matcher,
        }
    }

    pub fn collect(&self, ctx: &Context) -> Result<()> {
        ctx.logger().info("Collecting environment information...");
        mkdir(&self.target_dir)?;

        let vars = std::env::vars_os().map(|(k, v)| {
            (
                k.to_string_lossy().into_owned(),
                v.to_string_lossy().into_owned(),
            )
        });
        fs::write(self.target_dir.join("env.txt"), render_env(vars, &self.matcher))?;
        fs::write(self.target_dir.join("platform.txt"), platform_summary(ctx))?;

        let copied = self.copy_shell_files()?;
        ctx.logger()
            .debug(&format!("Copied {} shell startup file(s)", copied));
        Ok(())
    }

    fn copy_shell_files(&self) -> Result<usize> {
        let mut copied = 0;
        for file in shell_config_files(&self.home) {
            if !file.is_file() {
                continue;
            }
            let relative = file.strip_prefix(&self.home).unwrap_or(&file);
            copy_file(&file, &self.target_dir.join("shell").join(relative))?;
            copied += 1;
        }
        Ok(copied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn env_is_sorted_and_redacted() {
        let vars = vec![
            ("PATH", "/usr/bin:/bin"),
            ("NPM_TOKEN", "npm_abc123"),
            ("EDITOR", "vim"),
            ("DB_PASSWORD", "hunter2"),
        ];
        let rendered = render_env(vars, &SecretMatcher::with_builtins());

        insta::assert_snapshot!(rendered.trim_end(), @r"
        DB_PASSWORD=***
        EDITOR=vim
        NPM_TOKEN=***
        PATH=/usr/bin:/bin
        ");
    }

    #[test]
    fn platform_summary_names_the_platform() {
        let ctx = crate::api::Context::for_tests();
        let summary = platform_summary(&ctx);
        assert!(summary.contains(&format!("platform: {}", ctx.platform())));
        assert!(summary.contains(&format!("os: {}", std::env::consts::OS)));
    }

    #[test]
    fn collect_writes_files_and_copies_rc_files() {
        let home = TempDir::new().unwrap();
        fs::write(home.path().join(".zshrc"), "export EDITOR=vim\n").unwrap();
        fs::create_dir_all(home.path().join(".config/fish")).unwrap();
        fs::write(home.path().join(".config/fish/config.fish"), "set x 1\n").unwrap();

        let out = TempDir::new().unwrap();
        let target = out.path().join("env");
        let collector = EnvDataCollector::new(home.path(), &target, SecretMatcher::default());
        collector.collect(&crate::api::Context::for_tests()).unwrap();

        assert!(target.join("env.txt").is_file());
        assert!(target.join("platform.txt").is_file());
        assert!(target.join("shell/.zshrc").is_file());
        assert!(target.join("shell/.config/fish/config.fish").is_file());
        assert!(!target.join("shell/.bashrc").exists());
    }
}
