//! Environment dump: gathers diagnostics into a `.tar.gz` for support.
//!
//! Every collection task is independent. A failing task is logged and the
//! rest still run; only when every task fails does the dump fail.

pub mod archive;
pub mod env;
pub mod files;
pub mod jetbrains;
pub mod redact;
pub mod tools;

pub use archive::StagingArea;
pub use redact::SecretMatcher;

use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::api::{Context, Platform};
use crate::error::{InspectorError, Result};
use crate::shell;

use env::EnvDataCollector;
use jetbrains::{JetBrainsLayout, JetBrainsProductDataCollector, PRODUCTS};

/// A named unit of collection work.
pub struct Task<'a> {
    name: String,
    run: Box<dyn FnOnce(&Context) -> Result<()> + 'a>,
}

impl<'a> Task<'a> {
    pub fn new(name: impl Into<String>, run: impl FnOnce(&Context) -> Result<()> + 'a) -> Self {
        Self {
            name: name.into(),
            run: Box::new(run),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl std::fmt::Debug for Task<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Task").field("name", &self.name).finish()
    }
}

/// Run every task, logging failures.
///
/// Returns the number of tasks that succeeded. Fails with
/// [`InspectorError::AllTasksFailed`] when tasks were given and none
/// succeeded.
pub fn run_tasks(ctx: &Context, tasks: Vec<Task<'_>>) -> Result<usize> {
    let total = tasks.len();
    let mut succeeded = 0;

    for task in tasks {
        tracing::debug!("Running dump task '{}'", task.name);
        match (task.run)(ctx) {
            Ok(()) => succeeded += 1,
            Err(e) => ctx
                .logger()
                .error(&format!("Task '{}' failed: {}", task.name, e)),
        }
    }

    if total > 0 && succeeded == 0 {
        return Err(InspectorError::AllTasksFailed { count: total });
    }
    Ok(succeeded)
}

const SECS_PER_DAY: u64 = 24 * 60 * 60;

/// Maximum log age for `days`; absurdly large values saturate.
pub fn log_age_limit(days: u64) -> Duration {
    Duration::from_secs(days.saturating_mul(SECS_PER_DAY))
}

/// Dump mode only knows where things live on macOS and Linux.
pub fn check_prerequisites(ctx: &Context) -> Result<()> {
    ctx.logger().progress("Checking prerequisites...");
    match ctx.platform() {
        Platform::MacOS | Platform::Linux => Ok(()),
        other => Err(InspectorError::UnsupportedPlatform {
            platform: other.to_string(),
        }),
    }
}

/// Login name used in staging and archive names.
pub fn current_user() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("LOGNAME"))
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// `<dir>/envdump-<user>-<timestamp>.tar.gz`, where `dir` is the configured
/// output directory or `~/tmp/env_dumps`.
pub fn default_output_path(ctx: &Context, home: &Path, user: &str) -> PathBuf {
    let dir = ctx
        .config()
        .dump
        .output_dir
        .clone()
        .unwrap_or_else(|| home.join("tmp").join("env_dumps"));
    let timestamp = chrono::Local::now().format("%Y-%m-%dT%H-%M-%S");
    dir.join(format!("envdump-{}-{}.tar.gz", user, timestamp))
}

/// Collect everything and, unless dry-running, write the archive.
///
/// Returns the archive path, or `None` on a dry run.
pub fn run(ctx: &Context, output: Option<PathBuf>) -> Result<Option<PathBuf>> {
    check_prerequisites(ctx)?;

    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    let user = current_user();
    let staging = StagingArea::new(&user)?;
    let layout = JetBrainsLayout::for_platform(ctx.platform(), &home)?;
    let dump_config = &ctx.config().dump;
    let max_log_age = log_age_limit(dump_config.log_max_age_days);
    let matcher = SecretMatcher::with_builtins_and_names(&dump_config.redact_env);

    let mut tasks = vec![
        Task::new("env", |ctx: &Context| {
            EnvDataCollector::new(&home, &staging.subdir("env"), matcher).collect(ctx)
        }),
        Task::new("tools", |ctx: &Context| {
            tools::collect_tools_info(&staging.subdir("tools"), tools::TOOL_PROBES, ctx).map(|_| ())
        }),
    ];
    for product in PRODUCTS {
        let target = staging.subdir(&product.name.to_lowercase());
        let layout = &layout;
        tasks.push(Task::new(product.name, move |ctx: &Context| {
            JetBrainsProductDataCollector::new(product, layout, &target, max_log_age)
                .collect(ctx)
                .map(|_| ())
        }));
    }
    let succeeded = run_tasks(ctx, tasks)?;
    tracing::debug!("{} dump task(s) succeeded", succeeded);

    if ctx.flags().dry_run {
        ctx.logger().info("Dry-run mode: archive creation skipped!");
        return Ok(None);
    }

    ctx.logger().info("Preparing tar archive...");
    staging.include_log(ctx.flags().log_file.as_deref())?;
    let output = output.unwrap_or_else(|| default_output_path(ctx, &home, &user));
    let archive = staging.pack(&output)?;
    ctx.logger()
        .success(&format!("Archive written to {}", archive.display()));

    if ctx.platform() == Platform::MacOS {
        let reveal = vec!["open".to_string(), "-R".to_string(), archive.to_string_lossy().into_owned()];
        if let Err(e) = shell::execute_quiet(&reveal) {
            tracing::debug!("Could not reveal archive: {}", e);
        }
    }

    Ok(Some(archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::MockLogger;

    #[test]
    fn log_age_limit_in_days() {
        assert_eq!(log_age_limit(14), Duration::from_secs(14 * 24 * 60 * 60));
        assert_eq!(log_age_limit(0), Duration::ZERO);
    }

    #[test]
    fn huge_log_age_saturates() {
        assert_eq!(log_age_limit(u64::MAX), Duration::from_secs(u64::MAX));
    }

    #[test]
    fn run_tasks_counts_successes() {
        let logger = MockLogger::new();
        let ctx = Context::new("dump", Box::new(logger.clone()));
        let tasks = vec![
            Task::new("ok", |_: &Context| Ok(())),
            Task::new("bad", |_: &Context| {
                Err(InspectorError::collection("bad", "boom"))
            }),
        ];

        assert_eq!(run_tasks(&ctx, tasks).unwrap(), 1);
        assert!(logger.has_error("Task 'bad' failed"));
    }

    #[test]
    fn run_tasks_fails_when_all_fail() {
        let logger = MockLogger::new();
        let ctx = Context::new("dump", Box::new(logger.clone()));
        let tasks = vec![
            Task::new("a", |_: &Context| Err(InspectorError::collection("a", "x"))),
            Task::new("b", |_: &Context| Err(InspectorError::collection("b", "y"))),
        ];

        let err = run_tasks(&ctx, tasks).unwrap_err();
        assert!(matches!(err, InspectorError::AllTasksFailed { count: 2 }));
        assert_eq!(logger.messages(crate::ui::LogLevel::Error).len(), 2);
    }

    #[test]
    fn run_tasks_runs_every_task_in_order() {
        let ctx = Context::for_tests();
        let order = std::cell::RefCell::new(Vec::new());
        let tasks = vec![
            Task::new("first", |_: &Context| {
                order.borrow_mut().push("first");
                Err(InspectorError::collection("first", "x"))
            }),
            Task::new("second", |_: &Context| {
                order.borrow_mut().push("second");
                Ok(())
            }),
        ];
        run_tasks(&ctx, tasks).unwrap();
        assert_eq!(*order.borrow(), vec!["first", "second"]);
    }

    #[test]
    fn empty_task_list_is_ok() {
        assert_eq!(run_tasks(&Context::for_tests(), Vec::new()).unwrap(), 0);
    }

    #[test]
    fn prerequisites_reject_other_platforms() {
        let ctx = Context::for_tests().with_platform(Platform::Windows);
        assert!(matches!(
            check_prerequisites(&ctx),
            Err(InspectorError::UnsupportedPlatform { .. })
        ));
        let ctx = Context::for_tests().with_platform(Platform::Linux);
        assert!(check_prerequisites(&ctx).is_ok());
    }

    #[test]
    fn default_output_path_uses_config_dir() {
        let mut config = crate::config::InspectorConfig::default();
        config.dump.output_dir = Some(PathBuf::from("/var/dumps"));
        let ctx = Context::for_tests().with_config(config);

        let path = default_output_path(&ctx, Path::new("/home/dev"), "dev");
        assert!(path.starts_with("/var/dumps"));
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("envdump-dev-"));
        assert!(name.ends_with(".tar.gz"));

        let ctx = Context::for_tests();
        let path = default_output_path(&ctx, Path::new("/home/dev"), "dev");
        assert!(path.starts_with("/home/dev/tmp/env_dumps"));
    }
}
