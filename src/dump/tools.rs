//! Output of common developer tools, one file per probe.

use std::path::Path;

use super::files::mkdir;
use crate::api::Context;
use crate::error::Result;
use crate::shell::{capture_output_to_file, is_command};

/// A tool invocation and the file its output goes to.
#[derive(Debug, Clone, Copy)]
pub struct ToolProbe {
    pub argv: &'static [&'static str],
    pub file_name: &'static str,
}

const fn probe(argv: &'static [&'static str], file_name: &'static str) -> ToolProbe {
    ToolProbe { argv, file_name }
}

/// Probes captured into the dump.
pub const TOOL_PROBES: &[ToolProbe] = &[
    probe(&["brew", "--config"], "brew_config.txt"),
    probe(&["brew", "doctor", "--debug"], "brew_doctor_debug.txt"),
    probe(&["bash", "--version"], "bash_version.txt"),
    probe(&["gcc", "--version"], "gcc_version.txt"),
    probe(&["clang", "--version"], "clang_version.txt"),
    probe(&["tar", "--version"], "tar_version.txt"),
    probe(&["java", "-version"], "java_version.txt"),
    probe(&["mvn", "--version"], "mvn_version.txt"),
    probe(&["python3", "--version"], "python3_version.txt"),
    probe(&["bazel", "--version"], "bazel_version.txt"),
    probe(&["xcode-select", "-p"], "xcode_select.txt"),
    probe(&["softwareupdate", "-l"], "softwareupdate_l.txt"),
    probe(&["uname", "-a"], "uname.txt"),
];

/// Run every probe whose executable exists; missing tools only warn.
///
/// Returns how many output files were written.
pub fn collect_tools_info(target_dir: &Path, probes: &[ToolProbe], ctx: &Context) -> Result<usize> {
    ctx.logger().info("Collecting shell tools information...");
    mkdir(target_dir)?;

    let mut written = 0;
    for probe in probes {
        let Some(program) = probe.argv.first() else {
            continue;
        };
        if !is_command(program) {
            ctx.logger().warn(&format!("'{}' not installed", program));
            continue;
        }

        let argv: Vec<String> = probe.argv.iter().map(|s| s.to_string()).collect();
        match capture_output_to_file(&argv, target_dir, probe.file_name) {
            Ok(_) => written += 1,
            Err(e) => ctx
                .logger()
                .warn(&format!("Failed to capture `{}`: {}", argv.join(" "), e)),
        }
    }
    Ok(written)
}
