//! Doctor command - verify backend reachability and configuration.

use crate::backend::{Backend, HttpBackend};
use crate::cli::Output;
use crate::config::Settings;
use console::style;
use std::path::Path;

/// Check result for a single item.
#[derive(Debug)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    pub message: String,
    pub hint: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum CheckStatus {
    Ok,
    Warning,
    Error,
}

impl CheckResult {
    fn ok(name: &str, message: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Ok,
            message: message.to_string(),
            hint: None,
        }
    }

    fn warning(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Warning,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn error(name: &str, message: &str, hint: &str) -> Self {
        Self {
            name: name.to_string(),
            status: CheckStatus::Error,
            message: message.to_string(),
            hint: Some(hint.to_string()),
        }
    }

    fn print(&self) {
        let icon = match self.status {
            CheckStatus::Ok => style("✓").green(),
            CheckStatus::Warning => style("!").yellow(),
            CheckStatus::Error => style("✗").red(),
        };

        println!("  {} {} - {}", icon, style(&self.name).bold(), self.message);

        if let Some(hint) = &self.hint {
            println!("    {} {}", style("→").dim(), style(hint).dim());
        }
    }
}

/// Run all diagnostic checks.
pub async fn run_doctor(settings: &Settings, config_path: &Path) -> anyhow::Result<()> {
    Output::header("Zeta Doctor");
    println!();
    println!("Checking backend and configuration...\n");

    let mut checks = Vec::new();

    println!("{}", style("Backend").bold());
    let backend_checks = check_backend(settings).await;
    for check in &backend_checks {
        check.print();
    }
    checks.extend(backend_checks);

    println!();

    println!("{}", style("Directories").bold());
    let dir_check = check_export_dir(settings);
    dir_check.print();
    checks.push(dir_check);

    println!();

    println!("{}", style("Configuration").bold());
    let config_check = check_config_file(config_path);
    config_check.print();
    checks.push(config_check);

    println!();

    let errors = checks.iter().filter(|c| c.status == CheckStatus::Error).count();
    let warnings = checks.iter().filter(|c| c.status == CheckStatus::Warning).count();

    if errors > 0 {
        Output::error(&format!(
            "{} error(s) found. Please fix them before using Zeta.",
            errors
        ));
        std::process::exit(1);
    } else if warnings > 0 {
        Output::warning(&format!("All checks passed with {} warning(s).", warnings));
    } else {
        Output::success("All checks passed! Zeta is ready to use.");
    }

    Ok(())
}

/// Resolve the endpoints and probe the health route.
async fn check_backend(settings: &Settings) -> Vec<CheckResult> {
    let backend = match HttpBackend::from_settings(settings) {
        Ok(backend) => backend,
        Err(e) => {
            return vec![CheckResult::error(
                "Base URL",
                &format!("{} ({})", settings.backend.base_url, e),
                "Set [backend] base_url or pass --backend http://host:port",
            )]
        }
    };

    let mut results = vec![CheckResult::ok("Base URL", &settings.backend.base_url)];

    let probe = match backend.health().await {
        Ok(message) => CheckResult::ok(
            "Reachable",
            &format!("{} says {:?}", backend.health_url(), message),
        ),
        Err(e) => CheckResult::error(
            "Reachable",
            &e.to_string(),
            "Is the backend server running? Check with: zeta --backend <url> doctor",
        ),
    };
    results.push(probe);

    results
}

/// Check the export directory used for bare `--output` names.
fn check_export_dir(settings: &Settings) -> CheckResult {
    let export_dir = settings.export_dir();
    if export_dir.is_dir() {
        CheckResult::ok("Export directory", &format!("{}", export_dir.display()))
    } else {
        CheckResult::warning(
            "Export directory",
            &format!("{} (will be created)", export_dir.display()),
            "Directory will be created on first export",
        )
    }
}

/// Check if config file exists and parses.
fn check_config_file(config_path: &Path) -> CheckResult {
    if !config_path.exists() {
        return CheckResult::warning(
            "Config file",
            "using defaults",
            "Create with: zeta config edit",
        );
    }

    match Settings::load_from(Some(&config_path.to_path_buf())) {
        Ok(_) => CheckResult::ok("Config file", &format!("{}", config_path.display())),
        Err(e) => CheckResult::error(
            "Config file",
            &format!("{} ({})", config_path.display(), e),
            "Fix with: zeta config edit",
        ),
    }
}
