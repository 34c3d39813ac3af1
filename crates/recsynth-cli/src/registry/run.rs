use std::fs::{OpenOptions, copy, create_dir_all};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::Serialize;

use recsynth_core::SynthesisOptions;
use recsynth_generate::GenerationReport;

use super::RegistryResult;
use super::atomic::{ensure_parent, write_json_atomic};

/// Metadata captured when a generation run starts.
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub run_dir: PathBuf,
    pub options: SynthesisOptions,
    pub nicknames_file: Option<PathBuf>,
}

/// Contents of `config.json`.
#[derive(Debug, Serialize)]
struct RunConfig<'a> {
    run_id: &'a str,
    started_at: String,
    tool_version: &'static str,
    options: &'a SynthesisOptions,
    nicknames_file: Option<String>,
}

/// Artifact locations inside one run directory.
#[derive(Debug, Clone)]
pub struct RunPaths {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub logs_path: PathBuf,
    pub records_path: PathBuf,
    pub report_path: PathBuf,
}

impl RunPaths {
    fn new(root: PathBuf) -> Self {
        Self {
            config_path: root.join("config.json"),
            logs_path: root.join("logs.ndjson"),
            records_path: root.join("records.csv"),
            report_path: root.join("generation_report.json"),
            root,
        }
    }
}

/// Create `<run_dir>/<timestamp>__run_<id>/` with its config and an empty log.
pub fn start_run(ctx: &RunContext) -> RegistryResult<RunPaths> {
    let timestamp = ctx.started_at.format("%Y-%m-%dT%H-%M-%SZ").to_string();
    let paths = RunPaths::new(
        ctx.run_dir
            .join(format!("{timestamp}__run_{}", ctx.run_id)),
    );
    create_dir_all(&paths.root)?;

    let config = RunConfig {
        run_id: &ctx.run_id,
        started_at: ctx.started_at.to_rfc3339(),
        tool_version: env!("CARGO_PKG_VERSION"),
        options: &ctx.options,
        nicknames_file: ctx
            .nicknames_file
            .as_ref()
            .map(|path| path.display().to_string()),
    };
    write_json_atomic(&paths.config_path, &config)?;

    OpenOptions::new()
        .create(true)
        .append(true)
        .open(&paths.logs_path)?;

    Ok(paths)
}

pub fn write_report(paths: &RunPaths, report: &GenerationReport) -> RegistryResult<()> {
    write_json_atomic(&paths.report_path, report)
}

/// Copy the run's CSV to `out`, creating parent directories as needed.
pub fn export_records(paths: &RunPaths, out: &Path) -> RegistryResult<u64> {
    ensure_parent(out)?;
    Ok(copy(&paths.records_path, out)?)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::TimeZone;

    use super::*;

    fn temp_run_dir() -> PathBuf {
        let mut dir = std::env::temp_dir();
        dir.push(format!("recsynth_registry_{}", uuid::Uuid::new_v4()));
        dir
    }

    #[test]
    fn start_run_writes_config_and_log() {
        let started_at = Utc
            .with_ymd_and_hms(2024, 3, 9, 14, 5, 0)
            .single()
            .expect("valid timestamp");
        let ctx = RunContext {
            run_id: "abc".to_string(),
            started_at,
            run_dir: temp_run_dir(),
            options: SynthesisOptions {
                seed: Some(9),
                ..SynthesisOptions::default()
            },
            nicknames_file: None,
        };

        let paths = start_run(&ctx).expect("start run");
        assert!(paths.root.ends_with("2024-03-09T14-05-00Z__run_abc"));
        assert!(paths.logs_path.exists());
        assert!(!paths.root.join("config.json.tmp").exists());

        let config: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&paths.config_path).expect("read config"))
                .expect("parse config");
        assert_eq!(config["run_id"], "abc");
        assert_eq!(config["options"]["seed"], 9);
        assert_eq!(config["options"]["num_records_desired"], 100);
    }

    #[test]
    fn export_creates_parent_directories() {
        let root = temp_run_dir();
        let paths = RunPaths::new(root.join("run"));
        create_dir_all(&paths.root).expect("create run dir");
        fs::write(&paths.records_path, ",study_id\n0,10001\n").expect("write csv");

        let out = root.join("nested").join("out.csv");
        let bytes = export_records(&paths, &out).expect("export csv");
        assert_eq!(bytes, 18);
        assert_eq!(
            fs::read_to_string(out).expect("read export"),
            ",study_id\n0,10001\n"
        );
    }
}
