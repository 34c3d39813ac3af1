use std::env;
use std::path::PathBuf;

use recsynth_core::SynthesisOptions;
use recsynth_generate::DatasetAssembler;
use recsynth_generate::output::csv::write_records_csv;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut options = SynthesisOptions {
        num_records_desired: 100,
        percent_records_to_duplicate: 5.0,
        max_number_copies_of_one_record: 3,
        ..SynthesisOptions::default()
    };
    let mut out_dir = PathBuf::from(".");

    while let Some(arg) = args.next() {
        let value = args.next().ok_or_else(|| format!("missing value for {arg}"))?;
        match arg.as_str() {
            "--records" => options.num_records_desired = value.parse()?,
            "--percent" => options.percent_records_to_duplicate = value.parse()?,
            "--max-copies" => options.max_number_copies_of_one_record = value.parse()?,
            "--seed" => options.seed = Some(value.parse()?),
            "--out" => out_dir = PathBuf::from(value),
            _ => return Err(format!("unexpected argument {arg}").into()),
        }
    }

    let result = DatasetAssembler::new(options).run()?;

    std::fs::create_dir_all(&out_dir)?;
    let records_path = out_dir.join("records.csv");
    write_records_csv(&records_path, &result.records)?;
    let report_path = out_dir.join("generation_report.json");
    std::fs::write(&report_path, serde_json::to_vec_pretty(&result.report)?)?;

    println!("records={}", records_path.display());
    println!("report={}", report_path.display());
    Ok(())
}
