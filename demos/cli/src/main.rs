use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use hemoglobin_alexa::{handle_request_str, language_strings};
use hemoglobin_core::{brackets, resolve, PatientQuery, SexGroup, SkillConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hemoglobin-cli",
    about = "Tra cứu khoảng hemoglobin bình thường theo tuổi và loại bệnh nhân."
)]
struct Args {
    /// Chỉ chấp nhận request mang application id này.
    #[arg(long, global = true)]
    application_id: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Trả lời một câu hỏi.
    Ask {
        /// Tuổi (năm); 0 để suy ra từ loại bệnh nhân.
        #[arg(long, default_value_t = 0.0)]
        age: f64,
        #[arg(long, default_value = "adult")]
        patient_type: String,
        #[arg(long, default_value = "")]
        sub_type: String,
        /// range, lower limit, upper limit hoặc limit.
        #[arg(long, default_value = "range")]
        shape: String,
        /// In kết quả dạng JSON thay vì câu trả lời.
        #[arg(long)]
        json: bool,
    },
    /// Chạy lại một request envelope JSON.
    Replay {
        /// Đường dẫn tới file JSON request.
        #[arg(short, long)]
        input: PathBuf,
    },
    /// In bảng tham chiếu.
    Table,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = SkillConfig {
        application_id: args.application_id,
        ..SkillConfig::default()
    };

    match args.command {
        Command::Ask {
            age,
            patient_type,
            sub_type,
            shape,
            json,
        } => {
            let query = PatientQuery {
                age,
                patient_type,
                patient_sub_type: sub_type,
                response_shape: shape,
            };
            let descriptor = resolve(&query);

            if json {
                let output = serde_json::to_string_pretty(&descriptor)
                    .context("Không serialize kết quả")?;
                println!("{output}");
            } else {
                let strings = language_strings(&config.default_locale, &config.default_locale);
                println!(
                    "{}",
                    strings.translate(
                        descriptor.kind.resource_key(),
                        descriptor.parameters.as_slice()
                    )
                );
            }
        }
        Command::Replay { input } => {
            let data = std::fs::read_to_string(&input)
                .with_context(|| format!("Không đọc được file {:?}", input))?;
            tracing::debug!(path = %input.display(), bytes = data.len(), "replay request loaded");
            let response = handle_request_str(&data, &config)?;
            let output =
                serde_json::to_string_pretty(&response).context("Không serialize response")?;
            println!("{output}");
        }
        Command::Table => {
            for row in brackets() {
                let ranges = row
                    .ranges
                    .iter()
                    .map(|range| {
                        format!(
                            "{} {}-{}",
                            sex_label(range.sexes),
                            range.min_value,
                            range.max_value
                        )
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("[{}, {}) {ranges}", row.age_min, row.age_max);
            }
        }
    }

    Ok(())
}

fn sex_label(sexes: &[SexGroup]) -> String {
    sexes
        .iter()
        .map(|group| match group {
            SexGroup::Male => "male",
            SexGroup::Female => "female",
            SexGroup::All => "all",
        })
        .collect::<Vec<_>>()
        .join("/")
}
