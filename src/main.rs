//! rspostal 命令行入口
//! 解析参数并分发到 check / example / export 子命令

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rspostal::{CodeFormat, ConfigManager, GlobalConfig, PostalCodeValidator, RuleLoader};

/// 按国家校验邮编格式
#[derive(Parser, Debug)]
#[command(name = "rspostal", version, about, long_about = None)]
struct Cli {
    /// 输出调试日志
    #[arg(short, long, global = true)]
    verbose: bool,

    /// 国家代码格式：alpha2 / alpha3 / numeric
    #[arg(short, long, global = true, default_value = "alpha2")]
    format: CodeFormat,

    /// 自定义规则文件（.json 或 .mp）
    #[arg(long, global = true)]
    rules: Option<PathBuf>,

    /// 覆盖规则 CC=PATTERN，PATTERN 为空表示不限制格式，可重复
    #[arg(long = "override", value_name = "CC=PATTERN", global = true)]
    overrides: Vec<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 校验邮编，任一国家代码匹配即通过
    Check {
        value: String,
        #[arg(required = true)]
        countries: Vec<String>,
    },
    /// 输出国家代码对应的邮编示例
    Example {
        #[arg(required = true)]
        countries: Vec<String>,
    },
    /// 将规则库导出为 MessagePack
    Export { path: PathBuf },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::from(2)
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = build_config(&cli)?;

    match cli.command {
        Commands::Check { value, countries } => {
            let validator = PostalCodeValidator::from_config(&config).await?;
            if validator.validate(&value, &countries)? {
                println!("valid");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("invalid");
                Ok(ExitCode::from(1))
            }
        }
        Commands::Example { countries } => {
            let validator = PostalCodeValidator::from_config(&config).await?;
            for (country, example) in validator.examples(&countries) {
                println!("{}\t{}", country, example.unwrap_or_else(|| "-".to_string()));
            }
            Ok(ExitCode::SUCCESS)
        }
        Commands::Export { path } => {
            let table = RuleLoader::load(&config).await?;
            RuleLoader::save_msgpack(&path, &table)
                .await
                .with_context(|| format!("导出规则库失败：{}", path.display()))?;
            println!("{} 条规则已导出到 {}", table.rules.len(), path.display());
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn build_config(cli: &Cli) -> Result<GlobalConfig> {
    let mut builder = ConfigManager::custom()
        .code_format(cli.format)
        .verbose(cli.verbose);

    if let Some(path) = &cli.rules {
        builder = builder.rule_file(path.clone());
    }

    for entry in &cli.overrides {
        let (country, pattern) = entry
            .split_once('=')
            .ok_or_else(|| anyhow!("覆盖规则格式应为 CC=PATTERN：{}", entry))?;
        let pattern = Some(pattern).filter(|p| !p.is_empty());
        builder = builder.override_pattern(country, pattern);
    }

    Ok(builder.build())
}
