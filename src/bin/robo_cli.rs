//! robo-cli - 助手部署、令牌与 NLU 预测的命令行工具
//!
//! Command-line front end for the ROBO.AI and NLU service SDKs.
//!
//! Usage:
//!   robo-cli token <api-key>                          Issue an access token
//!   robo-cli token-info <token>                       Introspect a token
//!   robo-cli assistants [page]                        List assistants
//!   robo-cli runtime-logs <assistant-uuid>            Show runtime logs
//!   robo-cli deploy <assistant-uuid> <package> <base> Deploy a runtime package
//!   robo-cli nlu-status <model-uuid>                  Show NLU model status
//!   robo-cli nlu-predict <model-uuid> <text>          Run an NLU prediction

use anyhow::{bail, Context, Result};
use robo_sdk::nlu::PredictRequest;
use robo_sdk::{RoboAi, RoboNlu};
use std::io::Write;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_env("ROBO_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        print_usage();
        std::process::exit(1);
    }

    let result = match args[1].as_str() {
        "token" => cmd_token(&args[2..]),
        "token-info" => cmd_token_info(&args[2..]),
        "assistants" => cmd_assistants(&args[2..]),
        "runtime-logs" => cmd_runtime_logs(&args[2..]),
        "deploy" => cmd_deploy(&args[2..]),
        "nlu-status" => cmd_nlu_status(&args[2..]),
        "nlu-predict" => cmd_nlu_predict(&args[2..]),
        "version" | "--version" | "-V" => {
            println!("robo-cli {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            eprintln!();
            print_usage();
            std::process::exit(1);
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(2);
    }
}

fn print_usage() {
    println!(
        r#"robo-cli - ROBO.AI command-line tool

USAGE:
    robo-cli <COMMAND> [ARGS]

COMMANDS:
    token <api-key>                           Issue an access token
    token-info <token>                        Introspect a token
    assistants [page]                         List assistants (page defaults to 1)
    runtime-logs <assistant-uuid>             Show the latest runtime log lines
    deploy <assistant-uuid> <package> <base>  Create or update a runtime from a package
    nlu-status <model-uuid>                   Show NLU model training status
    nlu-predict <model-uuid> <text>           Predict intents and entities for text
    version                                   Show version information
    help                                      Show this help message

ENVIRONMENT:
    ROBO_AI_BASE_ENDPOINT, ROBO_AI_USERNAME, ROBO_AI_PASSWORD    Assistant API settings
    ROBO_AI_TOKEN                                                Bearer token for resource calls
    ROBO_NLU_BASE_ENDPOINT, ROBO_NLU_USERNAME, ROBO_NLU_PASSWORD NLU service settings
    ROBO_LOG                                                     Log filter (e.g. robo_sdk=debug)"#
    );
}

fn arg<'a>(args: &'a [String], idx: usize, name: &str) -> Result<&'a str> {
    match args.get(idx) {
        Some(v) => Ok(v.as_str()),
        None => bail!("missing argument <{}>", name),
    }
}

fn robo_ai_client() -> Result<RoboAi> {
    let client = RoboAi::from_env().context("failed to configure ROBO.AI client")?;
    if let Ok(token) = std::env::var("ROBO_AI_TOKEN") {
        client.set_session_token(token);
    }
    Ok(client)
}

fn nlu_client() -> Result<RoboNlu> {
    RoboNlu::from_env().context("failed to configure NLU client")
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn cmd_token(args: &[String]) -> Result<()> {
    let api_key = arg(args, 0, "api-key")?;
    let token = robo_ai_client()?.oauth().authenticate(api_key)?;
    print_json(&token)
}

fn cmd_token_info(args: &[String]) -> Result<()> {
    let token = arg(args, 0, "token")?;
    let info = robo_ai_client()?.oauth().get_token_info(token)?;
    print_json(&info)
}

fn cmd_assistants(args: &[String]) -> Result<()> {
    let page = match args.first() {
        Some(raw) => raw
            .parse::<u32>()
            .with_context(|| format!("invalid page number '{}'", raw))?,
        None => 1,
    };
    let list = robo_ai_client()?.assistants().get_list(page)?;
    print_json(&list)
}

fn cmd_runtime_logs(args: &[String]) -> Result<()> {
    let uuid = arg(args, 0, "assistant-uuid")?;
    let logs = robo_ai_client()?.assistants().runtimes().get_logs(uuid)?;
    for line in &logs.content.lines {
        println!("{}", line);
    }
    Ok(())
}

fn cmd_deploy(args: &[String]) -> Result<()> {
    let uuid = arg(args, 0, "assistant-uuid")?;
    let package = arg(args, 1, "package")?;
    let base = arg(args, 2, "base")?;
    let total = std::fs::metadata(package)
        .with_context(|| format!("cannot read package {}", package))?
        .len();

    let client = robo_ai_client()?;
    let runtimes = client.assistants().runtimes();
    let progress: robo_sdk::ProgressCallback = Box::new(move |sent| {
        let pct = if total == 0 { 100 } else { sent * 100 / total };
        eprint!("\ruploading {sent}/{total} bytes ({pct}%)");
        let _ = std::io::stderr().flush();
    });

    // An existing runtime is updated in place; otherwise a new one is created.
    let response = match runtimes.get(uuid) {
        Ok(_) => runtimes.update(uuid, package, base, Some(progress))?,
        Err(robo_sdk::RoboAiError::NotFound { .. }) => {
            runtimes.create(uuid, package, base, Some(progress))?
        }
        Err(e) => return Err(e.into()),
    };
    eprintln!();
    print_json(&response)
}

fn cmd_nlu_status(args: &[String]) -> Result<()> {
    let uuid = arg(args, 0, "model-uuid")?;
    let status = nlu_client()?.model(Some(uuid)).status()?;
    print_json(&status)
}

fn cmd_nlu_predict(args: &[String]) -> Result<()> {
    let uuid = arg(args, 0, "model-uuid")?;
    if args.len() < 2 {
        bail!("missing argument <text>");
    }
    let text = args[1..].join(" ");
    let prediction = nlu_client()?
        .model(Some(uuid))
        .predict(&PredictRequest::new(text))?;
    print_json(&prediction)
}
