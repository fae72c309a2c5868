// コンソールウィンドウを非表示にする（リリースビルド時）
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use anyhow::{Context, Result};
use std::env;
use std::process::ExitCode;
use tokio::runtime::{Builder, Runtime};

mod app;
mod clipboard;
mod config;
mod grammar;
mod notification;

use app::GrammarCheck;
use config::Config;
use grammar::GrammarClient;
use notification::DesktopNotifier;

fn print_help() {
    println!("Grammar Checker - クリップボードの文章を文法チェックサーバーへ送信");
    println!();
    println!("使い方:");
    println!("  grammar-check            クリップボードの内容をチェック");
    println!("  grammar-check --health   サーバーの稼働状態を確認");
    println!("  grammar-check --config   設定ファイルの場所と内容を表示");
    println!("  grammar-check --help     このヘルプを表示");
    println!();
    println!("設定ファイルの場所:");
    if let Ok(path) = config::config_path() {
        println!("  {}", path.display());
    }
}

/// 設定が読めなくてもデフォルト値で動かす
fn load_config() -> Config {
    match config::load_or_create() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Using default config: {:#}", e);
            Config::default()
        }
    }
}

/// 単一スレッドのランタイム（待ち合わせは HTTP 呼び出しのみ）
fn create_runtime() -> Result<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Tokioランタイム作成失敗")
}

fn run_check(config: Config) -> Result<ExitCode> {
    let notifier = DesktopNotifier;
    let check = GrammarCheck::new(clipboard::default_providers(), config, &notifier);
    let rt = create_runtime()?;

    let result = rt.block_on(check.run());
    Ok(ExitCode::from(app::exit_status(&result)))
}

fn run_health(config: &Config) -> Result<ExitCode> {
    let client = GrammarClient::new(&config.endpoint_url, config.timeout())?;
    let rt = create_runtime()?;

    let (status, health) = rt.block_on(client.health())?;
    if status.is_success() {
        println!("Server OK ({}): {}", status, health.status);
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Server unhealthy ({}): {}", status, health.status);
        Ok(ExitCode::FAILURE)
    }
}

fn show_config(config: &Config) -> Result<ExitCode> {
    let path = config::config_path()?;
    println!("{}", path.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_secs()
        .init();

    // コマンドライン引数をチェック
    let args: Vec<String> = env::args().collect();

    let result = match args.get(1).map(String::as_str) {
        None => run_check(load_config()),
        Some("--health") => run_health(&load_config()),
        Some("--config") => show_config(&load_config()),
        Some("--help" | "-h") => {
            print_help();
            Ok(ExitCode::SUCCESS)
        }
        Some(other) => {
            println!("不明なオプション: {}", other);
            print_help();
            Ok(ExitCode::FAILURE)
        }
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            log::error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
